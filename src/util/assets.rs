use std::{borrow::Cow, sync::OnceLock};

use base64::{engine::general_purpose::STANDARD, Engine};
use rust_embed::RustEmbed;

/// Embed the entire `assets/` directory into the binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

static MAIN_CSS: OnceLock<String> = OnceLock::new();
static FAVICON_DATA_URI: OnceLock<String> = OnceLock::new();

/// Returns the contents of `assets/main.css`.
pub fn main_css() -> &'static str {
    MAIN_CSS.get_or_init(|| load_text("main.css")).as_str()
}

/// Returns a data URI for the favicon.
pub fn favicon_data_uri() -> &'static str {
    FAVICON_DATA_URI
        .get_or_init(|| load_data_uri("favicon.svg"))
        .as_str()
}

// Missing assets render as empty strings; the UI stays usable unstyled.
fn load_text(path: &str) -> String {
    match load_asset(path) {
        Some(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        None => String::new(),
    }
}

fn load_data_uri(path: &str) -> String {
    let Some(bytes) = load_asset(path) else {
        return String::new();
    };
    format!("data:{};base64,{}", guess_mime(path), STANDARD.encode(&bytes))
}

fn load_asset(path: &str) -> Option<Cow<'static, [u8]>> {
    let asset = EmbeddedAssets::get(path.trim_start_matches('/')).map(|file| file.data);
    if asset.is_none() {
        tracing::warn!(path, "embedded asset missing");
    }
    asset
}

fn guess_mime(path: &str) -> &'static str {
    if path.ends_with(".css") {
        "text/css"
    } else if path.ends_with(".svg") {
        "image/svg+xml"
    } else if path.ends_with(".ico") {
        "image/x-icon"
    } else if path.ends_with(".png") {
        "image/png"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_asset_is_empty() {
        assert_eq!(load_text("missing.css"), "");
        assert_eq!(load_data_uri("missing.svg"), "");
    }

    #[test]
    fn mime_follows_extension() {
        assert_eq!(guess_mime("favicon.svg"), "image/svg+xml");
        assert_eq!(guess_mime("icon.png"), "image/png");
        assert_eq!(guess_mime("blob"), "application/octet-stream");
    }

    #[test]
    fn stylesheet_and_icon_are_embedded() {
        assert!(main_css().contains(".topbar"));
        let uri = favicon_data_uri();
        let payload = uri
            .strip_prefix("data:image/svg+xml;base64,")
            .expect("svg data uri");
        let svg = STANDARD.decode(payload).expect("valid base64");
        assert!(String::from_utf8_lossy(&svg).contains("<svg"));
    }
}
