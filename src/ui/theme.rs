//! Class helpers so pages share one look. Classes live in `assets/main.css`.

use crate::domain::SubmitStatus;

// ============================================
// BUTTON STYLES
// ============================================

pub fn btn_submit(status: &SubmitStatus) -> &'static str {
    match status {
        SubmitStatus::Idle => "btn btn-primary",
        SubmitStatus::Loading => "btn btn-primary btn-loading",
        SubmitStatus::Success => "btn btn-success",
        SubmitStatus::Error(_) => "btn btn-danger",
    }
}

pub fn btn_outline() -> &'static str {
    "btn btn-outline"
}

pub fn btn_icon() -> &'static str {
    "btn-icon"
}

pub fn btn_round() -> &'static str {
    "btn-round"
}

// ============================================
// INPUT STYLES
// ============================================

pub fn input_class(read_only: bool) -> &'static str {
    if read_only {
        "input input-readonly"
    } else {
        "input"
    }
}

pub fn input_small() -> &'static str {
    "input input-small"
}

// ============================================
// TEXT / LAYOUT
// ============================================

pub fn label_class() -> &'static str {
    "label"
}

pub fn divider() -> &'static str {
    "divider"
}

pub fn text_muted() -> &'static str {
    "text-muted"
}

/// Width style for a progress bar fill, `ratio` in `[0, 1]`.
pub fn bar_width(ratio: f32) -> String {
    format!("width: {:.1}%;", ratio.clamp(0.0, 1.0) * 100.0)
}
