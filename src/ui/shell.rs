use dioxus::prelude::*;

use crate::app::Route;
use crate::ui::theme;

/// Page frame with a centered title bar, a back button and optional actions.
#[component]
pub fn Shell(
    title: String,
    #[props(default)] show_back: bool,
    actions: Option<Element>,
    children: Element,
) -> Element {
    let nav = use_navigator();

    rsx! {
        div { class: "app",
            header { class: "topbar",
                div { class: "topbar-side",
                    if show_back {
                        button {
                            class: theme::btn_icon(),
                            title: "Navigate back",
                            onclick: move |_| {
                                if nav.can_go_back() {
                                    nav.go_back();
                                } else {
                                    nav.replace(Route::Markets {});
                                }
                            },
                            "←"
                        }
                    }
                }
                h1 { class: "topbar-title", "{title}" }
                div { class: "topbar-side topbar-actions",
                    if let Some(actions) = actions {
                        {actions}
                    }
                }
            }
            main { class: "page", {children} }
        }
    }
}
