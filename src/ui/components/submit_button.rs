use dioxus::prelude::*;

use crate::domain::SubmitStatus;
use crate::ui::theme;

#[component]
pub fn SubmitButton(status: SubmitStatus, label: String, onclick: EventHandler<()>) -> Element {
    let caption = status.button_label(&label);
    let hint = status.error().unwrap_or_default().to_string();
    rsx! {
        button {
            class: theme::btn_submit(&status),
            disabled: status.is_loading(),
            title: hint,
            onclick: move |_| onclick.call(()),
            if status.is_loading() {
                span { class: "spinner" }
            }
            "{caption}"
        }
    }
}
