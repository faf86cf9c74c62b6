use dioxus::prelude::*;

use crate::ui::theme;

/// `−  [count]  +` control bounded by `limit`.
#[component]
pub fn QuantityPicker(
    count: u32,
    limit: u32,
    disabled: bool,
    on_increment: EventHandler<()>,
    on_decrement: EventHandler<()>,
    on_input: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "quantity-picker",
            button {
                class: theme::btn_round(),
                disabled: disabled || count == 0,
                onclick: move |_| on_decrement.call(()),
                "−"
            }
            input {
                class: theme::input_small(),
                inputmode: "numeric",
                disabled,
                value: "{count}",
                oninput: move |evt| on_input.call(evt.value()),
            }
            button {
                class: theme::btn_round(),
                disabled: disabled || count >= limit,
                onclick: move |_| on_increment.call(()),
                "+"
            }
            span { class: theme::text_muted(), "of {limit}" }
        }
    }
}
