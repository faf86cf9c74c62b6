use dioxus::prelude::*;

use crate::{
    app::{Route, Services},
    domain::{AppState, MarketForm, SaveMarketError},
    ui::{
        components::{
            submit_button::SubmitButton,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        shell::Shell,
        theme,
    },
    util::format::format_decimal,
};

#[derive(Clone, Debug, PartialEq)]
pub enum FormMode {
    Add,
    Edit(String),
}

#[component]
pub fn AddEditMarketPage(mode: FormMode) -> Element {
    let services = use_context::<Services>();
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();
    let form = use_signal(|| None::<MarketForm>);

    // Only changes when a refresh brings a different catalog.
    let catalog = use_memo(move || state.read().loaded_catalog());

    let _loader = use_resource({
        let services = services.clone();
        let mode = mode.clone();
        move || {
            let services = services.clone();
            let mode = mode.clone();
            let loaded = catalog();
            let mut form = form;
            async move {
                // The app shell loads the catalog at startup; wait for it.
                let Some(catalog) = loaded else {
                    return;
                };
                match mode {
                    FormMode::Add => form.set(Some(MarketForm::new_market(catalog))),
                    FormMode::Edit(market_id) => {
                        match services.markets.load_listing(&market_id).await {
                            Ok(listing) => form.set(Some(MarketForm::edit(listing.market, catalog))),
                            Err(err) => {
                                tracing::error!(market = %market_id, error = %err, "failed to load market for editing");
                                push_toast(toasts, ToastKind::Error, format!("Failed to load market: {err}"));
                            }
                        }
                    }
                }
            }
        }
    });

    let on_submit = {
        let services = services.clone();
        move |_: ()| {
            let mut form = form;
            let begun = form.with_mut(|f| f.as_mut().map(MarketForm::begin_save));
            let market = match begun {
                Some(Ok(market)) => market,
                Some(Err(err)) => {
                    push_toast(toasts, ToastKind::Error, err.to_string());
                    return;
                }
                None => return,
            };
            let directory = services.markets.clone();
            let mut state = state;
            spawn(async move {
                let result = directory.save_market(market).await;
                let outcome = form.with_mut(|f| f.as_mut().map(|f| f.finish_save(result)));
                match outcome {
                    Some(Ok(saved)) => {
                        push_toast(toasts, ToastKind::Success, format!("Saved {}.", saved.name));
                        state.with_mut(|st| st.upsert_market(saved));
                        nav.replace(Route::Markets {});
                    }
                    Some(Err(SaveMarketError::Store(err))) => {
                        push_toast(toasts, ToastKind::Error, format!("Saving market failed: {err}"));
                    }
                    _ => {}
                }
            });
        }
    };

    let Some(current) = form() else {
        let title = match mode {
            FormMode::Add => "Add Market",
            FormMode::Edit(_) => "Edit Market",
        };
        return rsx! {
            Shell { title: title.to_string(), show_back: true,
                div { class: "spinner spinner-large" }
            }
        };
    };

    let read_only = current.is_editing();
    let search = current.search_enabled();
    let removable = current.can_remove_rows();
    let catalog = current.catalog().to_vec();
    let market_name = current.market_name().to_string();

    rsx! {
        Shell {
            title: current.title(),
            show_back: true,
            div { class: "form-field",
                label { class: theme::label_class(), "Market Name" }
                input {
                    class: theme::input_class(read_only),
                    readonly: read_only,
                    value: "{market_name}",
                    oninput: move |evt| {
                        let mut form = form;
                        form.with_mut(|f| {
                            if let Some(f) = f.as_mut() {
                                f.set_market_name(&evt.value());
                            }
                        });
                    },
                }
            }
            div { class: theme::divider() }
            datalist { id: "produce-catalog",
                for name in catalog.iter() {
                    option { value: "{name}" }
                }
            }
            ul { class: "produce-rows",
                for row in current.rows().iter().cloned() {
                    li { key: "{row.id}", class: "produce-row",
                        if search {
                            input {
                                class: theme::input_class(false),
                                list: "produce-catalog",
                                placeholder: "Select Produce",
                                value: row.produce.clone().unwrap_or_default(),
                                onchange: {
                                    let row_id = row.id.clone();
                                    let options = catalog.clone();
                                    move |evt: FormEvent| {
                                        let mut form = form;
                                        let choice = evt.value();
                                        if options.contains(&choice) {
                                            form.with_mut(|f| f.as_mut().map(|f| f.select_produce(&row_id, &choice)));
                                        }
                                    }
                                },
                            }
                        } else {
                            select {
                                class: theme::input_class(false),
                                value: row.produce.clone().unwrap_or_default(),
                                onchange: {
                                    let row_id = row.id.clone();
                                    move |evt: FormEvent| {
                                        let mut form = form;
                                        form.with_mut(|f| f.as_mut().map(|f| f.select_produce(&row_id, &evt.value())));
                                    }
                                },
                                option { value: "", disabled: true, "Select Produce" }
                                for name in catalog.iter() {
                                    option {
                                        value: "{name}",
                                        selected: row.produce.as_deref() == Some(name.as_str()),
                                        "{name}"
                                    }
                                }
                            }
                        }
                        input {
                            class: theme::input_class(false),
                            inputmode: "decimal",
                            title: "Price of Produce",
                            value: format_decimal(row.price),
                            onchange: {
                                let row_id = row.id.clone();
                                move |evt: FormEvent| {
                                    let mut form = form;
                                    form.with_mut(|f| f.as_mut().map(|f| f.set_produce_price_from_input(&row_id, &evt.value())));
                                }
                            },
                        }
                        if removable {
                            button {
                                class: theme::btn_icon(),
                                title: "Remove Produce Row",
                                onclick: {
                                    let row_id = row.id.clone();
                                    move |_: MouseEvent| {
                                        let mut form = form;
                                        form.with_mut(|f| f.as_mut().map(|f| f.remove_produce_row(&row_id)));
                                    }
                                },
                                "✕"
                            }
                        }
                    }
                }
                li { class: "produce-row-add",
                    button {
                        class: theme::btn_outline(),
                        title: "Add Produce Row in Market",
                        onclick: move |_| {
                            let mut form = form;
                            form.with_mut(|f| {
                                if let Some(f) = f.as_mut() {
                                    f.add_produce_row();
                                }
                            });
                        },
                        "+"
                    }
                }
            }
            SubmitButton {
                status: current.status().clone(),
                label: "Save Market".to_string(),
                onclick: on_submit,
            }
        }
    }
}
