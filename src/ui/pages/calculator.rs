use dioxus::prelude::*;

use crate::{
    app::CalcRequest,
    domain::{AppState, CalcOutcome, HullList},
    ui::components::{
        materials_table::BreakdownView,
        toast::{push_toast, ToastKind, ToastMessage},
    },
};

#[component]
pub fn CalculatorPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let calc_request = use_context::<Signal<Option<CalcRequest>>>();

    let hulls = state.with(|st| st.hulls.clone());
    let form = state.with(|st| st.form.clone());
    let busy = state.with(|st| st.busy);
    let outcome = state.with(|st| st.outcome.clone());

    let selected_value = form
        .selected
        .map(|id| id.to_string())
        .unwrap_or_default();
    let placeholder = match &hulls {
        HullList::Loading => "Loading battleships…".to_string(),
        HullList::Ready(items) if items.is_empty() => "No battleships found".to_string(),
        HullList::Ready(_) => "— Select a battleship —".to_string(),
        HullList::Failed(_) => "Battleship list unavailable".to_string(),
    };

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let mut state = state;
        let request = state.with(|st| st.form.request());
        match request {
            Ok(request) => {
                state.with_mut(|st| st.begin_calculation());
                let mut calc_request = calc_request;
                calc_request.set(Some(request));
            }
            Err(message) => {
                state.with_mut(|st| st.finish_calculation(Err(message.clone())));
                push_toast(toasts, ToastKind::Warning, message);
            }
        }
    };

    let mut state_mut = state;
    let output = match outcome {
        None if busy => rsx! { p { class: "muted", "⏳ Crunching…" } },
        None => rsx! { p { class: "muted", "Pick a hull or paste a Type ID, then calculate." } },
        Some(CalcOutcome::Failed(message)) => rsx! { div { class: "panel error", "{message}" } },
        Some(CalcOutcome::Ready(breakdown)) => rsx! { BreakdownView { breakdown } },
    };

    rsx! {
        div {
            form {
                class: "panel form-grid",
                onsubmit: on_submit,
                div {
                    label { "Battleship" }
                    select {
                        value: "{selected_value}",
                        disabled: hulls.items().is_empty(),
                        onchange: move |evt: FormEvent| {
                            let value = evt.value();
                            state_mut.with_mut(|st| st.form.selected = value.parse().ok());
                        },
                        option { value: "", "{placeholder}" }
                        for hull in hulls.items().iter().cloned() {
                            option { key: "{hull.id}", value: "{hull.id}", "{hull.label()}" }
                        }
                    }
                }
                div {
                    label { "Type ID or EVE Ref URL" }
                    input {
                        value: "{form.manual}",
                        placeholder: "e.g. 645 or https://everef.net/type/645",
                        oninput: move |evt: FormEvent| {
                            let value = evt.value();
                            state_mut.with_mut(|st| st.form.manual = value);
                        },
                    }
                }
                div {
                    label { "Runs" }
                    input {
                        r#type: "number",
                        min: "1",
                        value: "{form.runs}",
                        oninput: move |evt: FormEvent| {
                            let value = evt.value();
                            state_mut.with_mut(|st| st.form.runs = value);
                        },
                    }
                }
                div {
                    label { "ME" }
                    input {
                        r#type: "number",
                        min: "0",
                        value: "{form.me}",
                        oninput: move |evt: FormEvent| {
                            let value = evt.value();
                            state_mut.with_mut(|st| st.form.me = value);
                        },
                    }
                }
                div {
                    label { "TE" }
                    input {
                        r#type: "number",
                        min: "0",
                        value: "{form.te}",
                        oninput: move |evt: FormEvent| {
                            let value = evt.value();
                            state_mut.with_mut(|st| st.form.te = value);
                        },
                    }
                }
                button {
                    r#type: "submit",
                    disabled: busy,
                    "Calculate"
                }
            }
            if let HullList::Failed(reason) = &hulls {
                p { class: "error", "Failed to load battleships: {reason}" }
            }
            {output}
        }
    }
}
