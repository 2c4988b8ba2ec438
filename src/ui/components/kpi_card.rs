use dioxus::prelude::*;

#[component]
pub fn KpiCard(title: String, value: String, description: Option<String>) -> Element {
    rsx! {
        div {
            class: "panel kpi",
            h3 { "{title}" }
            p { "{value}" }
            if let Some(desc) = description {
                span { class: "muted", "{desc}" }
            }
        }
    }
}
