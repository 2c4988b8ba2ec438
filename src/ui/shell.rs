use dioxus::prelude::*;

use crate::util::version::{version_label, APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    let version = version_label();

    rsx! {
        div {
            header {
                class: "shell-header",
                h1 { "{APP_NAME}" }
                span { class: "muted", "{version} · data: ESI + EVE Ref" }
            }
            main { class: "shell-main", {children} }
        }
    }
}
