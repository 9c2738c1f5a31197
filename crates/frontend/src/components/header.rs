use dioxus::prelude::*;

#[component]
pub fn Header(title: &'static str, subtitle: &'static str) -> Element {
    rsx! {
        div { class: "page-header",
            h1 { "{title}" }
            p { class: "subtitle", "{subtitle}" }
        }
    }
}
