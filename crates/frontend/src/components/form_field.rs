use dioxus::prelude::*;
use estate_shared::models::{MultiSelectOption, PhotoFile};

use crate::components::multi_select::MultiSelect;

/// Label above a control, inline error below.
#[component]
fn FieldShell(
    name: &'static str,
    label: &'static str,
    error: Option<String>,
    #[props(default)] class: String,
    children: Element,
) -> Element {
    rsx! {
        div { class: "form-field {class}",
            label { r#for: name, class: "form-label", "{label}" }
            {children}
            if let Some(message) = error {
                p { class: "form-error", "{message}" }
            }
        }
    }
}

#[component]
pub fn TextField(
    name: &'static str,
    label: &'static str,
    value: String,
    error: Option<String>,
    on_input: EventHandler<String>,
    #[props(default)] multiline: bool,
    #[props(default)] class: String,
) -> Element {
    rsx! {
        FieldShell { name, label, error, class,
            if multiline {
                textarea {
                    id: name,
                    name,
                    rows: "4",
                    value: "{value}",
                    oninput: move |evt: Event<FormData>| on_input.call(evt.value()),
                }
            } else {
                input {
                    id: name,
                    name,
                    r#type: "text",
                    value: "{value}",
                    oninput: move |evt: Event<FormData>| on_input.call(evt.value()),
                }
            }
        }
    }
}

/// Parse a number input; an empty or unparsable box counts as zero so the
/// schema reports it.
pub fn parse_count(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

#[component]
pub fn NumberField(
    name: &'static str,
    label: &'static str,
    value: u32,
    error: Option<String>,
    on_input: EventHandler<u32>,
) -> Element {
    rsx! {
        FieldShell { name, label, error,
            input {
                id: name,
                name,
                r#type: "number",
                min: "0",
                value: "{value}",
                oninput: move |evt: Event<FormData>| on_input.call(parse_count(&evt.value())),
            }
        }
    }
}

#[component]
pub fn SwitchField(
    name: &'static str,
    label: &'static str,
    checked: bool,
    on_toggle: EventHandler<bool>,
) -> Element {
    rsx! {
        div { class: "form-field switch-field",
            label { class: "switch",
                input {
                    id: name,
                    name,
                    r#type: "checkbox",
                    role: "switch",
                    checked,
                    onchange: move |evt: Event<FormData>| on_toggle.call(evt.checked()),
                }
                span { class: "switch-slider" }
            }
            label { r#for: name, class: "form-label", "{label}" }
        }
    }
}

#[component]
pub fn SelectField(
    name: &'static str,
    label: &'static str,
    options: Vec<MultiSelectOption>,
    value: String,
    error: Option<String>,
    on_change: EventHandler<String>,
) -> Element {
    rsx! {
        FieldShell { name, label, error,
            select {
                id: name,
                name,
                value: "{value}",
                onchange: move |evt: Event<FormData>| on_change.call(evt.value()),
                for opt in options {
                    option {
                        value: "{opt.value}",
                        selected: opt.value == value,
                        "{opt.label}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn MultiSelectField(
    name: &'static str,
    label: &'static str,
    options: Vec<MultiSelectOption>,
    value: Vec<String>,
    error: Option<String>,
    on_change: EventHandler<Vec<String>>,
) -> Element {
    rsx! {
        FieldShell { name, label, error,
            MultiSelect { options, value, on_change }
        }
    }
}

/// Multi-file picker. Selected files are read into memory before being
/// handed to `on_files`; unreadable files are logged and left out.
#[component]
pub fn FileField(
    name: &'static str,
    label: &'static str,
    accept: &'static str,
    files: Vec<String>,
    error: Option<String>,
    on_files: EventHandler<Vec<PhotoFile>>,
) -> Element {
    rsx! {
        FieldShell { name, label, error,
            input {
                id: name,
                name,
                r#type: "file",
                accept,
                multiple: true,
                onchange: move |evt: Event<FormData>| {
                    let picked = evt.files();
                    spawn(async move {
                        let mut photos = Vec::with_capacity(picked.len());
                        for file in picked {
                            let file_name = file.name();
                            match file.read_bytes().await {
                                Ok(bytes) => photos.push(PhotoFile {
                                    mime: file.content_type().unwrap_or_default(),
                                    name: file_name,
                                    bytes: bytes.to_vec(),
                                }),
                                Err(e) => tracing::warn!(file = %file_name, error = ?e, "could not read file"),
                            }
                        }
                        on_files.call(photos);
                    });
                },
            }
            if !files.is_empty() {
                ul { class: "file-list",
                    for f in files {
                        li { "{f}" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("12"), 12);
        assert_eq!(parse_count(" 3 "), 3);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("-1"), 0);
        assert_eq!(parse_count("2.5"), 0);
    }
}
