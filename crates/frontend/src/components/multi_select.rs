use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dioxus::prelude::*;
use estate_shared::models::MultiSelectOption;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// Open/closed state of the dropdown. Selection lives with the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropdownState {
    #[default]
    Closed,
    Open,
}

impl DropdownState {
    pub fn is_open(self) -> bool {
        self == DropdownState::Open
    }

    pub fn toggled(self) -> Self {
        match self {
            DropdownState::Closed => DropdownState::Open,
            DropdownState::Open => DropdownState::Closed,
        }
    }

    /// State after a document pointer-down; only presses outside the
    /// control's root close it.
    pub fn after_pointer_down(self, inside_root: bool) -> Self {
        if inside_root {
            self
        } else {
            DropdownState::Closed
        }
    }
}

/// Add `value` when absent, remove it when present.
pub fn toggle_value(selected: &[String], value: &str) -> Vec<String> {
    if selected.iter().any(|v| v == value) {
        selected.iter().filter(|v| *v != value).cloned().collect()
    } else {
        let mut next = selected.to_vec();
        next.push(value.to_string());
        next
    }
}

/// Options whose label or value contains `query`, case-insensitively.
pub fn filter_options<'a>(options: &'a [MultiSelectOption], query: &str) -> Vec<&'a MultiSelectOption> {
    let needle = query.trim().to_lowercase();
    options
        .iter()
        .filter(|o| {
            needle.is_empty()
                || o.label.to_lowercase().contains(&needle)
                || o.value.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Tag labels for the selected values, in selection order.
pub fn selected_labels(options: &[MultiSelectOption], selected: &[String]) -> Vec<(String, String)> {
    selected
        .iter()
        .map(|v| {
            let label = options
                .iter()
                .find(|o| &o.value == v)
                .map(|o| o.label.clone())
                .unwrap_or_else(|| v.clone());
            (v.clone(), label)
        })
        .collect()
}

/// Where a document press landed relative to the control. `None` when the
/// root is not mounted, so the press is ignored. A press without a target
/// node counts as outside.
pub fn press_inside<R, T>(
    root: Option<&R>,
    target: Option<&T>,
    contains: impl Fn(&R, &T) -> bool,
) -> Option<bool> {
    let root = root?;
    Some(target.is_some_and(|t| contains(root, t)))
}

// ---------------------------------------------------------------------------
// Document listener
// ---------------------------------------------------------------------------

/// A `mousedown` listener on `document`, removed on [`detach`] or drop.
///
/// [`detach`]: OutsidePressListener::detach
pub struct OutsidePressListener {
    closure: Closure<dyn FnMut(web_sys::MouseEvent)>,
    attached: Cell<bool>,
}

impl OutsidePressListener {
    /// Call `on_press(inside)` for every pointer-down in the document, where
    /// `inside` tells whether the target is within the element `root_id`.
    /// Presses are ignored while the root is not in the DOM.
    pub fn attach(root_id: String, mut on_press: impl FnMut(bool) + 'static) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let lookup = document.clone();
        let closure = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |evt: web_sys::MouseEvent| {
            let root = lookup.get_element_by_id(&root_id);
            let target = evt.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
            let inside = press_inside(root.as_ref(), target.as_ref(), |root, node| {
                root.contains(Some(node))
            });
            if let Some(inside) = inside {
                on_press(inside);
            }
        });
        document
            .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
            .ok()?;
        Some(Self {
            closure,
            attached: Cell::new(true),
        })
    }

    pub fn detach(&self) {
        if !self.attached.replace(false) {
            return;
        }
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let _ = document.remove_event_listener_with_callback(
                "mousedown",
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

impl Drop for OutsidePressListener {
    fn drop(&mut self) {
        self.detach();
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

#[component]
pub fn MultiSelect(
    options: Vec<MultiSelectOption>,
    value: Vec<String>,
    on_change: EventHandler<Vec<String>>,
    #[props(default = "Select...".to_string())] placeholder: String,
    #[props(default)] class: String,
) -> Element {
    let mut state = use_signal(DropdownState::default);
    let mut query = use_signal(String::new);
    let root_id = use_hook(|| format!("multi-select-{}", NEXT_ID.fetch_add(1, Ordering::Relaxed)));

    let listener = use_hook({
        let root_id = root_id.clone();
        move || {
            let listener = OutsidePressListener::attach(root_id, move |inside| {
                let next = state.peek().after_pointer_down(inside);
                if next != *state.peek() {
                    state.set(next);
                }
            });
            if listener.is_none() {
                tracing::warn!("could not attach outside-click listener");
            }
            Rc::new(listener)
        }
    });
    use_drop(move || {
        if let Some(l) = &*listener {
            l.detach();
        }
    });

    let is_open = state().is_open();
    let tags = selected_labels(&options, &value);
    let current_query = query.read().clone();
    let visible: Vec<MultiSelectOption> = filter_options(&options, &current_query)
        .into_iter()
        .cloned()
        .collect();

    rsx! {
        div { id: "{root_id}", class: "multi-select",
            button {
                r#type: "button",
                role: "combobox",
                "aria-expanded": "{is_open}",
                class: "multi-select-trigger {class}",
                onclick: move |_| state.set(state().toggled()),
                if tags.is_empty() {
                    span { class: "multi-select-placeholder", "{placeholder}" }
                } else {
                    div { class: "multi-select-tags",
                        for (val, label) in tags {
                            span { key: "{val}", class: "badge", "{label}" }
                        }
                    }
                }
                span { class: "chevron", "\u{25be}" }
            }

            if is_open {
                div { class: "multi-select-dropdown",
                    input {
                        r#type: "text",
                        class: "multi-select-search",
                        placeholder: "Search...",
                        value: "{current_query}",
                        oninput: move |evt: Event<FormData>| query.set(evt.value()),
                    }
                    if visible.is_empty() {
                        div { class: "multi-select-empty", "No option found." }
                    }
                    ul { class: "multi-select-options",
                        for opt in visible {
                            li {
                                key: "{opt.value}",
                                class: "multi-select-option",
                                onclick: {
                                    let selected = value.clone();
                                    let picked = opt.value.clone();
                                    move |_| on_change.call(toggle_value(&selected, &picked))
                                },
                                span {
                                    class: if value.contains(&opt.value) { "check visible" } else { "check" },
                                    "\u{2713}"
                                }
                                "{opt.label}"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> Vec<MultiSelectOption> {
        vec![
            MultiSelectOption::new("Pool", "Pool"),
            MultiSelectOption::new("WasherDryer", "Washer/Dryer"),
            MultiSelectOption::new("AirConditioning", "Air Conditioning"),
        ]
    }

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_toggle_adds_missing_value() {
        assert_eq!(toggle_value(&strings(&["Pool"]), "Gym"), strings(&["Pool", "Gym"]));
    }

    #[test]
    fn test_toggle_removes_present_value() {
        assert_eq!(toggle_value(&strings(&["Pool", "Gym"]), "Pool"), strings(&["Gym"]));
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let original = strings(&["Pool", "WiFi"]);
        for v in ["Gym", "Pool", "WiFi"] {
            let once = toggle_value(&original, v);
            let twice = toggle_value(&once, v);
            let mut a = twice.clone();
            let mut b = original.clone();
            a.sort();
            b.sort();
            assert_eq!(a, b, "toggling {v} twice");
        }
    }

    #[test]
    fn test_trigger_toggles_state() {
        let s = DropdownState::default();
        assert!(!s.is_open());
        assert!(s.toggled().is_open());
        assert!(!s.toggled().toggled().is_open());
    }

    #[test]
    fn test_press_outside_closes() {
        assert_eq!(
            DropdownState::Open.after_pointer_down(false),
            DropdownState::Closed
        );
    }

    #[test]
    fn test_press_inside_keeps_open() {
        assert_eq!(
            DropdownState::Open.after_pointer_down(true),
            DropdownState::Open
        );
        assert_eq!(
            DropdownState::Closed.after_pointer_down(true),
            DropdownState::Closed
        );
    }

    /// Nodes as slash paths; a node contains itself and every descendant.
    fn path_contains(root: &&str, node: &&str) -> bool {
        *node == *root || node.starts_with(&format!("{root}/"))
    }

    #[test]
    fn test_press_on_descendant_is_inside() {
        let root = "body/form/multi-select-0";
        for target in [root, "body/form/multi-select-0/ul/li", "body/form/multi-select-0/button"] {
            assert_eq!(
                press_inside(Some(&root), Some(&target), path_contains),
                Some(true),
                "{target}"
            );
        }
    }

    #[test]
    fn test_press_elsewhere_is_outside() {
        let root = "body/form/multi-select-0";
        for target in ["body", "body/form/multi-select-1/button", "body/form/multi-select-01"] {
            assert_eq!(
                press_inside(Some(&root), Some(&target), path_contains),
                Some(false),
                "{target}"
            );
        }
        assert_eq!(press_inside(Some(&root), None::<&&str>, path_contains), Some(false));
    }

    #[test]
    fn test_press_ignored_while_unmounted() {
        assert_eq!(press_inside(None::<&&str>, Some(&"body"), path_contains), None);
    }

    #[test]
    fn test_outside_press_closes_open_dropdown() {
        let root = "body/multi-select-2";
        let state = DropdownState::Open;
        let inside = press_inside(Some(&root), Some(&"body/multi-select-2/input"), path_contains);
        assert_eq!(state.after_pointer_down(inside.unwrap()), DropdownState::Open);
        let outside = press_inside(Some(&root), Some(&"body/header"), path_contains);
        assert_eq!(state.after_pointer_down(outside.unwrap()), DropdownState::Closed);
    }

    #[test]
    fn test_filter_matches_label_case_insensitive() {
        let o = opts();
        let hits: Vec<_> = filter_options(&o, "washer").iter().map(|o| o.value.as_str()).collect();
        assert_eq!(hits, vec!["WasherDryer"]);
    }

    #[test]
    fn test_filter_matches_value() {
        let o = opts();
        let hits = filter_options(&o, "aircond");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].label, "Air Conditioning");
    }

    #[test]
    fn test_empty_query_keeps_all() {
        assert_eq!(filter_options(&opts(), "  ").len(), 3);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(filter_options(&opts(), "sauna").is_empty());
    }

    #[test]
    fn test_selected_labels_follow_selection_order() {
        let labels = selected_labels(&opts(), &strings(&["WasherDryer", "Pool"]));
        assert_eq!(
            labels,
            vec![
                ("WasherDryer".to_string(), "Washer/Dryer".to_string()),
                ("Pool".to_string(), "Pool".to_string())
            ]
        );
    }

    #[test]
    fn test_unknown_selected_value_shows_raw_value() {
        let labels = selected_labels(&opts(), &strings(&["Sauna"]));
        assert_eq!(labels[0].1, "Sauna");
    }
}
