use dioxus::prelude::*;
use estate_shared::filters::{parse_any, ListingFilters};
use estate_shared::models::PropertyType;

const ROOM_CHOICES: [&str; 4] = ["1", "2", "3", "4"];

#[component]
pub fn FiltersBar() -> Element {
    let mut filters = use_context::<Signal<ListingFilters>>();
    let current = filters.read().clone();

    let beds = current.beds.map(|b| b.to_string()).unwrap_or_else(|| "any".to_string());
    let baths = current.baths.map(|b| b.to_string()).unwrap_or_else(|| "any".to_string());
    let property_type = current
        .property_type
        .map(|t| t.code().to_string())
        .unwrap_or_else(|| "any".to_string());
    let price_min = current.price_range.0.map(|v| v.to_string()).unwrap_or_default();
    let price_max = current.price_range.1.map(|v| v.to_string()).unwrap_or_default();

    rsx! {
        div { class: "filters-bar",
            input {
                r#type: "text",
                class: "filter-location",
                placeholder: "Search location",
                value: "{current.location}",
                onchange: move |evt: Event<FormData>| filters.write().location = evt.value(),
            }
            select {
                "aria-label": "Beds",
                value: "{beds}",
                onchange: move |evt: Event<FormData>| filters.write().beds = parse_any(&evt.value()),
                option { value: "any", "Any beds" }
                for n in ROOM_CHOICES {
                    option { value: n, selected: beds == n, "{n}+ bd" }
                }
            }
            select {
                "aria-label": "Baths",
                value: "{baths}",
                onchange: move |evt: Event<FormData>| filters.write().baths = parse_any(&evt.value()),
                option { value: "any", "Any baths" }
                for n in ROOM_CHOICES {
                    option { value: n, selected: baths == n, "{n}+ ba" }
                }
            }
            select {
                "aria-label": "Property type",
                value: "{property_type}",
                onchange: move |evt: Event<FormData>| {
                    filters.write().property_type = PropertyType::from_code(&evt.value());
                },
                option { value: "any", "Any type" }
                for t in PropertyType::ALL {
                    option {
                        value: t.code(),
                        selected: property_type == t.code(),
                        "{t.label()}"
                    }
                }
            }
            input {
                r#type: "number",
                min: "0",
                placeholder: "Min price",
                value: "{price_min}",
                onchange: move |evt: Event<FormData>| filters.write().price_range.0 = parse_any(&evt.value()),
            }
            input {
                r#type: "number",
                min: "0",
                placeholder: "Max price",
                value: "{price_max}",
                onchange: move |evt: Event<FormData>| filters.write().price_range.1 = parse_any(&evt.value()),
            }
        }
    }
}
