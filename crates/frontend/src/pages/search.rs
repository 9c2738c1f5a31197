use dioxus::prelude::*;
use estate_shared::filters::ListingFilters;

use crate::components::filters_bar::FiltersBar;
use crate::components::map_view::MapView;

/// Search view. An `anchor` from the route pins the map center through the
/// shared filters; without one the filters keep whatever they hold.
#[component]
pub fn SearchPage(anchor: Option<(f64, f64)>) -> Element {
    let mut filters = use_context::<Signal<ListingFilters>>();

    use_effect(use_reactive!(|anchor| {
        if let Some((lng, lat)) = anchor {
            let coords = vec![lng, lat];
            if filters.peek().coordinates.as_ref() != Some(&coords) {
                filters.write().coordinates = Some(coords);
            }
        }
    }));

    rsx! {
        div { class: "search-page",
            FiltersBar {}
            div { class: "search-content",
                MapView {}
            }
        }
    }
}
