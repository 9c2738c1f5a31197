use dioxus::prelude::*;
use estate_shared::format::format_price;
use estate_shared::models::PropertyListing;

use crate::api;
use crate::config::AppConfig;

fn location_line(listing: &PropertyListing) -> Option<String> {
    let loc = listing.location.as_ref()?;
    let parts: Vec<&str> = [&loc.address, &loc.city, &loc.country]
        .into_iter()
        .filter_map(|s| s.as_deref())
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

#[component]
pub fn ListingDetail(id: i64) -> Element {
    let config = use_context::<Signal<Option<AppConfig>>>();

    let listing = use_resource(use_reactive!(|id| async move {
        let base = config.read().as_ref().map(|c| c.api_base_url.clone());
        match base {
            Some(base) => api::fetch_property(&base, id).await.map(Some),
            None => Ok(None),
        }
    }));

    let x = match &*listing.read() {
        None | Some(Ok(None)) => rsx! { div { class: "loading", "Loading..." } },
        Some(Err(e)) => {
            tracing::warn!(listing = id, error = %e, "failed to load listing");
            rsx! { div { class: "load-error", "Failed to load property" } }
        }
        Some(Ok(Some(listing))) => {
            let price = format_price(listing.price_per_month);
            let place = location_line(listing);
            rsx! {
                div { class: "listing-detail",
                    h1 { "{listing.name}" }
                    p { class: "listing-price",
                        "{price}"
                        span { class: "per-month", " / month" }
                    }
                    if let Some(place) = place {
                        p { class: "listing-location", "{place}" }
                    }
                    if let Some(description) = &listing.description {
                        p { class: "listing-description", "{description}" }
                    }
                    Link { to: crate::Route::Search {}, "Back to search" }
                }
            }
        }
    };
    x
}
