use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use estate_shared::filters::ListingFilters;
use estate_shared::format::format_price;
use estate_shared::geo::{listing_position, resolve_center, LngLat};
use estate_shared::models::PropertyListing;
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use maud::html;
use wasm_bindgen::closure::Closure;

use crate::api::{self, ApiError};
use crate::config::AppConfig;
use crate::mapbox;

const MAP_CONTAINER_ID: &str = "listings-map-container";

const INITIAL_ZOOM: f64 = 10.0;

/// Delay before resizing the map once its container has settled.
const RESIZE_DELAY_MS: u32 = 1000;

/// Poll interval while waiting for the SDK script.
const SDK_POLL_MS: u32 = 100;

/// Default pin fill, replaced by `MARKER_FILL`.
const DEFAULT_MARKER_FILL: &str = "#3FB1CE";
const MARKER_FILL: &str = "#000000";

// ---------------------------------------------------------------------------
// Planning (pure)
// ---------------------------------------------------------------------------

/// Listing query as seen by the map.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingsState {
    Loading,
    Error,
    Ready(Vec<PropertyListing>),
}

impl ListingsState {
    pub fn from_resource(value: Option<&Result<Vec<PropertyListing>, ApiError>>) -> Self {
        match value {
            None => ListingsState::Loading,
            Some(Err(_)) => ListingsState::Error,
            Some(Ok(listings)) => ListingsState::Ready(listings.clone()),
        }
    }
}

/// One marker to place: where, and the popup markup.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub listing_id: i64,
    pub position: LngLat,
    pub popup_html: String,
}

/// What the map effect should do for the current inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum MapPlan {
    /// Nothing to build: still loading, failed, or no usable data.
    Skip(&'static str),
    Build {
        center: LngLat,
        markers: Vec<MarkerSpec>,
    },
}

pub fn popup_html(listing: &PropertyListing) -> String {
    html! {
        div class="marker-popup" {
            a class="marker-popup-title" href=(format!("/search/{}", listing.id)) target="_blank" {
                (listing.name)
            }
            p class="marker-popup-price" {
                (format_price(listing.price_per_month)) " "
                span class="marker-popup-price-unit" { "/ month" }
            }
        }
    }
    .into_string()
}

/// Markers for every listing with usable coordinates. Listings without are
/// skipped one by one and logged.
pub fn plan_markers(listings: &[PropertyListing]) -> Vec<MarkerSpec> {
    listings
        .iter()
        .filter_map(|listing| match listing_position(listing) {
            Some(position) => Some(MarkerSpec {
                listing_id: listing.id,
                position,
                popup_html: popup_html(listing),
            }),
            None => {
                let coords = listing.location.as_ref().and_then(|l| l.coordinates);
                tracing::warn!(
                    listing = listing.id,
                    ?coords,
                    "skipping listing with invalid coordinates"
                );
                None
            }
        })
        .collect()
}

pub fn plan_map(state: &ListingsState, filter_coords: Option<&[f64]>) -> MapPlan {
    let listings = match state {
        ListingsState::Loading => return MapPlan::Skip("still loading properties"),
        ListingsState::Error => return MapPlan::Skip("error loading properties"),
        ListingsState::Ready(listings) if listings.is_empty() => {
            return MapPlan::Skip("no properties found")
        }
        ListingsState::Ready(listings) => listings,
    };
    match resolve_center(filter_coords, listings) {
        Some(center) => MapPlan::Build {
            center,
            markers: plan_markers(listings),
        },
        None => MapPlan::Skip("no usable center coordinate"),
    }
}

// ---------------------------------------------------------------------------
// Widget lifecycle
// ---------------------------------------------------------------------------

/// A live map widget. Dropping it removes the map and cancels the pending
/// resize.
struct MapHandle {
    map: mapbox::Map,
    _on_load: Closure<dyn FnMut()>,
    _resize: Timeout,
}

impl MapHandle {
    fn mount(config: &AppConfig, center: LngLat, markers: Vec<MarkerSpec>) -> Result<Self, String> {
        let options = mapbox::map_options(
            MAP_CONTAINER_ID,
            &config.style_url(),
            &config.mapbox_access_token,
            center,
            INITIAL_ZOOM,
        );
        let map = mapbox::Map::new(&options).map_err(|e| format!("{e:?}"))?;

        let on_load = {
            let map = map.clone();
            Closure::<dyn FnMut()>::new(move || {
                tracing::debug!(markers = markers.len(), "map loaded");
                for pin in &markers {
                    place_marker(&map, pin);
                }
            })
        };
        map.on("load", &on_load);

        let resize = {
            let map = map.clone();
            Timeout::new(RESIZE_DELAY_MS, move || {
                tracing::debug!("resizing map");
                map.resize();
            })
        };

        Ok(MapHandle {
            map,
            _on_load: on_load,
            _resize: resize,
        })
    }
}

impl Drop for MapHandle {
    fn drop(&mut self) {
        tracing::debug!("cleaning up map");
        self.map.remove();
    }
}

fn place_marker(map: &mapbox::Map, pin: &MarkerSpec) {
    let popup = mapbox::Popup::new().set_html(&pin.popup_html);
    let marker = mapbox::Marker::new()
        .set_lng_lat(&mapbox::lng_lat(pin.position))
        .set_popup(&popup)
        .add_to(map);

    let selector = format!("path[fill='{DEFAULT_MARKER_FILL}']");
    if let Some(path) = marker
        .get_element()
        .and_then(|el| el.query_selector(&selector).ok().flatten())
    {
        let _ = path.set_attribute("fill", MARKER_FILL);
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

#[component]
pub fn MapView() -> Element {
    let filters = use_context::<Signal<ListingFilters>>();
    let config = use_context::<Signal<Option<AppConfig>>>();

    let properties = use_resource(move || {
        let f = filters.read().clone();
        let base = config.read().as_ref().map(|c| c.api_base_url.clone());
        async move {
            match base {
                Some(base) => Some(api::fetch_properties(&base, &f).await),
                None => None,
            }
        }
    });

    // Only re-run the map effect when the anchor itself changes.
    let filter_coords = use_memo(move || filters.read().coordinates.clone());

    let mut sdk_ready = use_signal(mapbox::sdk_loaded);
    use_future(move || async move {
        while !mapbox::sdk_loaded() {
            TimeoutFuture::new(SDK_POLL_MS).await;
        }
        if !*sdk_ready.peek() {
            sdk_ready.set(true);
        }
    });

    let widget = use_hook(|| Rc::new(RefCell::new(None::<MapHandle>)));

    use_drop({
        let widget = widget.clone();
        move || {
            widget.borrow_mut().take();
        }
    });

    use_effect({
        let widget = widget.clone();
        move || {
            let state = ListingsState::from_resource(properties.read().as_ref().and_then(|r| r.as_ref()));
            let coords = filter_coords.read().clone();
            let cfg = config.read().clone();
            let ready = *sdk_ready.read();
            tracing::debug!(?coords, "map effect triggered");

            // Full rebuild on every change.
            widget.borrow_mut().take();

            let (center, markers) = match plan_map(&state, coords.as_deref()) {
                MapPlan::Skip(reason) => {
                    tracing::info!(reason, "map not built");
                    return;
                }
                MapPlan::Build { center, markers } => (center, markers),
            };
            let (Some(cfg), true) = (cfg, ready) else {
                tracing::debug!("waiting for map configuration");
                return;
            };
            tracing::info!(lng = center.lng, lat = center.lat, markers = markers.len(), "map center");

            match MapHandle::mount(&cfg, center, markers) {
                Ok(handle) => *widget.borrow_mut() = Some(handle),
                Err(e) => tracing::error!(error = %e, "failed to create map"),
            }
        }
    });

    let x = match ListingsState::from_resource(properties.read().as_ref().and_then(|r| r.as_ref())) {
        ListingsState::Loading => rsx! { "Loading map..." },
        ListingsState::Error => rsx! {
            div { class: "map-error", "Failed to load properties on map" }
        },
        ListingsState::Ready(_) => rsx! {
            div { class: "map-panel",
                div { id: MAP_CONTAINER_ID, class: "map-container" }
            }
        },
    };
    x
}
