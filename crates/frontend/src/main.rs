mod api;
mod auth;
mod components;
mod config;
mod mapbox;
mod pages;

use dioxus::prelude::*;
use estate_shared::filters::ListingFilters;

use crate::config::AppConfig;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[layout(Shell)]
    #[route("/")]
    Home {},
    #[route("/search")]
    Search {},
    #[route("/search/:id")]
    ListingDetail { id: i64 },
    #[route("/search/:lng/:lat")]
    SearchAt { lng: f64, lat: f64 },
    #[route("/managers/newproperty")]
    NewProperty {},
}

#[component]
fn Shell() -> Element {
    rsx! {
        nav { class: "top-nav",
            Link { to: Route::Home {}, class: "brand", "Estate" }
            div { class: "nav-links",
                Link { to: Route::Search {}, "Search" }
                Link { to: Route::NewProperty {}, "Add Property" }
            }
        }
        main { class: "page", Outlet::<Route> {} }
    }
}

#[component]
fn Home() -> Element {
    rsx! {
        pages::search::SearchPage { anchor: None }
    }
}

#[component]
fn Search() -> Element {
    rsx! {
        pages::search::SearchPage { anchor: None }
    }
}

#[component]
fn SearchAt(lng: f64, lat: f64) -> Element {
    rsx! {
        pages::search::SearchPage { anchor: Some((lng, lat)) }
    }
}

#[component]
fn ListingDetail(id: i64) -> Element {
    rsx! {
        pages::listing_detail::ListingDetail { id }
    }
}

#[component]
fn NewProperty() -> Element {
    rsx! {
        pages::new_property::NewProperty {}
    }
}

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    let mut app_config = use_context_provider(|| Signal::new(None::<AppConfig>));
    use_context_provider(|| Signal::new(ListingFilters::default()));

    use_future(move || async move {
        let loaded = match config::load().await {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::error!(error = %e, "failed to load app config, using defaults");
                AppConfig::default()
            }
        };
        tracing::info!(api = %loaded.api_base_url, "app config ready");
        app_config.set(Some(loaded));
    });

    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: mapbox::STYLESHEET_URL }
        document::Stylesheet { href: CSS }
        document::Script { src: mapbox::SCRIPT_URL }
        Router::<Route> {}
    }
}

fn main() {
    dioxus::logger::init(dioxus::logger::tracing::Level::INFO).ok();
    launch(App);
}
