//! Minimal bindings to the Mapbox GL JS global (`mapboxgl`), loaded from the
//! CDN script tag in `App`.

use estate_shared::geo::LngLat;
use wasm_bindgen::prelude::*;

pub const SCRIPT_URL: &str = "https://api.mapbox.com/mapbox-gl-js/v2.15.0/mapbox-gl.js";
pub const STYLESHEET_URL: &str = "https://api.mapbox.com/mapbox-gl-js/v2.15.0/mapbox-gl.css";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = mapboxgl)]
    #[derive(Debug, Clone)]
    pub type Map;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, catch)]
    pub fn new(options: &js_sys::Object) -> Result<Map, JsValue>;

    #[wasm_bindgen(method)]
    pub fn on(this: &Map, event: &str, handler: &Closure<dyn FnMut()>);

    #[wasm_bindgen(method)]
    pub fn resize(this: &Map);

    #[wasm_bindgen(method)]
    pub fn remove(this: &Map);

    #[wasm_bindgen(js_namespace = mapboxgl)]
    #[derive(Debug, Clone)]
    pub type Marker;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl)]
    pub fn new() -> Marker;

    #[wasm_bindgen(method, js_name = setLngLat)]
    pub fn set_lng_lat(this: &Marker, lng_lat: &js_sys::Array) -> Marker;

    #[wasm_bindgen(method, js_name = setPopup)]
    pub fn set_popup(this: &Marker, popup: &Popup) -> Marker;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Marker, map: &Map) -> Marker;

    #[wasm_bindgen(method, js_name = getElement)]
    pub fn get_element(this: &Marker) -> Option<web_sys::HtmlElement>;

    #[wasm_bindgen(js_namespace = mapboxgl)]
    #[derive(Debug, Clone)]
    pub type Popup;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl)]
    pub fn new() -> Popup;

    #[wasm_bindgen(method, js_name = setHTML)]
    pub fn set_html(this: &Popup, html: &str) -> Popup;
}

/// Whether the SDK script has finished loading.
pub fn sdk_loaded() -> bool {
    web_sys::window()
        .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("mapboxgl")).unwrap_or(false))
        .unwrap_or(false)
}

pub fn lng_lat(pos: LngLat) -> js_sys::Array {
    let arr = js_sys::Array::new();
    arr.push(&JsValue::from_f64(pos.lng));
    arr.push(&JsValue::from_f64(pos.lat));
    arr
}

/// Constructor options for [`Map::new`].
pub fn map_options(
    container_id: &str,
    style_url: &str,
    access_token: &str,
    center: LngLat,
    zoom: f64,
) -> js_sys::Object {
    let o = js_sys::Object::new();
    let set = |key: &str, value: &JsValue| {
        let _ = js_sys::Reflect::set(&o, &JsValue::from_str(key), value);
    };
    set("container", &JsValue::from_str(container_id));
    set("style", &JsValue::from_str(style_url));
    set("center", &lng_lat(center));
    set("zoom", &JsValue::from_f64(zoom));
    if !access_token.is_empty() {
        set("accessToken", &JsValue::from_str(access_token));
    }
    o
}
