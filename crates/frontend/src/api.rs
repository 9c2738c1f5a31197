use estate_shared::filters::ListingFilters;
use estate_shared::models::{decode_listings, PropertyListing};
use estate_shared::submission::{FormPart, ListingSink, PartValue};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Origin of the page, used to reach the static host.
pub fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

pub fn properties_url(base: &str) -> String {
    format!("{}/properties", base.trim_end_matches('/'))
}

pub fn property_url(base: &str, id: i64) -> String {
    format!("{}/{}", properties_url(base), id)
}

pub(crate) async fn get_json<T: DeserializeOwned>(
    url: &str,
    query: &[(&'static str, String)],
) -> Result<T, ApiError> {
    let resp = reqwest::Client::new().get(url).query(query).send().await?;
    if !resp.status().is_success() {
        return Err(ApiError::Status(resp.status()));
    }
    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Run the listings query for the given filters.
pub async fn fetch_properties(
    base: &str,
    filters: &ListingFilters,
) -> Result<Vec<PropertyListing>, ApiError> {
    let items: Vec<serde_json::Value> = get_json(&properties_url(base), &filters.to_query()).await?;
    Ok(decode_listings(items))
}

pub async fn fetch_property(base: &str, id: i64) -> Result<PropertyListing, ApiError> {
    get_json(&property_url(base, id), &[]).await
}

fn to_multipart(parts: Vec<FormPart>) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for part in parts {
        form = match part.value {
            PartValue::Text(text) => form.text(part.name, text),
            PartValue::File(photo) => {
                let file = Part::bytes(photo.bytes)
                    .file_name(photo.name)
                    .mime_str(&photo.mime)?;
                form.part(part.name, file)
            }
        };
    }
    Ok(form)
}

/// The remote create-listing endpoint.
pub struct CreateListingEndpoint {
    base: String,
}

impl CreateListingEndpoint {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    async fn post(&self, parts: Vec<FormPart>) -> Result<(), ApiError> {
        let form = to_multipart(parts)?;
        let resp = reqwest::Client::new()
            .post(properties_url(&self.base))
            .multipart(form)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(())
    }
}

impl ListingSink for CreateListingEndpoint {
    type Output = ();
    type Error = ApiError;

    async fn create(&self, parts: Vec<FormPart>) -> Result<(), ApiError> {
        self.post(parts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::map_view::plan_markers;

    #[test]
    fn test_properties_url() {
        assert_eq!(
            properties_url("https://api.example.com"),
            "https://api.example.com/properties"
        );
        assert_eq!(
            properties_url("https://api.example.com/"),
            "https://api.example.com/properties"
        );
    }

    #[test]
    fn test_property_url() {
        assert_eq!(
            property_url("http://localhost:3001", 17),
            "http://localhost:3001/properties/17"
        );
    }

    #[test]
    fn test_listings_response_deserializes() {
        let json = r#"[
            {"id":1,"name":"Flat","pricePerMonth":4000,"location":{"address":"1 Rue A","city":"Casablanca","coordinates":{"longitude":-7.62,"latitude":33.57}}},
            {"id":2,"name":"Loft","pricePerMonth":2500.5,"location":{"coordinates":{"longitude":"bad","latitude":33.5}}}
        ]"#;
        let listings: Vec<PropertyListing> = serde_json::from_str(json).unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].name, "Flat");
        let loc = listings[0].location.as_ref().unwrap();
        assert_eq!(loc.city.as_deref(), Some("Casablanca"));
        let coords = listings[1].location.as_ref().unwrap().coordinates.unwrap();
        assert!(coords.longitude.is_none());
    }

    #[test]
    fn test_malformed_listing_does_not_sink_the_batch() {
        let json = r#"[
            {"id":1,"name":"Flat","pricePerMonth":4000,"location":{"coordinates":{"longitude":-7.62,"latitude":33.57}}},
            {"id":2,"name":"Shape","pricePerMonth":3000,"location":{"coordinates":"POINT(-7 33)"}},
            {"id":3,"name":"Priceless","pricePerMonth":null}
        ]"#;
        let items: Vec<serde_json::Value> = serde_json::from_str(json).unwrap();
        let listings = decode_listings(items);
        assert_eq!(listings.len(), 2);

        let markers = plan_markers(&listings);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].listing_id, 1);
    }

    #[test]
    fn test_decode_error_maps_to_api_error() {
        let err: ApiError = serde_json::from_str::<Vec<PropertyListing>>("{")
            .unwrap_err()
            .into();
        assert!(err.to_string().starts_with("unexpected response body"));
    }
}
