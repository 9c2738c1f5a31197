use crate::models::{Amenity, PropertyType};

/// Search filters shared between the filter bar and the map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListingFilters {
    pub location: String,
    /// `None` means "any".
    pub beds: Option<u32>,
    pub baths: Option<u32>,
    pub property_type: Option<PropertyType>,
    pub amenities: Vec<Amenity>,
    pub price_range: (Option<u32>, Option<u32>),
    pub squaremeter_range: (Option<u32>, Option<u32>),
    /// `[longitude, latitude]` when the search is anchored to a point.
    pub coordinates: Option<Vec<f64>>,
}

impl ListingFilters {
    /// Encode as listings-query parameters, omitting unset values.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        let location = self.location.trim();
        if !location.is_empty() {
            params.push(("location", location.to_string()));
        }
        if let Some(min) = self.price_range.0 {
            params.push(("priceMin", min.to_string()));
        }
        if let Some(max) = self.price_range.1 {
            params.push(("priceMax", max.to_string()));
        }
        if let Some(beds) = self.beds {
            params.push(("beds", beds.to_string()));
        }
        if let Some(baths) = self.baths {
            params.push(("baths", baths.to_string()));
        }
        if let Some(t) = self.property_type {
            params.push(("propertyType", t.code().to_string()));
        }
        if let Some(min) = self.squaremeter_range.0 {
            params.push(("squareMeterMin", min.to_string()));
        }
        if let Some(max) = self.squaremeter_range.1 {
            params.push(("squareMeterMax", max.to_string()));
        }
        if !self.amenities.is_empty() {
            let joined = self
                .amenities
                .iter()
                .map(|a| a.code())
                .collect::<Vec<_>>()
                .join(",");
            params.push(("amenities", joined));
        }
        if let Some([lng, lat]) = self.coordinates.as_deref() {
            params.push(("latitude", lat.to_string()));
            params.push(("longitude", lng.to_string()));
        }

        params
    }
}

/// Parse a filter-bar select value where "any" (or empty) means unset.
pub fn parse_any<T: std::str::FromStr>(raw: &str) -> Option<T> {
    match raw.trim() {
        "" | "any" => None,
        v => v.parse().ok(),
    }
}
