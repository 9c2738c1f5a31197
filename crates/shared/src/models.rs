use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Catalogs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Rooms,
    Tinyhouse,
    Apartment,
    Villa,
    Townhouse,
    Cottage,
}

impl PropertyType {
    pub const ALL: [PropertyType; 6] = [
        PropertyType::Rooms,
        PropertyType::Tinyhouse,
        PropertyType::Apartment,
        PropertyType::Villa,
        PropertyType::Townhouse,
        PropertyType::Cottage,
    ];

    /// Wire code sent to the API (the variant name).
    pub fn code(self) -> &'static str {
        match self {
            PropertyType::Rooms => "Rooms",
            PropertyType::Tinyhouse => "Tinyhouse",
            PropertyType::Apartment => "Apartment",
            PropertyType::Villa => "Villa",
            PropertyType::Townhouse => "Townhouse",
            PropertyType::Cottage => "Cottage",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PropertyType::Tinyhouse => "Tiny House",
            other => other.code(),
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Amenity {
    WasherDryer,
    AirConditioning,
    Dishwasher,
    HighSpeedInternet,
    HardwoodFloors,
    WalkInClosets,
    Microwave,
    Refrigerator,
    Pool,
    Gym,
    Parking,
    PetsAllowed,
    WiFi,
}

impl Amenity {
    pub const ALL: [Amenity; 13] = [
        Amenity::WasherDryer,
        Amenity::AirConditioning,
        Amenity::Dishwasher,
        Amenity::HighSpeedInternet,
        Amenity::HardwoodFloors,
        Amenity::WalkInClosets,
        Amenity::Microwave,
        Amenity::Refrigerator,
        Amenity::Pool,
        Amenity::Gym,
        Amenity::Parking,
        Amenity::PetsAllowed,
        Amenity::WiFi,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Amenity::WasherDryer => "WasherDryer",
            Amenity::AirConditioning => "AirConditioning",
            Amenity::Dishwasher => "Dishwasher",
            Amenity::HighSpeedInternet => "HighSpeedInternet",
            Amenity::HardwoodFloors => "HardwoodFloors",
            Amenity::WalkInClosets => "WalkInClosets",
            Amenity::Microwave => "Microwave",
            Amenity::Refrigerator => "Refrigerator",
            Amenity::Pool => "Pool",
            Amenity::Gym => "Gym",
            Amenity::Parking => "Parking",
            Amenity::PetsAllowed => "PetsAllowed",
            Amenity::WiFi => "WiFi",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Amenity::WasherDryer => "Washer/Dryer",
            Amenity::AirConditioning => "Air Conditioning",
            Amenity::Dishwasher => "Dishwasher",
            Amenity::HighSpeedInternet => "High Speed Internet",
            Amenity::HardwoodFloors => "Hardwood Floors",
            Amenity::WalkInClosets => "Walk-in Closets",
            Amenity::Microwave => "Microwave",
            Amenity::Refrigerator => "Refrigerator",
            Amenity::Pool => "Pool",
            Amenity::Gym => "Gym",
            Amenity::Parking => "Parking",
            Amenity::PetsAllowed => "Pets Allowed",
            Amenity::WiFi => "WiFi",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Highlight {
    HighSpeedInternetAccess,
    WasherDryer,
    AirConditioning,
    Heating,
    SmokeFree,
    CableReady,
    SatelliteTV,
    DoubleVanities,
    TubShower,
    Intercom,
    SprinklerSystem,
    RecentlyRenovated,
    CloseToTransit,
    GreatView,
    QuietNeighborhood,
}

impl Highlight {
    pub const ALL: [Highlight; 15] = [
        Highlight::HighSpeedInternetAccess,
        Highlight::WasherDryer,
        Highlight::AirConditioning,
        Highlight::Heating,
        Highlight::SmokeFree,
        Highlight::CableReady,
        Highlight::SatelliteTV,
        Highlight::DoubleVanities,
        Highlight::TubShower,
        Highlight::Intercom,
        Highlight::SprinklerSystem,
        Highlight::RecentlyRenovated,
        Highlight::CloseToTransit,
        Highlight::GreatView,
        Highlight::QuietNeighborhood,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Highlight::HighSpeedInternetAccess => "HighSpeedInternetAccess",
            Highlight::WasherDryer => "WasherDryer",
            Highlight::AirConditioning => "AirConditioning",
            Highlight::Heating => "Heating",
            Highlight::SmokeFree => "SmokeFree",
            Highlight::CableReady => "CableReady",
            Highlight::SatelliteTV => "SatelliteTV",
            Highlight::DoubleVanities => "DoubleVanities",
            Highlight::TubShower => "TubShower",
            Highlight::Intercom => "Intercom",
            Highlight::SprinklerSystem => "SprinklerSystem",
            Highlight::RecentlyRenovated => "RecentlyRenovated",
            Highlight::CloseToTransit => "CloseToTransit",
            Highlight::GreatView => "GreatView",
            Highlight::QuietNeighborhood => "QuietNeighborhood",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Highlight::HighSpeedInternetAccess => "High Speed Internet Access",
            Highlight::WasherDryer => "Washer/Dryer",
            Highlight::AirConditioning => "Air Conditioning",
            Highlight::Heating => "Heating",
            Highlight::SmokeFree => "Smoke Free",
            Highlight::CableReady => "Cable Ready",
            Highlight::SatelliteTV => "Satellite TV",
            Highlight::DoubleVanities => "Double Vanities",
            Highlight::TubShower => "Tub/Shower",
            Highlight::Intercom => "Intercom",
            Highlight::SprinklerSystem => "Sprinkler System",
            Highlight::RecentlyRenovated => "Recently Renovated",
            Highlight::CloseToTransit => "Close to Transit",
            Highlight::GreatView => "Great View",
            Highlight::QuietNeighborhood => "Quiet Neighborhood",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.code() == code)
    }
}

/// A value/label pair offered by a select or multi-select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiSelectOption {
    pub value: String,
    pub label: String,
}

impl MultiSelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

pub fn property_type_options() -> Vec<MultiSelectOption> {
    PropertyType::ALL
        .iter()
        .map(|t| MultiSelectOption::new(t.code(), t.label()))
        .collect()
}

pub fn amenity_options() -> Vec<MultiSelectOption> {
    Amenity::ALL
        .iter()
        .map(|a| MultiSelectOption::new(a.code(), a.label()))
        .collect()
}

pub fn highlight_options() -> Vec<MultiSelectOption> {
    Highlight::ALL
        .iter()
        .map(|h| MultiSelectOption::new(h.code(), h.label()))
        .collect()
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// An image attached to a draft, already read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// In-progress form state for a new listing. Field order here is the order
/// scalar fields are written to the submission payload.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDraft {
    pub name: String,
    pub description: String,
    pub price_per_month: u32,
    pub security_deposit: u32,
    pub application_fee: u32,
    pub is_pets_allowed: bool,
    pub is_parking_included: bool,
    pub photos: Vec<PhotoFile>,
    pub amenities: Vec<Amenity>,
    pub highlights: Vec<Highlight>,
    pub beds: u32,
    pub baths: u32,
    pub squaremeter: u32,
    pub property_type: PropertyType,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

impl Default for PropertyDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price_per_month: 1000,
            security_deposit: 500,
            application_fee: 100,
            is_pets_allowed: true,
            is_parking_included: true,
            photos: Vec::new(),
            amenities: Vec::new(),
            highlights: Vec::new(),
            beds: 1,
            baths: 1,
            squaremeter: 100,
            property_type: PropertyType::Apartment,
            address: String::new(),
            city: String::new(),
            state: String::new(),
            country: String::new(),
            postal_code: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Listings (server supplied, read-only)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListing {
    pub id: i64,
    pub name: String,
    pub price_per_month: f64,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_coordinates")]
    pub coordinates: Option<Coordinates>,
}

/// Coordinate components as received. A component that is absent or not a
/// JSON number deserializes to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Coordinates {
    #[serde(default, deserialize_with = "lenient_number")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub latitude: Option<f64>,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

/// Anything other than a JSON object decodes to `None`.
fn lenient_coordinates<'de, D>(deserializer: D) -> Result<Option<Coordinates>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// Decode a listings response item by item. Items that do not fit
/// [`PropertyListing`] are logged and left out; the rest keep their order.
pub fn decode_listings(items: Vec<serde_json::Value>) -> Vec<PropertyListing> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(listing) => Some(listing),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping undecodable listing");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_defaults() {
        let draft = PropertyDraft::default();
        assert_eq!(draft.price_per_month, 1000);
        assert_eq!(draft.security_deposit, 500);
        assert_eq!(draft.application_fee, 100);
        assert!(draft.is_pets_allowed);
        assert!(draft.is_parking_included);
        assert_eq!(draft.beds, 1);
        assert_eq!(draft.baths, 1);
        assert_eq!(draft.squaremeter, 100);
        assert_eq!(draft.property_type, PropertyType::Apartment);
        assert!(draft.photos.is_empty());
    }

    #[test]
    fn test_listing_deserializes() {
        let json = r#"{"id":1,"name":"Flat","pricePerMonth":4000,"location":{"coordinates":{"longitude":-7.62,"latitude":33.57}}}"#;
        let listing: PropertyListing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.id, 1);
        assert_eq!(listing.price_per_month, 4000.0);
        let coords = listing.location.unwrap().coordinates.unwrap();
        assert_eq!(coords.longitude, Some(-7.62));
        assert_eq!(coords.latitude, Some(33.57));
    }

    #[test]
    fn test_listing_without_location_deserializes() {
        let json = r#"{"id":2,"name":"Loft","pricePerMonth":900}"#;
        let listing: PropertyListing = serde_json::from_str(json).unwrap();
        assert!(listing.location.is_none());
    }

    #[test]
    fn test_non_object_coordinates_become_none() {
        for raw in [r#""POINT(-7 33)""#, "[-7.62, 33.57]", "null", "5"] {
            let json = format!(r#"{{"id":3,"name":"Studio","pricePerMonth":700,"location":{{"coordinates":{raw}}}}}"#);
            let listing: PropertyListing = serde_json::from_str(&json).unwrap();
            assert!(listing.location.unwrap().coordinates.is_none(), "{raw}");
        }
    }

    #[test]
    fn test_decode_listings_skips_bad_items() {
        let items: Vec<serde_json::Value> = serde_json::from_str(
            r#"[
                {"id":1,"name":"Flat","pricePerMonth":4000},
                {"id":2,"name":"Broken","pricePerMonth":null},
                {"name":"No id","pricePerMonth":10},
                {"id":4,"name":"Loft","pricePerMonth":900}
            ]"#,
        )
        .unwrap();
        let ids: Vec<i64> = decode_listings(items).iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_non_numeric_coordinates_become_none() {
        let json = r#"{"longitude":"-7.62","latitude":null}"#;
        let coords: Coordinates = serde_json::from_str(json).unwrap();
        assert_eq!(coords.longitude, None);
        assert_eq!(coords.latitude, None);
    }

    #[test]
    fn test_missing_coordinate_component_is_none() {
        let coords: Coordinates = serde_json::from_str(r#"{"latitude":33.57}"#).unwrap();
        assert_eq!(coords.longitude, None);
        assert_eq!(coords.latitude, Some(33.57));
    }

    #[test]
    fn test_catalog_codes_round_trip() {
        for t in PropertyType::ALL {
            assert_eq!(PropertyType::from_code(t.code()), Some(t));
        }
        for a in Amenity::ALL {
            assert_eq!(Amenity::from_code(a.code()), Some(a));
        }
        for h in Highlight::ALL {
            assert_eq!(Highlight::from_code(h.code()), Some(h));
        }
        assert_eq!(Amenity::from_code("Sauna"), None);
    }

    #[test]
    fn test_amenity_serializes_as_code() {
        let json = serde_json::to_string(&vec![Amenity::Pool, Amenity::WiFi]).unwrap();
        assert_eq!(json, r#"["Pool","WiFi"]"#);
    }

    #[test]
    fn test_options_use_code_and_label() {
        let opts = amenity_options();
        assert_eq!(opts.len(), Amenity::ALL.len());
        assert_eq!(opts[0], MultiSelectOption::new("WasherDryer", "Washer/Dryer"));
        assert_eq!(property_type_options()[1].label, "Tiny House");
    }
}
