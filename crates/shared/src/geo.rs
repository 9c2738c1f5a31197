use crate::models::PropertyListing;

/// A longitude/latitude pair, in that order (the map widget's convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

/// The marker position of a listing, or `None` when either component is
/// missing, non-numeric or not finite.
pub fn listing_position(listing: &PropertyListing) -> Option<LngLat> {
    let coords = listing.location.as_ref()?.coordinates?;
    let lng = coords.longitude.filter(|v| v.is_finite())?;
    let lat = coords.latitude.filter(|v| v.is_finite())?;
    Some(LngLat::new(lng, lat))
}

/// Pick the map center: the filter pair when it holds exactly two finite
/// values, otherwise the first listing's coordinates.
///
/// The first listing is used as-is: when its coordinates are unusable there
/// is no center and the caller skips building the map.
pub fn resolve_center(filter_coords: Option<&[f64]>, listings: &[PropertyListing]) -> Option<LngLat> {
    match filter_coords {
        Some(&[lng, lat]) if lng.is_finite() && lat.is_finite() => {
            return Some(LngLat::new(lng, lat));
        }
        Some(&[lng, lat]) => tracing::warn!(lng, lat, "ignoring non-finite filter center"),
        _ => {}
    }
    listings.first().and_then(listing_position)
}
