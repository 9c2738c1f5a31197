use std::collections::BTreeMap;

use crate::models::PropertyDraft;

/// Upper bound for bed and bath counts.
pub const MAX_ROOMS: u32 = 10;

/// Every failing field of a draft, keyed by the field's wire name.
#[derive(Debug, Clone, Default, PartialEq, thiserror::Error)]
#[error("{} invalid field(s)", .0.len())]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Inline message for a field, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }
}

fn required(errors: &mut ValidationErrors, field: &'static str, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, format!("{label} is required"));
    }
}

fn positive(errors: &mut ValidationErrors, field: &'static str, label: &str, value: u32) {
    if value == 0 {
        errors.add(field, format!("{label} must be greater than 0"));
    }
}

fn room_count(errors: &mut ValidationErrors, field: &'static str, label: &str, value: u32) {
    if !(1..=MAX_ROOMS).contains(&value) {
        errors.add(field, format!("{label} must be between 1 and {MAX_ROOMS}"));
    }
}

/// Validate a draft against the listing schema. Returns every failure at once.
pub fn validate_draft(draft: &PropertyDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    required(&mut errors, "name", "Name", &draft.name);
    required(&mut errors, "description", "Description", &draft.description);

    positive(&mut errors, "pricePerMonth", "Price per month", draft.price_per_month);
    positive(&mut errors, "securityDeposit", "Security deposit", draft.security_deposit);
    positive(&mut errors, "applicationFee", "Application fee", draft.application_fee);

    room_count(&mut errors, "beds", "Beds", draft.beds);
    room_count(&mut errors, "baths", "Baths", draft.baths);
    positive(&mut errors, "squaremeter", "Square meter", draft.squaremeter);

    if draft.photos.is_empty() {
        errors.add("photoUrls", "At least one photo is required");
    } else if let Some(bad) = draft.photos.iter().find(|p| !p.mime.starts_with("image/")) {
        errors.add("photoUrls", format!("{} is not an image", bad.name));
    }

    required(&mut errors, "address", "Address", &draft.address);
    required(&mut errors, "city", "City", &draft.city);
    required(&mut errors, "state", "State", &draft.state);
    required(&mut errors, "country", "Country", &draft.country);
    required(&mut errors, "postalCode", "Postal code", &draft.postal_code);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PhotoFile;

    fn valid_draft() -> PropertyDraft {
        PropertyDraft {
            name: "Sunny flat".to_string(),
            description: "Two rooms near the port".to_string(),
            photos: vec![PhotoFile {
                name: "front.jpg".to_string(),
                mime: "image/jpeg".to_string(),
                bytes: vec![0xff, 0xd8],
            }],
            address: "12 Rue Tarik".to_string(),
            city: "Casablanca".to_string(),
            state: "Casablanca-Settat".to_string(),
            country: "Morocco".to_string(),
            postal_code: "20250".to_string(),
            ..PropertyDraft::default()
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate_draft(&valid_draft()).is_ok());
    }

    #[test]
    fn test_default_draft_reports_every_missing_field() {
        let errors = validate_draft(&PropertyDraft::default()).unwrap_err();
        let fields: Vec<_> = errors.fields().collect();
        for f in [
            "name",
            "description",
            "photoUrls",
            "address",
            "city",
            "state",
            "country",
            "postalCode",
        ] {
            assert!(fields.contains(&f), "missing error for {f}");
        }
        // Numeric defaults are valid.
        assert!(errors.get("pricePerMonth").is_none());
        assert!(errors.get("beds").is_none());
    }

    #[test]
    fn test_blank_name_is_required() {
        let mut draft = valid_draft();
        draft.name = "   ".to_string();
        let errors = validate_draft(&draft).unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_zero_price_rejected() {
        let mut draft = valid_draft();
        draft.price_per_month = 0;
        let errors = validate_draft(&draft).unwrap_err();
        assert!(errors.get("pricePerMonth").is_some());
    }

    #[test]
    fn test_room_counts_bounded() {
        let mut draft = valid_draft();
        draft.beds = 11;
        draft.baths = 0;
        let errors = validate_draft(&draft).unwrap_err();
        assert_eq!(errors.get("beds"), Some("Beds must be between 1 and 10"));
        assert!(errors.get("baths").is_some());
    }

    #[test]
    fn test_non_image_photo_rejected() {
        let mut draft = valid_draft();
        draft.photos.push(PhotoFile {
            name: "lease.pdf".to_string(),
            mime: "application/pdf".to_string(),
            bytes: vec![],
        });
        let errors = validate_draft(&draft).unwrap_err();
        assert_eq!(errors.get("photoUrls"), Some("lease.pdf is not an image"));
    }

    #[test]
    fn test_empty_amenities_allowed() {
        let draft = valid_draft();
        assert!(draft.amenities.is_empty());
        assert!(validate_draft(&draft).is_ok());
    }
}
