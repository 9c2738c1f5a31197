use std::future::Future;

use crate::models::{PhotoFile, PropertyDraft};
use crate::validation::{validate_draft, ValidationErrors};

/// Multipart field name every photo is appended under.
pub const PHOTOS_FIELD: &str = "photos";

/// Field carrying the submitting manager's identifier. Always the last part.
pub const ACTOR_FIELD: &str = "managerCognitoId";

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("No manager ID found")]
    MissingActor,
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error("failed to encode {field}: {source}")]
    Encode {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("create listing failed: {0}")]
    Rejected(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartValue {
    Text(String),
    File(PhotoFile),
}

/// One named part of the multipart create-listing payload.
#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: &'static str,
    pub value: PartValue,
}

impl FormPart {
    fn text(name: &'static str, value: impl ToString) -> Self {
        Self {
            name,
            value: PartValue::Text(value.to_string()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            PartValue::Text(s) => Some(s),
            PartValue::File(_) => None,
        }
    }
}

/// The external create-listing operation.
pub trait ListingSink {
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    fn create(
        &self,
        parts: Vec<FormPart>,
    ) -> impl Future<Output = Result<Self::Output, Self::Error>>;
}

/// Split a draft into multipart parts: scalar fields stringified in draft
/// order, then the two JSON-encoded code arrays, then photos, then the actor.
///
/// Fails with [`SubmitError::MissingActor`] when no actor is given.
pub fn build_submission(
    draft: &PropertyDraft,
    actor_id: Option<&str>,
) -> Result<Vec<FormPart>, SubmitError> {
    let actor_id = actor_id
        .filter(|id| !id.trim().is_empty())
        .ok_or(SubmitError::MissingActor)?;

    let mut parts = vec![
        FormPart::text("name", &draft.name),
        FormPart::text("description", &draft.description),
        FormPart::text("pricePerMonth", draft.price_per_month),
        FormPart::text("securityDeposit", draft.security_deposit),
        FormPart::text("applicationFee", draft.application_fee),
        FormPart::text("isPetsAllowed", draft.is_pets_allowed),
        FormPart::text("isParkingIncluded", draft.is_parking_included),
        FormPart::text("beds", draft.beds),
        FormPart::text("baths", draft.baths),
        FormPart::text("squaremeter", draft.squaremeter),
        FormPart::text("propertyType", draft.property_type.code()),
        FormPart::text("address", &draft.address),
        FormPart::text("city", &draft.city),
        FormPart::text("state", &draft.state),
        FormPart::text("country", &draft.country),
        FormPart::text("postalCode", &draft.postal_code),
    ];

    let amenities = serde_json::to_string(&draft.amenities).map_err(|source| {
        SubmitError::Encode {
            field: "amenities",
            source,
        }
    })?;
    let highlights = serde_json::to_string(&draft.highlights).map_err(|source| {
        SubmitError::Encode {
            field: "highlights",
            source,
        }
    })?;
    parts.push(FormPart::text("amenities", amenities));
    parts.push(FormPart::text("highlights", highlights));

    parts.extend(draft.photos.iter().cloned().map(|photo| FormPart {
        name: PHOTOS_FIELD,
        value: PartValue::File(photo),
    }));

    parts.push(FormPart::text(ACTOR_FIELD, actor_id));
    Ok(parts)
}

/// Validate, assemble and hand a draft to `sink`. Awaited once; no retry.
/// Every local failure is returned before `sink` is touched.
pub async fn submit_draft<S: ListingSink>(
    sink: &S,
    draft: &PropertyDraft,
    actor_id: Option<&str>,
) -> Result<S::Output, SubmitError> {
    validate_draft(draft)?;
    let parts = build_submission(draft, actor_id)?;
    tracing::info!(
        parts = parts.len(),
        photos = draft.photos.len(),
        "submitting new listing"
    );
    sink.create(parts)
        .await
        .map_err(|e| SubmitError::Rejected(Box::new(e)))
}
