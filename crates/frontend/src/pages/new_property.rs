use dioxus::prelude::*;
use estate_shared::models::{
    amenity_options, highlight_options, property_type_options, Amenity, Highlight, PropertyDraft,
    PropertyType,
};
use estate_shared::submission::{submit_draft, SubmitError};
use estate_shared::validation::{validate_draft, ValidationErrors};

use crate::api::CreateListingEndpoint;
use crate::auth;
use crate::components::form_field::{
    FileField, MultiSelectField, NumberField, SelectField, SwitchField, TextField,
};
use crate::components::header::Header;
use crate::config::AppConfig;

#[derive(Debug, Clone, PartialEq)]
enum SubmitStatus {
    Idle,
    Submitting,
    Created,
    Failed(String),
}

fn codes<T: Copy>(items: &[T], code: fn(T) -> &'static str) -> Vec<String> {
    items.iter().map(|i| code(*i).to_string()).collect()
}

fn parse_codes<T>(values: &[String], parse: fn(&str) -> Option<T>) -> Vec<T> {
    values.iter().filter_map(|v| parse(v)).collect()
}

#[component]
pub fn NewProperty() -> Element {
    let config = use_context::<Signal<Option<AppConfig>>>();
    let mut draft = use_signal(PropertyDraft::default);
    let mut errors = use_signal(ValidationErrors::default);
    let mut status = use_signal(|| SubmitStatus::Idle);

    let err = move |field: &str| errors.read().get(field).map(str::to_string);

    let on_submit = move |evt: Event<FormData>| {
        evt.prevent_default();
        let current = draft.read().clone();
        if let Err(e) = validate_draft(&current) {
            errors.set(e);
            return;
        }
        errors.set(ValidationErrors::default());

        let Some(base) = config.read().as_ref().map(|c| c.api_base_url.clone()) else {
            status.set(SubmitStatus::Failed("Configuration not loaded yet".to_string()));
            return;
        };
        status.set(SubmitStatus::Submitting);
        spawn(async move {
            let endpoint = CreateListingEndpoint::new(base);
            let actor = auth::current_actor_id();
            match submit_draft(&endpoint, &current, actor.as_deref()).await {
                Ok(()) => {
                    draft.set(PropertyDraft::default());
                    status.set(SubmitStatus::Created);
                }
                Err(SubmitError::Invalid(e)) => {
                    errors.set(e);
                    status.set(SubmitStatus::Idle);
                }
                Err(e) => {
                    tracing::error!(error = %e, "create listing failed");
                    status.set(SubmitStatus::Failed(e.to_string()));
                }
            }
        });
    };

    let d = draft.read().clone();
    let submitting = *status.read() == SubmitStatus::Submitting;
    let photo_names: Vec<String> = d.photos.iter().map(|p| p.name.clone()).collect();

    rsx! {
        div { class: "dashboard-container",
            Header {
                title: "Add New Property",
                subtitle: "Create a new property listing with detailed information",
            }
            div { class: "form-card",
                form { class: "property-form", onsubmit: on_submit,
                    // Basic Information
                    section {
                        h2 { "Basic Information" }
                        TextField {
                            name: "name",
                            label: "Property Name",
                            value: d.name.clone(),
                            error: err("name"),
                            on_input: move |v| draft.write().name = v,
                        }
                        TextField {
                            name: "description",
                            label: "Description",
                            multiline: true,
                            value: d.description.clone(),
                            error: err("description"),
                            on_input: move |v| draft.write().description = v,
                        }
                    }
                    hr {}

                    // Fees
                    section {
                        h2 { "Fees" }
                        NumberField {
                            name: "pricePerMonth",
                            label: "Price per Month",
                            value: d.price_per_month,
                            error: err("pricePerMonth"),
                            on_input: move |v| draft.write().price_per_month = v,
                        }
                        div { class: "grid-2",
                            NumberField {
                                name: "securityDeposit",
                                label: "Security Deposit",
                                value: d.security_deposit,
                                error: err("securityDeposit"),
                                on_input: move |v| draft.write().security_deposit = v,
                            }
                            NumberField {
                                name: "applicationFee",
                                label: "Application Fee",
                                value: d.application_fee,
                                error: err("applicationFee"),
                                on_input: move |v| draft.write().application_fee = v,
                            }
                        }
                    }
                    hr {}

                    // Property Details
                    section {
                        h2 { "Property Details" }
                        div { class: "grid-3",
                            NumberField {
                                name: "beds",
                                label: "Number of Beds",
                                value: d.beds,
                                error: err("beds"),
                                on_input: move |v| draft.write().beds = v,
                            }
                            NumberField {
                                name: "baths",
                                label: "Number of Baths",
                                value: d.baths,
                                error: err("baths"),
                                on_input: move |v| draft.write().baths = v,
                            }
                            NumberField {
                                name: "squaremeter",
                                label: "Square Meter",
                                value: d.squaremeter,
                                error: err("squaremeter"),
                                on_input: move |v| draft.write().squaremeter = v,
                            }
                        }
                        div { class: "grid-2",
                            SwitchField {
                                name: "isPetsAllowed",
                                label: "Pets Allowed",
                                checked: d.is_pets_allowed,
                                on_toggle: move |v| draft.write().is_pets_allowed = v,
                            }
                            SwitchField {
                                name: "isParkingIncluded",
                                label: "Parking Included",
                                checked: d.is_parking_included,
                                on_toggle: move |v| draft.write().is_parking_included = v,
                            }
                        }
                        SelectField {
                            name: "propertyType",
                            label: "Property Type",
                            options: property_type_options(),
                            value: d.property_type.code().to_string(),
                            error: err("propertyType"),
                            on_change: move |v: String| {
                                if let Some(t) = PropertyType::from_code(&v) {
                                    draft.write().property_type = t;
                                }
                            },
                        }
                    }
                    hr {}

                    // Amenities and Highlights
                    section {
                        h2 { "Amenities and Highlights" }
                        MultiSelectField {
                            name: "amenities",
                            label: "Amenities",
                            options: amenity_options(),
                            value: codes(&d.amenities, Amenity::code),
                            error: err("amenities"),
                            on_change: move |v: Vec<String>| {
                                draft.write().amenities = parse_codes(&v, Amenity::from_code);
                            },
                        }
                        MultiSelectField {
                            name: "highlights",
                            label: "Highlights",
                            options: highlight_options(),
                            value: codes(&d.highlights, Highlight::code),
                            error: err("highlights"),
                            on_change: move |v: Vec<String>| {
                                draft.write().highlights = parse_codes(&v, Highlight::from_code);
                            },
                        }
                    }
                    hr {}

                    // Photos
                    section {
                        h2 { "Photos" }
                        FileField {
                            name: "photoUrls",
                            label: "Property Photos",
                            accept: "image/*",
                            files: photo_names,
                            error: err("photoUrls"),
                            on_files: move |photos| draft.write().photos = photos,
                        }
                    }
                    hr {}

                    // Additional Information
                    section {
                        h2 { "Additional Information" }
                        TextField {
                            name: "address",
                            label: "Address",
                            value: d.address.clone(),
                            error: err("address"),
                            on_input: move |v| draft.write().address = v,
                        }
                        div { class: "row",
                            TextField {
                                name: "city",
                                label: "City",
                                class: "w-full",
                                value: d.city.clone(),
                                error: err("city"),
                                on_input: move |v| draft.write().city = v,
                            }
                            TextField {
                                name: "state",
                                label: "State",
                                class: "w-full",
                                value: d.state.clone(),
                                error: err("state"),
                                on_input: move |v| draft.write().state = v,
                            }
                            TextField {
                                name: "postalCode",
                                label: "Postal Code",
                                class: "w-full",
                                value: d.postal_code.clone(),
                                error: err("postalCode"),
                                on_input: move |v| draft.write().postal_code = v,
                            }
                        }
                        TextField {
                            name: "country",
                            label: "Country",
                            value: d.country.clone(),
                            error: err("country"),
                            on_input: move |v| draft.write().country = v,
                        }
                    }

                    match &*status.read() {
                        SubmitStatus::Created => rsx! { p { class: "form-success", "Property created." } },
                        SubmitStatus::Failed(message) => rsx! { p { class: "form-error", "{message}" } },
                        _ => rsx! {},
                    }

                    button {
                        r#type: "submit",
                        class: "primary full-width",
                        disabled: submitting,
                        if submitting { "Creating..." } else { "Create Property" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_parse_codes_agree() {
        let amenities = vec![Amenity::Pool, Amenity::WiFi];
        let strings = codes(&amenities, Amenity::code);
        assert_eq!(strings, vec!["Pool".to_string(), "WiFi".to_string()]);
        assert_eq!(parse_codes(&strings, Amenity::from_code), amenities);
    }

    #[test]
    fn test_parse_codes_drops_unknown() {
        let values = vec!["GreatView".to_string(), "Moat".to_string()];
        assert_eq!(parse_codes(&values, Highlight::from_code), vec![Highlight::GreatView]);
    }
}
