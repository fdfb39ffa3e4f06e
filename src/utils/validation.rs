use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;

use crate::models::{
    ApiError, Contact, ContactMethod, Florist, FloristRef, FloristRefRequest, FloristRequest,
    Listing, ListingRequest, ValidationErrors, ViolationKind,
};

pub const IMAGE_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];
pub const MIN_USERNAME_LEN: usize = 8;
pub const MIN_CONTACT_NUMBER_LEN: usize = 8;

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

fn clean_tags(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Check a listing body and build the document to persist.
///
/// Every rule runs; the error carries all failures at once. `date_listed`
/// defaults to `now` when the client omits it.
pub fn validate_listing(request: &ListingRequest, now: DateTime<Utc>) -> Result<Listing, ApiError> {
    let mut errors = ValidationErrors::default();

    let name = non_blank(request.name.as_deref());
    if name.is_none() {
        errors.push("name", "Name", ViolationKind::Required);
    }

    let flower_type = clean_tags(&request.flower_type);
    if flower_type.is_empty() {
        errors.push("flower_type", "Flower type", ViolationKind::Required);
    }

    let price = match &request.price {
        None => {
            errors.push("price", "Price", ViolationKind::Required);
            None
        }
        Some(raw) => match raw.as_f64() {
            Some(p) if p > 0.0 => Some(p),
            _ => {
                errors.push("price", "Price", ViolationKind::NotPositiveNumber);
                None
            }
        },
    };

    let quantity = match &request.quantity {
        None => {
            errors.push("quantity", "Quantity", ViolationKind::Required);
            None
        }
        Some(raw) => match raw.as_i64() {
            Some(q) if q > 0 => Some(q),
            _ => {
                errors.push("quantity", "Quantity", ViolationKind::NotPositiveInteger);
                None
            }
        },
    };

    let occasion = clean_tags(&request.occasion);
    if occasion.is_empty() {
        errors.push("occasion", "Occasion", ViolationKind::Required);
    }

    let image = match non_blank(request.image.as_deref()) {
        None => {
            errors.push("image", "Image", ViolationKind::Required);
            None
        }
        Some(url) => {
            let lower = url.to_lowercase();
            if IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
                Some(url)
            } else {
                errors.push("image", "Image", ViolationKind::InvalidImageExtension);
                None
            }
        }
    };

    let date_listed = match non_blank(request.date_listed.as_deref()) {
        None => Some(now),
        Some(raw) => match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(date) => date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()),
            Err(_) => {
                errors.push("date_listed", "Date listed", ViolationKind::InvalidDate);
                None
            }
        },
    };

    let florist = request
        .florist
        .as_ref()
        .map(|f| validate_florist_ref(f, &mut errors));

    match (name, price, quantity, image, date_listed) {
        (Some(name), Some(price), Some(quantity), Some(image), Some(date_listed)) if errors.is_empty() => {
            Ok(Listing {
                id: None,
                name,
                date_listed,
                description: non_blank(request.description.as_deref()),
                flower_type,
                price,
                occasion,
                quantity,
                image,
                florist: florist.flatten(),
            })
        }
        _ => Err(ApiError::Validation(errors)),
    }
}

fn validate_florist_ref(request: &FloristRefRequest, errors: &mut ValidationErrors) -> Option<FloristRef> {
    let before = errors.0.len();

    let florist_id = match non_blank(request.florist_id.as_deref()) {
        None => None,
        Some(raw) => match ObjectId::parse_str(&raw) {
            Ok(id) => Some(id),
            Err(_) => {
                errors.push("florist.florist_id", "Florist ID", ViolationKind::InvalidId);
                None
            }
        },
    };

    let florist_name = match request.florist_name.as_deref() {
        None => None,
        Some(raw) if raw.trim().is_empty() => {
            errors.push("florist.florist_name", "Florist name", ViolationKind::Required);
            None
        }
        Some(raw) => Some(raw.trim().to_string()),
    };

    if errors.0.len() > before {
        return None;
    }

    Some(FloristRef {
        florist_id,
        florist_name,
        contact: request.contact.as_ref().map(|c| c.as_text()).filter(|c| !c.is_empty()),
        contact_method: clean_tags(&request.contact_method),
    })
}

/// Check a florist body and build the document to persist.
pub fn validate_florist(request: &FloristRequest) -> Result<Florist, ApiError> {
    let mut errors = ValidationErrors::default();

    let name = non_blank(request.name.as_deref());
    if name.is_none() {
        errors.push("name", "Name", ViolationKind::Required);
    }

    let username = request.username.as_deref().map(str::trim).unwrap_or_default();
    if username.chars().count() < MIN_USERNAME_LEN {
        errors.push("username", "Username", ViolationKind::TooShort { min: MIN_USERNAME_LEN });
    }

    let login_email = request.login_email.as_deref().map(str::trim).unwrap_or_default();
    if !(login_email.contains('@') && login_email.contains('.')) {
        errors.push("login_email", "Login email", ViolationKind::InvalidEmail);
    }

    let mut contact_method = Vec::new();
    for raw in clean_tags(&request.contact_method) {
        match raw.parse::<ContactMethod>() {
            Ok(method) if !contact_method.contains(&method) => contact_method.push(method),
            Ok(_) => {}
            Err(_) => errors.push(
                "contact_method",
                "Contact method",
                ViolationKind::UnsupportedContactMethod { value: raw },
            ),
        }
    }
    if request.contact_method.iter().all(|m| m.trim().is_empty()) {
        errors.push("contact_method", "Contact method", ViolationKind::Required);
    }

    let number = request
        .contact
        .number
        .as_ref()
        .map(|n| n.as_text())
        .filter(|n| !n.is_empty());
    let instagram = non_blank(request.contact.instagram.as_deref());
    let facebook = non_blank(request.contact.facebook.as_deref());

    if contact_method.contains(&ContactMethod::Whatsapp)
        && number.as_deref().map_or(0, |n| n.chars().count()) < MIN_CONTACT_NUMBER_LEN
    {
        errors.push(
            "contact.number",
            "Contact number",
            ViolationKind::TooShort { min: MIN_CONTACT_NUMBER_LEN },
        );
    }
    if contact_method.contains(&ContactMethod::Instagram)
        && !instagram.as_deref().map_or(false, |url| url.contains("instagram.com"))
    {
        errors.push(
            "contact.instagram",
            "Instagram link",
            ViolationKind::MissingDomain { domain: "instagram.com".to_string() },
        );
    }
    if contact_method.contains(&ContactMethod::Facebook)
        && !facebook.as_deref().map_or(false, |url| url.contains("facebook.com"))
    {
        errors.push(
            "contact.facebook",
            "Facebook link",
            ViolationKind::MissingDomain { domain: "facebook.com".to_string() },
        );
    }

    let florist = Florist {
        id: None,
        name: name.unwrap_or_default(),
        username: username.to_string(),
        login_email: login_email.to_string(),
        contact_method,
        contact: Contact { number, instagram, facebook },
    };
    errors.into_result(florist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::florist::ContactRequest;
    use crate::models::NumericInput;

    fn valid_listing() -> ListingRequest {
        ListingRequest {
            name: Some("Sunrise Bouquet".into()),
            date_listed: Some("2024-02-14".into()),
            description: Some("Fresh from the market".into()),
            flower_type: vec!["rose".into(), "tulip".into()],
            price: Some(NumericInput::Text("39.90".into())),
            occasion: vec!["valentine".into()],
            quantity: Some(NumericInput::Integer(5)),
            image: Some("https://cdn.example.com/sunrise.JPG".into()),
            florist: Some(FloristRefRequest {
                florist_id: Some(ObjectId::new().to_hex()),
                florist_name: Some("Petal Pushers".into()),
                contact: Some(NumericInput::Integer(91234567)),
                contact_method: vec!["whatsapp".into()],
            }),
        }
    }

    fn valid_florist() -> FloristRequest {
        FloristRequest {
            name: Some("Petal Pushers".into()),
            username: Some("petalpushers".into()),
            login_email: Some("hello@petal.sg".into()),
            contact_method: vec!["whatsapp".into(), "instagram".into()],
            contact: ContactRequest {
                number: Some(NumericInput::Text("91234567".into())),
                instagram: Some("https://instagram.com/petalpushers".into()),
                facebook: None,
            },
        }
    }

    fn violations(result: Result<impl std::fmt::Debug, ApiError>) -> ValidationErrors {
        match result {
            Err(ApiError::Validation(errors)) => errors,
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_listing_is_coerced() {
        let listing = validate_listing(&valid_listing(), Utc::now()).unwrap();
        assert_eq!(listing.price, 39.90);
        assert_eq!(listing.quantity, 5);
        assert_eq!(listing.date_listed.format("%Y-%m-%d").to_string(), "2024-02-14");
        let florist = listing.florist.unwrap();
        assert_eq!(florist.contact.as_deref(), Some("91234567"));
    }

    #[test]
    fn test_listing_date_defaults_to_now() {
        let now = Utc::now();
        let mut request = valid_listing();
        request.date_listed = None;
        assert_eq!(validate_listing(&request, now).unwrap().date_listed, now);
    }

    #[test]
    fn test_empty_listing_reports_every_rule() {
        let errors = violations(validate_listing(&ListingRequest::default(), Utc::now()));
        assert_eq!(
            errors.fields(),
            vec!["name", "flower_type", "price", "quantity", "occasion", "image"]
        );
    }

    #[test]
    fn test_listing_numeric_rules() {
        let mut request = valid_listing();
        request.price = Some(NumericInput::Integer(0));
        request.quantity = Some(NumericInput::Float(1.5));
        let errors = violations(validate_listing(&request, Utc::now()));
        assert!(errors.has("price", &ViolationKind::NotPositiveNumber));
        assert!(errors.has("quantity", &ViolationKind::NotPositiveInteger));

        request.price = Some(NumericInput::Text("cheap".into()));
        request.quantity = Some(NumericInput::Text("-2".into()));
        let errors = violations(validate_listing(&request, Utc::now()));
        assert!(errors.has("price", &ViolationKind::NotPositiveNumber));
        assert!(errors.has("quantity", &ViolationKind::NotPositiveInteger));
    }

    #[test]
    fn test_listing_image_extension() {
        let mut request = valid_listing();
        request.image = Some("https://cdn.example.com/sunrise.gif".into());
        let errors = violations(validate_listing(&request, Utc::now()));
        assert_eq!(errors.0.len(), 1);
        assert!(errors.has("image", &ViolationKind::InvalidImageExtension));

        request.image = Some("bouquet.jpeg".into());
        assert!(validate_listing(&request, Utc::now()).is_ok());
    }

    #[test]
    fn test_listing_florist_reference_rules() {
        let mut request = valid_listing();
        request.florist = Some(FloristRefRequest {
            florist_id: Some("not-an-id".into()),
            florist_name: Some("   ".into()),
            ..Default::default()
        });
        let errors = violations(validate_listing(&request, Utc::now()));
        assert!(errors.has("florist.florist_id", &ViolationKind::InvalidId));
        assert!(errors.has("florist.florist_name", &ViolationKind::Required));

        request.florist = None;
        assert!(validate_listing(&request, Utc::now()).unwrap().florist.is_none());
    }

    #[test]
    fn test_listing_bad_date() {
        let mut request = valid_listing();
        request.date_listed = Some("14/02/2024".into());
        let errors = violations(validate_listing(&request, Utc::now()));
        assert!(errors.has("date_listed", &ViolationKind::InvalidDate));
    }

    #[test]
    fn test_valid_florist() {
        let florist = validate_florist(&valid_florist()).unwrap();
        assert_eq!(florist.contact_method, vec![ContactMethod::Whatsapp, ContactMethod::Instagram]);
        assert_eq!(florist.contact.number.as_deref(), Some("91234567"));
    }

    #[test]
    fn test_florist_basic_rules() {
        let mut request = valid_florist();
        request.name = None;
        request.username = Some("short".into());
        request.login_email = Some("nobody-at-home".into());
        let errors = violations(validate_florist(&request));
        assert!(errors.has("name", &ViolationKind::Required));
        assert!(errors.has("username", &ViolationKind::TooShort { min: 8 }));
        assert!(errors.has("login_email", &ViolationKind::InvalidEmail));
    }

    #[test]
    fn test_florist_whatsapp_needs_long_number() {
        let mut request = valid_florist();
        request.contact.number = Some(NumericInput::Integer(1234));
        let errors = violations(validate_florist(&request));
        assert!(errors.has("contact.number", &ViolationKind::TooShort { min: 8 }));
        assert!(errors.to_string().contains("Contact number"));
    }

    #[test]
    fn test_florist_social_links() {
        let mut request = valid_florist();
        request.contact_method = vec!["instagram".into(), "facebook".into()];
        request.contact.instagram = Some("https://example.com/me".into());
        let errors = violations(validate_florist(&request));
        assert_eq!(errors.fields(), vec!["contact.instagram", "contact.facebook"]);
    }

    #[test]
    fn test_florist_contact_methods() {
        let mut request = valid_florist();
        request.contact_method = vec![];
        assert!(violations(validate_florist(&request)).has("contact_method", &ViolationKind::Required));

        request.contact_method = vec!["telegram".into()];
        let errors = violations(validate_florist(&request));
        assert!(errors.has(
            "contact_method",
            &ViolationKind::UnsupportedContactMethod { value: "telegram".into() }
        ));
    }
}
