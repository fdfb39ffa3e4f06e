use crate::models::{ApiError, Filter, FloristQuery, ListingQuery, ValidationErrors, ViolationKind};

/// Split a comma-separated query value, dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_price(
    value: &Option<String>,
    field: &str,
    label: &str,
    errors: &mut ValidationErrors,
) -> Option<f64> {
    let raw = present(value)?;
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => {
            errors.push(field, label, ViolationKind::NotANumber);
            None
        }
    }
}

/// Build the listing filter from `GET /listings` parameters.
///
/// `flower_type` and `occasion` match any of the listed values.
pub fn listing_filter(query: &ListingQuery) -> Result<Filter, ApiError> {
    let mut errors = ValidationErrors::default();
    let mut conditions = Vec::new();

    if let Some(name) = present(&query.name) {
        conditions.push(Filter::contains("name", name));
    }
    if let Some(description) = present(&query.description) {
        conditions.push(Filter::contains("description", description));
    }

    for (field, raw) in [("flower_type", &query.flower_type), ("occasion", &query.occasion)] {
        if let Some(raw) = present(raw) {
            let values = split_list(raw);
            if !values.is_empty() {
                conditions.push(Filter::SetIntersects { field: field.to_string(), values });
            }
        }
    }

    if let Some(price) = parse_price(&query.price, "price", "Price", &mut errors) {
        conditions.push(Filter::equals("price", price));
    }
    let greater_than = parse_price(&query.price_greater, "price_greater", "Minimum price", &mut errors);
    let less_than = parse_price(&query.price_lesser, "price_lesser", "Maximum price", &mut errors);
    if greater_than.is_some() || less_than.is_some() {
        conditions.push(Filter::Range { field: "price".to_string(), greater_than, less_than });
    }

    errors.into_result(Filter::and(conditions))
}

/// Build the florist filter from `GET /florists` parameters.
pub fn florist_filter(query: &FloristQuery) -> Filter {
    let mut conditions = Vec::new();
    if let Some(username) = present(&query.username) {
        conditions.push(Filter::equals("username", username));
    }
    if let Some(login_email) = present(&query.login_email) {
        conditions.push(Filter::equals("login_email", login_email));
    }
    Filter::and(conditions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_parameters_means_no_constraint() {
        let filter = listing_filter(&ListingQuery::default()).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_split_list_trims() {
        assert_eq!(split_list(" rose, ,tulip ,"), vec!["rose", "tulip"]);
    }

    #[test]
    fn test_full_listing_query() {
        let query = ListingQuery {
            name: Some("bouquet".into()),
            flower_type: Some("rose,tulip".into()),
            occasion: Some("wedding".into()),
            price_greater: Some("10".into()),
            price_lesser: Some("50".into()),
            ..Default::default()
        };
        let filter = listing_filter(&query).unwrap();
        assert_eq!(
            filter,
            Filter::And(vec![
                Filter::contains("name", "bouquet"),
                Filter::SetIntersects { field: "flower_type".into(), values: vec!["rose".into(), "tulip".into()] },
                Filter::SetIntersects { field: "occasion".into(), values: vec!["wedding".into()] },
                Filter::Range { field: "price".into(), greater_than: Some(10.0), less_than: Some(50.0) },
            ])
        );
    }

    #[test]
    fn test_single_bound_and_exact_price() {
        let query = ListingQuery { price_lesser: Some("20".into()), ..Default::default() };
        assert_eq!(
            listing_filter(&query).unwrap(),
            Filter::Range { field: "price".into(), greater_than: None, less_than: Some(20.0) }
        );

        let query = ListingQuery { price: Some("15.5".into()), ..Default::default() };
        assert_eq!(listing_filter(&query).unwrap(), Filter::equals("price", 15.5));
    }

    #[test]
    fn test_non_numeric_price_is_rejected() {
        let query = ListingQuery {
            price_greater: Some("ten".into()),
            price_lesser: Some("NaN".into()),
            ..Default::default()
        };
        match listing_filter(&query) {
            Err(ApiError::Validation(errors)) => {
                assert_eq!(errors.fields(), vec!["price_greater", "price_lesser"]);
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_florist_filter() {
        let query = FloristQuery { username: Some("petalpushers".into()), login_email: Some(" ".into()) };
        assert_eq!(florist_filter(&query), Filter::equals("username", "petalpushers"));
    }
}
