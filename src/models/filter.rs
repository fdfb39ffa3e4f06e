use mongodb::bson::{doc, Bson, Document};

/// Store-independent predicate over a single collection.
///
/// Services build these from query strings; the MongoDB adapter turns them
/// into native query documents with [`Filter::to_document`] and the test
/// store evaluates them directly with `Filter::matches`.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Every condition must hold. An empty list matches every document.
    And(Vec<Filter>),
    Equals { field: String, value: Bson },
    /// Case-insensitive substring match on a string field.
    Contains { field: String, needle: String },
    /// Exclusive numeric bounds. A missing bound is unconstrained.
    Range {
        field: String,
        greater_than: Option<f64>,
        less_than: Option<f64>,
    },
    /// Array field shares at least one element with `values`.
    SetIntersects { field: String, values: Vec<String> },
    /// Array field contains every element of `values`. No query parameter
    /// builds this yet.
    #[allow(dead_code)]
    SetSupersets { field: String, values: Vec<String> },
}

impl Filter {
    #[cfg(test)]
    pub fn all() -> Self {
        Filter::And(Vec::new())
    }

    pub fn equals(field: &str, value: impl Into<Bson>) -> Self {
        Filter::Equals { field: field.to_string(), value: value.into() }
    }

    pub fn contains(field: &str, needle: &str) -> Self {
        Filter::Contains { field: field.to_string(), needle: needle.to_string() }
    }

    /// Flattens nested conjunctions so `{}` and single-condition filters stay simple.
    pub fn and(filters: Vec<Filter>) -> Self {
        let mut flat = Vec::with_capacity(filters.len());
        for filter in filters {
            match filter {
                Filter::And(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            flat.remove(0)
        } else {
            Filter::And(flat)
        }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        matches!(self, Filter::And(inner) if inner.is_empty())
    }

    /// Translate into a MongoDB query document.
    pub fn to_document(&self) -> Document {
        match self {
            Filter::And(inner) => match inner.len() {
                0 => Document::new(),
                1 => inner[0].to_document(),
                _ => {
                    let clauses: Vec<Bson> = inner
                        .iter()
                        .map(|f| Bson::Document(f.to_document()))
                        .collect();
                    doc! { "$and": clauses }
                }
            },
            Filter::Equals { field, value } => {
                let mut query = Document::new();
                query.insert(field.as_str(), value.clone());
                query
            }
            Filter::Contains { field, needle } => {
                let mut query = Document::new();
                query.insert(
                    field.as_str(),
                    doc! { "$regex": regex::escape(needle), "$options": "i" },
                );
                query
            }
            Filter::Range { field, greater_than, less_than } => {
                let mut bounds = Document::new();
                if let Some(lower) = greater_than {
                    bounds.insert("$gt", *lower);
                }
                if let Some(upper) = less_than {
                    bounds.insert("$lt", *upper);
                }
                let mut query = Document::new();
                query.insert(field.as_str(), bounds);
                query
            }
            Filter::SetIntersects { field, values } => {
                let mut query = Document::new();
                query.insert(field.as_str(), doc! { "$in": values.clone() });
                query
            }
            Filter::SetSupersets { field, values } => {
                let mut query = Document::new();
                query.insert(field.as_str(), doc! { "$all": values.clone() });
                query
            }
        }
    }

    /// Evaluate against a stored document. Dotted paths reach into embedded documents.
    #[cfg(test)]
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::And(inner) => inner.iter().all(|f| f.matches(document)),
            Filter::Equals { field, value } => match lookup(document, field) {
                Some(found) => bson_eq(found, value),
                None => matches!(value, Bson::Null),
            },
            Filter::Contains { field, needle } => match lookup(document, field) {
                Some(Bson::String(s)) => s.to_lowercase().contains(&needle.to_lowercase()),
                _ => false,
            },
            Filter::Range { field, greater_than, less_than } => {
                match lookup(document, field).and_then(as_number) {
                    Some(n) => {
                        greater_than.map_or(true, |lower| n > lower)
                            && less_than.map_or(true, |upper| n < upper)
                    }
                    None => false,
                }
            }
            Filter::SetIntersects { field, values } => {
                let present = string_elements(lookup(document, field));
                values.iter().any(|v| present.contains(&v.as_str()))
            }
            Filter::SetSupersets { field, values } => {
                let present = string_elements(lookup(document, field));
                !values.is_empty() && values.iter().all(|v| present.contains(&v.as_str()))
            }
        }
    }
}

#[cfg(test)]
fn lookup<'a>(document: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut parts = path.split('.');
    let mut current = document.get(parts.next()?)?;
    for part in parts {
        current = match current {
            Bson::Document(inner) => inner.get(part)?,
            _ => return None,
        };
    }
    Some(current)
}

#[cfg(test)]
fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Double(d) => Some(*d),
        Bson::Int32(i) => Some(*i as f64),
        Bson::Int64(i) => Some(*i as f64),
        _ => None,
    }
}

#[cfg(test)]
fn bson_eq(left: &Bson, right: &Bson) -> bool {
    match (as_number(left), as_number(right)) {
        (Some(a), Some(b)) => a == b,
        _ => left == right,
    }
}

#[cfg(test)]
fn string_elements(value: Option<&Bson>) -> Vec<&str> {
    match value {
        Some(Bson::Array(items)) => items.iter().filter_map(Bson::as_str).collect(),
        Some(Bson::String(s)) => vec![s.as_str()],
        _ => Vec::new(),
    }
}
