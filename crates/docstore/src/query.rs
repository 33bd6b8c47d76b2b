//! Ordered collection queries

use std::cmp::Ordering;

use serde_json::Value;

use crate::document::{get_field, Document};

/// Sort direction for ordered queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Query over a single collection.
///
/// When ordered, documents that lack the order field are excluded from the
/// result. Ties keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub order_by: Option<(String, Direction)>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some((field.into(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Apply this query to documents given in insertion order
    pub fn apply(&self, mut documents: Vec<Document>) -> Vec<Document> {
        if let Some((field, direction)) = &self.order_by {
            documents.retain(|doc| get_field(&doc.data, field).is_some());
            // stable sort: equal keys stay in insertion order
            documents.sort_by(|a, b| {
                let ordering = compare_values(
                    get_field(&a.data, field).unwrap_or(&Value::Null),
                    get_field(&b.data, field).unwrap_or(&Value::Null),
                );
                match direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }
        if let Some(limit) = self.limit {
            documents.truncate(limit);
        }
        documents
    }
}

/// Rank of a JSON type in cross-type comparisons, as PostgreSQL orders jsonb:
/// Null < String < Number < Boolean < Array < Object
fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::String(_) => 1,
        Value::Number(_) => 2,
        Value::Bool(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over JSON values matching jsonb ordering.
///
/// Values of different types order by type, numbers numerically, strings
/// bytewise (PostgreSQL uses the database collation, which agrees for ASCII
/// under the `C` locale). Arrays and objects order by length first; arrays
/// of equal length then compare element by element.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x.len().cmp(&y.len()).then_with(|| {
            x.iter()
                .zip(y)
                .map(|(a, b)| compare_values(a, b))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        }),
        (Value::Object(x), Value::Object(y)) => x.len().cmp(&y.len()),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}
