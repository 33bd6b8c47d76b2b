//! Documents, write operations and the field-level update semantics
//! shared by every backend

use rand::{distributions::Alphanumeric, Rng};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::path::{CollectionPath, DocumentPath};

/// Length of store-generated document ids
pub const GENERATED_ID_LEN: usize = 20;

/// Raw document data
pub type Fields = Map<String, Value>;

/// A stored document: its id plus schemaless JSON fields
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Fields) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Deserialize the document fields into a typed record
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        serde_json::from_value(Value::Object(self.data.clone())).map_err(|e| {
            StoreError::Corrupt(format!("document {}: {}", self.id, e))
        })
    }
}

/// Serialize a record into document fields; records must serialize to JSON objects
pub fn to_fields<T: Serialize>(record: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Corrupt(format!(
            "expected an object, got {}",
            other
        ))),
    }
}

/// Generate a random alphanumeric document id
pub fn generate_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_ID_LEN)
        .map(char::from)
        .collect()
}

/// Partial update of a single field. `field` is dot-separated for nested maps,
/// e.g. `skills.catches`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    /// Write `value` at `field`, creating intermediate maps
    Set { field: String, value: Value },
    /// Append `value` to the array at `field`, creating the array if absent.
    /// Duplicates are kept.
    Append { field: String, value: Value },
}

impl FieldUpdate {
    pub fn set(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Set {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn append(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Append {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// One write in an atomic batch
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Create a new document; fails if it already exists
    Create { path: DocumentPath, data: Fields },
    /// Overwrite a document, or deep-merge into it when `merge` is set.
    /// Creates the document if absent.
    Set {
        path: DocumentPath,
        data: Fields,
        merge: bool,
    },
    /// Apply field updates to an existing document; fails if it is absent
    Update {
        path: DocumentPath,
        updates: Vec<FieldUpdate>,
    },
    /// Delete a document; deleting a missing document is not an error
    Delete { path: DocumentPath },
}

impl WriteOp {
    pub fn path(&self) -> &DocumentPath {
        match self {
            WriteOp::Create { path, .. }
            | WriteOp::Set { path, .. }
            | WriteOp::Update { path, .. }
            | WriteOp::Delete { path } => path,
        }
    }

    /// Collection the write lands in
    pub fn collection(&self) -> &CollectionPath {
        self.path().parent()
    }
}

fn field_segments(field: &str) -> Result<Vec<&str>, StoreError> {
    let segments: Vec<&str> = field.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(StoreError::InvalidPath(format!(
            "Invalid field path: {:?}",
            field
        )));
    }
    Ok(segments)
}

/// Look up a possibly nested field
pub fn get_field<'a>(data: &'a Fields, field: &str) -> Option<&'a Value> {
    let mut segments = field.split('.');
    let mut current = data.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Navigate to the map that holds the last segment, creating maps on the way.
/// Non-map values in the way are replaced.
fn parent_map<'a>(data: &'a mut Fields, segments: &[&str]) -> &'a mut Fields {
    let mut current = data;
    for segment in segments {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        current = match entry {
            Value::Object(map) => map,
            _ => unreachable!("entry was just replaced by an object"),
        };
    }
    current
}

/// Apply field updates in order
pub fn apply_updates(data: &mut Fields, updates: &[FieldUpdate]) -> Result<(), StoreError> {
    for update in updates {
        match update {
            FieldUpdate::Set { field, value } => {
                let segments = field_segments(field)?;
                let (last, parents) = segments
                    .split_last()
                    .ok_or_else(|| StoreError::InvalidPath("empty field path".to_string()))?;
                parent_map(data, parents).insert(last.to_string(), value.clone());
            }
            FieldUpdate::Append { field, value } => {
                let segments = field_segments(field)?;
                let (last, parents) = segments
                    .split_last()
                    .ok_or_else(|| StoreError::InvalidPath("empty field path".to_string()))?;
                let map = parent_map(data, parents);
                match map.get_mut(*last) {
                    Some(Value::Array(items)) => items.push(value.clone()),
                    _ => {
                        map.insert(last.to_string(), Value::Array(vec![value.clone()]));
                    }
                }
            }
        }
    }
    Ok(())
}

/// Deep-merge `source` into `target`: nested maps merge, everything else overwrites
pub fn merge_fields(target: &mut Fields, source: &Fields) {
    for (key, value) in source {
        match (target.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_fields(existing, incoming);
            }
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}
