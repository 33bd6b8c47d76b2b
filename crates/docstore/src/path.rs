//! Collection and document paths
//!
//! Paths alternate collection and document segments:
//! `organizations` is a collection, `organizations/{team}` a document,
//! `organizations/{team}/players` a sub-collection of that document.

use std::fmt;

use crate::error::StoreError;

fn check_segment(segment: &str) -> Result<(), StoreError> {
    if segment.is_empty() || segment.contains('/') || segment.trim() != segment {
        return Err(StoreError::InvalidPath(format!(
            "Invalid path segment: {:?}",
            segment
        )));
    }
    Ok(())
}

/// Path to a collection (odd number of segments)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath {
    segments: Vec<String>,
}

impl CollectionPath {
    /// Top-level collection
    pub fn root(name: &str) -> Result<Self, StoreError> {
        check_segment(name)?;
        Ok(Self {
            segments: vec![name.to_string()],
        })
    }

    /// Path to the document `id` inside this collection
    pub fn doc(&self, id: &str) -> Result<DocumentPath, StoreError> {
        check_segment(id)?;
        Ok(DocumentPath {
            collection: self.clone(),
            id: id.to_string(),
        })
    }

    /// Last segment, e.g. `players`
    pub fn name(&self) -> &str {
        self.segments
            .last()
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Full slash-joined key used by storage backends
    pub fn key(&self) -> String {
        self.segments.join("/")
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Path to a single document (even number of segments)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    collection: CollectionPath,
    id: String,
}

impl DocumentPath {
    /// Parse a slash-separated path such as `organizations/abc/players/xyz`
    pub fn parse(path: &str) -> Result<Self, StoreError> {
        let segments: Vec<&str> = path.split('/').collect();
        if segments.len() % 2 != 0 {
            return Err(StoreError::InvalidPath(format!(
                "Document path must have an even number of segments: {}",
                path
            )));
        }
        let (collection_segments, id) = segments.split_at(segments.len() - 1);
        for segment in collection_segments {
            check_segment(segment)?;
        }
        let collection = CollectionPath {
            segments: collection_segments.iter().map(|s| s.to_string()).collect(),
        };
        collection.doc(id[0])
    }

    /// Sub-collection `name` below this document
    pub fn collection(&self, name: &str) -> Result<CollectionPath, StoreError> {
        check_segment(name)?;
        let mut segments = self.collection.segments.clone();
        segments.push(self.id.clone());
        segments.push(name.to_string());
        Ok(CollectionPath { segments })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Collection containing this document
    pub fn parent(&self) -> &CollectionPath {
        &self.collection
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection.key(), self.id)
    }
}
