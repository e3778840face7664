//! Typed storage vocabulary: one explicit shape per gateway operation instead
//! of ad-hoc documents.

use std::fmt;

use mongodb::bson::{self, Bson, Document};

use super::movie::field;
use super::{MovieFields, MovieId};

/// Selects the single document whose `_id` equals the given identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdFilter(MovieId);

impl IdFilter {
    pub fn new(id: MovieId) -> Self {
        Self(id)
    }

    pub fn id(&self) -> MovieId {
        self.0
    }

    pub fn to_document(&self) -> Document {
        let mut filter = Document::new();
        filter.insert(field::ID, self.0.object_id());
        filter
    }

    /// Whether a stored document is the one this filter selects.
    pub fn matches(&self, document: &Document) -> bool {
        document
            .get_object_id(field::ID)
            .is_ok_and(|oid| oid == self.0.object_id())
    }
}

/// A new document to insert. Never carries `_id`; storage assigns it.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertDocument(Document);

impl InsertDocument {
    pub fn new(fields: &MovieFields) -> Result<Self, EncodeError> {
        let document = bson::to_document(fields).map_err(|e| EncodeError(e.to_string()))?;
        Ok(Self(document))
    }

    pub fn into_document(self) -> Document {
        self.0
    }
}

/// Full replacement of every non-identifier field: present fields are
/// `$set`, absent ones are `$unset` so storage keeps omitting them.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceSet {
    set: Document,
    unset: Vec<&'static str>,
}

impl ReplaceSet {
    pub fn new(fields: &MovieFields) -> Result<Self, EncodeError> {
        let set = bson::to_document(fields).map_err(|e| EncodeError(e.to_string()))?;
        let unset = field::ALL
            .into_iter()
            .filter(|key| !set.contains_key(key))
            .collect();
        Ok(Self { set, unset })
    }

    pub fn set(&self) -> &Document {
        &self.set
    }

    pub fn unset(&self) -> &[&'static str] {
        &self.unset
    }

    /// The update document. Empty operators are left out.
    pub fn to_document(&self) -> Document {
        let mut update = Document::new();
        if !self.set.is_empty() {
            update.insert("$set", self.set.clone());
        }
        if !self.unset.is_empty() {
            let unset: Document = self
                .unset
                .iter()
                .map(|key| (key.to_string(), Bson::String(String::new())))
                .collect();
            update.insert("$unset", unset);
        }
        update
    }

    /// Apply the replacement to a stored document in place.
    pub fn apply(&self, document: &mut Document) {
        for key in &self.unset {
            document.remove(*key);
        }
        for (key, value) in &self.set {
            document.insert(key.clone(), value.clone());
        }
    }
}

/// A field set that could not be encoded as a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeError(pub String);

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not encode movie document: {}", self.0)
    }
}

impl std::error::Error for EncodeError {}
