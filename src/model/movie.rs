//! Movie field set, the storage record, and the wire conversions.

use std::fmt;

use mongodb::bson::{self, Bson, Document};
use serde::{Deserialize, Deserializer, Serialize};

use super::MovieId;
use crate::grpc;

/// Storage key for every movie attribute. Wire names are the prost field
/// names on `grpc::Movie`; note `release_date` is stored as `releasedate`.
pub mod field {
    pub const ID: &str = "_id";
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const RELEASE_DATE: &str = "releasedate";
    pub const DIRECTOR: &str = "director";
    pub const GENRE: &str = "genre";
    pub const RATING: &str = "rating";
    pub const RUNTIME: &str = "runtime";
    pub const POSTER: &str = "poster";

    /// All non-identifier keys, in declaration order.
    pub const ALL: [&str; 8] = [
        TITLE,
        DESCRIPTION,
        RELEASE_DATE,
        DIRECTOR,
        GENRE,
        RATING,
        RUNTIME,
        POSTER,
    ];
}

/// Every attribute of a movie except its identifier. `None` means the field
/// is absent and is left out of the stored document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "releasedate", skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(
        default,
        deserialize_with = "whole_minutes",
        skip_serializing_if = "Option::is_none"
    )]
    pub runtime: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

/// Accept any BSON number that holds an exact `i32`: shells and other
/// drivers often write integers as doubles or 64-bit values.
fn whole_minutes<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = match Option::<Bson>::deserialize(deserializer)? {
        None | Some(Bson::Null) => return Ok(None),
        Some(value) => value,
    };
    let minutes = match value {
        Bson::Int32(n) => Some(n),
        Bson::Int64(n) => i32::try_from(n).ok(),
        Bson::Double(n)
            if n.fract() == 0.0 && (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&n) =>
        {
            Some(n as i32)
        }
        _ => None,
    };
    minutes.map(Some).ok_or_else(|| {
        D::Error::custom(format!(
            "{}: expected a whole number in i32 range, found {}",
            field::RUNTIME,
            value
        ))
    })
}

fn present(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

impl From<&grpc::Movie> for MovieFields {
    /// Proto3 defaults (empty string, zero) become absent fields. The wire
    /// `id` is not part of the field set.
    fn from(movie: &grpc::Movie) -> Self {
        Self {
            title: present(&movie.title),
            description: present(&movie.description),
            release_date: present(&movie.release_date),
            director: present(&movie.director),
            genre: present(&movie.genre),
            rating: (movie.rating != 0.0).then_some(movie.rating),
            runtime: (movie.runtime != 0).then_some(movie.runtime),
            poster: present(&movie.poster),
        }
    }
}

/// A persisted movie: identifier plus field set.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    pub id: MovieId,
    pub fields: MovieFields,
}

impl MovieRecord {
    /// Decode a stored document. `_id` must be an object id; unknown keys are
    /// ignored and type mismatches on known keys fail the decode.
    pub fn from_document(document: Document) -> Result<Self, DecodeError> {
        let id = document
            .get_object_id(field::ID)
            .map_err(|e| DecodeError(format!("{}: {}", field::ID, e)))?;
        let fields: MovieFields =
            bson::from_document(document).map_err(|e| DecodeError(e.to_string()))?;
        Ok(Self {
            id: id.into(),
            fields,
        })
    }
}

impl From<MovieRecord> for grpc::Movie {
    fn from(record: MovieRecord) -> Self {
        let f = record.fields;
        Self {
            id: record.id.to_string(),
            title: f.title.unwrap_or_default(),
            description: f.description.unwrap_or_default(),
            release_date: f.release_date.unwrap_or_default(),
            director: f.director.unwrap_or_default(),
            genre: f.genre.unwrap_or_default(),
            rating: f.rating.unwrap_or_default(),
            runtime: f.runtime.unwrap_or_default(),
            poster: f.poster.unwrap_or_default(),
        }
    }
}

/// A stored document that does not have the shape of a movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError(pub String);

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not decode movie document: {}", self.0)
    }
}

impl std::error::Error for DecodeError {}
