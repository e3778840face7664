//! MovieId - the storage-assigned identifier of a movie record.

use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;

/// Identifier of a persisted movie: a 12-byte object id, rendered as 24
/// lowercase hex characters on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MovieId(ObjectId);

impl MovieId {
    /// Generate a fresh identifier. Only storage backends should call this.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Decode an externally supplied identifier string.
    pub fn parse(input: &str) -> Result<Self, InvalidMovieId> {
        ObjectId::parse_str(input)
            .map(Self)
            .map_err(|e| InvalidMovieId {
                input: input.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for MovieId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for MovieId {
    type Err = InvalidMovieId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

/// An identifier string that does not decode into an object id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMovieId {
    pub input: String,
    pub reason: String,
}

impl fmt::Display for InvalidMovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not convert {:?} to an object id: {}",
            self.input, self.reason
        )
    }
}

impl std::error::Error for InvalidMovieId {}
