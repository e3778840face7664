//! Record model — the movie field set and its two encodings.
//!
//! A movie crosses two boundaries: the wire (`grpc::Movie`, camel-cased,
//! proto3 defaults for "unset") and storage (a BSON document, lower-cased
//! keys, absent fields omitted). This module owns the fixed mapping between
//! them, the identifier scheme that bridges them, and the typed document
//! vocabulary the gateway speaks (`IdFilter`, `InsertDocument`,
//! `ReplaceSet`).
//!
//! ## Example
//!
//! ```ignore
//! use movie_service::model::{InsertDocument, MovieFields, MovieId};
//!
//! let fields = MovieFields::from(&wire_movie);
//! let insert = InsertDocument::new(&fields)?;
//! let id: MovieId = gateway.insert_one(insert).await?;
//! ```

mod id;
mod movie;
mod query;

pub use id::{InvalidMovieId, MovieId};
pub use movie::{field, DecodeError, MovieFields, MovieRecord};
pub use query::{EncodeError, IdFilter, InsertDocument, ReplaceSet};
