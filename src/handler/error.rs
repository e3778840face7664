//! Error types for movie request handlers.

use std::error::Error;
use std::fmt;

use tonic::{Code, Status};

use crate::gateway::GatewayError;
use crate::model::{DecodeError, EncodeError, InvalidMovieId, MovieId};

/// Every way a handler call can fail. Each variant resolves to exactly one
/// gRPC status code.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerError {
    /// The request carried no movie payload.
    MissingMovie,
    /// The identifier string does not decode into an object id.
    InvalidId(InvalidMovieId),
    /// No record matches a well-formed identifier.
    NotFound(MovieId),
    /// The payload could not be encoded for storage.
    Encode(EncodeError),
    /// Storage failed (connection, driver, or an initial query).
    Storage(GatewayError),
    /// A single-record response could not be decoded.
    Decode(DecodeError),
    /// A record in a list stream could not be decoded.
    StreamDecode(DecodeError),
    /// The list cursor failed after streaming began.
    Cursor(GatewayError),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::MissingMovie => write!(f, "invalid movie: payload is missing"),
            HandlerError::InvalidId(e) => write!(f, "invalid movie id: {}", e),
            HandlerError::NotFound(id) => write!(f, "could not find movie with object id {}", id),
            HandlerError::Encode(e) => write!(f, "internal error: {}", e),
            HandlerError::Storage(e) => write!(f, "internal error: {}", e),
            HandlerError::Decode(e) => write!(f, "internal error: {}", e),
            HandlerError::StreamDecode(e) => write!(f, "could not decode data: {}", e),
            HandlerError::Cursor(e) => write!(f, "unknown cursor error: {}", e),
        }
    }
}

impl Error for HandlerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HandlerError::InvalidId(e) => Some(e),
            HandlerError::Encode(e) => Some(e),
            HandlerError::Storage(e) | HandlerError::Cursor(e) => Some(e),
            HandlerError::Decode(e) | HandlerError::StreamDecode(e) => Some(e),
            HandlerError::MissingMovie | HandlerError::NotFound(_) => None,
        }
    }
}

impl From<GatewayError> for HandlerError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotFound { id } => HandlerError::NotFound(id),
            other => HandlerError::Storage(other),
        }
    }
}

impl From<InvalidMovieId> for HandlerError {
    fn from(err: InvalidMovieId) -> Self {
        HandlerError::InvalidId(err)
    }
}

impl From<EncodeError> for HandlerError {
    fn from(err: EncodeError) -> Self {
        HandlerError::Encode(err)
    }
}

impl HandlerError {
    /// Map this error to a gRPC status code.
    pub fn code(&self) -> Code {
        match self {
            HandlerError::MissingMovie => Code::InvalidArgument,
            HandlerError::InvalidId(_) => Code::InvalidArgument,
            HandlerError::NotFound(_) => Code::NotFound,
            HandlerError::Encode(_) => Code::Internal,
            HandlerError::Storage(_) => Code::Internal,
            HandlerError::Decode(_) => Code::Internal,
            HandlerError::StreamDecode(_) => Code::Unavailable,
            HandlerError::Cursor(_) => Code::Internal,
        }
    }
}

impl From<HandlerError> for Status {
    fn from(err: HandlerError) -> Self {
        Status::new(err.code(), err.to_string())
    }
}
