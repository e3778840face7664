//! Wire protocol for the movie catalogue — prost messages and the generated
//! `MovieService` server/client.
//!
//! Messages use the standard protobuf wire format without a `.proto` file;
//! the service skeleton is produced by `build.rs`.
//!
//! ## RPCs
//!
//! - `CreateMovie` — `CreateMovieReq` → `CreateMovieRes`
//! - `ReadMovie` — `ReadMovieReq` → `ReadMovieRes`
//! - `ListMovies` — `ListMoviesReq` → stream of `ListMoviesRes`
//! - `UpdateMovie` — `UpdateMovieReq` → `UpdateMovieRes`
//! - `DeleteMovie` — `DeleteMovieReq` → `DeleteMovieRes`

// ---------------------------------------------------------------------------
// Message types (prost — standard protobuf wire format)
// ---------------------------------------------------------------------------

/// A movie as it travels over the wire. Empty strings and zero numbers mean
/// "not set".
#[derive(Clone, PartialEq, prost::Message)]
pub struct Movie {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub title: String,
    #[prost(string, tag = "3")]
    pub description: String,
    #[prost(string, tag = "4")]
    pub release_date: String,
    #[prost(string, tag = "5")]
    pub director: String,
    #[prost(string, tag = "6")]
    pub genre: String,
    #[prost(float, tag = "7")]
    pub rating: f32,
    #[prost(int32, tag = "8")]
    pub runtime: i32,
    #[prost(string, tag = "9")]
    pub poster: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateMovieReq {
    #[prost(message, optional, tag = "1")]
    pub movie: Option<Movie>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateMovieRes {
    #[prost(message, optional, tag = "1")]
    pub movie: Option<Movie>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ReadMovieReq {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ReadMovieRes {
    #[prost(message, optional, tag = "1")]
    pub movie: Option<Movie>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListMoviesReq {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListMoviesRes {
    #[prost(message, optional, tag = "1")]
    pub movie: Option<Movie>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UpdateMovieReq {
    #[prost(message, optional, tag = "1")]
    pub movie: Option<Movie>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UpdateMovieRes {
    #[prost(message, optional, tag = "1")]
    pub movie: Option<Movie>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteMovieReq {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteMovieRes {
    #[prost(bool, tag = "1")]
    pub success: bool,
}

// ---------------------------------------------------------------------------
// Generated service trait + server/client
// ---------------------------------------------------------------------------

include!(concat!(env!("OUT_DIR"), "/movie.MovieService.rs"));

pub use movie_service_client::MovieServiceClient;
pub use movie_service_server::{MovieService, MovieServiceServer};
