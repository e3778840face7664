//! gRPC integration tests.
//!
//! Starts the movie service on an ephemeral port over an in-memory gateway
//! and exercises it with the generated client.

mod crud;
mod list;
mod support;
