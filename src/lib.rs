pub mod config;
pub mod gateway;
pub mod grpc;
pub mod handler;
pub mod model;
pub mod server;

pub use config::{Config, ConfigError, StoreBackend, StoreConfig};
pub use gateway::{GatewayError, InMemoryGateway, MongoGateway, MovieCursor, MovieGateway};
pub use handler::{movie_server, HandlerError, MovieHandler, MovieStream};
pub use model::{MovieFields, MovieId, MovieRecord};
