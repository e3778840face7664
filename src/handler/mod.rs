//! Request handlers — one per RPC, each a single-shot transformation:
//! validate, convert wire fields, call the gateway, convert back.
//!
//! `MovieHandler<G>` holds the injected gateway and implements the generated
//! `MovieService` trait. The plain `create`/`read`/`list`/`update`/`delete`
//! methods carry the logic and return `HandlerError`; the trait impl only
//! unwraps requests, logs failures, and converts errors into `Status`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use movie_service::{handler, InMemoryGateway};
//!
//! let svc = handler::movie_server(Arc::new(InMemoryGateway::new()));
//! tonic::transport::Server::builder()
//!     .add_service(svc)
//!     .serve("[::1]:50051".parse()?)
//!     .await?;
//! ```

mod error;
mod stream;

use std::sync::Arc;

use futures_util::stream::{Map, StreamExt};
use tonic::{Request, Response, Status};

use crate::gateway::MovieGateway;
use crate::grpc::{
    CreateMovieReq, CreateMovieRes, DeleteMovieReq, DeleteMovieRes, ListMoviesReq, ListMoviesRes,
    Movie, MovieService, MovieServiceServer, ReadMovieReq, ReadMovieRes, UpdateMovieReq,
    UpdateMovieRes,
};
use crate::model::{IdFilter, InsertDocument, MovieFields, MovieId, MovieRecord, ReplaceSet};

pub use error::HandlerError;
pub use stream::MovieStream;

/// Serves movie RPCs against a shared gateway.
pub struct MovieHandler<G> {
    gateway: Arc<G>,
}

impl<G> Clone for MovieHandler<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}

impl<G: MovieGateway> MovieHandler<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Persist a new movie and return it with its assigned identifier.
    pub async fn create(&self, movie: Option<Movie>) -> Result<Movie, HandlerError> {
        let movie = movie.ok_or(HandlerError::MissingMovie)?;
        let fields = MovieFields::from(&movie);
        let id = self
            .gateway
            .insert_one(InsertDocument::new(&fields)?)
            .await
            .map_err(HandlerError::Storage)?;
        tracing::debug!(%id, "movie created");
        Ok(MovieRecord { id, fields }.into())
    }

    pub async fn read(&self, id: &str) -> Result<Movie, HandlerError> {
        let id = MovieId::parse(id)?;
        let document = self.gateway.find_by_id(IdFilter::new(id)).await?;
        let record = MovieRecord::from_document(document).map_err(HandlerError::Decode)?;
        tracing::debug!(%id, "movie read");
        Ok(record.into())
    }

    /// Open a cursor over the whole collection. Records are decoded lazily as
    /// the returned stream is polled.
    pub async fn list(&self) -> Result<MovieStream, HandlerError> {
        let cursor = self.gateway.find_all().await?;
        Ok(MovieStream::new(cursor))
    }

    /// Replace every non-identifier field of an existing movie and return the
    /// stored result.
    pub async fn update(&self, movie: Option<Movie>) -> Result<Movie, HandlerError> {
        let movie = movie.ok_or(HandlerError::MissingMovie)?;
        let id = MovieId::parse(&movie.id)?;
        let update = ReplaceSet::new(&MovieFields::from(&movie))?;
        let document = self
            .gateway
            .replace_by_id(IdFilter::new(id), update)
            .await?;
        let record = MovieRecord::from_document(document).map_err(HandlerError::Decode)?;
        tracing::debug!(%id, "movie updated");
        Ok(record.into())
    }

    /// Remove a movie. Deleting an identifier with no record is `NotFound`,
    /// so a successful call always means a record was removed.
    pub async fn delete(&self, id: &str) -> Result<bool, HandlerError> {
        let id = MovieId::parse(id)?;
        self.gateway.delete_by_id(IdFilter::new(id)).await?;
        tracing::debug!(%id, "movie deleted");
        Ok(true)
    }
}

fn reject(rpc: &'static str, err: HandlerError) -> Status {
    tracing::warn!(rpc, code = ?err.code(), error = %err, "request failed");
    err.into()
}

fn list_item(item: Result<Movie, HandlerError>) -> Result<ListMoviesRes, Status> {
    item.map(|movie| ListMoviesRes { movie: Some(movie) })
        .map_err(Status::from)
}

type ListItemFn = fn(Result<Movie, HandlerError>) -> Result<ListMoviesRes, Status>;

#[tonic::async_trait]
impl<G: MovieGateway> MovieService for MovieHandler<G> {
    async fn create_movie(
        &self,
        request: Request<CreateMovieReq>,
    ) -> Result<Response<CreateMovieRes>, Status> {
        let movie = self
            .create(request.into_inner().movie)
            .await
            .map_err(|e| reject("CreateMovie", e))?;
        Ok(Response::new(CreateMovieRes { movie: Some(movie) }))
    }

    async fn read_movie(
        &self,
        request: Request<ReadMovieReq>,
    ) -> Result<Response<ReadMovieRes>, Status> {
        let movie = self
            .read(&request.into_inner().id)
            .await
            .map_err(|e| reject("ReadMovie", e))?;
        Ok(Response::new(ReadMovieRes { movie: Some(movie) }))
    }

    type ListMoviesStream = Map<MovieStream, ListItemFn>;

    async fn list_movies(
        &self,
        _request: Request<ListMoviesReq>,
    ) -> Result<Response<Self::ListMoviesStream>, Status> {
        let stream = self.list().await.map_err(|e| reject("ListMovies", e))?;
        Ok(Response::new(stream.map(list_item as ListItemFn)))
    }

    async fn update_movie(
        &self,
        request: Request<UpdateMovieReq>,
    ) -> Result<Response<UpdateMovieRes>, Status> {
        let movie = self
            .update(request.into_inner().movie)
            .await
            .map_err(|e| reject("UpdateMovie", e))?;
        Ok(Response::new(UpdateMovieRes { movie: Some(movie) }))
    }

    async fn delete_movie(
        &self,
        request: Request<DeleteMovieReq>,
    ) -> Result<Response<DeleteMovieRes>, Status> {
        let success = self
            .delete(&request.into_inner().id)
            .await
            .map_err(|e| reject("DeleteMovie", e))?;
        Ok(Response::new(DeleteMovieRes { success }))
    }
}

/// Create a `MovieServiceServer` over a shared gateway.
pub fn movie_server<G: MovieGateway>(gateway: Arc<G>) -> MovieServiceServer<MovieHandler<G>> {
    MovieServiceServer::new(MovieHandler::new(gateway))
}
