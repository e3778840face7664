use movie_service::grpc::{CreateMovieReq, ListMoviesReq, ListMoviesRes, Movie, ReadMovieReq};
use mongodb::bson::{doc, oid::ObjectId};
use tonic::{Code, Status};

use crate::support::TestServer;

/// Drain a list stream, returning the items received and the terminal error.
async fn drain(
    client: &mut movie_service::grpc::MovieServiceClient<tonic::transport::Channel>,
) -> (Vec<Movie>, Option<Status>) {
    let mut stream = client
        .list_movies(ListMoviesReq {})
        .await
        .unwrap()
        .into_inner();
    let mut movies = Vec::new();
    loop {
        match stream.message().await {
            Ok(Some(ListMoviesRes { movie })) => movies.push(movie.unwrap()),
            Ok(None) => return (movies, None),
            Err(status) => return (movies, Some(status)),
        }
    }
}

#[tokio::test]
async fn empty_collection_streams_nothing() {
    let mut server = TestServer::start().await;
    let client = &mut server.client;

    let (movies, error) = drain(client).await;
    assert!(movies.is_empty());
    assert!(error.is_none());
}

#[tokio::test]
async fn streams_every_record_with_its_id() {
    let mut server = TestServer::start().await;
    let gateway = server.gateway.clone();
    let client = &mut server.client;

    let mut ids = Vec::new();
    for n in 0..5 {
        let created = client
            .create_movie(CreateMovieReq {
                movie: Some(Movie {
                    title: format!("Movie {n}"),
                    runtime: 90 + n,
                    ..Default::default()
                }),
            })
            .await
            .unwrap()
            .into_inner()
            .movie
            .unwrap();
        ids.push(created.id);
    }

    let (movies, error) = drain(client).await;
    assert!(error.is_none());
    assert_eq!(movies.len(), 5);
    for (n, movie) in movies.iter().enumerate() {
        assert_eq!(movie.id, ids[n]);
        assert_eq!(movie.title, format!("Movie {n}"));
    }
    assert_eq!(gateway.open_cursors(), 0);
}

#[tokio::test]
async fn undecodable_document_terminates_with_unavailable() {
    let mut server = TestServer::start().await;
    let gateway = server.gateway.clone();
    let client = &mut server.client;

    gateway
        .insert_raw(doc! { "_id": ObjectId::new(), "title": "Fine" })
        .unwrap();
    gateway
        .insert_raw(doc! { "_id": ObjectId::new(), "rating": "five stars" })
        .unwrap();
    gateway
        .insert_raw(doc! { "_id": ObjectId::new(), "title": "Unreached" })
        .unwrap();

    let (movies, error) = drain(client).await;
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "Fine");
    assert_eq!(error.unwrap().code(), Code::Unavailable);
    assert_eq!(gateway.open_cursors(), 0);
}

#[tokio::test]
async fn whole_number_doubles_decode_as_runtime() {
    let mut server = TestServer::start().await;
    let gateway = server.gateway.clone();
    let client = &mut server.client;

    let oid = ObjectId::new();
    gateway
        .insert_raw(doc! { "_id": oid, "title": "Dune", "runtime": 155.0_f64 })
        .unwrap();

    let (movies, error) = drain(client).await;
    assert!(error.is_none());
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].runtime, 155);

    let read = client
        .read_movie(ReadMovieReq { id: oid.to_hex() })
        .await
        .unwrap()
        .into_inner()
        .movie
        .unwrap();
    assert_eq!(read.runtime, 155);
}

#[tokio::test]
async fn cursor_failure_terminates_with_internal() {
    let mut server = TestServer::start().await;
    let gateway = server.gateway.clone();
    let client = &mut server.client;

    for n in 0..3 {
        gateway
            .insert_raw(doc! { "_id": ObjectId::new(), "title": format!("M{n}") })
            .unwrap();
    }
    gateway.fail_cursor_after(Some(2)).unwrap();

    let (movies, error) = drain(client).await;
    assert_eq!(movies.len(), 2);
    let status = error.unwrap();
    assert_eq!(status.code(), Code::Internal);
    assert!(status.message().contains("cursor"));
    assert_eq!(gateway.open_cursors(), 0);
}

#[tokio::test]
async fn failing_query_is_internal() {
    let mut server = TestServer::start().await;
    let gateway = server.gateway.clone();
    let client = &mut server.client;
    gateway.fail_queries(true);

    let status = client.list_movies(ListMoviesReq {}).await.unwrap_err();
    assert_eq!(status.code(), Code::Internal);
}
