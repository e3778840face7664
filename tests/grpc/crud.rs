use movie_service::grpc::{
    CreateMovieReq, DeleteMovieReq, Movie, ReadMovieReq, UpdateMovieReq,
};
use tonic::Code;

use crate::support::{dune, TestServer};

#[tokio::test]
async fn create_read_delete_read() {
    let mut server = TestServer::start().await;
    let client = &mut server.client;

    let created = client
        .create_movie(CreateMovieReq { movie: Some(dune()) })
        .await
        .unwrap()
        .into_inner()
        .movie
        .unwrap();
    assert!(!created.id.is_empty());

    let read = client
        .read_movie(ReadMovieReq { id: created.id.clone() })
        .await
        .unwrap()
        .into_inner()
        .movie
        .unwrap();
    assert_eq!(read.title, "Dune");
    assert_eq!(read.rating, 4.8);
    assert_eq!(read.runtime, 155);
    assert_eq!(read, Movie { id: created.id.clone(), ..dune() });

    let deleted = client
        .delete_movie(DeleteMovieReq { id: created.id.clone() })
        .await
        .unwrap()
        .into_inner();
    assert!(deleted.success);

    let status = client
        .read_movie(ReadMovieReq { id: created.id })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn create_without_movie_is_invalid_argument() {
    let mut server = TestServer::start().await;
    let client = &mut server.client;

    let status = client
        .create_movie(CreateMovieReq { movie: None })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn update_is_a_full_replace() {
    let mut server = TestServer::start().await;
    let client = &mut server.client;

    let created = client
        .create_movie(CreateMovieReq {
            movie: Some(Movie {
                director: "Denis Villeneuve".into(),
                genre: "Sci-Fi".into(),
                ..dune()
            }),
        })
        .await
        .unwrap()
        .into_inner()
        .movie
        .unwrap();

    let replacement = Movie {
        id: created.id.clone(),
        title: "Dune: Part Two".into(),
        release_date: "2024-03-01".into(),
        rating: 4.9,
        ..Default::default()
    };
    let updated = client
        .update_movie(UpdateMovieReq {
            movie: Some(replacement.clone()),
        })
        .await
        .unwrap()
        .into_inner()
        .movie
        .unwrap();
    assert_eq!(updated, replacement);

    let read = client
        .read_movie(ReadMovieReq { id: created.id })
        .await
        .unwrap()
        .into_inner()
        .movie
        .unwrap();
    assert_eq!(read, replacement);
    assert_eq!(read.director, "");
    assert_eq!(read.runtime, 0);
}

#[tokio::test]
async fn malformed_ids_are_invalid_argument() {
    let mut server = TestServer::start().await;
    let client = &mut server.client;

    for bad in ["", "123", "not-a-hex-object-id-0000", "65a1f0c2e4b0a1b2c3d4e5f"] {
        let status = client
            .read_movie(ReadMovieReq { id: bad.into() })
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument, "read {bad:?}");

        let status = client
            .delete_movie(DeleteMovieReq { id: bad.into() })
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument, "delete {bad:?}");

        let status = client
            .update_movie(UpdateMovieReq {
                movie: Some(Movie { id: bad.into(), ..dune() }),
            })
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument, "update {bad:?}");
    }
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let mut server = TestServer::start().await;
    let client = &mut server.client;
    let id = movie_service::MovieId::generate().to_string();

    let status = client
        .read_movie(ReadMovieReq { id: id.clone() })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    let status = client
        .update_movie(UpdateMovieReq {
            movie: Some(Movie { id: id.clone(), ..dune() }),
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    let status = client
        .delete_movie(DeleteMovieReq { id })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}
