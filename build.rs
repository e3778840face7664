fn main() {
    // Messages are declared by hand with prost derives in src/grpc.rs, so only
    // the service skeleton (server trait + client) is generated here.
    let method = |name: &str, route: &str, input: &str, output: &str| {
        tonic_build::manual::Method::builder()
            .name(name)
            .route_name(route)
            .input_type(format!("crate::grpc::{input}"))
            .output_type(format!("crate::grpc::{output}"))
            .codec_path("tonic::codec::ProstCodec")
    };

    let service = tonic_build::manual::Service::builder()
        .name("MovieService")
        .package("movie")
        .method(method("create_movie", "CreateMovie", "CreateMovieReq", "CreateMovieRes").build())
        .method(method("read_movie", "ReadMovie", "ReadMovieReq", "ReadMovieRes").build())
        .method(
            method("list_movies", "ListMovies", "ListMoviesReq", "ListMoviesRes")
                .server_streaming()
                .build(),
        )
        .method(method("update_movie", "UpdateMovie", "UpdateMovieReq", "UpdateMovieRes").build())
        .method(method("delete_movie", "DeleteMovie", "DeleteMovieReq", "DeleteMovieRes").build())
        .build();

    tonic_build::manual::Builder::new().compile(&[service]);
}
