//! Server harness shared by the integration tests.

use std::sync::Arc;
use std::time::Duration;

use movie_service::grpc::{Movie, MovieServiceClient};
use movie_service::{server, InMemoryGateway};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tonic::transport::Channel;

pub struct TestServer {
    pub client: MovieServiceClient<Channel>,
    pub gateway: InMemoryGateway,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<Result<(), tonic::transport::Error>>,
}

impl TestServer {
    /// Bind to port 0, spawn the server, and return a connected client.
    pub async fn start() -> Self {
        Self::start_with(InMemoryGateway::new()).await
    }

    pub async fn start_with(gateway: InMemoryGateway) -> Self {
        Self::start_with_timeout(gateway, Duration::from_secs(5)).await
    }

    /// Like `start_with`, bounding every call by `request_timeout`.
    pub async fn start_with_timeout(gateway: InMemoryGateway, request_timeout: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server::run(
            Arc::new(gateway.clone()),
            listener,
            request_timeout,
            async {
                let _ = rx.await;
            },
        ));

        let client = MovieServiceClient::connect(format!("http://{addr}"))
            .await
            .unwrap();

        Self {
            client,
            gateway,
            shutdown: Some(tx),
            handle,
        }
    }

    /// Signal shutdown and wait for the server task to finish.
    pub async fn stop(mut self) -> Result<(), tonic::transport::Error> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        drop(self.client);
        self.handle.await.unwrap()
    }
}

pub fn dune() -> Movie {
    Movie {
        title: "Dune".into(),
        rating: 4.8,
        runtime: 155,
        ..Default::default()
    }
}
