//! Process lifecycle: serve until told to stop, then tear down in order.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;

use crate::gateway::MovieGateway;
use crate::handler::movie_server;

/// Serve movie RPCs on `listener` until `shutdown` resolves.
///
/// Each call runs on its own task; `request_timeout` bounds every call and
/// abandons its pending storage operation on expiry. On shutdown the server
/// stops accepting, lets in-flight calls finish, drops the listener, and
/// finally closes the gateway.
pub async fn run<G, F>(
    gateway: Arc<G>,
    listener: TcpListener,
    request_timeout: Duration,
    shutdown: F,
) -> Result<(), tonic::transport::Error>
where
    G: MovieGateway,
    F: Future<Output = ()> + Send,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "movie service listening");
    }

    let served = tonic::transport::Server::builder()
        .timeout(request_timeout)
        .add_service(movie_server(gateway.clone()))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async {
            shutdown.await;
            tracing::info!("shutdown requested, no longer accepting calls");
        })
        .await;
    tracing::info!("server stopped, listener closed");

    gateway.close().await;
    tracing::info!("storage handle closed");
    served
}

/// Resolve on SIGINT (Ctrl-C) or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received SIGINT"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
