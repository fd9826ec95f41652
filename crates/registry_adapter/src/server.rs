#![forbid(unsafe_code)]

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use registry_storage::ParticipantStore;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;

use crate::service::GrpcRegistryService;

/// Binding is the only fatal step of the serve path.
pub async fn bind_listener(addr: SocketAddr) -> io::Result<TcpListener> {
    TcpListener::bind(addr).await
}

/// Serves the registry on `listener` until `shutdown` resolves, then stops
/// accepting connections and drains in-flight calls.
pub async fn serve<F>(
    listener: TcpListener,
    store: Arc<ParticipantStore>,
    shutdown: F,
) -> Result<(), tonic::transport::Error>
where
    F: Future<Output = ()> + Send,
{
    let local_addr = listener.local_addr().ok();
    tracing::info!(
        addr = ?local_addr,
        api_version = %store.version(),
        "starting gRPC server"
    );

    Server::builder()
        .add_service(GrpcRegistryService::new(store).into_service())
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await?;

    tracing::info!("gRPC server stopped");
    Ok(())
}

/// Resolves on the first interrupt signal.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shut down signal received"),
        Err(err) => {
            // Without a signal handler the server can only stop on process exit.
            tracing::error!(error = %err, "failed to listen for interrupt signal");
            std::future::pending::<()>().await;
        }
    }
}
