//! Static file collaborator: an axum router over `ServeDir`.

use async_trait::async_trait;
use autoserve_common::ServeError;
use autoserve_watch::{Servable, Worker};
use axum::Router;
use std::net::SocketAddr;
use std::path::Path;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Serves the files under the root directory, `index.html` for directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFileServer;

pub fn router(root: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(root))
        .layer(TraceLayer::new_for_http())
}

#[async_trait]
impl Servable for StaticFileServer {
    async fn bind(&self, addr: SocketAddr, root: &Path) -> Result<Worker, ServeError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServeError::from_bind(addr, e))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| ServeError::from_bind(addr, e))?;

        let app = router(root);
        Ok(Worker::spawn(local_addr, async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(addr = %local_addr, error = %e, "static file server failed");
            }
        }))
    }
}
