//! The serving collaborator contract and the task that runs it.

use async_trait::async_trait;
use autoserve_common::ServeError;
use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Something that can bind a listener serving `root` and run it as a
/// background [`Worker`].
#[async_trait]
pub trait Servable: Send + Sync {
    /// Bind `addr` and start serving `root`.
    ///
    /// Must fail with [`ServeError::AddrInUse`] when the address is taken.
    async fn bind(&self, addr: SocketAddr, root: &Path) -> Result<Worker, ServeError>;
}

/// A spawned serve loop together with the address it is bound to.
#[derive(Debug)]
pub struct Worker {
    local_addr: SocketAddr,
    task: JoinHandle<()>,
}

impl Worker {
    /// Spawn `serve` on the runtime. The future must own the bound socket
    /// so that dropping it releases the address.
    pub fn spawn<F>(local_addr: SocketAddr, serve: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            local_addr,
            task: tokio::spawn(serve),
        }
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Whether the serve loop has already exited on its own.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel the serve loop and wait until its future, and with it the
    /// listening socket, has been dropped.
    ///
    /// In-flight connections are not drained.
    pub async fn terminate(self) {
        self.task.abort();
        match self.task.await {
            Err(e) if e.is_cancelled() => {
                debug!(addr = %self.local_addr, "worker terminated");
            }
            Err(e) => {
                warn!(addr = %self.local_addr, error = %e, "worker panicked");
            }
            Ok(()) => {
                debug!(addr = %self.local_addr, "worker had already exited");
            }
        }
    }
}
