//! Test doubles for the serving collaborator.

use async_trait::async_trait;
use autoserve_common::ServeError;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

use crate::lifecycle::{Servable, Worker};

/// Binds a real TCP listener that answers every connection with `ok` and
/// counts how many times it was bound. Binds numbered in `fail_on` are
/// rejected with `AddrInUse`.
#[derive(Clone, Default)]
pub(crate) struct CountingServer {
    binds: Arc<AtomicUsize>,
    fail_on: Option<usize>,
}

impl CountingServer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fail the `n`-th bind (1-based).
    pub(crate) fn failing_on(n: usize) -> Self {
        Self {
            binds: Arc::default(),
            fail_on: Some(n),
        }
    }

    pub(crate) fn binds(&self) -> usize {
        self.binds.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Servable for CountingServer {
    async fn bind(&self, addr: SocketAddr, _root: &Path) -> Result<Worker, ServeError> {
        let attempt = self.binds.load(Ordering::SeqCst) + 1;
        if self.fail_on == Some(attempt) {
            return Err(ServeError::AddrInUse(addr));
        }

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServeError::from_bind(addr, e))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| ServeError::from_bind(addr, e))?;
        self.binds.fetch_add(1, Ordering::SeqCst);

        Ok(Worker::spawn(local_addr, async move {
            loop {
                if let Ok((mut stream, _)) = listener.accept().await {
                    let _ = stream.write_all(b"ok").await;
                }
            }
        }))
    }
}

pub(crate) fn loopback() -> (String, u16) {
    ("127.0.0.1".to_string(), 0)
}
