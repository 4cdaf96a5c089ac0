//! Core listener lifecycle implementation.

use autoserve_common::ServeError;
use autoserve_config::ServerConfig;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::worker::{Servable, Worker};

/// The currently bound listener.
#[derive(Debug)]
pub struct ListenerHandle {
    addr: SocketAddr,
    root: PathBuf,
    worker: Worker,
}

impl ListenerHandle {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Keeps at most one listener bound to the configured address.
///
/// `Unbound -> start -> Bound -> stop -> Unbound`, with `restart` taking a
/// bound listener straight back to bound. Once a bind succeeds the
/// resolved address is pinned, so a configured port of `0` resolves to the
/// same port on every restart.
pub struct ListenerLifecycle<S> {
    server: S,
    host: String,
    port: u16,
    root: PathBuf,
    pinned: Option<SocketAddr>,
    current: Option<ListenerHandle>,
}

impl<S: Servable> ListenerLifecycle<S> {
    pub fn new(server: S, host: impl Into<String>, port: u16, root: impl Into<PathBuf>) -> Self {
        Self {
            server,
            host: host.into(),
            port,
            root: root.into(),
            pinned: None,
            current: None,
        }
    }

    pub fn from_config(server: S, config: &ServerConfig) -> Self {
        Self::new(server, config.host.clone(), config.port, config.root.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The host name as configured, before resolution.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn is_bound(&self) -> bool {
        self.current.is_some()
    }

    /// Address of the live listener, if one is bound.
    pub fn bound_address(&self) -> Option<SocketAddr> {
        self.current.as_ref().map(ListenerHandle::addr)
    }

    pub fn handle(&self) -> Option<&ListenerHandle> {
        self.current.as_ref()
    }

    /// Bind a new listener and spawn its serve loop.
    ///
    /// Refuses to run while a listener is already bound rather than
    /// binding a second one.
    pub async fn start(&mut self) -> Result<SocketAddr, ServeError> {
        if let Some(handle) = &self.current {
            return Err(ServeError::AlreadyBound(handle.addr));
        }

        let addr = self.resolve().await?;
        let worker = self.server.bind(addr, &self.root).await?;
        let bound = worker.local_addr();
        self.pinned = Some(bound);

        debug!(addr = %bound, root = %self.root.display(), "listener bound");
        self.current = Some(ListenerHandle {
            addr: bound,
            root: self.root.clone(),
            worker,
        });
        Ok(bound)
    }

    /// Terminate the current listener, returning the address it was bound
    /// to. Does nothing if no listener is bound.
    pub async fn stop(&mut self) -> Option<SocketAddr> {
        let handle = self.current.take()?;

        if handle.worker.is_finished() {
            warn!(addr = %handle.addr, "listener worker exited before it was stopped");
        }
        handle.worker.terminate().await;

        debug!(addr = %handle.addr, "listener stopped");
        Some(handle.addr)
    }

    /// Stop the current listener and bind a fresh one on the same address.
    pub async fn restart(&mut self) -> Result<SocketAddr, ServeError> {
        self.stop().await;
        self.start().await
    }

    async fn resolve(&self) -> Result<SocketAddr, ServeError> {
        if let Some(addr) = self.pinned {
            return Ok(addr);
        }
        if let Ok(ip) = self.host.parse::<IpAddr>() {
            return Ok(SocketAddr::new(ip, self.port));
        }

        let target = format!("{}:{}", self.host, self.port);
        let addrs: Vec<SocketAddr> = tokio::net::lookup_host(&target)
            .await
            .map_err(|e| ServeError::InvalidAddress(format!("{target}: {e}")))?
            .collect();

        // Prefer IPv4 so `localhost` binds the same way a plain HTTP server would.
        addrs
            .iter()
            .find(|addr| addr.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
            .ok_or(ServeError::InvalidAddress(target))
    }
}
