use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("no config directory on this platform")]
    NoConfigDir,

    #[error("config I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("address {0} is already in use")]
    AddrInUse(SocketAddr),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("a listener is already bound to {0}")]
    AlreadyBound(SocketAddr),

    #[error("invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("root directory not found: {0}")]
    RootNotFound(PathBuf),
}

impl ServeError {
    /// Classify a bind failure, keeping address conflicts distinct from
    /// every other socket error.
    pub fn from_bind(addr: SocketAddr, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::AddrInUse {
            ServeError::AddrInUse(addr)
        } else {
            ServeError::Bind { addr, source }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FingerprintError {
    #[error("no fingerprint registered for {0}")]
    NotFound(String),
}

/// Everything that can end the `autoserve` process with a failure.
#[derive(Debug, thiserror::Error)]
pub enum AutoserveError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Serve(#[from] ServeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("watch.delay_ms = 0 is out of range".into());
        assert_eq!(
            err.to_string(),
            "config validation error: watch.delay_ms = 0 is out of range"
        );
    }

    #[test]
    fn serve_error_display() {
        let addr: SocketAddr = "127.0.0.1:8000".parse().unwrap();

        let err = ServeError::AddrInUse(addr);
        assert_eq!(err.to_string(), "address 127.0.0.1:8000 is already in use");

        let err = ServeError::AlreadyBound(addr);
        assert_eq!(
            err.to_string(),
            "a listener is already bound to 127.0.0.1:8000"
        );

        let err = ServeError::RootNotFound(PathBuf::from("/srv/missing"));
        assert_eq!(err.to_string(), "root directory not found: /srv/missing");
    }

    #[test]
    fn from_bind_classifies_addr_in_use() {
        let addr: SocketAddr = "127.0.0.1:8000".parse().unwrap();

        let in_use = std::io::Error::new(std::io::ErrorKind::AddrInUse, "taken");
        assert!(matches!(
            ServeError::from_bind(addr, in_use),
            ServeError::AddrInUse(a) if a == addr
        ));

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "privileged");
        let err = ServeError::from_bind(addr, denied);
        assert!(matches!(err, ServeError::Bind { .. }));
        assert!(err.to_string().contains("privileged"));
    }

    #[test]
    fn autoserve_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: AutoserveError = config_err.into();
        assert!(matches!(err, AutoserveError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn autoserve_error_from_serve() {
        let addr: SocketAddr = "127.0.0.1:9000".parse().unwrap();
        let err: AutoserveError = ServeError::AddrInUse(addr).into();
        assert!(matches!(err, AutoserveError::Serve(_)));
        assert!(err.to_string().contains("9000"));
    }

    #[test]
    fn config_io_error_names_path_and_cause() {
        let err = ConfigError::Io {
            path: PathBuf::from("/etc/autoserve/config.toml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "config I/O error at /etc/autoserve/config.toml: denied"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn fingerprint_error_display() {
        let err = FingerprintError::NotFound("\"index.html\"".into());
        assert_eq!(
            err.to_string(),
            "no fingerprint registered for \"index.html\""
        );
    }
}
