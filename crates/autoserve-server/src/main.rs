//! autoserve: static file server for local development.
//!
//! Serves a directory over HTTP and polls it for changes. Whenever a file
//! is added or modified the listener is torn down and bound again on the
//! same address, so the next request sees a fresh server.

mod cli;
mod static_files;

use std::process::ExitCode;

use autoserve_common::{EventBus, ServeError};
use autoserve_config::AutoserveConfig;
use autoserve_watch::{WatchLoop, WatchSummary};
use tokio::sync::{broadcast, watch};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

use crate::static_files::StaticFileServer;

fn init_logging(directive: &str) {
    let directive = directive.parse::<Directive>().unwrap_or_else(|_| {
        eprintln!("invalid log level '{directive}', falling back to info");
        LevelFilter::INFO.into()
    });
    // A subscriber may already be installed when running under test.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .try_init();
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl+C: {e}");
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
                tracing::warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, stopping"),
        () = terminate => tracing::info!("Received SIGTERM, stopping"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(cli::parse()).await {
        Ok(summary) => {
            tracing::info!(
                polls = summary.polls,
                restarts = summary.restarts,
                "Shutdown complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: cli::Args) -> autoserve_common::Result<WatchSummary> {
    // Config is read before logging is up so its level can seed the filter.
    let loaded = autoserve_config::load_config_from(args.config.as_deref());
    let mut config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => AutoserveConfig::default(),
    };

    let log_directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.directive().to_string());
    init_logging(&log_directive);

    tracing::info!("autoserve v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = loaded {
        if args.config.is_some() {
            return Err(e.into());
        }
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    args.apply_overrides(&mut config);
    autoserve_config::validate(&config)?;
    if !config.server.root.is_dir() {
        return Err(ServeError::RootNotFound(config.server.root.clone()).into());
    }

    let events = EventBus::default();
    let mut status = events.subscribe();
    let reporter = tokio::spawn(async move {
        loop {
            match status.recv().await {
                Ok(event) => tracing::info!("{event}"),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!("status output lagged by {n} events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = stop_tx.send(true);
    });

    let watch_loop = WatchLoop::new(StaticFileServer, &config.server, config.watch.clone(), events);
    let result = watch_loop.run(stop_rx).await;

    // The loop owned the last sender; let the reporter drain and exit.
    let _ = reporter.await;

    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoserve_common::{AutoserveError, ConfigError};
    use clap::Parser;

    #[tokio::test]
    async fn missing_explicit_config_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let args = cli::Args::try_parse_from([
            "autoserve",
            "--config",
            path.to_str().unwrap(),
        ])
        .unwrap();

        let err = run(args).await.unwrap_err();
        assert!(matches!(
            err,
            AutoserveError::Config(ConfigError::FileNotFound(_))
        ));
    }

    #[tokio::test]
    async fn invalid_delay_is_a_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();
        let args = cli::Args::try_parse_from([
            "autoserve",
            "--config",
            path.to_str().unwrap(),
            "--delay-ms",
            "0",
        ])
        .unwrap();

        let err = run(args).await.unwrap_err();
        assert!(matches!(
            err,
            AutoserveError::Config(ConfigError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn missing_root_is_a_serve_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();
        let root = dir.path().join("no-such-site");
        let args = cli::Args::try_parse_from([
            "autoserve",
            "--config",
            path.to_str().unwrap(),
            "--root",
            root.to_str().unwrap(),
        ])
        .unwrap();

        let err = run(args).await.unwrap_err();
        assert!(matches!(
            err,
            AutoserveError::Serve(ServeError::RootNotFound(ref missing)) if *missing == root
        ));
    }
}
