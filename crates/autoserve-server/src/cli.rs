use autoserve_config::{AutoserveConfig, HashSource};
use clap::Parser;
use std::path::PathBuf;

/// autoserve — serve a directory over HTTP and restart whenever a file changes.
#[derive(Parser, Debug)]
#[command(name = "autoserve", version, about)]
pub struct Args {
    /// The root directory to serve and monitor.
    #[arg(short = 'r', long)]
    pub root: Option<PathBuf>,

    /// The port to use.
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// The host name to bind.
    #[arg(short = 'n', long = "host")]
    pub host: Option<String>,

    /// Milliseconds to wait between polls.
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// What file fingerprints are computed from (mtime or content).
    #[arg(long)]
    pub hash_source: Option<HashSource>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Overlay every flag that was given on top of the file config.
    pub fn apply_overrides(&self, config: &mut AutoserveConfig) {
        if let Some(root) = &self.root {
            config.server.root = root.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(delay_ms) = self.delay_ms {
            config.watch.delay_ms = delay_ms;
        }
        if let Some(hash_source) = self.hash_source {
            config.watch.hash_source = hash_source;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
