//! Core watch loop implementation.

use autoserve_common::{Event, EventBus, ServeError};
use autoserve_config::{ServerConfig, WatchConfig};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::lifecycle::{ListenerLifecycle, Servable};
use crate::observer::ChangeObserver;

/// Counters reported when [`WatchLoop::run`] returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchSummary {
    /// Completed observe passes, including the warm-up pass.
    pub polls: u64,
    /// Listener restarts triggered by changes.
    pub restarts: u64,
}

/// Per-run state. A new one is created on every call to `run`.
#[derive(Debug)]
struct WatchState {
    running: bool,
    warmed_up: bool,
}

/// Polls the root on a fixed delay and restarts the listener on change.
pub struct WatchLoop<S> {
    config: WatchConfig,
    observer: ChangeObserver,
    lifecycle: ListenerLifecycle<S>,
    events: EventBus,
}

impl<S: Servable> WatchLoop<S> {
    pub fn new(
        server: S,
        server_config: &ServerConfig,
        watch_config: WatchConfig,
        events: EventBus,
    ) -> Self {
        let observer = ChangeObserver::new(server_config.root.clone(), watch_config.hash_source);
        let lifecycle = ListenerLifecycle::from_config(server, server_config);
        Self::from_parts(watch_config, observer, lifecycle, events)
    }

    /// Assemble a loop from an already configured observer and lifecycle.
    pub fn from_parts(
        config: WatchConfig,
        observer: ChangeObserver,
        lifecycle: ListenerLifecycle<S>,
        events: EventBus,
    ) -> Self {
        Self {
            config,
            observer,
            lifecycle,
            events,
        }
    }

    /// Start the listener, then poll until `stop` becomes `true` (or its
    /// sender is dropped).
    ///
    /// The stop signal is checked once per iteration, so shutdown can lag
    /// by up to one delay plus one restart. The first pass only populates
    /// the fingerprint store. Changes found in any later pass restart the
    /// listener before the next pass begins. A failed restart ends the loop
    /// with that error. The listener is stopped on every exit path.
    ///
    /// Each pass runs on the blocking pool, so the serving worker keeps
    /// accepting during a scan on either runtime flavor.
    pub async fn run(self, stop: watch::Receiver<bool>) -> Result<WatchSummary, ServeError> {
        let WatchLoop {
            config,
            mut observer,
            mut lifecycle,
            events,
        } = self;

        let addr = lifecycle.start().await?;
        events.publish(Event::ListenerStarted {
            host: lifecycle.host().to_string(),
            addr,
        });

        let files = observer.file_count();
        debug!(
            files,
            root = %observer.root().display(),
            hash_source = %config.hash_source,
            "watching"
        );
        events.publish(Event::Watching { files });

        let mut state = WatchState {
            running: true,
            warmed_up: false,
        };
        let mut summary = WatchSummary::default();

        let outcome = loop {
            let stop_requested = *stop.borrow();
            if stop_requested || stop.has_changed().is_err() {
                state.running = false;
            }
            if !state.running {
                break Ok(());
            }

            let pass = tokio::task::spawn_blocking(move || {
                let changed = observer.observe();
                (observer, changed)
            })
            .await;
            let changed = match pass {
                Ok((returned, changed)) => {
                    observer = returned;
                    changed
                }
                Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                Err(e) => {
                    debug!(error = %e, "observe pass cancelled");
                    break Ok(());
                }
            };
            summary.polls += 1;

            if !changed.is_empty() && state.warmed_up {
                debug!(count = changed.len(), "files changed, restarting listener");
                events.publish(Event::FilesChanged {
                    paths: changed.into_iter().collect(),
                });

                match lifecycle.restart().await {
                    Ok(addr) => {
                        summary.restarts += 1;
                        events.publish(Event::ListenerRestarted { addr });
                    }
                    Err(e) => break Err(e),
                }
            } else if !state.warmed_up {
                debug!(files = changed.len(), "warm-up pass complete");
            }
            state.warmed_up = true;

            tokio::time::sleep(config.delay()).await;
        };

        if let Some(addr) = lifecycle.stop().await {
            events.publish(Event::ListenerStopped { addr });
        }
        events.publish(Event::Shutdown);
        info!(polls = summary.polls, restarts = summary.restarts, "watch loop finished");

        outcome.map(|()| summary)
    }
}
