use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use tokio::sync::broadcast;

/// Status events published by the watch loop and listener lifecycle.
///
/// The `Display` impl renders each event as the status line shown to the
/// user.
#[derive(Debug, Clone)]
pub enum Event {
    /// `host` is the name the listener was configured with, `addr` what
    /// it resolved and bound to.
    ListenerStarted { host: String, addr: SocketAddr },
    Watching { files: usize },
    FilesChanged { paths: Vec<PathBuf> },
    ListenerRestarted { addr: SocketAddr },
    ListenerStopped { addr: SocketAddr },
    Shutdown,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::ListenerStarted { host, addr } => write!(
                f,
                "Starting server using host {host} on port {}",
                addr.port()
            ),
            Event::Watching { files } => write!(f, "Watching {files} files."),
            Event::FilesChanged { paths } => {
                let count = paths.len();
                let (noun, verb) = if count == 1 {
                    ("file", "has")
                } else {
                    ("files", "have")
                };
                write!(f, "{count} {noun} {verb} changed. Restarting server")
            }
            Event::ListenerRestarted { addr } => write!(f, "Server restarted on {addr}"),
            Event::ListenerStopped { addr } => write!(f, "Server on {addr} stopped"),
            Event::Shutdown => write!(f, "Shutting down"),
        }
    }
}

pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: Event) -> usize {
        match self.sender.send(event) {
            Ok(count) => count,
            Err(broadcast::error::SendError(event)) => {
                tracing::trace!(%event, "no subscribers for event");
                0
            }
        }
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> SocketAddr {
        "127.0.0.1:8000".parse().unwrap()
    }

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(Event::Watching { files: 3 });

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, Event::Watching { files: 3 }));
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(Event::Shutdown);

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert!(matches!(e1, Event::Shutdown));
        assert!(matches!(e2, Event::Shutdown));
    }

    #[tokio::test]
    async fn clones_share_one_channel() {
        let bus = EventBus::new(16);
        let publisher = bus.clone();
        let mut rx = bus.subscribe();

        publisher.publish(Event::ListenerRestarted { addr: addr() });

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, Event::ListenerRestarted { addr: a } if a == addr()));
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let bus = EventBus::new(16);
        let count = bus.publish(Event::Shutdown);
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn publish_returns_subscriber_count() {
        let bus = EventBus::new(16);
        let _rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();
        let _rx3 = bus.subscribe();

        let count = bus.publish(Event::Shutdown);
        assert_eq!(count, 3);
    }

    #[test]
    fn status_lines_name_host_port_and_count() {
        let started = Event::ListenerStarted {
            host: "127.0.0.1".into(),
            addr: addr(),
        };
        assert_eq!(
            started.to_string(),
            "Starting server using host 127.0.0.1 on port 8000"
        );

        // The configured name is shown, not the address it resolved to.
        let named = Event::ListenerStarted {
            host: "localhost".into(),
            addr: addr(),
        };
        assert_eq!(
            named.to_string(),
            "Starting server using host localhost on port 8000"
        );

        assert_eq!(
            Event::Watching { files: 12 }.to_string(),
            "Watching 12 files."
        );
    }

    #[test]
    fn files_changed_pluralizes() {
        let one = Event::FilesChanged {
            paths: vec![PathBuf::from("a.txt")],
        };
        assert_eq!(one.to_string(), "1 file has changed. Restarting server");

        let two = Event::FilesChanged {
            paths: vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")],
        };
        assert_eq!(two.to_string(), "2 files have changed. Restarting server");
    }
}
