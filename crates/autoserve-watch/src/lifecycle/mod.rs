//! Ownership of the single serving listener.
//!
//! The listener is started, stopped and restarted only through
//! [`ListenerLifecycle`]. File serving itself is injected through the
//! [`Servable`] trait, so any server that can bind an address and run as a
//! [`Worker`] task can be swapped in.

mod listener;
mod worker;


pub use listener::{ListenerHandle, ListenerLifecycle};
pub use worker::{Servable, Worker};
