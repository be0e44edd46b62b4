//! Client side of the campus event portal.
//!
//! Everything here is independent of the browser: the REST round trip goes
//! through [`Transport`] and every user facing effect (notification, modal
//! input, view update) goes through [`Ui`]. The web frontend binds both to the
//! DOM, tests bind them to in-memory fakes.

pub mod client;
pub mod error;
pub mod form;
pub mod model;
pub mod transport;
pub mod ui;
pub mod view;

#[cfg(test)]
mod testing;

pub use client::EventPortalClient;
pub use error::PortalError;
pub use transport::{Method, Reply, Request, Transport};
pub use ui::{MessageSlot, ReportSlot, Ui, ViewUpdate};
