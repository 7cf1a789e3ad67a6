//! Resource calls against the operations backend
//!
//! Each module adds the calls for one resource group to [`OpsClient`].
//! Paths are relative to the client's base URL.
//!
//! [`OpsClient`]: crate::OpsClient

mod assets;
mod auth;
mod events;
mod maintenance;
mod planning;
mod reports;
mod supply;
mod users;

pub use events::DEFAULT_EVENT_LIMIT;
