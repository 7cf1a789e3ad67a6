//! Operations console client library
//!
//! Building blocks for the holding company's operations console: a JSON
//! client for the REST backend, a sortable table model, the polling event
//! feed with persisted read state, and the per-resource view controllers.

pub mod api;
pub mod confirm;
pub mod error;
pub mod inbox;
pub mod model;
pub mod response;
pub mod router;
pub mod store;
pub mod table;
pub mod toast;
pub mod views;

mod client;

pub use client::*;
pub use response::Body;
pub use response::ListEnvelope;
