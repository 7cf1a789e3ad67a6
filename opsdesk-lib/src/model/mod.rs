//! Typed models for backend resources

mod access;
mod assets;
mod event;
mod maintenance;
mod planning;
mod report;
mod supply;
pub mod timestamp;

pub use access::*;
pub use assets::*;
pub use event::*;
pub use maintenance::*;
pub use planning::*;
pub use report::*;
pub use supply::*;
