//! HTTP API for the backup monitor
//!
//! Static serving of the published page is wired up in `main`; this module
//! carries the health, status, and listener plumbing around it.

mod health;
mod listener;
mod responses;
mod rest;

pub use health::*;
pub use listener::*;
pub use responses::*;
pub use rest::*;
