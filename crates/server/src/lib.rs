//! HTTP surface for the marquee catalog.
//!
//! Exposed as a library so integration tests can build the router
//! in-process; the `marquee` binary in `main.rs` is a thin wrapper.

pub mod api;
pub mod metrics;
pub mod state;
