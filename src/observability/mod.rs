//! Observability subsystem.
//!
//! Request spans come from `tower_http::trace::TraceLayer` (see `http::server`)
//! and carry the request ID; this module owns subscriber setup.

pub mod logging;

pub use logging::init_logging;
