//! Plain-text greeting server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request ──▶ listener ──▶ middleware ──▶ router ──▶ handler
//!                                    (request id,     │
//!                                     trace, timeout, ├─ GET /     → "Hello world!"
//!                                     body limit)     ├─ GET /me   → fixed identity
//!                                                     ├─ GET /usr  → username greeting / 401
//!                                                     └─ otherwise → 404
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
