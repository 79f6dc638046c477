//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tower-http layers)
//!     → middleware.rs (JSON body limit)
//!     → request.rs (request ID, query parsing, query-then-header lookup)
//!     → handlers.rs (route logic)
//!     → response.rs (fixed bodies)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{parse_query, resolve, MakeRequestUuid, X_REQUEST_ID};
pub use server::{build_router, HttpServer};
