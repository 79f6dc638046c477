//! Response bodies.
//!
//! All routes answer with `text/plain; charset=utf-8`. The greeting echoes the
//! client-supplied username verbatim; switching this to an HTML content type
//! would require escaping it first.

/// Body of `GET /`.
pub const HELLO_WORLD: &str = "Hello world!\n";

/// Body of `GET /me`. The trailing space before the newline is part of the contract.
pub const IDENTITY: &str = "dicoding_username : firmansyw30 \n";

/// Body of a `GET /usr` rejection. No trailing newline.
pub const NO_USERNAME: &str = "Unauthorized: No username provided";

/// Body of a successful `GET /usr`.
pub fn greeting(username: &str) -> String {
    format!("Hello, {username}!\n")
}
