//! Core domain types for the `capstore` application.
//!
//! ## Organization
//!
//! - **`operations`**: Logical operations, transport verbs and the verb tables
//!   that connect them
//! - **`request`**: The inbound request descriptor handed over by the
//!   transport layer
//! - **`security`**: The shared signing key

pub mod operations;
pub mod request;
pub mod security;

// Re-export all public types for convenient access
pub use operations::*;
pub use request::*;
pub use security::*;
