//! Core domain types, errors, and constants for `capstore`.
//!
//! Everything the authorization pipeline and the object store agree on lives
//! here, so the other crates can depend on one small, stable vocabulary.
//!
//! ## Key Components
//!
//! - **`errors`**: The `Error` enum and `Result` alias. Each variant is one
//!   entry of the rejection taxonomy and carries a stable code for the
//!   transport layer.
//! - **`types`**: Logical operations, transport verbs, the two verb tables,
//!   the inbound request descriptor and the shared signing key.
//! - **`constants`**: Resource tags, token limits and environment variable
//!   names.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result},
    types::*,
};
