//! HTTP surface for `capstore`.
//!
//! Two route families are served:
//!
//! - `/objects/:name`: the two-phase object store, guarded by capability
//!   tokens presented in the `Authorization` header or the `token` query
//!   parameter.
//! - `/sign-object-url/operation/:operation/name/:name`: mints signed URLs
//!   for the active vocabulary.
//!
//! The transport-free [`ObjectService`] holds the request pipeline, so the
//! same decisions can be driven without HTTP.

pub mod error;
pub mod routes;
pub mod server;
pub mod service;

pub use error::ApiError;
pub use routes::{router, AppState};
pub use server::ObjectServer;
pub use service::{ObjectOutcome, ObjectService};
