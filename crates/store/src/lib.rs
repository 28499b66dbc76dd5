//! Object lifecycle store for capstore
//!
//! Objects move through `absent -> reserved -> complete -> absent`. Reserved
//! objects exist but are never readable, so a partially uploaded object can
//! not be observed as complete.

pub mod entry;
pub mod store;

pub use entry::{ObjectEntry, ObjectState};
pub use store::ObjectStore;
