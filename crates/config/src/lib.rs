//! Configuration for the capstore signing authority
//!
//! This crate resolves where the authority lives (its origin), which key it
//! signs with, how long tokens stay valid and which verb table is active.

pub mod config;
pub mod loader;


pub use config::*;
