//! Core types and the import/merge engine for the koyomi anime catalog.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing heavier than
//! `chrono` and `serde`.

// Native async-in-trait is used for the store seam; the advisory lint about
// `Send` bounds on the returned futures does not apply (they are spelled out).
#![allow(async_fn_in_trait)]

pub mod entry;
pub mod error;
pub mod import;
pub mod store;

pub use error::{Error, Result};
