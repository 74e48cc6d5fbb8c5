//! `sharebridge` — native marshalling bridge for share payloads.
//!
//! This crate is the native side of a managed-runtime FFI boundary. One
//! call carries a batch of heterogeneous attachment records (file
//! references, inline text, Wi-Fi credentials) across the boundary; the
//! bridge copies the payload into owned memory, validates it, and hands it
//! to the embedding application's sink. Geographic helpers (coordinates,
//! places, great-circle distance) ride along on the same surface.
//!
//! The [`ffi`] module is the C ABI contract; everything else is the safe
//! Rust API the native side builds on.

pub mod config;
pub mod error;
pub mod ffi;
pub mod marshal;
pub mod model;
