//! Vellum - Incremental project type-storage
//!
//! This crate re-exports all layers of the Vellum system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: vellum_engine     — Synchronization, resolution, relinking
//! Layer 1: vellum_storage    — Persistent type store and query surface
//! Layer 0: vellum_foundation — Ids, versions, path cache, errors
//! ```

pub use vellum_engine as engine;
pub use vellum_foundation as foundation;
pub use vellum_storage as storage;
