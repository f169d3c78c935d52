//! Identifier types, versions, persistent collections, and errors for Vellum.
//!
//! This crate provides:
//! - [`SourceId`] / [`SourceContextId`] - Interned file and directory identifiers
//! - [`ModuleId`] / [`ModuleKind`] - Interned module identifiers
//! - [`TypeId`] / [`PropertyDeclarationId`] - Store-allocated identifiers
//! - [`Version`] - Module export versions with the matching rule
//! - [`SourcePathCache`] - The append-only path interner
//! - [`Error`] - Fatal synchronization errors
//! - Persistent collections ([`VlMap`], [`VlSet`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod collections;
mod error;
mod ids;
mod path_cache;
mod version;

pub use collections::{VlMap, VlSet};
pub use error::{Error, ErrorKind, Result};
pub use ids::{ModuleId, ModuleKind, PropertyDeclarationId, SourceContextId, SourceId, TypeId};
pub use path_cache::SourcePathCache;
pub use version::Version;
