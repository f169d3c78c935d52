//! Persistent type store and query surface for Vellum.
//!
//! The [`Store`] is an immutable snapshot of the whole type database:
//! cloning is O(1) thanks to structural sharing, so the synchronization
//! engine can run a batch against a private clone and either publish it
//! or drop it, and readers always observe a fully committed state.
//!
//! This crate also defines the synchronization-package input types and
//! the peripheral metadata tables (file statuses, directory infos, type
//! annotations, property-editor paths).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod declarations;
mod metadata;
mod modules;
mod package;
mod query;
mod store;

pub use declarations::{
    AccessSemantics, EnumerationDeclaration, EnumeratorDeclaration, ExportedTypeName,
    FunctionDeclaration, ParameterDeclaration, PropertyBinding, PropertyDeclaration,
    PropertyTraits, Resolution, SignalDeclaration, TypeReference, TypeTraits,
};
pub use modules::{Module, ModuleStore};
pub use package::{
    DirectoryInfo, FileKind, FileStatus, Import, ModuleExportedImport, PropertyEditorPath,
    SynchronizationPackage, TypeAnnotation, TypeDeclaration,
};
pub use query::select_best_export;
pub use store::{PropertyRecord, ReferenceSite, ReferenceSlot, Store, TypeRecord};
