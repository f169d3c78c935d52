//! Error types for Vellum synchronization.
//!
//! Uses `thiserror`. Every variant here is fatal to its batch: the store
//! rolls back and nothing is committed. Recoverable resolution failures
//! are not errors at all; they are reported through the notifier and the
//! reference is stored as unresolved.

use thiserror::Error;

use crate::ids::ModuleId;
use crate::version::Version;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for synchronization operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a prototype-cycle error.
    #[must_use]
    pub fn prototype_cycle(type_name: impl Into<String>) -> Self {
        Self::new(ErrorKind::PrototypeCycle {
            type_name: type_name.into(),
        })
    }

    /// Creates an extension-cycle error.
    #[must_use]
    pub fn extension_cycle(type_name: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExtensionCycle {
            type_name: type_name.into(),
        })
    }

    /// Creates an alias-cycle error.
    #[must_use]
    pub fn alias_cycle(path: impl Into<String>) -> Self {
        Self::new(ErrorKind::AliasCycle { path: path.into() })
    }

    /// Creates an unknown-module error.
    #[must_use]
    pub fn unknown_module(module: ModuleId) -> Self {
        Self::new(ErrorKind::UnknownModule { module })
    }

    /// Creates a duplicate-export error.
    #[must_use]
    pub fn duplicate_exported_type(
        module: ModuleId,
        name: impl Into<String>,
        version: Version,
    ) -> Self {
        Self::new(ErrorKind::DuplicateExportedType {
            module,
            name: name.into(),
            version,
        })
    }

    /// Creates an invalid-source-id error for a type declaration.
    #[must_use]
    pub fn type_has_invalid_source(type_name: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeHasInvalidSourceId {
            type_name: type_name.into(),
        })
    }
}

/// Categorized fatal error kinds.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum ErrorKind {
    /// A type is its own prototype ancestor.
    #[error("prototype chain of '{type_name}' contains a cycle")]
    PrototypeCycle {
        /// The type whose chain cycles.
        type_name: String,
    },

    /// A type is its own extension ancestor.
    #[error("extension chain of '{type_name}' contains a cycle")]
    ExtensionCycle {
        /// The type whose chain cycles.
        type_name: String,
    },

    /// An alias chain loops back onto itself.
    #[error("alias chain '{path}' contains a cycle")]
    AliasCycle {
        /// The dotted alias path that cycles.
        path: String,
    },

    /// An exported-type declaration names a module that was never interned.
    #[error("exported type references unknown module {module:?}")]
    UnknownModule {
        /// The offending module id.
        module: ModuleId,
    },

    /// Two types claim the same (module, name, version) export.
    #[error("exported type '{name}' version {version} already exists in module {module:?}")]
    DuplicateExportedType {
        /// Module of the export.
        module: ModuleId,
        /// Exported name.
        name: String,
        /// Export version.
        version: Version,
    },

    /// A type declaration carries the null source id.
    #[error("type '{type_name}' has an invalid source id")]
    TypeHasInvalidSourceId {
        /// The offending type name.
        type_name: String,
    },

    /// A file-status row carries the null source id.
    #[error("file status has an invalid source id")]
    FileStatusHasInvalidSourceId,

    /// A directory-info row carries a null source id.
    #[error("directory info has an invalid source id")]
    DirectoryInfoHasInvalidSourceId,

    /// An exported-type declaration carries an empty name.
    #[error("type '{type_name}' declares an exported type without a name")]
    MalformedExportedName {
        /// The type declaring the export.
        type_name: String,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}
