//! Identifier newtypes for sources, modules, types, and declarations.
//!
//! Source and module identifiers are interned and permanent once handed
//! out. Type and property-declaration identifiers are allocated by the
//! store, preserved across in-place updates, and never reused after the
//! identified row is deleted.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Interned identifier of a source file.
///
/// Handed out by [`SourcePathCache`](crate::SourcePathCache) and stable for
/// the lifetime of the cache. A null sentinel exists so that malformed
/// input rows can be rejected during batch validation.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceId(pub(crate) u32);

impl SourceId {
    /// Creates a source id from a raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the sentinel "no source" value.
    #[must_use]
    pub const fn null() -> Self {
        Self(u32::MAX)
    }

    /// Returns true if this is the null sentinel.
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u32::MAX
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "SourceId(null)")
        } else {
            write!(f, "SourceId({})", self.0)
        }
    }
}

/// Interned identifier of a parent-directory context.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceContextId(pub(crate) u32);

impl SourceContextId {
    /// Creates a source-context id from a raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the sentinel "no context" value.
    #[must_use]
    pub const fn null() -> Self {
        Self(u32::MAX)
    }

    /// Returns true if this is the null sentinel.
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u32::MAX
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for SourceContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "SourceContextId(null)")
        } else {
            write!(f, "SourceContextId({})", self.0)
        }
    }
}

/// What namespace a module name lives in.
///
/// The same name interned under different kinds yields distinct modules.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ModuleKind {
    /// A component-document library (importable by documents).
    QmlLibrary,
    /// A native library registered from compiled code.
    CppLibrary,
    /// A directory treated as an implicit module.
    PathLibrary,
}

/// Interned identifier of a (name, kind) module pair.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModuleId(pub(crate) u32);

impl ModuleId {
    /// Creates a module id from a raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleId({})", self.0)
    }
}

/// Store-allocated identifier of a type row.
///
/// Preserved when the same (source, name) pair is re-synchronized; retired
/// for good when the type is deleted.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeId(pub(crate) u64);

impl TypeId {
    /// Creates a type id from a raw index.
    #[must_use]
    pub const fn new(index: u64) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Store-allocated identifier of a property declaration row.
///
/// Like [`TypeId`], preserved across in-place updates of the same
/// (type, property name) pair.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertyDeclarationId(pub(crate) u64);

impl PropertyDeclarationId {
    /// Creates a property-declaration id from a raw index.
    #[must_use]
    pub const fn new(index: u64) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for PropertyDeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyDeclarationId({})", self.0)
    }
}
