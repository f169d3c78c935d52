//! Declaration payloads shared by package input and stored records.
//!
//! A [`TypeReference`] is kept exactly as authored; the outcome of running
//! it through the resolver is a separate [`Resolution`] so that a failed
//! lookup is a distinguished stored value, never an absence, and can be
//! retried later without re-reading the declaring document.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use vellum_foundation::{ModuleId, TypeId, Version};

/// A type-name reference as authored in a source document.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TypeReference {
    /// No reference was authored (e.g. a type without a prototype).
    #[default]
    None,
    /// An unqualified name, resolved through the declaring source's
    /// visible imports.
    Imported(String),
    /// A name bound to one explicit (module, version) import.
    QualifiedImported {
        /// The referenced name.
        name: String,
        /// The module the name is qualified with.
        module: ModuleId,
        /// The requested version.
        version: Version,
    },
    /// An already-resolved identifier, used internally after resolution.
    Resolved(TypeId),
}

impl TypeReference {
    /// Creates an unqualified reference.
    #[must_use]
    pub fn imported(name: impl Into<String>) -> Self {
        Self::Imported(name.into())
    }

    /// Creates a module-qualified reference.
    #[must_use]
    pub fn qualified(name: impl Into<String>, module: ModuleId, version: Version) -> Self {
        Self::QualifiedImported {
            name: name.into(),
            module,
            version,
        }
    }

    /// Returns true if no reference was authored.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The literal name this reference depends on, if any.
    ///
    /// Used to key the reverse-dependency index for relinking.
    #[must_use]
    pub fn literal_name(&self) -> Option<&str> {
        match self {
            Self::Imported(name) | Self::QualifiedImported { name, .. } => Some(name),
            Self::None | Self::Resolved(_) => None,
        }
    }
}

/// The stored outcome of resolving a [`TypeReference`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Resolution {
    /// Nothing was authored, so there is nothing to resolve.
    #[default]
    None,
    /// The reference resolved to a concrete type.
    Resolved(TypeId),
    /// The reference exists but currently cannot be matched.
    Unresolved,
}

impl Resolution {
    /// Returns the concrete type id, if resolved.
    #[must_use]
    pub fn type_id(self) -> Option<TypeId> {
        match self {
            Self::Resolved(id) => Some(id),
            Self::None | Self::Unresolved => None,
        }
    }

    /// Returns true for the unresolved sentinel.
    #[must_use]
    pub fn is_unresolved(self) -> bool {
        matches!(self, Self::Unresolved)
    }

    /// Returns true if a concrete type was found.
    #[must_use]
    pub fn is_resolved(self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Reference/value semantics of a type.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AccessSemantics {
    /// Unspecified.
    #[default]
    None,
    /// Reference semantics (identity, heap-like).
    Reference,
    /// Value semantics (copied on assignment).
    Value,
    /// A sequence/container of values.
    Sequence,
}

/// Trait set of a type declaration.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeTraits {
    /// Reference/value semantics.
    pub access: AccessSemantics,
    /// Whether the type comes from a standalone component document.
    pub is_file_component: bool,
}

impl TypeTraits {
    /// Traits for a plain reference type.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            access: AccessSemantics::Reference,
            is_file_component: false,
        }
    }

    /// Traits for a value type.
    #[must_use]
    pub fn value() -> Self {
        Self {
            access: AccessSemantics::Value,
            is_file_component: false,
        }
    }
}

/// Trait flags of a property declaration.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertyTraits {
    /// The property holds a list of values.
    pub is_list: bool,
    /// The property cannot be written.
    pub is_read_only: bool,
    /// The property holds a pointer to an object.
    pub is_pointer: bool,
}

impl PropertyTraits {
    /// Traits for a list property.
    #[must_use]
    pub fn list() -> Self {
        Self {
            is_list: true,
            ..Self::default()
        }
    }

    /// Traits for a read-only property.
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            is_read_only: true,
            ..Self::default()
        }
    }
}

/// A name under which a type is visible to importers.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExportedTypeName {
    /// The exporting module.
    pub module: ModuleId,
    /// The exported name.
    pub name: String,
    /// The export version; [`Version::none`] marks a versionless export.
    pub version: Version,
}

impl ExportedTypeName {
    /// Creates a versionless export.
    #[must_use]
    pub fn new(module: ModuleId, name: impl Into<String>) -> Self {
        Self {
            module,
            name: name.into(),
            version: Version::none(),
        }
    }

    /// Creates a versioned export.
    #[must_use]
    pub fn versioned(module: ModuleId, name: impl Into<String>, version: Version) -> Self {
        Self {
            module,
            name: name.into(),
            version,
        }
    }
}

/// What a property declaration binds to.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PropertyBinding {
    /// A direct declaration carrying the property's type.
    Type(TypeReference),
    /// An alias onto another property, possibly through a nested tail.
    Alias {
        /// Reference to the type owning the target property.
        target: TypeReference,
        /// Name of the target property on the resolved target type.
        property: String,
        /// Optional nested property on the type the chain resolves to.
        tail: Option<String>,
    },
}

impl PropertyBinding {
    /// Returns true if this binding is an alias.
    #[must_use]
    pub fn is_alias(&self) -> bool {
        matches!(self, Self::Alias { .. })
    }

    /// The authored type reference inside the binding.
    #[must_use]
    pub fn type_reference(&self) -> &TypeReference {
        match self {
            Self::Type(reference) | Self::Alias {
                target: reference, ..
            } => reference,
        }
    }
}

/// A property declaration as authored.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertyDeclaration {
    /// Property name, unique within its type.
    pub name: String,
    /// Trait flags.
    pub traits: PropertyTraits,
    /// What the property binds to.
    pub binding: PropertyBinding,
}

impl PropertyDeclaration {
    /// Creates a direct property declaration.
    #[must_use]
    pub fn typed(name: impl Into<String>, reference: TypeReference) -> Self {
        Self {
            name: name.into(),
            traits: PropertyTraits::default(),
            binding: PropertyBinding::Type(reference),
        }
    }

    /// Creates an alias declaration without a tail.
    #[must_use]
    pub fn aliased(
        name: impl Into<String>,
        target: TypeReference,
        property: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            traits: PropertyTraits::default(),
            binding: PropertyBinding::Alias {
                target,
                property: property.into(),
                tail: None,
            },
        }
    }

    /// Creates an indirect alias declaration with a tail.
    #[must_use]
    pub fn aliased_tail(
        name: impl Into<String>,
        target: TypeReference,
        property: impl Into<String>,
        tail: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            traits: PropertyTraits::default(),
            binding: PropertyBinding::Alias {
                target,
                property: property.into(),
                tail: Some(tail.into()),
            },
        }
    }

    /// Sets the trait flags.
    #[must_use]
    pub fn with_traits(mut self, traits: PropertyTraits) -> Self {
        self.traits = traits;
        self
    }
}

/// A parameter of a function or signal.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParameterDeclaration {
    /// Parameter name.
    pub name: String,
    /// Literal type name of the parameter.
    pub type_name: String,
    /// Trait flags.
    pub traits: PropertyTraits,
}

impl ParameterDeclaration {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            traits: PropertyTraits::default(),
        }
    }
}

/// A function declaration on a type.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionDeclaration {
    /// Function name.
    pub name: String,
    /// Literal return type name; empty for none.
    pub return_type_name: String,
    /// Ordered parameters.
    pub parameters: Vec<ParameterDeclaration>,
}

impl FunctionDeclaration {
    /// Creates a function declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, return_type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type_name: return_type_name.into(),
            parameters: Vec::new(),
        }
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterDeclaration) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// A signal declaration on a type.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignalDeclaration {
    /// Signal name.
    pub name: String,
    /// Ordered parameters.
    pub parameters: Vec<ParameterDeclaration>,
}

impl SignalDeclaration {
    /// Creates a signal declaration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterDeclaration) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// A single enumerator inside an enumeration.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumeratorDeclaration {
    /// Enumerator name.
    pub name: String,
    /// Explicit value, if authored.
    pub value: Option<i64>,
}

impl EnumeratorDeclaration {
    /// Creates an enumerator without an explicit value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Creates an enumerator with an explicit value.
    #[must_use]
    pub fn with_value(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
        }
    }
}

/// An enumeration declaration on a type.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumerationDeclaration {
    /// Enumeration name.
    pub name: String,
    /// Ordered enumerators.
    pub enumerators: Vec<EnumeratorDeclaration>,
}

impl EnumerationDeclaration {
    /// Creates an enumeration declaration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enumerators: Vec::new(),
        }
    }

    /// Adds an enumerator.
    #[must_use]
    pub fn with_enumerator(mut self, enumerator: EnumeratorDeclaration) -> Self {
        self.enumerators.push(enumerator);
        self
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "(none)"),
            Self::Imported(name) => write!(f, "{name}"),
            Self::QualifiedImported {
                name,
                module,
                version,
            } => write!(f, "{name}@{module:?} {version}"),
            Self::Resolved(id) => write!(f, "{id:?}"),
        }
    }
}
