//! The synchronization-package input types.
//!
//! A package describes the full replacement state for a set of "updated"
//! sources and modules. Rows for sources that are not listed in the
//! matching `updated_*` list are left untouched by the engine.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use vellum_foundation::{ModuleId, SourceId, Version};

use crate::declarations::{
    EnumerationDeclaration, ExportedTypeName, FunctionDeclaration, PropertyDeclaration,
    SignalDeclaration, TypeReference, TypeTraits,
};

/// A type declaration as extracted from one source document.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeDeclaration {
    /// Type name, unique within its source.
    pub name: String,
    /// The declaring source.
    pub source: SourceId,
    /// Trait set.
    pub traits: TypeTraits,
    /// Authored prototype reference.
    pub prototype: TypeReference,
    /// Authored extension reference.
    pub extension: TypeReference,
    /// Names under which the type is exported.
    pub exported_types: Vec<ExportedTypeName>,
    /// Ordered property declarations.
    pub property_declarations: Vec<PropertyDeclaration>,
    /// Ordered function declarations.
    pub function_declarations: Vec<FunctionDeclaration>,
    /// Ordered signal declarations.
    pub signal_declarations: Vec<SignalDeclaration>,
    /// Ordered enumeration declarations.
    pub enumeration_declarations: Vec<EnumerationDeclaration>,
    /// Name of the default property, if declared.
    pub default_property_name: Option<String>,
}

impl TypeDeclaration {
    /// Creates a minimal declaration with the given name and source.
    #[must_use]
    pub fn new(name: impl Into<String>, source: SourceId) -> Self {
        Self {
            name: name.into(),
            source,
            traits: TypeTraits::default(),
            prototype: TypeReference::None,
            extension: TypeReference::None,
            exported_types: Vec::new(),
            property_declarations: Vec::new(),
            function_declarations: Vec::new(),
            signal_declarations: Vec::new(),
            enumeration_declarations: Vec::new(),
            default_property_name: None,
        }
    }

    /// Sets the trait set.
    #[must_use]
    pub fn with_traits(mut self, traits: TypeTraits) -> Self {
        self.traits = traits;
        self
    }

    /// Sets the prototype reference.
    #[must_use]
    pub fn with_prototype(mut self, prototype: TypeReference) -> Self {
        self.prototype = prototype;
        self
    }

    /// Sets the extension reference.
    #[must_use]
    pub fn with_extension(mut self, extension: TypeReference) -> Self {
        self.extension = extension;
        self
    }

    /// Adds an exported name.
    #[must_use]
    pub fn with_export(mut self, export: ExportedTypeName) -> Self {
        self.exported_types.push(export);
        self
    }

    /// Adds a property declaration.
    #[must_use]
    pub fn with_property(mut self, property: PropertyDeclaration) -> Self {
        self.property_declarations.push(property);
        self
    }

    /// Adds a function declaration.
    #[must_use]
    pub fn with_function(mut self, function: FunctionDeclaration) -> Self {
        self.function_declarations.push(function);
        self
    }

    /// Adds a signal declaration.
    #[must_use]
    pub fn with_signal(mut self, signal: SignalDeclaration) -> Self {
        self.signal_declarations.push(signal);
        self
    }

    /// Adds an enumeration declaration.
    #[must_use]
    pub fn with_enumeration(mut self, enumeration: EnumerationDeclaration) -> Self {
        self.enumeration_declarations.push(enumeration);
        self
    }

    /// Declares the default property.
    #[must_use]
    pub fn with_default_property(mut self, name: impl Into<String>) -> Self {
        self.default_property_name = Some(name.into());
        self
    }
}

/// A source's declared visibility of one module at one version.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Import {
    /// The imported module.
    pub module: ModuleId,
    /// The requested version.
    pub version: Version,
    /// The importing source.
    pub source: SourceId,
}

impl Import {
    /// Creates an import row.
    #[must_use]
    pub const fn new(module: ModuleId, version: Version, source: SourceId) -> Self {
        Self {
            module,
            version,
            source,
        }
    }
}

/// A module's re-export of another module's visibility.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModuleExportedImport {
    /// The module whose importers gain visibility.
    pub module: ModuleId,
    /// The module being re-exported.
    pub exported_module: ModuleId,
    /// Fixed version of the re-export; ignored when auto-versioned.
    pub version: Version,
    /// When set, the re-export adopts the version of whichever import
    /// activated it.
    pub is_auto_version: bool,
}

impl ModuleExportedImport {
    /// Creates an auto-versioned re-export edge.
    #[must_use]
    pub const fn auto(module: ModuleId, exported_module: ModuleId) -> Self {
        Self {
            module,
            exported_module,
            version: Version::none(),
            is_auto_version: true,
        }
    }

    /// Creates a fixed-version re-export edge.
    #[must_use]
    pub const fn fixed(module: ModuleId, exported_module: ModuleId, version: Version) -> Self {
        Self {
            module,
            exported_module,
            version,
            is_auto_version: false,
        }
    }
}

/// Modification tokens of a source file.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FileStatus {
    /// The described source.
    pub source: SourceId,
    /// File size token.
    pub size: i64,
    /// Last-modified token.
    pub last_modified: i64,
}

impl FileStatus {
    /// Creates a file-status row.
    #[must_use]
    pub const fn new(source: SourceId, size: i64, last_modified: i64) -> Self {
        Self {
            source,
            size,
            last_modified,
        }
    }
}

/// What kind of entry a directory member is.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FileKind {
    /// A component document.
    QmlDocument,
    /// A type-description file.
    QmlTypes,
    /// A subdirectory.
    Directory,
}

/// One member entry of a watched directory.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DirectoryInfo {
    /// The directory's own source id.
    pub directory: SourceId,
    /// The member source.
    pub source: SourceId,
    /// The module the member contributes to, if any.
    pub module: Option<ModuleId>,
    /// What the member is.
    pub kind: FileKind,
}

impl DirectoryInfo {
    /// Creates a directory-info row.
    #[must_use]
    pub const fn new(
        directory: SourceId,
        source: SourceId,
        module: Option<ModuleId>,
        kind: FileKind,
    ) -> Self {
        Self {
            directory,
            source,
            module,
            kind,
        }
    }
}

/// Designer metadata attached to an exported type.
///
/// Hints and item-library entries are opaque structured text; the store
/// never interprets them.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeAnnotation {
    /// The annotation's own source (a metainfo file).
    pub source: SourceId,
    /// The directory the metainfo file lives in.
    pub directory: SourceId,
    /// Exported name the annotation applies to.
    pub type_name: String,
    /// Module of the exported name.
    pub module: ModuleId,
    /// Icon path for the annotated type.
    pub icon_path: String,
    /// Trait overrides, if any.
    pub traits: Option<TypeTraits>,
    /// Opaque hints text.
    pub hints: String,
    /// Opaque item-library entries text.
    pub item_library_entries: String,
}

/// Mapping from an exported type to the document that edits its properties.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertyEditorPath {
    /// Module of the exported name.
    pub module: ModuleId,
    /// Exported type name.
    pub type_name: String,
    /// The editor document source.
    pub source: SourceId,
    /// The directory the mapping was collected from.
    pub directory: SourceId,
}

/// Everything one synchronization call replaces.
///
/// Empty vectors paired with a populated `updated_*` list mean deletion:
/// the engine removes all previously stored rows for those keys.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SynchronizationPackage {
    /// Types extracted from the updated sources.
    pub types: Vec<TypeDeclaration>,
    /// Sources whose type sets are fully replaced by this package.
    pub updated_source_ids: Vec<SourceId>,
    /// Document imports for the updated sources.
    pub imports: Vec<Import>,
    /// Module-dependency imports (native resolution scope).
    pub module_dependencies: Vec<Import>,
    /// Sources whose module-dependency rows are replaced.
    pub updated_module_dependency_source_ids: Vec<SourceId>,
    /// Re-export edges for the updated modules.
    pub module_exported_imports: Vec<ModuleExportedImport>,
    /// Modules whose re-export edges are replaced.
    pub updated_module_ids: Vec<ModuleId>,
    /// File statuses for the updated file-status sources.
    pub file_statuses: Vec<FileStatus>,
    /// Sources whose file-status rows are replaced.
    pub updated_file_status_source_ids: Vec<SourceId>,
    /// Directory members for the updated directories.
    pub directory_infos: Vec<DirectoryInfo>,
    /// Directories whose member rows are replaced.
    pub updated_directory_info_source_ids: Vec<SourceId>,
    /// Type annotations for the updated annotation sources.
    pub type_annotations: Vec<TypeAnnotation>,
    /// Annotation sources whose rows are replaced.
    pub updated_type_annotation_source_ids: Vec<SourceId>,
    /// Property-editor path mappings for the updated directories.
    pub property_editor_paths: Vec<PropertyEditorPath>,
    /// Directories whose property-editor mappings are replaced.
    pub updated_property_editor_directory_ids: Vec<SourceId>,
}

impl SynchronizationPackage {
    /// Creates an empty package.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience: a package replacing types for the given sources.
    #[must_use]
    pub fn with_types(types: Vec<TypeDeclaration>, updated_source_ids: Vec<SourceId>) -> Self {
        Self {
            types,
            updated_source_ids,
            ..Self::default()
        }
    }

    /// Adds document imports.
    #[must_use]
    pub fn with_imports(mut self, imports: Vec<Import>) -> Self {
        self.imports.extend(imports);
        self
    }

    /// Adds re-export edges for the given modules.
    #[must_use]
    pub fn with_module_exported_imports(
        mut self,
        edges: Vec<ModuleExportedImport>,
        updated_module_ids: Vec<ModuleId>,
    ) -> Self {
        self.module_exported_imports.extend(edges);
        self.updated_module_ids.extend(updated_module_ids);
        self
    }
}
