//! The persistent type store.
//!
//! A [`Store`] value is one committed snapshot of the whole database.
//! Cloning is O(1); the synchronization engine clones the current
//! snapshot, applies a batch to the clone through the mutation API here,
//! and publishes the clone only when the batch succeeds. Readers holding
//! an older snapshot keep a consistent view.
//!
//! Besides the primary tables the store maintains two reverse-dependency
//! indexes used for relinking: reference sites keyed by the literal name
//! they were authored against, and reference sites keyed by the type id
//! their current resolution depends on.

use vellum_foundation::{
    Error, ModuleId, ModuleKind, PropertyDeclarationId, Result, SourceId, TypeId, Version, VlMap,
    VlSet,
};

use crate::declarations::{
    EnumerationDeclaration, ExportedTypeName, FunctionDeclaration, PropertyBinding,
    PropertyTraits, Resolution, SignalDeclaration, TypeReference, TypeTraits,
};
use crate::modules::ModuleStore;
use crate::package::{
    DirectoryInfo, FileStatus, Import, ModuleExportedImport, PropertyEditorPath, TypeAnnotation,
    TypeDeclaration,
};

/// Which reference-bearing slot of a type a site denotes.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ReferenceSlot {
    /// The type's prototype reference.
    Prototype,
    /// The type's extension reference.
    Extension,
    /// The type reference of the named direct property.
    PropertyType(String),
    /// The target reference of the named alias property.
    AliasTarget(String),
}

/// One stored reference site: a slot on a concrete type.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ReferenceSite {
    /// The type owning the slot.
    pub type_id: TypeId,
    /// Which slot.
    pub slot: ReferenceSlot,
}

impl ReferenceSite {
    /// Creates a reference site.
    #[must_use]
    pub fn new(type_id: TypeId, slot: ReferenceSlot) -> Self {
        Self { type_id, slot }
    }
}

/// A stored property declaration.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PropertyRecord {
    /// Stable declaration id, preserved across in-place updates.
    pub id: PropertyDeclarationId,
    /// Property name.
    pub name: String,
    /// Trait flags.
    pub traits: PropertyTraits,
    /// The binding as authored.
    pub binding: PropertyBinding,
    /// Resolved property type; for aliases, the type of the property the
    /// chain ultimately denotes.
    pub resolved_type: Resolution,
    /// For aliases: the concrete (owning type, property) pair the chain
    /// resolves to. `None` while unresolved and for direct declarations.
    pub resolved_alias: Option<(TypeId, PropertyDeclarationId)>,
    /// Every type id the current resolution was computed through. Used to
    /// find this site again when one of those types changes.
    pub depends_on: Vec<TypeId>,
}

impl PropertyRecord {
    /// Returns true if this declaration is an alias.
    #[must_use]
    pub fn is_alias(&self) -> bool {
        self.binding.is_alias()
    }
}

/// A stored type row.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TypeRecord {
    /// Stable type id.
    pub id: TypeId,
    /// The declaring source.
    pub source: SourceId,
    /// Type name, unique within the source.
    pub name: String,
    /// Trait set.
    pub traits: TypeTraits,
    /// Authored prototype reference.
    pub prototype: TypeReference,
    /// Current prototype resolution.
    pub prototype_resolution: Resolution,
    /// Authored extension reference.
    pub extension: TypeReference,
    /// Current extension resolution.
    pub extension_resolution: Resolution,
    /// Ordered property declarations.
    pub properties: Vec<PropertyRecord>,
    /// Ordered function declarations.
    pub functions: Vec<FunctionDeclaration>,
    /// Ordered signal declarations.
    pub signals: Vec<SignalDeclaration>,
    /// Ordered enumeration declarations.
    pub enumerations: Vec<EnumerationDeclaration>,
    /// Declared default-property name.
    pub default_property_name: Option<String>,
    /// Resolved default property; `None` while missing.
    pub default_property: Option<PropertyDeclarationId>,
    /// Names the type is exported under.
    pub exported_types: Vec<ExportedTypeName>,
}

impl TypeRecord {
    /// Finds a local property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyRecord> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Finds a local property by declaration id.
    #[must_use]
    pub fn property_by_id(&self, id: PropertyDeclarationId) -> Option<&PropertyRecord> {
        self.properties.iter().find(|p| p.id == id)
    }
}

/// One committed snapshot of the type database.
#[derive(Clone, Debug, Default)]
pub struct Store {
    pub(crate) modules: ModuleStore,
    pub(crate) types: VlMap<TypeId, TypeRecord>,
    pub(crate) type_ids_by_name: VlMap<(SourceId, String), TypeId>,
    pub(crate) type_ids_by_source: VlMap<SourceId, VlSet<TypeId>>,
    pub(crate) exports: VlMap<(ModuleId, String), Vec<(Version, TypeId)>>,
    pub(crate) imports: VlMap<SourceId, Vec<Import>>,
    pub(crate) module_dependencies: VlMap<SourceId, Vec<Import>>,
    pub(crate) exported_imports: VlMap<ModuleId, Vec<ModuleExportedImport>>,
    pub(crate) dependents_by_name: VlMap<String, VlSet<ReferenceSite>>,
    pub(crate) dependents_by_type: VlMap<TypeId, VlSet<ReferenceSite>>,
    pub(crate) property_owners: VlMap<PropertyDeclarationId, TypeId>,
    pub(crate) file_statuses: VlMap<SourceId, FileStatus>,
    pub(crate) directory_infos: VlMap<SourceId, Vec<DirectoryInfo>>,
    pub(crate) annotations: VlMap<SourceId, Vec<TypeAnnotation>>,
    pub(crate) annotations_by_key: VlMap<(ModuleId, String), TypeAnnotation>,
    pub(crate) property_editor_paths: VlMap<(ModuleId, String), PropertyEditorPath>,
    pub(crate) editor_paths_by_directory: VlMap<SourceId, Vec<(ModuleId, String)>>,
    next_type_id: u64,
    next_property_id: u64,
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Modules ---

    /// Interns a (name, kind) pair, returning its module id.
    pub fn module_id(&mut self, name: &str, kind: ModuleKind) -> ModuleId {
        self.modules.module_id(name, kind)
    }

    /// Returns the module interner.
    #[must_use]
    pub fn modules(&self) -> &ModuleStore {
        &self.modules
    }

    // --- Basic type reads ---

    /// Looks up a type by its declaring source and name.
    #[must_use]
    pub fn type_id(&self, source: SourceId, name: &str) -> Option<TypeId> {
        self.type_ids_by_name
            .get(&(source, name.to_owned()))
            .copied()
    }

    /// Gets a type record.
    #[must_use]
    pub fn type_record(&self, id: TypeId) -> Option<&TypeRecord> {
        self.types.get(&id)
    }

    /// Returns true if the type row exists.
    #[must_use]
    pub fn contains_type(&self, id: TypeId) -> bool {
        self.types.contains_key(&id)
    }

    /// Returns all type ids declared by a source.
    #[must_use]
    pub fn type_ids_in_source(&self, source: SourceId) -> Vec<TypeId> {
        self.type_ids_by_source
            .get(&source)
            .map(|set| {
                let mut ids: Vec<_> = set.iter().copied().collect();
                ids.sort_unstable();
                ids
            })
            .unwrap_or_default()
    }

    /// Returns the number of stored types.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Returns the export rows for a (module, name) pair.
    #[must_use]
    pub fn export_rows(&self, module: ModuleId, name: &str) -> &[(Version, TypeId)] {
        self.exports
            .get(&(module, name.to_owned()))
            .map_or(&[][..], Vec::as_slice)
    }

    /// Returns the owning type of a property declaration.
    #[must_use]
    pub fn property_owner(&self, id: PropertyDeclarationId) -> Option<TypeId> {
        self.property_owners.get(&id).copied()
    }

    // --- Type mutation (engine-facing) ---

    /// Inserts or updates the type row for (source, name), preserving the
    /// type id and matching property ids by name on update.
    ///
    /// Exported-name rows are replaced as part of the upsert. Returns the
    /// type id and the set of literal export names whose rows changed,
    /// which the engine feeds into relinking.
    ///
    /// # Errors
    ///
    /// Fails on a null source id, an empty export name, an export naming
    /// an unknown module, or a duplicate (module, name, version) triple.
    pub fn upsert_type(&mut self, declaration: &TypeDeclaration) -> Result<(TypeId, Vec<String>)> {
        if declaration.source.is_null() {
            return Err(Error::type_has_invalid_source(&declaration.name));
        }
        for export in &declaration.exported_types {
            if export.name.is_empty() {
                return Err(Error::new(
                    vellum_foundation::ErrorKind::MalformedExportedName {
                        type_name: declaration.name.clone(),
                    },
                ));
            }
            if !self.modules.contains(export.module) {
                return Err(Error::unknown_module(export.module));
            }
        }

        let key = (declaration.source, declaration.name.clone());
        let existing = self.type_ids_by_name.get(&key).copied();

        let (id, old_properties, old_exports) = match existing {
            Some(id) => {
                let old = self
                    .types
                    .get(&id)
                    .cloned()
                    .expect("type index points at a missing record");
                self.unindex_authored_references(&old);
                self.unindex_resolutions(&old);
                for property in &old.properties {
                    self.property_owners.remove(&property.id);
                }
                (id, old.properties, old.exported_types)
            }
            None => {
                let id = self.allocate_type_id();
                self.type_ids_by_name.insert(key, id);
                self.type_ids_by_source
                    .entry_or_default(declaration.source)
                    .insert(id);
                (id, Vec::new(), Vec::new())
            }
        };

        let properties = self.build_property_records(&declaration.property_declarations, &old_properties);
        for property in &properties {
            self.property_owners.insert(property.id, id);
        }

        let record = TypeRecord {
            id,
            source: declaration.source,
            name: declaration.name.clone(),
            traits: declaration.traits,
            prototype: declaration.prototype.clone(),
            prototype_resolution: initial_resolution(&declaration.prototype),
            extension: declaration.extension.clone(),
            extension_resolution: initial_resolution(&declaration.extension),
            properties,
            functions: declaration.function_declarations.clone(),
            signals: declaration.signal_declarations.clone(),
            enumerations: declaration.enumeration_declarations.clone(),
            default_property_name: declaration.default_property_name.clone(),
            default_property: None,
            exported_types: declaration.exported_types.clone(),
        };

        self.index_authored_references(&record);
        self.types.insert(id, record);

        let changed = self.replace_exports(id, &old_exports, &declaration.exported_types)?;
        Ok((id, changed))
    }

    /// Removes a type row and everything it owns.
    ///
    /// Dependent references elsewhere are left in place for the engine to
    /// relink; the by-type dependency entries keyed by the removed id are
    /// dropped, so the engine must collect them beforehand.
    pub fn remove_type(&mut self, id: TypeId) -> Option<TypeRecord> {
        let record = self.types.remove(&id)?;
        self.type_ids_by_name
            .remove(&(record.source, record.name.clone()));
        if let Some(set) = self.type_ids_by_source.get_mut(&record.source) {
            set.remove(&id);
            if set.is_empty() {
                self.type_ids_by_source.remove(&record.source);
            }
        }
        for export in &record.exported_types {
            self.remove_export_row(export, id);
        }
        for property in &record.properties {
            self.property_owners.remove(&property.id);
        }
        self.unindex_authored_references(&record);
        self.unindex_resolutions(&record);
        self.dependents_by_type.remove(&id);
        Some(record)
    }

    /// Stores a new prototype resolution, maintaining the by-type index.
    pub fn set_prototype_resolution(&mut self, id: TypeId, resolution: Resolution) {
        let Some(record) = self.types.get_mut(&id) else {
            return;
        };
        let old = record.prototype_resolution;
        record.prototype_resolution = resolution;
        self.reindex_resolution(ReferenceSite::new(id, ReferenceSlot::Prototype), old, resolution);
    }

    /// Stores a new extension resolution, maintaining the by-type index.
    pub fn set_extension_resolution(&mut self, id: TypeId, resolution: Resolution) {
        let Some(record) = self.types.get_mut(&id) else {
            return;
        };
        let old = record.extension_resolution;
        record.extension_resolution = resolution;
        self.reindex_resolution(ReferenceSite::new(id, ReferenceSlot::Extension), old, resolution);
    }

    /// Stores the resolution of a direct property's type reference.
    pub fn set_property_type_resolution(
        &mut self,
        id: TypeId,
        property_name: &str,
        resolution: Resolution,
    ) {
        let site = ReferenceSite::new(id, ReferenceSlot::PropertyType(property_name.to_owned()));
        let Some(record) = self.types.get_mut(&id) else {
            return;
        };
        let Some(property) = record.properties.iter_mut().find(|p| p.name == property_name) else {
            return;
        };
        let old_deps = std::mem::take(&mut property.depends_on);
        property.resolved_type = resolution;
        property.depends_on = resolution.type_id().into_iter().collect();
        let new_deps = property.depends_on.clone();
        for dep in old_deps {
            self.unindex_site_by_type(dep, &site);
        }
        for dep in new_deps {
            self.index_site_by_type(dep, site.clone());
        }
    }

    /// Stores the resolution of an alias property.
    ///
    /// `depends_on` lists every type the alias walk passed through, so a
    /// later change to any of them re-dirties this site.
    pub fn set_alias_resolution(
        &mut self,
        id: TypeId,
        property_name: &str,
        resolved_type: Resolution,
        resolved_alias: Option<(TypeId, PropertyDeclarationId)>,
        depends_on: Vec<TypeId>,
    ) {
        let site = ReferenceSite::new(id, ReferenceSlot::AliasTarget(property_name.to_owned()));
        let Some(record) = self.types.get_mut(&id) else {
            return;
        };
        let Some(property) = record.properties.iter_mut().find(|p| p.name == property_name) else {
            return;
        };
        let old_deps = std::mem::take(&mut property.depends_on);
        property.resolved_type = resolved_type;
        property.resolved_alias = resolved_alias;
        property.depends_on = depends_on;
        let new_deps = property.depends_on.clone();
        for dep in old_deps {
            self.unindex_site_by_type(dep, &site);
        }
        for dep in new_deps {
            self.index_site_by_type(dep, site.clone());
        }
    }

    /// Stores the resolved default property of a type.
    pub fn set_default_property(&mut self, id: TypeId, property: Option<PropertyDeclarationId>) {
        if let Some(record) = self.types.get_mut(&id) {
            record.default_property = property;
        }
    }

    // --- Imports ---

    /// Replaces the document imports of the given sources.
    pub fn replace_imports(&mut self, updated_sources: &[SourceId], rows: &[Import]) {
        replace_by_source(&mut self.imports, updated_sources, rows, |row| row.source);
    }

    /// Replaces the module-dependency imports of the given sources.
    pub fn replace_module_dependencies(&mut self, updated_sources: &[SourceId], rows: &[Import]) {
        replace_by_source(
            &mut self.module_dependencies,
            updated_sources,
            rows,
            |row| row.source,
        );
    }

    /// Replaces the re-export edges of the given modules.
    ///
    /// # Errors
    ///
    /// Fails if an edge references a module that was never interned.
    pub fn replace_exported_imports(
        &mut self,
        updated_modules: &[ModuleId],
        rows: &[ModuleExportedImport],
    ) -> Result<()> {
        for row in rows {
            if !self.modules.contains(row.module) {
                return Err(Error::unknown_module(row.module));
            }
            if !self.modules.contains(row.exported_module) {
                return Err(Error::unknown_module(row.exported_module));
            }
        }
        for module in updated_modules {
            self.exported_imports.remove(module);
        }
        for row in rows {
            self.exported_imports
                .entry_or_default(row.module)
                .push(*row);
        }
        Ok(())
    }

    /// The document imports of a source.
    #[must_use]
    pub fn imports_for(&self, source: SourceId) -> &[Import] {
        self.imports.get(&source).map_or(&[][..], Vec::as_slice)
    }

    /// The module-dependency imports of a source.
    #[must_use]
    pub fn module_dependencies_for(&self, source: SourceId) -> &[Import] {
        self.module_dependencies
            .get(&source)
            .map_or(&[][..], Vec::as_slice)
    }

    /// The re-export edges of a module.
    #[must_use]
    pub fn exported_imports_for(&self, module: ModuleId) -> &[ModuleExportedImport] {
        self.exported_imports
            .get(&module)
            .map_or(&[][..], Vec::as_slice)
    }

    /// Every source that declares imports or module dependencies.
    #[must_use]
    pub fn import_source_ids(&self) -> Vec<SourceId> {
        let mut ids: Vec<SourceId> = self
            .imports
            .keys()
            .chain(self.module_dependencies.keys())
            .copied()
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    // --- Dependency indexes ---

    /// Sites authored against the given literal name.
    #[must_use]
    pub fn dependent_sites_on_name(&self, name: &str) -> Vec<ReferenceSite> {
        self.dependents_by_name
            .get(&name.to_owned())
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Sites whose current resolution depends on the given type.
    #[must_use]
    pub fn dependent_sites_on_type(&self, id: TypeId) -> Vec<ReferenceSite> {
        self.dependents_by_type
            .get(&id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Every reference site owned by types declared in a source.
    #[must_use]
    pub fn reference_sites_in_source(&self, source: SourceId) -> Vec<ReferenceSite> {
        let mut sites = Vec::new();
        for id in self.type_ids_in_source(source) {
            let Some(record) = self.types.get(&id) else {
                continue;
            };
            if !record.prototype.is_none() {
                sites.push(ReferenceSite::new(id, ReferenceSlot::Prototype));
            }
            if !record.extension.is_none() {
                sites.push(ReferenceSite::new(id, ReferenceSlot::Extension));
            }
            for property in &record.properties {
                let slot = if property.is_alias() {
                    ReferenceSlot::AliasTarget(property.name.clone())
                } else {
                    ReferenceSlot::PropertyType(property.name.clone())
                };
                sites.push(ReferenceSite::new(id, slot));
            }
        }
        sites
    }

    // --- Internals ---

    fn allocate_type_id(&mut self) -> TypeId {
        let id = TypeId::new(self.next_type_id);
        self.next_type_id += 1;
        id
    }

    fn allocate_property_id(&mut self) -> PropertyDeclarationId {
        let id = PropertyDeclarationId::new(self.next_property_id);
        self.next_property_id += 1;
        id
    }

    fn build_property_records(
        &mut self,
        declarations: &[crate::declarations::PropertyDeclaration],
        old: &[PropertyRecord],
    ) -> Vec<PropertyRecord> {
        declarations
            .iter()
            .map(|declaration| {
                let id = old
                    .iter()
                    .find(|p| p.name == declaration.name)
                    .map_or_else(|| self.allocate_property_id(), |p| p.id);
                let resolved_type = match &declaration.binding {
                    PropertyBinding::Type(reference) => initial_resolution(reference),
                    PropertyBinding::Alias { .. } => Resolution::Unresolved,
                };
                PropertyRecord {
                    id,
                    name: declaration.name.clone(),
                    traits: declaration.traits,
                    binding: declaration.binding.clone(),
                    resolved_type,
                    resolved_alias: None,
                    depends_on: Vec::new(),
                }
            })
            .collect()
    }

    fn replace_exports(
        &mut self,
        id: TypeId,
        old: &[ExportedTypeName],
        new: &[ExportedTypeName],
    ) -> Result<Vec<String>> {
        let mut changed = Vec::new();
        for export in old {
            if !new.contains(export) {
                self.remove_export_row(export, id);
                changed.push(export.name.clone());
            }
        }
        for export in new {
            if !old.contains(export) {
                self.insert_export_row(export, id)?;
                changed.push(export.name.clone());
            }
        }
        changed.sort_unstable();
        changed.dedup();
        Ok(changed)
    }

    fn insert_export_row(&mut self, export: &ExportedTypeName, id: TypeId) -> Result<()> {
        let rows = self
            .exports
            .entry_or_default((export.module, export.name.clone()));
        if rows.iter().any(|(version, _)| *version == export.version) {
            return Err(Error::duplicate_exported_type(
                export.module,
                &export.name,
                export.version,
            ));
        }
        rows.push((export.version, id));
        rows.sort_unstable_by_key(|(version, _)| *version);
        Ok(())
    }

    fn remove_export_row(&mut self, export: &ExportedTypeName, id: TypeId) {
        let key = (export.module, export.name.clone());
        if let Some(rows) = self.exports.get_mut(&key) {
            rows.retain(|(version, owner)| !(*version == export.version && *owner == id));
            if rows.is_empty() {
                self.exports.remove(&key);
            }
        }
    }

    fn index_authored_references(&mut self, record: &TypeRecord) {
        let id = record.id;
        if let Some(name) = record.prototype.literal_name() {
            self.index_site_by_name(name, ReferenceSite::new(id, ReferenceSlot::Prototype));
        }
        if let Some(name) = record.extension.literal_name() {
            self.index_site_by_name(name, ReferenceSite::new(id, ReferenceSlot::Extension));
        }
        for property in &record.properties {
            let (slot, reference) = match &property.binding {
                PropertyBinding::Type(reference) => {
                    (ReferenceSlot::PropertyType(property.name.clone()), reference)
                }
                PropertyBinding::Alias { target, .. } => {
                    (ReferenceSlot::AliasTarget(property.name.clone()), target)
                }
            };
            if let Some(name) = reference.literal_name() {
                self.index_site_by_name(name, ReferenceSite::new(id, slot));
            }
        }
    }

    fn unindex_authored_references(&mut self, record: &TypeRecord) {
        let id = record.id;
        if let Some(name) = record.prototype.literal_name() {
            self.unindex_site_by_name(name, &ReferenceSite::new(id, ReferenceSlot::Prototype));
        }
        if let Some(name) = record.extension.literal_name() {
            self.unindex_site_by_name(name, &ReferenceSite::new(id, ReferenceSlot::Extension));
        }
        for property in &record.properties {
            let (slot, reference) = match &property.binding {
                PropertyBinding::Type(reference) => {
                    (ReferenceSlot::PropertyType(property.name.clone()), reference)
                }
                PropertyBinding::Alias { target, .. } => {
                    (ReferenceSlot::AliasTarget(property.name.clone()), target)
                }
            };
            if let Some(name) = reference.literal_name() {
                self.unindex_site_by_name(name, &ReferenceSite::new(id, slot));
            }
        }
    }

    fn unindex_resolutions(&mut self, record: &TypeRecord) {
        let id = record.id;
        if let Some(target) = record.prototype_resolution.type_id() {
            self.unindex_site_by_type(target, &ReferenceSite::new(id, ReferenceSlot::Prototype));
        }
        if let Some(target) = record.extension_resolution.type_id() {
            self.unindex_site_by_type(target, &ReferenceSite::new(id, ReferenceSlot::Extension));
        }
        for property in &record.properties {
            let slot = if property.is_alias() {
                ReferenceSlot::AliasTarget(property.name.clone())
            } else {
                ReferenceSlot::PropertyType(property.name.clone())
            };
            let site = ReferenceSite::new(id, slot);
            for dep in &property.depends_on {
                self.unindex_site_by_type(*dep, &site);
            }
        }
    }

    fn reindex_resolution(&mut self, site: ReferenceSite, old: Resolution, new: Resolution) {
        if let Some(target) = old.type_id() {
            self.unindex_site_by_type(target, &site);
        }
        if let Some(target) = new.type_id() {
            self.index_site_by_type(target, site);
        }
    }

    fn index_site_by_name(&mut self, name: &str, site: ReferenceSite) {
        self.dependents_by_name
            .entry_or_default(name.to_owned())
            .insert(site);
    }

    fn unindex_site_by_name(&mut self, name: &str, site: &ReferenceSite) {
        let key = name.to_owned();
        if let Some(set) = self.dependents_by_name.get_mut(&key) {
            set.remove(site);
            if set.is_empty() {
                self.dependents_by_name.remove(&key);
            }
        }
    }

    fn index_site_by_type(&mut self, target: TypeId, site: ReferenceSite) {
        self.dependents_by_type.entry_or_default(target).insert(site);
    }

    fn unindex_site_by_type(&mut self, target: TypeId, site: &ReferenceSite) {
        if let Some(set) = self.dependents_by_type.get_mut(&target) {
            set.remove(site);
            if set.is_empty() {
                self.dependents_by_type.remove(&target);
            }
        }
    }
}

/// The resolution a freshly stored reference starts out with.
fn initial_resolution(reference: &TypeReference) -> Resolution {
    match reference {
        TypeReference::None => Resolution::None,
        TypeReference::Resolved(id) => Resolution::Resolved(*id),
        TypeReference::Imported(_) | TypeReference::QualifiedImported { .. } => {
            Resolution::Unresolved
        }
    }
}

fn replace_by_source<R: Clone>(
    table: &mut VlMap<SourceId, Vec<R>>,
    updated_sources: &[SourceId],
    rows: &[R],
    source_of: impl Fn(&R) -> SourceId,
) {
    for source in updated_sources {
        table.remove(source);
    }
    for row in rows {
        table.entry_or_default(source_of(row)).push(row.clone());
    }
}
