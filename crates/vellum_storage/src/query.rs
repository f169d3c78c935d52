//! Read-side query surface of the store.
//!
//! Everything here operates on one committed snapshot and never mutates.
//! Inherited lookups walk the resolved chains only; an unresolved
//! prototype or extension simply ends the walk.

use std::collections::HashSet;

use vellum_foundation::{ModuleId, PropertyDeclarationId, SourceId, TypeId, Version};

use crate::declarations::{ExportedTypeName, Resolution};
use crate::store::{PropertyRecord, ReferenceSlot, Store};

/// Picks the winning export among candidates satisfying a requested
/// version.
///
/// Candidates are filtered by [`Version::satisfies`]; of the survivors the
/// highest version wins, and since the absent version orders below every
/// versioned one, a versionless export is chosen only when nothing
/// versioned matches. Earlier candidates win ties, so callers pass them in
/// visibility order.
#[must_use]
pub fn select_best_export(
    candidates: impl IntoIterator<Item = (Version, TypeId)>,
    requested: Version,
) -> Option<TypeId> {
    let mut best: Option<(Version, TypeId)> = None;
    for (version, id) in candidates {
        if !version.satisfies(requested) {
            continue;
        }
        if best.is_none_or(|(best_version, _)| version > best_version) {
            best = Some((version, id));
        }
    }
    best.map(|(_, id)| id)
}

impl Store {
    // --- Import visibility ---

    /// Computes the visible-import closure of a source.
    ///
    /// Starts from the source's document imports and module dependencies
    /// and follows re-export edges transitively. An auto-versioned edge
    /// adopts the version of the import that activated it; a fixed edge
    /// contributes its own version. The same module can appear at several
    /// versions when distinct paths request them.
    #[must_use]
    pub fn visible_imports(&self, source: SourceId) -> Vec<(ModuleId, Version)> {
        let mut visible: Vec<(ModuleId, Version)> = Vec::new();
        let mut seen: HashSet<(ModuleId, Version)> = HashSet::new();
        let mut worklist: Vec<(ModuleId, Version)> = Vec::new();

        for import in self.imports_for(source).iter().chain(self.module_dependencies_for(source)) {
            let entry = (import.module, import.version);
            if seen.insert(entry) {
                worklist.push(entry);
            }
        }

        while let Some((module, version)) = worklist.pop() {
            visible.push((module, version));
            for edge in self.exported_imports_for(module) {
                let adopted = if edge.is_auto_version {
                    version
                } else {
                    edge.version
                };
                let entry = (edge.exported_module, adopted);
                if seen.insert(entry) {
                    worklist.push(entry);
                }
            }
        }

        visible.sort_unstable();
        visible
    }

    // --- Exported-name lookup ---

    /// Looks up an exported name in a single module at a requested version.
    #[must_use]
    pub fn type_id_by_exported_name(
        &self,
        module: ModuleId,
        name: &str,
        requested: Version,
    ) -> Option<TypeId> {
        select_best_export(self.export_rows(module, name).iter().copied(), requested)
    }

    /// Looks up an exported name across a visibility scope.
    ///
    /// Each scope entry carries its own requested version; candidates from
    /// every entry compete and the overall highest satisfying version
    /// wins.
    #[must_use]
    pub fn exported_type_id(&self, name: &str, scope: &[(ModuleId, Version)]) -> Option<TypeId> {
        let mut best: Option<(Version, TypeId)> = None;
        for &(module, requested) in scope {
            for &(version, id) in self.export_rows(module, name) {
                if !version.satisfies(requested) {
                    continue;
                }
                if best.is_none_or(|(best_version, _)| version > best_version) {
                    best = Some((version, id));
                }
            }
        }
        best.map(|(_, id)| id)
    }

    /// The names a type is exported under.
    #[must_use]
    pub fn exported_type_names(&self, id: TypeId) -> &[ExportedTypeName] {
        self.type_record(id)
            .map_or(&[][..], |record| record.exported_types.as_slice())
    }

    /// The exported names of a type restricted to modules visible from a
    /// source.
    #[must_use]
    pub fn exported_type_names_visible_from(
        &self,
        id: TypeId,
        source: SourceId,
    ) -> Vec<ExportedTypeName> {
        let scope = self.visible_imports(source);
        self.exported_type_names(id)
            .iter()
            .filter(|export| {
                scope
                    .iter()
                    .any(|&(module, requested)| {
                        module == export.module && export.version.satisfies(requested)
                    })
            })
            .cloned()
            .collect()
    }

    // --- Inheritance ---

    /// The resolved prototype of a type.
    #[must_use]
    pub fn prototype_resolution(&self, id: TypeId) -> Resolution {
        self.type_record(id)
            .map_or(Resolution::None, |record| record.prototype_resolution)
    }

    /// The resolved extension of a type.
    #[must_use]
    pub fn extension_resolution(&self, id: TypeId) -> Resolution {
        self.type_record(id)
            .map_or(Resolution::None, |record| record.extension_resolution)
    }

    /// The full inherited-member lookup chain of a type.
    ///
    /// Starts at the type itself; at every step the extension subtree is
    /// visited before the prototype subtree, so extension members shadow
    /// prototype members. Each type appears once even when reachable along
    /// both edges.
    #[must_use]
    pub fn inheritance_chain(&self, id: TypeId) -> Vec<TypeId> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        self.walk_chain(id, &mut chain, &mut seen);
        chain
    }

    fn walk_chain(&self, id: TypeId, chain: &mut Vec<TypeId>, seen: &mut HashSet<TypeId>) {
        if !seen.insert(id) {
            return;
        }
        let Some(record) = self.type_record(id) else {
            return;
        };
        chain.push(id);
        if let Some(extension) = record.extension_resolution.type_id() {
            self.walk_chain(extension, chain, seen);
        }
        if let Some(prototype) = record.prototype_resolution.type_id() {
            self.walk_chain(prototype, chain, seen);
        }
    }

    /// The strict prototype ancestors of a type, nearest first.
    #[must_use]
    pub fn prototype_ids(&self, id: TypeId) -> Vec<TypeId> {
        let mut ancestors = Vec::new();
        let mut seen = HashSet::new();
        seen.insert(id);
        let mut current = self.prototype_resolution(id).type_id();
        while let Some(ancestor) = current {
            if !seen.insert(ancestor) {
                break;
            }
            ancestors.push(ancestor);
            current = self.prototype_resolution(ancestor).type_id();
        }
        ancestors
    }

    /// Every type that transitively derives from the given type through
    /// prototype or extension edges.
    #[must_use]
    pub fn heir_ids(&self, id: TypeId) -> Vec<TypeId> {
        let mut heirs = Vec::new();
        let mut seen = HashSet::new();
        seen.insert(id);
        let mut worklist = vec![id];
        while let Some(base) = worklist.pop() {
            for site in self.dependent_sites_on_type(base) {
                if !matches!(site.slot, ReferenceSlot::Prototype | ReferenceSlot::Extension) {
                    continue;
                }
                if seen.insert(site.type_id) {
                    heirs.push(site.type_id);
                    worklist.push(site.type_id);
                }
            }
        }
        heirs.sort_unstable();
        heirs
    }

    /// Returns true if the type is, or derives from, any of the given
    /// bases.
    #[must_use]
    pub fn is_based_on(&self, id: TypeId, bases: &[TypeId]) -> bool {
        if bases.is_empty() {
            return false;
        }
        self.inheritance_chain(id)
            .iter()
            .any(|ancestor| bases.contains(ancestor))
    }

    // --- Properties ---

    /// Finds a property by name, searching the type and its inherited
    /// chain; the nearest declaration wins.
    #[must_use]
    pub fn find_property(&self, id: TypeId, name: &str) -> Option<(TypeId, PropertyDeclarationId)> {
        for owner in self.inheritance_chain(id) {
            if let Some(property) = self.type_record(owner)?.property(name) {
                return Some((owner, property.id));
            }
        }
        None
    }

    /// Gets a property record through its declaration id.
    #[must_use]
    pub fn property_declaration(&self, id: PropertyDeclarationId) -> Option<&PropertyRecord> {
        let owner = self.property_owner(id)?;
        self.type_record(owner)?.property_by_id(id)
    }

    /// The declaration ids of a type's own properties, in declaration
    /// order.
    #[must_use]
    pub fn local_property_declaration_ids(&self, id: TypeId) -> Vec<PropertyDeclarationId> {
        self.type_record(id)
            .map(|record| record.properties.iter().map(|p| p.id).collect())
            .unwrap_or_default()
    }

    /// The declaration ids of a type's properties including inherited
    /// ones, nearest declaration first, shadowed names dropped.
    #[must_use]
    pub fn property_declaration_ids(&self, id: TypeId) -> Vec<PropertyDeclarationId> {
        let mut ids = Vec::new();
        let mut names: HashSet<&str> = HashSet::new();
        for owner in self.inheritance_chain(id) {
            let Some(record) = self.type_record(owner) else {
                continue;
            };
            for property in &record.properties {
                if names.insert(property.name.as_str()) {
                    ids.push(property.id);
                }
            }
        }
        ids
    }

    /// The names of a type's own properties.
    #[must_use]
    pub fn local_property_names(&self, id: TypeId) -> Vec<String> {
        self.type_record(id)
            .map(|record| record.properties.iter().map(|p| p.name.clone()).collect())
            .unwrap_or_default()
    }

    /// The names of a type's properties including inherited ones.
    #[must_use]
    pub fn property_names(&self, id: TypeId) -> Vec<String> {
        self.property_declaration_ids(id)
            .into_iter()
            .filter_map(|pid| self.property_declaration(pid))
            .map(|property| property.name.clone())
            .collect()
    }

    /// The resolved default property of a type, searching the inherited
    /// chain when the type declares none itself.
    #[must_use]
    pub fn default_property(&self, id: TypeId) -> Option<PropertyDeclarationId> {
        self.inheritance_chain(id)
            .into_iter()
            .find_map(|owner| self.type_record(owner)?.default_property)
    }

    // --- Functions, signals, enumerations ---

    /// The names of a type's functions including inherited ones.
    #[must_use]
    pub fn function_names(&self, id: TypeId) -> Vec<String> {
        self.collect_member_names(id, |record| {
            record.functions.iter().map(|f| f.name.clone()).collect()
        })
    }

    /// The names of a type's signals including inherited ones.
    #[must_use]
    pub fn signal_names(&self, id: TypeId) -> Vec<String> {
        self.collect_member_names(id, |record| {
            record.signals.iter().map(|s| s.name.clone()).collect()
        })
    }

    /// The names of a type's enumerations including inherited ones.
    #[must_use]
    pub fn enumeration_names(&self, id: TypeId) -> Vec<String> {
        self.collect_member_names(id, |record| {
            record.enumerations.iter().map(|e| e.name.clone()).collect()
        })
    }

    fn collect_member_names(
        &self,
        id: TypeId,
        members: impl Fn(&crate::store::TypeRecord) -> Vec<String>,
    ) -> Vec<String> {
        let mut names = Vec::new();
        let mut seen = HashSet::new();
        for owner in self.inheritance_chain(id) {
            let Some(record) = self.type_record(owner) else {
                continue;
            };
            for name in members(record) {
                if seen.insert(name.clone()) {
                    names.push(name);
                }
            }
        }
        names
    }
}
