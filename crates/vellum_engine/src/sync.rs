//! The synchronizer: batch application with snapshot isolation.
//!
//! One synchronizer owns the committed [`Store`] snapshot behind a
//! read-write lock, plus the writer mutex that serializes batches. A
//! batch runs entirely against a private clone of the snapshot; on
//! success the clone is swapped in, on a fatal error it is dropped and
//! the committed state is untouched. Readers take O(1) snapshots at any
//! time and never block a writer.
//!
//! A batch proceeds in phases: peripheral tables, stale-type removal,
//! declaration upserts, import tables, then resolution and relinking over
//! the dirty reference sites, and finally cycle validation. Recoverable
//! problems are collected during resolution and delivered only after the
//! commit, deduplicated and in deterministic order.

use std::collections::{BTreeSet, HashSet};
use std::sync::{Mutex, PoisonError, RwLock};

use tracing::debug;

use vellum_foundation::{
    Error, ModuleId, ModuleKind, Result, SourceContextId, SourceId, SourcePathCache, TypeId,
};
use vellum_storage::{ReferenceSite, ReferenceSlot, Store, SynchronizationPackage};

use crate::alias::{AliasProblem, resolve_alias};
use crate::cache::CommonTypeCache;
use crate::cycle::{extension_chain_has_cycle, prototype_chain_has_cycle};
use crate::notifier::{ChangeObserver, ErrorNotifier};
use crate::resolve::{ScopeCache, resolve_reference};

/// A recoverable problem found during resolution, held back until the
/// batch commits.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum Notification {
    UnresolvedTypeName {
        name: String,
        source: SourceId,
    },
    MissingProperty {
        path: String,
        source: SourceId,
    },
    MissingDefaultProperty {
        type_name: String,
        property: String,
        source: SourceId,
    },
}

/// The project type-storage synchronizer.
pub struct Synchronizer {
    store: RwLock<Store>,
    writer: Mutex<()>,
    path_cache: Mutex<SourcePathCache>,
    common_types: Mutex<CommonTypeCache>,
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Synchronizer {
    /// Creates a synchronizer over an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::new()),
            writer: Mutex::new(()),
            path_cache: Mutex::new(SourcePathCache::new()),
            common_types: Mutex::new(CommonTypeCache::new()),
        }
    }

    /// Takes an O(1) snapshot of the committed store.
    #[must_use]
    pub fn snapshot(&self) -> Store {
        self.store
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // --- Identifier interning ---

    /// Interns a directory path.
    pub fn source_context_id(&self, directory_path: &str) -> SourceContextId {
        self.path_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .source_context_id(directory_path)
    }

    /// Interns a full source path.
    pub fn source_id(&self, source_path: &str) -> SourceId {
        self.path_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .source_id(source_path)
    }

    /// Interns a file name under an already-interned context.
    pub fn source_id_in(&self, context: SourceContextId, file_name: &str) -> SourceId {
        self.path_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .source_id_in(context, file_name)
    }

    /// Reassembles the full path of a source id.
    #[must_use]
    pub fn source_path(&self, id: SourceId) -> Option<String> {
        self.path_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .source_path(id)
    }

    /// Returns the owning directory context of a source id.
    #[must_use]
    pub fn source_context(&self, id: SourceId) -> Option<SourceContextId> {
        self.path_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .source_context(id)
    }

    /// Interns a (name, kind) module pair on the committed store.
    ///
    /// Interning is append-only and serialized against batches, so handed
    /// out ids survive every later synchronization.
    pub fn module_id(&self, name: &str, kind: ModuleKind) -> ModuleId {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        self.store
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .module_id(name, kind)
    }

    /// Looks up a commonly used exported type through the memoizing cache.
    #[must_use]
    pub fn common_type_id(
        &self,
        module_name: &str,
        kind: ModuleKind,
        type_name: &str,
    ) -> Option<TypeId> {
        let store = self.snapshot();
        self.common_types
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .type_id(&store, module_name, kind, type_name)
    }

    // --- Synchronization ---

    /// Applies one synchronization package.
    ///
    /// On success the new snapshot is committed, removed type ids are
    /// reported to `observer`, and recoverable resolution problems are
    /// delivered to `notifier` deduplicated in deterministic order.
    ///
    /// # Errors
    ///
    /// Fatal batch errors (invalid input rows, duplicate exports,
    /// prototype/extension/alias cycles) abort the batch; the committed
    /// store is left exactly as it was and nothing is delivered.
    pub fn synchronize(
        &self,
        package: &SynchronizationPackage,
        notifier: &mut dyn ErrorNotifier,
        observer: &mut dyn ChangeObserver,
    ) -> Result<()> {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut work = self.snapshot();

        debug!(
            types = package.types.len(),
            sources = package.updated_source_ids.len(),
            "synchronizing batch"
        );

        // Peripheral tables first; their validation failures are fatal.
        work.replace_file_statuses(
            &package.updated_file_status_source_ids,
            &package.file_statuses,
        )?;
        work.replace_directory_infos(
            &package.updated_directory_info_source_ids,
            &package.directory_infos,
        )?;
        work.replace_type_annotations(
            &package.updated_type_annotation_source_ids,
            &package.type_annotations,
        );
        work.replace_property_editor_paths(
            &package.updated_property_editor_directory_ids,
            &package.property_editor_paths,
        );

        // Remove types of updated sources that the package no longer
        // declares. Their dependents are captured before removal.
        let mut dirty: HashSet<ReferenceSite> = HashSet::new();
        let mut changed_names: BTreeSet<String> = BTreeSet::new();
        let mut removed_ids: Vec<TypeId> = Vec::new();
        for &source in &package.updated_source_ids {
            let keep: HashSet<&str> = package
                .types
                .iter()
                .filter(|declaration| declaration.source == source)
                .map(|declaration| declaration.name.as_str())
                .collect();
            for id in work.type_ids_in_source(source) {
                let stale = work
                    .type_record(id)
                    .is_some_and(|record| !keep.contains(record.name.as_str()));
                if !stale {
                    continue;
                }
                dirty.extend(work.dependent_sites_on_type(id));
                if let Some(removed) = work.remove_type(id) {
                    for export in &removed.exported_types {
                        changed_names.insert(export.name.clone());
                    }
                    removed_ids.push(id);
                }
            }
        }

        // Upsert the declared types. Ids are preserved, resolutions reset.
        let mut touched: Vec<TypeId> = Vec::new();
        for declaration in &package.types {
            let (id, changed) = work.upsert_type(declaration)?;
            touched.push(id);
            changed_names.extend(changed);
        }

        // Import tables.
        work.replace_imports(&package.updated_source_ids, &package.imports);
        work.replace_module_dependencies(
            &package.updated_module_dependency_source_ids,
            &package.module_dependencies,
        );
        work.replace_exported_imports(
            &package.updated_module_ids,
            &package.module_exported_imports,
        )?;

        // Collect the dirty reference sites: everything touched, every
        // dependent of a changed export name or a touched/removed type,
        // and every site in a source whose import visibility changed.
        for name in &changed_names {
            dirty.extend(work.dependent_sites_on_name(name));
        }
        for &id in &touched {
            dirty.extend(work.dependent_sites_on_type(id));
        }
        let mut import_dirty_sources: HashSet<SourceId> =
            package.updated_source_ids.iter().copied().collect();
        import_dirty_sources.extend(&package.updated_module_dependency_source_ids);
        if !package.updated_module_ids.is_empty() {
            for source in work.import_source_ids() {
                let sees_updated = work
                    .visible_imports(source)
                    .iter()
                    .any(|(module, _)| package.updated_module_ids.contains(module));
                if sees_updated {
                    import_dirty_sources.insert(source);
                }
            }
        }
        for &source in &import_dirty_sources {
            dirty.extend(work.reference_sites_in_source(source));
        }
        dirty.retain(|site| work.contains_type(site.type_id));

        let mut sites: Vec<ReferenceSite> = dirty.into_iter().collect();
        sites.sort_unstable();
        debug!(
            dirty_sites = sites.len(),
            removed = removed_ids.len(),
            "resolving references"
        );

        // Resolution runs in phases: inheritance slots, then direct
        // property types, then aliases (which read the direct results).
        let mut scopes = ScopeCache::default();
        let mut notifications: BTreeSet<Notification> = BTreeSet::new();

        for site in sites
            .iter()
            .filter(|site| matches!(site.slot, ReferenceSlot::Prototype | ReferenceSlot::Extension))
        {
            let Some(record) = work.type_record(site.type_id) else {
                continue;
            };
            let source = record.source;
            let reference = match site.slot {
                ReferenceSlot::Prototype => record.prototype.clone(),
                _ => record.extension.clone(),
            };
            let resolution = resolve_reference(&work, &mut scopes, source, &reference);
            if resolution.is_unresolved() {
                if let Some(name) = reference.literal_name() {
                    notifications.insert(Notification::UnresolvedTypeName {
                        name: name.to_owned(),
                        source,
                    });
                }
            }
            match site.slot {
                ReferenceSlot::Prototype => work.set_prototype_resolution(site.type_id, resolution),
                _ => work.set_extension_resolution(site.type_id, resolution),
            }
        }

        // Inheritance chains must be acyclic before anything walks them.
        let mut chain_roots: BTreeSet<TypeId> = touched.iter().copied().collect();
        chain_roots.extend(sites.iter().map(|site| site.type_id));
        for &id in &chain_roots {
            if prototype_chain_has_cycle(&work, id) {
                return Err(Error::prototype_cycle(type_name(&work, id)));
            }
            if extension_chain_has_cycle(&work, id) {
                return Err(Error::extension_cycle(type_name(&work, id)));
            }
        }

        for site in &sites {
            let ReferenceSlot::PropertyType(ref property_name) = site.slot else {
                continue;
            };
            let Some(record) = work.type_record(site.type_id) else {
                continue;
            };
            let source = record.source;
            // A site can go stale within the batch: the property may have
            // been deleted or re-declared as an alias. Skip those here;
            // the upsert already reset their index entries.
            let Some(reference) = record
                .property(property_name)
                .filter(|p| !p.is_alias())
                .map(|p| p.binding.type_reference().clone())
            else {
                continue;
            };
            let resolution = resolve_reference(&work, &mut scopes, source, &reference);
            if resolution.is_unresolved() {
                if let Some(name) = reference.literal_name() {
                    notifications.insert(Notification::UnresolvedTypeName {
                        name: name.to_owned(),
                        source,
                    });
                }
            }
            work.set_property_type_resolution(site.type_id, property_name, resolution);
        }

        for site in &sites {
            let ReferenceSlot::AliasTarget(ref property_name) = site.slot else {
                continue;
            };
            let Some(record) = work.type_record(site.type_id) else {
                continue;
            };
            // Same staleness as above, mirrored: the property may no
            // longer exist or may have become a direct typed property.
            if !record.property(property_name).is_some_and(|p| p.is_alias()) {
                continue;
            }
            let source = record.source;
            let outcome = resolve_alias(&work, &mut scopes, site.type_id, property_name)?;
            match &outcome.problem {
                Some(AliasProblem::UnresolvedTarget(name)) => {
                    notifications.insert(Notification::UnresolvedTypeName {
                        name: name.clone(),
                        source,
                    });
                }
                Some(AliasProblem::MissingProperty(path)) => {
                    notifications.insert(Notification::MissingProperty {
                        path: path.clone(),
                        source,
                    });
                }
                None => {}
            }
            work.set_alias_resolution(
                site.type_id,
                property_name,
                outcome.resolution,
                outcome.resolved_alias,
                outcome.depends_on,
            );
        }

        // Default properties of the upserted types and of every type
        // whose chain was relinked above.
        for &id in &chain_roots {
            let Some(record) = work.type_record(id) else {
                continue;
            };
            let Some(name) = record.default_property_name.clone() else {
                continue;
            };
            let source = record.source;
            let record_name = record.name.clone();
            match work.find_property(id, &name) {
                Some((_, property_id)) => work.set_default_property(id, Some(property_id)),
                None => {
                    work.set_default_property(id, None);
                    notifications.insert(Notification::MissingDefaultProperty {
                        type_name: record_name,
                        property: name,
                        source,
                    });
                }
            }
        }

        // Commit, then report.
        *self.store.write().unwrap_or_else(PoisonError::into_inner) = work;

        let changed_names: Vec<String> = changed_names.into_iter().collect();
        self.common_types
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .invalidate(&removed_ids, &changed_names);

        if !removed_ids.is_empty() {
            removed_ids.sort_unstable();
            observer.removed_type_ids(&removed_ids);
        }
        for notification in notifications {
            match notification {
                Notification::UnresolvedTypeName { name, source } => {
                    notifier.type_name_cannot_be_resolved(&name, source);
                }
                Notification::MissingProperty { path, source } => {
                    notifier.property_name_does_not_exist(&path, source);
                }
                Notification::MissingDefaultProperty {
                    type_name,
                    property,
                    source,
                } => {
                    notifier.missing_default_property(&type_name, &property, source);
                }
            }
        }
        debug!("batch committed");
        Ok(())
    }
}

fn type_name(store: &Store, id: TypeId) -> String {
    store
        .type_record(id)
        .map_or_else(String::new, |record| record.name.clone())
}
