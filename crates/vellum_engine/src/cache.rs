//! Memoized lookup of frequently requested exported types.
//!
//! Callers ask for well-known types (the object base type, item types,
//! state types) far more often than the store changes, so the hits are
//! cached by (module name, kind, exported name). The synchronizer
//! invalidates entries precisely: only removed types and types whose
//! exported names changed fall out of the cache.

use std::collections::HashMap;

use vellum_foundation::{ModuleKind, TypeId, Version};
use vellum_storage::Store;

/// Cache of commonly used exported-type lookups.
#[derive(Debug, Default)]
pub struct CommonTypeCache {
    entries: HashMap<(String, ModuleKind, String), TypeId>,
}

impl CommonTypeCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up an exported type, memoizing the hit.
    ///
    /// Lookups are unversioned: the highest versioned export wins, with a
    /// versionless export as fallback.
    pub fn type_id(
        &mut self,
        store: &Store,
        module_name: &str,
        kind: ModuleKind,
        type_name: &str,
    ) -> Option<TypeId> {
        let key = (module_name.to_owned(), kind, type_name.to_owned());
        if let Some(&id) = self.entries.get(&key) {
            if store.contains_type(id) {
                return Some(id);
            }
            self.entries.remove(&key);
        }
        let module = store.modules().find(module_name, kind)?;
        let id = store.type_id_by_exported_name(module, type_name, Version::none())?;
        self.entries.insert(key, id);
        Some(id)
    }

    /// Drops entries affected by a committed batch: any cached id that was
    /// removed, and any cached name whose export rows changed.
    pub fn invalidate(&mut self, removed: &[TypeId], changed_names: &[String]) {
        if removed.is_empty() && changed_names.is_empty() {
            return;
        }
        self.entries.retain(|(_, _, name), id| {
            !removed.contains(id) && !changed_names.iter().any(|changed| changed == name)
        });
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
