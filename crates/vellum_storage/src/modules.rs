//! Append-only interning of (name, kind) module pairs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use vellum_foundation::{ModuleId, ModuleKind, VlMap};

/// A module as interned: its name and namespace kind.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Module {
    /// Module name.
    pub name: String,
    /// Namespace kind.
    pub kind: ModuleKind,
}

/// Interner for module identifiers.
///
/// Append-only: ids are permanent and survive every synchronization.
/// Cloning is O(1); the store embeds one per snapshot.
#[derive(Clone, Debug, Default)]
pub struct ModuleStore {
    /// Module storage, indexed by id.
    modules: im::Vector<Module>,
    /// Map from (name, kind) to id.
    ids: VlMap<(String, ModuleKind), ModuleId>,
}

impl ModuleStore {
    /// Creates an empty module store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a (name, kind) pair, returning its module id.
    ///
    /// The same pair always maps to the same id; the same name under a
    /// different kind is a distinct module.
    ///
    /// # Panics
    ///
    /// Panics if the number of interned modules exceeds the id space.
    pub fn module_id(&mut self, name: &str, kind: ModuleKind) -> ModuleId {
        let key = (name.to_owned(), kind);
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }
        let index = u32::try_from(self.modules.len()).expect("too many modules");
        let id = ModuleId::new(index);
        self.modules.push_back(Module {
            name: name.to_owned(),
            kind,
        });
        self.ids.insert(key, id);
        id
    }

    /// Looks up an already-interned pair without interning.
    #[must_use]
    pub fn find(&self, name: &str, kind: ModuleKind) -> Option<ModuleId> {
        self.ids.get(&(name.to_owned(), kind)).copied()
    }

    /// Gets the module for an id.
    #[must_use]
    pub fn get(&self, id: ModuleId) -> Option<&Module> {
        self.modules.get(id.index() as usize)
    }

    /// Returns true if the id was handed out by this store.
    #[must_use]
    pub fn contains(&self, id: ModuleId) -> bool {
        (id.index() as usize) < self.modules.len()
    }

    /// Returns the number of interned modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns true if no modules have been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
