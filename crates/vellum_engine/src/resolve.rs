//! Reference resolution against one working snapshot.
//!
//! Unqualified names resolve first against types declared in the same
//! source, then through the source's visible-import closure. Qualified
//! names resolve only through their named module. Version selection is
//! "highest satisfying wins"; a versionless export loses to any versioned
//! match.

use std::collections::HashMap;

use vellum_foundation::{ModuleId, SourceId, Version};
use vellum_storage::{Resolution, Store, TypeReference};

/// Per-batch memo of visible-import closures.
///
/// Import tables do not change during the resolution phase of a batch, so
/// each source's closure is computed at most once.
#[derive(Default)]
pub(crate) struct ScopeCache {
    scopes: HashMap<SourceId, Vec<(ModuleId, Version)>>,
}

impl ScopeCache {
    pub(crate) fn scope(&mut self, store: &Store, source: SourceId) -> &[(ModuleId, Version)] {
        self.scopes
            .entry(source)
            .or_insert_with(|| store.visible_imports(source))
    }
}

/// Resolves one authored reference from the viewpoint of `source`.
pub(crate) fn resolve_reference(
    store: &Store,
    scopes: &mut ScopeCache,
    source: SourceId,
    reference: &TypeReference,
) -> Resolution {
    match reference {
        TypeReference::None => Resolution::None,
        TypeReference::Resolved(id) => {
            if store.contains_type(*id) {
                Resolution::Resolved(*id)
            } else {
                Resolution::Unresolved
            }
        }
        TypeReference::Imported(name) => {
            if let Some(id) = store.type_id(source, name) {
                return Resolution::Resolved(id);
            }
            let scope = scopes.scope(store, source);
            store
                .exported_type_id(name, scope)
                .map_or(Resolution::Unresolved, Resolution::Resolved)
        }
        TypeReference::QualifiedImported {
            name,
            module,
            version,
        } => store
            .type_id_by_exported_name(*module, name, *version)
            .map_or(Resolution::Unresolved, Resolution::Resolved),
    }
}
