//! Cycle detection over resolved inheritance chains.

use std::collections::HashSet;

use vellum_foundation::TypeId;
use vellum_storage::Store;

/// Walks a single-successor chain from `start` and reports whether it
/// revisits any node.
pub(crate) fn chain_has_cycle(
    start: TypeId,
    mut next: impl FnMut(TypeId) -> Option<TypeId>,
) -> bool {
    let mut seen = HashSet::new();
    let mut current = Some(start);
    while let Some(id) = current {
        if !seen.insert(id) {
            return true;
        }
        current = next(id);
    }
    false
}

/// Whether the resolved prototype chain starting at `start` cycles.
pub(crate) fn prototype_chain_has_cycle(store: &Store, start: TypeId) -> bool {
    chain_has_cycle(start, |id| store.prototype_resolution(id).type_id())
}

/// Whether the resolved extension chain starting at `start` cycles.
pub(crate) fn extension_chain_has_cycle(store: &Store, start: TypeId) -> bool {
    chain_has_cycle(start, |id| store.extension_resolution(id).type_id())
}
