//! Interning of file-system paths into stable source identifiers.
//!
//! Directory paths are interned as [`SourceContextId`] and (directory,
//! file name) pairs as [`SourceId`]. The cache is append-only: ids are
//! permanent and never invalidated by synchronization.

use std::collections::HashMap;
use std::sync::Arc;

use crate::ids::{SourceContextId, SourceId};

/// Append-only interner for directory contexts and source files.
///
/// Not thread-safe on its own; callers that share a cache across threads
/// wrap it in a lock.
#[derive(Clone, Debug, Default)]
pub struct SourcePathCache {
    /// Directory path storage, indexed by context id.
    contexts: Vec<Arc<str>>,
    /// Map from directory path to its context id.
    context_ids: HashMap<Arc<str>, SourceContextId>,
    /// Source storage: (owning context, file name), indexed by source id.
    sources: Vec<(SourceContextId, Arc<str>)>,
    /// Map from (context, file name) to source id.
    source_ids: HashMap<(SourceContextId, Arc<str>), SourceId>,
}

impl SourcePathCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a directory path, returning its context id.
    ///
    /// # Panics
    ///
    /// Panics if the number of interned contexts exceeds the id space.
    pub fn source_context_id(&mut self, directory_path: &str) -> SourceContextId {
        if let Some(&id) = self.context_ids.get(directory_path) {
            return id;
        }
        let index = u32::try_from(self.contexts.len()).expect("too many source contexts");
        debug_assert!(index != u32::MAX, "source context id space exhausted");
        let id = SourceContextId::new(index);
        let arc: Arc<str> = directory_path.into();
        self.contexts.push(arc.clone());
        self.context_ids.insert(arc, id);
        id
    }

    /// Interns a file name under an already-interned context.
    ///
    /// # Panics
    ///
    /// Panics if the number of interned sources exceeds the id space.
    pub fn source_id_in(&mut self, context: SourceContextId, file_name: &str) -> SourceId {
        let arc: Arc<str> = file_name.into();
        if let Some(&id) = self.source_ids.get(&(context, arc.clone())) {
            return id;
        }
        let index = u32::try_from(self.sources.len()).expect("too many sources");
        debug_assert!(index != u32::MAX, "source id space exhausted");
        let id = SourceId::new(index);
        self.sources.push((context, arc.clone()));
        self.source_ids.insert((context, arc), id);
        id
    }

    /// Interns a full source path, splitting off the parent directory.
    ///
    /// A path without a separator is interned under the empty context.
    pub fn source_id(&mut self, source_path: &str) -> SourceId {
        let (directory, file_name) = match source_path.rsplit_once('/') {
            Some((directory, file_name)) => (directory, file_name),
            None => ("", source_path),
        };
        let context = self.source_context_id(directory);
        self.source_id_in(context, file_name)
    }

    /// Returns the directory path for a context id.
    #[must_use]
    pub fn source_context_path(&self, id: SourceContextId) -> Option<&str> {
        self.contexts.get(id.index() as usize).map(AsRef::as_ref)
    }

    /// Returns the owning context of a source.
    #[must_use]
    pub fn source_context(&self, id: SourceId) -> Option<SourceContextId> {
        self.sources.get(id.index() as usize).map(|(ctx, _)| *ctx)
    }

    /// Returns the file name of a source.
    #[must_use]
    pub fn source_name(&self, id: SourceId) -> Option<&str> {
        self.sources
            .get(id.index() as usize)
            .map(|(_, name)| name.as_ref())
    }

    /// Reassembles the full path of a source.
    #[must_use]
    pub fn source_path(&self, id: SourceId) -> Option<String> {
        let (context, name) = self.sources.get(id.index() as usize)?;
        let directory = self.source_context_path(*context)?;
        if directory.is_empty() {
            Some(name.to_string())
        } else {
            Some(format!("{directory}/{name}"))
        }
    }

    /// Returns the number of interned sources.
    #[must_use]
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Returns the number of interned contexts.
    #[must_use]
    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }
}
