//! Callback seams for recoverable problems and post-commit changes.
//!
//! Recoverable resolution failures never fail a batch; they are delivered
//! here after a successful commit, deduplicated and in a deterministic
//! order. Fatal errors abort the batch and nothing is delivered.

use vellum_foundation::{SourceId, TypeId};

/// Receiver of recoverable resolution problems.
///
/// Implementations must not call back into the synchronizer; they run
/// while the writer lock is held.
pub trait ErrorNotifier {
    /// A type reference could not be matched to any stored type.
    fn type_name_cannot_be_resolved(&mut self, type_name: &str, source: SourceId);

    /// An alias chain names a property its target type does not have.
    fn property_name_does_not_exist(&mut self, path: &str, source: SourceId);

    /// A declared default property does not exist on the type or its
    /// inherited chain.
    fn missing_default_property(&mut self, type_name: &str, property_name: &str, source: SourceId);
}

/// Receiver of post-commit change reports.
pub trait ChangeObserver {
    /// Types removed by the committed batch. Their ids are retired and
    /// will never be handed out again.
    fn removed_type_ids(&mut self, ids: &[TypeId]);
}

/// An [`ErrorNotifier`] that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl ErrorNotifier for NullNotifier {
    fn type_name_cannot_be_resolved(&mut self, _type_name: &str, _source: SourceId) {}
    fn property_name_does_not_exist(&mut self, _path: &str, _source: SourceId) {}
    fn missing_default_property(
        &mut self,
        _type_name: &str,
        _property_name: &str,
        _source: SourceId,
    ) {
    }
}

/// A [`ChangeObserver`] that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ChangeObserver for NullObserver {
    fn removed_type_ids(&mut self, _ids: &[TypeId]) {}
}

/// An [`ErrorNotifier`] that records every delivery, for tests and
/// diagnostics.
#[derive(Debug, Default, Clone)]
pub struct CollectingNotifier {
    /// Recorded unresolved type names.
    pub unresolved_type_names: Vec<(String, SourceId)>,
    /// Recorded missing alias properties, as dotted paths.
    pub missing_properties: Vec<(String, SourceId)>,
    /// Recorded missing default properties as (type, property).
    pub missing_default_properties: Vec<(String, String, SourceId)>,
}

impl CollectingNotifier {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if nothing was delivered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unresolved_type_names.is_empty()
            && self.missing_properties.is_empty()
            && self.missing_default_properties.is_empty()
    }
}

impl ErrorNotifier for CollectingNotifier {
    fn type_name_cannot_be_resolved(&mut self, type_name: &str, source: SourceId) {
        self.unresolved_type_names.push((type_name.to_owned(), source));
    }

    fn property_name_does_not_exist(&mut self, path: &str, source: SourceId) {
        self.missing_properties.push((path.to_owned(), source));
    }

    fn missing_default_property(&mut self, type_name: &str, property_name: &str, source: SourceId) {
        self.missing_default_properties
            .push((type_name.to_owned(), property_name.to_owned(), source));
    }
}

/// A [`ChangeObserver`] that records every delivery.
#[derive(Debug, Default, Clone)]
pub struct CollectingObserver {
    /// Every removed type id reported so far.
    pub removed: Vec<TypeId>,
}

impl CollectingObserver {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChangeObserver for CollectingObserver {
    fn removed_type_ids(&mut self, ids: &[TypeId]) {
        self.removed.extend_from_slice(ids);
    }
}
