//! Batch application basics: replacement semantics, preserved ids,
//! removal reporting, and peripheral rows flowing through one package.

use vellum_foundation::Version;
use vellum_storage::{
    ExportedTypeName, FileStatus, PropertyDeclaration, SynchronizationPackage, TypeDeclaration,
    TypeReference,
};

use vellum_engine::Synchronizer;

use crate::support::{document, qml_module, synchronize};

#[test]
fn updated_sources_are_fully_replaced() {
    let synchronizer = Synchronizer::new();
    let source = document(&synchronizer, "/project/Main.qml");

    let package = SynchronizationPackage::with_types(
        vec![
            TypeDeclaration::new("Main", source),
            TypeDeclaration::new("Helper", source),
        ],
        vec![source],
    );
    synchronize(&synchronizer, &package);
    assert_eq!(synchronizer.snapshot().type_count(), 2);

    // The next batch for the same source omits Helper, so Helper goes.
    let package = SynchronizationPackage::with_types(
        vec![TypeDeclaration::new("Main", source)],
        vec![source],
    );
    let (_, observer) = synchronize(&synchronizer, &package);

    let snapshot = synchronizer.snapshot();
    assert_eq!(snapshot.type_count(), 1);
    assert!(snapshot.type_id(source, "Helper").is_none());
    assert_eq!(observer.removed.len(), 1);
}

#[test]
fn unrelated_sources_are_left_alone() {
    let synchronizer = Synchronizer::new();
    let first = document(&synchronizer, "/project/First.qml");
    let second = document(&synchronizer, "/project/Second.qml");

    synchronize(
        &synchronizer,
        &SynchronizationPackage::with_types(
            vec![
                TypeDeclaration::new("First", first),
                TypeDeclaration::new("Second", second),
            ],
            vec![first, second],
        ),
    );

    // Only `first` is updated; `second`'s types must survive untouched.
    synchronize(
        &synchronizer,
        &SynchronizationPackage::with_types(vec![], vec![first]),
    );

    let snapshot = synchronizer.snapshot();
    assert!(snapshot.type_id(second, "Second").is_some());
    assert!(snapshot.type_id(first, "First").is_none());
}

#[test]
fn type_and_property_ids_survive_updates() {
    let synchronizer = Synchronizer::new();
    let source = document(&synchronizer, "/project/Item.qml");

    let declaration = TypeDeclaration::new("Item", source).with_property(
        PropertyDeclaration::typed("width", TypeReference::imported("double")),
    );
    synchronize(
        &synchronizer,
        &SynchronizationPackage::with_types(vec![declaration.clone()], vec![source]),
    );
    let before = synchronizer.snapshot();
    let type_id = before.type_id(source, "Item").unwrap();
    let width_id = before.type_record(type_id).unwrap().property("width").unwrap().id;

    synchronize(
        &synchronizer,
        &SynchronizationPackage::with_types(vec![declaration], vec![source]),
    );
    let after = synchronizer.snapshot();
    assert_eq!(after.type_id(source, "Item"), Some(type_id));
    assert_eq!(
        after.type_record(type_id).unwrap().property("width").unwrap().id,
        width_id
    );
}

#[test]
fn removed_ids_are_reported_once_and_sorted() {
    let synchronizer = Synchronizer::new();
    let source = document(&synchronizer, "/project/Many.qml");

    synchronize(
        &synchronizer,
        &SynchronizationPackage::with_types(
            vec![
                TypeDeclaration::new("A", source),
                TypeDeclaration::new("B", source),
                TypeDeclaration::new("C", source),
            ],
            vec![source],
        ),
    );
    let (_, observer) = synchronize(
        &synchronizer,
        &SynchronizationPackage::with_types(vec![], vec![source]),
    );

    assert_eq!(observer.removed.len(), 3);
    let mut sorted = observer.removed.clone();
    sorted.sort_unstable();
    assert_eq!(observer.removed, sorted);
}

#[test]
fn peripheral_rows_ride_in_the_same_package() {
    let synchronizer = Synchronizer::new();
    let module = qml_module(&synchronizer, "Project");
    let source = document(&synchronizer, "/project/Main.qml");

    let mut package = SynchronizationPackage::with_types(
        vec![
            TypeDeclaration::new("Main", source)
                .with_export(ExportedTypeName::versioned(module, "Main", Version::new(1, 0))),
        ],
        vec![source],
    );
    package.file_statuses = vec![FileStatus::new(source, 512, 42)];
    package.updated_file_status_source_ids = vec![source];

    synchronize(&synchronizer, &package);

    let snapshot = synchronizer.snapshot();
    assert_eq!(snapshot.file_status(source), Some(FileStatus::new(source, 512, 42)));
    assert!(snapshot.type_id(source, "Main").is_some());
}

#[test]
fn invalid_file_status_aborts_the_whole_batch() {
    let synchronizer = Synchronizer::new();
    let source = document(&synchronizer, "/project/Main.qml");

    let mut package = SynchronizationPackage::with_types(
        vec![TypeDeclaration::new("Main", source)],
        vec![source],
    );
    package.file_statuses = vec![FileStatus::new(vellum_foundation::SourceId::null(), 0, 0)];

    crate::support::synchronize_err(&synchronizer, &package);
    // The type from the same package must not have been committed.
    assert_eq!(synchronizer.snapshot().type_count(), 0);
}
