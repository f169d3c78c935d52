//! Reference resolution: prototypes, extensions, property types, and
//! recoverable failure reporting.

use vellum_foundation::Version;
use vellum_storage::{
    ExportedTypeName, Import, PropertyDeclaration, Resolution, SynchronizationPackage,
    TypeDeclaration, TypeReference,
};

use vellum_engine::Synchronizer;

use crate::support::{document, qml_module, synchronize};

#[test]
fn prototypes_resolve_through_imports() {
    let synchronizer = Synchronizer::new();
    let module = qml_module(&synchronizer, "QtQuick");
    let library = document(&synchronizer, "/qt/quick.qmltypes");
    let project = document(&synchronizer, "/project/MyItem.qml");

    let package = SynchronizationPackage::with_types(
        vec![
            TypeDeclaration::new("QQuickItem", library)
                .with_export(ExportedTypeName::versioned(module, "Item", Version::new(2, 0))),
            TypeDeclaration::new("MyItem", project)
                .with_prototype(TypeReference::imported("Item")),
        ],
        vec![library, project],
    )
    .with_imports(vec![Import::new(module, Version::new(2, 0), project)]);

    let (notifier, _) = synchronize(&synchronizer, &package);
    assert!(notifier.is_empty());

    let snapshot = synchronizer.snapshot();
    let base = snapshot.type_id(library, "QQuickItem").unwrap();
    let mine = snapshot.type_id(project, "MyItem").unwrap();
    assert_eq!(snapshot.prototype_resolution(mine), Resolution::Resolved(base));
    assert_eq!(snapshot.prototype_ids(mine), vec![base]);
}

#[test]
fn unresolved_names_are_stored_and_reported() {
    let synchronizer = Synchronizer::new();
    let project = document(&synchronizer, "/project/MyItem.qml");

    let package = SynchronizationPackage::with_types(
        vec![
            TypeDeclaration::new("MyItem", project)
                .with_prototype(TypeReference::imported("Ghost"))
                .with_property(PropertyDeclaration::typed("other", TypeReference::imported("Ghost"))),
        ],
        vec![project],
    );
    let (notifier, _) = synchronize(&synchronizer, &package);

    // The same missing name from two slots is reported once.
    assert_eq!(notifier.unresolved_type_names, vec![("Ghost".to_owned(), project)]);

    let snapshot = synchronizer.snapshot();
    let mine = snapshot.type_id(project, "MyItem").unwrap();
    assert_eq!(snapshot.prototype_resolution(mine), Resolution::Unresolved);
    let record = snapshot.type_record(mine).unwrap();
    assert_eq!(record.property("other").unwrap().resolved_type, Resolution::Unresolved);
}

#[test]
fn no_prototype_means_none_not_unresolved() {
    let synchronizer = Synchronizer::new();
    let project = document(&synchronizer, "/project/Root.qml");

    let (notifier, _) = synchronize(
        &synchronizer,
        &SynchronizationPackage::with_types(
            vec![TypeDeclaration::new("Root", project)],
            vec![project],
        ),
    );
    assert!(notifier.is_empty());

    let snapshot = synchronizer.snapshot();
    let root = snapshot.type_id(project, "Root").unwrap();
    assert_eq!(snapshot.prototype_resolution(root), Resolution::None);
}

#[test]
fn same_document_names_shadow_imported_ones() {
    let synchronizer = Synchronizer::new();
    let module = qml_module(&synchronizer, "QtQuick");
    let library = document(&synchronizer, "/qt/quick.qmltypes");
    let project = document(&synchronizer, "/project/Doc.qml");

    let package = SynchronizationPackage::with_types(
        vec![
            TypeDeclaration::new("Rectangle", library)
                .with_export(ExportedTypeName::versioned(module, "Rectangle", Version::new(2, 0))),
            // A local type with the colliding name, and a user of it.
            TypeDeclaration::new("Rectangle", project),
            TypeDeclaration::new("Doc", project)
                .with_prototype(TypeReference::imported("Rectangle")),
        ],
        vec![library, project],
    )
    .with_imports(vec![Import::new(module, Version::new(2, 0), project)]);

    synchronize(&synchronizer, &package);

    let snapshot = synchronizer.snapshot();
    let local = snapshot.type_id(project, "Rectangle").unwrap();
    let doc = snapshot.type_id(project, "Doc").unwrap();
    assert_eq!(snapshot.prototype_resolution(doc), Resolution::Resolved(local));
}

#[test]
fn qualified_references_bind_to_their_module_only() {
    let synchronizer = Synchronizer::new();
    let quick = qml_module(&synchronizer, "QtQuick");
    let controls = qml_module(&synchronizer, "QtQuick.Controls");
    let library = document(&synchronizer, "/qt/lib.qmltypes");
    let project = document(&synchronizer, "/project/Doc.qml");

    let package = SynchronizationPackage::with_types(
        vec![
            TypeDeclaration::new("QQuickButtonQuick", library)
                .with_export(ExportedTypeName::versioned(quick, "Button", Version::new(2, 0))),
            TypeDeclaration::new("QQuickButtonControls", library)
                .with_export(ExportedTypeName::versioned(controls, "Button", Version::new(2, 0))),
            TypeDeclaration::new("Doc", project).with_prototype(TypeReference::qualified(
                "Button",
                controls,
                Version::new(2, 0),
            )),
        ],
        vec![library, project],
    )
    .with_imports(vec![
        Import::new(quick, Version::new(2, 0), project),
        Import::new(controls, Version::new(2, 0), project),
    ]);

    synchronize(&synchronizer, &package);

    let snapshot = synchronizer.snapshot();
    let expected = snapshot.type_id(library, "QQuickButtonControls").unwrap();
    let doc = snapshot.type_id(project, "Doc").unwrap();
    assert_eq!(snapshot.prototype_resolution(doc), Resolution::Resolved(expected));
}

#[test]
fn missing_default_property_is_reported() {
    let synchronizer = Synchronizer::new();
    let project = document(&synchronizer, "/project/Panel.qml");

    let (notifier, _) = synchronize(
        &synchronizer,
        &SynchronizationPackage::with_types(
            vec![TypeDeclaration::new("Panel", project).with_default_property("content")],
            vec![project],
        ),
    );
    assert_eq!(
        notifier.missing_default_properties,
        vec![("Panel".to_owned(), "content".to_owned(), project)]
    );

    let snapshot = synchronizer.snapshot();
    let panel = snapshot.type_id(project, "Panel").unwrap();
    assert_eq!(snapshot.default_property(panel), None);
}

#[test]
fn default_property_may_be_inherited() {
    let synchronizer = Synchronizer::new();
    let project = document(&synchronizer, "/project/Panel.qml");

    let package = SynchronizationPackage::with_types(
        vec![
            TypeDeclaration::new("Base", project)
                .with_property(PropertyDeclaration::typed("children", TypeReference::imported("Base")))
                .with_default_property("children"),
            TypeDeclaration::new("Panel", project)
                .with_prototype(TypeReference::imported("Base"))
                .with_default_property("children"),
        ],
        vec![project],
    );
    let (notifier, _) = synchronize(&synchronizer, &package);
    assert!(notifier.missing_default_properties.is_empty());

    let snapshot = synchronizer.snapshot();
    let base = snapshot.type_id(project, "Base").unwrap();
    let panel = snapshot.type_id(project, "Panel").unwrap();
    let children = snapshot.type_record(base).unwrap().property("children").unwrap().id;
    assert_eq!(snapshot.default_property(panel), Some(children));
}
