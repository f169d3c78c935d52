//! Alias chains: direct, tailed, chained through other aliases, and
//! relinked when intermediate types change.

use vellum_foundation::Version;
use vellum_storage::{
    ExportedTypeName, Import, PropertyDeclaration, PropertyTraits, ReferenceSite, ReferenceSlot,
    Resolution, SynchronizationPackage, TypeDeclaration, TypeReference,
};

use vellum_engine::Synchronizer;

use crate::support::{document, qml_module, synchronize};

#[test]
fn alias_resolves_to_the_ultimate_property() {
    // `items` aliases Item.children, whose own type is QQuickItem.
    let synchronizer = Synchronizer::new();
    let module = qml_module(&synchronizer, "QtQuick");
    let library = document(&synchronizer, "/qt/quick.qmltypes");
    let project = document(&synchronizer, "/project/Panel.qml");

    let package = SynchronizationPackage::with_types(
        vec![
            TypeDeclaration::new("QQuickItem", library)
                .with_export(ExportedTypeName::versioned(module, "Item", Version::new(2, 0)))
                .with_property(
                    PropertyDeclaration::typed("children", TypeReference::imported("Item"))
                        .with_traits(PropertyTraits::list()),
                ),
            TypeDeclaration::new("Panel", project).with_property(PropertyDeclaration::aliased(
                "items",
                TypeReference::imported("Item"),
                "children",
            )),
        ],
        vec![library, project],
    )
    .with_imports(vec![
        Import::new(module, Version::new(2, 0), library),
        Import::new(module, Version::new(2, 0), project),
    ]);

    let (notifier, _) = synchronize(&synchronizer, &package);
    assert!(notifier.is_empty());

    let snapshot = synchronizer.snapshot();
    let item = snapshot.type_id(library, "QQuickItem").unwrap();
    let panel = snapshot.type_id(project, "Panel").unwrap();
    let children = snapshot.type_record(item).unwrap().property("children").unwrap().id;
    let items = snapshot.type_record(panel).unwrap().property("items").unwrap();

    assert_eq!(items.resolved_alias, Some((item, children)));
    assert_eq!(items.resolved_type, Resolution::Resolved(item));
}

#[test]
fn alias_reports_a_missing_target_property() {
    let synchronizer = Synchronizer::new();
    let project = document(&synchronizer, "/project/Panel.qml");

    let package = SynchronizationPackage::with_types(
        vec![
            TypeDeclaration::new("Holder", project),
            TypeDeclaration::new("Panel", project).with_property(PropertyDeclaration::aliased(
                "items",
                TypeReference::imported("Holder"),
                "children",
            )),
        ],
        vec![project],
    );
    let (notifier, _) = synchronize(&synchronizer, &package);
    assert_eq!(
        notifier.missing_properties,
        vec![("Holder.children".to_owned(), project)]
    );

    let snapshot = synchronizer.snapshot();
    let panel = snapshot.type_id(project, "Panel").unwrap();
    let items = snapshot.type_record(panel).unwrap().property("items").unwrap();
    assert_eq!(items.resolved_type, Resolution::Unresolved);
    assert_eq!(items.resolved_alias, None);
}

#[test]
fn alias_with_tail_descends_into_the_property_type() {
    let synchronizer = Synchronizer::new();
    let project = document(&synchronizer, "/project/App.qml");

    let package = SynchronizationPackage::with_types(
        vec![
            TypeDeclaration::new("Inner", project).with_property(PropertyDeclaration::typed(
                "kids",
                TypeReference::imported("Inner"),
            )),
            TypeDeclaration::new("Holder", project).with_property(PropertyDeclaration::typed(
                "content",
                TypeReference::imported("Inner"),
            )),
            TypeDeclaration::new("App", project).with_property(PropertyDeclaration::aliased_tail(
                "kids",
                TypeReference::imported("Holder"),
                "content",
                "kids",
            )),
        ],
        vec![project],
    );
    let (notifier, _) = synchronize(&synchronizer, &package);
    assert!(notifier.is_empty());

    let snapshot = synchronizer.snapshot();
    let inner = snapshot.type_id(project, "Inner").unwrap();
    let app = snapshot.type_id(project, "App").unwrap();
    let inner_kids = snapshot.type_record(inner).unwrap().property("kids").unwrap().id;
    let app_kids = snapshot.type_record(app).unwrap().property("kids").unwrap();
    assert_eq!(app_kids.resolved_alias, Some((inner, inner_kids)));
    assert_eq!(app_kids.resolved_type, Resolution::Resolved(inner));
}

#[test]
fn alias_chains_follow_other_aliases() {
    let synchronizer = Synchronizer::new();
    let project = document(&synchronizer, "/project/App.qml");

    let package = SynchronizationPackage::with_types(
        vec![
            TypeDeclaration::new("Leaf", project).with_property(PropertyDeclaration::typed(
                "value",
                TypeReference::imported("Leaf"),
            )),
            TypeDeclaration::new("Middle", project).with_property(PropertyDeclaration::aliased(
                "forwarded",
                TypeReference::imported("Leaf"),
                "value",
            )),
            TypeDeclaration::new("App", project).with_property(PropertyDeclaration::aliased(
                "doubly",
                TypeReference::imported("Middle"),
                "forwarded",
            )),
        ],
        vec![project],
    );
    let (notifier, _) = synchronize(&synchronizer, &package);
    assert!(notifier.is_empty());

    let snapshot = synchronizer.snapshot();
    let leaf = snapshot.type_id(project, "Leaf").unwrap();
    let app = snapshot.type_id(project, "App").unwrap();
    let value = snapshot.type_record(leaf).unwrap().property("value").unwrap().id;
    let doubly = snapshot.type_record(app).unwrap().property("doubly").unwrap();
    assert_eq!(doubly.resolved_alias, Some((leaf, value)));
}

#[test]
fn aliases_relink_when_the_target_type_changes() {
    let synchronizer = Synchronizer::new();
    let module = qml_module(&synchronizer, "QtQuick");
    let library = document(&synchronizer, "/qt/quick.qmltypes");
    let project = document(&synchronizer, "/project/Panel.qml");

    synchronize(
        &synchronizer,
        &SynchronizationPackage::with_types(
            vec![
                TypeDeclaration::new("QQuickItem", library)
                    .with_export(ExportedTypeName::versioned(module, "Item", Version::new(2, 0)))
                    .with_property(PropertyDeclaration::typed("children", TypeReference::imported("Item"))),
                TypeDeclaration::new("Panel", project).with_property(PropertyDeclaration::aliased(
                    "items",
                    TypeReference::imported("Item"),
                    "children",
                )),
            ],
            vec![library, project],
        )
        .with_imports(vec![
            Import::new(module, Version::new(2, 0), library),
            Import::new(module, Version::new(2, 0), project),
        ]),
    );

    // The library drops the `children` property in a later batch. The
    // alias in the untouched project source must break.
    let (notifier, _) = synchronize(
        &synchronizer,
        &SynchronizationPackage::with_types(
            vec![
                TypeDeclaration::new("QQuickItem", library)
                    .with_export(ExportedTypeName::versioned(module, "Item", Version::new(2, 0))),
            ],
            vec![library],
        ),
    );
    assert_eq!(
        notifier.missing_properties,
        vec![("QQuickItem.children".to_owned(), project)]
    );

    let snapshot = synchronizer.snapshot();
    let panel = snapshot.type_id(project, "Panel").unwrap();
    let items = snapshot.type_record(panel).unwrap().property("items").unwrap();
    assert_eq!(items.resolved_type, Resolution::Unresolved);
    assert_eq!(items.resolved_alias, None);
}

#[test]
fn alias_redeclared_as_direct_property_survives_target_removal() {
    // One batch removes the alias's former target type and re-declares
    // the property with a direct binding; the batch must still commit.
    let synchronizer = Synchronizer::new();
    let module = qml_module(&synchronizer, "QtQuick");
    let library = document(&synchronizer, "/qt/quick.qmltypes");
    let project = document(&synchronizer, "/project/Panel.qml");

    synchronize(
        &synchronizer,
        &SynchronizationPackage::with_types(
            vec![
                TypeDeclaration::new("QQuickItem", library)
                    .with_export(ExportedTypeName::versioned(module, "Item", Version::new(1, 0)))
                    .with_property(PropertyDeclaration::typed("children", TypeReference::imported("Item"))),
                TypeDeclaration::new("Panel", project).with_property(PropertyDeclaration::aliased(
                    "slot",
                    TypeReference::imported("Item"),
                    "children",
                )),
            ],
            vec![library, project],
        )
        .with_imports(vec![
            Import::new(module, Version::new(1, 0), library),
            Import::new(module, Version::new(1, 0), project),
        ]),
    );

    let (notifier, observer) = synchronize(
        &synchronizer,
        &SynchronizationPackage::with_types(
            vec![
                TypeDeclaration::new("Panel", project).with_property(PropertyDeclaration::typed(
                    "slot",
                    TypeReference::imported("Panel"),
                )),
            ],
            vec![library, project],
        )
        .with_imports(vec![Import::new(module, Version::new(1, 0), project)]),
    );
    assert_eq!(observer.removed.len(), 1);
    assert!(notifier.is_empty());

    let snapshot = synchronizer.snapshot();
    let panel = snapshot.type_id(project, "Panel").unwrap();
    let slot = snapshot.type_record(panel).unwrap().property("slot").unwrap();
    assert!(!slot.is_alias());
    assert_eq!(slot.resolved_type, Resolution::Resolved(panel));
    assert_eq!(slot.resolved_alias, None);
}

#[test]
fn direct_property_redeclared_as_alias_relinks() {
    let synchronizer = Synchronizer::new();
    let project = document(&synchronizer, "/project/App.qml");

    synchronize(
        &synchronizer,
        &SynchronizationPackage::with_types(
            vec![
                TypeDeclaration::new("Holder", project).with_property(PropertyDeclaration::typed(
                    "content",
                    TypeReference::imported("Holder"),
                )),
                TypeDeclaration::new("App", project).with_property(PropertyDeclaration::typed(
                    "stuff",
                    TypeReference::imported("Holder"),
                )),
            ],
            vec![project],
        ),
    );

    // `stuff` becomes an alias into Holder in the next batch.
    let (notifier, _) = synchronize(
        &synchronizer,
        &SynchronizationPackage::with_types(
            vec![
                TypeDeclaration::new("Holder", project).with_property(PropertyDeclaration::typed(
                    "content",
                    TypeReference::imported("Holder"),
                )),
                TypeDeclaration::new("App", project).with_property(PropertyDeclaration::aliased(
                    "stuff",
                    TypeReference::imported("Holder"),
                    "content",
                )),
            ],
            vec![project],
        ),
    );
    assert!(notifier.is_empty());

    let snapshot = synchronizer.snapshot();
    let holder = snapshot.type_id(project, "Holder").unwrap();
    let app = snapshot.type_id(project, "App").unwrap();
    let content = snapshot.type_record(holder).unwrap().property("content").unwrap().id;
    let stuff = snapshot.type_record(app).unwrap().property("stuff").unwrap();
    assert_eq!(stuff.resolved_alias, Some((holder, content)));
    assert_eq!(stuff.resolved_type, Resolution::Resolved(holder));

    // The index carries the alias site and no leftover direct-binding site.
    let sites = snapshot.dependent_sites_on_type(holder);
    assert!(sites.contains(&ReferenceSite::new(
        app,
        ReferenceSlot::AliasTarget("stuff".to_owned()),
    )));
    assert!(!sites.contains(&ReferenceSite::new(
        app,
        ReferenceSlot::PropertyType("stuff".to_owned()),
    )));
}

#[test]
fn alias_traits_stay_with_the_declaration() {
    let synchronizer = Synchronizer::new();
    let project = document(&synchronizer, "/project/App.qml");

    let package = SynchronizationPackage::with_types(
        vec![
            TypeDeclaration::new("Holder", project).with_property(
                PropertyDeclaration::typed("content", TypeReference::imported("Holder"))
                    .with_traits(PropertyTraits::list()),
            ),
            TypeDeclaration::new("App", project).with_property(
                PropertyDeclaration::aliased("stuff", TypeReference::imported("Holder"), "content")
                    .with_traits(PropertyTraits::read_only()),
            ),
        ],
        vec![project],
    );
    synchronize(&synchronizer, &package);

    let snapshot = synchronizer.snapshot();
    let app = snapshot.type_id(project, "App").unwrap();
    let stuff = snapshot.type_record(app).unwrap().property("stuff").unwrap();
    // The alias declaration keeps its own traits; the target's are not
    // copied over.
    assert!(stuff.traits.is_read_only);
    assert!(!stuff.traits.is_list);
}
