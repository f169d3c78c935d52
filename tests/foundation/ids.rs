//! Integration tests for identifier newtypes.

use vellum_foundation::{ModuleId, ModuleKind, PropertyDeclarationId, SourceId, TypeId};

#[test]
fn source_ids_are_ordered_by_index() {
    let mut ids = vec![SourceId::new(3), SourceId::new(1), SourceId::new(2)];
    ids.sort();
    assert_eq!(ids, vec![SourceId::new(1), SourceId::new(2), SourceId::new(3)]);
}

#[test]
fn null_source_id_is_distinguished() {
    assert!(SourceId::null().is_null());
    assert_ne!(SourceId::null(), SourceId::new(0));
    // The sentinel orders above every real id, so sorting keeps it last.
    assert!(SourceId::new(u32::MAX - 1) < SourceId::null());
}

#[test]
fn ids_of_different_kinds_do_not_mix() {
    // A compile-time property really, but keep the raw index accessors
    // honest.
    assert_eq!(ModuleId::new(5).index(), 5);
    assert_eq!(TypeId::new(5).index(), 5);
    assert_eq!(PropertyDeclarationId::new(5).index(), 5);
}

#[test]
fn module_kinds_are_namespaces() {
    let kinds = [
        ModuleKind::QmlLibrary,
        ModuleKind::CppLibrary,
        ModuleKind::PathLibrary,
    ];
    for (i, a) in kinds.iter().enumerate() {
        for (j, b) in kinds.iter().enumerate() {
            assert_eq!(i == j, a == b);
        }
    }
}

#[test]
fn debug_output_is_readable() {
    assert_eq!(format!("{:?}", TypeId::new(12)), "TypeId(12)");
    assert_eq!(format!("{:?}", SourceId::null()), "SourceId(null)");
    assert_eq!(format!("{:?}", ModuleId::new(0)), "ModuleId(0)");
}
