//! Integration tests for the version-matching rule.

use vellum_foundation::Version;

#[test]
fn exact_match_satisfies() {
    assert!(Version::new(2, 3).satisfies(Version::new(2, 3)));
}

#[test]
fn lower_minor_satisfies_higher_request() {
    assert!(Version::new(2, 0).satisfies(Version::new(2, 3)));
    assert!(Version::new(2, 2).satisfies(Version::new(2, 3)));
}

#[test]
fn higher_minor_does_not_satisfy() {
    assert!(!Version::new(2, 4).satisfies(Version::new(2, 3)));
    assert!(!Version::new(2, 11).satisfies(Version::new(2, 3)));
}

#[test]
fn other_majors_never_satisfy() {
    assert!(!Version::new(1, 0).satisfies(Version::new(2, 0)));
    assert!(!Version::new(3, 0).satisfies(Version::new(2, 99)));
}

#[test]
fn versionless_export_satisfies_any_request() {
    assert!(Version::none().satisfies(Version::new(2, 3)));
    assert!(Version::none().satisfies(Version::major(7)));
    assert!(Version::none().satisfies(Version::none()));
}

#[test]
fn unversioned_request_is_satisfied_by_everything() {
    assert!(Version::new(1, 0).satisfies(Version::none()));
    assert!(Version::major(4).satisfies(Version::none()));
}

#[test]
fn major_only_request_has_no_minor_bound() {
    assert!(Version::new(2, 0).satisfies(Version::major(2)));
    assert!(Version::new(2, 15).satisfies(Version::major(2)));
    assert!(!Version::new(1, 15).satisfies(Version::major(2)));
}

#[test]
fn absent_export_minor_counts_as_zero() {
    assert!(Version::major(2).satisfies(Version::new(2, 0)));
    assert!(Version::major(2).satisfies(Version::new(2, 9)));
}

#[test]
fn ordering_puts_versionless_lowest() {
    let mut versions = vec![
        Version::new(2, 1),
        Version::none(),
        Version::new(1, 9),
        Version::major(2),
        Version::new(2, 0),
    ];
    versions.sort();
    assert_eq!(
        versions,
        vec![
            Version::none(),
            Version::new(1, 9),
            Version::major(2),
            Version::new(2, 0),
            Version::new(2, 1),
        ]
    );
}

#[test]
fn display_formats() {
    assert_eq!(Version::new(2, 3).to_string(), "2.3");
    assert_eq!(Version::major(2).to_string(), "2");
    assert_eq!(Version::none().to_string(), "-");
}
