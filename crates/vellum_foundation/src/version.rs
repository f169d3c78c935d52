//! Module export versions and the version-matching rule.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A module or export version.
///
/// Both components are optional: a fully absent version marks a
/// versionless export or an unversioned request, and a major-only version
/// means "any minor of this major".
///
/// The derived ordering is lexicographic over `(major, minor)` with absent
/// components ranking lowest, which makes "highest wins" selection a plain
/// `max`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Version {
    /// Major component.
    pub major: Option<u32>,
    /// Minor component.
    pub minor: Option<u32>,
}

impl Version {
    /// Creates a full version.
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major: Some(major),
            minor: Some(minor),
        }
    }

    /// Creates a major-only version.
    #[must_use]
    pub const fn major(major: u32) -> Self {
        Self {
            major: Some(major),
            minor: None,
        }
    }

    /// Creates the absent version.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            major: None,
            minor: None,
        }
    }

    /// Returns true if no major component is present.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.major.is_none()
    }

    /// Returns true if a major component is present.
    #[must_use]
    pub const fn is_versioned(self) -> bool {
        self.major.is_some()
    }

    /// Whether an export carrying this version satisfies `requested`.
    ///
    /// A versionless export satisfies every request (it ranks below any
    /// versioned match during selection). A versioned export satisfies a
    /// request when the request itself is unversioned, or when the majors
    /// are equal and the export's minor does not exceed the requested
    /// minor. An absent requested minor places no upper bound; an absent
    /// export minor counts as zero.
    #[must_use]
    pub fn satisfies(self, requested: Version) -> bool {
        let Some(own_major) = self.major else {
            return true;
        };
        let Some(requested_major) = requested.major else {
            return true;
        };
        if own_major != requested_major {
            return false;
        }
        match requested.minor {
            None => true,
            Some(requested_minor) => self.minor.unwrap_or(0) <= requested_minor,
        }
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.major, self.minor) {
            (Some(major), Some(minor)) => write!(f, "Version({major}.{minor})"),
            (Some(major), None) => write!(f, "Version({major})"),
            _ => write!(f, "Version(none)"),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.major, self.minor) {
            (Some(major), Some(minor)) => write!(f, "{major}.{minor}"),
            (Some(major), None) => write!(f, "{major}"),
            _ => write!(f, "-"),
        }
    }
}
