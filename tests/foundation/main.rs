//! Integration tests for Layer 0: Foundation
//!
//! Tests for identifiers, the version-matching rule, and the source-path
//! cache.

mod ids;
mod versions;
