//! Symbol Identifier Scheme
//!
//! Every scope, declaration, and reference carries a deterministic,
//! collision-free identifier derived from its kind, location, and (for some
//! kinds) name. Identifiers are colon-delimited strings; two captures with
//! identical kind and location collapse to the same id, which is what lets
//! the scope builder deduplicate a synthesized root against a captured one.
//!
//! @module index/symbol_id

use std::fmt;

use compact_str::{format_compact, CompactString};
use serde::{Deserialize, Serialize};

use crate::index::types::{Location, ScopeType};

/// An opaque, deterministic identifier. Serializes as a plain string so it
/// can key JSON objects.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(CompactString);

impl SymbolId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.0)
    }
}

impl From<&str> for SymbolId {
    fn from(s: &str) -> Self {
        Self(CompactString::new(s))
    }
}

// =============================================================================
// CONSTRUCTORS
// =============================================================================

/// Id of the module scope: `module:<file>:<range>:<module>`
pub fn module_id(location: &Location) -> SymbolId {
    SymbolId(format_compact!(
        "module:{}:{}:{}:{}:{}:<module>",
        location.file_path,
        location.start_line,
        location.start_column,
        location.end_line,
        location.end_column
    ))
}

/// Id of a lexical scope, keyed by its type and body range
pub fn scope_id(scope_type: ScopeType, location: &Location) -> SymbolId {
    if scope_type == ScopeType::Module {
        return module_id(location);
    }
    SymbolId(format_compact!(
        "{}:{}:{}:{}:{}:{}",
        scope_type.as_str(),
        location.file_path,
        location.start_line,
        location.start_column,
        location.end_line,
        location.end_column
    ))
}

/// Id of a declaration, keyed by kind and declaration range
pub fn definition_id(kind: &str, location: &Location) -> SymbolId {
    SymbolId(format_compact!(
        "{}:{}:{}:{}:{}:{}",
        kind,
        location.file_path,
        location.start_line,
        location.start_column,
        location.end_line,
        location.end_column
    ))
}

/// Id of a named member (enum members), keyed by kind, name, and start point
pub fn member_id(kind: &str, name: &str, location: &Location) -> SymbolId {
    SymbolId(format_compact!(
        "{}:{}:{}:{}:{}",
        kind,
        name,
        location.file_path,
        location.start_line,
        location.start_column
    ))
}

/// Id of an imported binding: `import:<file>:<line>:<name>`
pub fn import_id(location: &Location, name: &str) -> SymbolId {
    SymbolId(format_compact!(
        "import:{}:{}:{}",
        location.file_path,
        location.start_line,
        name
    ))
}

/// Id of an anonymous function: `anonymous_function:<file>:<line>:<col>`
pub fn anonymous_id(location: &Location) -> SymbolId {
    SymbolId(format_compact!(
        "anonymous_function:{}:{}:{}",
        location.file_path,
        location.start_line,
        location.start_column
    ))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(sl: u32, sc: u32, el: u32, ec: u32) -> Location {
        Location::new("test.py", sl, sc, el, ec)
    }

    #[test]
    fn test_module_id_format() {
        let id = module_id(&loc(1, 1, 100, 0));
        assert_eq!(id.as_str(), "module:test.py:1:1:100:0:<module>");
    }

    #[test]
    fn test_scope_id_routes_module_kind() {
        let location = loc(1, 1, 100, 0);
        assert_eq!(scope_id(ScopeType::Module, &location), module_id(&location));
        assert_eq!(
            scope_id(ScopeType::Function, &location).as_str(),
            "function:test.py:1:1:100:0"
        );
    }

    #[test]
    fn test_determinism() {
        let a = definition_id("class", &loc(4, 7, 18, 2));
        let b = definition_id("class", &loc(4, 7, 18, 2));
        assert_eq!(a, b);
    }

    #[test]
    fn test_injectivity_over_kind_and_location() {
        let location = loc(3, 4, 5, 2);
        let f = definition_id("function", &location);
        let m = definition_id("method", &location);
        let other = definition_id("function", &loc(3, 4, 5, 3));
        assert_ne!(f, m);
        assert_ne!(f, other);
    }

    #[test]
    fn test_import_and_member_ids() {
        assert_eq!(
            import_id(&loc(2, 1, 2, 30), "helper").as_str(),
            "import:test.py:2:helper"
        );
        assert_eq!(
            member_id("enum_member", "ACTIVE", &loc(5, 5, 5, 11)).as_str(),
            "enum_member:ACTIVE:test.py:5:5"
        );
        assert_eq!(
            anonymous_id(&loc(7, 10, 7, 30)).as_str(),
            "anonymous_function:test.py:7:10"
        );
    }
}
