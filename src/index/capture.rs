//! Typed Captures from CST Queries
//!
//! The query layer turns raw tree-sitter query captures into `CaptureNode`
//! records: the dotted capture name, its parsed category and entity, the CST
//! node, the captured text, and a normalized 1-indexed location. The set of
//! capture names a language's query file produces is that language's
//! contract with its handler registry.
//!
//! @module index/capture

use compact_str::CompactString;

use crate::index::types::{Location, ScopeType};

// =============================================================================
// CATEGORY & ENTITY
// =============================================================================

/// Top-level classification of a capture, from the first name segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureCategory {
    Scope,
    Definition,
    Import,
    Reference,
    Decorator,
    Documentation,
}

/// The construct a capture describes, from the second name segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureEntity {
    Module,
    Class,
    Interface,
    Enum,
    Function,
    Method,
    Constructor,
    Block,
    Variable,
    Constant,
    Parameter,
    Property,
    Field,
    Import,
    Namespace,
    Lambda,
    Closure,
    TypeAlias,
    Comment,
    Unknown,
}

impl CaptureEntity {
    fn from_segment(segment: &str) -> Self {
        match segment {
            "module" => Self::Module,
            "class" => Self::Class,
            "interface" => Self::Interface,
            "enum" => Self::Enum,
            "function" => Self::Function,
            "method" => Self::Method,
            "constructor" => Self::Constructor,
            "block" => Self::Block,
            "variable" => Self::Variable,
            "constant" => Self::Constant,
            "parameter" => Self::Parameter,
            "property" => Self::Property,
            "field" => Self::Field,
            "import" | "named" | "default" | "require" | "reexport" | "from" => Self::Import,
            "namespace" => Self::Namespace,
            "lambda" => Self::Lambda,
            "closure" => Self::Closure,
            "type_alias" => Self::TypeAlias,
            "comment" => Self::Comment,
            _ => Self::Unknown,
        }
    }

    /// Scope type a SCOPE capture of this entity produces
    pub fn scope_type(&self) -> ScopeType {
        match self {
            Self::Module | Self::Namespace => ScopeType::Module,
            Self::Class | Self::Interface | Self::Enum => ScopeType::Class,
            Self::Function | Self::Lambda | Self::Closure => ScopeType::Function,
            Self::Method => ScopeType::Method,
            Self::Constructor => ScopeType::Constructor,
            _ => ScopeType::Block,
        }
    }
}

/// Parse `(category, entity)` out of a dotted capture name such as
/// `definition.method.static` or `scope.function`.
pub fn parse_capture_name(name: &str) -> Option<(CaptureCategory, CaptureEntity)> {
    let mut segments = name.split('.');
    let category = match segments.next()? {
        "scope" => CaptureCategory::Scope,
        "definition" => CaptureCategory::Definition,
        "import" => CaptureCategory::Import,
        "reference" => CaptureCategory::Reference,
        "decorator" => CaptureCategory::Decorator,
        "documentation" => CaptureCategory::Documentation,
        _ => return None,
    };
    let entity = match segments.next() {
        Some(segment) => CaptureEntity::from_segment(segment),
        // `import` alone (e.g. a bare `@import.module` miss) stays usable
        None if category == CaptureCategory::Import => CaptureEntity::Import,
        None => CaptureEntity::Unknown,
    };
    Some((category, entity))
}

// =============================================================================
// CAPTURE NODE
// =============================================================================

/// One typed capture produced by running a language's query over a CST
#[derive(Debug, Clone)]
pub struct CaptureNode<'t> {
    /// Full dotted capture name (the handler-registry key)
    pub name: &'static str,
    pub category: CaptureCategory,
    pub entity: CaptureEntity,
    pub node: tree_sitter::Node<'t>,
    /// Source text of the captured node
    pub text: CompactString,
    pub location: Location,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_capture_name() {
        assert_eq!(
            parse_capture_name("scope.function"),
            Some((CaptureCategory::Scope, CaptureEntity::Function))
        );
        assert_eq!(
            parse_capture_name("definition.method.static"),
            Some((CaptureCategory::Definition, CaptureEntity::Method))
        );
        assert_eq!(
            parse_capture_name("import.named.alias"),
            Some((CaptureCategory::Import, CaptureEntity::Import))
        );
        assert_eq!(parse_capture_name("_helper"), None);
    }

    #[test]
    fn test_entity_scope_types() {
        assert_eq!(CaptureEntity::Class.scope_type(), ScopeType::Class);
        assert_eq!(CaptureEntity::Lambda.scope_type(), ScopeType::Function);
        assert_eq!(
            CaptureEntity::Constructor.scope_type(),
            ScopeType::Constructor
        );
        assert_eq!(CaptureEntity::Unknown.scope_type(), ScopeType::Block);
    }
}
