//! Handler Registries
//!
//! One frozen registry per language maps capture names to handler
//! functions. A handler derives the symbol id from its capture, asks the
//! scope oracle where the declaration lives, walks a small bounded
//! neighborhood of the CST for auxiliary data, and calls one builder
//! method. TypeScript composes by overlaying overrides onto the JavaScript
//! table.
//!
//! @module index/handlers

pub mod javascript;
pub mod python;
pub mod rust;
pub mod typescript;

use std::collections::HashMap;

use compact_str::CompactString;
use once_cell::sync::Lazy;
use tree_sitter::Node;

use crate::core::error::{Error, Result};
use crate::index::builder::DefinitionBuilder;
use crate::index::capture::CaptureNode;
use crate::index::scopes::ProcessingContext;
use crate::index::types::{CallbackContext, Language, Location, ScopeId, ScopeType};

// =============================================================================
// HANDLER TYPE & CONTEXT
// =============================================================================

/// Shared read-only state for one definition pass
pub struct HandlerContext<'a> {
    pub scopes: &'a ProcessingContext,
    pub source: &'a str,
    pub language: Language,
}

impl<'a> HandlerContext<'a> {
    pub fn file_path(&self) -> &str {
        &self.scopes.file_path
    }

    pub fn scope_for(&self, location: &Location) -> ScopeId {
        self.scopes.get_scope_id(location)
    }

    pub fn is_root(&self, scope: &ScopeId) -> bool {
        self.scopes.is_root(scope)
    }

    /// Defining scope for declarations that coincide with their own scope
    /// (lambdas, closures): the parent of that scope rather than the scope
    /// itself.
    pub fn scope_above(&self, own_scope: &ScopeId, location: &Location) -> ScopeId {
        match self.scopes.scopes().get(own_scope) {
            Some(scope) => scope
                .parent_id
                .clone()
                .unwrap_or_else(|| self.scopes.root_scope_id().clone()),
            None => self.scope_for(location),
        }
    }
}

/// A definition-phase handler: one capture in, one builder mutation out
pub type Handler = fn(&CaptureNode<'_>, &mut DefinitionBuilder, &HandlerContext<'_>) -> Result<()>;

// =============================================================================
// REGISTRY
// =============================================================================

/// Frozen capture-name → handler table
pub struct HandlerRegistry {
    table: HashMap<&'static str, Handler>,
}

impl HandlerRegistry {
    pub fn from_entries(entries: &[(&'static str, Handler)]) -> Self {
        Self {
            table: entries.iter().copied().collect(),
        }
    }

    /// Derive a registry from this one, overriding and adding keys
    pub fn overlay(&self, overrides: &[(&'static str, Handler)]) -> Self {
        let mut table = self.table.clone();
        for (name, handler) in overrides {
            table.insert(name, *handler);
        }
        Self { table }
    }

    pub fn get(&self, name: &str) -> Option<Handler> {
        self.table.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

static JAVASCRIPT: Lazy<HandlerRegistry> = Lazy::new(javascript::registry);
static TYPESCRIPT: Lazy<HandlerRegistry> = Lazy::new(|| typescript::registry(&JAVASCRIPT));
static PYTHON: Lazy<HandlerRegistry> = Lazy::new(python::registry);
static RUST: Lazy<HandlerRegistry> = Lazy::new(rust::registry);

/// The immutable registry for a language, shared across invocations
pub fn registry_for(language: Language) -> &'static HandlerRegistry {
    match language {
        Language::JavaScript => &JAVASCRIPT,
        Language::TypeScript => &TYPESCRIPT,
        Language::Python => &PYTHON,
        Language::Rust => &RUST,
    }
}

// =============================================================================
// SHARED CST HELPERS
// =============================================================================

pub(crate) fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or_default()
}

pub(crate) fn child_text(node: Node<'_>, field: &str, source: &str) -> Option<CompactString> {
    node.child_by_field_name(field)
        .map(|child| CompactString::new(node_text(child, source)))
}

/// Required-field access; absence is a malformed declaration
pub(crate) fn require_child<'t>(
    node: Node<'t>,
    field: &str,
    location: &Location,
) -> Result<Node<'t>> {
    node.child_by_field_name(field)
        .ok_or_else(|| Error::MissingCstField {
            node_kind: node.kind().to_string(),
            field: field.to_string(),
            location: location.clone(),
        })
}

/// Nearest ancestor whose kind is in `kinds`
pub(crate) fn find_ancestor<'t>(node: Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
    let mut current = node.parent();
    while let Some(n) = current {
        if kinds.contains(&n.kind()) {
            return Some(n);
        }
        current = n.parent();
    }
    None
}

/// Whether `node` has a direct child of the given kind (keyword tokens
/// like `static`, `async`, `const` are anonymous children).
pub(crate) fn has_child_kind(node: Node<'_>, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|child| child.kind() == kind);
    found
}

/// First direct child of the given kind
pub(crate) fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|child| child.kind() == kind);
    found
}

/// `NAME_IS_UPPER_WITH_UNDERSCORE` constant-name convention
pub(crate) fn is_upper_snake(name: &str) -> bool {
    !name.is_empty()
        && name.chars().any(|c| c.is_ascii_uppercase())
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

pub(crate) fn strip_quotes(text: &str) -> &str {
    text.trim_matches(|c| c == '"' || c == '\'' || c == '`')
}

/// Text of a `: T` annotation without the leading colon
pub(crate) fn annotation_text(node: Node<'_>, source: &str) -> CompactString {
    CompactString::new(node_text(node, source).trim_start_matches(':').trim())
}

/// Compute the deterministic scope id of a declaration's body
pub(crate) fn body_scope_id(
    decl: Node<'_>,
    scope_type: ScopeType,
    file_path: &str,
) -> Option<ScopeId> {
    let body = decl.child_by_field_name("body")?;
    let location = Location::from_node(body, file_path);
    Some(crate::index::symbol_id::scope_id(scope_type, &location))
}

// =============================================================================
// CALLBACK CONTEXT
// =============================================================================

const ARGUMENT_WRAPPERS: &[&str] = &["parenthesized_expression", "keyword_argument"];
const ARGUMENT_LISTS: &[&str] = &["arguments", "argument_list"];
const CALL_KINDS: &[&str] = &["call_expression", "call", "new_expression"];
const MEMBER_KINDS: &[&str] = &["member_expression", "attribute", "field_expression"];

/// Decide whether an anonymous function is a callback: syntactically an
/// argument of a call expression (including via a keyword argument). The
/// receiver location then spans the whole call. Returns the context plus
/// the callee's root name for build-time external resolution.
pub(crate) fn callback_context_for(
    node: Node<'_>,
    source: &str,
    file_path: &str,
) -> (CallbackContext, Option<CompactString>) {
    let mut current = node;
    loop {
        let Some(parent) = current.parent() else { break };
        let kind = parent.kind();
        if ARGUMENT_WRAPPERS.contains(&kind) {
            current = parent;
            continue;
        }
        if ARGUMENT_LISTS.contains(&kind) {
            if let Some(call) = parent.parent().filter(|p| CALL_KINDS.contains(&p.kind())) {
                let context = CallbackContext {
                    is_callback: true,
                    receiver_location: Some(Location::from_node(call, file_path)),
                    receiver_is_external: None,
                };
                return (context, call_root_name(call, source));
            }
        }
        break;
    }
    (
        CallbackContext {
            is_callback: false,
            receiver_location: None,
            receiver_is_external: None,
        },
        None,
    )
}

/// Root identifier of a call's callee (`a` in `a.b.c(...)`), if any
pub(crate) fn call_root_name(call: Node<'_>, source: &str) -> Option<CompactString> {
    let mut node = call
        .child_by_field_name("function")
        .or_else(|| call.child_by_field_name("constructor"))?;
    loop {
        if MEMBER_KINDS.contains(&node.kind()) {
            let object = node
                .child_by_field_name("object")
                .or_else(|| node.child_by_field_name("value"));
            match object {
                Some(inner) => {
                    node = inner;
                    continue;
                }
                None => return None,
            }
        }
        if node.kind() == "parenthesized_expression" {
            match node.named_child(0) {
                Some(inner) => {
                    node = inner;
                    continue;
                }
                None => return None,
            }
        }
        break;
    }
    match node.kind() {
        "identifier" | "this" => Some(CompactString::new(node_text(node, source))),
        _ => None,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registries_build() {
        for language in [
            Language::JavaScript,
            Language::TypeScript,
            Language::Python,
            Language::Rust,
        ] {
            assert!(!registry_for(language).is_empty());
        }
    }

    #[test]
    fn test_typescript_overlays_javascript() {
        let js = registry_for(Language::JavaScript);
        let ts = registry_for(Language::TypeScript);
        // Everything JavaScript handles, TypeScript handles too
        assert!(ts.len() > js.len());
        assert!(js.get("definition.interface").is_none());
        assert!(ts.get("definition.interface").is_some());
        // Overridden keys resolve to different functions
        let js_var = js.get("definition.variable").unwrap() as usize;
        let ts_var = ts.get("definition.variable").unwrap() as usize;
        assert_ne!(js_var, ts_var);
    }

    #[test]
    fn test_is_upper_snake() {
        assert!(is_upper_snake("MAX_RETRIES"));
        assert!(is_upper_snake("TIMEOUT"));
        assert!(!is_upper_snake("maxRetries"));
        assert!(!is_upper_snake("Max_Retries"));
        assert!(!is_upper_snake("_private"));
    }
}
