//! Lexical Scope Tree Builder
//!
//! Pre-scans SCOPE captures into the scope tree: a synthesized module scope
//! spanning the whole file, containment-driven parent selection, frozen
//! depths, and the smallest-enclosing-scope oracle the definition and
//! reference phases share through `ProcessingContext`.
//!
//! @module index/scopes

use std::collections::HashMap;

use compact_str::CompactString;
use tracing::debug;

use crate::index::capture::CaptureNode;
use crate::index::symbol_id::{self, SymbolId};
use crate::index::types::{Language, LexicalScope, Location, ScopeId, ScopeType};

// =============================================================================
// FILE GEOMETRY
// =============================================================================

/// Line count and final-line width of a source file, in the same
/// coordinates tree-sitter reports for the root node's end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileGeometry {
    pub lines: u32,
    pub end_column: u32,
}

impl FileGeometry {
    pub fn of(source: &str) -> Self {
        let lines = source.split('\n').count() as u32;
        let end_column = source.rsplit('\n').next().unwrap_or("").len() as u32;
        Self { lines, end_column }
    }
}

// =============================================================================
// SCOPE TREE BUILDER
// =============================================================================

/// Accumulates SCOPE captures into the lexical scope tree
pub struct ScopeTreeBuilder {
    file_path: CompactString,
    scopes: HashMap<ScopeId, LexicalScope>,
    /// Insertion order, for deterministic parent selection
    order: Vec<ScopeId>,
    root_id: ScopeId,
}

impl ScopeTreeBuilder {
    /// Create the builder with the module scope already synthesized
    pub fn new(file_path: &str, geometry: FileGeometry) -> Self {
        let location = Location::new(file_path, 1, 1, geometry.lines, geometry.end_column);
        let root_id = symbol_id::module_id(&location);
        let root = LexicalScope {
            id: root_id.clone(),
            parent_id: None,
            name: None,
            scope_type: ScopeType::Module,
            location,
            child_ids: Vec::new(),
        };
        let mut scopes = HashMap::new();
        scopes.insert(root_id.clone(), root);
        Self {
            file_path: CompactString::new(file_path),
            scopes,
            order: vec![root_id.clone()],
            root_id,
        }
    }

    pub fn root_id(&self) -> &ScopeId {
        &self.root_id
    }

    /// Insert one SCOPE capture, refining its scope type from the
    /// surrounding declaration where the queries cannot express it.
    pub fn add_scope_capture(&mut self, cap: &CaptureNode<'_>, source: &str, language: Language) {
        let scope_type = refine_scope_type(cap, language, source);
        let name = scope_name(cap, source);
        self.insert_scope(scope_type, cap.location.clone(), name);
    }

    /// Insert a scope by type and location. Duplicate ids are skipped
    /// (first writer wins).
    pub fn insert_scope(
        &mut self,
        scope_type: ScopeType,
        location: Location,
        name: Option<CompactString>,
    ) {
        let id = symbol_id::scope_id(scope_type, &location);
        if self.scopes.contains_key(&id) {
            debug!(scope = %id, "duplicate scope skipped");
            return;
        }

        let parent_id = self.containing_parent(&location);
        if let Some(parent) = self.scopes.get_mut(&parent_id) {
            parent.child_ids.push(id.clone());
        }

        self.scopes.insert(
            id.clone(),
            LexicalScope {
                id: id.clone(),
                parent_id: Some(parent_id),
                name,
                scope_type,
                location,
                child_ids: Vec::new(),
            },
        );
        self.order.push(id);
    }

    /// The existing scope containing `location` with the smallest area
    fn containing_parent(&self, location: &Location) -> ScopeId {
        let mut best = self.root_id.clone();
        let mut best_area = i64::MAX;
        for id in &self.order {
            let scope = &self.scopes[id];
            if scope.location.contains(location) {
                let area = scope.location.area();
                if area < best_area {
                    best = id.clone();
                    best_area = area;
                }
            }
        }
        best
    }

    /// Freeze the tree: precompute depths and expose the scope oracle
    pub fn finish(self) -> ProcessingContext {
        let mut depths: HashMap<ScopeId, u32> = HashMap::with_capacity(self.scopes.len());
        for id in &self.order {
            let mut depth = 0;
            let mut current = self.scopes[id].parent_id.clone();
            while let Some(parent_id) = current {
                depth += 1;
                current = self
                    .scopes
                    .get(&parent_id)
                    .and_then(|s| s.parent_id.clone());
            }
            depths.insert(id.clone(), depth);
        }
        ProcessingContext {
            file_path: self.file_path,
            root_scope_id: self.root_id,
            scopes: self.scopes,
            depths,
        }
    }
}

// =============================================================================
// SCOPE TYPE REFINEMENT
// =============================================================================

/// Map a capture to its final scope type. Queries alone cannot tell a
/// Python method from a free function or a Rust `new` from other impl
/// functions, so the declaration surrounding the captured body decides.
fn refine_scope_type(cap: &CaptureNode<'_>, language: Language, source: &str) -> ScopeType {
    let base = cap.entity.scope_type();
    match language {
        Language::JavaScript | Language::TypeScript => {
            if base != ScopeType::Method {
                return base;
            }
            let is_ctor = cap
                .node
                .parent()
                .and_then(|decl| decl.child_by_field_name("name"))
                .and_then(|n| n.utf8_text(source.as_bytes()).ok())
                == Some("constructor");
            if is_ctor {
                ScopeType::Constructor
            } else {
                base
            }
        }
        Language::Python => {
            if cap.name != "scope.function" {
                return base;
            }
            let Some(decl) = cap.node.parent() else {
                return base;
            };
            if !in_class_body_python(decl) {
                return ScopeType::Function;
            }
            match decl
                .child_by_field_name("name")
                .and_then(|n| n.utf8_text(source.as_bytes()).ok())
            {
                Some("__init__") => ScopeType::Constructor,
                _ => ScopeType::Method,
            }
        }
        Language::Rust => {
            if cap.name != "scope.function" {
                return base;
            }
            let Some(decl) = cap.node.parent() else {
                return base;
            };
            if !in_impl_or_trait_rust(decl) {
                return ScopeType::Function;
            }
            match decl
                .child_by_field_name("name")
                .and_then(|n| n.utf8_text(source.as_bytes()).ok())
            {
                Some("new") if in_impl_rust(decl) => ScopeType::Constructor,
                _ => ScopeType::Method,
            }
        }
    }
}

fn in_class_body_python(decl: tree_sitter::Node<'_>) -> bool {
    let mut current = decl.parent();
    while let Some(node) = current {
        match node.kind() {
            "decorated_definition" => current = node.parent(),
            "block" => {
                return node
                    .parent()
                    .is_some_and(|p| p.kind() == "class_definition");
            }
            _ => return false,
        }
    }
    false
}

fn in_impl_or_trait_rust(decl: tree_sitter::Node<'_>) -> bool {
    decl.parent()
        .and_then(|list| list.parent())
        .is_some_and(|p| matches!(p.kind(), "impl_item" | "trait_item"))
}

fn in_impl_rust(decl: tree_sitter::Node<'_>) -> bool {
    decl.parent()
        .and_then(|list| list.parent())
        .is_some_and(|p| p.kind() == "impl_item")
}

/// Name of the declaration whose body this capture is, when the capture
/// node sits in the declaration's `body` field.
fn scope_name(cap: &CaptureNode<'_>, source: &str) -> Option<CompactString> {
    let decl = cap.node.parent()?;
    let body = decl.child_by_field_name("body")?;
    if body.id() != cap.node.id() {
        return None;
    }
    let name = decl.child_by_field_name("name")?;
    name.utf8_text(source.as_bytes())
        .ok()
        .map(CompactString::new)
}

// =============================================================================
// PROCESSING CONTEXT
// =============================================================================

/// Frozen scope tree plus the smallest-enclosing-scope oracle
pub struct ProcessingContext {
    pub file_path: CompactString,
    root_scope_id: ScopeId,
    scopes: HashMap<ScopeId, LexicalScope>,
    depths: HashMap<ScopeId, u32>,
}

impl ProcessingContext {
    pub fn root_scope_id(&self) -> &ScopeId {
        &self.root_scope_id
    }

    pub fn scopes(&self) -> &HashMap<ScopeId, LexicalScope> {
        &self.scopes
    }

    pub fn into_scopes(self) -> HashMap<ScopeId, LexicalScope> {
        self.scopes
    }

    pub fn is_root(&self, id: &ScopeId) -> bool {
        *id == self.root_scope_id
    }

    /// The smallest scope containing `location`: maximum depth, ties broken
    /// by minimum area, then by id for determinism.
    pub fn get_scope_id(&self, location: &Location) -> ScopeId {
        let mut best: Option<(&SymbolId, u32, i64)> = None;
        for (id, scope) in &self.scopes {
            if !scope.location.contains(location) {
                continue;
            }
            let depth = self.depths.get(id).copied().unwrap_or(0);
            let area = scope.location.area();
            let candidate = (id, depth, area);
            best = Some(match best {
                None => candidate,
                Some(current) => {
                    let (cur_id, cur_depth, cur_area) = current;
                    if depth > cur_depth
                        || (depth == cur_depth && area < cur_area)
                        || (depth == cur_depth && area == cur_area && id < cur_id)
                    {
                        candidate
                    } else {
                        current
                    }
                }
            });
        }
        best.map(|(id, _, _)| id.clone())
            .unwrap_or_else(|| self.root_scope_id.clone())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(sl: u32, sc: u32, el: u32, ec: u32) -> Location {
        Location::new("t.py", sl, sc, el, ec)
    }

    fn builder() -> ScopeTreeBuilder {
        ScopeTreeBuilder::new(
            "t.py",
            FileGeometry {
                lines: 100,
                end_column: 0,
            },
        )
    }

    #[test]
    fn test_root_scope_synthesized() {
        let ctx = builder().finish();
        assert_eq!(ctx.scopes().len(), 1);
        let root = &ctx.scopes()[ctx.root_scope_id()];
        assert!(root.is_root());
        assert_eq!(root.scope_type, ScopeType::Module);
        assert_eq!(root.location, loc(1, 1, 100, 0));
    }

    #[test]
    fn test_nested_parenting_by_min_area() {
        let mut b = builder();
        b.insert_scope(ScopeType::Class, loc(2, 1, 50, 1), Some("Outer".into()));
        b.insert_scope(ScopeType::Method, loc(5, 3, 20, 1), None);
        b.insert_scope(ScopeType::Block, loc(8, 5, 12, 1), None);
        let ctx = b.finish();

        let block_id = symbol_id::scope_id(ScopeType::Block, &loc(8, 5, 12, 1));
        let method_id = symbol_id::scope_id(ScopeType::Method, &loc(5, 3, 20, 1));
        let class_id = symbol_id::scope_id(ScopeType::Class, &loc(2, 1, 50, 1));

        assert_eq!(ctx.scopes()[&block_id].parent_id, Some(method_id.clone()));
        assert_eq!(ctx.scopes()[&method_id].parent_id, Some(class_id.clone()));
        assert_eq!(
            ctx.scopes()[&class_id].parent_id,
            Some(ctx.root_scope_id().clone())
        );
        assert!(ctx.scopes()[&class_id].child_ids.contains(&method_id));
    }

    #[test]
    fn test_duplicate_scope_first_writer_wins() {
        let mut b = builder();
        b.insert_scope(ScopeType::Function, loc(3, 1, 9, 1), Some("f".into()));
        b.insert_scope(ScopeType::Function, loc(3, 1, 9, 1), Some("shadow".into()));
        let ctx = b.finish();
        assert_eq!(ctx.scopes().len(), 2);
        let id = symbol_id::scope_id(ScopeType::Function, &loc(3, 1, 9, 1));
        assert_eq!(ctx.scopes()[&id].name.as_deref(), Some("f"));
    }

    #[test]
    fn test_oracle_returns_deepest_containing_scope() {
        let mut b = builder();
        b.insert_scope(ScopeType::Class, loc(2, 1, 50, 1), None);
        b.insert_scope(ScopeType::Method, loc(5, 3, 20, 1), None);
        let ctx = b.finish();

        let inside_method = loc(6, 5, 6, 10);
        assert_eq!(
            ctx.get_scope_id(&inside_method),
            symbol_id::scope_id(ScopeType::Method, &loc(5, 3, 20, 1))
        );

        let inside_class_only = loc(30, 1, 30, 5);
        assert_eq!(
            ctx.get_scope_id(&inside_class_only),
            symbol_id::scope_id(ScopeType::Class, &loc(2, 1, 50, 1))
        );

        let module_level = loc(60, 1, 60, 5);
        assert_eq!(&ctx.get_scope_id(&module_level), ctx.root_scope_id());
    }

    #[test]
    fn test_equal_location_scopes_nest() {
        let mut b = builder();
        b.insert_scope(ScopeType::Block, loc(2, 1, 40, 1), None);
        b.insert_scope(ScopeType::Function, loc(2, 1, 40, 1), None);
        let ctx = b.finish();
        // Equal boundaries count as contained: the block arrived first, so
        // the function nested under it and wins on depth.
        let inside = loc(10, 1, 10, 4);
        assert_eq!(
            ctx.get_scope_id(&inside),
            symbol_id::scope_id(ScopeType::Function, &loc(2, 1, 40, 1))
        );
    }

    #[test]
    fn test_geometry() {
        assert_eq!(
            FileGeometry::of("a\nbb\n"),
            FileGeometry {
                lines: 3,
                end_column: 0
            }
        );
        assert_eq!(
            FileGeometry::of("abc"),
            FileGeometry {
                lines: 1,
                end_column: 3
            }
        );
        assert_eq!(
            FileGeometry::of(""),
            FileGeometry {
                lines: 1,
                end_column: 0
            }
        );
    }
}
