//! JavaScript definition handlers
//!
//! Covers ES classes, methods, constructors, function declarations, arrow
//! functions, named/anonymous function expressions, parameters, variables
//! and fields, ESM imports in all three forms, `require()` bindings, and
//! re-export clauses. TypeScript reuses these building blocks and overlays
//! its own handlers on top.
//!
//! @module index/handlers/javascript

use compact_str::CompactString;
use tree_sitter::Node;

use crate::core::error::Result;
use crate::index::builder::DefinitionBuilder;
use crate::index::capture::CaptureNode;
use crate::index::symbol_id::{self, SymbolId};
use crate::index::types::{
    AccessModifier, ClassDef, CollectionType, ExportInfo, FunctionCollection, FunctionDef,
    FunctionSignature, ImportDef, ImportKind, Location, MemberFlags, MethodDef, MethodKind,
    ParameterDef, PropertyDef, ScopeId, ScopeType, VariableDef, VariableKind,
};

use super::{
    body_scope_id, callback_context_for, child_of_kind, find_ancestor, has_child_kind, node_text,
    require_child, strip_quotes, Handler, HandlerContext, HandlerRegistry,
};

// =============================================================================
// REGISTRY
// =============================================================================

pub(super) fn registry() -> HandlerRegistry {
    const ENTRIES: &[(&str, Handler)] = &[
        ("definition.class", handle_class),
        ("definition.method", handle_method),
        ("definition.function", handle_function),
        ("definition.function.expression", handle_function_expression),
        ("definition.function.anonymous", handle_anonymous_function),
        ("definition.property", handle_field),
        ("definition.variable", handle_variable),
        ("definition.variable.destructured", handle_destructured),
        ("definition.parameter", handle_parameter),
        ("import.default", handle_import_default),
        ("import.named", handle_import_named),
        ("import.named.alias", handle_import_named_alias),
        ("import.namespace", handle_import_namespace),
        ("import.reexport", handle_reexport),
        ("import.reexport.namespace", handle_reexport_namespace),
        ("import.reexport.wildcard", handle_reexport_wildcard),
        ("documentation.comment", handle_doc_comment),
    ];
    HandlerRegistry::from_entries(ENTRIES)
}

// =============================================================================
// SHARED BUILDING BLOCKS (also used by the TypeScript overlay)
// =============================================================================

pub(crate) const CALLABLE_KINDS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "function_expression",
    "arrow_function",
    "method_definition",
];

pub(crate) const CLASS_KINDS: &[&str] =
    &["class_declaration", "abstract_class_declaration", "class"];

/// `(has export marker, is default export)` for a declaration
pub(crate) fn export_marker(decl: Node<'_>) -> (bool, bool) {
    match decl.parent() {
        Some(parent) if parent.kind() == "export_statement" => {
            (true, has_child_kind(parent, "default"))
        }
        _ => (false, false),
    }
}

pub(crate) fn export_info(is_default: bool) -> Option<ExportInfo> {
    Some(ExportInfo {
        is_default,
        ..ExportInfo::default()
    })
}

/// Symbol id and body-scope id of any callable declaration node
pub(crate) fn callable_ids(
    decl: Node<'_>,
    source: &str,
    file_path: &str,
) -> (SymbolId, Option<ScopeId>) {
    let location = Location::from_node(decl, file_path);
    match decl.kind() {
        "arrow_function" => {
            let scope = symbol_id::scope_id(ScopeType::Function, &location);
            (symbol_id::anonymous_id(&location), Some(scope))
        }
        "function_expression" => {
            let scope = body_scope_id(decl, ScopeType::Function, file_path);
            match decl.child_by_field_name("name") {
                Some(_) => (symbol_id::definition_id("function", &location), scope),
                None => (symbol_id::anonymous_id(&location), scope),
            }
        }
        "method_definition" => {
            let is_ctor = decl
                .child_by_field_name("name")
                .map(|n| node_text(n, source) == "constructor")
                .unwrap_or(false);
            if is_ctor {
                let scope = body_scope_id(decl, ScopeType::Constructor, file_path);
                (symbol_id::definition_id("constructor", &location), scope)
            } else {
                let scope = body_scope_id(decl, ScopeType::Method, file_path);
                (symbol_id::definition_id("method", &location), scope)
            }
        }
        _ => {
            let scope = body_scope_id(decl, ScopeType::Function, file_path);
            (symbol_id::definition_id("function", &location), scope)
        }
    }
}

/// The class declaration owning a member, via its `class_body`
pub(crate) fn containing_class<'t>(member: Node<'t>) -> Option<Node<'t>> {
    let body = find_ancestor(member, &["class_body"])?;
    body.parent().filter(|p| CLASS_KINDS.contains(&p.kind()))
}

pub(crate) fn containing_class_id(member: Node<'_>, file_path: &str) -> Option<SymbolId> {
    containing_class(member)
        .map(|class| symbol_id::definition_id("class", &Location::from_node(class, file_path)))
}

/// Module specifier of the `import`/`export` statement above `node`
pub(crate) fn statement_source(node: Node<'_>, source: &str) -> Option<CompactString> {
    let statement = find_ancestor(node, &["import_statement", "export_statement"])?;
    let path = statement.child_by_field_name("source")?;
    Some(CompactString::new(strip_quotes(node_text(path, source))))
}

/// Names bound by a destructuring pattern: `(name node, name, original)`
pub(crate) fn pattern_bindings<'t>(
    pattern: Node<'t>,
    source: &str,
    out: &mut Vec<(Node<'t>, CompactString, Option<CompactString>)>,
) {
    let mut cursor = pattern.walk();
    for child in pattern.children(&mut cursor) {
        match child.kind() {
            "shorthand_property_identifier_pattern" | "identifier" => {
                out.push((child, CompactString::new(node_text(child, source)), None));
            }
            "pair_pattern" => {
                let key = child
                    .child_by_field_name("key")
                    .map(|k| CompactString::new(node_text(k, source)));
                if let Some(value) = child.child_by_field_name("value") {
                    if value.kind() == "identifier" {
                        out.push((value, CompactString::new(node_text(value, source)), key));
                    } else {
                        pattern_bindings(value, source, out);
                    }
                }
            }
            "rest_pattern" | "object_pattern" | "array_pattern" | "assignment_pattern" => {
                pattern_bindings(child, source, out);
            }
            _ => {}
        }
    }
}

/// Root name of a member/subscript chain (`y` in `y.a[k]`)
pub(crate) fn expression_root_name(node: Node<'_>, source: &str) -> Option<CompactString> {
    let mut current = node;
    loop {
        match current.kind() {
            "member_expression" | "subscript_expression" => {
                current = current.child_by_field_name("object")?;
            }
            "identifier" | "this" => {
                return Some(CompactString::new(node_text(current, source)))
            }
            _ => return None,
        }
    }
}

const FUNCTION_VALUE_KINDS: &[&str] = &["arrow_function", "function_expression", "class"];

// =============================================================================
// CLASS & MEMBERS
// =============================================================================

fn handle_class(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(decl) = cap.node.parent() else {
        return Ok(());
    };
    let file = ctx.file_path();
    let decl_loc = Location::from_node(decl, file);
    let body = require_child(decl, "body", &decl_loc)?;
    let body_scope = symbol_id::scope_id(ScopeType::Class, &Location::from_node(body, file));

    let defining = ctx.scope_for(&cap.location);
    let (marker, is_default) = export_marker(decl);
    let is_exported = marker && ctx.is_root(&defining);

    let mut extends = Vec::new();
    if let Some(heritage) = child_of_kind(decl, "class_heritage") {
        let mut cursor = heritage.walk();
        for child in heritage.named_children(&mut cursor) {
            extends.push(CompactString::new(node_text(child, ctx.source)));
        }
    }

    let docstring = builder.consume_documentation(&decl_loc);
    builder.add_class(ClassDef {
        symbol_id: symbol_id::definition_id("class", &decl_loc),
        name: cap.text.clone(),
        location: decl_loc,
        defining_scope_id: defining,
        extends,
        generics: None,
        methods: vec![],
        properties: vec![],
        constructors: vec![],
        decorators: vec![],
        is_exported,
        export: is_exported.then(|| export_info(is_default)).flatten(),
        body_scope_id: Some(body_scope),
        docstring,
    });
    Ok(())
}

fn handle_method(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(decl) = cap.node.parent() else {
        return Ok(());
    };
    let file = ctx.file_path();
    let Some(class_id) = containing_class_id(decl, file) else {
        return Ok(());
    };
    let decl_loc = Location::from_node(decl, file);
    require_child(decl, "body", &decl_loc)?;

    let is_ctor = cap.text == "constructor";
    let (symbol_id, body_scope) = callable_ids(decl, ctx.source, file);

    let mut flags = MemberFlags::empty();
    if has_child_kind(decl, "static") {
        flags |= MemberFlags::STATIC;
    }
    if has_child_kind(decl, "async") {
        flags |= MemberFlags::ASYNC;
    }
    let kind = if has_child_kind(decl, "get") {
        MethodKind::Getter
    } else if has_child_kind(decl, "set") {
        MethodKind::Setter
    } else {
        MethodKind::Regular
    };
    let access_modifier = cap.text.starts_with('#').then_some(AccessModifier::Private);

    let docstring = builder.consume_documentation(&decl_loc);
    let method = MethodDef {
        symbol_id,
        name: cap.text.clone(),
        location: decl_loc,
        defining_scope_id: ctx.scope_for(&cap.location),
        signature: FunctionSignature::default(),
        generics: None,
        kind,
        access_modifier,
        flags,
        decorators: vec![],
        body_scope_id: body_scope,
        docstring,
    };
    if is_ctor {
        builder.add_constructor_to_class(&class_id, method);
    } else {
        builder.add_method_to_class(&class_id, method);
    }
    Ok(())
}

fn handle_field(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(decl) = cap.node.parent() else {
        return Ok(());
    };
    let file = ctx.file_path();
    let Some(class_id) = containing_class_id(decl, file) else {
        return Ok(());
    };

    let mut flags = MemberFlags::empty();
    if has_child_kind(decl, "static") {
        flags |= MemberFlags::STATIC;
    }
    let initial_value = decl
        .child_by_field_name("value")
        .map(|v| CompactString::new(node_text(v, ctx.source)));

    builder.add_property_to_class(
        &class_id,
        PropertyDef {
            symbol_id: symbol_id::definition_id("property", &cap.location),
            name: cap.text.clone(),
            location: cap.location.clone(),
            defining_scope_id: ctx.scope_for(&cap.location),
            type_annotation: None,
            initial_value,
            optional: false,
            access_modifier: cap.text.starts_with('#').then_some(AccessModifier::Private),
            flags,
            decorators: vec![],
        },
    );
    Ok(())
}

// =============================================================================
// FUNCTIONS
// =============================================================================

fn handle_function(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(decl) = cap.node.parent() else {
        return Ok(());
    };
    let file = ctx.file_path();
    let decl_loc = Location::from_node(decl, file);
    require_child(decl, "body", &decl_loc)?;
    let (symbol_id, body_scope) = callable_ids(decl, ctx.source, file);

    let defining = ctx.scope_for(&cap.location);
    let (marker, is_default) = export_marker(decl);
    let is_exported = marker && ctx.is_root(&defining);

    let docstring = builder.consume_documentation(&decl_loc);
    builder.add_function(FunctionDef {
        symbol_id,
        name: cap.text.clone(),
        location: decl_loc,
        defining_scope_id: defining,
        signature: FunctionSignature::default(),
        generics: None,
        is_exported,
        export: is_exported.then(|| export_info(is_default)).flatten(),
        is_async: has_child_kind(decl, "async"),
        body_scope_id: body_scope,
        docstring,
        callback_context: None,
    });
    Ok(())
}

/// Named function expression: the name binds inside the function's own
/// body scope so the function can call itself.
fn handle_function_expression(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(decl) = cap.node.parent() else {
        return Ok(());
    };
    let file = ctx.file_path();
    let decl_loc = Location::from_node(decl, file);
    require_child(decl, "body", &decl_loc)?;
    let (symbol_id, body_scope) = callable_ids(decl, ctx.source, file);

    let defining = body_scope
        .clone()
        .unwrap_or_else(|| ctx.scope_for(&cap.location));

    builder.add_function(FunctionDef {
        symbol_id,
        name: cap.text.clone(),
        location: decl_loc,
        defining_scope_id: defining,
        signature: FunctionSignature::default(),
        generics: None,
        is_exported: false,
        export: None,
        is_async: has_child_kind(decl, "async"),
        body_scope_id: body_scope,
        docstring: None,
        callback_context: None,
    });
    Ok(())
}

fn handle_anonymous_function(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let file = ctx.file_path();
    let (symbol_id, body_scope) = callable_ids(cap.node, ctx.source, file);
    let (callback_context, callee_root) = callback_context_for(cap.node, ctx.source, file);

    let defining = match cap.node.kind() {
        // The arrow's whole extent is its own scope; bind it one level up
        "arrow_function" => match &body_scope {
            Some(own) => ctx.scope_above(own, &cap.location),
            None => ctx.scope_for(&cap.location),
        },
        _ => ctx.scope_for(&cap.location),
    };

    builder.add_anonymous_function(
        FunctionDef {
            symbol_id,
            name: CompactString::new("<anonymous>"),
            location: cap.location.clone(),
            defining_scope_id: defining,
            signature: FunctionSignature::default(),
            generics: None,
            is_exported: false,
            export: None,
            is_async: has_child_kind(cap.node, "async"),
            body_scope_id: body_scope,
            docstring: None,
            callback_context: Some(callback_context),
        },
        callee_root,
    );
    Ok(())
}

fn handle_parameter(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(callable) = find_ancestor(cap.node, CALLABLE_KINDS) else {
        return Ok(());
    };
    let file = ctx.file_path();
    let (parent_id, body_scope) = callable_ids(callable, ctx.source, file);

    let default_value = cap
        .node
        .parent()
        .filter(|p| p.kind() == "assignment_pattern")
        .and_then(|p| p.child_by_field_name("right"))
        .map(|v| CompactString::new(node_text(v, ctx.source)));
    let is_rest = cap
        .node
        .parent()
        .is_some_and(|p| p.kind() == "rest_pattern");

    builder.add_parameter_to_callable(
        &parent_id,
        ParameterDef {
            symbol_id: symbol_id::definition_id("parameter", &cap.location),
            name: cap.text.clone(),
            location: cap.location.clone(),
            defining_scope_id: body_scope.unwrap_or_else(|| ctx.scope_for(&cap.location)),
            type_annotation: None,
            default_value,
            optional: false,
            is_rest,
        },
    );
    Ok(())
}

// =============================================================================
// VARIABLES
// =============================================================================

fn handle_variable(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(declarator) = cap.node.parent() else {
        return Ok(());
    };
    let value = declarator.child_by_field_name("value");

    // `const x = require("mod")` binds the whole module object
    if let Some(v) = value {
        if is_require_call(v, ctx.source) {
            return add_require_import(cap, v, ImportKind::Namespace, None, builder, ctx);
        }
    }

    let defining = ctx.scope_for(&cap.location);
    if builder.variable_exists(&cap.text, &defining) {
        return Ok(());
    }

    let statement = declarator.parent();
    let is_const = statement.is_some_and(|s| {
        s.kind() == "lexical_declaration" && has_child_kind(s, "const")
    });
    let (marker, is_default) = statement.map(export_marker).unwrap_or((false, false));
    let is_exported = marker && ctx.is_root(&defining);

    let mut variable = VariableDef {
        symbol_id: symbol_id::definition_id("variable", &cap.location),
        name: cap.text.clone(),
        location: cap.location.clone(),
        defining_scope_id: defining,
        kind: if is_const {
            VariableKind::Constant
        } else {
            VariableKind::Variable
        },
        type_annotation: None,
        initial_value: None,
        is_exported,
        export: is_exported.then(|| export_info(is_default)).flatten(),
        function_collection: None,
        derived_from: None,
        initialized_from_call: None,
        collection_source: None,
    };

    let mut alias = None;
    if let Some(v) = value {
        apply_initializer(&mut variable, &mut alias, v, ctx.source);
    }
    let variable_id = variable.symbol_id.clone();
    builder.add_variable(variable);
    if let Some(source_name) = alias {
        builder.note_variable_alias(variable_id, source_name);
    }
    Ok(())
}

/// Initializer-derived metadata shared by JavaScript and TypeScript
pub(crate) fn apply_initializer(
    variable: &mut VariableDef,
    alias: &mut Option<CompactString>,
    value: Node<'_>,
    source: &str,
) {
    if !FUNCTION_VALUE_KINDS.contains(&value.kind()) {
        variable.initial_value = Some(CompactString::new(node_text(value, source)));
    }
    match value.kind() {
        "call_expression" | "new_expression" => {
            let callee = value
                .child_by_field_name("function")
                .or_else(|| value.child_by_field_name("constructor"));
            variable.initialized_from_call =
                callee.map(|c| CompactString::new(node_text(c, source)));
        }
        "subscript_expression" => {
            variable.derived_from = value
                .child_by_field_name("object")
                .and_then(|o| expression_root_name(o, source));
        }
        "identifier" => {
            *alias = Some(CompactString::new(node_text(value, source)));
        }
        "array" => {
            let mut stored = Vec::new();
            let mut cursor = value.walk();
            for element in value.named_children(&mut cursor) {
                if element.kind() == "identifier" {
                    stored.push(CompactString::new(node_text(element, source)));
                }
            }
            if !stored.is_empty() {
                variable.function_collection = Some(FunctionCollection {
                    collection_type: CollectionType::Array,
                    stored_references: stored,
                    collection_id: variable.symbol_id.clone(),
                });
            }
        }
        "object" => {
            let mut stored = Vec::new();
            let mut cursor = value.walk();
            for pair in value.named_children(&mut cursor) {
                if pair.kind() == "pair" {
                    if let Some(v) = pair.child_by_field_name("value") {
                        if v.kind() == "identifier" {
                            stored.push(CompactString::new(node_text(v, source)));
                        }
                    }
                }
            }
            if !stored.is_empty() {
                variable.function_collection = Some(FunctionCollection {
                    collection_type: CollectionType::Dict,
                    stored_references: stored,
                    collection_id: variable.symbol_id.clone(),
                });
            }
        }
        _ => {}
    }
}

fn handle_destructured(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(declarator) = cap.node.parent() else {
        return Ok(());
    };
    let value = declarator.child_by_field_name("value");
    let require_value = value.filter(|v| is_require_call(*v, ctx.source));

    let mut bindings = Vec::new();
    pattern_bindings(cap.node, ctx.source, &mut bindings);

    let statement = declarator.parent();
    let is_const = statement.is_some_and(|s| {
        s.kind() == "lexical_declaration" && has_child_kind(s, "const")
    });

    for (name_node, name, original) in bindings {
        let location = Location::from_node(name_node, ctx.file_path());
        if let Some(require) = require_value {
            // `const { a, b } = require("mod")` imports each binding
            let path = require_argument(require, ctx.source).unwrap_or_default();
            builder.add_import(ImportDef {
                symbol_id: symbol_id::import_id(&location, &name),
                name,
                location: location.clone(),
                defining_scope_id: ctx.scope_for(&location),
                import_path: path,
                import_kind: ImportKind::Named,
                original_name: original,
                is_exported: false,
                export: None,
            });
            continue;
        }

        let defining = ctx.scope_for(&location);
        if builder.variable_exists(&name, &defining) {
            continue;
        }
        builder.add_variable(VariableDef {
            symbol_id: symbol_id::definition_id("variable", &location),
            name,
            location,
            defining_scope_id: defining,
            kind: if is_const {
                VariableKind::Constant
            } else {
                VariableKind::Variable
            },
            type_annotation: None,
            initial_value: value.map(|v| CompactString::new(node_text(v, ctx.source))),
            is_exported: false,
            export: None,
            function_collection: None,
            derived_from: value.and_then(|v| expression_root_name(v, ctx.source)),
            initialized_from_call: None,
            collection_source: None,
        });
    }
    Ok(())
}

pub(crate) fn is_require_call(node: Node<'_>, source: &str) -> bool {
    node.kind() == "call_expression"
        && node
            .child_by_field_name("function")
            .map(|f| node_text(f, source) == "require")
            .unwrap_or(false)
}

pub(crate) fn require_argument(call: Node<'_>, source: &str) -> Option<CompactString> {
    let arguments = call.child_by_field_name("arguments")?;
    let first = arguments.named_child(0)?;
    Some(CompactString::new(strip_quotes(node_text(first, source))))
}

pub(crate) fn add_require_import(
    cap: &CaptureNode<'_>,
    call: Node<'_>,
    kind: ImportKind,
    original: Option<CompactString>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let path = require_argument(call, ctx.source).unwrap_or_default();
    builder.add_import(ImportDef {
        symbol_id: symbol_id::import_id(&cap.location, &cap.text),
        name: cap.text.clone(),
        location: cap.location.clone(),
        defining_scope_id: ctx.scope_for(&cap.location),
        import_path: path,
        import_kind: kind,
        original_name: original,
        is_exported: false,
        export: None,
    });
    Ok(())
}

// =============================================================================
// IMPORTS & RE-EXPORTS
// =============================================================================

fn add_esm_import(
    cap: &CaptureNode<'_>,
    kind: ImportKind,
    original: Option<CompactString>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(path) = statement_source(cap.node, ctx.source) else {
        return Ok(());
    };
    builder.add_import(ImportDef {
        symbol_id: symbol_id::import_id(&cap.location, &cap.text),
        name: cap.text.clone(),
        location: cap.location.clone(),
        defining_scope_id: ctx.scope_for(&cap.location),
        import_path: path,
        import_kind: kind,
        original_name: original,
        is_exported: false,
        export: None,
    });
    Ok(())
}

fn handle_import_default(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    add_esm_import(cap, ImportKind::Default, None, builder, ctx)
}

fn handle_import_named(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    add_esm_import(cap, ImportKind::Named, None, builder, ctx)
}

fn handle_import_named_alias(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let original = cap
        .node
        .parent()
        .and_then(|spec| spec.child_by_field_name("name"))
        .map(|n| CompactString::new(node_text(n, ctx.source)));
    add_esm_import(cap, ImportKind::Named, original, builder, ctx)
}

fn handle_import_namespace(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    add_esm_import(cap, ImportKind::Namespace, None, builder, ctx)
}

/// `export { X }` / `export { X as Y } from "mod"`
fn handle_reexport(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let alias = cap
        .node
        .parent()
        .and_then(|spec| spec.child_by_field_name("alias"))
        .map(|a| CompactString::new(node_text(a, ctx.source)));

    let Some(path) = statement_source(cap.node, ctx.source) else {
        // No source module: the clause exports a local declaration
        builder.mark_exported_by_name(&cap.text, alias);
        return Ok(());
    };

    let exported_name = alias.clone().unwrap_or_else(|| cap.text.clone());
    let is_default = exported_name == "default";
    builder.add_import(ImportDef {
        symbol_id: symbol_id::import_id(&cap.location, &exported_name),
        name: exported_name.clone(),
        location: cap.location.clone(),
        defining_scope_id: ctx.scope_for(&cap.location),
        import_path: path.clone(),
        import_kind: ImportKind::Named,
        original_name: alias.is_some().then(|| cap.text.clone()),
        is_exported: true,
        export: Some(ExportInfo {
            is_default,
            is_reexport: true,
            export_name: Some(exported_name),
            source: Some(path),
        }),
    });
    Ok(())
}

/// `export * as ns from "mod"`
fn handle_reexport_namespace(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(path) = statement_source(cap.node, ctx.source) else {
        return Ok(());
    };
    builder.add_import(ImportDef {
        symbol_id: symbol_id::import_id(&cap.location, &cap.text),
        name: cap.text.clone(),
        location: cap.location.clone(),
        defining_scope_id: ctx.scope_for(&cap.location),
        import_path: path.clone(),
        import_kind: ImportKind::Namespace,
        original_name: None,
        is_exported: true,
        export: Some(ExportInfo {
            is_default: false,
            is_reexport: true,
            export_name: Some(cap.text.clone()),
            source: Some(path),
        }),
    });
    Ok(())
}

/// `export * from "mod"` (the capture is the source string)
fn handle_reexport_wildcard(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let path = CompactString::new(strip_quotes(&cap.text));
    builder.add_import(ImportDef {
        symbol_id: symbol_id::import_id(&cap.location, "*"),
        name: CompactString::new("*"),
        location: cap.location.clone(),
        defining_scope_id: ctx.scope_for(&cap.location),
        import_path: path.clone(),
        import_kind: ImportKind::Namespace,
        original_name: None,
        is_exported: true,
        export: Some(ExportInfo {
            is_default: false,
            is_reexport: true,
            export_name: None,
            source: Some(path),
        }),
    });
    Ok(())
}

// =============================================================================
// DOCUMENTATION
// =============================================================================

fn handle_doc_comment(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    _ctx: &HandlerContext<'_>,
) -> Result<()> {
    if cap.text.starts_with("/**") {
        builder.store_documentation(cap.text.to_string(), cap.location.clone());
    }
    Ok(())
}
