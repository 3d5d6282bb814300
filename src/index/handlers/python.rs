//! Python definition handlers
//!
//! Distinguishes methods by decorator (`@staticmethod`, `@classmethod`,
//! `@property`), tracks `__init__` as a constructor, treats `Protocol`
//! subclasses as interfaces and `Enum` subclasses as enums, applies the
//! underscore/dunder export convention, and unpacks every import form
//! including relative `from` imports.
//!
//! @module index/handlers/python

use compact_str::CompactString;
use tree_sitter::Node;

use crate::core::error::Result;
use crate::index::builder::DefinitionBuilder;
use crate::index::capture::CaptureNode;
use crate::index::symbol_id::{self, SymbolId};
use crate::index::types::{
    ClassDef, CollectionType, Decorator, EnumDef, EnumMember, FunctionCollection, FunctionDef,
    FunctionSignature, ImportDef, ImportKind, InterfaceDef, Location, MemberFlags, MethodDef,
    MethodKind, ParameterDef, PropertyDef, ScopeId, ScopeType, TypeAliasDef, VariableDef,
    VariableKind,
};

use super::{
    annotation_text, callback_context_for, child_of_kind, child_text, find_ancestor,
    has_child_kind, is_upper_snake, node_text, require_child, Handler, HandlerContext,
    HandlerRegistry,
};

// =============================================================================
// REGISTRY
// =============================================================================

pub(super) fn registry() -> HandlerRegistry {
    const ENTRIES: &[(&str, Handler)] = &[
        ("definition.class", handle_class),
        ("definition.function", handle_function),
        ("definition.function.anonymous", handle_lambda),
        ("definition.parameter", handle_parameter),
        ("definition.parameter.splat", handle_splat_parameter),
        ("definition.variable", handle_variable),
        ("definition.variable.loop", handle_loop_variable),
        ("definition.property.self", handle_self_property),
        ("definition.type_alias", handle_type_alias),
        ("import.module", handle_import_module),
        ("import.module.alias", handle_import_module_alias),
        ("import.from", handle_import_from),
        ("decorator.any", handle_decorator),
    ];
    HandlerRegistry::from_entries(ENTRIES)
}

// =============================================================================
// CONVENTIONS & SMALL WALKS
// =============================================================================

/// Module-level visibility: public unless `_`-prefixed, except dunders
pub(crate) fn is_public_name(name: &str) -> bool {
    if name.len() > 4 && name.starts_with("__") && name.ends_with("__") {
        return true;
    }
    !name.starts_with('_')
}

/// The class whose body directly contains `node` (decorator wrappers are
/// transparent)
pub(crate) fn containing_class_decl(node: Node<'_>) -> Option<Node<'_>> {
    let mut current = node.parent();
    while let Some(n) = current {
        match n.kind() {
            "decorated_definition" => current = n.parent(),
            "block" => return n.parent().filter(|p| p.kind() == "class_definition"),
            _ => return None,
        }
    }
    None
}

/// Decorator names applied to a (possibly wrapped) definition
fn decorator_names(decl: Node<'_>, source: &str) -> Vec<CompactString> {
    let Some(wrapper) = decl
        .parent()
        .filter(|p| p.kind() == "decorated_definition")
    else {
        return Vec::new();
    };
    let mut names = Vec::new();
    let mut cursor = wrapper.walk();
    for child in wrapper.children(&mut cursor) {
        if child.kind() == "decorator" {
            let text = node_text(child, source).trim_start_matches('@');
            let base = text.split('(').next().unwrap_or(text).trim();
            names.push(CompactString::new(base));
        }
    }
    names
}

/// First statement of a suite, when it is a bare string
pub(crate) fn docstring_of(decl: Node<'_>, source: &str) -> Option<String> {
    let body = decl.child_by_field_name("body")?;
    let first = body.named_child(0)?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let expr = first.named_child(0)?;
    if expr.kind() != "string" {
        return None;
    }
    let text = node_text(expr, source)
        .trim_matches(|c| c == '"' || c == '\'')
        .trim();
    Some(text.to_string())
}

fn last_type_segment(name: &str) -> &str {
    let last = name.rsplit('.').next().unwrap_or(name);
    last.split('[').next().unwrap_or(last).trim()
}

fn is_protocol_base(name: &str) -> bool {
    last_type_segment(name) == "Protocol"
}

fn is_enum_base(name: &str) -> bool {
    matches!(
        last_type_segment(name),
        "Enum" | "IntEnum" | "StrEnum" | "Flag" | "IntFlag"
    )
}

/// Symbol id and body-scope id of a `def` or `lambda`, mirroring the scope
/// builder's refinement
pub(crate) fn callable_ids(
    decl: Node<'_>,
    source: &str,
    file_path: &str,
) -> (SymbolId, Option<ScopeId>) {
    let location = Location::from_node(decl, file_path);
    if decl.kind() == "lambda" {
        let scope = symbol_id::scope_id(ScopeType::Function, &location);
        return (symbol_id::anonymous_id(&location), Some(scope));
    }

    let name = decl
        .child_by_field_name("name")
        .map(|n| node_text(n, source))
        .unwrap_or_default();
    let in_class = containing_class_decl(decl).is_some();
    let (kind, scope_type) = if in_class && name == "__init__" {
        ("constructor", ScopeType::Constructor)
    } else if in_class {
        ("method", ScopeType::Method)
    } else {
        ("function", ScopeType::Function)
    };
    let scope = decl
        .child_by_field_name("body")
        .map(|body| symbol_id::scope_id(scope_type, &Location::from_node(body, file_path)));
    (symbol_id::definition_id(kind, &location), scope)
}

fn expression_root_name(node: Node<'_>, source: &str) -> Option<CompactString> {
    let mut current = node;
    loop {
        match current.kind() {
            "attribute" => current = current.child_by_field_name("object")?,
            "subscript" => current = current.child_by_field_name("value")?,
            "identifier" => return Some(CompactString::new(node_text(current, source))),
            _ => return None,
        }
    }
}

// =============================================================================
// CLASSES (class / Protocol interface / Enum)
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
    let body_loc = Location::from_node(body, file);

    let mut supers: Vec<CompactString> = Vec::new();
    if let Some(args) = decl.child_by_field_name("superclasses") {
        let mut cursor = args.walk();
        for arg in args.named_children(&mut cursor) {
            supers.push(CompactString::new(node_text(arg, ctx.source)));
        }
    }

    let defining = ctx.scope_for(&cap.location);
    let is_exported = is_public_name(&cap.text) && ctx.is_root(&defining);
    let docstring = docstring_of(decl, ctx.source);
    let body_scope = symbol_id::scope_id(ScopeType::Class, &body_loc);

    if supers.iter().any(|s| is_protocol_base(s)) {
        let extends = supers
            .into_iter()
            .filter(|s| !is_protocol_base(s))
            .collect();
        builder.add_interface(InterfaceDef {
            symbol_id: symbol_id::definition_id("interface", &decl_loc),
            name: cap.text.clone(),
            location: decl_loc,
            defining_scope_id: defining,
            extends,
            generics: None,
            methods: vec![],
            properties: vec![],
            is_exported,
            body_scope_id: Some(body_scope),
        });
        return Ok(());
    }

    if supers.iter().any(|s| is_enum_base(s)) {
        builder.add_enum(EnumDef {
            symbol_id: symbol_id::definition_id("enum", &decl_loc),
            name: cap.text.clone(),
            location: decl_loc,
            defining_scope_id: defining,
            members: vec![],
            is_const: false,
            is_exported,
            body_scope_id: Some(body_scope),
        });
        return Ok(());
    }

    builder.add_class(ClassDef {
        symbol_id: symbol_id::definition_id("class", &decl_loc),
        name: cap.text.clone(),
        location: decl_loc,
        defining_scope_id: defining,
        extends: supers,
        generics: None,
        methods: vec![],
        properties: vec![],
        constructors: vec![],
        decorators: vec![],
        is_exported,
        export: None,
        body_scope_id: Some(body_scope),
        docstring,
    });
    Ok(())
}

// =============================================================================
// FUNCTIONS & METHODS
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
    let docstring = docstring_of(decl, ctx.source);
    let return_type = decl
        .child_by_field_name("return_type")
        .map(|t| CompactString::new(node_text(t, ctx.source)));

    let Some(class_decl) = containing_class_decl(decl) else {
        // Plain function (possibly nested)
        let defining = ctx.scope_for(&cap.location);
        let is_exported = is_public_name(&cap.text) && ctx.is_root(&defining);
        builder.add_function(FunctionDef {
            symbol_id,
            name: cap.text.clone(),
            location: decl_loc,
            defining_scope_id: defining,
            signature: FunctionSignature {
                parameters: vec![],
                return_type,
            },
            generics: None,
            is_exported,
            export: None,
            is_async: has_child_kind(decl, "async"),
            body_scope_id: body_scope,
            docstring,
            callback_context: None,
        });
        return Ok(());
    };

    let class_name = class_decl
        .child_by_field_name("name")
        .map(|n| node_text(n, ctx.source))
        .unwrap_or_default();

    let decorators = decorator_names(decl, ctx.source);
    let mut flags = MemberFlags::empty();
    if has_child_kind(decl, "async") {
        flags |= MemberFlags::ASYNC;
    }
    let kind = if decorators.iter().any(|d| *d == "staticmethod") {
        flags |= MemberFlags::STATIC;
        MethodKind::Staticmethod
    } else if decorators.iter().any(|d| *d == "classmethod") {
        MethodKind::Classmethod
    } else if decorators.iter().any(|d| *d == "property") {
        MethodKind::Getter
    } else {
        MethodKind::Regular
    };

    let method = MethodDef {
        symbol_id,
        name: cap.text.clone(),
        location: decl_loc,
        defining_scope_id: ctx.scope_for(&cap.location),
        signature: FunctionSignature {
            parameters: vec![],
            return_type,
        },
        generics: None,
        kind,
        access_modifier: None,
        flags,
        decorators: vec![],
        body_scope_id: body_scope,
        docstring,
    };

    if let Some(interface_id) = builder.find_interface_by_name(class_name) {
        let mut signature = method;
        signature.body_scope_id = None;
        builder.add_method_signature_to_interface(&interface_id, signature);
    } else if let Some(class_id) = builder.find_class_by_name(class_name) {
        if cap.text == "__init__" {
            builder.add_constructor_to_class(&class_id, method);
        } else {
            builder.add_method_to_class(&class_id, method);
        }
    } else {
        tracing::debug!(class = class_name, method = %cap.text, "method outside tracked class dropped");
    }
    Ok(())
}

fn handle_lambda(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let file = ctx.file_path();
    let (symbol_id, body_scope) = callable_ids(cap.node, ctx.source, file);
    let (callback_context, callee_root) = callback_context_for(cap.node, ctx.source, file);

    // The lambda's extent is its own scope; bind it one level up
    let defining = match &body_scope {
        Some(own) => ctx.scope_above(own, &cap.location),
        None => ctx.scope_for(&cap.location),
    };

    builder.add_anonymous_function(
        FunctionDef {
            symbol_id,
            name: CompactString::new("<lambda>"),
            location: cap.location.clone(),
            defining_scope_id: defining,
            signature: FunctionSignature::default(),
            generics: None,
            is_exported: false,
            export: None,
            is_async: false,
            body_scope_id: body_scope,
            docstring: None,
            callback_context: Some(callback_context),
        },
        callee_root,
    );
    Ok(())
}

// =============================================================================
// PARAMETERS
// =============================================================================

fn add_parameter(
    cap: &CaptureNode<'_>,
    type_annotation: Option<CompactString>,
    default_value: Option<CompactString>,
    is_rest: bool,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(callable) = find_ancestor(cap.node, &["function_definition", "lambda"]) else {
        return Ok(());
    };
    let (parent_id, body_scope) = callable_ids(callable, ctx.source, ctx.file_path());
    let optional = default_value.is_some();
    builder.add_parameter_to_callable(
        &parent_id,
        ParameterDef {
            symbol_id: symbol_id::definition_id("parameter", &cap.location),
            name: cap.text.clone(),
            location: cap.location.clone(),
            defining_scope_id: body_scope.unwrap_or_else(|| ctx.scope_for(&cap.location)),
            type_annotation,
            default_value,
            optional,
            is_rest,
        },
    );
    Ok(())
}

fn handle_parameter(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let parent = cap.node.parent();
    let (type_annotation, default_value) = match parent.map(|p| p.kind()) {
        Some("typed_parameter") => (
            parent.and_then(|p| p.child_by_field_name("type"))
                .map(|t| CompactString::new(node_text(t, ctx.source))),
            None,
        ),
        Some("default_parameter") => (
            None,
            parent.and_then(|p| child_text(p, "value", ctx.source)),
        ),
        Some("typed_default_parameter") => (
            parent
                .and_then(|p| p.child_by_field_name("type"))
                .map(|t| CompactString::new(node_text(t, ctx.source))),
            parent.and_then(|p| child_text(p, "value", ctx.source)),
        ),
        _ => (None, None),
    };
    add_parameter(cap, type_annotation, default_value, false, builder, ctx)
}

/// `*args` parameters type as `tuple`, `**kwargs` as `dict`
fn handle_splat_parameter(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    if find_ancestor(cap.node, &["parameters", "lambda_parameters"]).is_none() {
        return Ok(());
    }
    let splat_type = cap
        .node
        .parent()
        .map(|p| {
            if p.kind() == "dictionary_splat_pattern" {
                CompactString::new("dict")
            } else {
                CompactString::new("tuple")
            }
        });
    add_parameter(cap, splat_type, None, true, builder, ctx)
}

// =============================================================================
// VARIABLES & PROPERTIES
// =============================================================================

fn handle_variable(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(assignment) = find_ancestor(cap.node, &["assignment"]) else {
        return Ok(());
    };
    let type_annotation = assignment
        .child_by_field_name("type")
        .map(|t| annotation_text(t, ctx.source));
    let value = assignment.child_by_field_name("right");

    // Class-body assignments are enum members, interface property
    // signatures, or class attributes depending on the class's nature
    if let Some(class_decl) = class_body_assignment(assignment) {
        let class_name = class_decl
            .child_by_field_name("name")
            .map(|n| node_text(n, ctx.source))
            .unwrap_or_default();

        if let Some(enum_id) = builder.find_enum_by_name(class_name) {
            builder.add_enum_member(
                &enum_id,
                EnumMember {
                    symbol_id: symbol_id::member_id("enum_member", &cap.text, &cap.location),
                    name: cap.text.clone(),
                    location: cap.location.clone(),
                    value: value.map(|v| CompactString::new(node_text(v, ctx.source))),
                },
            );
            return Ok(());
        }

        let property = PropertyDef {
            symbol_id: symbol_id::definition_id("property", &cap.location),
            name: cap.text.clone(),
            location: cap.location.clone(),
            defining_scope_id: ctx.scope_for(&cap.location),
            type_annotation,
            initial_value: value.map(|v| CompactString::new(node_text(v, ctx.source))),
            optional: false,
            access_modifier: None,
            flags: MemberFlags::empty(),
            decorators: vec![],
        };
        if let Some(interface_id) = builder.find_interface_by_name(class_name) {
            builder.add_property_signature_to_interface(&interface_id, property);
        } else if let Some(class_id) = builder.find_class_by_name(class_name) {
            builder.add_property_to_class(&class_id, property);
        }
        return Ok(());
    }

    let defining = ctx.scope_for(&cap.location);
    if builder.variable_exists(&cap.text, &defining) {
        return Ok(());
    }
    let is_exported = is_public_name(&cap.text) && ctx.is_root(&defining);

    let mut variable = VariableDef {
        symbol_id: symbol_id::definition_id("variable", &cap.location),
        name: cap.text.clone(),
        location: cap.location.clone(),
        defining_scope_id: defining,
        kind: if is_upper_snake(&cap.text) {
            VariableKind::Constant
        } else {
            VariableKind::Variable
        },
        type_annotation,
        initial_value: None,
        is_exported,
        export: None,
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

/// The class whose body directly holds this assignment statement, if any
fn class_body_assignment(assignment: Node<'_>) -> Option<Node<'_>> {
    let statement = assignment
        .parent()
        .filter(|p| p.kind() == "expression_statement")?;
    let block = statement.parent().filter(|p| p.kind() == "block")?;
    block.parent().filter(|p| p.kind() == "class_definition")
}

fn apply_initializer(
    variable: &mut VariableDef,
    alias: &mut Option<CompactString>,
    value: Node<'_>,
    source: &str,
) {
    if value.kind() != "lambda" {
        variable.initial_value = Some(CompactString::new(node_text(value, source)));
    }
    match value.kind() {
        "call" => {
            variable.initialized_from_call = value
                .child_by_field_name("function")
                .map(|f| CompactString::new(node_text(f, source)));
        }
        "subscript" => {
            variable.derived_from = value
                .child_by_field_name("value")
                .and_then(|v| expression_root_name(v, source));
        }
        "identifier" => {
            *alias = Some(CompactString::new(node_text(value, source)));
        }
        "list" | "tuple" | "set" => {
            let collection_type = match value.kind() {
                "list" => CollectionType::Array,
                "tuple" => CollectionType::Tuple,
                _ => CollectionType::Set,
            };
            let mut stored = Vec::new();
            let mut cursor = value.walk();
            for element in value.named_children(&mut cursor) {
                if element.kind() == "identifier" {
                    stored.push(CompactString::new(node_text(element, source)));
                }
            }
            if !stored.is_empty() {
                variable.function_collection = Some(FunctionCollection {
                    collection_type,
                    stored_references: stored,
                    collection_id: variable.symbol_id.clone(),
                });
            }
        }
        "dictionary" => {
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

/// Loop, comprehension, `except ... as`, and `with ... as` bindings are
/// plain non-exported variables
fn handle_loop_variable(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let defining = ctx.scope_for(&cap.location);
    if builder.variable_exists(&cap.text, &defining) {
        return Ok(());
    }
    builder.add_variable(VariableDef {
        symbol_id: symbol_id::definition_id("variable", &cap.location),
        name: cap.text.clone(),
        location: cap.location.clone(),
        defining_scope_id: defining,
        kind: VariableKind::Variable,
        type_annotation: None,
        initial_value: None,
        is_exported: false,
        export: None,
        function_collection: None,
        derived_from: None,
        initialized_from_call: None,
        collection_source: None,
    });
    Ok(())
}

/// `self.x = …` inside a method declares an instance attribute
fn handle_self_property(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(attribute) = cap.node.parent() else {
        return Ok(());
    };
    let is_self = attribute
        .child_by_field_name("object")
        .map(|o| o.kind() == "identifier" && node_text(o, ctx.source) == "self")
        .unwrap_or(false);
    if !is_self {
        return Ok(());
    }

    let Some(method) = find_ancestor(attribute, &["function_definition"]) else {
        return Ok(());
    };
    let Some(class_decl) = containing_class_decl(method) else {
        return Ok(());
    };
    let class_name = class_decl
        .child_by_field_name("name")
        .map(|n| node_text(n, ctx.source))
        .unwrap_or_default();

    let assignment = find_ancestor(attribute, &["assignment"]);
    let property = PropertyDef {
        symbol_id: symbol_id::definition_id("property", &cap.location),
        name: cap.text.clone(),
        location: cap.location.clone(),
        defining_scope_id: ctx.scope_for(&cap.location),
        type_annotation: assignment
            .and_then(|a| a.child_by_field_name("type"))
            .map(|t| annotation_text(t, ctx.source)),
        initial_value: assignment
            .and_then(|a| a.child_by_field_name("right"))
            .map(|v| CompactString::new(node_text(v, ctx.source))),
        optional: false,
        access_modifier: None,
        flags: MemberFlags::empty(),
        decorators: vec![],
    };

    if let Some(class_id) = builder.find_class_by_name(class_name) {
        builder.add_property_to_class(&class_id, property);
    } else if let Some(interface_id) = builder.find_interface_by_name(class_name) {
        builder.add_property_signature_to_interface(&interface_id, property);
    }
    Ok(())
}

// =============================================================================
// TYPE ALIASES (PEP 695)
// =============================================================================

fn handle_type_alias(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    // `type Alias = expr`: the statement node carries two `type` children
    let left = cap.node.named_child(0);
    let right = cap.node.named_child(1);
    let Some(left) = left else {
        return Ok(());
    };
    let full = node_text(left, ctx.source);
    let name = full.split('[').next().unwrap_or(full).trim();
    if name.is_empty() {
        return Ok(());
    }
    let generics = full
        .find('[')
        .map(|i| CompactString::new(full[i..].trim()));

    let defining = ctx.scope_for(&cap.location);
    builder.add_type_alias(TypeAliasDef {
        symbol_id: symbol_id::definition_id("type_alias", &cap.location),
        name: CompactString::new(name),
        location: cap.location.clone(),
        defining_scope_id: defining.clone(),
        type_expression: right.map(|r| CompactString::new(node_text(r, ctx.source))),
        generics,
        is_exported: is_public_name(name) && ctx.is_root(&defining),
    });
    Ok(())
}

// =============================================================================
// IMPORTS
// =============================================================================

fn add_python_import(
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
    location: Location,
    name: CompactString,
    path: CompactString,
    kind: ImportKind,
    original: Option<CompactString>,
) {
    let defining = ctx.scope_for(&location);
    let is_exported = is_public_name(&name) && ctx.is_root(&defining);
    builder.add_import(ImportDef {
        symbol_id: symbol_id::import_id(&location, &name),
        name,
        location,
        defining_scope_id: defining,
        import_path: path,
        import_kind: kind,
        original_name: original,
        is_exported,
        export: None,
    });
}

/// `import X`
fn handle_import_module(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    add_python_import(
        builder,
        ctx,
        cap.location.clone(),
        cap.text.clone(),
        cap.text.clone(),
        ImportKind::Namespace,
        None,
    );
    Ok(())
}

/// `import X as Y`
fn handle_import_module_alias(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(name_node) = cap.node.child_by_field_name("name") else {
        return Ok(());
    };
    let Some(alias_node) = cap.node.child_by_field_name("alias") else {
        return Ok(());
    };
    let original = CompactString::new(node_text(name_node, ctx.source));
    let alias = CompactString::new(node_text(alias_node, ctx.source));
    add_python_import(
        builder,
        ctx,
        Location::from_node(alias_node, ctx.file_path()),
        alias,
        original.clone(),
        ImportKind::Namespace,
        Some(original),
    );
    Ok(())
}

/// `from X import …` in all its shapes, including relative dots and `*`
fn handle_import_from(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let statement = cap.node;
    let Some(module) = statement.child_by_field_name("module_name") else {
        return Ok(());
    };
    let path = CompactString::new(node_text(module, ctx.source));

    if let Some(wildcard) = child_of_kind(statement, "wildcard_import") {
        add_python_import(
            builder,
            ctx,
            Location::from_node(wildcard, ctx.file_path()),
            CompactString::new("*"),
            path,
            ImportKind::Namespace,
            None,
        );
        return Ok(());
    }

    let mut cursor = statement.walk();
    for name_node in statement.children_by_field_name("name", &mut cursor) {
        match name_node.kind() {
            "dotted_name" | "identifier" => {
                let name = CompactString::new(node_text(name_node, ctx.source));
                add_python_import(
                    builder,
                    ctx,
                    Location::from_node(name_node, ctx.file_path()),
                    name,
                    path.clone(),
                    ImportKind::Named,
                    None,
                );
            }
            "aliased_import" => {
                let original = name_node
                    .child_by_field_name("name")
                    .map(|n| CompactString::new(node_text(n, ctx.source)));
                let Some(alias_node) = name_node.child_by_field_name("alias") else {
                    continue;
                };
                let alias = CompactString::new(node_text(alias_node, ctx.source));
                add_python_import(
                    builder,
                    ctx,
                    Location::from_node(alias_node, ctx.file_path()),
                    alias,
                    path.clone(),
                    ImportKind::Named,
                    original,
                );
            }
            _ => {}
        }
    }
    Ok(())
}

// =============================================================================
// DECORATORS
// =============================================================================

fn handle_decorator(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(wrapper) = cap
        .node
        .parent()
        .filter(|p| p.kind() == "decorated_definition")
    else {
        return Ok(());
    };
    let Some(decl) = wrapper.child_by_field_name("definition") else {
        return Ok(());
    };

    let text = cap.text.trim_start_matches('@');
    let base = text.split('(').next().unwrap_or(text).trim();
    let decorator = Decorator {
        name: CompactString::new(base),
        location: cap.location.clone(),
    };

    let file = ctx.file_path();
    let target_id = match decl.kind() {
        "class_definition" => {
            symbol_id::definition_id("class", &Location::from_node(decl, file))
        }
        "function_definition" => callable_ids(decl, ctx.source, file).0,
        _ => return Ok(()),
    };
    builder.add_decorator_to_target(&target_id, decorator);
    Ok(())
}
