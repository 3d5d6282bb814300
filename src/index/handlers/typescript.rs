//! TypeScript definition handlers
//!
//! Built as an overlay on the JavaScript registry: class, method, field,
//! parameter, variable, and function handlers are overridden to extract
//! type annotations, generics, access modifiers, and parameter properties;
//! interfaces, type aliases, enums, namespaces, and decorators are added on
//! top.
//!
//! @module index/handlers/typescript

use compact_str::CompactString;
use tree_sitter::Node;

use crate::core::error::Result;
use crate::index::builder::DefinitionBuilder;
use crate::index::capture::CaptureNode;
use crate::index::symbol_id;
use crate::index::types::{
    AccessModifier, ClassDef, Decorator, EnumDef, EnumMember, FunctionDef, FunctionSignature,
    ImportKind, InterfaceDef, Location, MemberFlags, MethodDef, MethodKind, NamespaceDef,
    ParameterDef, PropertyDef, ScopeType, TypeAliasDef, VariableDef, VariableKind,
};

use super::javascript::{
    self, apply_initializer, callable_ids, containing_class_id, export_info, export_marker,
    is_require_call, CALLABLE_KINDS, CLASS_KINDS,
};
use super::{
    annotation_text, body_scope_id, callback_context_for, child_of_kind, child_text,
    find_ancestor, has_child_kind, node_text, require_child, Handler, HandlerContext,
    HandlerRegistry,
};

// =============================================================================
// REGISTRY (overlay on JavaScript)
// =============================================================================

pub(super) fn registry(base: &HandlerRegistry) -> HandlerRegistry {
    const OVERRIDES: &[(&str, Handler)] = &[
        // Overridden JavaScript handlers
        ("definition.class", handle_class),
        ("definition.method", handle_method),
        ("definition.function", handle_function),
        ("definition.function.anonymous", handle_anonymous_function),
        ("definition.property", handle_field),
        ("definition.variable", handle_variable),
        ("definition.parameter", handle_parameter),
        // TypeScript-only constructs
        ("definition.method.abstract", handle_abstract_method),
        ("definition.interface", handle_interface),
        ("definition.interface.method", handle_interface_method),
        ("definition.interface.property", handle_interface_property),
        ("definition.enum", handle_enum),
        ("definition.enum.member", handle_enum_member),
        ("definition.type_alias", handle_type_alias),
        ("definition.namespace", handle_namespace),
        ("decorator.any", handle_decorator),
    ];
    base.overlay(OVERRIDES)
}

// =============================================================================
// EXTRACTION HELPERS
// =============================================================================

fn generics_of(decl: Node<'_>, source: &str) -> Option<CompactString> {
    child_text(decl, "type_parameters", source)
}

fn return_type_of(decl: Node<'_>, source: &str) -> Option<CompactString> {
    decl.child_by_field_name("return_type")
        .map(|t| annotation_text(t, source))
}

fn declared_type_of(node: Node<'_>, source: &str) -> Option<CompactString> {
    node.child_by_field_name("type")
        .map(|t| annotation_text(t, source))
}

fn accessibility_of(decl: Node<'_>, source: &str) -> Option<AccessModifier> {
    let modifier = child_of_kind(decl, "accessibility_modifier")?;
    match node_text(modifier, source) {
        "public" => Some(AccessModifier::Public),
        "private" => Some(AccessModifier::Private),
        "protected" => Some(AccessModifier::Protected),
        _ => None,
    }
}

fn member_flags_of(decl: Node<'_>) -> MemberFlags {
    let mut flags = MemberFlags::empty();
    if has_child_kind(decl, "static") {
        flags |= MemberFlags::STATIC;
    }
    if has_child_kind(decl, "async") {
        flags |= MemberFlags::ASYNC;
    }
    if has_child_kind(decl, "readonly") {
        flags |= MemberFlags::READONLY;
    }
    if has_child_kind(decl, "abstract") {
        flags |= MemberFlags::ABSTRACT;
    }
    flags
}

fn is_optional(decl: Node<'_>) -> bool {
    has_child_kind(decl, "?")
}

fn decorator_name(text: &str) -> CompactString {
    let stripped = text.trim_start_matches('@');
    let base = stripped.split('(').next().unwrap_or(stripped);
    CompactString::new(base.trim())
}

// =============================================================================
// CLASSES & MEMBERS
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

    // extends and implements both land in `extends`, in source order
    let mut extends = Vec::new();
    if let Some(heritage) = child_of_kind(decl, "class_heritage") {
        let mut cursor = heritage.walk();
        for clause in heritage.children(&mut cursor) {
            if matches!(clause.kind(), "extends_clause" | "implements_clause") {
                let mut inner = clause.walk();
                for ty in clause.named_children(&mut inner) {
                    extends.push(CompactString::new(node_text(ty, ctx.source)));
                }
            }
        }
    }

    let docstring = builder.consume_documentation(&decl_loc);
    builder.add_class(ClassDef {
        symbol_id: symbol_id::definition_id("class", &decl_loc),
        name: cap.text.clone(),
        location: decl_loc,
        defining_scope_id: defining,
        extends,
        generics: generics_of(decl, ctx.source),
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

fn build_method(
    cap: &CaptureNode<'_>,
    decl: Node<'_>,
    ctx: &HandlerContext<'_>,
    docstring: Option<String>,
    abstract_signature: bool,
) -> MethodDef {
    let file = ctx.file_path();
    let decl_loc = Location::from_node(decl, file);
    let (symbol_id, body_scope) = callable_ids(decl, ctx.source, file);

    let mut flags = member_flags_of(decl);
    if abstract_signature {
        flags |= MemberFlags::ABSTRACT;
    }
    let kind = if has_child_kind(decl, "get") {
        MethodKind::Getter
    } else if has_child_kind(decl, "set") {
        MethodKind::Setter
    } else {
        MethodKind::Regular
    };
    let access_modifier = if cap.text.starts_with('#') {
        Some(AccessModifier::Private)
    } else {
        accessibility_of(decl, ctx.source)
    };

    MethodDef {
        symbol_id,
        name: cap.text.clone(),
        location: decl_loc,
        defining_scope_id: ctx.scope_for(&cap.location),
        signature: FunctionSignature {
            parameters: vec![],
            return_type: return_type_of(decl, ctx.source),
        },
        generics: generics_of(decl, ctx.source),
        kind,
        access_modifier,
        flags,
        decorators: vec![],
        body_scope_id: if abstract_signature { None } else { body_scope },
        docstring,
    }
}

fn handle_method(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(decl) = cap.node.parent() else {
        return Ok(());
    };
    let Some(class_id) = containing_class_id(decl, ctx.file_path()) else {
        return Ok(());
    };
    let decl_loc = Location::from_node(decl, ctx.file_path());
    require_child(decl, "body", &decl_loc)?;

    let docstring = builder.consume_documentation(&decl_loc);
    let method = build_method(cap, decl, ctx, docstring, false);
    if cap.text == "constructor" {
        builder.add_constructor_to_class(&class_id, method);
    } else {
        builder.add_method_to_class(&class_id, method);
    }
    Ok(())
}

fn handle_abstract_method(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(decl) = cap.node.parent() else {
        return Ok(());
    };
    let Some(class_id) = containing_class_id(decl, ctx.file_path()) else {
        return Ok(());
    };
    let method = build_method(cap, decl, ctx, None, true);
    builder.add_method_to_class(&class_id, method);
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
    let Some(class_id) = containing_class_id(decl, ctx.file_path()) else {
        return Ok(());
    };

    let access_modifier = if cap.text.starts_with('#') {
        Some(AccessModifier::Private)
    } else {
        accessibility_of(decl, ctx.source)
    };
    builder.add_property_to_class(
        &class_id,
        PropertyDef {
            symbol_id: symbol_id::definition_id("property", &cap.location),
            name: cap.text.clone(),
            location: cap.location.clone(),
            defining_scope_id: ctx.scope_for(&cap.location),
            type_annotation: declared_type_of(decl, ctx.source),
            initial_value: child_text(decl, "value", ctx.source),
            optional: is_optional(decl),
            access_modifier,
            flags: member_flags_of(decl),
            decorators: vec![],
        },
    );
    Ok(())
}

// =============================================================================
// FUNCTIONS & PARAMETERS
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
        signature: FunctionSignature {
            parameters: vec![],
            return_type: return_type_of(decl, ctx.source),
        },
        generics: generics_of(decl, ctx.source),
        is_exported,
        export: is_exported.then(|| export_info(is_default)).flatten(),
        is_async: has_child_kind(decl, "async"),
        body_scope_id: body_scope,
        docstring,
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
            signature: FunctionSignature {
                parameters: vec![],
                return_type: return_type_of(cap.node, ctx.source),
            },
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
    // Parameters inside a function *type* are annotations, not bindings
    if find_ancestor(cap.node, &["function_type"]).is_some() {
        return Ok(());
    }
    let Some(callable) = find_ancestor(cap.node, CALLABLE_KINDS) else {
        return Ok(());
    };
    let file = ctx.file_path();
    let (parent_id, body_scope) = callable_ids(callable, ctx.source, file);

    let wrapper = find_ancestor(cap.node, &["required_parameter", "optional_parameter"]);
    let (type_annotation, default_value, optional) = match wrapper {
        Some(param) => (
            declared_type_of(param, ctx.source),
            child_text(param, "value", ctx.source),
            param.kind() == "optional_parameter",
        ),
        None => (None, None, false),
    };
    let is_rest = cap
        .node
        .parent()
        .is_some_and(|p| p.kind() == "rest_pattern");

    let parameter = ParameterDef {
        symbol_id: symbol_id::definition_id("parameter", &cap.location),
        name: cap.text.clone(),
        location: cap.location.clone(),
        defining_scope_id: body_scope.unwrap_or_else(|| ctx.scope_for(&cap.location)),
        type_annotation: type_annotation.clone(),
        default_value,
        optional,
        is_rest,
    };

    // Constructor parameter-properties: `constructor(private x: T)` also
    // declares a class property
    if let Some(param) = wrapper {
        let has_accessibility = child_of_kind(param, "accessibility_modifier").is_some()
            || has_child_kind(param, "readonly");
        let in_constructor = callable.kind() == "method_definition"
            && callable
                .child_by_field_name("name")
                .map(|n| node_text(n, ctx.source) == "constructor")
                .unwrap_or(false);
        if has_accessibility && in_constructor {
            if let Some(class_id) = containing_class_id(callable, file) {
                let mut flags = MemberFlags::empty();
                if has_child_kind(param, "readonly") {
                    flags |= MemberFlags::READONLY;
                }
                builder.add_property_to_class(
                    &class_id,
                    PropertyDef {
                        symbol_id: symbol_id::definition_id("property", &cap.location),
                        name: cap.text.clone(),
                        location: cap.location.clone(),
                        defining_scope_id: ctx.scope_for(&cap.location),
                        type_annotation,
                        initial_value: None,
                        optional: false,
                        access_modifier: accessibility_of(param, ctx.source),
                        flags,
                        decorators: vec![],
                    },
                );
            }
        }
    }

    builder.add_parameter_to_callable(&parent_id, parameter);
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
    if let Some(v) = value {
        if is_require_call(v, ctx.source) {
            return javascript::add_require_import(cap, v, ImportKind::Namespace, None, builder, ctx);
        }
    }

    let defining = ctx.scope_for(&cap.location);
    if builder.variable_exists(&cap.text, &defining) {
        return Ok(());
    }

    let statement = declarator.parent();
    let is_const = statement
        .is_some_and(|s| s.kind() == "lexical_declaration" && has_child_kind(s, "const"));
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
        type_annotation: declared_type_of(declarator, ctx.source),
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

// =============================================================================
// INTERFACES
// =============================================================================

fn handle_interface(
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
    let (marker, _) = export_marker(decl);

    let mut extends = Vec::new();
    if let Some(clause) = child_of_kind(decl, "extends_type_clause") {
        let mut cursor = clause.walk();
        for ty in clause.named_children(&mut cursor) {
            extends.push(CompactString::new(node_text(ty, ctx.source)));
        }
    }

    builder.add_interface(InterfaceDef {
        symbol_id: symbol_id::definition_id("interface", &decl_loc),
        name: cap.text.clone(),
        location: decl_loc,
        defining_scope_id: defining.clone(),
        extends,
        generics: generics_of(decl, ctx.source),
        methods: vec![],
        properties: vec![],
        is_exported: marker && ctx.is_root(&defining),
        body_scope_id: Some(body_scope),
    });
    Ok(())
}

fn containing_interface_id(
    member: Node<'_>,
    file_path: &str,
) -> Option<crate::index::types::SymbolId> {
    let interface = find_ancestor(member, &["interface_declaration"])?;
    Some(symbol_id::definition_id(
        "interface",
        &Location::from_node(interface, file_path),
    ))
}

fn handle_interface_method(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(decl) = cap.node.parent() else {
        return Ok(());
    };
    // method_signature also appears in object-type literals; only
    // interface members are recorded
    let Some(interface_id) = containing_interface_id(decl, ctx.file_path()) else {
        return Ok(());
    };
    let decl_loc = Location::from_node(decl, ctx.file_path());
    builder.add_method_signature_to_interface(
        &interface_id,
        MethodDef {
            symbol_id: symbol_id::definition_id("method", &decl_loc),
            name: cap.text.clone(),
            location: decl_loc,
            defining_scope_id: ctx.scope_for(&cap.location),
            signature: FunctionSignature {
                parameters: vec![],
                return_type: return_type_of(decl, ctx.source),
            },
            generics: generics_of(decl, ctx.source),
            kind: MethodKind::Regular,
            access_modifier: None,
            flags: member_flags_of(decl),
            decorators: vec![],
            body_scope_id: None,
            docstring: None,
        },
    );
    Ok(())
}

fn handle_interface_property(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(decl) = cap.node.parent() else {
        return Ok(());
    };
    let Some(interface_id) = containing_interface_id(decl, ctx.file_path()) else {
        return Ok(());
    };
    builder.add_property_signature_to_interface(
        &interface_id,
        PropertyDef {
            symbol_id: symbol_id::definition_id("property", &cap.location),
            name: cap.text.clone(),
            location: cap.location.clone(),
            defining_scope_id: ctx.scope_for(&cap.location),
            type_annotation: declared_type_of(decl, ctx.source),
            initial_value: None,
            optional: is_optional(decl),
            access_modifier: None,
            flags: member_flags_of(decl),
            decorators: vec![],
        },
    );
    Ok(())
}

// =============================================================================
// ENUMS, TYPE ALIASES, NAMESPACES
// =============================================================================

fn handle_enum(
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
    let (marker, _) = export_marker(decl);

    builder.add_enum(EnumDef {
        symbol_id: symbol_id::definition_id("enum", &decl_loc),
        name: cap.text.clone(),
        location: decl_loc,
        defining_scope_id: defining.clone(),
        members: vec![],
        is_const: has_child_kind(decl, "const"),
        is_exported: marker && ctx.is_root(&defining),
        body_scope_id: Some(body_scope),
    });
    Ok(())
}

fn handle_enum_member(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(enum_decl) = find_ancestor(cap.node, &["enum_declaration"]) else {
        return Ok(());
    };
    let enum_id = symbol_id::definition_id(
        "enum",
        &Location::from_node(enum_decl, ctx.file_path()),
    );
    let value = cap
        .node
        .parent()
        .filter(|p| p.kind() == "enum_assignment")
        .and_then(|p| child_text(p, "value", ctx.source));

    builder.add_enum_member(
        &enum_id,
        EnumMember {
            symbol_id: symbol_id::member_id("enum_member", &cap.text, &cap.location),
            name: cap.text.clone(),
            location: cap.location.clone(),
            value,
        },
    );
    Ok(())
}

fn handle_type_alias(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(decl) = cap.node.parent() else {
        return Ok(());
    };
    let decl_loc = Location::from_node(decl, ctx.file_path());
    let defining = ctx.scope_for(&cap.location);
    let (marker, _) = export_marker(decl);

    builder.add_type_alias(TypeAliasDef {
        symbol_id: symbol_id::definition_id("type_alias", &decl_loc),
        name: cap.text.clone(),
        location: decl_loc,
        defining_scope_id: defining.clone(),
        type_expression: child_text(decl, "value", ctx.source),
        generics: generics_of(decl, ctx.source),
        is_exported: marker && ctx.is_root(&defining),
    });
    Ok(())
}

fn handle_namespace(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(decl) = cap.node.parent() else {
        return Ok(());
    };
    let file = ctx.file_path();
    let decl_loc = Location::from_node(decl, file);
    let defining = ctx.scope_for(&cap.location);
    let (marker, _) = export_marker(decl);
    let body_scope = body_scope_id(decl, ScopeType::Module, file);

    builder.add_namespace(NamespaceDef {
        symbol_id: symbol_id::definition_id("namespace", &decl_loc),
        name: cap.text.clone(),
        location: decl_loc,
        defining_scope_id: defining.clone(),
        is_exported: marker && ctx.is_root(&defining),
        body_scope_id: body_scope,
    });
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
    let Some(target) = cap.node.parent() else {
        return Ok(());
    };
    let file = ctx.file_path();
    let decorator = Decorator {
        name: decorator_name(&cap.text),
        location: cap.location.clone(),
    };

    let target_id = match target.kind() {
        kind if CLASS_KINDS.contains(&kind) => {
            symbol_id::definition_id("class", &Location::from_node(target, file))
        }
        "export_statement" => {
            let Some(decl) = target.child_by_field_name("declaration") else {
                return Ok(());
            };
            if !CLASS_KINDS.contains(&decl.kind()) {
                return Ok(());
            }
            symbol_id::definition_id("class", &Location::from_node(decl, file))
        }
        "method_definition" | "abstract_method_signature" => {
            callable_ids(target, ctx.source, file).0
        }
        "public_field_definition" => {
            let Some(name) = target.child_by_field_name("name") else {
                return Ok(());
            };
            symbol_id::definition_id("property", &Location::from_node(name, file))
        }
        // Member decorators sit as class_body siblings preceding their
        // member in some grammar versions
        "class_body" => {
            let Some(member) = decorated_member(cap.node) else {
                return Ok(());
            };
            match member.kind() {
                "method_definition" | "abstract_method_signature" => {
                    callable_ids(member, ctx.source, file).0
                }
                "public_field_definition" => {
                    let Some(name) = member.child_by_field_name("name") else {
                        return Ok(());
                    };
                    symbol_id::definition_id("property", &Location::from_node(name, file))
                }
                _ => return Ok(()),
            }
        }
        _ => return Ok(()),
    };
    builder.add_decorator_to_target(&target_id, decorator);
    Ok(())
}

/// The class member a body-level decorator applies to: the next named
/// sibling that is not another decorator
fn decorated_member(decorator: Node<'_>) -> Option<Node<'_>> {
    let mut sibling = decorator.next_named_sibling();
    while let Some(node) = sibling {
        if node.kind() != "decorator" {
            return Some(node);
        }
        sibling = node.next_named_sibling();
    }
    None
}
