//! Rust definition handlers
//!
//! `struct` maps to class, `enum` to enum, `trait` to interface. Functions
//! route on their surroundings: inherent and trait-impl functions attach to
//! the struct (with `new` as constructor), trait items become interface
//! signatures, everything else is a free function. `use` trees flatten into
//! one import per leaf; `pub` marks exports.
//!
//! @module index/handlers/rust

use compact_str::CompactString;
use tree_sitter::Node;

use crate::core::error::Result;
use crate::index::builder::DefinitionBuilder;
use crate::index::capture::CaptureNode;
use crate::index::symbol_id::{self, SymbolId};
use crate::index::types::{
    AccessModifier, ClassDef, EnumDef, EnumMember, FunctionDef, FunctionSignature, ImportDef,
    ImportKind, InterfaceDef, Location, MemberFlags, MethodDef, MethodKind, NamespaceDef,
    ParameterDef, PropertyDef, ScopeId, ScopeType, TypeAliasDef, VariableDef, VariableKind,
};

use super::{
    annotation_text, body_scope_id, callback_context_for, child_of_kind, child_text,
    find_ancestor, node_text, require_child, Handler, HandlerContext, HandlerRegistry,
};

// =============================================================================
// REGISTRY
// =============================================================================

pub(super) fn registry() -> HandlerRegistry {
    const ENTRIES: &[(&str, Handler)] = &[
        ("definition.class", handle_struct),
        ("definition.enum", handle_enum),
        ("definition.enum.member", handle_enum_member),
        ("definition.interface", handle_trait),
        ("definition.function", handle_function),
        ("definition.method.signature", handle_method_signature),
        ("definition.property", handle_field),
        ("definition.parameter", handle_parameter),
        ("definition.parameter.self", handle_self_parameter),
        ("definition.function.anonymous", handle_closure),
        ("definition.variable", handle_let),
        ("definition.variable.constant", handle_constant),
        ("definition.type_alias", handle_type_alias),
        ("definition.namespace", handle_module),
        ("import.use", handle_use),
        ("import.extern_crate", handle_extern_crate),
        ("documentation.comment", handle_doc_comment),
    ];
    HandlerRegistry::from_entries(ENTRIES)
}

// =============================================================================
// SMALL WALKS
// =============================================================================

const CALLABLE_KINDS: &[&str] = &[
    "function_item",
    "function_signature_item",
    "closure_expression",
];

fn is_pub(decl: Node<'_>) -> bool {
    child_of_kind(decl, "visibility_modifier").is_some()
}

fn has_modifier(decl: Node<'_>, modifier: &str) -> bool {
    child_of_kind(decl, "function_modifiers")
        .map(|mods| {
            let mut cursor = mods.walk();
            let found = mods.children(&mut cursor).any(|c| c.kind() == modifier);
            found
        })
        .unwrap_or(false)
}

/// Base name of an impl target or trait bound (`Foo` from `Foo<T>`)
fn base_type_name(text: &str) -> &str {
    text.split('<').next().unwrap_or(text).trim()
}

fn impl_type_name<'s>(impl_node: Node<'_>, source: &'s str) -> Option<&'s str> {
    impl_node
        .child_by_field_name("type")
        .map(|t| base_type_name(node_text(t, source)))
}

/// Symbol id and body-scope id for `fn` items and closures, mirroring the
/// scope builder's refinement
pub(crate) fn callable_ids(
    decl: Node<'_>,
    source: &str,
    file_path: &str,
) -> (SymbolId, Option<ScopeId>) {
    let location = Location::from_node(decl, file_path);
    if decl.kind() == "closure_expression" {
        let scope = symbol_id::scope_id(ScopeType::Function, &location);
        return (symbol_id::anonymous_id(&location), Some(scope));
    }

    let name = decl
        .child_by_field_name("name")
        .map(|n| node_text(n, source))
        .unwrap_or_default();
    let in_impl = find_ancestor(decl, &["impl_item"]).is_some();
    let in_trait = find_ancestor(decl, &["trait_item"]).is_some();
    let (kind, scope_type) = if in_impl && name == "new" {
        ("constructor", ScopeType::Constructor)
    } else if in_impl || in_trait {
        ("method", ScopeType::Method)
    } else {
        ("function", ScopeType::Function)
    };
    let scope = decl
        .child_by_field_name("body")
        .map(|body| symbol_id::scope_id(scope_type, &Location::from_node(body, file_path)));
    (symbol_id::definition_id(kind, &location), scope)
}

// =============================================================================
// TYPES (struct / enum / trait)
// =============================================================================

fn handle_struct(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(decl) = cap.node.parent() else {
        return Ok(());
    };
    let file = ctx.file_path();
    let decl_loc = Location::from_node(decl, file);
    let body_scope = body_scope_id(decl, ScopeType::Class, file);

    let defining = ctx.scope_for(&cap.location);
    let is_exported = is_pub(decl) && ctx.is_root(&defining);
    let docstring = builder.consume_documentation(&decl_loc);

    builder.add_class(ClassDef {
        symbol_id: symbol_id::definition_id("class", &decl_loc),
        name: cap.text.clone(),
        location: decl_loc,
        defining_scope_id: defining,
        extends: vec![],
        generics: child_text(decl, "type_parameters", ctx.source),
        methods: vec![],
        properties: vec![],
        constructors: vec![],
        decorators: vec![],
        is_exported,
        export: None,
        body_scope_id: body_scope,
        docstring,
    });
    Ok(())
}

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
    require_child(decl, "body", &decl_loc)?;
    let body_scope = body_scope_id(decl, ScopeType::Class, file);

    let defining = ctx.scope_for(&cap.location);
    builder.add_enum(EnumDef {
        symbol_id: symbol_id::definition_id("enum", &decl_loc),
        name: cap.text.clone(),
        location: decl_loc,
        defining_scope_id: defining.clone(),
        members: vec![],
        is_const: false,
        is_exported: is_pub(decl) && ctx.is_root(&defining),
        body_scope_id: body_scope,
    });
    Ok(())
}

fn handle_enum_member(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(enum_decl) = find_ancestor(cap.node, &["enum_item"]) else {
        return Ok(());
    };
    let enum_id = symbol_id::definition_id(
        "enum",
        &Location::from_node(enum_decl, ctx.file_path()),
    );
    let value = cap
        .node
        .parent()
        .and_then(|variant| child_text(variant, "value", ctx.source));
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

fn handle_trait(
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
    let body_scope = body_scope_id(decl, ScopeType::Class, file);

    // Supertraits: `trait T: A + B`
    let mut extends = Vec::new();
    if let Some(bounds) = child_of_kind(decl, "trait_bounds") {
        let mut cursor = bounds.walk();
        for bound in bounds.named_children(&mut cursor) {
            extends.push(CompactString::new(node_text(bound, ctx.source)));
        }
    }

    let defining = ctx.scope_for(&cap.location);
    builder.add_interface(InterfaceDef {
        symbol_id: symbol_id::definition_id("interface", &decl_loc),
        name: cap.text.clone(),
        location: decl_loc,
        defining_scope_id: defining.clone(),
        extends,
        generics: child_text(decl, "type_parameters", ctx.source),
        methods: vec![],
        properties: vec![],
        is_exported: is_pub(decl) && ctx.is_root(&defining),
        body_scope_id: body_scope,
    });
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
    let Some(struct_decl) = find_ancestor(decl, &["struct_item"]) else {
        return Ok(());
    };
    let class_id = symbol_id::definition_id(
        "class",
        &Location::from_node(struct_decl, ctx.file_path()),
    );
    builder.add_property_to_class(
        &class_id,
        PropertyDef {
            symbol_id: symbol_id::definition_id("property", &cap.location),
            name: cap.text.clone(),
            location: cap.location.clone(),
            defining_scope_id: ctx.scope_for(&cap.location),
            type_annotation: child_text(decl, "type", ctx.source),
            initial_value: None,
            optional: false,
            access_modifier: Some(if is_pub(decl) {
                AccessModifier::Public
            } else {
                AccessModifier::Private
            }),
            flags: MemberFlags::empty(),
            decorators: vec![],
        },
    );
    Ok(())
}

// =============================================================================
// FUNCTIONS & METHODS
// =============================================================================

fn build_method(
    cap: &CaptureNode<'_>,
    decl: Node<'_>,
    ctx: &HandlerContext<'_>,
    docstring: Option<String>,
    signature_only: bool,
) -> MethodDef {
    let file = ctx.file_path();
    let decl_loc = Location::from_node(decl, file);
    let (symbol_id, body_scope) = callable_ids(decl, ctx.source, file);

    let mut flags = MemberFlags::empty();
    if has_modifier(decl, "async") {
        flags |= MemberFlags::ASYNC;
    }
    let return_type = decl
        .child_by_field_name("return_type")
        .map(|t| annotation_text(t, ctx.source));

    MethodDef {
        symbol_id,
        name: cap.text.clone(),
        location: decl_loc,
        defining_scope_id: ctx.scope_for(&cap.location),
        signature: FunctionSignature {
            parameters: vec![],
            return_type,
        },
        generics: child_text(decl, "type_parameters", ctx.source),
        kind: MethodKind::Regular,
        access_modifier: Some(if is_pub(decl) {
            AccessModifier::Public
        } else {
            AccessModifier::Private
        }),
        flags,
        decorators: vec![],
        body_scope_id: if signature_only { None } else { body_scope },
        docstring,
    }
}

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

    if let Some(impl_node) = find_ancestor(decl, &["impl_item"]) {
        let docstring = builder.consume_documentation(&decl_loc);
        let method = build_method(cap, decl, ctx, docstring, false);
        let Some(type_name) = impl_type_name(impl_node, ctx.source) else {
            return Ok(());
        };
        let Some(class_id) = builder.find_class_by_name(type_name) else {
            tracing::debug!(target_type = type_name, method = %cap.text, "impl method for untracked type dropped");
            return Ok(());
        };
        if cap.text == "new" {
            builder.add_constructor_to_class(&class_id, method);
        } else {
            builder.add_method_to_class(&class_id, method);
        }
        return Ok(());
    }

    if let Some(trait_node) = find_ancestor(decl, &["trait_item"]) {
        // Default-bodied trait method: recorded as an interface signature
        let trait_name = trait_node
            .child_by_field_name("name")
            .map(|n| node_text(n, ctx.source))
            .unwrap_or_default();
        if let Some(interface_id) = builder.find_interface_by_name(trait_name) {
            let docstring = builder.consume_documentation(&decl_loc);
            let signature = build_method(cap, decl, ctx, docstring, true);
            builder.add_method_signature_to_interface(&interface_id, signature);
        }
        return Ok(());
    }

    let (symbol_id, body_scope) = callable_ids(decl, ctx.source, file);
    let defining = ctx.scope_for(&cap.location);
    let docstring = builder.consume_documentation(&decl_loc);
    builder.add_function(FunctionDef {
        symbol_id,
        name: cap.text.clone(),
        location: decl_loc,
        defining_scope_id: defining.clone(),
        signature: FunctionSignature {
            parameters: vec![],
            return_type: decl
                .child_by_field_name("return_type")
                .map(|t| annotation_text(t, ctx.source)),
        },
        generics: child_text(decl, "type_parameters", ctx.source),
        is_exported: is_pub(decl) && ctx.is_root(&defining),
        export: None,
        is_async: has_modifier(decl, "async"),
        body_scope_id: body_scope,
        docstring,
        callback_context: None,
    });
    Ok(())
}

fn handle_method_signature(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(decl) = cap.node.parent() else {
        return Ok(());
    };
    let Some(trait_node) = find_ancestor(decl, &["trait_item"]) else {
        return Ok(());
    };
    let trait_name = trait_node
        .child_by_field_name("name")
        .map(|n| node_text(n, ctx.source))
        .unwrap_or_default();
    let Some(interface_id) = builder.find_interface_by_name(trait_name) else {
        return Ok(());
    };
    let docstring = builder.consume_documentation(&Location::from_node(decl, ctx.file_path()));
    let signature = build_method(cap, decl, ctx, docstring, true);
    builder.add_method_signature_to_interface(&interface_id, signature);
    Ok(())
}

fn handle_closure(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let file = ctx.file_path();
    let (symbol_id, body_scope) = callable_ids(cap.node, ctx.source, file);
    let (callback_context, callee_root) = callback_context_for(cap.node, ctx.source, file);

    let defining = match &body_scope {
        Some(own) => ctx.scope_above(own, &cap.location),
        None => ctx.scope_for(&cap.location),
    };

    builder.add_anonymous_function(
        FunctionDef {
            symbol_id,
            name: CompactString::new("<closure>"),
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

fn handle_parameter(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(callable) = find_ancestor(cap.node, CALLABLE_KINDS) else {
        return Ok(());
    };
    let (parent_id, body_scope) = callable_ids(callable, ctx.source, ctx.file_path());
    let type_annotation = cap
        .node
        .parent()
        .and_then(|p| p.child_by_field_name("type"))
        .map(|t| CompactString::new(node_text(t, ctx.source)));

    builder.add_parameter_to_callable(
        &parent_id,
        ParameterDef {
            symbol_id: symbol_id::definition_id("parameter", &cap.location),
            name: cap.text.clone(),
            location: cap.location.clone(),
            defining_scope_id: body_scope.unwrap_or_else(|| ctx.scope_for(&cap.location)),
            type_annotation,
            default_value: None,
            optional: false,
            is_rest: false,
        },
    );
    Ok(())
}

/// `self` parameters take the enclosing struct or trait name as their type
fn handle_self_parameter(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(callable) = find_ancestor(cap.node, CALLABLE_KINDS) else {
        return Ok(());
    };
    let (parent_id, body_scope) = callable_ids(callable, ctx.source, ctx.file_path());

    let self_type = match find_ancestor(cap.node, &["impl_item", "trait_item"]) {
        Some(owner) if owner.kind() == "impl_item" => {
            impl_type_name(owner, ctx.source).map(CompactString::new)
        }
        Some(owner) => owner
            .child_by_field_name("name")
            .map(|n| CompactString::new(node_text(n, ctx.source))),
        None => None,
    };

    builder.add_parameter_to_callable(
        &parent_id,
        ParameterDef {
            symbol_id: symbol_id::definition_id("parameter", &cap.location),
            name: CompactString::new("self"),
            location: cap.location.clone(),
            defining_scope_id: body_scope.unwrap_or_else(|| ctx.scope_for(&cap.location)),
            type_annotation: self_type,
            default_value: None,
            optional: false,
            is_rest: false,
        },
    );
    Ok(())
}

// =============================================================================
// VARIABLES, ALIASES, MODULES
// =============================================================================

fn handle_let(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(decl) = cap.node.parent() else {
        return Ok(());
    };
    let defining = ctx.scope_for(&cap.location);
    if builder.variable_exists(&cap.text, &defining) {
        return Ok(());
    }

    let value = decl.child_by_field_name("value");
    let mut variable = VariableDef {
        symbol_id: symbol_id::definition_id("variable", &cap.location),
        name: cap.text.clone(),
        location: cap.location.clone(),
        defining_scope_id: defining,
        kind: VariableKind::Variable,
        type_annotation: child_text(decl, "type", ctx.source),
        initial_value: value.map(|v| CompactString::new(node_text(v, ctx.source))),
        is_exported: false,
        export: None,
        function_collection: None,
        derived_from: None,
        initialized_from_call: None,
        collection_source: None,
    };

    let mut alias = None;
    if let Some(v) = value {
        match v.kind() {
            "call_expression" => {
                variable.initialized_from_call = v
                    .child_by_field_name("function")
                    .map(|f| CompactString::new(node_text(f, ctx.source)));
            }
            "index_expression" => {
                variable.derived_from = v
                    .named_child(0)
                    .filter(|root| root.kind() == "identifier")
                    .map(|root| CompactString::new(node_text(root, ctx.source)));
            }
            "identifier" => alias = Some(CompactString::new(node_text(v, ctx.source))),
            "array_expression" | "tuple_expression" => {
                let collection_type = if v.kind() == "array_expression" {
                    crate::index::types::CollectionType::Array
                } else {
                    crate::index::types::CollectionType::Tuple
                };
                let mut stored = Vec::new();
                let mut cursor = v.walk();
                for element in v.named_children(&mut cursor) {
                    if element.kind() == "identifier" {
                        stored.push(CompactString::new(node_text(element, ctx.source)));
                    }
                }
                if !stored.is_empty() {
                    variable.function_collection =
                        Some(crate::index::types::FunctionCollection {
                            collection_type,
                            stored_references: stored,
                            collection_id: variable.symbol_id.clone(),
                        });
                }
            }
            _ => {}
        }
    }

    let variable_id = variable.symbol_id.clone();
    builder.add_variable(variable);
    if let Some(source_name) = alias {
        builder.note_variable_alias(variable_id, source_name);
    }
    Ok(())
}

fn handle_constant(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(decl) = cap.node.parent() else {
        return Ok(());
    };
    let defining = ctx.scope_for(&cap.location);
    builder.add_variable(VariableDef {
        symbol_id: symbol_id::definition_id("variable", &cap.location),
        name: cap.text.clone(),
        location: cap.location.clone(),
        defining_scope_id: defining.clone(),
        kind: VariableKind::Constant,
        type_annotation: child_text(decl, "type", ctx.source),
        initial_value: child_text(decl, "value", ctx.source),
        is_exported: is_pub(decl) && ctx.is_root(&defining),
        export: None,
        function_collection: None,
        derived_from: None,
        initialized_from_call: None,
        collection_source: None,
    });
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
    builder.add_type_alias(TypeAliasDef {
        symbol_id: symbol_id::definition_id("type_alias", &decl_loc),
        name: cap.text.clone(),
        location: decl_loc,
        defining_scope_id: defining.clone(),
        type_expression: child_text(decl, "type", ctx.source),
        generics: child_text(decl, "type_parameters", ctx.source),
        is_exported: is_pub(decl) && ctx.is_root(&defining),
    });
    Ok(())
}

fn handle_module(
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
    builder.add_namespace(NamespaceDef {
        symbol_id: symbol_id::definition_id("namespace", &decl_loc),
        name: cap.text.clone(),
        location: decl_loc,
        defining_scope_id: defining.clone(),
        is_exported: is_pub(decl) && ctx.is_root(&defining),
        body_scope_id: body_scope_id(decl, ScopeType::Module, file),
    });
    Ok(())
}

// =============================================================================
// IMPORTS
// =============================================================================

fn handle_use(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let Some(argument) = cap.node.child_by_field_name("argument") else {
        return Ok(());
    };
    let exported = is_pub(cap.node);
    flatten_use(argument, "", exported, builder, ctx);
    Ok(())
}

/// One import per leaf of the use tree; wildcards become namespace imports
fn flatten_use(
    node: Node<'_>,
    prefix: &str,
    exported: bool,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) {
    let join = |prefix: &str, rest: &str| -> CompactString {
        if prefix.is_empty() {
            CompactString::new(rest)
        } else {
            CompactString::new(format!("{prefix}::{rest}"))
        }
    };

    match node.kind() {
        "identifier" | "crate" | "super" | "self" | "scoped_identifier" => {
            let full = join(prefix, node_text(node, ctx.source));
            let name = full.rsplit("::").next().unwrap_or(&full).to_string();
            add_use_import(node, name.into(), full, ImportKind::Named, None, exported, builder, ctx);
        }
        "use_as_clause" => {
            let Some(path) = node.child_by_field_name("path") else {
                return;
            };
            let Some(alias) = node.child_by_field_name("alias") else {
                return;
            };
            let full = join(prefix, node_text(path, ctx.source));
            let original = full.rsplit("::").next().unwrap_or(&full).to_string();
            add_use_import(
                alias,
                CompactString::new(node_text(alias, ctx.source)),
                full,
                ImportKind::Named,
                Some(original.into()),
                exported,
                builder,
                ctx,
            );
        }
        "use_wildcard" => {
            let path = node
                .named_child(0)
                .map(|p| join(prefix, node_text(p, ctx.source)))
                .unwrap_or_else(|| CompactString::new(prefix));
            add_use_import(
                node,
                CompactString::new("*"),
                path,
                ImportKind::Namespace,
                None,
                exported,
                builder,
                ctx,
            );
        }
        "scoped_use_list" => {
            let new_prefix = node
                .child_by_field_name("path")
                .map(|p| join(prefix, node_text(p, ctx.source)))
                .unwrap_or_else(|| CompactString::new(prefix));
            if let Some(list) = node.child_by_field_name("list") {
                flatten_use(list, &new_prefix, exported, builder, ctx);
            }
        }
        "use_list" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                flatten_use(child, prefix, exported, builder, ctx);
            }
        }
        _ => {}
    }
}

#[allow(clippy::too_many_arguments)]
fn add_use_import(
    node: Node<'_>,
    name: CompactString,
    path: CompactString,
    kind: ImportKind,
    original: Option<CompactString>,
    exported: bool,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) {
    let location = Location::from_node(node, ctx.file_path());
    let defining = ctx.scope_for(&location);
    builder.add_import(ImportDef {
        symbol_id: symbol_id::import_id(&location, &name),
        name,
        location,
        defining_scope_id: defining.clone(),
        import_path: path,
        import_kind: kind,
        original_name: original,
        is_exported: exported && ctx.is_root(&defining),
        export: None,
    });
}

fn handle_extern_crate(
    cap: &CaptureNode<'_>,
    builder: &mut DefinitionBuilder,
    ctx: &HandlerContext<'_>,
) -> Result<()> {
    let decl = cap.node;
    let Some(name_node) = decl.child_by_field_name("name") else {
        return Ok(());
    };
    let crate_name = CompactString::new(node_text(name_node, ctx.source));
    let alias = decl
        .child_by_field_name("alias")
        .map(|a| CompactString::new(node_text(a, ctx.source)));

    let (bound, original) = match alias {
        Some(alias) => (alias, Some(crate_name.clone())),
        None => (crate_name.clone(), None),
    };
    let location = Location::from_node(name_node, ctx.file_path());
    let defining = ctx.scope_for(&location);
    builder.add_import(ImportDef {
        symbol_id: symbol_id::import_id(&location, &bound),
        name: bound,
        location,
        defining_scope_id: defining.clone(),
        import_path: crate_name,
        import_kind: ImportKind::Namespace,
        original_name: original,
        is_exported: is_pub(decl) && ctx.is_root(&defining),
        export: None,
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
    if cap.text.starts_with("///") || cap.text.starts_with("//!") {
        builder.store_documentation(cap.text.to_string(), cap.location.clone());
    }
    Ok(())
}
