//! Reference & Metadata Extraction
//!
//! Turns REFERENCE-category captures into tagged `Reference` records:
//! calls with receiver locations and property chains, self-reference calls,
//! constructor calls with their assignment targets, property accesses with
//! full root-to-leaf chains, recursive type references, variable reads, and
//! assignments with their joint write records.
//!
//! @module index/refs

use compact_str::CompactString;
use smallvec::SmallVec;
use tracing::trace;
use tree_sitter::Node;

use crate::index::capture::{CaptureCategory, CaptureNode};
use crate::index::handlers::node_text;
use crate::index::scopes::ProcessingContext;
use crate::index::types::{
    AccessType, Language, Location, PropertyChain, Reference, SelfKeyword, TypeCertainty,
    TypeInfo,
};

const MEMBER_KINDS: &[&str] = &["member_expression", "attribute", "field_expression"];
const CALL_KINDS: &[&str] = &["call_expression", "call", "new_expression"];

// =============================================================================
// EXTRACTION ENTRY POINT
// =============================================================================

/// Emit one reference (plus the joint write for assignments) per
/// REFERENCE capture, in capture order.
pub fn extract_references(
    captures: &[CaptureNode<'_>],
    ctx: &ProcessingContext,
    source: &str,
    language: Language,
) -> Vec<Reference> {
    let mut references = Vec::new();
    for cap in captures {
        if cap.category != CaptureCategory::Reference {
            continue;
        }
        match cap.name {
            "reference.call" => extract_call(cap, ctx, source, language, &mut references),
            "reference.call.scoped" => extract_scoped_call(cap, ctx, source, &mut references),
            "reference.method_call" => {
                extract_method_call(cap, ctx, source, language, &mut references)
            }
            "reference.constructor" => extract_constructor(cap, ctx, source, &mut references),
            "reference.property_access" => {
                extract_property_access(cap, ctx, source, &mut references)
            }
            "reference.variable" => references.push(Reference::VariableReference {
                name: cap.text.clone(),
                location: cap.location.clone(),
                enclosing_scope_id: ctx.get_scope_id(&cap.location),
                access_type: AccessType::Read,
            }),
            "reference.assignment" => {
                let enclosing = ctx.get_scope_id(&cap.location);
                references.push(Reference::Assignment {
                    name: cap.text.clone(),
                    location: cap.location.clone(),
                    enclosing_scope_id: enclosing.clone(),
                });
                references.push(Reference::VariableReference {
                    name: cap.text.clone(),
                    location: cap.location.clone(),
                    enclosing_scope_id: enclosing,
                    access_type: AccessType::Write,
                });
            }
            "reference.type" => extract_type_references(cap, ctx, source, language, &mut references),
            other => trace!(capture = other, "reference capture without extractor ignored"),
        }
    }
    references
}

// =============================================================================
// CALLS
// =============================================================================

fn extract_call(
    cap: &CaptureNode<'_>,
    ctx: &ProcessingContext,
    source: &str,
    language: Language,
    out: &mut Vec<Reference>,
) {
    let enclosing = ctx.get_scope_id(&cap.location);

    // Python spells construction as a plain call; a capitalized callee is
    // the conventional signal
    let looks_constructed = language == Language::Python
        && cap.text.chars().next().is_some_and(|c| c.is_ascii_uppercase());
    if looks_constructed {
        let call = cap.node.parent().filter(|p| CALL_KINDS.contains(&p.kind()));
        out.push(Reference::ConstructorCall {
            name: cap.text.clone(),
            location: cap.location.clone(),
            enclosing_scope_id: enclosing,
            construct_target: call
                .and_then(|c| construct_target(c, source))
                .map(|n| Location::from_node(n, &cap.location.file_path)),
        });
        return;
    }

    out.push(Reference::FunctionCall {
        name: cap.text.clone(),
        location: cap.location.clone(),
        enclosing_scope_id: enclosing,
    });
}

/// Rust `Type::assoc(...)` calls: `Type::new` is a constructor call
fn extract_scoped_call(
    cap: &CaptureNode<'_>,
    ctx: &ProcessingContext,
    source: &str,
    out: &mut Vec<Reference>,
) {
    let enclosing = ctx.get_scope_id(&cap.location);
    if cap.text == "new" {
        let type_name = cap
            .node
            .parent()
            .and_then(|scoped| scoped.child_by_field_name("path"))
            .map(|p| CompactString::new(node_text(p, source)));
        let call = cap
            .node
            .parent()
            .and_then(|scoped| scoped.parent())
            .filter(|p| CALL_KINDS.contains(&p.kind()));
        out.push(Reference::ConstructorCall {
            name: type_name.unwrap_or_else(|| cap.text.clone()),
            location: cap.location.clone(),
            enclosing_scope_id: enclosing,
            construct_target: call
                .and_then(|c| construct_target(c, source))
                .map(|n| Location::from_node(n, &cap.location.file_path)),
        });
        return;
    }
    out.push(Reference::FunctionCall {
        name: cap.text.clone(),
        location: cap.location.clone(),
        enclosing_scope_id: enclosing,
    });
}

fn extract_method_call(
    cap: &CaptureNode<'_>,
    ctx: &ProcessingContext,
    source: &str,
    language: Language,
    out: &mut Vec<Reference>,
) {
    let enclosing = ctx.get_scope_id(&cap.location);
    let Some(member) = cap.node.parent().filter(|p| MEMBER_KINDS.contains(&p.kind())) else {
        out.push(Reference::FunctionCall {
            name: cap.text.clone(),
            location: cap.location.clone(),
            enclosing_scope_id: enclosing,
        });
        return;
    };
    let file = cap.location.file_path.as_str();

    let receiver = receiver_of(member);
    let receiver_location = receiver.map(|r| Location::from_node(r, file));

    if let Some(keyword) = receiver.and_then(|r| self_keyword(r, source, language)) {
        out.push(Reference::SelfReferenceCall {
            name: cap.text.clone(),
            location: cap.location.clone(),
            enclosing_scope_id: enclosing,
            keyword,
            receiver_location,
        });
        return;
    }

    out.push(Reference::MethodCall {
        name: cap.text.clone(),
        location: cap.location.clone(),
        enclosing_scope_id: enclosing,
        receiver_location,
        optional_chaining: uses_optional_chain(member),
        property_chain: member_chain(member, source),
    });
}

fn extract_constructor(
    cap: &CaptureNode<'_>,
    ctx: &ProcessingContext,
    source: &str,
    out: &mut Vec<Reference>,
) {
    let construct_node = cap
        .node
        .parent()
        .filter(|p| p.kind() == "new_expression" || p.kind() == "struct_expression");
    out.push(Reference::ConstructorCall {
        name: cap.text.clone(),
        location: cap.location.clone(),
        enclosing_scope_id: ctx.get_scope_id(&cap.location),
        construct_target: construct_node
            .and_then(|c| construct_target(c, source))
            .map(|n| Location::from_node(n, &cap.location.file_path)),
    });
}

/// The LHS binding receiving a constructed value, scanning up through
/// declarators and assignments
fn construct_target<'t>(mut node: Node<'t>, _source: &str) -> Option<Node<'t>> {
    loop {
        let parent = node.parent()?;
        match parent.kind() {
            "parenthesized_expression" | "type_cast_expression" | "await_expression" => {
                node = parent;
            }
            "variable_declarator" | "let_declaration" => {
                return parent
                    .child_by_field_name("name")
                    .or_else(|| parent.child_by_field_name("pattern"));
            }
            "assignment_expression" | "assignment" | "augmented_assignment" => {
                return parent
                    .child_by_field_name("left")
                    .filter(|l| l.kind() == "identifier");
            }
            _ => return None,
        }
    }
}

// =============================================================================
// PROPERTY ACCESS
// =============================================================================

fn extract_property_access(
    cap: &CaptureNode<'_>,
    ctx: &ProcessingContext,
    source: &str,
    out: &mut Vec<Reference>,
) {
    let Some(member) = cap.node.parent().filter(|p| MEMBER_KINDS.contains(&p.kind())) else {
        return;
    };
    // The callee of a method call is already a method_call reference
    if is_call_function(member) {
        return;
    }
    // Inner links of a longer chain are subsumed by the outermost access
    if !is_outermost_member(member) {
        return;
    }
    let Some(chain) = member_chain(member, source) else {
        return;
    };
    out.push(Reference::PropertyAccess {
        name: cap.text.clone(),
        location: cap.location.clone(),
        enclosing_scope_id: ctx.get_scope_id(&cap.location),
        property_chain: chain,
    });
}

fn receiver_of<'t>(member: Node<'t>) -> Option<Node<'t>> {
    member
        .child_by_field_name("object")
        .or_else(|| member.child_by_field_name("value"))
}

fn is_call_function(member: Node<'_>) -> bool {
    member
        .parent()
        .filter(|p| CALL_KINDS.contains(&p.kind()))
        .and_then(|p| p.child_by_field_name("function"))
        .is_some_and(|f| f.id() == member.id())
}

fn is_outermost_member(member: Node<'_>) -> bool {
    match member.parent() {
        Some(parent) if MEMBER_KINDS.contains(&parent.kind()) => receiver_of(parent)
            .map(|object| object.id() != member.id())
            .unwrap_or(true),
        _ => true,
    }
}

/// Root-first identifier segments of a member chain; `None` when the chain
/// involves anything but plain identifiers (calls, subscripts, literals)
fn member_chain(member: Node<'_>, source: &str) -> Option<PropertyChain> {
    let mut reversed: SmallVec<[CompactString; 4]> = SmallVec::new();
    let property = member
        .child_by_field_name("property")
        .or_else(|| member.child_by_field_name("attribute"))
        .or_else(|| member.child_by_field_name("field"))?;
    reversed.push(CompactString::new(node_text(property, source)));

    let mut current = receiver_of(member)?;
    loop {
        match current.kind() {
            kind if MEMBER_KINDS.contains(&kind) => {
                let leaf = current
                    .child_by_field_name("property")
                    .or_else(|| current.child_by_field_name("attribute"))
                    .or_else(|| current.child_by_field_name("field"))?;
                reversed.push(CompactString::new(node_text(leaf, source)));
                current = receiver_of(current)?;
            }
            "identifier" | "this" | "self" => {
                reversed.push(CompactString::new(node_text(current, source)));
                break;
            }
            _ => return None,
        }
    }
    reversed.reverse();
    Some(reversed)
}

fn uses_optional_chain(member: Node<'_>) -> bool {
    let mut cursor = member.walk();
    let found = member
        .children(&mut cursor)
        .any(|child| child.kind() == "optional_chain");
    found
}

fn self_keyword(receiver: Node<'_>, source: &str, language: Language) -> Option<SelfKeyword> {
    match language {
        Language::JavaScript | Language::TypeScript => {
            (receiver.kind() == "this").then_some(SelfKeyword::This)
        }
        Language::Python => {
            if receiver.kind() != "identifier" {
                return None;
            }
            match node_text(receiver, source) {
                "self" => Some(SelfKeyword::SelfValue),
                "cls" => Some(SelfKeyword::Cls),
                _ => None,
            }
        }
        Language::Rust => (receiver.kind() == "self").then_some(SelfKeyword::SelfValue),
    }
}

// =============================================================================
// TYPE REFERENCES
// =============================================================================

fn extract_type_references(
    cap: &CaptureNode<'_>,
    ctx: &ProcessingContext,
    source: &str,
    language: Language,
    out: &mut Vec<Reference>,
) {
    let mut names: Vec<(CompactString, Location)> = Vec::new();
    collect_type_names(
        cap.node,
        source,
        language,
        &cap.location.file_path,
        &mut names,
    );
    for (name, location) in names {
        let enclosing = ctx.get_scope_id(&location);
        out.push(Reference::TypeReference {
            type_info: TypeInfo {
                type_name: name.clone(),
                certainty: TypeCertainty::Declared,
            },
            name,
            location,
            enclosing_scope_id: enclosing,
        });
    }
}

/// Every named type inside an annotation, generic arguments included
/// (`Dict[str, int]` yields `Dict`, `str`, `int`)
fn collect_type_names(
    node: Node<'_>,
    source: &str,
    language: Language,
    file_path: &str,
    out: &mut Vec<(CompactString, Location)>,
) {
    match node.kind() {
        "type_identifier" | "predefined_type" | "primitive_type" => {
            out.push((
                CompactString::new(node_text(node, source)),
                Location::from_node(node, file_path),
            ));
        }
        // Dotted type names are one reference, not one per segment
        "attribute" | "nested_type_identifier" | "scoped_type_identifier" => {
            out.push((
                CompactString::new(node_text(node, source)),
                Location::from_node(node, file_path),
            ));
        }
        "identifier" if language == Language::Python => {
            out.push((
                CompactString::new(node_text(node, source)),
                Location::from_node(node, file_path),
            ));
        }
        "string" => {} // forward references stay opaque
        _ => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                collect_type_names(child, source, language, file_path, out);
            }
        }
    }
}
