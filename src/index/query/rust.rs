//! Rust capture patterns
//!
//! `function_item` captures are routed by the handler: free function,
//! inherent/trait-impl method, `new` constructor, or trait default method.
//! `use` trees are captured whole and flattened into one import per leaf.
//!
//! @module index/query/rust

pub(crate) const SCOPES: &str = r#"
(function_item body: (block) @scope.function)
(impl_item body: (declaration_list) @scope.class)
(trait_item body: (declaration_list) @scope.interface)
(struct_item body: (field_declaration_list) @scope.class)
(enum_item body: (enum_variant_list) @scope.enum)
(mod_item body: (declaration_list) @scope.namespace)
(closure_expression) @scope.closure
(if_expression consequence: (block) @scope.block)
(else_clause (block) @scope.block)
(for_expression body: (block) @scope.block)
(while_expression body: (block) @scope.block)
(loop_expression body: (block) @scope.block)
(match_arm value: (block) @scope.block)
"#;

pub(crate) const DEFINITIONS: &str = r#"
(struct_item name: (type_identifier) @definition.class)
(enum_item name: (type_identifier) @definition.enum)
(enum_variant name: (identifier) @definition.enum.member)
(trait_item name: (type_identifier) @definition.interface)
(function_item name: (identifier) @definition.function)
(function_signature_item name: (identifier) @definition.method.signature)
(field_declaration name: (field_identifier) @definition.property)
(parameter pattern: (identifier) @definition.parameter)
(self_parameter) @definition.parameter.self
(closure_expression) @definition.function.anonymous
(let_declaration pattern: (identifier) @definition.variable)
(const_item name: (identifier) @definition.variable.constant)
(static_item name: (identifier) @definition.variable.constant)
(type_item name: (type_identifier) @definition.type_alias)
(mod_item name: (identifier) @definition.namespace)
"#;

pub(crate) const IMPORTS: &str = r#"
(use_declaration) @import.use
(extern_crate_declaration) @import.extern_crate
"#;

pub(crate) const REFERENCES: &str = r#"
(call_expression function: (identifier) @reference.call)
(call_expression function: (field_expression field: (field_identifier) @reference.method_call))
(call_expression function: (scoped_identifier name: (identifier) @reference.call.scoped))
(field_expression field: (field_identifier) @reference.property_access)
(struct_expression name: (type_identifier) @reference.constructor)
(assignment_expression left: (identifier) @reference.assignment)
(arguments (identifier) @reference.variable)
(let_declaration value: (identifier) @reference.variable)
(parameter type: (_) @reference.type)
(let_declaration type: (_) @reference.type)
(function_item return_type: (_) @reference.type)
(field_declaration type: (_) @reference.type)
"#;

pub(crate) const DOCUMENTATION: &str = r#"
(line_comment) @documentation.comment
"#;
