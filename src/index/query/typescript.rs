//! TypeScript capture patterns
//!
//! Standalone superset of the JavaScript patterns: class names are
//! `type_identifier` here and parameters are wrapped in
//! `required_parameter` / `optional_parameter`, so the JavaScript file
//! cannot be reused verbatim. Name fields use `(_)` wildcards where the two
//! grammars disagree on the identifier kind.
//!
//! @module index/query/typescript

pub(crate) const SCOPES: &str = r#"
(function_declaration body: (statement_block) @scope.function)
(generator_function_declaration body: (statement_block) @scope.function)
(function_expression body: (statement_block) @scope.function)
(method_definition body: (statement_block) @scope.method)
(arrow_function) @scope.lambda
(class_declaration body: (class_body) @scope.class)
(abstract_class_declaration body: (class_body) @scope.class)
(class body: (class_body) @scope.class)
(interface_declaration body: (_) @scope.interface)
(enum_declaration body: (enum_body) @scope.enum)
(internal_module body: (statement_block) @scope.namespace)
(if_statement consequence: (statement_block) @scope.block)
(else_clause (statement_block) @scope.block)
(for_statement body: (statement_block) @scope.block)
(for_in_statement body: (statement_block) @scope.block)
(while_statement body: (statement_block) @scope.block)
(do_statement body: (statement_block) @scope.block)
(try_statement body: (statement_block) @scope.block)
(catch_clause body: (statement_block) @scope.block)
(finally_clause (statement_block) @scope.block)
"#;

pub(crate) const DEFINITIONS: &str = r#"
(function_declaration name: (identifier) @definition.function)
(generator_function_declaration name: (identifier) @definition.function)
(function_expression name: (identifier) @definition.function.expression)
(function_expression !name) @definition.function.anonymous
(arrow_function) @definition.function.anonymous
(method_definition name: (_) @definition.method)
(abstract_method_signature name: (_) @definition.method.abstract)
(class_declaration name: (_) @definition.class)
(abstract_class_declaration name: (_) @definition.class)
(public_field_definition name: (_) @definition.property)
(property_signature name: (_) @definition.interface.property)
(method_signature name: (_) @definition.interface.method)
(interface_declaration name: (_) @definition.interface)
(enum_declaration name: (_) @definition.enum)
(enum_body (property_identifier) @definition.enum.member)
(enum_assignment name: (property_identifier) @definition.enum.member)
(type_alias_declaration name: (_) @definition.type_alias)
(internal_module name: (_) @definition.namespace)
(variable_declarator name: (identifier) @definition.variable)
(variable_declarator name: (object_pattern) @definition.variable.destructured)
(variable_declarator name: (array_pattern) @definition.variable.destructured)
(required_parameter pattern: (identifier) @definition.parameter)
(optional_parameter pattern: (identifier) @definition.parameter)
(required_parameter pattern: (rest_pattern (identifier) @definition.parameter))
(arrow_function parameter: (identifier) @definition.parameter)
"#;

pub(crate) const IMPORTS: &str = r#"
(import_clause (identifier) @import.default)
(namespace_import (identifier) @import.namespace)
(import_specifier !alias name: (_) @import.named)
(import_specifier alias: (identifier) @import.named.alias)
(export_specifier name: (_) @import.reexport)
(export_statement (namespace_export (identifier) @import.reexport.namespace))
(export_statement "*" source: (string) @import.reexport.wildcard)
"#;

pub(crate) const REFERENCES: &str = r#"
(call_expression function: (identifier) @reference.call)
(call_expression function: (member_expression property: (property_identifier) @reference.method_call))
(new_expression constructor: (identifier) @reference.constructor)
(member_expression property: (property_identifier) @reference.property_access)
(assignment_expression left: (identifier) @reference.assignment)
(augmented_assignment_expression left: (identifier) @reference.assignment)
(assignment_expression right: (identifier) @reference.variable)
(arguments (identifier) @reference.variable)
(return_statement (identifier) @reference.variable)
(type_annotation) @reference.type
"#;

pub(crate) const DECORATORS: &str = r#"
(decorator) @decorator.any
"#;

pub(crate) const DOCUMENTATION: &str = r#"
(comment) @documentation.comment
"#;
