//! JavaScript capture patterns
//!
//! @module index/query/javascript

/// Scope-creating constructs. Body nodes are captured directly so the
/// declaration name stays in the enclosing scope.
pub(crate) const SCOPES: &str = r#"
(function_declaration body: (statement_block) @scope.function)
(generator_function_declaration body: (statement_block) @scope.function)
(function_expression body: (statement_block) @scope.function)
(method_definition body: (statement_block) @scope.method)
(arrow_function) @scope.lambda
(class_declaration body: (class_body) @scope.class)
(class body: (class_body) @scope.class)
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
(method_definition name: (property_identifier) @definition.method)
(method_definition name: (private_property_identifier) @definition.method)
(class_declaration name: (identifier) @definition.class)
(field_definition property: (property_identifier) @definition.property)
(field_definition property: (private_property_identifier) @definition.property)
(variable_declarator name: (identifier) @definition.variable)
(variable_declarator name: (object_pattern) @definition.variable.destructured)
(variable_declarator name: (array_pattern) @definition.variable.destructured)
(formal_parameters (identifier) @definition.parameter)
(formal_parameters (assignment_pattern left: (identifier) @definition.parameter))
(formal_parameters (rest_pattern (identifier) @definition.parameter))
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
"#;

pub(crate) const DOCUMENTATION: &str = r#"
(comment) @documentation.comment
"#;
