//! Python capture patterns
//!
//! Function bodies are captured as `scope.function` and refined to
//! method/constructor scopes from their surroundings; `from`-imports are
//! captured as one statement node and unpacked by the handler.
//!
//! @module index/query/python

pub(crate) const SCOPES: &str = r#"
(function_definition body: (block) @scope.function)
(class_definition body: (block) @scope.class)
(lambda) @scope.lambda
(for_statement body: (block) @scope.block)
(while_statement body: (block) @scope.block)
(if_statement consequence: (block) @scope.block)
(elif_clause consequence: (block) @scope.block)
(else_clause body: (block) @scope.block)
(with_statement body: (block) @scope.block)
(try_statement body: (block) @scope.block)
(except_clause (block) @scope.block)
(finally_clause (block) @scope.block)
(list_comprehension) @scope.block
(set_comprehension) @scope.block
(dictionary_comprehension) @scope.block
(generator_expression) @scope.block
"#;

pub(crate) const DEFINITIONS: &str = r#"
(function_definition name: (identifier) @definition.function)
(class_definition name: (identifier) @definition.class)
(parameters (identifier) @definition.parameter)
(typed_parameter (identifier) @definition.parameter)
(default_parameter name: (identifier) @definition.parameter)
(typed_default_parameter name: (identifier) @definition.parameter)
(list_splat_pattern (identifier) @definition.parameter.splat)
(dictionary_splat_pattern (identifier) @definition.parameter.splat)
(lambda_parameters (identifier) @definition.parameter)
(lambda) @definition.function.anonymous
(assignment left: (identifier) @definition.variable)
(assignment left: (pattern_list (identifier) @definition.variable))
(assignment left: (tuple_pattern (identifier) @definition.variable))
(assignment left: (attribute attribute: (identifier) @definition.property.self))
(for_statement left: (identifier) @definition.variable.loop)
(for_statement left: (pattern_list (identifier) @definition.variable.loop))
(for_statement left: (tuple_pattern (identifier) @definition.variable.loop))
(for_in_clause left: (identifier) @definition.variable.loop)
(for_in_clause left: (tuple_pattern (identifier) @definition.variable.loop))
(as_pattern alias: (as_pattern_target) @definition.variable.loop)
(type_alias_statement) @definition.type_alias
"#;

pub(crate) const IMPORTS: &str = r#"
(import_statement name: (dotted_name) @import.module)
(import_statement name: (aliased_import) @import.module.alias)
(import_from_statement) @import.from
"#;

pub(crate) const REFERENCES: &str = r#"
(call function: (identifier) @reference.call)
(call function: (attribute attribute: (identifier) @reference.method_call))
(attribute attribute: (identifier) @reference.property_access)
(assignment left: (identifier) @reference.assignment)
(augmented_assignment left: (identifier) @reference.assignment)
(assignment right: (identifier) @reference.variable)
(argument_list (identifier) @reference.variable)
(keyword_argument value: (identifier) @reference.variable)
(return_statement (identifier) @reference.variable)
(typed_parameter type: (type) @reference.type)
(typed_default_parameter type: (type) @reference.type)
(function_definition return_type: (type) @reference.type)
(assignment type: (type) @reference.type)
"#;

pub(crate) const DECORATORS: &str = r#"
(decorator) @decorator.any
"#;
