use super::QuerySources;
use crate::index::DefinitionKind;

const FUNCTION: &str = r#"
(function_declaration
  name: (identifier) @name
  parameters: (formal_parameters) @parameters) @function

(generator_function_declaration
  name: (identifier) @name
  parameters: (formal_parameters) @parameters) @function
"#;

const FUNCTION_VALUE: &str = r#"
(lexical_declaration
  (variable_declarator
    name: (identifier) @name
    value: [
      (arrow_function parameters: (formal_parameters) @parameters)
      (function_expression parameters: (formal_parameters) @parameters)
    ])) @function
"#;

const METHOD: &str = r#"
(method_definition
  name: [(property_identifier) (private_property_identifier)] @name
  parameters: (formal_parameters) @parameters) @method
"#;

const CLASS: &str = r#"
(class_declaration
  name: (identifier) @name) @class
"#;

const PROPERTY: &str = r#"
(field_definition
  property: [(property_identifier) (private_property_identifier)] @name
  value: (_)? @value) @property
"#;

const VARIABLE: &str = r#"
(lexical_declaration
  (variable_declarator
    name: (identifier) @name
    value: (_)? @value)) @variable

(variable_declaration
  (variable_declarator
    name: (identifier) @name
    value: (_)? @value)) @variable
"#;

const PARAMETERS: &str = r#"
(formal_parameters (identifier) @param_name)
(formal_parameters (assignment_pattern left: (identifier) @param_name))
(formal_parameters (rest_pattern (identifier) @param_name))
(formal_parameters [(object_pattern) (array_pattern)] @param_name)
(formal_parameters (assignment_pattern left: [(object_pattern) (array_pattern)] @param_name))
"#;

const CALLS: &str = r#"
(call_expression function: (identifier) @callee)
(call_expression function: (member_expression property: (property_identifier) @callee))
(new_expression constructor: (identifier) @callee)
"#;

pub const QUERIES: QuerySources = QuerySources {
    definitions: &[
        (DefinitionKind::Class, CLASS),
        (DefinitionKind::Function, FUNCTION),
        (DefinitionKind::Function, FUNCTION_VALUE),
        (DefinitionKind::Method, METHOD),
        (DefinitionKind::Property, PROPERTY),
        (DefinitionKind::Variable, VARIABLE),
    ],
    parameters: PARAMETERS,
    calls: CALLS,
};
