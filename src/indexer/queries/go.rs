use super::QuerySources;
use crate::index::DefinitionKind;

const FUNCTION: &str = r#"
(function_declaration
  name: (identifier) @name
  parameters: (parameter_list) @parameters
  result: (_)? @returnType) @function
"#;

const METHOD: &str = r#"
(method_declaration
  name: (field_identifier) @name
  parameters: (parameter_list) @parameters
  result: (_)? @returnType) @method
"#;

const CLASS: &str = r#"
(type_spec
  name: (type_identifier) @name
  type: (struct_type)) @class
"#;

const INTERFACE: &str = r#"
(type_spec
  name: (type_identifier) @name
  type: (interface_type)) @interface
"#;

const PROPERTY: &str = r#"
(field_declaration
  name: (field_identifier) @name
  type: (_) @dataType) @property
"#;

const VARIABLE: &str = r#"
(var_spec
  name: (identifier) @name
  type: (_)? @dataType
  value: (expression_list)? @value) @variable

(const_spec
  name: (identifier) @name
  type: (_)? @dataType
  value: (expression_list)? @value) @variable
"#;

const PARAMETERS: &str = r#"
(parameter_list
  (parameter_declaration
    name: (identifier) @param_name
    type: (_) @param_type))

(parameter_list
  (variadic_parameter_declaration
    name: (identifier) @param_name
    type: (_) @param_type))
"#;

const CALLS: &str = r#"
(call_expression function: (identifier) @callee)
(call_expression function: (selector_expression field: (field_identifier) @callee))
"#;

pub const QUERIES: QuerySources = QuerySources {
    definitions: &[
        (DefinitionKind::Class, CLASS),
        (DefinitionKind::Interface, INTERFACE),
        (DefinitionKind::Function, FUNCTION),
        (DefinitionKind::Method, METHOD),
        (DefinitionKind::Property, PROPERTY),
        (DefinitionKind::Variable, VARIABLE),
    ],
    parameters: PARAMETERS,
    calls: CALLS,
};
