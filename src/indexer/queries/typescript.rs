use super::QuerySources;
use crate::index::DefinitionKind;

const FUNCTION: &str = r#"
(function_declaration
  name: (identifier) @name
  parameters: (formal_parameters) @parameters
  return_type: (type_annotation)? @returnType) @function
"#;

const FUNCTION_VALUE: &str = r#"
(lexical_declaration
  (variable_declarator
    name: (identifier) @name
    value: [
      (arrow_function
        parameters: (formal_parameters) @parameters
        return_type: (type_annotation)? @returnType)
      (function_expression
        parameters: (formal_parameters) @parameters
        return_type: (type_annotation)? @returnType)
    ])) @function
"#;

const METHOD: &str = r#"
(method_definition
  (accessibility_modifier)? @modifier
  name: (property_identifier) @name
  parameters: (formal_parameters) @parameters
  return_type: (type_annotation)? @returnType) @method

(method_signature
  name: (property_identifier) @name
  parameters: (formal_parameters) @parameters
  return_type: (type_annotation)? @returnType) @method
"#;

const CLASS: &str = r#"
(class_declaration
  name: (type_identifier) @name) @class

(abstract_class_declaration
  name: (type_identifier) @name) @class
"#;

const INTERFACE: &str = r#"
(interface_declaration
  name: (type_identifier) @name) @interface
"#;

const NAMESPACE: &str = r#"
(internal_module
  name: (_) @name) @namespace
"#;

const ENUM: &str = r#"
(enum_declaration
  name: (identifier) @name) @enum
"#;

const ENUM_MEMBER: &str = r#"
(enum_body
  name: (property_identifier) @name @enumMember)

(enum_body
  (enum_assignment
    name: (property_identifier) @name
    value: (_) @value) @enumMember)
"#;

const PROPERTY: &str = r#"
(public_field_definition
  (accessibility_modifier)? @modifier
  name: (property_identifier) @name
  type: (type_annotation)? @dataType
  value: (_)? @value) @property

(property_signature
  name: (property_identifier) @name
  type: (type_annotation)? @dataType) @property
"#;

const VARIABLE: &str = r#"
(lexical_declaration
  (variable_declarator
    name: (identifier) @name
    type: (type_annotation)? @dataType
    value: (_)? @value)) @variable

(variable_declaration
  (variable_declarator
    name: (identifier) @name
    type: (type_annotation)? @dataType
    value: (_)? @value)) @variable
"#;

const PARAMETERS: &str = r#"
(formal_parameters
  (required_parameter
    pattern: (identifier) @param_name
    type: (type_annotation)? @param_type))

(formal_parameters
  (optional_parameter
    pattern: (identifier) @param_name
    type: (type_annotation)? @param_type))

(formal_parameters
  (required_parameter
    pattern: (rest_pattern (identifier) @param_name)
    type: (type_annotation)? @param_type))

(formal_parameters
  (required_parameter
    pattern: [(object_pattern) (array_pattern)] @param_name
    type: (type_annotation)? @param_type))

(formal_parameters
  (optional_parameter
    pattern: [(object_pattern) (array_pattern)] @param_name
    type: (type_annotation)? @param_type))
"#;

const CALLS: &str = r#"
(call_expression function: (identifier) @callee)
(call_expression function: (member_expression property: (property_identifier) @callee))
(new_expression constructor: (identifier) @callee)
"#;

pub const QUERIES: QuerySources = QuerySources {
    definitions: &[
        (DefinitionKind::Namespace, NAMESPACE),
        (DefinitionKind::Class, CLASS),
        (DefinitionKind::Interface, INTERFACE),
        (DefinitionKind::Enum, ENUM),
        (DefinitionKind::EnumMember, ENUM_MEMBER),
        (DefinitionKind::Function, FUNCTION),
        (DefinitionKind::Function, FUNCTION_VALUE),
        (DefinitionKind::Method, METHOD),
        (DefinitionKind::Property, PROPERTY),
        (DefinitionKind::Variable, VARIABLE),
    ],
    parameters: PARAMETERS,
    calls: CALLS,
};
