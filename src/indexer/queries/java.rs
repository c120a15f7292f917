use super::QuerySources;
use crate::index::DefinitionKind;

const METHOD: &str = r#"
(method_declaration
  (modifiers)? @modifier
  type: (_) @returnType
  name: (identifier) @name
  parameters: (formal_parameters) @parameters) @method

(constructor_declaration
  (modifiers)? @modifier
  name: (identifier) @name
  parameters: (formal_parameters) @parameters) @method
"#;

const CLASS: &str = r#"
(class_declaration
  (modifiers)? @modifier
  name: (identifier) @name) @class
"#;

const INTERFACE: &str = r#"
(interface_declaration
  (modifiers)? @modifier
  name: (identifier) @name) @interface
"#;

const ENUM: &str = r#"
(enum_declaration
  (modifiers)? @modifier
  name: (identifier) @name) @enum
"#;

const ENUM_MEMBER: &str = r#"
(enum_constant
  name: (identifier) @name) @enumMember
"#;

const PROPERTY: &str = r#"
(field_declaration
  (modifiers)? @modifier
  type: (_) @dataType
  declarator: (variable_declarator
    name: (identifier) @name
    value: (_)? @value)) @property
"#;

const VARIABLE: &str = r#"
(local_variable_declaration
  type: (_) @dataType
  declarator: (variable_declarator
    name: (identifier) @name
    value: (_)? @value)) @variable
"#;

const PARAMETERS: &str = r#"
(formal_parameters
  (formal_parameter
    type: (_) @param_type
    name: (identifier) @param_name))

(formal_parameters
  (spread_parameter
    [
      (type_identifier)
      (scoped_type_identifier)
      (generic_type)
      (integral_type)
      (floating_point_type)
      (boolean_type)
      (array_type)
    ] @param_type
    (variable_declarator name: (identifier) @param_name)))
"#;

const CALLS: &str = r#"
(method_invocation name: (identifier) @callee)
(object_creation_expression type: (type_identifier) @callee)
"#;

pub const QUERIES: QuerySources = QuerySources {
    definitions: &[
        (DefinitionKind::Class, CLASS),
        (DefinitionKind::Interface, INTERFACE),
        (DefinitionKind::Enum, ENUM),
        (DefinitionKind::EnumMember, ENUM_MEMBER),
        (DefinitionKind::Method, METHOD),
        (DefinitionKind::Property, PROPERTY),
        (DefinitionKind::Variable, VARIABLE),
    ],
    parameters: PARAMETERS,
    calls: CALLS,
};
