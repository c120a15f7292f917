use super::QuerySources;
use crate::index::DefinitionKind;

const FUNCTION: &str = r#"
(source_file
  (function_item
    (visibility_modifier)? @modifier
    (function_modifiers)? @modifier
    name: (identifier) @name
    parameters: (parameters) @parameters
    return_type: (_)? @returnType) @function)

(mod_item
  body: (declaration_list
    (function_item
      (visibility_modifier)? @modifier
      (function_modifiers)? @modifier
      name: (identifier) @name
      parameters: (parameters) @parameters
      return_type: (_)? @returnType) @function))
"#;

const METHOD: &str = r#"
(impl_item
  body: (declaration_list
    (function_item
      (visibility_modifier)? @modifier
      (function_modifiers)? @modifier
      name: (identifier) @name
      parameters: (parameters) @parameters
      return_type: (_)? @returnType) @method))

(trait_item
  body: (declaration_list
    (function_item
      (visibility_modifier)? @modifier
      (function_modifiers)? @modifier
      name: (identifier) @name
      parameters: (parameters) @parameters
      return_type: (_)? @returnType) @method))

(trait_item
  body: (declaration_list
    (function_signature_item
      (visibility_modifier)? @modifier
      name: (identifier) @name
      parameters: (parameters) @parameters
      return_type: (_)? @returnType) @method))
"#;

const CLASS: &str = r#"
(struct_item
  (visibility_modifier)? @modifier
  name: (type_identifier) @name) @class

(impl_item
  type: (_) @name) @class
"#;

const INTERFACE: &str = r#"
(trait_item
  (visibility_modifier)? @modifier
  name: (type_identifier) @name) @interface
"#;

const NAMESPACE: &str = r#"
(mod_item
  (visibility_modifier)? @modifier
  name: (identifier) @name) @namespace
"#;

const ENUM: &str = r#"
(enum_item
  (visibility_modifier)? @modifier
  name: (type_identifier) @name) @enum
"#;

const ENUM_MEMBER: &str = r#"
(enum_variant
  name: (identifier) @name
  value: (_)? @value) @enumMember
"#;

const PROPERTY: &str = r#"
(field_declaration
  (visibility_modifier)? @modifier
  name: (field_identifier) @name
  type: (_) @dataType) @property
"#;

const VARIABLE: &str = r#"
(const_item
  (visibility_modifier)? @modifier
  name: (identifier) @name
  type: (_) @dataType
  value: (_)? @value) @variable

(static_item
  (visibility_modifier)? @modifier
  name: (identifier) @name
  type: (_) @dataType
  value: (_)? @value) @variable

(let_declaration
  pattern: (identifier) @name
  type: (_)? @dataType
  value: (_)? @value) @variable
"#;

const PARAMETERS: &str = r#"
(parameters (self_parameter) @param_name)
(parameters (parameter pattern: _ @param_name type: (_) @param_type))
"#;

const CALLS: &str = r#"
(call_expression function: (identifier) @callee)
(call_expression function: (field_expression field: (field_identifier) @callee))
(call_expression function: (scoped_identifier name: (identifier) @callee))
"#;

pub const QUERIES: QuerySources = QuerySources {
    definitions: &[
        (DefinitionKind::Namespace, NAMESPACE),
        (DefinitionKind::Class, CLASS),
        (DefinitionKind::Interface, INTERFACE),
        (DefinitionKind::Enum, ENUM),
        (DefinitionKind::EnumMember, ENUM_MEMBER),
        (DefinitionKind::Function, FUNCTION),
        (DefinitionKind::Method, METHOD),
        (DefinitionKind::Property, PROPERTY),
        (DefinitionKind::Variable, VARIABLE),
    ],
    parameters: PARAMETERS,
    calls: CALLS,
};
