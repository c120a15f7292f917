use super::QuerySources;
use crate::index::DefinitionKind;

const FUNCTION: &str = r#"
(module
  (function_definition
    name: (identifier) @name
    parameters: (parameters) @parameters
    return_type: (_)? @returnType) @function)

(module
  (decorated_definition
    definition: (function_definition
      name: (identifier) @name
      parameters: (parameters) @parameters
      return_type: (_)? @returnType)) @function)

(function_definition
  body: (block
    (function_definition
      name: (identifier) @name
      parameters: (parameters) @parameters
      return_type: (_)? @returnType) @function))
"#;

const METHOD: &str = r#"
(class_definition
  body: (block
    (function_definition
      name: (identifier) @name
      parameters: (parameters) @parameters
      return_type: (_)? @returnType) @method))

(class_definition
  body: (block
    (decorated_definition
      definition: (function_definition
        name: (identifier) @name
        parameters: (parameters) @parameters
        return_type: (_)? @returnType)) @method))
"#;

const CLASS: &str = r#"
(class_definition
  name: (identifier) @name) @class
"#;

const PROPERTY: &str = r#"
(class_definition
  body: (block
    (expression_statement
      (assignment
        left: (identifier) @name
        type: (_)? @dataType
        right: (_)? @value)) @property))
"#;

const VARIABLE: &str = r#"
(module
  (expression_statement
    (assignment
      left: (identifier) @name
      type: (_)? @dataType
      right: (_)? @value)) @variable)
"#;

const PARAMETERS: &str = r#"
(parameters (identifier) @param_name)
(parameters (typed_parameter (identifier) @param_name type: (type) @param_type))
(parameters (default_parameter name: (identifier) @param_name))
(parameters (typed_default_parameter name: (identifier) @param_name type: (type) @param_type))
(parameters (list_splat_pattern (identifier) @param_name))
(parameters (dictionary_splat_pattern (identifier) @param_name))
"#;

const CALLS: &str = r#"
(call function: (identifier) @callee)
(call function: (attribute attribute: (identifier) @callee))
"#;

pub const QUERIES: QuerySources = QuerySources {
    definitions: &[
        (DefinitionKind::Class, CLASS),
        (DefinitionKind::Function, FUNCTION),
        (DefinitionKind::Method, METHOD),
        (DefinitionKind::Property, PROPERTY),
        (DefinitionKind::Variable, VARIABLE),
    ],
    parameters: PARAMETERS,
    calls: CALLS,
};
