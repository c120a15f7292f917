// Pattern queries for the built-in languages
//
// Capture conventions:
// - `@name` plus an anchor named after the kind (`@function`, `@class`, ...)
//   produce one definition per match
// - `@modifier`, `@dataType`, `@value`, `@returnType` fill optional fields
// - `@parameters` marks the parameter block of callables
// - parameter queries bind `@param_name` and optionally `@param_type`
// - call queries bind `@callee`

pub mod go;
pub mod java;
pub mod javascript;
pub mod python;
pub mod rust;
pub mod typescript;

use crate::index::DefinitionKind;

/// Query sources for one language
pub struct QuerySources {
    pub definitions: &'static [(DefinitionKind, &'static str)],
    pub parameters: &'static str,
    pub calls: &'static str,
}
