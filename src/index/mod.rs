// Definition catalog: the flat per-file store and its hierarchy

pub mod hierarchy;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One cataloged structural element of a source file.
///
/// Definitions live in a flat per-file list. `parent_id` and `children` are
/// id links into that same list, kept consistent in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub id: usize,
    pub kind: DefinitionKind,
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    pub loc: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub calls: Vec<String>,
    pub complexity: u32,
    pub parameter_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<usize>,
    #[serde(default)]
    pub children: Vec<usize>,
}

/// A single parameter of a callable definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, param_type: Option<String>) -> Self {
        Self {
            name: name.into(),
            param_type,
        }
    }
}

/// Definition kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DefinitionKind {
    Function,
    Method,
    Class,
    Interface,
    Namespace,
    Enum,
    EnumMember,
    Variable,
    Property,
    Error,
    Metadata,
}

impl DefinitionKind {
    /// Kinds produced by pattern queries, in extraction order
    pub const EXTRACTABLE: [DefinitionKind; 9] = [
        DefinitionKind::Namespace,
        DefinitionKind::Class,
        DefinitionKind::Interface,
        DefinitionKind::Enum,
        DefinitionKind::EnumMember,
        DefinitionKind::Function,
        DefinitionKind::Method,
        DefinitionKind::Property,
        DefinitionKind::Variable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DefinitionKind::Function => "function",
            DefinitionKind::Method => "method",
            DefinitionKind::Class => "class",
            DefinitionKind::Interface => "interface",
            DefinitionKind::Namespace => "namespace",
            DefinitionKind::Enum => "enum",
            DefinitionKind::EnumMember => "enumMember",
            DefinitionKind::Variable => "variable",
            DefinitionKind::Property => "property",
            DefinitionKind::Error => "error",
            DefinitionKind::Metadata => "metadata",
        }
    }

    /// Functions and methods get parameters, metrics and calls
    pub fn is_callable(&self) -> bool {
        matches!(self, DefinitionKind::Function | DefinitionKind::Method)
    }

    /// Kinds that may be the parent of another definition
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            DefinitionKind::Class
                | DefinitionKind::Namespace
                | DefinitionKind::Interface
                | DefinitionKind::Enum
                | DefinitionKind::Method
                | DefinitionKind::Function
        )
    }

    /// Synthetic entries that bypass hierarchy and filtering
    pub fn is_passthrough(&self) -> bool {
        matches!(self, DefinitionKind::Error | DefinitionKind::Metadata)
    }

    /// Tie-breaker between definitions sharing a line span: the lower rank
    /// is treated as the outer one.
    pub fn nesting_rank(&self) -> u8 {
        match self {
            DefinitionKind::Namespace => 0,
            DefinitionKind::Class => 1,
            DefinitionKind::Interface => 2,
            DefinitionKind::Enum => 3,
            DefinitionKind::Function => 4,
            DefinitionKind::Method => 5,
            DefinitionKind::EnumMember => 6,
            DefinitionKind::Property => 7,
            DefinitionKind::Variable => 8,
            DefinitionKind::Error | DefinitionKind::Metadata => 9,
        }
    }
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DefinitionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.to_ascii_lowercase().as_str() {
            "function" => DefinitionKind::Function,
            "method" => DefinitionKind::Method,
            "class" => DefinitionKind::Class,
            "interface" => DefinitionKind::Interface,
            "namespace" => DefinitionKind::Namespace,
            "enum" => DefinitionKind::Enum,
            "enummember" => DefinitionKind::EnumMember,
            "variable" => DefinitionKind::Variable,
            "property" => DefinitionKind::Property,
            "error" => DefinitionKind::Error,
            "metadata" => DefinitionKind::Metadata,
            _ => return Err(format!("Unknown definition kind: {}", s)),
        };
        Ok(kind)
    }
}

impl Definition {
    /// Create a definition spanning `start_line..=end_line` with default metrics
    pub fn new(
        id: usize,
        kind: DefinitionKind,
        name: impl Into<String>,
        start_line: usize,
        end_line: usize,
    ) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            start_line,
            end_line,
            loc: end_line.saturating_sub(start_line) + 1,
            modifier: None,
            data_type: None,
            value: None,
            return_type: None,
            parameters: Vec::new(),
            calls: Vec::new(),
            complexity: 1,
            parameter_count: 0,
            parent_id: None,
            children: Vec::new(),
        }
    }

    /// Synthetic entry describing why a file produced no catalog
    pub fn error(id: usize, message: impl Into<String>) -> Self {
        Self::synthetic(id, DefinitionKind::Error, message)
    }

    /// Synthetic informational entry attached to a file's catalog
    pub fn metadata(id: usize, message: impl Into<String>) -> Self {
        Self::synthetic(id, DefinitionKind::Metadata, message)
    }

    fn synthetic(id: usize, kind: DefinitionKind, message: impl Into<String>) -> Self {
        Self {
            loc: 0,
            ..Self::new(id, kind, message, 0, 0)
        }
    }

    /// Space-delimited modifier tokens ("public static" -> ["public", "static"])
    pub fn modifier_tokens(&self) -> impl Iterator<Item = &str> {
        self.modifier.as_deref().unwrap_or("").split_whitespace()
    }

    /// True when `self` spans at least the lines of `other`
    pub fn contains_span(&self, other: &Definition) -> bool {
        self.start_line <= other.start_line && other.end_line <= self.end_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loc_is_inclusive() {
        let def = Definition::new(1, DefinitionKind::Function, "f", 3, 7);
        assert_eq!(def.loc, 5);
        assert_eq!(def.complexity, 1);
        assert_eq!(def.parameter_count, 0);
    }

    #[test]
    fn test_error_definition_has_zero_range() {
        let def = Definition::error(1, "Unsupported file type: .txt");
        assert_eq!(def.kind, DefinitionKind::Error);
        assert_eq!((def.start_line, def.end_line, def.loc), (0, 0, 0));
        assert!(def.kind.is_passthrough());
    }

    #[test]
    fn test_kind_round_trip_names() {
        for kind in DefinitionKind::EXTRACTABLE {
            assert_eq!(kind.as_str().parse::<DefinitionKind>().unwrap(), kind);
        }
        assert_eq!("enumMember".parse::<DefinitionKind>().unwrap(), DefinitionKind::EnumMember);
        assert!("struct".parse::<DefinitionKind>().is_err());
    }

    #[test]
    fn test_kind_serializes_camel_case() {
        let json = serde_json::to_string(&DefinitionKind::EnumMember).unwrap();
        assert_eq!(json, "\"enumMember\"");
    }

    #[test]
    fn test_modifier_tokens() {
        let mut def = Definition::new(1, DefinitionKind::Method, "run", 1, 2);
        def.modifier = Some("public  static".to_string());
        assert_eq!(def.modifier_tokens().collect::<Vec<_>>(), vec!["public", "static"]);
    }
}
