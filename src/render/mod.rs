// Output projections of a scanned catalog

pub mod json;
pub mod markdown;
pub mod xml;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};
use crate::index::{Definition, DefinitionKind, Parameter};

/// Per-file definitions keyed by relative path
pub type FileDefinitions = BTreeMap<String, Vec<Definition>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Xml,
    #[default]
    Markdown,
    Json,
}

/// How much of each definition is shown. Each level adds fields to the
/// previous one.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Minimal,
    #[default]
    Standard,
    Detailed,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Xml => "xml",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
        }
    }
}

impl DetailLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailLevel::Minimal => "minimal",
            DetailLevel::Standard => "standard",
            DetailLevel::Detailed => "detailed",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(OutputFormat::Xml),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ScanError::InvalidArgument(format!("unknown output format: {}", s))),
        }
    }
}

impl FromStr for DetailLevel {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "minimal" => Ok(DetailLevel::Minimal),
            "standard" => Ok(DetailLevel::Standard),
            "detailed" => Ok(DetailLevel::Detailed),
            _ => Err(ScanError::InvalidArgument(format!("unknown detail level: {}", s))),
        }
    }
}

/// A definition pruned to one detail level, with its children nested.
///
/// All three renderers walk this same shape, so field visibility is decided
/// in one place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionView<'a> {
    #[serde(rename = "type")]
    pub kind: DefinitionKind,
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<&'a [Parameter]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calls: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DefinitionView<'a>>,
}

impl<'a> DefinitionView<'a> {
    /// Project a single definition, without children
    pub fn new(def: &'a Definition, detail: DetailLevel) -> Self {
        let mut view = Self {
            kind: def.kind,
            name: &def.name,
            start_line: None,
            end_line: None,
            modifier: None,
            data_type: None,
            value: None,
            return_type: None,
            parameters: None,
            calls: None,
            complexity: None,
            children: Vec::new(),
        };

        if detail >= DetailLevel::Standard && !def.kind.is_passthrough() {
            view.start_line = Some(def.start_line);
            view.end_line = Some(def.end_line);
            view.modifier = def.modifier.as_deref();
        }

        if detail >= DetailLevel::Detailed {
            view.data_type = def.data_type.as_deref();
            if !matches!(def.kind, DefinitionKind::Variable | DefinitionKind::Property) {
                view.value = def.value.as_deref();
            }
            view.return_type = def.return_type.as_deref();
            if !def.parameters.is_empty() {
                view.parameters = Some(&def.parameters);
            }
            if !def.calls.is_empty() {
                view.calls = Some(&def.calls);
            }
            if def.kind.is_callable() {
                view.complexity = Some(def.complexity);
            }
        }

        view
    }
}

/// Nest a flat definition list into a forest following `children`.
///
/// Roots are definitions without a (surviving) parent, in stored order.
pub fn build_forest(definitions: &[Definition], detail: DetailLevel) -> Vec<DefinitionView<'_>> {
    let by_id: HashMap<usize, &Definition> = definitions.iter().map(|d| (d.id, d)).collect();
    let mut visited = HashSet::new();

    definitions
        .iter()
        .filter(|d| d.parent_id.map_or(true, |pid| !by_id.contains_key(&pid)))
        .filter_map(|root| project(root, &by_id, detail, &mut visited))
        .collect()
}

fn project<'a>(
    def: &'a Definition,
    by_id: &HashMap<usize, &'a Definition>,
    detail: DetailLevel,
    visited: &mut HashSet<usize>,
) -> Option<DefinitionView<'a>> {
    if !visited.insert(def.id) {
        return None;
    }
    let mut view = DefinitionView::new(def, detail);
    view.children = def
        .children
        .iter()
        .filter_map(|child| by_id.get(child).copied())
        .filter_map(|child| project(child, by_id, detail, visited))
        .collect();
    Some(view)
}

/// Render the catalog of every file in the requested format
pub fn render(
    files: &FileDefinitions,
    format: OutputFormat,
    detail: DetailLevel,
) -> Result<String> {
    match format {
        OutputFormat::Xml => Ok(xml::render(files, detail)),
        OutputFormat::Markdown => Ok(markdown::render(files, detail)),
        OutputFormat::Json => json::render(files, detail),
    }
}
