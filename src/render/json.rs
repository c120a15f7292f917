// Nested JSON projection

use std::collections::BTreeMap;

use super::{build_forest, DefinitionView, DetailLevel, FileDefinitions};
use crate::error::Result;

/// `{ "<path>": [DefinitionView, ...] }`, pretty-printed
pub fn render(files: &FileDefinitions, detail: DetailLevel) -> Result<String> {
    let tree: BTreeMap<&str, Vec<DefinitionView<'_>>> = files
        .iter()
        .map(|(path, defs)| (path.as_str(), build_forest(defs, detail)))
        .collect();
    Ok(serde_json::to_string_pretty(&tree)?)
}
