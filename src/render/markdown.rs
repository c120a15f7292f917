// Nested Markdown bullet projection

use std::fmt::Write;

use super::{build_forest, DefinitionView, DetailLevel, FileDefinitions};

const MAX_VALUE_CHARS: usize = 50;

pub fn render(files: &FileDefinitions, detail: DetailLevel) -> String {
    let mut out = String::new();
    for (index, (path, defs)) in files.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "## File: {}", path);
        out.push('\n');

        let forest = build_forest(defs, detail);
        if forest.is_empty() {
            out.push_str("_No definitions found._\n");
            continue;
        }
        for view in &forest {
            write_view(&mut out, view, 0);
        }
    }
    out
}

fn write_view(out: &mut String, view: &DefinitionView, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{}- **{}**: `{}`", indent, view.kind, view.name);
    if let (Some(start), Some(end)) = (view.start_line, view.end_line) {
        let _ = write!(out, " (lines {}-{})", start, end);
    }
    if let Some(modifier) = view.modifier {
        let _ = write!(out, " [{}]", modifier);
    }
    out.push('\n');

    let detail_indent = "  ".repeat(depth + 1);
    if let Some(data_type) = view.data_type {
        let _ = writeln!(out, "{}- Type: `{}`", detail_indent, data_type);
    }
    if let Some(value) = view.value {
        let _ = writeln!(out, "{}- Value: `{}`", detail_indent, truncate(value));
    }
    if let Some(return_type) = view.return_type {
        let _ = writeln!(out, "{}- Returns: `{}`", detail_indent, return_type);
    }
    if let Some(parameters) = view.parameters {
        let list: Vec<String> = parameters
            .iter()
            .map(|p| match &p.param_type {
                Some(t) => format!("{}: {}", p.name, t),
                None => p.name.clone(),
            })
            .collect();
        let _ = writeln!(out, "{}- Parameters: `{}`", detail_indent, list.join(", "));
    }
    if let Some(calls) = view.calls {
        let _ = writeln!(out, "{}- Calls: {}", detail_indent, calls.join(", "));
    }
    if let Some(complexity) = view.complexity {
        let _ = writeln!(out, "{}- Complexity: {}", detail_indent, complexity);
    }

    for child in &view.children {
        write_view(out, child, depth + 1);
    }
}

/// Single-line value cut to `MAX_VALUE_CHARS` characters
fn truncate(value: &str) -> String {
    let flat = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > MAX_VALUE_CHARS {
        let head: String = flat.chars().take(MAX_VALUE_CHARS).collect();
        format!("{}...", head)
    } else {
        flat
    }
}
