// Tree-shaped XML projection

use std::fmt::Write;

use super::{build_forest, DefinitionView, DetailLevel, FileDefinitions};

pub fn render(files: &FileDefinitions, detail: DetailLevel) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<CodeStructure>\n");
    for (path, defs) in files {
        let forest = build_forest(defs, detail);
        if forest.is_empty() {
            let _ = writeln!(out, "  <File path=\"{}\"/>", escape(path));
            continue;
        }
        let _ = writeln!(out, "  <File path=\"{}\">", escape(path));
        for view in &forest {
            write_definition(&mut out, view, 2);
        }
        out.push_str("  </File>\n");
    }
    out.push_str("</CodeStructure>\n");
    out
}

fn write_definition(out: &mut String, view: &DefinitionView, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = write!(
        out,
        "{}<Definition type=\"{}\" name=\"{}\"",
        indent,
        view.kind,
        escape(view.name)
    );
    if let Some(start) = view.start_line {
        let _ = write!(out, " startLine=\"{}\"", start);
    }
    if let Some(end) = view.end_line {
        let _ = write!(out, " endLine=\"{}\"", end);
    }
    let text_attributes = [
        ("modifier", view.modifier),
        ("dataType", view.data_type),
        ("value", view.value),
        ("returnType", view.return_type),
    ];
    for (attribute, value) in text_attributes {
        if let Some(value) = value {
            let _ = write!(out, " {}=\"{}\"", attribute, escape(value));
        }
    }
    if let Some(complexity) = view.complexity {
        let _ = write!(out, " complexity=\"{}\"", complexity);
    }

    let has_body = view.parameters.is_some() || view.calls.is_some() || !view.children.is_empty();
    if !has_body {
        out.push_str("/>\n");
        return;
    }
    out.push_str(">\n");

    let inner = "  ".repeat(depth + 1);
    if let Some(parameters) = view.parameters {
        let _ = writeln!(out, "{}<Parameters>", inner);
        for parameter in parameters {
            let _ = write!(out, "{}  <Parameter name=\"{}\"", inner, escape(&parameter.name));
            if let Some(param_type) = &parameter.param_type {
                let _ = write!(out, " type=\"{}\"", escape(param_type));
            }
            out.push_str("/>\n");
        }
        let _ = writeln!(out, "{}</Parameters>", inner);
    }
    if let Some(calls) = view.calls {
        let _ = writeln!(out, "{}<Calls>", inner);
        for call in calls {
            let _ = writeln!(out, "{}  <Call name=\"{}\"/>", inner, escape(call));
        }
        let _ = writeln!(out, "{}</Calls>", inner);
    }
    for child in &view.children {
        write_definition(out, child, depth + 1);
    }

    let _ = writeln!(out, "{}</Definition>", indent);
}

/// Escape text for use inside a double-quoted attribute
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            c => escaped.push(c),
        }
    }
    escaped
}
