// Callee names referenced inside a callable

use std::collections::HashSet;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, QueryCursor};

use super::languages::LanguageSpec;
use crate::error::{Result, ScanError};

/// Names called from within `node`, first-seen order, without duplicates.
///
/// Qualified callees are reduced to their last segment, so `self.save`,
/// `fmt::format` and `obj->run` become `save`, `format` and `run`.
pub fn extract_calls(spec: &LanguageSpec, node: Node, source: &str) -> Result<Vec<String>> {
    let Some(query) = &spec.calls else {
        return Ok(Vec::new());
    };
    let callee = query
        .capture_index_for_name("callee")
        .ok_or_else(|| ScanError::QueryExecutionFailure {
            query: format!("{} calls", spec.name),
            reason: "query has no @callee capture".to_string(),
        })?;

    let mut seen = HashSet::new();
    let mut calls = Vec::new();
    let mut cursor = QueryCursor::new();
    {
        let mut matches = cursor.matches(query, node, source.as_bytes());
        while let Some(m) = matches.next() {
            for capture in m.captures.iter().filter(|c| c.index == callee) {
                let text = capture.node.utf8_text(source.as_bytes()).unwrap_or_default();
                let name = final_segment(text);
                if !name.is_empty() && seen.insert(name.to_string()) {
                    calls.push(name.to_string());
                }
            }
        }
    }

    if cursor.did_exceed_match_limit() {
        return Err(ScanError::QueryExecutionFailure {
            query: format!("{} calls", spec.name),
            reason: "match limit exceeded".to_string(),
        });
    }

    Ok(calls)
}

fn final_segment(text: &str) -> &str {
    let text = text.trim();
    let start = [".", "::", "->"]
        .iter()
        .filter_map(|sep| text.rfind(sep).map(|pos| pos + sep.len()))
        .max()
        .unwrap_or(0);
    text[start..].trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::languages::{BuiltinLanguages, LanguageProvider};
    use std::path::Path;

    fn calls_in(path: &str, source: &str) -> Vec<String> {
        let spec = BuiltinLanguages::global()
            .language_for(Path::new(path))
            .unwrap();
        let tree = spec.parser().unwrap().parse(source, None).unwrap();
        extract_calls(spec, tree.root_node(), source).unwrap()
    }

    #[test]
    fn test_final_segment() {
        assert_eq!(final_segment("self.save"), "save");
        assert_eq!(final_segment("std::fmt::format"), "format");
        assert_eq!(final_segment("obj->run"), "run");
        assert_eq!(final_segment("plain"), "plain");
    }

    #[test]
    fn test_javascript_calls_deduplicated_in_order() {
        let source = "\
function main() {
  const user = new User();
  log('start');
  user.save();
  log('done');
}";
        assert_eq!(calls_in("main.js", source), vec!["User", "log", "save"]);
    }

    #[test]
    fn test_rust_scoped_and_method_calls() {
        let source = "\
fn run() {
    let cfg = Config::load();
    cfg.validate();
    helper();
}";
        assert_eq!(calls_in("run.rs", source), vec!["load", "validate", "helper"]);
    }

    #[test]
    fn test_python_attribute_calls() {
        let source = "\
def handler(request):
    data = parse(request.body)
    return self.respond(data)
";
        assert_eq!(calls_in("views.py", source), vec!["parse", "respond"]);
    }

    #[test]
    fn test_no_calls() {
        assert!(calls_in("m.go", "package m\nfunc f() int { return 1 }\n").is_empty());
    }
}
