// Definition extraction from pattern query matches

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use streaming_iterator::StreamingIterator;
use tracing::{trace, warn};
use tree_sitter::{Node, Query, QueryCursor};

use super::languages::LanguageSpec;
use crate::index::hierarchy::SyntaxNavigator;
use crate::index::{Definition, DefinitionKind, Parameter};

/// A definition still tied to the syntax nodes it was extracted from
#[derive(Debug)]
pub struct ExtractedDefinition<'tree> {
    pub definition: Definition,
    pub node: Node<'tree>,
    pub parameters: Option<Node<'tree>>,
}

/// 1-based inclusive line span of a node.
///
/// A node ending at column 0 of a later row only covers the trailing
/// newline of the previous line, so that row is not counted.
pub fn line_span(node: Node) -> (usize, usize) {
    let start = node.start_position();
    let end = node.end_position();
    let end_row = if end.column == 0 && end.row > start.row {
        end.row - 1
    } else {
        end.row
    };
    (start.row + 1, end_row + 1)
}

fn node_text<'s>(node: Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or_default()
}

/// Strip the `:` or `->` that some grammars keep inside type nodes
fn normalize_type(text: &str) -> String {
    let text = text.trim();
    let text = text
        .strip_prefix("->")
        .or_else(|| text.strip_prefix(':'))
        .unwrap_or(text);
    text.trim().to_string()
}

/// Run every definition query of `spec` over the tree rooted at `root`.
///
/// Results are deduplicated, reconciled (a non-callable duplicating a
/// callable's name and span is dropped), ordered so that enclosing
/// definitions come first, and numbered from 1.
pub fn extract_definitions<'tree>(
    spec: &LanguageSpec,
    root: Node<'tree>,
    source: &str,
) -> Vec<ExtractedDefinition<'tree>> {
    let mut extracted = Vec::new();
    let mut seen = HashSet::new();

    for (kind, query) in &spec.definitions {
        for item in run_definition_query(*kind, query, root, source) {
            let key = (
                item.definition.kind,
                item.node.start_byte(),
                item.node.end_byte(),
                item.definition.name.clone(),
            );
            if seen.insert(key) {
                extracted.push(item);
            }
        }
    }

    let callables: HashSet<(String, usize, usize)> = extracted
        .iter()
        .filter(|item| item.definition.kind.is_callable())
        .map(|item| span_key(&item.definition))
        .collect();
    extracted.retain(|item| {
        item.definition.kind.is_callable() || !callables.contains(&span_key(&item.definition))
    });

    extracted.sort_by_key(|item| {
        (
            item.definition.start_line,
            Reverse(item.definition.end_line),
            item.definition.kind.nesting_rank(),
            item.node.start_byte(),
        )
    });
    for (index, item) in extracted.iter_mut().enumerate() {
        item.definition.id = index + 1;
    }

    extracted
}

fn span_key(def: &Definition) -> (String, usize, usize) {
    (def.name.clone(), def.start_line, def.end_line)
}

fn run_definition_query<'tree>(
    kind: DefinitionKind,
    query: &Query,
    root: Node<'tree>,
    source: &str,
) -> Vec<ExtractedDefinition<'tree>> {
    let anchor = kind.as_str();
    if query.capture_index_for_name(anchor).is_none()
        || query.capture_index_for_name("name").is_none()
    {
        warn!("{} query lacks @name or @{} capture, skipping", kind, anchor);
        return Vec::new();
    }

    let capture_names = query.capture_names();
    let mut results = Vec::new();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, root, source.as_bytes());

    while let Some(m) = matches.next() {
        let mut anchor_node = None;
        let mut name_node = None;
        let mut parameters = None;
        let mut modifiers: Vec<&str> = Vec::new();
        let mut data_type = None;
        let mut value = None;
        let mut return_type = None;

        for capture in m.captures {
            let capture_name = capture_names[capture.index as usize];
            match capture_name {
                "name" => name_node = Some(capture.node),
                "modifier" => modifiers.extend(node_text(capture.node, source).split_whitespace()),
                "dataType" => data_type = Some(normalize_type(node_text(capture.node, source))),
                "value" => value = Some(node_text(capture.node, source).trim().to_string()),
                "returnType" => return_type = Some(normalize_type(node_text(capture.node, source))),
                "parameters" => parameters = Some(capture.node),
                other if other == anchor => anchor_node = Some(capture.node),
                _ => {}
            }
        }

        let (Some(node), Some(name_node)) = (anchor_node, name_node) else {
            continue;
        };
        let name = node_text(name_node, source).trim();
        if name.is_empty() {
            continue;
        }

        let (start_line, end_line) = line_span(node);
        let mut definition = Definition::new(0, kind, name, start_line, end_line);
        if !modifiers.is_empty() {
            definition.modifier = Some(modifiers.join(" "));
        }
        definition.data_type = data_type.filter(|t| !t.is_empty());
        definition.value = value.filter(|v| !v.is_empty());
        definition.return_type = return_type.filter(|t| !t.is_empty());
        trace!("{} '{}' at lines {}-{}", kind, definition.name, start_line, end_line);

        results.push(ExtractedDefinition {
            definition,
            node,
            parameters: if kind.is_callable() { parameters } else { None },
        });
    }

    results
}

static TYPED_PARAMETER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([^:\s]+)\s*:\s*(.+?)\s*$").expect("valid parameter regex"));

/// Parameters of a callable, in source order.
///
/// Uses the language's parameter query when it finds anything, otherwise
/// splits the raw block text on commas.
pub fn parse_parameters(spec: &LanguageSpec, block: Node, source: &str) -> Vec<Parameter> {
    let parameters = spec
        .parameters
        .as_ref()
        .map(|query| query_parameters(query, block, source))
        .unwrap_or_default();
    if !parameters.is_empty() {
        return parameters;
    }
    split_parameters(node_text(block, source))
}

fn query_parameters(query: &Query, block: Node, source: &str) -> Vec<Parameter> {
    let Some(name_index) = query.capture_index_for_name("param_name") else {
        return Vec::new();
    };
    let type_index = query.capture_index_for_name("param_type");

    let mut found: Vec<(usize, Parameter)> = Vec::new();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, block, source.as_bytes());
    while let Some(m) = matches.next() {
        let name_capture = m.captures.iter().find(|c| c.index == name_index);
        let Some(name_node) = name_capture.map(|c| c.node) else {
            continue;
        };
        // Parameters of nested callables (default values, closures) belong elsewhere
        if !belongs_to_block(name_node, block) {
            continue;
        }
        let param_type = type_index
            .and_then(|index| m.captures.iter().find(|c| c.index == index))
            .map(|c| normalize_type(node_text(c.node, source)))
            .filter(|t| !t.is_empty());
        let name = node_text(name_node, source).trim();
        if !name.is_empty() {
            found.push((name_node.start_byte(), Parameter::new(name, param_type)));
        }
    }

    found.sort_by_key(|(position, _)| *position);
    found.dedup_by_key(|(position, _)| *position);
    found.into_iter().map(|(_, parameter)| parameter).collect()
}

/// True when the nearest ancestor of the same kind as `block` is `block` itself
fn belongs_to_block(node: Node, block: Node) -> bool {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if ancestor.kind() == block.kind() {
            return ancestor.id() == block.id();
        }
        current = ancestor.parent();
    }
    false
}

fn split_parameters(raw: &str) -> Vec<Parameter> {
    let inner = raw.trim();
    let inner = inner
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(inner)
        .trim();
    if inner.is_empty() {
        return Vec::new();
    }

    inner
        .split(',')
        .filter_map(|piece| {
            let piece = piece.split('=').next().unwrap_or_default().trim();
            if piece.is_empty() {
                return None;
            }
            if let Some(caps) = TYPED_PARAMETER.captures(piece) {
                return Some(Parameter::new(&caps[1], Some(caps[2].to_string())));
            }
            let tokens: Vec<&str> = piece.split_whitespace().collect();
            match tokens.as_slice() {
                [] => None,
                [name] => Some(Parameter::new(*name, None)),
                [type_tokens @ .., name] => {
                    Some(Parameter::new(*name, Some(type_tokens.join(" "))))
                }
            }
        })
        .collect()
}

/// [`SyntaxNavigator`] over a parsed tree-sitter tree, keyed by the anchor
/// node each definition id was extracted from
pub struct TreeNavigator<'tree> {
    anchors: HashMap<usize, Node<'tree>>,
}

impl<'tree> TreeNavigator<'tree> {
    pub fn new(items: &[ExtractedDefinition<'tree>]) -> Self {
        Self {
            anchors: items
                .iter()
                .map(|item| (item.definition.id, item.node))
                .collect(),
        }
    }
}

impl<'tree> SyntaxNavigator for TreeNavigator<'tree> {
    type Node = Node<'tree>;

    fn node_of(&self, def: &Definition) -> Option<Node<'tree>> {
        self.anchors.get(&def.id).copied()
    }

    fn parent(&self, node: Node<'tree>) -> Option<Node<'tree>> {
        node.parent()
    }

    fn span(&self, node: Node<'tree>) -> (usize, usize) {
        line_span(node)
    }
}
