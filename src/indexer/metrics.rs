// Cyclomatic complexity over a callable's syntax subtree

use tree_sitter::Node;

/// Node kinds that each add one independent path
const DECISION_NODES: &[&str] = &[
    // conditionals
    "if_statement",
    "if_expression",
    "elif_clause",
    // loops
    "for_statement",
    "for_in_statement",
    "enhanced_for_statement",
    "for_expression",
    "while_statement",
    "while_expression",
    "do_statement",
    "loop_expression",
    // switch and match arms
    "switch_case",
    "switch_block_statement_group",
    "switch_rule",
    "expression_case",
    "type_case",
    "communication_case",
    "match_arm",
    "case_clause",
    // ternaries
    "ternary_expression",
    "conditional_expression",
    // exception handlers
    "catch_clause",
    "except_clause",
];

const LOGICAL_NODES: &[&str] = &["binary_expression", "boolean_operator"];

const LOGICAL_OPERATORS: &[&str] = &["&&", "||", "and", "or"];

/// McCabe complexity of the subtree rooted at `node`: 1 plus one per
/// decision point. Short-circuit operators count, other binary operators
/// do not.
pub fn cyclomatic_complexity(node: Node, source: &str) -> u32 {
    let mut complexity = 1;
    let mut cursor = node.walk();

    'walk: loop {
        if is_decision_point(cursor.node(), source) {
            complexity += 1;
        }
        if cursor.goto_first_child() || cursor.goto_next_sibling() {
            continue;
        }
        loop {
            if !cursor.goto_parent() {
                break 'walk;
            }
            if cursor.goto_next_sibling() {
                continue 'walk;
            }
        }
    }

    complexity
}

fn is_decision_point(node: Node, source: &str) -> bool {
    let kind = node.kind();
    if DECISION_NODES.contains(&kind) {
        return true;
    }
    if LOGICAL_NODES.contains(&kind) {
        return node
            .child_by_field_name("operator")
            .and_then(|op| op.utf8_text(source.as_bytes()).ok())
            .is_some_and(|op| LOGICAL_OPERATORS.contains(&op.trim()));
    }
    false
}
