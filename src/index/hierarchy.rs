// Parent/child reconstruction from source positions

use std::cmp::Reverse;
use std::collections::HashMap;

use tracing::trace;

use super::Definition;

/// Minimal view of a syntax tree needed to infer nesting.
///
/// Any grammar backend can drive [`build_hierarchy`] by answering these
/// three questions. Lines are 1-based and inclusive.
pub trait SyntaxNavigator {
    type Node: Copy;

    /// Node the definition was extracted from
    fn node_of(&self, def: &Definition) -> Option<Self::Node>;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// `(start_line, end_line)` of the node
    fn span(&self, node: Self::Node) -> (usize, usize);
}

/// Order in which an enclosing definition always comes first
fn nesting_key(def: &Definition) -> (usize, Reverse<usize>, u8, usize) {
    (def.start_line, Reverse(def.end_line), def.kind.nesting_rank(), def.id)
}

/// Link every definition to its smallest enclosing container definition.
///
/// For each definition the navigator is walked outward from the node it was
/// extracted from; the first node whose span equals the span of another
/// container definition decides the parent. Both `parent_id` and the
/// parent's `children` are updated. Error and metadata entries are skipped.
pub fn build_hierarchy<N: SyntaxNavigator>(definitions: &mut [Definition], navigator: &N) {
    let mut containers: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
    for (index, def) in definitions.iter().enumerate() {
        if def.kind.is_container() {
            containers
                .entry((def.start_line, def.end_line))
                .or_default()
                .push(index);
        }
    }

    // Source order, so children get appended in the order they appear
    let mut order: Vec<usize> = (0..definitions.len())
        .filter(|&i| !definitions[i].kind.is_passthrough())
        .collect();
    order.sort_by_key(|&i| nesting_key(&definitions[i]));

    for index in order {
        if definitions[index].parent_id.is_some() {
            continue;
        }
        if let Some(parent) = find_parent(definitions, &containers, index, navigator) {
            let child_id = definitions[index].id;
            definitions[index].parent_id = Some(definitions[parent].id);
            definitions[parent].children.push(child_id);
            trace!(
                "{} '{}' nested under {} '{}'",
                definitions[index].kind,
                definitions[index].name,
                definitions[parent].kind,
                definitions[parent].name
            );
        }
    }
}

fn find_parent<N: SyntaxNavigator>(
    definitions: &[Definition],
    containers: &HashMap<(usize, usize), Vec<usize>>,
    index: usize,
    navigator: &N,
) -> Option<usize> {
    let def = &definitions[index];
    let def_key = nesting_key(def);
    let mut node = navigator.node_of(def)?;

    loop {
        if let Some(candidates) = containers.get(&navigator.span(node)) {
            let parent = candidates.iter().copied().find(|&candidate| {
                let other = &definitions[candidate];
                candidate != index && other.contains_span(def) && nesting_key(other) < def_key
            });
            if parent.is_some() {
                return parent;
            }
        }
        node = navigator.parent(node)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::DefinitionKind;
    use proptest::prelude::*;

    /// Navigator over a hand-built tree of `(start, end, parent)` nodes
    struct FakeNavigator {
        nodes: Vec<(usize, usize, Option<usize>)>,
    }

    impl FakeNavigator {
        fn new(nodes: Vec<(usize, usize, Option<usize>)>) -> Self {
            Self { nodes }
        }
    }

    impl SyntaxNavigator for FakeNavigator {
        type Node = usize;

        /// Innermost node spanning exactly the definition's lines
        fn node_of(&self, def: &Definition) -> Option<usize> {
            self.nodes
                .iter()
                .rposition(|(start, end, _)| (*start, *end) == (def.start_line, def.end_line))
        }

        fn parent(&self, node: usize) -> Option<usize> {
            self.nodes[node].2
        }

        fn span(&self, node: usize) -> (usize, usize) {
            (self.nodes[node].0, self.nodes[node].1)
        }
    }

    fn def(id: usize, kind: DefinitionKind, name: &str, start: usize, end: usize) -> Definition {
        Definition::new(id, kind, name, start, end)
    }

    #[test]
    fn test_method_nests_under_class() {
        // program(1-10) > class(2-9) > body(2-9) > method(3-6)
        let nav = FakeNavigator::new(vec![
            (1, 10, None),
            (2, 9, Some(0)),
            (2, 9, Some(1)),
            (3, 6, Some(2)),
        ]);
        let mut defs = vec![
            def(1, DefinitionKind::Class, "Greeter", 2, 9),
            def(2, DefinitionKind::Method, "greet", 3, 6),
        ];

        build_hierarchy(&mut defs, &nav);

        assert_eq!(defs[1].parent_id, Some(1));
        assert_eq!(defs[0].children, vec![2]);
        assert_eq!(defs[0].parent_id, None);
    }

    #[test]
    fn test_variable_is_never_a_parent() {
        let nav = FakeNavigator::new(vec![(1, 5, None), (2, 4, Some(0)), (3, 3, Some(1))]);
        let mut defs = vec![
            def(1, DefinitionKind::Variable, "config", 2, 4),
            def(2, DefinitionKind::Property, "inner", 3, 3),
        ];

        build_hierarchy(&mut defs, &nav);

        assert!(defs.iter().all(|d| d.parent_id.is_none()));
        assert!(defs.iter().all(|d| d.children.is_empty()));
    }

    #[test]
    fn test_shared_span_prefers_outer_kind() {
        // `class A { m() {} }` on a single line
        let nav = FakeNavigator::new(vec![(1, 1, None), (1, 1, Some(0))]);
        let mut defs = vec![
            def(1, DefinitionKind::Method, "m", 1, 1),
            def(2, DefinitionKind::Class, "A", 1, 1),
        ];

        build_hierarchy(&mut defs, &nav);

        assert_eq!(defs[0].parent_id, Some(2));
        assert_eq!(defs[1].parent_id, None);
        assert_eq!(defs[1].children, vec![1]);
    }

    #[test]
    fn test_one_line_container_inside_block() {
        // namespace(1-3) > body(1-3) > enum(2) > enum body(2) > member(2)
        let nav = FakeNavigator::new(vec![
            (1, 3, None),
            (1, 3, Some(0)),
            (2, 2, Some(1)),
            (2, 2, Some(2)),
            (2, 2, Some(3)),
        ]);
        let mut defs = vec![
            def(1, DefinitionKind::Namespace, "Palette", 1, 3),
            def(2, DefinitionKind::Enum, "Color", 2, 2),
            def(3, DefinitionKind::EnumMember, "Red", 2, 2),
        ];

        build_hierarchy(&mut defs, &nav);

        assert_eq!(defs[1].parent_id, Some(1));
        assert_eq!(defs[2].parent_id, Some(2));
        assert_eq!(defs[0].children, vec![2]);
        assert_eq!(defs[1].children, vec![3]);
    }

    #[test]
    fn test_children_follow_source_order() {
        let nav = FakeNavigator::new(vec![
            (1, 20, None),
            (1, 20, Some(0)),
            (2, 4, Some(1)),
            (6, 8, Some(1)),
            (10, 10, Some(1)),
        ]);
        let mut defs = vec![
            def(1, DefinitionKind::Class, "Shape", 1, 20),
            def(2, DefinitionKind::Property, "sides", 10, 10),
            def(3, DefinitionKind::Method, "area", 2, 4),
            def(4, DefinitionKind::Method, "perimeter", 6, 8),
        ];

        build_hierarchy(&mut defs, &nav);

        assert_eq!(defs[0].children, vec![3, 4, 2]);
    }

    #[test]
    fn test_error_entries_are_skipped() {
        let nav = FakeNavigator::new(vec![(0, 10, None)]);
        let mut defs = vec![
            def(1, DefinitionKind::Class, "Everything", 0, 10),
            Definition::error(2, "boom"),
        ];

        build_hierarchy(&mut defs, &nav);

        assert_eq!(defs[1].parent_id, None);
        assert!(defs[0].children.is_empty());
    }

    const KINDS: [DefinitionKind; 6] = [
        DefinitionKind::Class,
        DefinitionKind::Function,
        DefinitionKind::Method,
        DefinitionKind::Namespace,
        DefinitionKind::Variable,
        DefinitionKind::Property,
    ];

    /// Random tree where node `i` starts on line `i + 1` and spans its subtree
    type ArbTree = (Vec<(usize, usize, Option<usize>)>, Vec<Option<DefinitionKind>>);

    fn arb_tree() -> impl Strategy<Value = ArbTree> {
        let node = (any::<prop::sample::Index>(), prop::option::of(0..KINDS.len()));
        prop::collection::vec(node, 1..40)
            .prop_map(|raw| {
                let count = raw.len();
                let parents: Vec<Option<usize>> = (0..count)
                    .map(|i| if i == 0 { None } else { Some(raw[i].0.index(i)) })
                    .collect();
                // Lines are assigned in DFS preorder so every subtree is contiguous
                let mut children: Vec<Vec<usize>> = vec![Vec::new(); count];
                for (i, parent) in parents.iter().enumerate() {
                    if let Some(p) = parent {
                        children[*p].push(i);
                    }
                }
                let mut spans = vec![(0, 0); count];
                let mut next_line = 1;
                fn assign(
                    node: usize,
                    children: &[Vec<usize>],
                    spans: &mut [(usize, usize)],
                    next: &mut usize,
                ) {
                    let start = *next;
                    *next += 1;
                    for &child in &children[node] {
                        assign(child, children, spans, next);
                    }
                    spans[node] = (start, *next - 1);
                }
                assign(0, &children, &mut spans, &mut next_line);
                let nodes = (0..count).map(|i| (spans[i].0, spans[i].1, parents[i])).collect();
                let kinds = raw.iter().map(|(_, k)| k.map(|k| KINDS[k])).collect();
                (nodes, kinds)
            })
    }

    proptest! {
        #[test]
        fn prop_parent_is_nearest_enclosing_container((nodes, kinds) in arb_tree()) {
            let mut defs = Vec::new();
            let mut node_of_def = Vec::new();
            for (node, kind) in kinds.iter().enumerate() {
                if let Some(kind) = kind {
                    let (start, end, _) = nodes[node];
                    let name = format!("n{}", node);
                    defs.push(Definition::new(defs.len() + 1, *kind, name, start, end));
                    node_of_def.push(node);
                }
            }
            let nav = FakeNavigator::new(nodes.clone());

            build_hierarchy(&mut defs, &nav);

            for (i, d) in defs.iter().enumerate() {
                // Expected parent: nearest ancestor node carrying a container definition
                let mut expected = None;
                let mut cursor = nodes[node_of_def[i]].2;
                while let Some(node) = cursor {
                    if let Some(j) = node_of_def.iter().position(|&n| n == node) {
                        if defs[j].kind.is_container() {
                            expected = Some(defs[j].id);
                            break;
                        }
                    }
                    cursor = nodes[node].2;
                }
                prop_assert_eq!(d.parent_id, expected);

                if let Some(pid) = d.parent_id {
                    let parent = defs.iter().find(|p| p.id == pid).unwrap();
                    prop_assert!(parent.contains_span(d));
                    prop_assert!(parent.children.contains(&d.id));
                }
                for child in &d.children {
                    let child = defs.iter().find(|c| c.id == *child).unwrap();
                    prop_assert_eq!(child.parent_id, Some(d.id));
                }
            }
        }
    }
}
