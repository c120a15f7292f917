// Per-file indexing pipeline

pub mod calls;
pub mod discovery;
pub mod extractor;
pub mod languages;
pub mod metrics;
pub mod queries;

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, ScanError};
use crate::index::hierarchy::build_hierarchy;
use crate::index::Definition;
use extractor::TreeNavigator;
use languages::{BuiltinLanguages, LanguageProvider};

/// Turns one source file into its flat, linked definition list
pub struct Indexer<'p> {
    provider: &'p dyn LanguageProvider,
}

impl Indexer<'static> {
    /// Indexer backed by the compiled-in grammars
    pub fn builtin() -> Self {
        Self::new(BuiltinLanguages::global())
    }
}

impl<'p> Indexer<'p> {
    pub fn new(provider: &'p dyn LanguageProvider) -> Self {
        Self { provider }
    }

    /// Read and index a file. Never fails: problems become a single
    /// `error` definition.
    pub fn index_file(&self, path: &Path) -> Vec<Definition> {
        match std::fs::read_to_string(path) {
            Ok(source) => self.index_source(path, &source),
            Err(source) => {
                let err = ScanError::ReadFailure {
                    path: path.to_path_buf(),
                    source,
                };
                warn!("{}", err);
                vec![Definition::error(1, err.to_string())]
            }
        }
    }

    /// Index already-loaded source text; `path` selects the language
    pub fn index_source(&self, path: &Path, source: &str) -> Vec<Definition> {
        match self.try_index(path, source) {
            Ok(definitions) => definitions,
            Err(err) => {
                debug!("{}: {}", path.display(), err);
                vec![Definition::error(1, err.to_string())]
            }
        }
    }

    fn try_index(&self, path: &Path, source: &str) -> Result<Vec<Definition>> {
        let spec = self
            .provider
            .language_for(path)
            .ok_or_else(|| ScanError::UnsupportedFileType(describe_file_type(path)))?;
        if !spec.has_definition_queries() {
            return Err(ScanError::QueryExecutionFailure {
                query: spec.name.to_string(),
                reason: "no definition queries compiled".to_string(),
            });
        }

        let mut parser = spec.parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ScanError::ParseFailure {
                path: path.display().to_string(),
                reason: "parser produced no tree".to_string(),
            })?;
        let root = tree.root_node();

        let extracted = extractor::extract_definitions(spec, root, source);
        let navigator = TreeNavigator::new(&extracted);

        let mut definitions = Vec::new();
        for item in extracted {
            let mut definition = item.definition;
            if definition.kind.is_callable() {
                if let Some(block) = item.parameters {
                    definition.parameters = extractor::parse_parameters(spec, block, source);
                    definition.calls = match calls::extract_calls(spec, item.node, source) {
                        Ok(calls) => calls,
                        Err(e) => {
                            warn!("{} in {}: {}", definition.name, path.display(), e);
                            Vec::new()
                        }
                    };
                }
                definition.parameter_count = definition.parameters.len();
                definition.complexity = metrics::cyclomatic_complexity(item.node, source);
            }
            definitions.push(definition);
        }

        build_hierarchy(&mut definitions, &navigator);

        if root.has_error() {
            let id = definitions.len() + 1;
            definitions.push(Definition::metadata(
                id,
                format!("Partial parse: {} contains syntax errors", path.display()),
            ));
        }

        debug!(
            "Indexed {} ({}): {} definitions",
            path.display(),
            spec.name,
            definitions.len()
        );
        Ok(definitions)
    }
}

fn describe_file_type(path: &Path) -> String {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!(".{}", ext),
        None => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{DefinitionKind, Parameter};
    use crate::indexer::languages::LanguageSpec;
    use crate::indexer::queries::QuerySources;

    fn find<'a>(defs: &'a [Definition], name: &str) -> &'a Definition {
        defs.iter().find(|d| d.name == name).unwrap()
    }

    #[test]
    fn test_plain_function() {
        let defs = Indexer::builtin().index_source(
            Path::new("math.js"),
            "function add(a, b) { return a + b; }",
        );

        assert_eq!(defs.len(), 1);
        let add = &defs[0];
        assert_eq!(add.kind, DefinitionKind::Function);
        assert_eq!(add.name, "add");
        assert_eq!((add.start_line, add.end_line, add.loc), (1, 1, 1));
        assert_eq!(
            add.parameters,
            vec![Parameter::new("a", None), Parameter::new("b", None)]
        );
        assert_eq!(add.parameter_count, 2);
        assert_eq!(add.complexity, 1);
        assert!(add.calls.is_empty());
        assert_eq!(add.parent_id, None);
    }

    #[test]
    fn test_method_nested_under_class() {
        let source = "\
class Greeter {
  greet(name) {
    if (name) {
      return format(name);
    }
    return 'hello';
  }
}
";
        let defs = Indexer::builtin().index_source(Path::new("greeter.js"), source);

        let class = find(&defs, "Greeter");
        let method = find(&defs, "greet");
        assert_eq!(method.parent_id, Some(class.id));
        assert_eq!(class.children, vec![method.id]);
        assert_eq!(method.complexity, 2);
        assert_eq!(method.calls, vec!["format"]);
        assert_eq!(class.complexity, 1);
        assert_eq!(class.parameter_count, 0);
    }

    #[test]
    fn test_python_class_hierarchy() {
        let source = "\
class Repository:
    table = 'users'

    def __init__(self, db):
        self.db = db

    @staticmethod
    def build(config):
        return Repository(connect(config))


def main():
    repo = Repository.build({})
";
        let defs = Indexer::builtin().index_source(Path::new("repo.py"), source);

        let class = find(&defs, "Repository");
        let init = find(&defs, "__init__");
        let build = find(&defs, "build");
        let table = find(&defs, "table");
        let main = find(&defs, "main");

        assert_eq!(init.kind, DefinitionKind::Method);
        assert_eq!(init.parent_id, Some(class.id));
        assert_eq!(build.parent_id, Some(class.id));
        assert_eq!(table.kind, DefinitionKind::Property);
        assert_eq!(table.parent_id, Some(class.id));
        assert_eq!(class.children, vec![table.id, init.id, build.id]);
        assert_eq!(build.calls, vec!["Repository", "connect"]);
        assert_eq!(main.parent_id, None);
        assert_eq!(build.start_line, 7);
    }

    #[test]
    fn test_rust_impl_methods() {
        let source = "\
pub struct Counter {
    count: u32,
}

impl Counter {
    pub fn increment(&mut self, by: u32) -> u32 {
        self.count += by;
        self.count
    }
}
";
        let defs = Indexer::builtin().index_source(Path::new("counter.rs"), source);

        let field = find(&defs, "count");
        let method = find(&defs, "increment");
        assert_eq!(field.kind, DefinitionKind::Property);
        assert_eq!(field.data_type.as_deref(), Some("u32"));
        assert_eq!(method.kind, DefinitionKind::Method);
        assert_eq!(method.modifier.as_deref(), Some("pub"));
        assert_eq!(method.return_type.as_deref(), Some("u32"));
        assert_eq!(method.parameter_count, 2);
        assert_eq!(method.parameters[1], Parameter::new("by", Some("u32".into())));

        let parent = defs.iter().find(|d| Some(d.id) == method.parent_id).unwrap();
        assert_eq!(parent.kind, DefinitionKind::Class);
        assert_eq!(parent.start_line, 5);
    }

    #[test]
    fn test_one_line_enum_inside_namespace() {
        let source = "\
namespace Palette {
  enum Color { Red = 1, Green }
}
";
        let defs = Indexer::builtin().index_source(Path::new("palette.ts"), source);

        let palette = find(&defs, "Palette");
        let color = find(&defs, "Color");
        let red = find(&defs, "Red");
        let green = find(&defs, "Green");
        assert_eq!(color.parent_id, Some(palette.id));
        assert_eq!(red.parent_id, Some(color.id));
        assert_eq!(green.parent_id, Some(color.id));
        assert_eq!(palette.children, vec![color.id]);
        assert_eq!(color.children, vec![red.id, green.id]);
    }

    #[test]
    fn test_one_line_inner_class() {
        let source = "\
class Outer {
    class Inner { void h() {} }
}
";
        let defs = Indexer::builtin().index_source(Path::new("Outer.java"), source);

        let outer = find(&defs, "Outer");
        let inner = find(&defs, "Inner");
        let h = find(&defs, "h");
        assert_eq!(inner.parent_id, Some(outer.id));
        assert_eq!(h.parent_id, Some(inner.id));
        assert_eq!(outer.children, vec![inner.id]);
    }

    #[test]
    fn test_one_line_impl_inside_module() {
        let source = "\
mod shapes {
    impl Square { fn area(&self) -> u32 { 4 } }
}
";
        let defs = Indexer::builtin().index_source(Path::new("shapes.rs"), source);

        let module = find(&defs, "shapes");
        let area = find(&defs, "area");
        let block = defs.iter().find(|d| Some(d.id) == area.parent_id).unwrap();
        assert_eq!(block.kind, DefinitionKind::Class);
        assert_eq!(block.name, "Square");
        assert_eq!(block.parent_id, Some(module.id));
    }

    #[test]
    fn test_parameter_count_includes_varargs() {
        let source = "class Log {\n    void f(int a, String... rest) {}\n}\n";
        let defs = Indexer::builtin().index_source(Path::new("Log.java"), source);
        assert_eq!(find(&defs, "f").parameter_count, 2);
    }

    #[test]
    fn test_ids_are_sequential_from_one() {
        let source = "const a = 1;\nfunction f() {}\nclass C {}\n";
        let defs = Indexer::builtin().index_source(Path::new("x.js"), source);
        let ids: Vec<usize> = defs.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_unsupported_file_type() {
        let defs = Indexer::builtin().index_source(Path::new("notes.txt"), "hello");
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].kind, DefinitionKind::Error);
        assert_eq!(defs[0].name, "Unsupported file type: .txt");
        assert_eq!(defs[0].loc, 0);
    }

    #[test]
    fn test_syntax_errors_add_metadata() {
        let defs = Indexer::builtin().index_source(
            Path::new("broken.js"),
            "function ok() {}\nfunction broken( {\n",
        );
        assert!(defs.iter().any(|d| d.name == "ok"));
        let meta = defs.last().unwrap();
        assert_eq!(meta.kind, DefinitionKind::Metadata);
        assert!(meta.name.contains("syntax errors"));
    }

    #[test]
    fn test_missing_file_becomes_error() {
        let defs = Indexer::builtin().index_file(Path::new("/definitely/not/here.py"));
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].kind, DefinitionKind::Error);
        assert!(defs[0].name.starts_with("Failed to read"));
    }

    struct EmptyProvider(LanguageSpec);

    impl LanguageProvider for EmptyProvider {
        fn language_for(&self, _path: &Path) -> Option<&LanguageSpec> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_language_without_queries() {
        let sources = QuerySources {
            definitions: &[],
            parameters: "",
            calls: "",
        };
        let provider = EmptyProvider(LanguageSpec::compile(
            "bare",
            &["bare"],
            tree_sitter_javascript::LANGUAGE.into(),
            &sources,
        ));
        let defs = Indexer::new(&provider).index_source(Path::new("a.bare"), "x");
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].kind, DefinitionKind::Error);
    }
}
