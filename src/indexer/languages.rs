// Grammar and query registry

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use tracing::{debug, warn};
use tree_sitter::{Language, Parser, Query};

use super::queries::{self, QuerySources};
use crate::error::{Result, ScanError};
use crate::index::DefinitionKind;

/// Source of grammars and compiled queries, keyed by file path.
///
/// The indexer only talks to this trait, so a different grammar set (or a
/// test double) can be plugged in without touching extraction.
pub trait LanguageProvider: Send + Sync {
    fn language_for(&self, path: &Path) -> Option<&LanguageSpec>;
}

/// A grammar together with its compiled pattern queries
pub struct LanguageSpec {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    language: Language,
    pub definitions: Vec<(DefinitionKind, Query)>,
    pub parameters: Option<Query>,
    pub calls: Option<Query>,
}

impl LanguageSpec {
    /// Compile every query source against `language`.
    ///
    /// A query that fails to compile is logged and left out; the rest of the
    /// language keeps working.
    pub fn compile(
        name: &'static str,
        extensions: &'static [&'static str],
        language: Language,
        sources: &QuerySources,
    ) -> Self {
        let definitions = sources
            .definitions
            .iter()
            .filter_map(|(kind, source)| {
                compile_query(&language, name, kind.as_str(), source).map(|query| (*kind, query))
            })
            .collect();
        let parameters = compile_query(&language, name, "parameters", sources.parameters);
        let calls = compile_query(&language, name, "calls", sources.calls);

        Self {
            name,
            extensions,
            language,
            definitions,
            parameters,
            calls,
        }
    }

    /// Fresh parser for this grammar. Parsers are not shared between threads.
    pub fn parser(&self) -> Result<Parser> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ScanError::ParseFailure {
                path: self.name.to_string(),
                reason: e.to_string(),
            })?;
        Ok(parser)
    }

    pub fn has_definition_queries(&self) -> bool {
        !self.definitions.is_empty()
    }

    /// Kinds this language can extract, in query order
    pub fn kinds(&self) -> impl Iterator<Item = DefinitionKind> + '_ {
        self.definitions.iter().map(|(kind, _)| *kind)
    }
}

fn compile_query(language: &Language, lang: &str, label: &str, source: &str) -> Option<Query> {
    if source.trim().is_empty() {
        return None;
    }
    match Query::new(language, source) {
        Ok(query) => Some(query),
        Err(e) => {
            warn!("Skipping {} query for {}: {}", label, lang, e);
            None
        }
    }
}

/// The grammars compiled into the binary
pub struct BuiltinLanguages {
    specs: Vec<LanguageSpec>,
    by_extension: HashMap<&'static str, usize>,
}

static BUILTIN: Lazy<BuiltinLanguages> = Lazy::new(BuiltinLanguages::new);

impl BuiltinLanguages {
    fn new() -> Self {
        let specs = vec![
            LanguageSpec::compile(
                "javascript",
                &["js", "jsx", "mjs", "cjs"],
                tree_sitter_javascript::LANGUAGE.into(),
                &queries::javascript::QUERIES,
            ),
            LanguageSpec::compile(
                "typescript",
                &["ts", "mts", "cts"],
                tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
                &queries::typescript::QUERIES,
            ),
            LanguageSpec::compile(
                "tsx",
                &["tsx"],
                tree_sitter_typescript::LANGUAGE_TSX.into(),
                &queries::typescript::QUERIES,
            ),
            LanguageSpec::compile(
                "python",
                &["py", "pyi"],
                tree_sitter_python::LANGUAGE.into(),
                &queries::python::QUERIES,
            ),
            LanguageSpec::compile(
                "rust",
                &["rs"],
                tree_sitter_rust::LANGUAGE.into(),
                &queries::rust::QUERIES,
            ),
            LanguageSpec::compile(
                "go",
                &["go"],
                tree_sitter_go::LANGUAGE.into(),
                &queries::go::QUERIES,
            ),
            LanguageSpec::compile(
                "java",
                &["java"],
                tree_sitter_java::LANGUAGE.into(),
                &queries::java::QUERIES,
            ),
        ];

        let mut by_extension = HashMap::new();
        for (index, spec) in specs.iter().enumerate() {
            for ext in spec.extensions {
                by_extension.insert(*ext, index);
            }
        }
        debug!("Compiled {} built-in languages", specs.len());

        Self {
            specs,
            by_extension,
        }
    }

    /// Shared registry, compiled on first use
    pub fn global() -> &'static BuiltinLanguages {
        &BUILTIN
    }

    pub fn specs(&self) -> &[LanguageSpec] {
        &self.specs
    }

    /// One `*.ext` glob per supported extension
    pub fn default_patterns(&self) -> Vec<String> {
        self.specs
            .iter()
            .flat_map(|spec| spec.extensions.iter())
            .map(|ext| format!("*.{}", ext))
            .collect()
    }
}

impl LanguageProvider for BuiltinLanguages {
    fn language_for(&self, path: &Path) -> Option<&LanguageSpec> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        self.by_extension.get(ext.as_str()).map(|&index| &self.specs[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_for_extension() {
        let languages = BuiltinLanguages::global();
        let cases = [
            ("src/app.js", "javascript"),
            ("src/App.JSX", "javascript"),
            ("lib/types.ts", "typescript"),
            ("ui/View.tsx", "tsx"),
            ("tool.py", "python"),
            ("main.rs", "rust"),
            ("server.go", "go"),
            ("Main.java", "java"),
        ];
        for (path, expected) in cases {
            let spec = languages.language_for(Path::new(path)).unwrap();
            assert_eq!(spec.name, expected, "{}", path);
        }
        assert!(languages.language_for(Path::new("README.md")).is_none());
        assert!(languages.language_for(Path::new("Makefile")).is_none());
    }

    #[test]
    fn test_builtin_queries_compile() {
        for spec in BuiltinLanguages::global().specs() {
            let expected = match spec.name {
                "javascript" => queries::javascript::QUERIES.definitions.len(),
                "typescript" | "tsx" => queries::typescript::QUERIES.definitions.len(),
                "python" => queries::python::QUERIES.definitions.len(),
                "rust" => queries::rust::QUERIES.definitions.len(),
                "go" => queries::go::QUERIES.definitions.len(),
                "java" => queries::java::QUERIES.definitions.len(),
                other => panic!("unexpected language {}", other),
            };
            assert_eq!(spec.definitions.len(), expected, "{} definition queries", spec.name);
            assert!(spec.parameters.is_some(), "{} parameter query", spec.name);
            assert!(spec.calls.is_some(), "{} call query", spec.name);
        }
    }

    #[test]
    fn test_default_patterns_cover_extensions() {
        let patterns = BuiltinLanguages::global().default_patterns();
        assert!(patterns.contains(&"*.py".to_string()));
        assert!(patterns.contains(&"*.tsx".to_string()));
        assert!(patterns.contains(&"*.java".to_string()));
    }
}
