// Ancestor-preserving definition filter

use std::collections::{HashMap, HashSet};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ScanError;
use crate::index::Definition;

/// Inclusion/exclusion predicates applied to a file's definitions.
///
/// Empty lists and `None` bounds impose no constraint. All conditions are
/// ANDed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterOptions {
    pub include_types: Vec<String>,
    pub exclude_types: Vec<String>,
    pub include_modifiers: Vec<String>,
    pub exclude_modifiers: Vec<String>,
    pub name_pattern: Option<String>,
    pub exclude_name_pattern: Option<String>,
    pub min_complexity: Option<u32>,
    pub max_complexity: Option<u32>,
    pub min_parameters: Option<usize>,
    pub max_parameters: Option<usize>,
}

impl FilterOptions {
    /// Reject bound pairs that can never be satisfied
    pub fn validate(&self) -> Result<(), ScanError> {
        if let (Some(min), Some(max)) = (self.min_complexity, self.max_complexity) {
            if min > max {
                return Err(ScanError::InvalidArgument(format!(
                    "minComplexity ({}) is greater than maxComplexity ({})",
                    min, max
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.min_parameters, self.max_parameters) {
            if min > max {
                return Err(ScanError::InvalidArgument(format!(
                    "minParameters ({}) is greater than maxParameters ({})",
                    min, max
                )));
            }
        }
        Ok(())
    }
}

/// Compiled state of the include name pattern
#[derive(Debug)]
enum NamePattern {
    Unset,
    Valid(Regex),
    /// Fails closed: nothing matches
    Invalid,
}

/// A [`FilterOptions`] with its regexes compiled once, shareable across files
#[derive(Debug)]
pub struct DefinitionFilter {
    options: FilterOptions,
    name_pattern: NamePattern,
    exclude_name_pattern: Option<Regex>,
}

fn compile(pattern: &str) -> Result<Regex, ScanError> {
    Regex::new(pattern).map_err(|source| ScanError::InvalidRegex {
        pattern: pattern.to_string(),
        source,
    })
}

/// Test a pattern against the full name and its last whitespace token
fn name_matches(regex: &Regex, name: &str) -> bool {
    if regex.is_match(name) {
        return true;
    }
    name.split_whitespace()
        .last()
        .map(|token| token != name && regex.is_match(token))
        .unwrap_or(false)
}

fn contains_ignore_case(list: &[String], value: &str) -> bool {
    list.iter().any(|item| item.eq_ignore_ascii_case(value))
}

impl DefinitionFilter {
    pub fn new(options: FilterOptions) -> Self {
        let name_pattern = match options.name_pattern.as_deref() {
            None => NamePattern::Unset,
            Some(pattern) => match compile(pattern) {
                Ok(regex) => NamePattern::Valid(regex),
                Err(e) => {
                    warn!("{}; no definitions will match the name pattern", e);
                    NamePattern::Invalid
                }
            },
        };

        let exclude_name_pattern = match options.exclude_name_pattern.as_deref() {
            None => None,
            Some(pattern) => match compile(pattern) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    warn!("{}; name exclusion is skipped", e);
                    None
                }
            },
        };

        Self {
            options,
            name_pattern,
            exclude_name_pattern,
        }
    }

    fn is_name_excluded(&self, name: &str) -> bool {
        self.exclude_name_pattern
            .as_ref()
            .map(|regex| name_matches(regex, name))
            .unwrap_or(false)
    }

    /// Evaluate the predicate for a single definition, ignoring ancestry
    pub fn matches(&self, def: &Definition) -> bool {
        let opts = &self.options;
        let kind = def.kind.as_str();

        if !opts.include_types.is_empty() && !contains_ignore_case(&opts.include_types, kind) {
            return false;
        }
        if contains_ignore_case(&opts.exclude_types, kind) {
            return false;
        }

        if !opts.include_modifiers.is_empty()
            && !def.modifier_tokens().any(|token| opts.include_modifiers.iter().any(|m| m == token))
        {
            return false;
        }
        if def.modifier_tokens().any(|token| opts.exclude_modifiers.iter().any(|m| m == token)) {
            return false;
        }

        match &self.name_pattern {
            NamePattern::Unset => {}
            NamePattern::Valid(regex) => {
                if !name_matches(regex, &def.name) {
                    return false;
                }
            }
            NamePattern::Invalid => return false,
        }
        if self.is_name_excluded(&def.name) {
            return false;
        }

        if opts.min_complexity.map_or(false, |min| def.complexity < min)
            || opts.max_complexity.map_or(false, |max| def.complexity > max)
        {
            return false;
        }
        if opts.min_parameters.map_or(false, |min| def.parameter_count < min)
            || opts.max_parameters.map_or(false, |max| def.parameter_count > max)
        {
            return false;
        }

        true
    }

    /// Filter one file's linked definitions, keeping the ancestors of every
    /// survivor so the result stays a well-formed forest.
    ///
    /// Error and metadata entries are always kept. The input is not modified.
    pub fn apply(&self, definitions: &[Definition]) -> Vec<Definition> {
        let (passthrough, candidates): (Vec<&Definition>, Vec<&Definition>) =
            definitions.iter().partition(|d| d.kind.is_passthrough());

        let by_id: HashMap<usize, &Definition> = candidates.iter().map(|d| (d.id, *d)).collect();

        let mut survivors: HashSet<usize> = candidates
            .iter()
            .filter(|d| self.matches(d))
            .map(|d| d.id)
            .collect();

        // Ancestor closure over the pre-filter links
        let basic: Vec<usize> = survivors.iter().copied().collect();
        for id in basic {
            let mut parent_id = by_id.get(&id).and_then(|d| d.parent_id);
            while let Some(pid) = parent_id {
                let Some(parent) = by_id.get(&pid) else {
                    break;
                };
                if self.is_name_excluded(&parent.name) {
                    break;
                }
                if !survivors.insert(pid) {
                    // Already present: its own ancestors are handled on its path
                    break;
                }
                parent_id = parent.parent_id;
            }
        }

        let mut result: Vec<Definition> = candidates
            .iter()
            .filter(|d| survivors.contains(&d.id))
            .map(|d| {
                let mut def = (*d).clone();
                def.children.retain(|child| survivors.contains(child));
                if def.parent_id.map_or(false, |pid| !survivors.contains(&pid)) {
                    def.parent_id = None;
                }
                def
            })
            .collect();

        result.extend(passthrough.into_iter().cloned());
        result.sort_by_key(|d| d.start_line);
        result
    }
}
