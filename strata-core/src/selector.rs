//! File selection: decides which documents take part in a render run.
//!
//! Rules, in order:
//! 1. With a `pattern`, the path must be selected by the pattern list.
//!    Entries apply left to right: a matching glob selects the path, a
//!    matching `!glob` deselects it. `*`, `?` and `**` never cross a `/`
//!    and never match a path segment that starts with `.`; dotfiles are
//!    only selected by a pattern that spells the dot out (`.htaccess`,
//!    `**/.*`).
//! 2. Outside in-place mode the document must resolve a layout name
//!    (its own `template` attribute, else the configured default).
//! 3. Otherwise the document is rendered.

use glob::{MatchOptions, Pattern};

use crate::config::PluginConfig;
use crate::error::ConfigError;
use crate::types::Document;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

#[derive(Debug, Clone)]
struct Rule {
    negated: bool,
    pattern: Pattern,
}

/// Compiled selection predicate for one [`PluginConfig`].
#[derive(Debug, Clone)]
pub struct Selector {
    rules: Option<Vec<Rule>>,
    in_place: bool,
    default_template: Option<String>,
}

impl Selector {
    /// Compile the configured patterns. Invalid globs are a config error.
    pub fn compile(config: &PluginConfig) -> Result<Self, ConfigError> {
        let rules = match &config.pattern {
            None => None,
            Some(spec) => Some(
                spec.entries()
                    .iter()
                    .map(|entry| compile_rule(entry))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        };
        Ok(Self {
            rules,
            in_place: config.in_place,
            default_template: config
                .default_template
                .clone()
                .filter(|name| !name.is_empty()),
        })
    }

    /// Whether `path` passes the pattern rule (always true without patterns).
    pub fn matches_path(&self, path: &str) -> bool {
        let Some(rules) = &self.rules else {
            return true;
        };
        let mut selected = false;
        for rule in rules {
            if rule.pattern.matches_with(path, MATCH_OPTIONS) {
                selected = !rule.negated;
            }
        }
        selected
    }

    /// The layout a document would start rendering through, if any.
    pub fn layout_for<'a>(&'a self, document: &'a Document) -> Option<&'a str> {
        document.template().or(self.default_template.as_deref())
    }

    /// Pure predicate: should `document` at `path` be rendered?
    pub fn should_render(&self, path: &str, document: &Document) -> bool {
        if !self.matches_path(path) {
            return false;
        }
        if !self.in_place && self.layout_for(document).is_none() {
            return false;
        }
        true
    }
}

fn compile_rule(entry: &str) -> Result<Rule, ConfigError> {
    let (negated, glob) = match entry.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, entry),
    };
    let pattern = Pattern::new(glob).map_err(|source| ConfigError::InvalidPattern {
        pattern: entry.to_string(),
        source,
    })?;
    Ok(Rule { negated, pattern })
}
