//! Extraction of script references from command strings
//!
//! This is not a shell parser. Commands are scanned for a small set of
//! invocation idioms, each described by an [`InvocationRule`]: a literal keyword and
//! whether it is followed by a single script name (`npm run build`) or by optional
//! flags and a run of names (`npm-run-all -s clean build`).

use indexmap::IndexSet;
use log::{debug, warn};
use regex_cache::LazyRegex;
use serde::{Deserialize, Serialize};

use crate::scripts::ResolveError;

/// A bare script name: letters, digits, underscore, hyphen and colon
const NAME: &str = r"[\w:][\w:-]*";
/// A name in a batch list, which may carry wildcards and surrounding quotes
const NAME_PATTERN: &str = r#"["']?[\w:*][\w:*-]*["']?"#;
/// A dash-prefixed option, optionally with an inline `=value`
const FLAG: &str = r"--?[\w-]+(?:=\S*)?";
/// Keywords only match at the start of a word
const WORD_START: &str = r"(?:^|[^\w-])";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Keyword followed by exactly one script name
    Single,
    /// Keyword followed by flags and any number of script names or patterns
    Batch,
}

/// One recognised way of invoking other scripts from a command
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InvocationRule {
    pub keyword: String,
    pub kind: RuleKind,
}

impl InvocationRule {
    #[must_use]
    pub fn single(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            kind: RuleKind::Single,
        }
    }

    #[must_use]
    pub fn batch(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            kind: RuleKind::Batch,
        }
    }

    /// Regex source for this rule. Capture group 1 holds the referenced name(s).
    #[must_use]
    pub fn pattern(&self) -> String {
        let keyword = self
            .keyword
            .split_whitespace()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(r"\s+");
        match self.kind {
            RuleKind::Single => {
                format!(r"(?i){WORD_START}{keyword}(?:\s+{FLAG})*\s+({NAME})")
            }
            RuleKind::Batch => {
                format!(r"(?i){WORD_START}{keyword}(?:\s+{FLAG})*((?:\s+{NAME_PATTERN})+)")
            }
        }
    }
}

/// Rules recognised out of the box: `npm run` and npm-run-all with its shorthands
#[must_use]
pub fn default_rules() -> Vec<InvocationRule> {
    vec![
        InvocationRule::single("npm run"),
        InvocationRule::batch("npm-run-all"),
        InvocationRule::batch("run-s"),
        InvocationRule::batch("run-p"),
    ]
}

#[derive(Debug, Clone)]
struct CompiledRule {
    kind: RuleKind,
    regex: LazyRegex,
}

/// Compiled rule set that pulls referenced script names out of commands
#[derive(Debug, Clone)]
pub struct Extractor {
    rules: Vec<CompiledRule>,
}

impl Extractor {
    /// Compile a rule set. Rules with a blank keyword are skipped.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::Rule` if a rule does not compile to a valid regex.
    pub fn new(rules: &[InvocationRule]) -> Result<Self, ResolveError> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            if rule.keyword.trim().is_empty() {
                warn!("Ignoring invocation rule with an empty keyword");
                continue;
            }
            let pattern = rule.pattern();
            let regex = LazyRegex::new(&pattern)
                .map_err(|source| ResolveError::Rule { source, pattern })?;
            compiled.push(CompiledRule {
                kind: rule.kind,
                regex,
            });
        }
        Ok(Self { rules: compiled })
    }

    /// Referenced names in `command`, deduplicated in first-seen order.
    ///
    /// All single-name matches come before batch matches. Names are not checked
    /// against the script map here and may still contain wildcards.
    #[must_use]
    pub fn extract(&self, command: &str) -> Vec<String> {
        let mut names = IndexSet::new();
        for kind in [RuleKind::Single, RuleKind::Batch] {
            for rule in self.rules.iter().filter(|r| r.kind == kind) {
                for captures in rule.regex.captures_iter(command) {
                    let Some(found) = captures.get(1) else {
                        continue;
                    };
                    match kind {
                        RuleKind::Single => {
                            names.insert(found.as_str().to_string());
                        }
                        RuleKind::Batch => {
                            names.extend(split_names(found.as_str()));
                        }
                    }
                }
            }
        }
        if !names.is_empty() {
            debug!("Extracted {names:?} from `{command}`");
        }
        names.into_iter().collect()
    }
}

fn split_names(run: &str) -> impl Iterator<Item = String> + '_ {
    run.split_whitespace()
        .map(|token| token.trim_matches(|c| c == '"' || c == '\''))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
