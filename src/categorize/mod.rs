use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

use crate::models::Transaction;

/// Assigns `categ` when a transaction description matches `pattern`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryRule {
    pub(crate) pattern: String,
    pub(crate) category: String,
    pub(crate) is_regex: bool,
}

impl CategoryRule {
    pub(crate) fn new_contains(pattern: String, category: String) -> Self {
        Self {
            pattern,
            category,
            is_regex: false,
        }
    }

    pub(crate) fn new_regex(pattern: String, category: String) -> Self {
        Self {
            pattern,
            category,
            is_regex: true,
        }
    }

    /// Parse a `pattern=category` command-line spec.
    pub(crate) fn parse(spec: &str, is_regex: bool) -> Result<Self> {
        let (pattern, category) = spec
            .rsplit_once('=')
            .with_context(|| format!("Rule '{spec}' must look like <pattern>=<category>"))?;
        let pattern = pattern.trim();
        let category = category.trim();
        if pattern.is_empty() || category.is_empty() {
            anyhow::bail!("Rule '{spec}' needs both a pattern and a category");
        }
        let (pattern, category) = (pattern.to_string(), category.to_string());
        Ok(if is_regex {
            Self::new_regex(pattern, category)
        } else {
            Self::new_contains(pattern, category)
        })
    }
}

pub(crate) struct Categorizer {
    rules: Vec<CompiledRule>,
}

struct CompiledRule {
    pattern: String,
    regex: Option<Regex>,
    category: String,
    is_regex: bool,
}

impl Categorizer {
    /// Compile the rules. Returns the categorizer plus the patterns of any
    /// regex rules that failed to compile; those rules never match.
    pub(crate) fn new(rules: &[CategoryRule]) -> (Self, Vec<String>) {
        let mut bad_patterns = Vec::new();
        let compiled = rules
            .iter()
            .map(|r| {
                let regex = if r.is_regex {
                    let built = RegexBuilder::new(&r.pattern).case_insensitive(true).build();
                    if let Err(e) = &built {
                        tracing::warn!(pattern = %r.pattern, error = %e, "Invalid regex rule");
                        bad_patterns.push(r.pattern.clone());
                    }
                    built.ok()
                } else {
                    None
                };
                CompiledRule {
                    pattern: r.pattern.to_lowercase(),
                    regex,
                    category: r.category.clone(),
                    is_regex: r.is_regex,
                }
            })
            .collect();

        (Self { rules: compiled }, bad_patterns)
    }

    pub(crate) fn categorize(&self, description: &str) -> Option<&str> {
        let desc_lower = description.to_lowercase();

        for rule in &self.rules {
            let matched = if rule.is_regex {
                rule.regex
                    .as_ref()
                    .is_some_and(|re| re.is_match(description))
            } else {
                desc_lower.contains(&rule.pattern)
            };

            if matched {
                return Some(rule.category.as_str());
            }
        }

        None
    }

    /// Assign categories in place. Only uncategorized transactions are
    /// touched unless `overwrite` is set. Returns how many were changed.
    pub(crate) fn categorize_batch(&self, transactions: &mut [Transaction], overwrite: bool) -> usize {
        let mut changed = 0;
        for txn in transactions.iter_mut() {
            if !overwrite && !txn.is_uncategorized() {
                continue;
            }
            if let Some(categ) = self.categorize(&txn.description) {
                if txn.categ != categ {
                    txn.set_category(categ);
                    changed += 1;
                }
            }
        }
        tracing::debug!(changed, total = transactions.len(), "Categorized batch");
        changed
    }
}

/// Suggest a contains-pattern for a description, e.g. for an uncategorized
/// transaction the user may want a rule for.
pub(crate) fn suggest_rule(description: &str) -> String {
    // Extract the most likely merchant/vendor name
    let cleaned = description
        .to_uppercase()
        .replace(|c: char| c.is_ascii_digit(), "")
        .replace('#', "")
        .replace('*', " ")
        .trim()
        .to_string();

    let words: Vec<&str> = cleaned.split_whitespace().collect();
    let pattern = if words.len() >= 2 {
        format!("{} {}", words[0], words[1])
    } else if !words.is_empty() {
        words[0].to_string()
    } else {
        description.to_string()
    };

    pattern.to_lowercase()
}
