mod query;

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{Filter, Query, Transaction};
use crate::util::format_date;

/// Keep the transactions that pass every enabled filter.
///
/// Disabled filters are skipped, so an empty or all-disabled list returns the
/// input unchanged. Malformed terms never cause an error.
pub(crate) fn apply_filters(transactions: &[Transaction], filters: &[Filter]) -> Vec<Transaction> {
    let active: Vec<&Filter> = filters.iter().filter(|f| f.enabled).collect();
    tracing::debug!(
        transactions = transactions.len(),
        filters = filters.len(),
        active = active.len(),
        "Applying filters"
    );

    let filtered: Vec<Transaction> = transactions
        .iter()
        .filter(|t| active.iter().all(|f| f.matches(t)))
        .cloned()
        .collect();

    tracing::debug!(matched = filtered.len(), "Filters applied");
    filtered
}

impl Filter {
    /// A disabled filter matches everything.
    pub fn matches(&self, txn: &Transaction) -> bool {
        !self.enabled || self.query.matches(txn)
    }
}

impl Query {
    /// Test one transaction against every field of this query.
    pub fn matches(&self, txn: &Transaction) -> bool {
        let desc = txn.description.to_lowercase();
        let categ = txn.categ.to_lowercase();

        includes_any(&format!("{desc}{categ}"), &self.text)
            && includes_any(&desc, &self.desc)
            && includes_any(&categ, &self.categ)
            && includes_any(&format_date(txn.date, "%Y"), &self.y)
            && includes_any(&format_date(txn.date, "%m"), &self.m)
            && includes_any(&format_date(txn.date, "%d"), &self.d)
            && amount_matches(txn.amount, &self.amount)
    }
}

/// OR across terms. A `!term` passes when `value` lacks it, a plain term
/// passes when `value` contains it. `value` must already be lower-case.
pub(crate) fn includes_any(value: &str, terms: &[String]) -> bool {
    if terms.is_empty() {
        return true;
    }

    terms.iter().any(|term| {
        let term = term.to_lowercase();
        match term.strip_prefix('!') {
            Some(excluded) => !value.contains(excluded),
            None => value.contains(&term),
        }
    })
}

/// OR across comparison terms. `>x` passes for `amount >= x`, `<x` for
/// `amount <= x`, and any other operator passes. Terms whose number does not
/// parse are skipped.
pub(crate) fn amount_matches(amount: Decimal, terms: &[String]) -> bool {
    if terms.is_empty() {
        return true;
    }

    for term in terms {
        let mut chars = term.chars();
        let Some(op) = chars.next() else {
            continue;
        };
        let Some(value) = parse_threshold(chars.as_str()) else {
            tracing::trace!(term = %term, "Skipping amount term with no number");
            continue;
        };

        let passed = match op {
            '>' => amount >= value,
            '<' => amount <= value,
            _ => true,
        };
        if passed {
            return true;
        }
    }

    false
}

fn parse_threshold(s: &str) -> Option<Decimal> {
    let cleaned = s.replace(['$', ','], "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .ok()
}
