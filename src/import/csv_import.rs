use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::Transaction;

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d.%m.%Y"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CsvProfile {
    pub(crate) date_column: usize,
    pub(crate) description_column: usize,
    pub(crate) category_column: Option<usize>,
    pub(crate) amount_column: usize,
    pub(crate) date_format: String,
}

impl Default for CsvProfile {
    fn default() -> Self {
        Self {
            date_column: 0,
            description_column: 1,
            category_column: Some(2),
            amount_column: 3,
            date_format: "%Y-%m-%d".into(),
        }
    }
}

impl CsvProfile {
    /// Locate columns by header name. Date, description and amount keep their
    /// default position when no header matches. The category column is only
    /// assumed for generic `Column N` headers; named headers without a
    /// category header leave it unset.
    pub(crate) fn from_headers(headers: &[String]) -> Self {
        let h: Vec<String> = headers
            .iter()
            .map(|s| s.to_lowercase().trim().to_string())
            .collect();
        let defaults = Self::default();

        let category_column = if h.iter().any(|s| s.starts_with("column ")) {
            defaults.category_column
        } else {
            col_index(&h, &["category", "categ"])
        };

        Self {
            date_column: col_index(&h, &["date", "posted date", "transaction date"])
                .unwrap_or(defaults.date_column),
            description_column: col_index(&h, &["description", "desc", "memo", "payee"])
                .unwrap_or(defaults.description_column),
            category_column,
            amount_column: col_index(&h, &["amount", "amt", "value"])
                .unwrap_or(defaults.amount_column),
            ..defaults
        }
    }
}

pub(crate) struct CsvImporter;

impl CsvImporter {
    /// Read the CSV and return headers + all rows as strings.
    /// Files without a header row get generic `Column N` names.
    pub(crate) fn preview(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .context("Failed to open CSV file")?;

        let mut all_rows: Vec<Vec<String>> = Vec::new();
        for result in rdr.records() {
            let record = result.context("Failed to read CSV record")?;
            all_rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        if all_rows.is_empty() {
            anyhow::bail!("CSV file is empty");
        }

        // Headers don't parse as dates or numbers
        let first_row = &all_rows[0];
        let looks_like_header = first_row.iter().all(|field| {
            let trimmed = field.trim();
            Decimal::from_str(trimmed.replace(['$', ','], "").trim()).is_err()
                && DATE_FORMATS
                    .iter()
                    .all(|fmt| NaiveDate::parse_from_str(trimmed, fmt).is_err())
        });

        if looks_like_header {
            let headers = all_rows.remove(0);
            Ok((headers, all_rows))
        } else {
            let headers: Vec<String> = (0..first_row.len())
                .map(|i| format!("Column {}", i + 1))
                .collect();
            Ok((headers, all_rows))
        }
    }

    /// Parse rows into Transactions using the given profile.
    /// Rows with an empty date cell are skipped; a row with a date but no
    /// amount fails the whole parse.
    pub(crate) fn parse(rows: &[Vec<String>], profile: &CsvProfile) -> Result<Vec<Transaction>> {
        let mut transactions = Vec::new();

        for (i, row) in rows.iter().enumerate() {
            let date_str = cell(row, Some(profile.date_column));
            if date_str.is_empty() {
                tracing::debug!(row = i + 1, "Skipping row without a date");
                continue;
            }

            let date = parse_date(&date_str, &profile.date_format)
                .with_context(|| format!("Row {}: failed to parse date '{}'", i + 1, date_str))?;

            let amount_str = cell(row, Some(profile.amount_column));
            if amount_str.is_empty() {
                anyhow::bail!("Row {}: missing amount", i + 1);
            }
            let amount = parse_decimal(&amount_str)
                .with_context(|| format!("Row {}: failed to parse amount", i + 1))?;

            transactions.push(Transaction::new(
                date,
                cell(row, Some(profile.description_column)),
                cell(row, profile.category_column),
                amount,
            ));
        }

        Ok(transactions)
    }

    /// Read a whole file: detect the header, map columns, parse every row.
    pub(crate) fn load(path: &Path) -> Result<Vec<Transaction>> {
        let (headers, rows) = Self::preview(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        let profile = CsvProfile::from_headers(&headers);
        tracing::debug!(?headers, ?profile, rows = rows.len(), "CSV mapped");

        let transactions = Self::parse(&rows, &profile)?;
        tracing::info!(
            path = %path.display(),
            transactions = transactions.len(),
            "Loaded transactions"
        );
        Ok(transactions)
    }
}

fn cell(row: &[String], column: Option<usize>) -> String {
    column
        .and_then(|c| row.get(c))
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn col_index(headers: &[String], names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| names.contains(&h.as_str()))
}

fn parse_date(s: &str, fmt: &str) -> Result<NaiveDate> {
    // Try the specified format first
    if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
        return Ok(d);
    }
    for fallback in &DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fallback) {
            return Ok(d);
        }
    }
    anyhow::bail!("Could not parse date: {}", s)
}

fn parse_decimal(s: &str) -> Result<Decimal> {
    let cleaned = s
        .replace(['$', ','], "")
        .replace('(', "-")
        .replace(')', "")
        .trim()
        .to_string();
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_str(&cleaned.replace('"', "")))
        .context(format!("Failed to parse '{}' as decimal", s))
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
