#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;
use std::io::Write;

fn make_csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|s| s.to_string()).collect()
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── parse_decimal ─────────────────────────────────────────────

#[test]
fn test_parse_decimal_basic() {
    assert_eq!(parse_decimal("100.50").unwrap(), dec!(100.50));
    assert_eq!(parse_decimal("-42.99").unwrap(), dec!(-42.99));
}

#[test]
fn test_parse_decimal_with_currency() {
    assert_eq!(parse_decimal("$1,234.56").unwrap(), dec!(1234.56));
    assert_eq!(parse_decimal("-$99.99").unwrap(), dec!(-99.99));
}

#[test]
fn test_parse_decimal_parentheses_negative() {
    assert_eq!(parse_decimal("(500.00)").unwrap(), dec!(-500.00));
}

#[test]
fn test_parse_decimal_empty() {
    assert!(parse_decimal("").is_err());
    assert!(parse_decimal("  ").is_err());
}

#[test]
fn test_parse_decimal_invalid() {
    assert!(parse_decimal("not_a_number").is_err());
}

// ── parse_date ────────────────────────────────────────────────

#[test]
fn test_parse_date_iso_format() {
    assert_eq!(parse_date("2024-01-15", "%Y-%m-%d").unwrap(), ymd(2024, 1, 15));
}

#[test]
fn test_parse_date_day_first_fallback() {
    assert_eq!(parse_date("05/01/2023", "%Y-%m-%d").unwrap(), ymd(2023, 1, 5));
}

#[test]
fn test_parse_date_month_first_fallback() {
    // 15 cannot be a month, so day-first fails and month-first is used
    assert_eq!(parse_date("01/15/2024", "%Y-%m-%d").unwrap(), ymd(2024, 1, 15));
}

#[test]
fn test_parse_date_profile_format_wins() {
    assert_eq!(parse_date("01/02/2024", "%m/%d/%Y").unwrap(), ymd(2024, 1, 2));
}

#[test]
fn test_parse_date_invalid() {
    assert!(parse_date("not-a-date", "%Y-%m-%d").is_err());
    assert!(parse_date("", "%Y-%m-%d").is_err());
}

// ── CsvProfile::from_headers ──────────────────────────────────

#[test]
fn test_profile_from_named_headers() {
    let headers = row(&["Amount", "Memo", "Date", "Category"]);
    let profile = CsvProfile::from_headers(&headers);
    assert_eq!(profile.amount_column, 0);
    assert_eq!(profile.description_column, 1);
    assert_eq!(profile.date_column, 2);
    assert_eq!(profile.category_column, Some(3));
}

#[test]
fn test_profile_without_category_header() {
    let headers = row(&["Date", "Description", "Amount"]);
    let profile = CsvProfile::from_headers(&headers);
    assert_eq!(profile.category_column, None);
    assert_eq!(profile.amount_column, 2);
}

#[test]
fn test_profile_generic_headers_use_defaults() {
    let headers = row(&["Column 1", "Column 2", "Column 3", "Column 4"]);
    assert_eq!(CsvProfile::from_headers(&headers), CsvProfile::default());
}

// ── CsvImporter::preview ──────────────────────────────────────

#[test]
fn test_preview_with_headers() {
    let csv = "Date,Description,Category,Amount\n2023-01-05,Salary,income,2000\n";
    let file = make_csv_file(csv);
    let (headers, rows) = CsvImporter::preview(file.path()).unwrap();
    assert_eq!(headers, vec!["Date", "Description", "Category", "Amount"]);
    assert_eq!(rows.len(), 1);
}

#[test]
fn test_preview_without_headers() {
    let csv = "2023-01-05,Salary,income,2000\n2023-01-10,Rent,housing,-1000\n";
    let file = make_csv_file(csv);
    let (headers, rows) = CsvImporter::preview(file.path()).unwrap();
    assert_eq!(headers[0], "Column 1");
    assert_eq!(rows.len(), 2);
}

#[test]
fn test_preview_empty_file() {
    let file = make_csv_file("");
    assert!(CsvImporter::preview(file.path()).is_err());
}

#[test]
fn test_preview_quoted_fields() {
    let csv = "Date,Description,Amount\n2024-01-15,\"Coffee, Shop\",-4.50\n";
    let file = make_csv_file(csv);
    let (_, rows) = CsvImporter::preview(file.path()).unwrap();
    assert_eq!(rows[0][1], "Coffee, Shop");
}

// ── CsvImporter::parse ────────────────────────────────────────

#[test]
fn test_parse_basic_rows() {
    let rows = vec![
        row(&["2023-01-05", "Salary", "income", "2000"]),
        row(&["2023-01-10", " Rent ", "housing", "-1,000.00"]),
    ];
    let txns = CsvImporter::parse(&rows, &CsvProfile::default()).unwrap();
    assert_eq!(txns.len(), 2);
    assert_eq!(txns[0].date, ymd(2023, 1, 5));
    assert_eq!(txns[0].categ, "income");
    assert_eq!(txns[1].description, "Rent");
    assert_eq!(txns[1].amount, dec!(-1000));
}

#[test]
fn test_parse_skips_empty_dates() {
    let rows = vec![
        row(&["2024-01-15", "Coffee", "food", "-4.50"]),
        row(&["", "", "", ""]),
        row(&["2024-01-16", "Lunch", "food", "-12.00"]),
    ];
    let txns = CsvImporter::parse(&rows, &CsvProfile::default()).unwrap();
    assert_eq!(txns.len(), 2);
}

#[test]
fn test_parse_missing_category_column_is_empty() {
    let profile = CsvProfile {
        category_column: None,
        amount_column: 2,
        ..CsvProfile::default()
    };
    let rows = vec![row(&["2024-01-15", "Coffee", "-4.50"])];
    let txns = CsvImporter::parse(&rows, &profile).unwrap();
    assert_eq!(txns[0].categ, "");
    assert_eq!(txns[0].amount, dec!(-4.50));
}

#[test]
fn test_parse_short_row_missing_amount() {
    let rows = vec![
        row(&["2024-01-15", "Coffee", "food", "-4.50"]),
        row(&["2024-01-16", "Lunch"]),
    ];
    let err = CsvImporter::parse(&rows, &CsvProfile::default()).unwrap_err();
    assert_eq!(err.to_string(), "Row 2: missing amount");
}

#[test]
fn test_parse_blank_amount_cell_is_missing() {
    let rows = vec![row(&["2024-01-15", "Coffee", "food", "  "])];
    let err = CsvImporter::parse(&rows, &CsvProfile::default()).unwrap_err();
    assert_eq!(err.to_string(), "Row 1: missing amount");
}

#[test]
fn test_parse_bad_date_reports_row() {
    let rows = vec![
        row(&["2024-01-15", "Coffee", "food", "-4.50"]),
        row(&["yesterday", "Lunch", "food", "-12.00"]),
    ];
    let err = CsvImporter::parse(&rows, &CsvProfile::default()).unwrap_err();
    assert!(err.to_string().contains("Row 2"));
}

#[test]
fn test_parse_bad_amount_reports_row() {
    let rows = vec![row(&["2024-01-15", "Coffee", "food", "lots"])];
    let err = CsvImporter::parse(&rows, &CsvProfile::default()).unwrap_err();
    assert!(err.to_string().contains("Row 1"));
}

// ── CsvImporter::load ─────────────────────────────────────────

#[test]
fn test_load_full_file() {
    let csv = "\
Date,Description,Category,Amount
2023-01-05,Salary,income,2000
2023-01-10,Rent,housing,-1000
2023-01-15,Coffee,food,-5
";
    let file = make_csv_file(csv);
    let txns = CsvImporter::load(file.path()).unwrap();
    assert_eq!(txns.len(), 3);
    assert_eq!(txns[2].description, "Coffee");
    assert_eq!(txns[2].categ, "food");
    assert_eq!(txns[2].amount, dec!(-5));
}

#[test]
fn test_load_reordered_columns() {
    let csv = "amount,date,memo\n-4.50,15/01/2024,Coffee\n";
    let file = make_csv_file(csv);
    let txns = CsvImporter::load(file.path()).unwrap();
    assert_eq!(txns[0].date, ymd(2024, 1, 15));
    assert_eq!(txns[0].description, "Coffee");
    assert_eq!(txns[0].categ, "");
}

#[test]
fn test_load_headerless_three_columns_fails() {
    // Without headers the default four-column layout applies, so there is
    // no amount cell and the amount must not be read as zero
    let csv = "2023-01-05,Salary,2000\n2023-01-10,Rent,-1000\n";
    let file = make_csv_file(csv);
    let err = CsvImporter::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("Row 1: missing amount"));
}

#[test]
fn test_load_missing_file() {
    assert!(CsvImporter::load(std::path::Path::new("/nonexistent/finscope.csv")).is_err());
}
