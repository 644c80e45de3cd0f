use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::categorize::{suggest_rule, CategoryRule, Categorizer};
use crate::filter::apply_filters;
use crate::import::CsvImporter;
use crate::models::{Filter, Query, Transaction};
use crate::summary::compute_summary;

const MAX_SUGGESTIONS: usize = 3;

pub(crate) fn as_cli(args: &[String]) -> Result<()> {
    match args[1].as_str() {
        "list" | "ls" => cli_list(&args[2..]),
        "summary" | "s" => cli_summary(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("finscope {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

pub(crate) fn print_usage() {
    println!("finscope: filter and summarize personal transactions");
    println!();
    println!("Usage: finscope <command> <file.csv> [options]");
    println!();
    println!("Commands:");
    println!("  list <file.csv>               Print the transactions that pass the filters");
    println!("  summary <file.csv>            Print summary statistics for those transactions");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Options:");
    println!("  --filter <query>              Add an enabled filter (repeatable)");
    println!("  --disabled <query>            Add a filter that is kept but switched off");
    println!("  --rule <pattern>=<category>   Categorize descriptions containing <pattern>");
    println!("  --regex-rule <regex>=<categ>  Categorize descriptions matching <regex>");
    println!("  --recategorize                Let rules replace existing categories");
    println!("  --debug                       Verbose logging on stderr (or set RUST_LOG)");
    println!();
    println!("Query syntax:");
    println!("  word                          Match description or category");
    println!("  desc:a,b  categ:x             Match one field; commas mean OR");
    println!("  y:2023  m:01  d:15            Match the date's year, month, day");
    println!("  amount:>100  amount:<-50      At least 100 / at most -50");
    println!("  !word                         Exclude matches");
}

#[derive(Debug, Default)]
struct CliOptions {
    file: Option<PathBuf>,
    filters: Vec<Filter>,
    rules: Vec<CategoryRule>,
    recategorize: bool,
}

fn parse_options(args: &[String]) -> Result<CliOptions> {
    let mut opts = CliOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--filter" | "-f" | "--disabled" => {
                let raw = iter
                    .next()
                    .with_context(|| format!("{arg} needs a query argument"))?;
                let query = Query::parse(raw);
                if query.is_empty() {
                    tracing::warn!(query = %raw, "Filter has no terms and matches everything");
                }
                let mut filter = Filter::new(format!("#{}", opts.filters.len() + 1), query);
                if arg == "--disabled" {
                    filter.toggle();
                }
                tracing::debug!(%filter, "Parsed filter");
                opts.filters.push(filter);
            }
            "--rule" | "--regex-rule" => {
                let spec = iter
                    .next()
                    .with_context(|| format!("{arg} needs a <pattern>=<category> argument"))?;
                opts.rules
                    .push(CategoryRule::parse(spec, arg == "--regex-rule")?);
            }
            "--recategorize" => opts.recategorize = true,
            "--debug" => {}
            flag if flag.starts_with('-') && flag.len() > 1 => {
                anyhow::bail!("Unknown option: {flag}");
            }
            path => {
                if opts.file.is_some() {
                    anyhow::bail!("Only one input file is supported (got extra '{path}')");
                }
                opts.file = Some(PathBuf::from(shellexpand(path)));
            }
        }
    }

    Ok(opts)
}

/// Load the file, apply categorization rules and return the full list.
fn load_transactions(opts: &CliOptions) -> Result<Vec<Transaction>> {
    let path = opts
        .file
        .as_ref()
        .context("Missing input file. Usage: finscope <command> <file.csv> [options]")?;
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let mut txns = CsvImporter::load(path)?;

    if !opts.rules.is_empty() {
        let (categorizer, bad_patterns) = Categorizer::new(&opts.rules);
        if !bad_patterns.is_empty() {
            eprintln!(
                "Warning: invalid regex rule(s): {}",
                bad_patterns.join(", ")
            );
        }
        let changed = categorizer.categorize_batch(&mut txns, opts.recategorize);
        eprintln!("Categorized {changed}/{} transactions", txns.len());

        let suggestions: Vec<String> = txns
            .iter()
            .filter(|t| t.is_uncategorized())
            .map(|t| suggest_rule(&t.description))
            .fold(Vec::new(), |mut acc, s| {
                if !acc.contains(&s) {
                    acc.push(s);
                }
                acc
            })
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .collect();
        if !suggestions.is_empty() {
            eprintln!(
                "Suggested rules: {}",
                suggestions
                    .iter()
                    .map(|s| format!("--rule \"{s}=<category>\""))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    }

    Ok(txns)
}

/// The last enabled filter on the command line plays the role of the
/// "current" ad-hoc filter; its standalone match count is reported too.
fn current_filter(filters: &[Filter]) -> Option<&Filter> {
    filters.iter().rev().find(|f| f.enabled)
}

fn cli_list(args: &[String]) -> Result<()> {
    let opts = parse_options(args)?;
    let txns = load_transactions(&opts)?;
    let filtered = apply_filters(&txns, &opts.filters);

    super::print_transactions(&filtered);
    println!();
    println!("{} of {} transactions", filtered.len(), txns.len());
    if opts.filters.iter().filter(|f| f.enabled).count() > 1 {
        if let Some(current) = current_filter(&opts.filters) {
            let alone = apply_filters(&txns, std::slice::from_ref(current));
            println!("{} match {} alone", alone.len(), current.query);
        }
    }
    Ok(())
}

fn cli_summary(args: &[String]) -> Result<()> {
    let opts = parse_options(args)?;
    let txns = load_transactions(&opts)?;
    let filtered = apply_filters(&txns, &opts.filters);

    if filtered.is_empty() {
        println!("No transactions selected");
        return Ok(());
    }

    let facts = compute_summary(&filtered)?;
    super::print_facts(&facts);
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
