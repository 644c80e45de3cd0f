mod cli;

pub(crate) use cli::{as_cli, print_usage};

use crate::models::{SummaryFact, Transaction};
use crate::util::{format_date, format_money, truncate};

const DESCRIPTION_WIDTH: usize = 32;
const CATEGORY_WIDTH: usize = 16;

fn print_transactions(transactions: &[Transaction]) {
    println!(
        "{:<10}  {:<dw$}  {:<cw$}  {:>14}",
        "Date",
        "Description",
        "Category",
        "Amount",
        dw = DESCRIPTION_WIDTH,
        cw = CATEGORY_WIDTH,
    );
    println!("{}", "─".repeat(10 + DESCRIPTION_WIDTH + CATEGORY_WIDTH + 14 + 6));
    for txn in transactions {
        println!(
            "{:<10}  {:<dw$}  {:<cw$}  {:>14}",
            format_date(txn.date, "%d/%m/%Y"),
            truncate(&txn.description, DESCRIPTION_WIDTH),
            truncate(&txn.categ, CATEGORY_WIDTH),
            format_money(txn.amount),
            dw = DESCRIPTION_WIDTH,
            cw = CATEGORY_WIDTH,
        );
    }
}

fn print_facts(facts: &[SummaryFact]) {
    let width = facts.iter().map(|f| f.name.chars().count()).max().unwrap_or(0);
    for fact in facts {
        println!("{:>width$}  {}", fact.name, fact.value);
    }
}
