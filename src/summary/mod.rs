mod group;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{SummaryFact, Transaction};
use crate::util::{format_date, format_money};

use group::{group_by, largest_group};

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum SummaryError {
    /// The extremal facts need at least one transaction.
    #[error("cannot summarize an empty transaction list")]
    EmptyInput,

    #[error("amounts are too large to total")]
    Overflow,
}

/// Sum amounts without panicking on overflow.
fn checked_total(amounts: impl IntoIterator<Item = Decimal>) -> Result<Decimal, SummaryError> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
        .ok_or(SummaryError::Overflow)
}

/// Compute the fixed-order list of summary facts for `transactions`.
///
/// Order: total count, money in, money out, time span, largest, most
/// frequent, busiest day, then one fact per category by descending absolute
/// total. Returns [`SummaryError::EmptyInput`] when there is nothing to
/// summarize.
pub(crate) fn compute_summary(transactions: &[Transaction]) -> Result<Vec<SummaryFact>, SummaryError> {
    let (Some(first_date), Some(last_date)) = (
        transactions.iter().map(|t| t.date).min(),
        transactions.iter().map(|t| t.date).max(),
    ) else {
        return Err(SummaryError::EmptyInput);
    };

    let money_in = checked_total(
        transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount),
    )?;
    let money_out = checked_total(
        transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount),
    )?;

    let mut facts = vec![
        SummaryFact::new("Total transactions", transactions.len().to_string()),
        SummaryFact::new("Money in", format_money(money_in)),
        SummaryFact::new("Money out", format_money(money_out)),
        SummaryFact::new(
            "Time span",
            format!(
                "{} - {}",
                format_date(first_date, "%m/%Y"),
                format_date(last_date, "%m/%Y")
            ),
        ),
        SummaryFact::new("Largest", largest_transaction(transactions)?),
        SummaryFact::new("Most frequent", most_frequent(transactions)?),
        SummaryFact::new("Busiest day", busiest_day(transactions)?),
    ];
    facts.extend(category_totals(transactions)?);

    tracing::debug!(
        transactions = transactions.len(),
        facts = facts.len(),
        "Summary computed"
    );
    Ok(facts)
}

fn largest_transaction(transactions: &[Transaction]) -> Result<String, SummaryError> {
    let mut largest: Option<&Transaction> = None;
    for txn in transactions {
        if largest.map_or(true, |l| txn.abs_amount() > l.abs_amount()) {
            largest = Some(txn);
        }
    }
    let l = largest.ok_or(SummaryError::EmptyInput)?;

    Ok(format!(
        "{} {} ({})",
        format_money(l.amount),
        l.description,
        format_date(l.date, "%d/%m/%Y")
    ))
}

fn most_frequent(transactions: &[Transaction]) -> Result<String, SummaryError> {
    let groups = group_by(transactions, |t| t.description.clone());
    let (description, members) = largest_group(groups).ok_or(SummaryError::EmptyInput)?;

    let count = members.len();
    let total = checked_total(members.iter().map(|t| t.amount))?;
    let average = total / Decimal::from(count);

    Ok(format!(
        "{count}x {description} (average {})",
        format_money(average)
    ))
}

fn busiest_day(transactions: &[Transaction]) -> Result<String, SummaryError> {
    let expenses = transactions.iter().filter(|t| t.is_expense());
    let groups = group_by(expenses, |t| format_date(t.date, "%d/%m/%Y"));

    let Some((day, members)) = largest_group(groups) else {
        return Ok("No expenses selected".into());
    };

    let sum = checked_total(members.iter().map(|t| t.amount))?;
    let descriptions = members
        .iter()
        .map(|t| t.description.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!(
        "{day}: spent {}x totalling {} on {descriptions}",
        members.len(),
        format_money(sum)
    ))
}

fn category_totals(transactions: &[Transaction]) -> Result<Vec<SummaryFact>, SummaryError> {
    let mut totals: Vec<(String, Decimal)> = group_by(transactions, |t| t.categ.clone())
        .into_iter()
        .map(|(categ, members)| {
            checked_total(members.iter().map(|t| t.amount)).map(|total| (categ, total))
        })
        .collect::<Result<_, SummaryError>>()?;

    // Stable sort keeps first-seen order among equal magnitudes
    totals.sort_by(|a, b| b.1.abs().cmp(&a.1.abs()));

    Ok(totals
        .into_iter()
        .map(|(categ, total)| SummaryFact::new(format!("Category \"{categ}\""), format_money(total)))
        .collect())
}
