use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub categ: String,
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(date: NaiveDate, description: String, categ: String, amount: Decimal) -> Self {
        Self {
            date,
            description,
            categ,
            amount,
        }
    }

    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }

    /// Reassign the category. Filters and summaries read `categ` on every
    /// call, so the new value is picked up by the next computation.
    pub fn set_category(&mut self, categ: impl Into<String>) {
        self.categ = categ.into();
    }

    pub fn is_uncategorized(&self) -> bool {
        self.categ.trim().is_empty()
    }
}
