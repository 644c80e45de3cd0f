mod filter;
mod summary;
mod transaction;

pub use filter::{Filter, Query};
pub use summary::SummaryFact;
pub use transaction::Transaction;
