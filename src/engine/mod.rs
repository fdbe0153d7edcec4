mod amount;
mod budget;
mod category;
mod record;
mod transaction;

pub use amount::{Amount, AmountError};
pub use budget::{Budget, BudgetError, Operation};
pub use category::{Category, CategoryError};
pub use record::{InputRecord, RecordError, RecordType};
pub use transaction::Transaction;
