use crate::engine::Amount;

/// One ledger entry. Deposits carry a positive amount, withdrawals and
/// outgoing transfers a negative one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub amount: Amount,
    pub description: String,
}

impl Transaction {
    pub fn new(amount: Amount, description: impl Into<String>) -> Self {
        Transaction {
            amount,
            description: description.into(),
        }
    }

    pub fn is_withdrawal(&self) -> bool {
        self.amount.is_negative()
    }
}
