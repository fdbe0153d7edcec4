use crate::engine::{Amount, Transaction};
use std::fmt;
use thiserror::Error;

const TITLE_MARKER: char = '*';
const TITLE_MARKER_COUNT: usize = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    #[error("Insufficient funds in '{category}': requested {requested}, available {available}")]
    InsufficientFunds {
        category: String,
        requested: Amount,
        available: Amount,
    },
}

/// Budget category with an append-only ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    ledger: Vec<Transaction>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Category {
            name: name.into(),
            ledger: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ledger(&self) -> &[Transaction] {
        &self.ledger
    }

    /// Deposits are never validated, negative or zero amounts included.
    pub fn deposit(&mut self, amount: Amount, description: impl Into<String>) {
        let transaction = Transaction::new(amount, description);
        log::debug!("Deposit into '{}': {transaction:?}", self.name);
        self.ledger.push(transaction);
    }

    pub fn withdraw(
        &mut self,
        amount: Amount,
        description: impl Into<String>,
    ) -> Result<(), CategoryError> {
        if !self.check_funds(amount) {
            return Err(self.insufficient_funds(amount));
        }

        let transaction = Transaction::new(-amount, description);
        log::debug!("Withdrawal from '{}': {transaction:?}", self.name);
        self.ledger.push(transaction);
        Ok(())
    }

    pub fn check_funds(&self, amount: Amount) -> bool {
        self.balance() >= amount
    }

    pub fn balance(&self) -> Amount {
        self.ledger.iter().map(|tx| tx.amount).sum()
    }

    /// Moves `amount` to `other`. Funds are checked once up front; after that
    /// both legs always land.
    pub fn transfer(&mut self, amount: Amount, other: &mut Category) -> Result<(), CategoryError> {
        if !self.check_funds(amount) {
            return Err(self.insufficient_funds(amount));
        }

        self.withdraw(amount, format!("Transfer to {}", other.name))?;
        other.deposit(amount, format!("Transfer from {}", self.name));
        Ok(())
    }

    /// Sum of the negative entries. Zero or negative, never a magnitude.
    pub fn withdrawals(&self) -> Amount {
        self.ledger
            .iter()
            .filter(|tx| tx.is_withdrawal())
            .map(|tx| tx.amount)
            .sum()
    }

    fn insufficient_funds(&self, requested: Amount) -> CategoryError {
        let available = self.balance();
        log::debug!(
            "Rejected debit of {requested} from '{}', balance is {available}",
            self.name
        );
        CategoryError::InsufficientFunds {
            category: self.name.clone(),
            requested,
            available,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame: String = std::iter::repeat_n(TITLE_MARKER, TITLE_MARKER_COUNT).collect();
        let width = 2 * TITLE_MARKER_COUNT + self.name.chars().count();

        writeln!(f, "{frame}{}{frame}", self.name)?;
        for tx in &self.ledger {
            let amount = tx.amount.to_string();
            let used = tx.description.chars().count() + amount.chars().count();
            let padding = width.saturating_sub(used);
            writeln!(f, "{}{:padding$}{amount}", tx.description, "")?;
        }
        write!(f, "Total: {}", self.balance())
    }
}
