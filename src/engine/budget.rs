use crate::engine::category::CategoryError;
use crate::engine::{Amount, Category};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BudgetError {
    #[error("Category operation failed: {0}")]
    Category(#[from] CategoryError),
}

/// A single budget mutation, decoded from an input record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Open {
        category: String,
    },
    Deposit {
        category: String,
        amount: Amount,
        description: String,
    },
    Withdraw {
        category: String,
        amount: Amount,
        description: String,
    },
    Transfer {
        from: String,
        to: String,
        amount: Amount,
    },
}

/// Categories in the order they were first referenced.
#[derive(Debug, Default)]
pub struct Budget {
    categories: Vec<Category>,
    index: HashMap<String, usize>,
}

impl Budget {
    pub fn new() -> Self {
        Budget::default()
    }

    /// Returns the position of `name`, creating an empty category on first use.
    pub fn open(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }

        log::debug!("Opening category '{name}'");
        let idx = self.categories.len();
        self.categories.push(Category::new(name));
        self.index.insert(name.to_owned(), idx);
        idx
    }

    pub fn apply(&mut self, op: &Operation) -> Result<(), BudgetError> {
        match op {
            Operation::Open { category } => {
                self.open(category);
            }
            Operation::Deposit {
                category,
                amount,
                description,
            } => {
                let idx = self.open(category);
                self.categories[idx].deposit(*amount, description.as_str());
            }
            Operation::Withdraw {
                category,
                amount,
                description,
            } => {
                let idx = self.open(category);
                self.categories[idx].withdraw(*amount, description.as_str())?;
            }
            Operation::Transfer { from, to, amount } => self.transfer(from, to, *amount)?,
        }

        Ok(())
    }

    fn transfer(&mut self, from: &str, to: &str, amount: Amount) -> Result<(), CategoryError> {
        let src = self.open(from);
        let dst = self.open(to);

        if src == dst {
            // Both legs land in the same ledger
            let category = &mut self.categories[src];
            category.withdraw(amount, format!("Transfer to {from}"))?;
            category.deposit(amount, format!("Transfer from {from}"));
            return Ok(());
        }

        let (source, destination) = if src < dst {
            let (left, right) = self.categories.split_at_mut(dst);
            (&mut left[src], &mut right[0])
        } else {
            let (left, right) = self.categories.split_at_mut(src);
            (&mut right[0], &mut left[dst])
        };
        source.transfer(amount, destination)
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.index.get(name).map(|&idx| &self.categories[idx])
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }
}

#[cfg(test)]
mod tests {
    use super::{Budget, BudgetError, Operation};
    use crate::engine::Amount;
    use crate::engine::category::CategoryError;

    fn deposit(category: &str, amount: i64) -> Operation {
        Operation::Deposit {
            category: category.into(),
            amount: Amount::from(amount),
            description: "initial".into(),
        }
    }

    fn transfer(from: &str, to: &str, amount: i64) -> Operation {
        Operation::Transfer {
            from: from.into(),
            to: to.into(),
            amount: Amount::from(amount),
        }
    }

    #[test]
    fn test_that_categories_keep_first_reference_order() {
        let mut budget = Budget::new();
        budget.apply(&deposit("Food", 10)).unwrap();
        budget
            .apply(&Operation::Open {
                category: "Auto".into(),
            })
            .unwrap();
        budget.apply(&deposit("Food", 5)).unwrap();
        budget.apply(&transfer("Food", "Clothing", 1)).unwrap();

        let names: Vec<&str> = budget.categories().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["Food", "Auto", "Clothing"]);
        assert_eq!(budget.category("Food").unwrap().balance(), Amount::from(14));
        assert!(budget.category("Missing").is_none());
    }

    #[test]
    fn test_that_rejected_withdrawal_is_reported() {
        let mut budget = Budget::new();
        let res = budget.apply(&Operation::Withdraw {
            category: "Food".into(),
            amount: Amount::from(1),
            description: "".into(),
        });

        assert!(matches!(
            res,
            Err(BudgetError::Category(CategoryError::InsufficientFunds { .. }))
        ));
        assert!(budget.category("Food").unwrap().ledger().is_empty());
    }

    #[test]
    fn test_that_transfer_works_in_both_directions() {
        let mut budget = Budget::new();
        budget.apply(&deposit("Food", 100)).unwrap();
        budget.apply(&deposit("Clothing", 50)).unwrap();

        budget.apply(&transfer("Clothing", "Food", 20)).unwrap();
        budget.apply(&transfer("Food", "Clothing", 70)).unwrap();

        assert_eq!(budget.category("Food").unwrap().balance(), Amount::from(50));
        assert_eq!(
            budget.category("Clothing").unwrap().balance(),
            Amount::from(100)
        );
        assert!(budget.apply(&transfer("Food", "Clothing", 51)).is_err());
    }

    #[test]
    fn test_that_self_transfer_appends_both_legs() {
        let mut budget = Budget::new();
        budget.apply(&deposit("Food", 100)).unwrap();
        budget.apply(&transfer("Food", "Food", 40)).unwrap();

        let food = budget.category("Food").unwrap();
        assert_eq!(food.balance(), Amount::from(100));
        assert_eq!(food.ledger().len(), 3);
        assert_eq!(food.withdrawals(), Amount::from(-40));
        assert_eq!(food.ledger()[1].description, "Transfer to Food");
        assert_eq!(food.ledger()[2].description, "Transfer from Food");

        assert!(budget.apply(&transfer("Food", "Food", 101)).is_err());
        assert_eq!(budget.category("Food").unwrap().ledger().len(), 3);
    }
}
