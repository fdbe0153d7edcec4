use serde::Deserialize;
use thiserror::Error;

use crate::engine::{Amount, Operation};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Missing amount for {0:?} record")]
    MissingAmount(RecordType),

    #[error("Missing target category for transfer from '{0}'")]
    MissingTarget(String),
}

/// One row of a budget script: `type,category,amount,description,target`
#[derive(Deserialize, Debug, Clone)]
pub struct InputRecord {
    #[serde(rename = "type")]
    pub typ: RecordType,
    pub category: String,
    pub amount: Option<Amount>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Open,
    Deposit,
    Withdraw,
    Transfer,
}

impl InputRecord {
    pub fn to_operation(&self) -> Result<Operation, RecordError> {
        let amount = || self.amount.ok_or(RecordError::MissingAmount(self.typ));

        let op = match self.typ {
            RecordType::Open => Operation::Open {
                category: self.category.clone(),
            },
            RecordType::Deposit => Operation::Deposit {
                category: self.category.clone(),
                amount: amount()?,
                description: self.description.clone(),
            },
            RecordType::Withdraw => Operation::Withdraw {
                category: self.category.clone(),
                amount: amount()?,
                description: self.description.clone(),
            },
            RecordType::Transfer => Operation::Transfer {
                from: self.category.clone(),
                to: self
                    .target
                    .clone()
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| RecordError::MissingTarget(self.category.clone()))?,
                amount: amount()?,
            },
        };

        Ok(op)
    }
}
