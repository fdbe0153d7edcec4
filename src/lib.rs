//! Budget categories kept as append-only ledgers, with a text spend chart.

pub mod chart;
pub mod engine;

pub use engine::{Amount, Budget, Category, Transaction};
