pub mod engine;
pub mod pipeline;
pub mod reader;
pub mod reconcile;
pub mod rules;

pub use crate::domain::model::{
    CreditorComparison, Group, LedgerEntry, LedgerRow, ReadStats, Status, ValidationReport,
    ValidationRules,
};
pub use crate::domain::ports::{Pipeline, Storage};
pub use crate::utils::error::Result;
