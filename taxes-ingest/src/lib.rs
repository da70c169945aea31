//! taxes-ingest: bank statement CSV reader

pub mod error;
pub mod statement;

pub use error::StatementError;
pub use statement::{read_bank_statement, read_statement};
