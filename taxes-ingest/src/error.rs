use std::io;
use std::path::PathBuf;

use taxes_core::MoneyParseError;
use thiserror::Error;

/// Reasons a statement could not be turned into records
#[derive(Debug, Error)]
pub enum StatementError {
    #[error("cannot open {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: invalid Amount {text:?}")]
    MonetaryParse {
        line: u64,
        text: String,
        #[source]
        source: MoneyParseError,
    },

    #[error("line {line}: row has {cells} cells but the header has {columns} columns")]
    RowTooLong {
        line: u64,
        cells: usize,
        columns: usize,
    },

    #[error("reading statement: {0}")]
    Io(#[from] io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}
