//! Parse bank statement CSV exports into transaction records.
//!
//! NZ bank exports open with a few lines of account metadata, then the
//! column header, then a blank line, then the transactions:
//!
//! ```text
//! Bank 12; Branch 3011; Account 0123456-50 (Streamline)
//! Date,Unique Id,Tran Type,Cheque Number,Payee,Memo,Amount
//!
//! 2020/04/01,2020040101,D/C,,"D/C FROM Stripe Payments","STRIPE",100.00
//! ```
//!
//! The header is the last line before the first blank line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::StringRecord;
use log::{debug, warn};
use taxes_core::record::AMOUNT;
use taxes_core::{Cell, Currency, Money, TransactionRecord};

use crate::error::StatementError;

/// Read one statement file.
pub fn read_bank_statement(
    path: impl AsRef<Path>,
) -> Result<Vec<TransactionRecord>, StatementError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| StatementError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_statement(BufReader::new(file))?;
    debug!("read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse a statement from any buffered source.
pub fn read_statement<R: BufRead>(
    mut reader: R,
) -> Result<Vec<TransactionRecord>, StatementError> {
    let mut header: Option<String> = None;
    let mut line = String::new();
    let mut lines_before_data: u64 = 0;

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            warn!(
                "no blank line after the header (last line read: {:?}); \
                 statement has no transactions",
                header.as_deref().unwrap_or("")
            );
            return Ok(Vec::new());
        }
        lines_before_data += 1;

        let row = line.trim_end_matches(['\r', '\n']);
        if row.is_empty() {
            break;
        }
        header = Some(row.to_string());
    }

    let keys = match header {
        Some(h) => parse_header(&h)?,
        None => Vec::new(),
    };
    debug!("statement columns: {:?}", keys);

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        if row.is_empty() {
            continue;
        }
        let line = lines_before_data + row.position().map(|p| p.line()).unwrap_or(0);
        records.push(build_record(&keys, &row, line)?);
    }

    Ok(records)
}

fn parse_header(text: &str) -> Result<Vec<String>, StatementError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    match rdr.records().next() {
        Some(row) => Ok(row?.iter().map(str::to_string).collect()),
        None => Ok(Vec::new()),
    }
}

fn build_record(
    keys: &[String],
    row: &StringRecord,
    line: u64,
) -> Result<TransactionRecord, StatementError> {
    if row.len() > keys.len() {
        return Err(StatementError::RowTooLong {
            line,
            cells: row.len(),
            columns: keys.len(),
        });
    }

    let mut record = TransactionRecord::with_keys(keys.iter().cloned());
    for (key, text) in keys.iter().zip(row.iter()) {
        // Amount is always converted, so a blank amount is a parse error
        let cell = if key == AMOUNT {
            let money = Money::parse(text, Currency::Nzd).map_err(|source| {
                StatementError::MonetaryParse {
                    line,
                    text: text.to_string(),
                    source,
                }
            })?;
            Cell::Amount(money)
        } else if text.is_empty() {
            continue;
        } else {
            Cell::Text(text.to_string())
        };
        record.set(key.as_str(), Some(cell));
    }

    Ok(record)
}
