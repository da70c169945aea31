//! Transaction records as read from a bank statement

use crate::money::Money;
use std::collections::HashMap;

/// Column holding the transaction amount
pub const AMOUNT: &str = "Amount";
/// Column holding the statement memo / particulars
pub const MEMO: &str = "Memo";
/// Column holding the counterparty
pub const PAYEE: &str = "Payee";

/// A single non-empty cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Amount(Money),
}

impl Cell {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.as_str()),
            Cell::Amount(_) => None,
        }
    }

    pub fn as_money(&self) -> Option<Money> {
        match self {
            Cell::Amount(m) => Some(*m),
            Cell::Text(_) => None,
        }
    }
}

/// One statement row keyed by the header of the file it came from.
///
/// Every header key is present in the map; `None` marks an empty cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionRecord {
    fields: HashMap<String, Option<Cell>>,
}

impl TransactionRecord {
    /// A record with every key absent
    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: keys.into_iter().map(|k| (k.into(), None)).collect(),
        }
    }

    /// Store a cell, replacing whatever was there
    pub fn set(&mut self, key: impl Into<String>, value: Option<Cell>) {
        self.fields.insert(key.into(), value);
    }

    /// Cell for `key`, or `None` when the cell is empty or the key unknown
    pub fn get(&self, key: &str) -> Option<&Cell> {
        self.fields.get(key).and_then(|v| v.as_ref())
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Cell::as_text)
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn payee(&self) -> Option<&str> {
        self.text(PAYEE)
    }

    pub fn memo(&self) -> Option<&str> {
        self.text(MEMO)
    }

    pub fn amount(&self) -> Option<Money> {
        self.get(AMOUNT).and_then(Cell::as_money)
    }
}
