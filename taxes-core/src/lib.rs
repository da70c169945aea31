//! taxes-core: money and transaction record types shared by the reader and calculator

pub mod money;
pub mod record;

pub use money::{Currency, Money, MoneyParseError};
pub use record::{Cell, TransactionRecord};
