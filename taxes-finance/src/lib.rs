//! taxes-finance: category rules, tax calculator, and breakdown reports

pub mod calculator;
pub mod category_rules;
pub mod report;

pub use calculator::{CalculationError, CategoryTotals, TaxSummary, compute_taxes, summarize};
pub use category_rules::{Category, classify};
pub use report::{JsonReport, write_breakdown};
