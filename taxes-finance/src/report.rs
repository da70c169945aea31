//! Human and JSON renderings of a calculation run

use std::io::{self, Write};

use serde::Serialize;
use taxes_core::{Currency, Money};

use crate::calculator::{CategoryTotals, TaxSummary};
use crate::category_rules::Category;

const SEPARATOR: &str = "---------------------------------------";

/// Per-category lines followed by a separator
pub fn breakdown_lines(totals: &CategoryTotals) -> Vec<String> {
    let mut lines: Vec<String> = Category::ALL
        .iter()
        .map(|c| format!("{}: {}", c.label(), totals.get(*c)))
        .collect();
    lines.push(SEPARATOR.to_string());
    lines
}

pub fn write_breakdown<W: Write>(out: &mut W, totals: &CategoryTotals) -> io::Result<()> {
    for line in breakdown_lines(totals) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct RecordCounts {
    pub scanned: usize,
    pub matched: usize,
    pub skipped: usize,
}

/// Machine-readable summary
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub currency: &'static str,
    pub income: Money,
    pub deductions: Money,
    pub total: Money,
    pub categories: CategoryTotals,
    pub records: RecordCounts,
}

impl JsonReport {
    pub fn from_summary(summary: &TaxSummary) -> Self {
        Self {
            currency: Currency::Nzd.code(),
            income: summary.income(),
            deductions: summary.deductions(),
            total: summary.total(),
            categories: summary.totals,
            records: RecordCounts {
                scanned: summary.scanned,
                matched: summary.matched,
                skipped: summary.skipped,
            },
        }
    }
}
