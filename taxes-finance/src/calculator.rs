//! Tax calculator: one pass over the combined statement records, summing
//! each category and folding the subtotals into income and deductions.

use std::io::{self, Write};

use log::debug;
use serde::Serialize;
use taxes_core::{Currency, Money, TransactionRecord};
use thiserror::Error;

use crate::category_rules::{Bucket, Category, classify};
use crate::report::write_breakdown;

#[derive(Debug, Error)]
pub enum CalculationError {
    #[error(
        "{} transaction from {} has no Amount",
        .category.label(),
        .payee.as_deref().unwrap_or("unknown payee")
    )]
    MissingAmount {
        category: Category,
        payee: Option<String>,
    },

    #[error("writing breakdown: {0}")]
    Output(#[from] io::Error),
}

/// Running subtotal per category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryTotals {
    pub microsync_income: Money,
    pub taxii_income: Money,
    pub digitalocean_costs: Money,
    pub aws_costs: Money,
}

impl CategoryTotals {
    pub fn new(currency: Currency) -> Self {
        Self {
            microsync_income: Money::zero(currency),
            taxii_income: Money::zero(currency),
            digitalocean_costs: Money::zero(currency),
            aws_costs: Money::zero(currency),
        }
    }

    pub fn get(&self, category: Category) -> Money {
        match category {
            Category::MicroSyncIncome => self.microsync_income,
            Category::TaxiiIncome => self.taxii_income,
            Category::DigitalOceanCosts => self.digitalocean_costs,
            Category::AwsCosts => self.aws_costs,
        }
    }

    fn slot_mut(&mut self, category: Category) -> &mut Money {
        match category {
            Category::MicroSyncIncome => &mut self.microsync_income,
            Category::TaxiiIncome => &mut self.taxii_income,
            Category::DigitalOceanCosts => &mut self.digitalocean_costs,
            Category::AwsCosts => &mut self.aws_costs,
        }
    }

    /// Add a statement amount, applying the category's sign
    pub fn add(&mut self, category: Category, amount: Money) {
        *self.slot_mut(category) += amount * category.sign();
    }

    fn bucket_sum(&self, bucket: Bucket) -> Money {
        Category::ALL
            .iter()
            .filter(|c| c.bucket() == bucket)
            .map(|c| self.get(*c))
            .sum()
    }

    pub fn income(&self) -> Money {
        self.bucket_sum(Bucket::Income)
    }

    pub fn deductions(&self) -> Money {
        self.bucket_sum(Bucket::Deduction)
    }
}

impl Default for CategoryTotals {
    fn default() -> Self {
        Self::new(Currency::Nzd)
    }
}

/// Result of a calculation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxSummary {
    pub totals: CategoryTotals,
    pub scanned: usize,
    pub matched: usize,
    /// Records without a memo
    pub skipped: usize,
}

impl TaxSummary {
    pub fn income(&self) -> Money {
        self.totals.income()
    }

    pub fn deductions(&self) -> Money {
        self.totals.deductions()
    }

    /// Taxable total: income less deductions
    pub fn total(&self) -> Money {
        self.income() - self.deductions()
    }
}

/// Fold the records into category subtotals.
pub fn summarize(records: &[TransactionRecord]) -> Result<TaxSummary, CalculationError> {
    let mut totals = CategoryTotals::default();
    let mut matched = 0;
    let mut skipped = 0;

    for record in records {
        if record.memo().is_none() {
            skipped += 1;
            continue;
        }
        let Some(category) = classify(record) else {
            continue;
        };

        let amount = record.amount().ok_or_else(|| CalculationError::MissingAmount {
            category,
            payee: record.payee().map(str::to_string),
        })?;
        debug!("{:?}: {} ({})", category, amount, record.memo().unwrap_or(""));

        totals.add(category, amount);
        matched += 1;
    }

    debug!(
        "scanned {} records: {} matched, {} without memo",
        records.len(),
        matched,
        skipped
    );

    Ok(TaxSummary {
        totals,
        scanned: records.len(),
        matched,
        skipped,
    })
}

/// Compute `(income, deductions)` for the combined records. When `verbose`,
/// the category breakdown is written to `out` first.
pub fn compute_taxes<W: Write>(
    records: &[TransactionRecord],
    verbose: bool,
    out: &mut W,
) -> Result<(Money, Money), CalculationError> {
    let summary = summarize(records)?;
    if verbose {
        write_breakdown(out, &summary.totals)?;
    }
    Ok((summary.income(), summary.deductions()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use taxes_core::Cell;

    fn txn(payee: &str, memo: Option<&str>, amount: Option<Money>) -> TransactionRecord {
        let mut r = TransactionRecord::with_keys(["Payee", "Memo", "Amount"]);
        r.set("Payee", Some(Cell::Text(payee.to_string())));
        r.set("Memo", memo.map(|m| Cell::Text(m.to_string())));
        r.set("Amount", amount.map(Cell::Amount));
        r
    }

    fn nzd(amount: rust_decimal::Decimal) -> Option<Money> {
        Some(Money::nzd(amount))
    }

    fn scenario() -> Vec<TransactionRecord> {
        vec![
            txn("D/C FROM Stripe Payments", Some("note"), nzd(dec!(100.00))),
            txn("SOME VENDOR", Some("DIGITALOCEAN charge"), nzd(dec!(-5.00))),
            txn("D/C FROM Google Payment co", Some("note"), nzd(dec!(20.00))),
            txn("SOME VENDOR", Some("AMAZON MKTPL ACE PMTS AMAZON.COM"), nzd(dec!(-3.00))),
        ]
    }

    #[test]
    fn test_scenario_totals() {
        let summary = summarize(&scenario()).unwrap();
        assert_eq!(summary.income(), Money::nzd(dec!(120.00)));
        assert_eq!(summary.deductions(), Money::nzd(dec!(8.00)));
        assert_eq!(summary.total(), Money::nzd(dec!(112.00)));
        assert_eq!(summary.matched, 4);
    }

    #[test]
    fn test_first_match_wins() {
        let records = vec![txn(
            "D/C FROM Stripe Payments",
            Some("DIGITALOCEAN"),
            nzd(dec!(50.00)),
        )];
        let totals = summarize(&records).unwrap().totals;
        assert_eq!(totals.microsync_income, Money::nzd(dec!(50.00)));
        assert!(totals.digitalocean_costs.is_zero());
    }

    #[test]
    fn test_costs_flip_sign() {
        let records = vec![
            txn("SOME VENDOR", Some("DIGITALOCEAN"), nzd(dec!(-42.50))),
            txn("SOME VENDOR", Some("AMAZON MKTPL ACE PMTS AMAZON.COM"), nzd(dec!(-42.50))),
        ];
        let totals = summarize(&records).unwrap().totals;
        assert_eq!(totals.digitalocean_costs, Money::nzd(dec!(42.50)));
        assert_eq!(totals.aws_costs, Money::nzd(dec!(42.50)));
    }

    #[test]
    fn test_absent_memo_contributes_nothing() {
        let records = vec![
            txn("D/C FROM Stripe Payments", None, nzd(dec!(999.00))),
            txn("D/C FROM Google Payment", None, nzd(dec!(999.00))),
        ];
        let summary = summarize(&records).unwrap();
        assert_eq!(summary.totals, CategoryTotals::default());
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.matched, 0);
    }

    #[test]
    fn test_unmatched_records_ignored() {
        let records = vec![txn("LOCAL CAFE", Some("FLAT WHITE"), nzd(dec!(-5.50)))];
        let summary = summarize(&records).unwrap();
        assert!(summary.total().is_zero());
        assert_eq!(summary.scanned, 1);
    }

    #[test]
    fn test_totals_decompose() {
        let mut records = scenario();
        records.extend(scenario());
        records.push(txn("SOME VENDOR", Some("DIGITALOCEAN"), nzd(dec!(-0.01))));
        let t = summarize(&records).unwrap().totals;
        assert_eq!(t.income(), t.microsync_income + t.taxii_income);
        assert_eq!(t.deductions(), t.digitalocean_costs + t.aws_costs);
    }

    #[test]
    fn test_no_float_drift() {
        let records: Vec<_> = (0..100)
            .map(|_| txn("D/C FROM Stripe Payments", Some("note"), nzd(dec!(0.10))))
            .collect();
        let summary = summarize(&records).unwrap();
        assert_eq!(summary.income().amount(), dec!(10.00));
    }

    #[test]
    fn test_matched_record_without_amount_fails() {
        let records = vec![txn("D/C FROM Stripe Payments", Some("note"), None)];
        let err = summarize(&records).unwrap_err();
        assert!(matches!(
            err,
            CalculationError::MissingAmount {
                category: Category::MicroSyncIncome,
                ..
            }
        ));
    }

    #[test]
    fn test_unmatched_record_without_amount_is_fine() {
        let records = vec![txn("LOCAL CAFE", Some("note"), None)];
        assert!(summarize(&records).is_ok());
    }

    #[test]
    fn test_compute_taxes_quiet() {
        let mut out = Vec::new();
        let (income, deductions) = compute_taxes(&scenario(), false, &mut out).unwrap();
        assert_eq!(income, Money::nzd(dec!(120.00)));
        assert_eq!(deductions, Money::nzd(dec!(8.00)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_compute_taxes_verbose_writes_breakdown() {
        let mut out = Vec::new();
        compute_taxes(&scenario(), true, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "MicroSync Income: $100.00\n\
             Taxii Income: $20.00\n\
             DigitalOcean Costs: $5.00\n\
             AWS Costs: $3.00\n\
             ---------------------------------------\n"
        );
    }
}
