//! Deterministic category rules for statement records.
//!
//! Rules are checked top to bottom and the first hit wins, so a Stripe payout
//! whose memo happens to mention DIGITALOCEAN is still income. Order matters.

use taxes_core::TransactionRecord;
use taxes_core::record::{MEMO, PAYEE};

/// The fixed tax buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    MicroSyncIncome,
    TaxiiIncome,
    DigitalOceanCosts,
    AwsCosts,
}

/// Which side of the return a category lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Income,
    Deduction,
}

impl Category {
    /// Display order for breakdowns
    pub const ALL: [Category; 4] = [
        Category::MicroSyncIncome,
        Category::TaxiiIncome,
        Category::DigitalOceanCosts,
        Category::AwsCosts,
    ];

    pub fn bucket(&self) -> Bucket {
        match self {
            Category::MicroSyncIncome | Category::TaxiiIncome => Bucket::Income,
            Category::DigitalOceanCosts | Category::AwsCosts => Bucket::Deduction,
        }
    }

    /// Multiplier applied to the statement amount. Costs arrive as negative
    /// debits and are summed as positive deductions.
    pub fn sign(&self) -> i64 {
        match self.bucket() {
            Bucket::Income => 1,
            Bucket::Deduction => -1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::MicroSyncIncome => "MicroSync Income",
            Category::TaxiiIncome => "Taxii Income",
            Category::DigitalOceanCosts => "DigitalOcean Costs",
            Category::AwsCosts => "AWS Costs",
        }
    }
}

/// Statement column a rule inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Payee,
    Memo,
}

impl Field {
    pub fn column(&self) -> &'static str {
        match self {
            Field::Payee => PAYEE,
            Field::Memo => MEMO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Equals,
    Contains,
}

/// One (field, match kind, pattern) -> category mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub field: Field,
    pub kind: MatchKind,
    pub pattern: &'static str,
    pub category: Category,
}

impl Rule {
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        let Some(value) = record.text(self.field.column()) else {
            return false;
        };
        match self.kind {
            MatchKind::Equals => value == self.pattern,
            MatchKind::Contains => value.contains(self.pattern),
        }
    }
}

/// Rules in priority order. Matching is case-sensitive.
pub const RULES: &[Rule] = &[
    // MicroSync payouts
    Rule {
        field: Field::Payee,
        kind: MatchKind::Equals,
        pattern: "D/C FROM Stripe Payments",
        category: Category::MicroSyncIncome,
    },
    Rule {
        field: Field::Memo,
        kind: MatchKind::Contains,
        pattern: "DIGITALOCEAN",
        category: Category::DigitalOceanCosts,
    },
    // Taxii payouts
    Rule {
        field: Field::Payee,
        kind: MatchKind::Contains,
        pattern: "D/C FROM Google Payment",
        category: Category::TaxiiIncome,
    },
    Rule {
        field: Field::Memo,
        kind: MatchKind::Contains,
        pattern: "AMAZON MKTPL ACE PMTS AMAZON.COM",
        category: Category::AwsCosts,
    },
];

/// Categorize a record, or `None` when it has no memo or matches nothing.
pub fn classify(record: &TransactionRecord) -> Option<Category> {
    classify_with(RULES, record)
}

/// Categorize against an explicit rule list.
pub fn classify_with(rules: &[Rule], record: &TransactionRecord) -> Option<Category> {
    record.memo()?;
    rules.iter().find(|r| r.matches(record)).map(|r| r.category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxes_core::Cell;

    fn record(payee: Option<&str>, memo: Option<&str>) -> TransactionRecord {
        let mut r = TransactionRecord::with_keys(["Payee", "Memo", "Amount"]);
        r.set("Payee", payee.map(|s| Cell::Text(s.to_string())));
        r.set("Memo", memo.map(|s| Cell::Text(s.to_string())));
        r
    }

    #[test]
    fn test_stripe_payee_is_exact_match() {
        let exact = record(Some("D/C FROM Stripe Payments"), Some("note"));
        assert_eq!(classify(&exact), Some(Category::MicroSyncIncome));

        let longer = record(Some("D/C FROM Stripe Payments Ltd"), Some("note"));
        assert_eq!(classify(&longer), None);
    }

    #[test]
    fn test_stripe_beats_digitalocean() {
        let both = record(Some("D/C FROM Stripe Payments"), Some("DIGITALOCEAN refund"));
        assert_eq!(classify(&both), Some(Category::MicroSyncIncome));
    }

    #[test]
    fn test_digitalocean_beats_google() {
        let both = record(Some("D/C FROM Google Payment NZ"), Some("DIGITALOCEAN.COM"));
        assert_eq!(classify(&both), Some(Category::DigitalOceanCosts));
    }

    #[test]
    fn test_google_payee_is_substring_match() {
        let r = record(Some("D/C FROM Google Payment co"), Some("note"));
        assert_eq!(classify(&r), Some(Category::TaxiiIncome));
    }

    #[test]
    fn test_aws_memo() {
        let r = record(Some("SOME VENDOR"), Some("4835 AMAZON MKTPL ACE PMTS AMAZON.COM WA"));
        assert_eq!(classify(&r), Some(Category::AwsCosts));
    }

    #[test]
    fn test_case_sensitive() {
        let r = record(Some("SOME VENDOR"), Some("digitalocean"));
        assert_eq!(classify(&r), None);
    }

    #[test]
    fn test_absent_memo_is_skipped() {
        let r = record(Some("D/C FROM Stripe Payments"), None);
        assert_eq!(classify(&r), None);
    }

    #[test]
    fn test_absent_payee_only_matches_memo_rules() {
        assert_eq!(classify(&record(None, Some("note"))), None);
        assert_eq!(
            classify(&record(None, Some("DIGITALOCEAN"))),
            Some(Category::DigitalOceanCosts)
        );
    }

    #[test]
    fn test_signs_follow_bucket() {
        for category in Category::ALL {
            let expected = match category.bucket() {
                Bucket::Income => 1,
                Bucket::Deduction => -1,
            };
            assert_eq!(category.sign(), expected, "{:?}", category);
        }
    }

    #[test]
    fn test_custom_rule_list() {
        let rules = [Rule {
            field: Field::Memo,
            kind: MatchKind::Contains,
            pattern: "note",
            category: Category::AwsCosts,
        }];
        let r = record(Some("D/C FROM Stripe Payments"), Some("a note"));
        assert_eq!(classify_with(&rules, &r), Some(Category::AwsCosts));
    }
}
