use anyhow::{Context, Result};
use log::info;
use std::io::Write;
use std::path::PathBuf;
use taxes_core::TransactionRecord;
use taxes_finance::{JsonReport, compute_taxes, summarize};
use taxes_ingest::read_bank_statement;

/// Read every statement in argument order, then print the report.
///
/// Verbose text mode announces each file before it is read. JSON mode keeps
/// stdout to the report alone.
pub fn run<W: Write>(out: &mut W, paths: &[PathBuf], verbose: bool, json: bool) -> Result<()> {
    let mut transactions = Vec::new();
    for path in paths {
        if verbose && !json {
            writeln!(out, "Calculating taxes from bank statement: {}", path.display())?;
        }
        info!("reading {}", path.display());
        let records =
            read_bank_statement(path).with_context(|| format!("parsing {}", path.display()))?;
        transactions.extend(records);
    }

    if json {
        print_json(out, &transactions)
    } else {
        print_text(out, &transactions, verbose)
    }
}

/// Text report: optional breakdown, the total, then income and deductions
/// when verbose.
pub fn print_text<W: Write>(
    out: &mut W,
    transactions: &[TransactionRecord],
    verbose: bool,
) -> Result<()> {
    let (income, deductions) =
        compute_taxes(transactions, verbose, out).context("calculating taxes")?;

    writeln!(out, "Total: {}", income - deductions)?;
    if verbose {
        writeln!(out, "Income: {}", income)?;
        writeln!(out, "Deductions: {}", deductions)?;
    }
    Ok(())
}

pub fn print_json<W: Write>(out: &mut W, transactions: &[TransactionRecord]) -> Result<()> {
    let summary = summarize(transactions).context("calculating taxes")?;
    serde_json::to_writer_pretty(&mut *out, &JsonReport::from_summary(&summary))?;
    writeln!(out)?;
    Ok(())
}
