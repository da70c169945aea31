use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

mod output;

#[derive(Parser, Debug)]
#[command(name = "taxes", version, about = "Calculate my tax return")]
struct Cli {
    /// Bank statement CSV exports, read in the order given
    #[arg(required = true, value_name = "CSV_FILE")]
    csv_file_paths: Vec<PathBuf>,

    /// Show per-file progress and the income / deduction breakdown
    #[arg(short, long)]
    verbose: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    output::run(&mut out, &cli.csv_file_paths, cli.verbose, cli.json)?;
    out.flush()?;

    Ok(())
}
