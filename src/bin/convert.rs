//! Convert an ADGPRS HDF5 summary to JSON or CSV.

use std::path::PathBuf;

use clap::Parser;

use adgprs_summary::prelude::*;

/// Convert ADGPRS HDF5 summaries to more readable formats.
#[derive(Parser, Debug)]
#[command(name = "convert", version)]
struct Args {
    /// Path to ADGPRS HDF5 summary file
    #[arg(value_name = "INFILE")]
    infile: PathBuf,

    /// Path to output file
    #[arg(value_name = "OUTFILE")]
    outfile: PathBuf,

    /// Format of output file (csv or json)
    #[arg(short, long, value_name = "FORMAT")]
    format: Option<String>,
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();
    let format = OutputFormat::from_flag(args.format.as_deref());

    let summary = Summary::open(&args.infile)?;

    write_file(&summary, &args.outfile, format)?;

    log::info!("Done.");

    Ok(())
}
