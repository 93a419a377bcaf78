//! Serialization of a [`Summary`] to JSON or CSV.
//!
//! Both formats use the ECLIPSE-like mnemonics of the field and well vectors:
//!
//! | field | | well | |
//! |---|---|---|---|
//! | `FGPT` `FOPT` `FWPT` | production cumulatives | `WBHP` | bottom-hole pressure |
//! | `FGPR` `FOPR` `FWPR` | production rates | `WGR` `WOR` `WWR` | rates |
//! | `FGIT` `FOIT` `FWIT` | injection cumulatives | `WGT` `WOT` `WWT` | cumulatives |
//! | `FGIR` `FOIR` `FWIR` | injection rates | | |
//!
//! All rates and cumulatives are at reservoir conditions. Well series are not split into
//! production and injection: for an injector they are injected volumes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ndarray::Array1;

use crate::phase::{Phase, Phases};
use crate::summary::Summary;

pub mod csv;
pub mod json;

pub use self::csv::CsvWriter;
pub use self::json::JsonWriter;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    /// Interpret the `--format` flag: `csv` or `CSV` select CSV, anything else JSON.
    pub fn from_flag(flag: Option<&str>) -> OutputFormat {
        match flag {
            Some("csv") | Some("CSV") => OutputFormat::Csv,
            None | Some("json") | Some("JSON") => OutputFormat::Json,
            Some(other) => {
                warn!("Unknown output format {:?}, writing JSON", other);
                OutputFormat::Json
            }
        }
    }
}

pub trait SummaryWriter {
    fn write<W: Write>(&self, summary: &Summary, out: W) -> Result<(), anyhow::Error>;
}

/// All field vectors of a summary, computed once.
#[derive(Debug, Clone)]
pub struct FieldTotals {
    pub production_rates: Phases<Array1<f64>>,
    pub production_cumulatives: Phases<Array1<f64>>,
    pub injection_rates: Phases<Array1<f64>>,
    pub injection_cumulatives: Phases<Array1<f64>>,
    pub surface_production_cumulatives: Phases<Array1<f64>>,
}

impl FieldTotals {
    pub fn compute(summary: &Summary) -> FieldTotals {
        FieldTotals {
            production_rates: Phases::from_fn(|ph| summary.production_rate(ph)),
            production_cumulatives: Phases::from_fn(|ph| summary.production_cumulative(ph)),
            injection_rates: Phases::from_fn(|ph| summary.injection_rate(ph)),
            injection_cumulatives: Phases::from_fn(|ph| summary.injection_cumulative(ph)),
            surface_production_cumulatives: Phases::from_fn(|ph| {
                summary.surface_production_cumulative(ph)
            }),
        }
    }
}

/// Well vector mnemonics, in output order.
pub const WELL_VECTORS: [&str; 7] = ["WBHP", "WGR", "WOR", "WWR", "WGT", "WOT", "WWT"];

/// Letter used for a phase in vector mnemonics.
pub(crate) fn letter(phase: Phase) -> char {
    match phase {
        Phase::Gas => 'G',
        Phase::Oil => 'O',
        Phase::Water => 'W',
    }
}

/// Write `summary` to a new file at `path`.
pub fn write_file<P>(summary: &Summary, path: P, format: OutputFormat) -> Result<(), anyhow::Error>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();

    info!("Writing {:?} to {}..", format, path.display());

    let f = File::create(path)?;
    let mut w = BufWriter::new(f);

    match format {
        OutputFormat::Json => JsonWriter.write(summary, &mut w)?,
        OutputFormat::Csv => CsvWriter.write(summary, &mut w)?,
    }

    w.flush()?;

    Ok(())
}
