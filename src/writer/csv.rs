//! CSV output: one row per time step, field columns first, then seven columns per well.
//!
//! ```text
//! TIME,FGPT,FOPT,FWPT,FOPR,FGPR,FWPR,FGIT,FGIR,FOIT,FOIR,FWIT,FWIR,WBHP0,WGR0,WOR0,WWR0,WGT0,WOT0,WWT0,WBHP1,..
//! ```
//!
//! Well columns are suffixed with the well index. Lines end with `\r\n`.

use std::io::Write;

use itertools::Itertools;
use ndarray::Array1;

use super::{letter, FieldTotals, SummaryWriter, WELL_VECTORS};
use crate::phase::Phase;
use crate::summary::Summary;

const EOL: &str = "\r\n";

/// Writes the summary as a table.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvWriter;

impl CsvWriter {
    /// Column headers and data, in output order.
    pub fn columns(summary: &Summary) -> Vec<(String, Array1<f64>)> {
        use Phase::*;

        let FieldTotals {
            production_rates,
            production_cumulatives,
            injection_rates,
            injection_cumulatives,
            ..
        } = FieldTotals::compute(summary);

        let mut columns = vec![("TIME".to_string(), summary.time_steps().clone())];

        for ph in [Gas, Oil, Water] {
            columns.push((
                format!("F{}PT", letter(ph)),
                production_cumulatives[ph].clone(),
            ));
        }

        for ph in [Oil, Gas, Water] {
            columns.push((format!("F{}PR", letter(ph)), production_rates[ph].clone()));
        }

        for ph in [Gas, Oil, Water] {
            columns.push((
                format!("F{}IT", letter(ph)),
                injection_cumulatives[ph].clone(),
            ));
            columns.push((format!("F{}IR", letter(ph)), injection_rates[ph].clone()));
        }

        for w in summary.wells() {
            let series = [
                w.bhp().clone(),
                w.rate(Gas),
                w.rate(Oil),
                w.rate(Water),
                w.cumulative(Gas),
                w.cumulative(Oil),
                w.cumulative(Water),
            ];

            columns.extend(
                WELL_VECTORS
                    .iter()
                    .zip(series)
                    .map(|(v, s)| (format!("{}{}", v, w.index()), s)),
            );
        }

        columns
    }
}

impl SummaryWriter for CsvWriter {
    fn write<W: Write>(&self, summary: &Summary, mut out: W) -> Result<(), anyhow::Error> {
        let columns = CsvWriter::columns(summary);

        write!(out, "{}{}", columns.iter().map(|(h, _)| h).join(","), EOL)?;

        for i in 0..summary.time_steps().len() {
            write!(
                out,
                "{}{}",
                columns.iter().map(|(_, c)| format!("{:?}", c[i])).join(","),
                EOL
            )?;
        }

        debug!(
            "Wrote {} columns, {} rows",
            columns.len(),
            summary.time_steps().len()
        );

        Ok(())
    }
}
