use ndarray::{Array1, ArrayView1};

use crate::accumulate::accumulate;
use crate::phase::{Phase, Phases};

/// Series of a single perforation, reservoir conditions.
#[derive(Debug, Clone)]
pub struct Perforation {
    pressure: Array1<f64>,
    rates: Phases<Array1<f64>>,
    cumulatives: Phases<Array1<f64>>,
    temperature: Array1<f64>,
    average_density: Array1<f64>,
}

impl Perforation {
    /// Build a perforation from its raw series, deriving the cumulative volumes over `time`.
    ///
    /// Fails unless every series has the same length as `time`.
    pub fn new(
        time: ArrayView1<f64>,
        pressure: Array1<f64>,
        rates: Phases<Array1<f64>>,
        temperature: Array1<f64>,
        average_density: Array1<f64>,
    ) -> Result<Perforation, anyhow::Error> {
        let n = time.len();

        for (name, len) in [
            ("pressure", pressure.len()),
            ("gas rate", rates[Phase::Gas].len()),
            ("oil rate", rates[Phase::Oil].len()),
            ("water rate", rates[Phase::Water].len()),
            ("temperature", temperature.len()),
            ("average density", average_density.len()),
        ] {
            ensure!(
                len == n,
                "perforation {} series has {} values, expected {}",
                name,
                len,
                n
            );
        }

        let cumulatives = rates.map(|_, r| accumulate(time, r.view()));

        Ok(Perforation {
            pressure,
            rates,
            cumulatives,
            temperature,
            average_density,
        })
    }

    pub fn pressure(&self) -> &Array1<f64> {
        &self.pressure
    }

    pub fn rate(&self, phase: Phase) -> &Array1<f64> {
        &self.rates[phase]
    }

    pub fn cumulative(&self, phase: Phase) -> &Array1<f64> {
        &self.cumulatives[phase]
    }

    pub fn temperature(&self) -> &Array1<f64> {
        &self.temperature
    }

    pub fn average_density(&self) -> &Array1<f64> {
        &self.average_density
    }
}
