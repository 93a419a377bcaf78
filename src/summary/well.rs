use anyhow::Context;
use ndarray::{Array1, ArrayView1};

use super::Perforation;
use crate::accumulate::accumulate;
use crate::container::WellRecord;
use crate::phase::{Phase, Phases};

/// A well is classified as an injector when its water or gas cumulative (reservoir conditions)
/// ends below this value. Oil is not considered.
pub const INJECTOR_THRESHOLD: f64 = -1.0;

/// A single well and its perforations.
///
/// Rates and cumulatives without the `surface_` prefix are reservoir-condition totals over the
/// perforations and are summed on every call. Surface-condition series come from a separate
/// channel of the container.
#[derive(Debug, Clone)]
pub struct Well {
    index: usize,
    bhp: Array1<f64>,
    perforations: Vec<Perforation>,
    surface_rates: Phases<Array1<f64>>,
    surface_cumulatives: Phases<Array1<f64>>,
    is_injector: bool,
}

impl Well {
    /// Build well number `index` from its raw tables.
    ///
    /// The number of perforations is the width of the temperature table, the other tables
    /// must agree with it.
    pub fn new(
        index: usize,
        record: &WellRecord,
        time: ArrayView1<f64>,
    ) -> Result<Well, anyhow::Error> {
        let n = time.len();
        let np = record.temperatures.ncols();

        ensure!(np > 0, "well {}: no perforations", index);

        for (name, table, width) in [
            ("pressures", &record.pressures, np + 1),
            ("temperatures", &record.temperatures, np),
            ("average densities", &record.average_densities, np),
            ("phase rates", &record.phase_rates, 3 * np),
            ("phase rates at SC", &record.phase_rates_sc, 3),
        ] {
            ensure!(
                table.dim() == (n, width),
                "well {}: {} table has shape {:?}, expected {:?}",
                index,
                name,
                table.dim(),
                (n, width)
            );
        }

        let bhp = record.pressures.column(0).to_owned();

        let surface_rates =
            Phases::from_fn(|ph| record.phase_rates_sc.column(ph.column()).to_owned());
        let surface_cumulatives = surface_rates.map(|_, r| accumulate(time, r.view()));

        let perforations = (0..np)
            .map(|p| {
                Perforation::new(
                    time,
                    record.pressures.column(p + 1).to_owned(),
                    Phases::from_fn(|ph| record.phase_rates.column(3 * p + ph.column()).to_owned()),
                    record.temperatures.column(p).to_owned(),
                    record.average_densities.column(p).to_owned(),
                )
                .with_context(|| format!("well {}, perforation {}", index, p))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut well = Well {
            index,
            bhp,
            perforations,
            surface_rates,
            surface_cumulatives,
            is_injector: false,
        };

        well.is_injector = classify(
            well.cumulative(Phase::Water).view(),
            well.cumulative(Phase::Gas).view(),
        );

        debug!(
            "well {}: {} perforations, injector: {}",
            index, np, well.is_injector
        );

        Ok(well)
    }

    /// Position of the well in the container.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn num_perforations(&self) -> usize {
        self.perforations.len()
    }

    pub fn perforations(&self) -> &[Perforation] {
        &self.perforations
    }

    /// Bottom-hole pressure.
    pub fn bhp(&self) -> &Array1<f64> {
        &self.bhp
    }

    fn sum_perforations<'a, F>(&'a self, series: F) -> Array1<f64>
    where
        F: Fn(&'a Perforation) -> &'a Array1<f64>,
    {
        let n = self.bhp.len();
        self.perforations
            .iter()
            .fold(Array1::zeros(n), |acc, p| acc + series(p))
    }

    /// Total rate over all perforations.
    pub fn rate(&self, phase: Phase) -> Array1<f64> {
        self.sum_perforations(|p| p.rate(phase))
    }

    /// Total cumulative volume over all perforations.
    pub fn cumulative(&self, phase: Phase) -> Array1<f64> {
        self.sum_perforations(|p| p.cumulative(phase))
    }

    pub fn surface_rate(&self, phase: Phase) -> &Array1<f64> {
        &self.surface_rates[phase]
    }

    pub fn surface_cumulative(&self, phase: Phase) -> &Array1<f64> {
        &self.surface_cumulatives[phase]
    }

    pub fn is_injector(&self) -> bool {
        self.is_injector
    }
}

/// Injector iff the last water or gas cumulative is below [`INJECTOR_THRESHOLD`].
fn classify(water_cumulative: ArrayView1<f64>, gas_cumulative: ArrayView1<f64>) -> bool {
    let below = |c: ArrayView1<f64>| {
        c.len()
            .checked_sub(1)
            .map_or(false, |last| c[last] < INJECTOR_THRESHOLD)
    };

    below(water_cumulative) || below(gas_cumulative)
}
