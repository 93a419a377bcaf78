use std::path::Path;

use anyhow::Context;
use ndarray::Array1;

use super::Well;
use crate::container::{Container, SummarySource};
use crate::phase::Phase;

/// A complete summary: the wells of one simulation case and their shared time axis.
///
/// Field totals are recomputed on every call. Production totals sum over the producers
/// (wells that are not injectors), injection totals over the injectors, so every well
/// contributes to exactly one of them.
#[derive(Debug, Clone)]
pub struct Summary {
    time_steps: Array1<f64>,
    wells: Vec<Well>,
}

impl Summary {
    /// Read the ADGPRS HDF5 summary at `path`.
    ///
    /// The file is closed again before this returns.
    pub fn open<P>(path: P) -> Result<Summary, anyhow::Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let mut container = Container::open(path)?;

        let summary = Summary::from_source(&mut container)
            .with_context(|| format!("{}: could not read summary", path.display()))?;

        container.close();

        Ok(summary)
    }

    /// Build all wells from `source`, in source order.
    pub fn from_source<S>(source: &mut S) -> Result<Summary, anyhow::Error>
    where
        S: SummarySource + ?Sized,
    {
        let time_steps = source.times()?;
        let num_wells = source.num_wells();

        ensure!(num_wells > 0, "summary has no wells");

        let wells = (0..num_wells)
            .map(|w| {
                let record = source.well_record(w)?;
                Well::new(w, &record, time_steps.view())
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "Read summary: {} wells ({} injectors), {} time steps",
            wells.len(),
            wells.iter().filter(|w| w.is_injector()).count(),
            time_steps.len()
        );

        Ok(Summary { time_steps, wells })
    }

    pub fn num_wells(&self) -> usize {
        self.wells.len()
    }

    pub fn wells(&self) -> &[Well] {
        &self.wells
    }

    #[must_use]
    pub fn well(&self, w: usize) -> Option<&Well> {
        self.wells.get(w)
    }

    pub fn time_steps(&self) -> &Array1<f64> {
        &self.time_steps
    }

    pub fn producers(&self) -> impl Iterator<Item = &Well> {
        self.wells.iter().filter(|w| !w.is_injector())
    }

    pub fn injectors(&self) -> impl Iterator<Item = &Well> {
        self.wells.iter().filter(|w| w.is_injector())
    }

    fn sum<'a, I, F>(&self, wells: I, series: F) -> Array1<f64>
    where
        I: Iterator<Item = &'a Well>,
        F: Fn(&'a Well) -> Array1<f64>,
    {
        wells.fold(Array1::zeros(self.time_steps.len()), |acc, w| {
            acc + series(w)
        })
    }

    /// Field production rate, reservoir conditions.
    pub fn production_rate(&self, phase: Phase) -> Array1<f64> {
        self.sum(self.producers(), |w| w.rate(phase))
    }

    /// Field production cumulative, reservoir conditions.
    pub fn production_cumulative(&self, phase: Phase) -> Array1<f64> {
        self.sum(self.producers(), |w| w.cumulative(phase))
    }

    /// Field injection rate, reservoir conditions.
    pub fn injection_rate(&self, phase: Phase) -> Array1<f64> {
        self.sum(self.injectors(), |w| w.rate(phase))
    }

    /// Field injection cumulative, reservoir conditions.
    pub fn injection_cumulative(&self, phase: Phase) -> Array1<f64> {
        self.sum(self.injectors(), |w| w.cumulative(phase))
    }

    /// Field production cumulative at standard (surface) conditions.
    pub fn surface_production_cumulative(&self, phase: Phase) -> Array1<f64> {
        self.sum(self.producers(), |w| w.surface_cumulative(phase).clone())
    }
}
