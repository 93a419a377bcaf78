//! Well records with variable-length members.
//!
//! When `WELL_STATES` stores its arrays as HDF5 variable-length sequences every well can have
//! its own number of perforations. The sequences live on the global heap, so these records are
//! read through the HDF5 library, which matches the compound members by name.

use anyhow::Context;
use hdf5::types::VarLenArray;
use hdf5::H5Type;
use ndarray::{s, Array2};

use super::{
    WellRecord, AVERAGE_DENSITY, PHASE_RATES, PHASE_RATES_AT_SC, PRESSURES, TEMPERATURES,
};

#[derive(H5Type, Clone, Debug)]
#[repr(C)]
#[allow(non_snake_case)]
struct WellState {
    vPressures: VarLenArray<f64>,
    vTemperatures: VarLenArray<f64>,
    vAverageDensity: VarLenArray<f64>,
    vPhaseRates: VarLenArray<f64>,
    vPhaseRatesAtSC: VarLenArray<f64>,
}

/// Stack one sequence per time step into a table. All steps must have the same length.
pub(crate) fn table<'a, I>(name: &str, rows: I) -> Result<Array2<f64>, anyhow::Error>
where
    I: ExactSizeIterator<Item = &'a [f64]>,
{
    let n = rows.len();
    let mut width = None;
    let mut data = Vec::new();

    for (i, row) in rows.enumerate() {
        let w = *width.get_or_insert(row.len());

        ensure!(
            row.len() == w,
            "{}: time step {} has {} values, previous steps have {}",
            name,
            i,
            row.len(),
            w
        );

        data.extend_from_slice(row);
    }

    Ok(Array2::from_shape_vec((n, width.unwrap_or(0)), data)?)
}

/// Read the records of well `w`.
pub(crate) fn read_well(ds: &hdf5::Dataset, w: usize) -> Result<WellRecord, anyhow::Error> {
    let num_wells = ds.shape()[0];

    ensure!(
        w < num_wells,
        "well {} out of range ({} wells)",
        w,
        num_wells
    );

    let states = ds.read_slice_1d::<WellState, _>(s![w, ..])?;

    debug!("well {}: read {} variable-length records", w, states.len());

    let context = || format!("well {}", w);

    Ok(WellRecord {
        pressures: table(PRESSURES, states.iter().map(|s| s.vPressures.as_slice()))
            .with_context(context)?,
        temperatures: table(TEMPERATURES, states.iter().map(|s| s.vTemperatures.as_slice()))
            .with_context(context)?,
        average_densities: table(
            AVERAGE_DENSITY,
            states.iter().map(|s| s.vAverageDensity.as_slice()),
        )
        .with_context(context)?,
        phase_rates: table(PHASE_RATES, states.iter().map(|s| s.vPhaseRates.as_slice()))
            .with_context(context)?,
        phase_rates_sc: table(
            PHASE_RATES_AT_SC,
            states.iter().map(|s| s.vPhaseRatesAtSC.as_slice()),
        )
        .with_context(context)?,
    })
}
