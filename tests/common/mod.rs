//! Synthetic ADGPRS summaries.
//!
//! Five wells with two perforations each over the report times of the 5-spot case. Well 0
//! injects water, wells 1-4 produce:
//!
//! * oil: `100 w + 10 p + i`
//! * gas: `1000 w + 100 p`
//! * water: `5 w + p`
//!
//! for well `w`, perforation `p` and time step `i`. The field oil production rate is
//! therefore `2040 + 8 i`.
#![allow(dead_code)]

use std::path::Path;

use hdf5::types::VarLenArray;
use hdf5::H5Type;
use ndarray::{Array1, Array2};

pub const TIMES: [f64; 8] = [0., 3., 18., 48., 50., 65., 95., 100.];
pub const NUM_WELLS: usize = 5;
pub const NUM_PERFORATIONS: usize = 2;

#[derive(H5Type, Clone, Copy, Debug, Default)]
#[repr(C)]
#[allow(non_snake_case)]
pub struct WellState {
    pub vPressures: [f64; 3],
    pub vTemperatures: [f64; 2],
    pub vAverageDensity: [f64; 2],
    pub vPhaseRates: [f64; 6],
    pub vPhaseRatesAtSC: [f64; 3],
    pub iControl: i32,
}

/// Same layout with single precision members and one perforation.
#[derive(H5Type, Clone, Copy, Debug, Default)]
#[repr(C)]
#[allow(non_snake_case)]
pub struct WellStateF32 {
    pub vPressures: [f32; 2],
    pub vTemperatures: [f32; 1],
    pub vAverageDensity: [f32; 1],
    pub vPhaseRates: [f32; 3],
    pub vPhaseRatesAtSC: [f32; 3],
}

/// A record missing the standard-condition rates.
#[derive(H5Type, Clone, Copy, Debug, Default)]
#[repr(C)]
#[allow(non_snake_case)]
pub struct IncompleteWellState {
    pub vPressures: [f64; 3],
    pub vTemperatures: [f64; 2],
    pub vAverageDensity: [f64; 2],
    pub vPhaseRates: [f64; 6],
}

/// Variable-length members, so that wells can have different numbers of perforations.
#[derive(H5Type, Clone, Debug, Default)]
#[repr(C)]
#[allow(non_snake_case)]
pub struct VarLenWellState {
    pub vPressures: VarLenArray<f64>,
    pub vTemperatures: VarLenArray<f64>,
    pub vAverageDensity: VarLenArray<f64>,
    pub vPhaseRates: VarLenArray<f64>,
    pub vPhaseRatesAtSC: VarLenArray<f64>,
    pub iControl: i32,
}

/// Perforations per well in the variable-length fixture. Well 0 injects.
pub const VARLEN_PERFORATIONS: [usize; 3] = [1, 3, 2];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Storage {
    Contiguous,

    /// Chunks of 2 wells x 3 steps, shuffle and deflate.
    Chunked,
}

pub fn is_injector(w: usize) -> bool {
    w == 0
}

/// Phase rates (gas, oil, water) of perforation `p` of well `w` at step `i`.
pub fn rates(w: usize, p: usize, i: usize) -> [f64; 3] {
    if is_injector(w) {
        [0., 0., -500.]
    } else {
        let (w, p, i) = (w as f64, p as f64, i as f64);
        [1000. * w + 100. * p, 100. * w + 10. * p + i, 5. * w + p]
    }
}

pub fn expected_field_oil_rates() -> Array1<f64> {
    Array1::from_iter((0..TIMES.len()).map(|i| 2040. + 8. * i as f64))
}

pub fn well_state(w: usize, i: usize) -> WellState {
    let mut s = WellState {
        iControl: w as i32,
        ..Default::default()
    };

    s.vPressures[0] = 250. - i as f64 + w as f64;

    for p in 0..NUM_PERFORATIONS {
        s.vPressures[p + 1] = 240. + p as f64 - i as f64;
        s.vTemperatures[p] = 360. + p as f64;
        s.vAverageDensity[p] = 850. + w as f64 + 0.5 * p as f64;
        s.vPhaseRates[3 * p..3 * p + 3].copy_from_slice(&rates(w, p, i));
    }

    // standard conditions: oil shrinks, gas expands
    let [g, o, wt] = (0..NUM_PERFORATIONS).fold([0.; 3], |acc, p| {
        let r = rates(w, p, i);
        [acc[0] + r[0], acc[1] + r[1], acc[2] + r[2]]
    });
    s.vPhaseRatesAtSC = [150. * g, 0.8 * o, wt];

    s
}

fn write_summary<T: H5Type>(
    path: &Path,
    states: Array2<T>,
    times: &[f64],
    storage: Storage,
) -> Result<(), anyhow::Error> {
    let f = hdf5::File::create(path)?;

    let restart = f.create_group("RESTART")?;
    restart
        .new_dataset::<f64>()
        .shape(times.len())
        .create("TIMES")?
        .write(ndarray::ArrayView1::from(times))?;

    let flow = f.create_group("FLOW_TRANSPORT")?;
    let builder = flow.new_dataset::<T>().shape(states.dim());
    let builder = match storage {
        Storage::Contiguous => builder,
        Storage::Chunked => builder.chunk([2_usize, 3]).shuffle().deflate(4),
    };
    builder.create("WELL_STATES")?.write(states.view())?;

    Ok(())
}

pub fn write_fixture(path: &Path, storage: Storage) -> Result<(), anyhow::Error> {
    let states = Array2::from_shape_fn((NUM_WELLS, TIMES.len()), |(w, i)| well_state(w, i));
    write_summary(path, states, &TIMES, storage)
}

pub fn write_fixture_f32(path: &Path) -> Result<(), anyhow::Error> {
    let states = Array2::from_shape_fn((2, TIMES.len()), |(w, i)| {
        let r = rates(w, 0, i);
        WellStateF32 {
            vPressures: [200.5, 199.25],
            vTemperatures: [350.],
            vAverageDensity: [900.],
            vPhaseRates: [r[0] as f32, r[1] as f32, r[2] as f32],
            vPhaseRatesAtSC: [1., 2., 3.],
        }
    });
    write_summary(path, states, &TIMES, Storage::Contiguous)
}

pub fn write_fixture_incomplete(path: &Path) -> Result<(), anyhow::Error> {
    let states = Array2::from_shape_fn((NUM_WELLS, TIMES.len()), |(w, i)| {
        let s = well_state(w, i);
        IncompleteWellState {
            vPressures: s.vPressures,
            vTemperatures: s.vTemperatures,
            vAverageDensity: s.vAverageDensity,
            vPhaseRates: s.vPhaseRates,
        }
    });
    write_summary(path, states, &TIMES, Storage::Contiguous)
}

/// Well states with a time axis that does not match the records.
pub fn write_fixture_short_times(path: &Path) -> Result<(), anyhow::Error> {
    let states = Array2::from_shape_fn((NUM_WELLS, TIMES.len()), |(w, i)| well_state(w, i));
    write_summary(path, states, &TIMES[..5], Storage::Contiguous)
}

pub fn varlen_well_state(w: usize, i: usize) -> VarLenWellState {
    let np = VARLEN_PERFORATIONS[w];

    let mut pressures = vec![250. - i as f64 + w as f64];
    pressures.extend((0..np).map(|p| 240. + p as f64 - i as f64));

    let temperatures = (0..np).map(|p| 360. + p as f64).collect::<Vec<_>>();
    let densities = (0..np).map(|p| 850. + 0.5 * p as f64).collect::<Vec<_>>();
    let phase_rates = (0..np).flat_map(|p| rates(w, p, i)).collect::<Vec<_>>();

    let sc = (0..np).fold([0.; 3], |acc, p| {
        let r = rates(w, p, i);
        [acc[0] + r[0], acc[1] + r[1], acc[2] + r[2]]
    });

    VarLenWellState {
        vPressures: VarLenArray::from_slice(&pressures),
        vTemperatures: VarLenArray::from_slice(&temperatures),
        vAverageDensity: VarLenArray::from_slice(&densities),
        vPhaseRates: VarLenArray::from_slice(&phase_rates),
        vPhaseRatesAtSC: VarLenArray::from_slice(&sc),
        iControl: w as i32,
    }
}

/// Field oil production of the variable-length fixture: wells 1 and 2 produce
/// `(300 + 30 + 3 i) + (400 + 10 + 2 i)`.
pub fn expected_varlen_field_oil_rates() -> Array1<f64> {
    Array1::from_iter((0..TIMES.len()).map(|i| 740. + 5. * i as f64))
}

pub fn write_fixture_varlen(path: &Path) -> Result<(), anyhow::Error> {
    let states = Array2::from_shape_fn((VARLEN_PERFORATIONS.len(), TIMES.len()), |(w, i)| {
        varlen_well_state(w, i)
    });
    write_summary(path, states, &TIMES, Storage::Contiguous)
}

/// Variable-length records where one well changes its number of perforations mid-run.
pub fn write_fixture_ragged(path: &Path) -> Result<(), anyhow::Error> {
    let states = Array2::from_shape_fn((VARLEN_PERFORATIONS.len(), TIMES.len()), |(w, i)| {
        if w == 1 && i >= 4 {
            varlen_well_state(2, i)
        } else {
            varlen_well_state(w, i)
        }
    });
    write_summary(path, states, &TIMES, Storage::Contiguous)
}

/// Relative comparison with an absolute floor of 1.
pub fn close(a: &Array1<f64>, b: &Array1<f64>, tol: f64) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| (x - y).abs() <= tol * x.abs().max(y.abs()).max(1.))
}
