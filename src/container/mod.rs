//! The raw summary container.
//!
//! [`SummarySource`] is everything the summary model needs from a container: the time axis, the
//! number of wells and one [`WellRecord`] per well. [`Container`] implements it for ADGPRS HDF5
//! files:
//!
//! ```text
//! /RESTART/TIMES                   f64[N]
//! /FLOW_TRANSPORT/WELL_STATES      compound[num_wells, N]
//!     vPressures        [1 + P]    bottom-hole pressure, then one pressure per perforation
//!     vTemperatures     [P]
//!     vAverageDensity   [P]
//!     vPhaseRates       [3 P]      gas, oil, water per perforation (reservoir conditions)
//!     vPhaseRatesAtSC   [3]        gas, oil, water for the well (standard conditions)
//! ```
//!
//! The members are either fixed-size float arrays, in which case every well has the same `P`
//! and the records are read directly from the file, or variable-length float sequences, where
//! `P` may differ between wells.

use std::fs::File;
use std::path::{Path, PathBuf};

use byteorder::{BigEndian, LittleEndian};
use ndarray::{Array1, Array2};

pub mod layout;
pub mod reader;
mod varlen;

pub use layout::Layout;
use reader::{decode_member, WellStatesReader};

pub const TIMES: &str = "RESTART/TIMES";
pub const WELL_STATES: &str = "FLOW_TRANSPORT/WELL_STATES";

pub const PRESSURES: &str = "vPressures";
pub const TEMPERATURES: &str = "vTemperatures";
pub const AVERAGE_DENSITY: &str = "vAverageDensity";
pub const PHASE_RATES: &str = "vPhaseRates";
pub const PHASE_RATES_AT_SC: &str = "vPhaseRatesAtSC";

/// Raw tables of a single well, one row per time step.
#[derive(Debug, Clone, PartialEq)]
pub struct WellRecord {
    /// `N x (1 + P)`: bottom-hole pressure followed by the perforation pressures.
    pub pressures: Array2<f64>,

    /// `N x P`
    pub temperatures: Array2<f64>,

    /// `N x P`
    pub average_densities: Array2<f64>,

    /// `N x 3P`: `[gas0, oil0, water0, gas1, oil1, water1, ..]` at reservoir conditions.
    pub phase_rates: Array2<f64>,

    /// `N x 3`: gas, oil, water for the whole well at standard conditions.
    pub phase_rates_sc: Array2<f64>,
}

pub trait SummarySource {
    /// Report times, non-decreasing.
    fn times(&mut self) -> Result<Array1<f64>, anyhow::Error>;

    fn num_wells(&self) -> usize;

    /// Raw tables of well `w` (`0 <= w < num_wells()`).
    fn well_record(&mut self, w: usize) -> Result<WellRecord, anyhow::Error>;
}

/// An open ADGPRS HDF5 summary.
///
/// The file stays open until [`Container::close`] is called (or the container is dropped).
/// Nothing read from it keeps a reference to the file.
pub struct Container {
    path: PathBuf,
    hf: hdf5::File,
    fd: File,
    layout: Layout,
    varlen: bool,
}

impl Container {
    pub fn open<P>(path: P) -> Result<Container, anyhow::Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        info!("Opening summary {}..", path.display());

        let hf = hdf5::File::open(path)?;
        let layout = Layout::index(&hf.dataset(WELL_STATES)?)?;

        let members = [
            PRESSURES,
            TEMPERATURES,
            AVERAGE_DENSITY,
            PHASE_RATES,
            PHASE_RATES_AT_SC,
        ]
        .iter()
        .map(|m| layout.member(m))
        .collect::<Result<Vec<_>, _>>()?;

        let varlen = members.iter().all(|m| m.is_varlen());

        ensure!(
            varlen || members.iter().all(|m| !m.is_varlen()),
            "{}: members mix fixed-size and variable-length arrays",
            WELL_STATES
        );

        if !varlen {
            layout.is_big_endian()?;
        }

        debug!(
            "{}: {} members",
            WELL_STATES,
            if varlen { "variable-length" } else { "fixed-size" }
        );

        let fd = File::open(path)?;

        Ok(Container {
            path: path.into(),
            hf,
            fd,
            layout,
            varlen,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.path.as_ref()
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Whether wells are stored with variable-length members.
    #[must_use]
    pub fn is_varlen(&self) -> bool {
        self.varlen
    }

    /// Release the file.
    pub fn close(self) {
        debug!("Closing {}", self.path.display());
    }
}

impl SummarySource for Container {
    fn times(&mut self) -> Result<Array1<f64>, anyhow::Error> {
        let ds = self.hf.dataset(TIMES)?;
        ensure!(ds.ndim() == 1, "{}: expected 1-D time steps", ds.name());

        let times = Array1::from(ds.read_raw::<f64>()?);

        ensure!(
            times.len() == self.layout.num_steps(),
            "{} has {} time steps, {} has {}",
            TIMES,
            times.len(),
            WELL_STATES,
            self.layout.num_steps()
        );

        Ok(times)
    }

    fn num_wells(&self) -> usize {
        self.layout.num_wells()
    }

    fn well_record(&mut self, w: usize) -> Result<WellRecord, anyhow::Error> {
        if self.varlen {
            return varlen::read_well(&self.hf.dataset(WELL_STATES)?, w);
        }

        let layout = &self.layout;
        let records = WellStatesReader::new(layout, &mut self.fd).read_well(w)?;

        let rsz = layout.record_size;
        let big_endian = layout.is_big_endian()?;
        let member = |name: &str| -> Result<Array2<f64>, anyhow::Error> {
            let m = layout.member(name)?;

            if big_endian {
                decode_member::<BigEndian>(&records, rsz, m)
            } else {
                decode_member::<LittleEndian>(&records, rsz, m)
            }
        };

        Ok(WellRecord {
            pressures: member(PRESSURES)?,
            temperatures: member(TEMPERATURES)?,
            average_densities: member(AVERAGE_DENSITY)?,
            phase_rates: member(PHASE_RATES)?,
            phase_rates_sc: member(PHASE_RATES_AT_SC)?,
        })
    }
}
