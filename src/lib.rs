//! # ADGPRS summary
//!
//! A reader for the HDF5 summaries written by the ADGPRS reservoir simulator.
//!
//! The simulator stores, for every well and every report step, the phase rates of each
//! perforation together with perforation pressures, temperatures and densities. This crate
//! reads that layout and re-exposes it as time series at three levels:
//!
//! * [perforations](summary::Perforation): raw series plus derived cumulative volumes,
//! * [wells](summary::Well): perforation totals, surface-condition rates and an
//!   injector/producer classification,
//! * the [field](summary::Summary): production and injection totals over all wells.
//!
//! The result can be written as JSON or CSV through the [writers](writer).
//!
//! ## Usage
//!
//! ```no_run
//! use adgprs_summary::prelude::*;
//!
//! let summary = Summary::open("5SPOT.SIM.H5").unwrap();
//! println!("wells: {}", summary.num_wells());
//! println!("FOPR: {}", summary.production_rate(Phase::Oil));
//!
//! write_file(&summary, "5SPOT.json", OutputFormat::Json).unwrap();
//! ```
//!
//! The container is read eagerly and closed before [`Summary::open`](summary::Summary::open)
//! returns, the summary tree is read-only afterwards.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

pub mod accumulate;
pub mod container;
pub mod filters;
pub mod phase;
pub mod summary;
pub mod writer;

pub mod prelude {
    pub use crate::accumulate::accumulate;
    pub use crate::container::{Container, SummarySource, WellRecord};
    pub use crate::phase::{Phase, Phases};
    pub use crate::summary::{Perforation, Summary, Well};
    pub use crate::writer::{write_file, FieldTotals, OutputFormat, SummaryWriter};
}
