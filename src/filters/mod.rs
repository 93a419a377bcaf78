//! HDF5 filters needed to turn stored chunks back into records.

pub mod gzip;
pub mod shuffle;
