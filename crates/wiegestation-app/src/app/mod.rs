//! Application services (use cases)

mod weighing_station;

pub use weighing_station::{read_import, StationReport, WeighingStation};
