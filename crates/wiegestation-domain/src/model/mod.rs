//! Domain model types

pub mod summary;

pub use summary::{KnownTare, MaterialTotal, VehicleTotal};
