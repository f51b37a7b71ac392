//! Domain services

pub mod daily_summary;
pub mod tare_lookup;
pub mod vehicle_summary;
pub mod weighing_workflow;

pub use daily_summary::{daily_material_summary, daily_total};
pub use tare_lookup::{known_tare, known_tares};
pub use vehicle_summary::vehicle_summary;
pub use weighing_workflow::{
    record_weighing, register_tare, TareOutcome, WeighingOutcome, WeighingRequest,
};
