//! Domain layer: derived views over the record store and the weighing workflow

pub mod model;
pub mod repository;
pub mod service;
