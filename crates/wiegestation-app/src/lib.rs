//! Application service layer - station service, config, export

pub mod app;
pub mod config;
pub mod export;
pub mod repository;
