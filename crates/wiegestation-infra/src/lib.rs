//! Infrastructure layer - persistence implementations, CSV import/export

pub mod persistence;
pub mod transaction_csv;
