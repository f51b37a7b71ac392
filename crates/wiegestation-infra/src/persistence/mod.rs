//! Persistence implementations
//!
//! This module provides file-based implementations of the repository traits.

mod file_entry_repo;

pub use file_entry_repo::FileEntryRepository;
