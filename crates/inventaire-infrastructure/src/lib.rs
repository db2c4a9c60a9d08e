//! Infrastructure layer for Inventaire.
//!
//! Concrete implementations of the core's persistence interface plus the
//! in-tree tabular codec for the export sheet.

pub mod csv_sheet_writer;
pub mod json_state_repository;
pub mod memory_state_repository;

pub use csv_sheet_writer::write_sheet;
pub use json_state_repository::JsonStateRepository;
pub use memory_state_repository::MemoryStateRepository;
