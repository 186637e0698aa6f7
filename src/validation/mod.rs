//! Validation functionality
//!
//! Provides validation logic for finished mapping documents:
//! - Duplicate column mappings within a class
//! - Tables shared between classes

pub mod columns;

pub use columns::{ColumnValidationResult, ColumnValidator, DuplicateColumn, TableConflict};
