//! Column validation
//!
//! Checks a finished mapping document for storage collisions that the engine would
//! otherwise reject (or silently merge): two mapping entries of one class writing to the
//! same column, and two classes mapped onto the same table.

use crate::models::{MappingDocument, TypeName};
use std::collections::HashMap;
use std::fmt;

/// Column written by more than one entry of a class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateColumn {
    pub class: TypeName,
    pub column: String,
    /// Number of entries mapped to the column
    pub occurrences: usize,
}

/// Two classes mapped onto one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConflict {
    pub table: String,
    pub first: TypeName,
    pub second: TypeName,
}

/// Result of column validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnValidationResult {
    pub duplicate_columns: Vec<DuplicateColumn>,
    pub table_conflicts: Vec<TableConflict>,
}

impl ColumnValidationResult {
    pub fn is_valid(&self) -> bool {
        self.duplicate_columns.is_empty() && self.table_conflicts.is_empty()
    }
}

impl fmt::Display for ColumnValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut issues: Vec<String> = self
            .duplicate_columns
            .iter()
            .map(|d| format!("{}.{} mapped {} times", d.class, d.column, d.occurrences))
            .collect();
        issues.extend(self.table_conflicts.iter().map(|c| {
            format!(
                "table '{}' shared by {} and {}",
                c.table, c.first, c.second
            )
        }));
        f.write_str(&issues.join("; "))
    }
}

/// Column validator
#[derive(Debug, Default)]
pub struct ColumnValidator;

impl ColumnValidator {
    pub fn new() -> Self {
        Self
    }

    /// Findings are reported in document order.
    pub fn validate(&self, document: &MappingDocument) -> ColumnValidationResult {
        let mut result = ColumnValidationResult::default();

        for class in &document.classes {
            let columns = class.columns();
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for column in &columns {
                *counts.entry(*column).or_insert(0) += 1;
            }
            let mut reported: Vec<&str> = Vec::new();
            for column in columns {
                let occurrences = counts.get(column).copied().unwrap_or(0);
                if occurrences > 1 && !reported.contains(&column) {
                    reported.push(column);
                    result.duplicate_columns.push(DuplicateColumn {
                        class: class.name.clone(),
                        column: column.to_string(),
                        occurrences,
                    });
                }
            }
        }

        let mut tables: HashMap<&str, &TypeName> = HashMap::new();
        for class in &document.classes {
            if let Some(first) = tables.insert(class.table.as_str(), &class.name) {
                result.table_conflicts.push(TableConflict {
                    table: class.table.clone(),
                    first: first.clone(),
                    second: class.name.clone(),
                });
            }
        }

        result
    }
}
