//! Column and table metadata for searchable models.
//!
//! A `TableMeta` is the record collaborator's view of one table: its name
//! and an ordered list of columns with their PostgreSQL type class. Only
//! textual columns participate in full-text search; everything else is
//! carried so that callers can hand over their schema unfiltered.

use serde::{Deserialize, Serialize};

/// PostgreSQL type class of a column.
///
/// Only the distinctions relevant to search matter here; anything that
/// is not a character type collapses into the non-textual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// `text`
    Text,
    /// `character varying`
    Varchar,
    /// `character`
    Char,
    /// Any integer type (`smallint`, `integer`, `bigint`)
    Integer,
    /// Any floating or fixed-point numeric type
    Numeric,
    /// `boolean`
    Boolean,
    /// Any date/time type
    Timestamp,
    /// `uuid`
    Uuid,
    /// `json` / `jsonb`
    Json,
    /// Anything else
    Other,
}

impl ColumnType {
    /// True for the character types that full-text search targets.
    #[inline]
    pub fn is_textual(self) -> bool {
        matches!(self, ColumnType::Text | ColumnType::Varchar | ColumnType::Char)
    }
}

/// One column of a searchable table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// Schema metadata for one table: its (unquoted) name and ordered columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMeta {
    pub table: String,
    pub columns: Vec<Column>,
}

impl TableMeta {
    pub fn new(table: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            table: table.into(),
            columns,
        }
    }

    /// Names of the textual columns, in declaration order.
    pub fn searchable_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.column_type.is_textual())
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Whether `name` is a textual column of this table.
    pub fn has_searchable_column(&self, name: &str) -> bool {
        self.columns
            .iter()
            .any(|c| c.name == name && c.column_type.is_textual())
    }
}
