//! # tsearch-core
//!
//! Core types, traits, and abstractions for the tsearch library.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the query-generation crate depends on:
//! - Column metadata for searchable tables
//! - The identifier/literal quoting seam (`Quoting` trait, PostgreSQL impl)
//! - The shared error taxonomy
//! - Structured logging field constants

pub mod column;
pub mod error;
pub mod logging;
pub mod quoting;

// Re-export commonly used types at crate root
pub use column::{Column, ColumnType, TableMeta};
pub use error::{Error, Result};
pub use quoting::{PgQuoting, Quoting};
