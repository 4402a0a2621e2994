//! # tsearch-query
//!
//! Full-text-search query generation against PostgreSQL `tsvector`/`tsquery`.
//!
//! This crate provides:
//! - Term normalization for the tsquery syntax
//! - Recursive flattening of nested column→term specifications
//! - Paired rank/match SQL fragment generation (plain and operator modes)
//! - Query assembly (rank column, AND/OR filter, descending order)
//! - Dynamic `search_by_<columns>` method resolution with memoization
//!
//! ## Example
//!
//! ```rust
//! use tsearch_core::{Column, ColumnType, TableMeta};
//! use tsearch_query::SearchModel;
//!
//! let model = SearchModel::new(TableMeta::new(
//!     "books",
//!     vec![
//!         Column::new("title", ColumnType::Text),
//!         Column::new("body", ColumnType::Text),
//!     ],
//! ));
//!
//! // One free-text term fans out across every textual column, OR-joined.
//! let query = model.search("vienna", true);
//! assert!(query.to_sql().contains(" OR "));
//! ```

pub mod assemble;
pub mod dynamic;
pub mod fragment;
pub mod model;
pub mod normalize;
pub mod spec;

// Re-export core types
pub use tsearch_core::{Column, ColumnType, Error, PgQuoting, Quoting, Result, TableMeta};

pub use assemble::{assemble, QueryBuilder};
pub use dynamic::{DynamicMethodEntry, DynamicMethodRegistry};
pub use fragment::{build_fragment, build_fragments, FragmentPair, MatchMode};
pub use model::{SearchModel, SearchSpecInput};
pub use normalize::normalize_term;
pub use spec::{parse_spec, SearchSpec, SpecValue, Triple};
