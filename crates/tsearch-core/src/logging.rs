//! Structured logging field name constants for tsearch.
//!
//! All crates use these constants for consistent structured logging fields,
//! so aggregation tools can query by standardized names across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | DEBUG | Decision points (dynamic-method resolution, assembler no-op) |
//! | TRACE | Per-triple fragment generation |

/// Component within the library.
/// Examples: "spec_parser", "fragment_builder", "assembler", "dynamic"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "search", "advanced_search", "resolve", "assemble"
pub const OPERATION: &str = "op";

/// Dynamic search method name being resolved or dispatched.
pub const METHOD_NAME: &str = "method_name";

/// Target table of a search.
pub const TABLE: &str = "table";

/// Number of flattened (table, column, term) triples in a search.
pub const TRIPLE_COUNT: &str = "triple_count";

/// Number of columns a dynamic method resolved to.
pub const COLUMN_COUNT: &str = "column_count";
