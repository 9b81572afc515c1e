//! # Lexindex - Lexicographic Secondary Indexing
//!
//! Lexindex maps host-database column values onto a flat, lexicographically
//! ordered term space, and compiles a rich JSON condition model into
//! engine-agnostic native queries over that space.
//!
//! ## Key Features
//!
//! - **Mappers**: Per-field conversion of typed column values into indexable
//!   terms whose byte order matches the host type's natural order
//! - **Schema**: JSON-configured mapping from field names to mappers, with
//!   write-path field extraction and validation
//! - **Conditions**: A polymorphic JSON query model (match, range, boolean,
//!   fuzzy, phrase, geo, bitemporal, ...) with a fluent builder API
//! - **Search**: Compilation of conditions into [`search::NativeQuery`], an
//!   engine-agnostic query tree
//! - **Spatial**: WKT geometries, distance parsing, and geometric predicates
//!   through the [`spatial`] module
//!
//! ## Quick Start
//!
//! ```rust
//! use lexindex::column::{Columns, HostType};
//! use lexindex::condition::{boolean, match_condition, range, Condition};
//! use lexindex::schema::Schema;
//!
//! # fn main() -> Result<(), lexindex::errors::LexError> {
//! // Declare the indexed fields.
//! let schema = Schema::from_json(
//!     r#"{"fields": {
//!         "name": {"type": "string"},
//!         "age":  {"type": "integer"}
//!     }}"#,
//! )?;
//!
//! // Extract indexable fields from a row.
//! let columns = Columns::new()
//!     .add("name", "alice", HostType::Text)
//!     .add("age", 30i32, HostType::Int);
//! let fields = schema.fields(&columns)?;
//! assert_eq!(fields.len(), 2);
//!
//! // Build a condition and compile it against the schema.
//! let condition: Condition = boolean()
//!     .must(match_condition("name", serde_json::json!("alice")))
//!     .must(range("age").lower(serde_json::json!(18)).include_lower(true))
//!     .into();
//! let query = condition.compile(&schema)?;
//! # let _ = query;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`analysis`] - Text analyzers for tokenizing analyzed string fields
//! - [`column`] - Host column model: typed values, host types, column sets
//! - [`condition`] - The JSON query model and its fluent builders
//! - [`errors`] - Error types and result definitions
//! - [`field`] - Indexable fields and sort keys produced by mappers
//! - [`mapper`] - Column mappers from host values to indexable terms
//! - [`schema`] - Schema configuration, parsing, and the write path
//! - [`search`] - The engine-agnostic native query tree
//! - [`spatial`] - Geometries, WKT, distances, and geo transformations

pub mod analysis;
pub mod column;
pub mod condition;
pub mod errors;
pub mod field;
pub mod mapper;
pub mod schema;
pub mod search;
pub mod spatial;

pub use condition::Condition;
pub use errors::{LexError, LexResult};
pub use schema::{Schema, SchemaBuilder};
pub use search::NativeQuery;
