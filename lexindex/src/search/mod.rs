//! The engine-agnostic query plan conditions compile into.

mod query;

pub use query::{NativeQuery, ShapeOperation};
