//! Integration-test support for lexindex.
//!
//! Provides [`engine::MemoryEngine`], a small reference engine that executes
//! [`lexindex::search::NativeQuery`] plans over documents indexed through a
//! [`lexindex::schema::Schema`]. It exists to exercise the full pipeline
//! (columns, mappers, conditions, compilation) end to end.

pub mod engine;
