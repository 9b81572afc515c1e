//! Column model: the raw, typed values handed over by the host database.
//!
//! A [Column] pairs a name with a [RawValue] and the [HostType] the host
//! declared for it; [Columns] is the per-row flat collection the write path
//! consumes. [BigDecimal] backs the arbitrary-precision value kinds.

mod column;
mod decimal;
mod host_type;
mod value;

pub use column::{Column, Columns};
pub use decimal::BigDecimal;
pub use host_type::HostType;
pub use value::RawValue;

pub(crate) use decimal::pow10;
