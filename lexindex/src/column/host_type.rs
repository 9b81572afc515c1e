use std::fmt::{Display, Formatter};

/// Descriptor of a column type as declared by the host database.
///
/// The core never depends on the host's concrete type classes; the host
/// adapter translates its own type system into this narrow descriptor and
/// each mapper answers `supports` against it. Collection types carry their
/// element types so that per-element indexing can be type-checked, and the
/// `Reversed` wrapper (host-side descending clustering order) is
/// transparent for compatibility checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostType {
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    VarInt,
    Decimal,
    Ascii,
    Text,
    Blob,
    Uuid,
    TimeUuid,
    Timestamp,
    Inet,
    /// Ordered collection of elements, indexed one entry per element.
    List {
        element: Box<HostType>,
        frozen: bool,
    },
    /// Unordered collection of elements, indexed one entry per element.
    Set {
        element: Box<HostType>,
        frozen: bool,
    },
    /// Key-value collection; the *values* are indexed.
    Map {
        key: Box<HostType>,
        value: Box<HostType>,
        frozen: bool,
    },
    /// Descending clustering-order wrapper, transparent for type checks.
    Reversed(Box<HostType>),
}

impl HostType {
    /// Resolves wrappers down to the scalar type that actually gets mapped:
    /// `Reversed` is stripped, lists and sets resolve to their element type,
    /// maps to their value type.
    pub fn unwrap(&self) -> &HostType {
        match self {
            HostType::Reversed(inner) => inner.unwrap(),
            HostType::List { element, .. } | HostType::Set { element, .. } => element.unwrap(),
            HostType::Map { value, .. } => value.unwrap(),
            other => other,
        }
    }

    /// True for list/set/map types, regardless of frozen/multi-cell form.
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            HostType::List { .. } | HostType::Set { .. } | HostType::Map { .. }
        )
    }

    /// Convenience constructor for a non-frozen list.
    pub fn list(element: HostType) -> HostType {
        HostType::List {
            element: Box::new(element),
            frozen: false,
        }
    }

    /// Convenience constructor for a non-frozen set.
    pub fn set(element: HostType) -> HostType {
        HostType::Set {
            element: Box::new(element),
            frozen: false,
        }
    }

    /// Convenience constructor for a non-frozen map.
    pub fn map(key: HostType, value: HostType) -> HostType {
        HostType::Map {
            key: Box::new(key),
            value: Box::new(value),
            frozen: false,
        }
    }

    /// Convenience constructor for the reversed wrapper.
    pub fn reversed(inner: HostType) -> HostType {
        HostType::Reversed(Box::new(inner))
    }
}

impl Display for HostType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HostType::Boolean => write!(f, "boolean"),
            HostType::TinyInt => write!(f, "tinyint"),
            HostType::SmallInt => write!(f, "smallint"),
            HostType::Int => write!(f, "int"),
            HostType::BigInt => write!(f, "bigint"),
            HostType::Float => write!(f, "float"),
            HostType::Double => write!(f, "double"),
            HostType::VarInt => write!(f, "varint"),
            HostType::Decimal => write!(f, "decimal"),
            HostType::Ascii => write!(f, "ascii"),
            HostType::Text => write!(f, "text"),
            HostType::Blob => write!(f, "blob"),
            HostType::Uuid => write!(f, "uuid"),
            HostType::TimeUuid => write!(f, "timeuuid"),
            HostType::Timestamp => write!(f, "timestamp"),
            HostType::Inet => write!(f, "inet"),
            HostType::List { element, frozen } => {
                if *frozen {
                    write!(f, "frozen<list<{}>>", element)
                } else {
                    write!(f, "list<{}>", element)
                }
            }
            HostType::Set { element, frozen } => {
                if *frozen {
                    write!(f, "frozen<set<{}>>", element)
                } else {
                    write!(f, "set<{}>", element)
                }
            }
            HostType::Map { key, value, frozen } => {
                if *frozen {
                    write!(f, "frozen<map<{}, {}>>", key, value)
                } else {
                    write!(f, "map<{}, {}>", key, value)
                }
            }
            HostType::Reversed(inner) => write!(f, "reversed<{}>", inner),
        }
    }
}
