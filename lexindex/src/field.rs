use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// The normalized base value of one indexed/sorted field.
///
/// String-domain encoders (boolean, blob, string, the fixed-width
/// big-number encodings, UUID, inet, WKT shapes) produce [FieldValue::Str];
/// encoders whose sorted representation is plain numeric doc-values
/// (integer, long, date) produce [FieldValue::Long]; float-domain encoders
/// produce [FieldValue::Double].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Long(i64),
    Double(f64),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            FieldValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            FieldValue::Double(v) => Some(*v),
            FieldValue::Long(v) => Some(*v as f64),
            _ => None,
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Str(s) => write!(f, "{}", s),
            FieldValue::Long(v) => write!(f, "{}", v),
            FieldValue::Double(v) => write!(f, "{}", v),
        }
    }
}

/// One indexable field produced by a mapper from one column value.
///
/// The indexed flag marks the searchable representation, the sorted flag
/// the doc-values representation; both derive from the same base value.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    value: FieldValue,
    indexed: bool,
    sorted: bool,
}

impl Field {
    pub fn new(name: &str, value: FieldValue, indexed: bool, sorted: bool) -> Self {
        Field {
            name: name.to_string(),
            value,
            indexed,
            sorted,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn indexed(&self) -> bool {
        self.indexed
    }

    pub fn sorted(&self) -> bool {
        self.sorted
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.value)
    }
}

/// Comparable byte key for the sorted (doc-values) representation.
///
/// The central correctness property of the encoders: the byte order of two
/// sort keys always equals the semantic order of the two original values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortKey(Vec<u8>);

impl SortKey {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        SortKey(bytes)
    }

    pub fn from_str_key(s: &str) -> Self {
        SortKey(s.as_bytes().to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}
