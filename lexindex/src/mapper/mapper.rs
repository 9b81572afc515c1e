use crate::column::{Columns, HostType, RawValue};
use crate::errors::{ErrorKind, LexError, LexResult};
use crate::field::{Field, FieldValue, SortKey};
use crate::mapper::bignum::{BigDecimalMapper, BigIntegerMapper};
use crate::mapper::bitemporal::BitemporalMapper;
use crate::mapper::date::DateMapper;
use crate::mapper::geo::{GeoPointMapper, GeoShapeMapper};
use crate::mapper::keyword::{BlobMapper, BooleanMapper, InetMapper, StringMapper};
use crate::mapper::numeric::{DoubleMapper, FloatMapper, IntegerMapper, LongMapper};
use crate::mapper::sortable::{double_key, long_key};
use crate::mapper::text::TextMapper;
use crate::mapper::unsupported_kind;
use crate::mapper::uuid::UuidMapper;
use crate::mapper::{bignum, bitemporal, date, geo, keyword, numeric, text, uuid};

/// A field mapper: one per schema field, chosen by the declared type.
///
/// A closed enum rather than a trait object: the set of mappers is fixed,
/// matching is exhaustive, and adding a variant forces every dispatch site
/// to handle it.
#[derive(Debug, Clone, PartialEq)]
pub enum Mapper {
    Boolean(BooleanMapper),
    String(StringMapper),
    Text(TextMapper),
    Blob(BlobMapper),
    Integer(IntegerMapper),
    Long(LongMapper),
    Float(FloatMapper),
    Double(DoubleMapper),
    BigInteger(BigIntegerMapper),
    BigDecimal(BigDecimalMapper),
    Date(DateMapper),
    Uuid(UuidMapper),
    Inet(InetMapper),
    GeoPoint(GeoPointMapper),
    GeoShape(GeoShapeMapper),
    Bitemporal(BitemporalMapper),
}

impl Mapper {
    /// The config-facing type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Mapper::Boolean(_) => "boolean",
            Mapper::String(_) => "string",
            Mapper::Text(_) => "text",
            Mapper::Blob(_) => "blob",
            Mapper::Integer(_) => "integer",
            Mapper::Long(_) => "long",
            Mapper::Float(_) => "float",
            Mapper::Double(_) => "double",
            Mapper::BigInteger(_) => "big_integer",
            Mapper::BigDecimal(_) => "big_decimal",
            Mapper::Date(_) => "date",
            Mapper::Uuid(_) => "uuid",
            Mapper::Inet(_) => "inet",
            Mapper::GeoPoint(_) => "geo_point",
            Mapper::GeoShape(_) => "geo_shape",
            Mapper::Bitemporal(_) => "bitemporal",
        }
    }

    pub fn indexed(&self) -> bool {
        match self {
            Mapper::Boolean(m) => m.indexed,
            Mapper::String(m) => m.indexed,
            Mapper::Text(m) => m.indexed,
            Mapper::Blob(m) => m.indexed,
            Mapper::Integer(m) => m.indexed,
            Mapper::Long(m) => m.indexed,
            Mapper::Float(m) => m.indexed,
            Mapper::Double(m) => m.indexed,
            Mapper::BigInteger(m) => m.indexed,
            Mapper::BigDecimal(m) => m.indexed,
            Mapper::Date(m) => m.indexed,
            Mapper::Uuid(m) => m.indexed,
            Mapper::Inet(m) => m.indexed,
            Mapper::GeoShape(m) => m.indexed,
            // multi-column mappers always index their derived fields
            Mapper::GeoPoint(_) | Mapper::Bitemporal(_) => true,
        }
    }

    pub fn sorted(&self) -> bool {
        match self {
            Mapper::Boolean(m) => m.sorted,
            Mapper::String(m) => m.sorted,
            Mapper::Blob(m) => m.sorted,
            Mapper::Integer(m) => m.sorted,
            Mapper::Long(m) => m.sorted,
            Mapper::Float(m) => m.sorted,
            Mapper::Double(m) => m.sorted,
            Mapper::BigInteger(m) => m.sorted,
            Mapper::BigDecimal(m) => m.sorted,
            Mapper::Date(m) => m.sorted,
            Mapper::Uuid(m) => m.sorted,
            Mapper::Inet(m) => m.sorted,
            Mapper::GeoPoint(_) | Mapper::Bitemporal(_) => true,
            // analyzed and shape fields have no doc-values representation
            Mapper::Text(_) | Mapper::GeoShape(_) => false,
        }
    }

    /// The host column types this mapper accepts. Collections, maps and
    /// reversed wrappers are judged by their element/value type.
    pub fn supported_types(&self) -> &'static [HostType] {
        match self {
            Mapper::Boolean(_) => keyword::BOOLEAN_SUPPORTED,
            Mapper::String(_) => keyword::STRING_SUPPORTED,
            Mapper::Text(_) => text::TEXT_SUPPORTED,
            Mapper::Blob(_) => keyword::BLOB_SUPPORTED,
            Mapper::Integer(_) => numeric::INTEGER_SUPPORTED,
            Mapper::Long(_) => numeric::LONG_SUPPORTED,
            Mapper::Float(_) => numeric::FLOAT_SUPPORTED,
            Mapper::Double(_) => numeric::DOUBLE_SUPPORTED,
            Mapper::BigInteger(_) => bignum::BIG_INTEGER_SUPPORTED,
            Mapper::BigDecimal(_) => bignum::BIG_DECIMAL_SUPPORTED,
            Mapper::Date(_) => date::DATE_SUPPORTED,
            Mapper::Uuid(_) => uuid::UUID_SUPPORTED,
            Mapper::Inet(_) => keyword::INET_SUPPORTED,
            Mapper::GeoPoint(_) => geo::GEO_POINT_SUPPORTED,
            Mapper::GeoShape(_) => geo::GEO_SHAPE_SUPPORTED,
            Mapper::Bitemporal(_) => bitemporal::BITEMPORAL_SUPPORTED,
        }
    }

    pub fn supports(&self, host_type: &HostType) -> bool {
        self.supported_types().contains(host_type.unwrap())
    }

    /// The analyzer this field is searched with, for text mappers.
    pub fn analyzer(&self) -> Option<&str> {
        match self {
            Mapper::Text(m) => m.analyzer(),
            _ => None,
        }
    }

    /// Normalizes one raw value into the indexed domain.
    pub fn base(&self, field: &str, value: &RawValue) -> LexResult<FieldValue> {
        match self {
            Mapper::Boolean(m) => m.base(field, value),
            Mapper::String(m) => m.base(field, value),
            Mapper::Text(m) => m.base(field, value),
            Mapper::Blob(m) => m.base(field, value),
            Mapper::Integer(m) => m.base(field, value),
            Mapper::Long(m) => m.base(field, value),
            Mapper::Float(m) => m.base(field, value),
            Mapper::Double(m) => m.base(field, value),
            Mapper::BigInteger(m) => m.base(field, value),
            Mapper::BigDecimal(m) => m.base(field, value),
            Mapper::Date(m) => m.base(field, value),
            Mapper::Uuid(m) => m.base(field, value),
            Mapper::Inet(m) => m.base(field, value),
            Mapper::GeoShape(m) => m.base(field, value),
            Mapper::GeoPoint(_) | Mapper::Bitemporal(_) => Err(LexError::new(
                &format!(
                    "Field `{}`: {} mapper reads several source columns and has no single base value",
                    field,
                    self.type_name()
                ),
                ErrorKind::UnsupportedOperation,
            )),
        }
    }

    /// The indexable fields this mapper derives from one row.
    ///
    /// Single-column mappers produce one field per equally-named column;
    /// geo_point and bitemporal assemble theirs from several source columns.
    pub fn fields(&self, name: &str, columns: &Columns) -> LexResult<Vec<Field>> {
        match self {
            Mapper::GeoPoint(m) => m.fields(name, columns),
            Mapper::Bitemporal(m) => m.fields(name, columns),
            Mapper::GeoShape(m) => m.fields(name, columns),
            _ => {
                let mut fields = Vec::new();
                for column in columns.by_name(name) {
                    if !self.supports(column.host_type()) {
                        return Err(unsupported_kind(name, self.type_name(), column.value()));
                    }
                    let base = self.base(name, column.value())?;
                    fields.push(Field::new(name, base, self.indexed(), self.sorted()));
                }
                Ok(fields)
            }
        }
    }

    /// The comparable byte key for a base value, used by the engine's sort.
    pub fn sort_key(&self, field: &str, value: &FieldValue) -> LexResult<SortKey> {
        if !self.sorted() {
            return Err(LexError::new(
                &format!(
                    "Field `{}`: {} mapper does not support sorting",
                    field,
                    self.type_name()
                ),
                ErrorKind::UnsupportedOperation,
            ));
        }
        match value {
            FieldValue::Str(s) => Ok(SortKey::from_str_key(s)),
            FieldValue::Long(v) => Ok(SortKey::from_bytes(long_key(*v).to_vec())),
            FieldValue::Double(v) => Ok(SortKey::from_bytes(double_key(*v).to_vec())),
        }
    }
}
