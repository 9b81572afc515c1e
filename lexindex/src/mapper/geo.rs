use crate::column::{Columns, HostType, RawValue};
use crate::errors::{ErrorKind, LexError, LexResult};
use crate::field::{Field, FieldValue};
use crate::mapper::numeric::parse_double;
use crate::mapper::{format_error, unsupported_kind};
use crate::spatial::{
    apply_all, check_latitude, check_longitude, format_wkt, parse_wkt, GeoTransformation,
};

pub(crate) const GEO_POINT_SUPPORTED: &[HostType] = &[
    HostType::BigInt,
    HostType::Decimal,
    HostType::Double,
    HostType::Float,
    HostType::Int,
    HostType::SmallInt,
    HostType::Text,
    HostType::TinyInt,
    HostType::VarInt,
];

pub(crate) const GEO_SHAPE_SUPPORTED: &[HostType] = &[HostType::Ascii, HostType::Text];

/// Maps a latitude/longitude column pair to `<name>.lat` and `<name>.lon`
/// double fields.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPointMapper {
    pub(crate) latitude: String,
    pub(crate) longitude: String,
}

impl GeoPointMapper {
    pub fn new(latitude: &str, longitude: &str) -> LexResult<Self> {
        if latitude.is_empty() || longitude.is_empty() {
            return Err(LexError::new(
                "geo_point mapper requires both a latitude and a longitude column",
                ErrorKind::ConfigError,
            ));
        }
        Ok(GeoPointMapper {
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
        })
    }

    pub fn latitude_column(&self) -> &str {
        &self.latitude
    }

    pub fn longitude_column(&self) -> &str {
        &self.longitude
    }

    pub(crate) fn fields(&self, name: &str, columns: &Columns) -> LexResult<Vec<Field>> {
        let lat = self.coordinate(columns, &self.latitude)?;
        let lon = self.coordinate(columns, &self.longitude)?;
        let (lat, lon) = match (lat, lon) {
            (None, None) => return Ok(Vec::new()),
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                return Err(format_error(
                    name,
                    "geo_point",
                    "latitude and longitude must both be present or both absent",
                ))
            }
        };
        check_latitude(name, lat)?;
        check_longitude(name, lon)?;
        Ok(vec![
            Field::new(&format!("{}.lat", name), FieldValue::Double(lat), true, true),
            Field::new(&format!("{}.lon", name), FieldValue::Double(lon), true, true),
        ])
    }

    fn coordinate(&self, columns: &Columns, column: &str) -> LexResult<Option<f64>> {
        match columns.by_name(column).next() {
            None => Ok(None),
            Some(c) => Ok(Some(parse_double(column, "geo_point", c.value())?)),
        }
    }
}

/// Maps WKT shape columns, running the configured transformation pipeline
/// and expanding multi-geometries into one field per component.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoShapeMapper {
    pub(crate) indexed: bool,
    pub(crate) transformations: Vec<GeoTransformation>,
}

impl GeoShapeMapper {
    pub fn new(indexed: bool, transformations: Vec<GeoTransformation>) -> Self {
        GeoShapeMapper {
            indexed,
            transformations,
        }
    }

    pub fn transformations(&self) -> &[GeoTransformation] {
        &self.transformations
    }

    pub(crate) fn base(&self, field: &str, value: &RawValue) -> LexResult<FieldValue> {
        let geometry = self.parse(field, value)?;
        Ok(FieldValue::Str(format_wkt(&geometry)))
    }

    pub(crate) fn fields(&self, name: &str, columns: &Columns) -> LexResult<Vec<Field>> {
        let mut fields = Vec::new();
        for column in columns.by_name(name) {
            if !GEO_SHAPE_SUPPORTED.contains(column.host_type().unwrap()) {
                return Err(unsupported_kind(name, "geo_shape", column.value()));
            }
            let geometry = self.parse(name, column.value())?;
            for component in geometry.components() {
                fields.push(Field::new(
                    name,
                    FieldValue::Str(format_wkt(&component)),
                    self.indexed,
                    false,
                ));
            }
        }
        Ok(fields)
    }

    fn parse(&self, field: &str, value: &RawValue) -> LexResult<crate::spatial::Geometry> {
        let text = match value {
            RawValue::Text(s) => s,
            other => return Err(unsupported_kind(field, "geo_shape", other)),
        };
        let geometry = parse_wkt(text)
            .map_err(|e| LexError::new_with_cause(
                &format!("Field `{}`: invalid shape `{}`", field, text),
                ErrorKind::FormatError,
                e,
            ))?;
        apply_all(&geometry, &self.transformations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_columns(lat: f64, lon: f64) -> Columns {
        Columns::new()
            .add("lat", lat, HostType::Double)
            .add("lon", lon, HostType::Double)
    }

    #[test]
    fn test_geo_point_emits_lat_lon_fields() {
        let mapper = GeoPointMapper::new("lat", "lon").unwrap();
        let fields = mapper.fields("place", &point_columns(41.65, -0.88)).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name(), "place.lat");
        assert_eq!(fields[0].value(), &FieldValue::Double(41.65));
        assert_eq!(fields[1].name(), "place.lon");
        assert_eq!(fields[1].value(), &FieldValue::Double(-0.88));
    }

    #[test]
    fn test_geo_point_validates_ranges() {
        let mapper = GeoPointMapper::new("lat", "lon").unwrap();
        let err = mapper
            .fields("place", &point_columns(91.0, 0.0))
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::RangeError);
        let err = mapper
            .fields("place", &point_columns(0.0, -181.0))
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::RangeError);
    }

    #[test]
    fn test_geo_point_missing_columns() {
        let mapper = GeoPointMapper::new("lat", "lon").unwrap();
        // both absent: nothing indexed
        assert!(mapper.fields("place", &Columns::new()).unwrap().is_empty());
        // one absent: an error
        let partial = Columns::new().add("lat", 1.0, HostType::Double);
        assert!(mapper.fields("place", &partial).is_err());
    }

    #[test]
    fn test_geo_point_requires_column_names() {
        assert!(GeoPointMapper::new("", "lon").is_err());
        assert!(GeoPointMapper::new("lat", "").is_err());
    }

    #[test]
    fn test_geo_shape_normalizes_wkt() {
        let mapper = GeoShapeMapper::new(true, Vec::new());
        let base = mapper
            .base("area", &RawValue::Text("point( 1   2 )".into()))
            .unwrap();
        assert_eq!(base, FieldValue::Str("POINT (1 2)".into()));
    }

    #[test]
    fn test_geo_shape_expands_multi() {
        let mapper = GeoShapeMapper::new(true, Vec::new());
        let columns =
            Columns::new().add("area", "MULTIPOINT (10 40, 40 30)", HostType::Text);
        let fields = mapper.fields("area", &columns).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].value(), &FieldValue::Str("POINT (10 40)".into()));
    }

    #[test]
    fn test_geo_shape_applies_transformations() {
        let mapper = GeoShapeMapper::new(
            true,
            vec![GeoTransformation::Buffer {
                min_distance: None,
                max_distance: Some("1km".into()),
            }],
        );
        let base = mapper
            .base("area", &RawValue::Text("POINT (0 0)".into()))
            .unwrap();
        match base {
            FieldValue::Str(wkt) => assert!(wkt.starts_with("BUFFER (POINT (0 0)")),
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_geo_shape_rejects_unsupported_host_type() {
        let mapper = GeoShapeMapper::new(true, Vec::new());
        // valid WKT text under a non-text host type is a type error,
        // not a format error
        let columns = Columns::new().add("area", "POINT (1 2)", HostType::Blob);
        let err = mapper.fields("area", &columns).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnsupportedType);
    }

    #[test]
    fn test_geo_shape_rejects_bad_wkt() {
        let mapper = GeoShapeMapper::new(true, Vec::new());
        let err = mapper
            .base("area", &RawValue::Text("BLOB (1 2)".into()))
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::FormatError);
    }
}
