use serde::{Deserialize, Serialize};

use crate::condition::{default_boost, is_default_boost, resolve_indexed};
use crate::errors::{ErrorKind, LexError, LexResult};
use crate::mapper::Mapper;
use crate::schema::Schema;
use crate::search::{NativeQuery, ShapeOperation};
use crate::spatial::{
    apply_all, check_latitude, check_longitude, parse_wkt, Distance, GeoTransformation,
};

fn default_operation() -> ShapeOperation {
    ShapeOperation::Intersects
}

fn require_geo_point(schema: &Schema, field: &str) -> LexResult<()> {
    let mapper = resolve_indexed(schema, field)?;
    if !matches!(mapper, Mapper::GeoPoint(_)) {
        return Err(LexError::new(
            &format!(
                "Field `{}`: geo conditions need a geo_point mapper, found {}",
                field,
                mapper.type_name()
            ),
            ErrorKind::UnsupportedOperation,
        ));
    }
    Ok(())
}

/// Matches points within a distance ring around a center.
///
/// Distances are unit strings (`1km`, `500 m`, `2mi`). The engine runs the
/// plan as a bounding-box prefilter plus a haversine refinement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoDistanceCondition {
    pub field: String,
    pub latitude: f64,
    pub longitude: f64,
    pub max_distance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_distance: Option<String>,
    #[serde(default = "default_boost", skip_serializing_if = "is_default_boost")]
    pub boost: f32,
}

impl GeoDistanceCondition {
    pub(crate) fn compile(&self, schema: &Schema) -> LexResult<NativeQuery> {
        require_geo_point(schema, &self.field)?;
        check_latitude(&self.field, self.latitude)?;
        check_longitude(&self.field, self.longitude)?;
        let max = Distance::parse(&self.max_distance)?;
        let min = match &self.min_distance {
            Some(text) => Some(Distance::parse(text)?),
            None => None,
        };
        if let Some(min) = &min {
            if min.meters() >= max.meters() {
                return Err(LexError::new(
                    &format!(
                        "min_distance `{}` must be smaller than max_distance `{}`",
                        self.min_distance.as_deref().unwrap_or_default(),
                        self.max_distance
                    ),
                    ErrorKind::RangeError,
                ));
            }
        }
        Ok(NativeQuery::Distance {
            field: self.field.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            min_meters: min.map(|d| d.meters()),
            max_meters: max.meters(),
        })
    }
}

/// Matches points inside a latitude/longitude rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoBboxCondition {
    pub field: String,
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
    #[serde(default = "default_boost", skip_serializing_if = "is_default_boost")]
    pub boost: f32,
}

impl GeoBboxCondition {
    pub(crate) fn compile(&self, schema: &Schema) -> LexResult<NativeQuery> {
        require_geo_point(schema, &self.field)?;
        check_latitude(&self.field, self.min_latitude)?;
        check_latitude(&self.field, self.max_latitude)?;
        check_longitude(&self.field, self.min_longitude)?;
        check_longitude(&self.field, self.max_longitude)?;
        if self.min_latitude > self.max_latitude || self.min_longitude > self.max_longitude {
            return Err(LexError::new(
                &format!("Field `{}`: inverted bounding box", self.field),
                ErrorKind::RangeError,
            ));
        }
        let range = |suffix: &str, lower: f64, upper: f64| NativeQuery::Range {
            field: format!("{}.{}", self.field, suffix),
            lower: Some(crate::field::FieldValue::Double(lower)),
            upper: Some(crate::field::FieldValue::Double(upper)),
            include_lower: true,
            include_upper: true,
        };
        Ok(NativeQuery::Boolean {
            must: vec![
                range("lat", self.min_latitude, self.max_latitude),
                range("lon", self.min_longitude, self.max_longitude),
            ],
            should: vec![],
            not: vec![],
        })
    }
}

/// Matches indexed shapes holding a spatial relation to a query shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoShapeCondition {
    pub field: String,
    /// The query shape as WKT.
    pub shape: String,
    #[serde(default = "default_operation")]
    pub operation: ShapeOperation,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transformations: Vec<GeoTransformation>,
    #[serde(default = "default_boost", skip_serializing_if = "is_default_boost")]
    pub boost: f32,
}

impl GeoShapeCondition {
    pub(crate) fn compile(&self, schema: &Schema) -> LexResult<NativeQuery> {
        let mapper = resolve_indexed(schema, &self.field)?;
        if !matches!(mapper, Mapper::GeoShape(_)) {
            return Err(LexError::new(
                &format!(
                    "Field `{}`: shape conditions need a geo_shape mapper, found {}",
                    self.field,
                    mapper.type_name()
                ),
                ErrorKind::UnsupportedOperation,
            ));
        }
        let geometry = parse_wkt(&self.shape)?;
        let geometry = apply_all(&geometry, &self.transformations)?;
        Ok(NativeQuery::Shape {
            field: self.field.clone(),
            geometry,
            operation: self.operation,
        })
    }
}
