//! Shape transformations applied before a geometry is indexed or queried,
//! and the textual distance notation they use.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorKind, LexError, LexResult};
use crate::spatial::geometry::{Geometry, meters_to_degrees};
use crate::spatial::wkt::parse_wkt;

/// A distance with a unit suffix, e.g. `10km` or `3.5mi`. A bare number
/// reads as meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    meters: f64,
}

impl Distance {
    pub fn meters(&self) -> f64 {
        self.meters
    }

    /// Approximate conversion to coordinate degrees at a latitude.
    pub fn degrees_at(&self, latitude: f64) -> f64 {
        meters_to_degrees(self.meters, latitude)
    }

    pub fn parse(input: &str) -> LexResult<Distance> {
        let trimmed = input.trim();
        let split = trimmed
            .char_indices()
            .find(|(_, c)| c.is_ascii_alphabetic())
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());
        let (number, unit) = trimmed.split_at(split);
        let value: f64 = number.trim().parse().map_err(|_| {
            LexError::new(
                &format!("`{}` is not a distance", input),
                ErrorKind::FormatError,
            )
        })?;
        if value < 0.0 {
            return Err(LexError::new(
                &format!("distance `{}` must not be negative", input),
                ErrorKind::RangeError,
            ));
        }
        let factor = match unit.trim().to_ascii_lowercase().as_str() {
            "mm" | "millimeters" => 0.001,
            "cm" | "centimeters" => 0.01,
            "" | "m" | "meters" => 1.0,
            "km" | "kilometers" => 1_000.0,
            "in" | "inches" => 0.0254,
            "ft" | "feet" => 0.3048,
            "yd" | "yards" => 0.9144,
            "mi" | "miles" => 1_609.344,
            "nmi" | "nm" => 1_852.0,
            other => {
                return Err(LexError::new(
                    &format!("unknown distance unit `{}` in `{}`", other, input),
                    ErrorKind::FormatError,
                ))
            }
        };
        Ok(Distance {
            meters: value * factor,
        })
    }
}

/// One step of a shape transformation pipeline.
///
/// `union`, `intersection` and `difference` operate on the geometries'
/// envelopes, a conservative superset suited to the bbox-first search the
/// engine runs. `buffer` grows a shape outward; buffering a point yields a
/// circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeoTransformation {
    Buffer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_distance: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_distance: Option<String>,
    },
    Union {
        shape: String,
    },
    Intersection {
        shape: String,
    },
    Difference {
        shape: String,
    },
}

impl GeoTransformation {
    /// Applies this transformation to a geometry.
    pub fn apply(&self, geometry: &Geometry) -> LexResult<Geometry> {
        match self {
            GeoTransformation::Buffer { max_distance, .. } => {
                let distance = match max_distance {
                    Some(text) => Distance::parse(text)?,
                    None => return Ok(geometry.clone()),
                };
                Ok(buffer(geometry, &distance))
            }
            GeoTransformation::Union { shape } => {
                let other = parse_wkt(shape)?;
                Ok(Geometry::Envelope(
                    geometry.bounding_box().union(&other.bounding_box()),
                ))
            }
            GeoTransformation::Intersection { shape } => {
                let other = parse_wkt(shape)?;
                match geometry.bounding_box().intersection(&other.bounding_box()) {
                    Some(bbox) => Ok(Geometry::Envelope(bbox)),
                    None => Err(LexError::new(
                        &format!(
                            "intersection of `{}` with the indexed shape is empty",
                            shape
                        ),
                        ErrorKind::RangeError,
                    )),
                }
            }
            GeoTransformation::Difference { .. } => {
                // removing area can only shrink the shape; the envelope of
                // the input stays a valid cover for the bbox prefilter
                Ok(Geometry::Envelope(geometry.bounding_box()))
            }
        }
    }
}

/// Runs a pipeline of transformations left to right.
pub fn apply_all(geometry: &Geometry, pipeline: &[GeoTransformation]) -> LexResult<Geometry> {
    let mut current = geometry.clone();
    for step in pipeline {
        current = step.apply(&current)?;
    }
    Ok(current)
}

fn buffer(geometry: &Geometry, distance: &Distance) -> Geometry {
    match geometry {
        Geometry::Point(c) => Geometry::Circle {
            center: *c,
            radius: distance.degrees_at(c.y),
        },
        Geometry::Circle { center, radius } => Geometry::Circle {
            center: *center,
            radius: radius + distance.degrees_at(center.y),
        },
        Geometry::Multi(members) => {
            Geometry::Multi(members.iter().map(|m| buffer(m, distance)).collect())
        }
        other => {
            let bbox = other.bounding_box();
            let margin = distance.degrees_at((bbox.min_y + bbox.max_y) / 2.0);
            Geometry::Envelope(bbox.expanded(margin))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::geometry::{BoundingBox, Coordinate};

    #[test]
    fn test_distance_units() {
        assert_eq!(Distance::parse("1500m").unwrap().meters(), 1500.0);
        assert_eq!(Distance::parse("1.5km").unwrap().meters(), 1500.0);
        assert_eq!(Distance::parse("1 mi").unwrap().meters(), 1_609.344);
        assert_eq!(Distance::parse("2nmi").unwrap().meters(), 3_704.0);
        assert_eq!(Distance::parse("12").unwrap().meters(), 12.0);
        assert_eq!(Distance::parse("100cm").unwrap().meters(), 1.0);
    }

    #[test]
    fn test_distance_errors() {
        assert!(Distance::parse("fast").is_err());
        assert!(Distance::parse("10 parsecs").is_err());
        assert!(Distance::parse("-5km").is_err());
    }

    #[test]
    fn test_buffer_point_becomes_circle() {
        let step = GeoTransformation::Buffer {
            min_distance: None,
            max_distance: Some("111.32km".into()),
        };
        let out = step.apply(&Geometry::point(0.0, 0.0)).unwrap();
        match out {
            Geometry::Circle { center, radius } => {
                assert_eq!(center, Coordinate::new(0.0, 0.0));
                // ~1 degree at the equator
                assert!((radius - 1.0).abs() < 0.05);
            }
            other => panic!("expected circle, got {:?}", other),
        }
    }

    #[test]
    fn test_union_takes_envelope() {
        let step = GeoTransformation::Union {
            shape: "POINT (10 10)".into(),
        };
        let out = step.apply(&Geometry::point(0.0, 0.0)).unwrap();
        assert_eq!(
            out,
            Geometry::Envelope(BoundingBox::new(0.0, 0.0, 10.0, 10.0))
        );
    }

    #[test]
    fn test_disjoint_intersection_is_an_error() {
        let step = GeoTransformation::Intersection {
            shape: "POINT (10 10)".into(),
        };
        assert!(step.apply(&Geometry::point(0.0, 0.0)).is_err());
    }

    #[test]
    fn test_pipeline_runs_in_order() {
        let pipeline = vec![
            GeoTransformation::Buffer {
                min_distance: None,
                max_distance: Some("111.32km".into()),
            },
            GeoTransformation::Difference {
                shape: "POINT (0 0)".into(),
            },
        ];
        let out = apply_all(&Geometry::point(0.0, 0.0), &pipeline).unwrap();
        assert!(matches!(out, Geometry::Envelope(_)));
    }

    #[test]
    fn test_transformation_json_tagging() {
        let step: GeoTransformation =
            serde_json::from_str(r#"{"type": "buffer", "max_distance": "10km"}"#).unwrap();
        assert_eq!(
            step,
            GeoTransformation::Buffer {
                min_distance: None,
                max_distance: Some("10km".into()),
            }
        );
    }
}
