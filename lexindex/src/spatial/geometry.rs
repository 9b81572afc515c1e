//! Planar geometry types backing the shape mapper and the geo conditions.
//!
//! Coordinates are geographic: x is longitude, y is latitude. Predicates run
//! in two phases, a cheap bounding-box test first and a type-specific
//! refinement only when the boxes overlap.

use std::fmt::{self, Display};

use crate::errors::{ErrorKind, LexError, LexResult};

/// Earth's mean radius in meters (WGS84).
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// A 2D coordinate (x = longitude, y = latitude).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Coordinate { x, y }
    }

    /// Euclidean distance in coordinate units.
    pub fn distance(&self, other: &Coordinate) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    pub fn contains_point(&self, c: &Coordinate) -> bool {
        c.x >= self.min_x && c.x <= self.max_x && c.y >= self.min_y && c.y <= self.max_y
    }

    /// Smallest box covering both inputs.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Overlap of both inputs, or `None` when they are disjoint.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        if !self.intersects(other) {
            return None;
        }
        Some(BoundingBox::new(
            self.min_x.max(other.min_x),
            self.min_y.max(other.min_y),
            self.max_x.min(other.max_x),
            self.max_y.min(other.max_y),
        ))
    }

    /// Grows the box by `margin` on every side.
    pub fn expanded(&self, margin: f64) -> BoundingBox {
        BoundingBox::new(
            self.min_x - margin,
            self.min_y - margin,
            self.max_x + margin,
            self.max_y + margin,
        )
    }
}

/// A geometry accepted by the shape mapper and the shape condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A single coordinate.
    Point(Coordinate),
    /// An open polyline.
    LineString(Vec<Coordinate>),
    /// A polygon given by its exterior ring.
    Polygon(Vec<Coordinate>),
    /// An axis-aligned rectangle.
    Envelope(BoundingBox),
    /// A circle around a center, radius in coordinate degrees.
    Circle { center: Coordinate, radius: f64 },
    /// A heterogeneous collection of member geometries.
    Multi(Vec<Geometry>),
}

impl Geometry {
    pub fn point(x: f64, y: f64) -> Self {
        Geometry::Point(Coordinate::new(x, y))
    }

    pub fn envelope(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Geometry::Envelope(BoundingBox::new(min_x, min_y, max_x, max_y))
    }

    pub fn circle(center_x: f64, center_y: f64, radius: f64) -> Self {
        Geometry::Circle {
            center: Coordinate::new(center_x, center_y),
            radius,
        }
    }

    /// Flattens `Multi` members into their component geometries, recursively.
    /// A non-multi geometry yields itself.
    pub fn components(&self) -> Vec<Geometry> {
        match self {
            Geometry::Multi(members) => {
                members.iter().flat_map(|m| m.components()).collect()
            }
            other => vec![other.clone()],
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Geometry::Point(c) => BoundingBox::new(c.x, c.y, c.x, c.y),
            Geometry::LineString(coords) | Geometry::Polygon(coords) => coords_bbox(coords),
            Geometry::Envelope(bbox) => *bbox,
            Geometry::Circle { center, radius } => BoundingBox::new(
                center.x - radius,
                center.y - radius,
                center.x + radius,
                center.y + radius,
            ),
            Geometry::Multi(members) => {
                let mut iter = members.iter();
                match iter.next() {
                    None => BoundingBox::new(0.0, 0.0, 0.0, 0.0),
                    Some(first) => iter
                        .fold(first.bounding_box(), |acc, g| acc.union(&g.bounding_box())),
                }
            }
        }
    }

    /// Whether the two geometries share at least one point.
    pub fn intersects(&self, other: &Geometry) -> bool {
        if !self.bounding_box().intersects(&other.bounding_box()) {
            return false;
        }
        match (self, other) {
            (Geometry::Multi(members), _) => members.iter().any(|m| m.intersects(other)),
            (_, Geometry::Multi(members)) => members.iter().any(|m| self.intersects(m)),
            (Geometry::Point(a), Geometry::Point(b)) => a == b,
            (Geometry::Point(p), g) | (g, Geometry::Point(p)) => g.covers_point(p),
            (Geometry::Circle { center: c1, radius: r1 }, Geometry::Circle { center: c2, radius: r2 }) => {
                c1.distance(c2) <= r1 + r2
            }
            (Geometry::Circle { center, radius }, Geometry::Envelope(bbox))
            | (Geometry::Envelope(bbox), Geometry::Circle { center, radius }) => {
                let closest = Coordinate::new(
                    center.x.clamp(bbox.min_x, bbox.max_x),
                    center.y.clamp(bbox.min_y, bbox.max_y),
                );
                center.distance(&closest) <= *radius
            }
            (Geometry::Envelope(a), Geometry::Envelope(b)) => a.intersects(b),
            (Geometry::Polygon(ring), g) | (g, Geometry::Polygon(ring)) => {
                polygon_intersects(ring, g)
            }
            (Geometry::LineString(coords), g) | (g, Geometry::LineString(coords)) => {
                coords.iter().any(|c| g.covers_point(c))
            }
        }
    }

    /// Whether every point of `other` lies inside this geometry.
    pub fn contains(&self, other: &Geometry) -> bool {
        match (self, other) {
            (_, Geometry::Multi(members)) => members.iter().all(|m| self.contains(m)),
            (Geometry::Multi(members), _) => members.iter().any(|m| m.contains(other)),
            (_, Geometry::Point(p)) => self.covers_point(p),
            (Geometry::Circle { center: c1, radius: r1 }, Geometry::Circle { center: c2, radius: r2 }) => {
                c1.distance(c2) + r2 <= *r1
            }
            (Geometry::Envelope(outer), Geometry::Envelope(inner)) => outer.contains_box(inner),
            (Geometry::Envelope(outer), g) => outer.contains_box(&g.bounding_box()),
            (_, Geometry::LineString(coords)) | (_, Geometry::Polygon(coords)) => {
                coords.iter().all(|c| self.covers_point(c))
            }
            // conservative: containment of a boxy shape by a curvy one
            _ => self.bounding_box().contains_box(&other.bounding_box()),
        }
    }

    /// Whether the given coordinate falls on or inside this geometry.
    pub fn covers_point(&self, c: &Coordinate) -> bool {
        match self {
            Geometry::Point(p) => p == c,
            Geometry::LineString(coords) => coords.iter().any(|v| v == c),
            Geometry::Polygon(ring) => point_in_polygon(c, ring),
            Geometry::Envelope(bbox) => bbox.contains_point(c),
            Geometry::Circle { center, radius } => center.distance(c) <= *radius,
            Geometry::Multi(members) => members.iter().any(|m| m.covers_point(c)),
        }
    }
}

fn coords_bbox(coords: &[Coordinate]) -> BoundingBox {
    if coords.is_empty() {
        return BoundingBox::new(0.0, 0.0, 0.0, 0.0);
    }
    let mut bbox = BoundingBox::new(coords[0].x, coords[0].y, coords[0].x, coords[0].y);
    for c in &coords[1..] {
        bbox.min_x = bbox.min_x.min(c.x);
        bbox.min_y = bbox.min_y.min(c.y);
        bbox.max_x = bbox.max_x.max(c.x);
        bbox.max_y = bbox.max_y.max(c.y);
    }
    bbox
}

fn polygon_intersects(ring: &[Coordinate], other: &Geometry) -> bool {
    // any vertex of one inside the other is enough; edge-crossing-only
    // overlaps are approximated by the bbox test already passed
    match other {
        Geometry::Polygon(other_ring) => {
            other_ring.iter().any(|c| point_in_polygon(c, ring))
                || ring.iter().any(|c| point_in_polygon(c, other_ring))
        }
        Geometry::Envelope(bbox) => {
            ring.iter().any(|c| bbox.contains_point(c))
                || point_in_polygon(&Coordinate::new(bbox.min_x, bbox.min_y), ring)
                || point_in_polygon(&Coordinate::new(bbox.max_x, bbox.max_y), ring)
                || point_in_polygon(&Coordinate::new(bbox.min_x, bbox.max_y), ring)
                || point_in_polygon(&Coordinate::new(bbox.max_x, bbox.min_y), ring)
        }
        Geometry::Circle { center, radius } => {
            point_in_polygon(center, ring) || ring.iter().any(|c| center.distance(c) <= *radius)
        }
        other => other
            .bounding_box()
            .intersects(&coords_bbox(ring)),
    }
}

/// Ray-casting point-in-polygon test over the exterior ring.
pub fn point_in_polygon(point: &Coordinate, ring: &[Coordinate]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = (ring[i].x, ring[i].y);
        let (xj, yj) = (ring[j].x, ring[j].y);
        if ((yi > point.y) != (yj > point.y))
            && (point.x < (xj - xi) * (point.y - yi) / (yj - yi) + xi)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Great-circle distance in meters between two geographic coordinates,
/// by the Haversine formula.
pub fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    EARTH_RADIUS_METERS * 2.0 * a.sqrt().asin()
}

/// Converts meters to approximate coordinate degrees at a given latitude.
pub fn meters_to_degrees(meters: f64, latitude: f64) -> f64 {
    let meters_per_degree_lat = 111_320.0;
    let meters_per_degree_lon = 111_320.0 * latitude.to_radians().cos();
    let avg = (meters_per_degree_lat + meters_per_degree_lon) / 2.0;
    if avg > 0.0 {
        meters / avg
    } else {
        meters / meters_per_degree_lat
    }
}

/// Validates a latitude in degrees.
pub fn check_latitude(field: &str, latitude: f64) -> LexResult<f64> {
    if !(-90.0..=90.0).contains(&latitude) || latitude.is_nan() {
        return Err(LexError::new(
            &format!(
                "Field `{}`: latitude must be in [-90, 90], got {}",
                field, latitude
            ),
            ErrorKind::RangeError,
        ));
    }
    Ok(latitude)
}

/// Validates a longitude in degrees.
pub fn check_longitude(field: &str, longitude: f64) -> LexResult<f64> {
    if !(-180.0..=180.0).contains(&longitude) || longitude.is_nan() {
        return Err(LexError::new(
            &format!(
                "Field `{}`: longitude must be in [-180, 180], got {}",
                field, longitude
            ),
            ErrorKind::RangeError,
        ));
    }
    Ok(longitude)
}
