//! Spatial support: geometry model, WKT reading and writing, and the shape
//! transformation pipeline.

mod geometry;
mod transform;
mod wkt;

pub use geometry::{
    check_latitude, check_longitude, haversine_meters, meters_to_degrees, point_in_polygon,
    BoundingBox, Coordinate, Geometry, EARTH_RADIUS_METERS,
};
pub use transform::{apply_all, Distance, GeoTransformation};
pub use wkt::{format_wkt, parse_wkt};
