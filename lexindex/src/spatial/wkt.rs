//! Well-known-text reader and writer for the supported geometry types.
//!
//! Accepted forms: POINT, LINESTRING, POLYGON, MULTIPOINT, MULTILINESTRING,
//! MULTIPOLYGON and GEOMETRYCOLLECTION. Polygons keep only their exterior
//! ring; interior rings are parsed and dropped with a warning.

use crate::errors::{ErrorKind, LexError, LexResult};
use crate::spatial::geometry::{Coordinate, Geometry};

/// Parses a WKT string into a [Geometry].
pub fn parse_wkt(input: &str) -> LexResult<Geometry> {
    let mut reader = WktReader::new(input);
    let geometry = reader.read_geometry()?;
    reader.expect_end()?;
    Ok(geometry)
}

/// Formats a [Geometry] back into WKT.
pub fn format_wkt(geometry: &Geometry) -> String {
    match geometry {
        Geometry::Point(c) => format!("POINT ({} {})", c.x, c.y),
        Geometry::LineString(coords) => format!("LINESTRING {}", coords_text(coords)),
        Geometry::Polygon(ring) => format!("POLYGON ({})", coords_text(ring)),
        Geometry::Envelope(bbox) => {
            let ring = vec![
                Coordinate::new(bbox.min_x, bbox.min_y),
                Coordinate::new(bbox.max_x, bbox.min_y),
                Coordinate::new(bbox.max_x, bbox.max_y),
                Coordinate::new(bbox.min_x, bbox.max_y),
                Coordinate::new(bbox.min_x, bbox.min_y),
            ];
            format!("POLYGON ({})", coords_text(&ring))
        }
        Geometry::Circle { center, radius } => {
            // WKT has no circle type; write the defining buffer instead
            format!("BUFFER (POINT ({} {}), {})", center.x, center.y, radius)
        }
        Geometry::Multi(members) => {
            let parts: Vec<String> = members.iter().map(format_wkt).collect();
            format!("GEOMETRYCOLLECTION ({})", parts.join(", "))
        }
    }
}

fn coords_text(coords: &[Coordinate]) -> String {
    let parts: Vec<String> = coords.iter().map(|c| format!("{} {}", c.x, c.y)).collect();
    format!("({})", parts.join(", "))
}

struct WktReader<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> WktReader<'a> {
    fn new(input: &'a str) -> Self {
        WktReader { input, pos: 0 }
    }

    fn error(&self, detail: &str) -> LexError {
        LexError::new(
            &format!("Invalid WKT at offset {}: {}", self.pos, detail),
            ErrorKind::FormatError,
        )
    }

    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.input.len() - trimmed.len();
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.rest().chars().next()
    }

    fn consume(&mut self, expected: char) -> LexResult<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(c) => Err(self.error(&format!("expected `{}`, found `{}`", expected, c))),
            None => Err(self.error(&format!("expected `{}`, found end of input", expected))),
        }
    }

    fn read_keyword(&mut self) -> LexResult<String> {
        self.skip_whitespace();
        let word: String = self
            .rest()
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();
        if word.is_empty() {
            return Err(self.error("expected a geometry keyword"));
        }
        self.pos += word.len();
        Ok(word.to_ascii_uppercase())
    }

    fn read_number(&mut self) -> LexResult<f64> {
        self.skip_whitespace();
        let text: String = self
            .rest()
            .chars()
            .take_while(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
            .collect();
        if text.is_empty() {
            return Err(self.error("expected a number"));
        }
        self.pos += text.len();
        text.parse::<f64>()
            .map_err(|_| self.error(&format!("`{}` is not a number", text)))
    }

    fn read_coordinate(&mut self) -> LexResult<Coordinate> {
        let x = self.read_number()?;
        let y = self.read_number()?;
        Ok(Coordinate::new(x, y))
    }

    /// `( x y, x y, ... )`
    fn read_coordinate_list(&mut self) -> LexResult<Vec<Coordinate>> {
        self.consume('(')?;
        let mut coords = vec![self.read_coordinate()?];
        while self.peek() == Some(',') {
            self.consume(',')?;
            coords.push(self.read_coordinate()?);
        }
        self.consume(')')?;
        Ok(coords)
    }

    /// `( ( ring ), ( ring ), ... )` with only the first ring kept.
    fn read_polygon(&mut self) -> LexResult<Vec<Coordinate>> {
        self.consume('(')?;
        let exterior = self.read_coordinate_list()?;
        let mut holes = 0usize;
        while self.peek() == Some(',') {
            self.consume(',')?;
            self.read_coordinate_list()?;
            holes += 1;
        }
        self.consume(')')?;
        if holes > 0 {
            log::warn!("dropping {} interior polygon ring(s) from WKT input", holes);
        }
        Ok(exterior)
    }

    fn read_geometry(&mut self) -> LexResult<Geometry> {
        let keyword = self.read_keyword()?;
        match keyword.as_str() {
            "POINT" => {
                self.consume('(')?;
                let c = self.read_coordinate()?;
                self.consume(')')?;
                Ok(Geometry::Point(c))
            }
            "LINESTRING" => Ok(Geometry::LineString(self.read_coordinate_list()?)),
            "POLYGON" => Ok(Geometry::Polygon(self.read_polygon()?)),
            "MULTIPOINT" => {
                // both `(1 2, 3 4)` and `((1 2), (3 4))` forms occur
                self.consume('(')?;
                let mut members = vec![self.read_multipoint_member()?];
                while self.peek() == Some(',') {
                    self.consume(',')?;
                    members.push(self.read_multipoint_member()?);
                }
                self.consume(')')?;
                Ok(Geometry::Multi(members))
            }
            "MULTILINESTRING" => {
                self.consume('(')?;
                let mut members = vec![Geometry::LineString(self.read_coordinate_list()?)];
                while self.peek() == Some(',') {
                    self.consume(',')?;
                    members.push(Geometry::LineString(self.read_coordinate_list()?));
                }
                self.consume(')')?;
                Ok(Geometry::Multi(members))
            }
            "MULTIPOLYGON" => {
                self.consume('(')?;
                let mut members = vec![Geometry::Polygon(self.read_polygon()?)];
                while self.peek() == Some(',') {
                    self.consume(',')?;
                    members.push(Geometry::Polygon(self.read_polygon()?));
                }
                self.consume(')')?;
                Ok(Geometry::Multi(members))
            }
            "GEOMETRYCOLLECTION" => {
                self.consume('(')?;
                let mut members = vec![self.read_geometry()?];
                while self.peek() == Some(',') {
                    self.consume(',')?;
                    members.push(self.read_geometry()?);
                }
                self.consume(')')?;
                Ok(Geometry::Multi(members))
            }
            other => Err(self.error(&format!("unsupported geometry type `{}`", other))),
        }
    }

    fn read_multipoint_member(&mut self) -> LexResult<Geometry> {
        if self.peek() == Some('(') {
            self.consume('(')?;
            let c = self.read_coordinate()?;
            self.consume(')')?;
            Ok(Geometry::Point(c))
        } else {
            Ok(Geometry::Point(self.read_coordinate()?))
        }
    }

    fn expect_end(&mut self) -> LexResult<()> {
        match self.peek() {
            None => Ok(()),
            Some(c) => Err(self.error(&format!("trailing input starting at `{}`", c))),
        }
    }
}
