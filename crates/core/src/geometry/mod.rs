use serde::{Deserialize, Serialize};

use crate::{AnimationError, Result};

/// A single polygon vertex.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Ordered polygon vertices. The order defines the boundary and is kept by
/// every transformation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Geometry(Vec<Point>);

impl Geometry {
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Arithmetic mean of the vertices.
    pub fn centroid(&self) -> Result<Point> {
        if self.0.is_empty() {
            return Err(AnimationError::EmptyGeometry);
        }

        let count = self.0.len() as f64;
        let (sum_x, sum_y) = self
            .0
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Ok(Point::new(sum_x / count, sum_y / count))
    }

    /// Builds a new geometry by transforming every vertex in order.
    pub fn map(&self, f: impl FnMut(&Point) -> Point) -> Self {
        Self(self.0.iter().map(f).collect())
    }
}

impl From<Vec<Point>> for Geometry {
    fn from(points: Vec<Point>) -> Self {
        Self(points)
    }
}

impl From<Vec<(f64, f64)>> for Geometry {
    fn from(points: Vec<(f64, f64)>) -> Self {
        points.into_iter().collect()
    }
}

impl<P: Into<Point>> FromIterator<P> for Geometry {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
