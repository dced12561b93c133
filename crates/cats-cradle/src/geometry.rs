//! Core geometry types and predicates for cats-cradle.
//!
//! Everything downstream works in stimulus coordinates: the origin sits at
//! the center of the field, x grows right, y grows down (SVG convention).

use serde::{Deserialize, Serialize};

/// Determinant magnitude below this treats two segments as parallel.
const PARALLEL_EPSILON: f64 = 1e-10;

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A line segment defined by two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

// ============================================================================
// IMPLEMENTATIONS (methods)
// ============================================================================

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Line {
    #[inline]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Get the start point of the line.
    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Get the end point of the line.
    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Length of the line segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }
}

// ============================================================================
// PREDICATES (free functions)
// ============================================================================

/// Check whether two segments properly cross.
///
/// Crossing means the intersection point lies strictly inside BOTH
/// segments. Touching at an endpoint does not count, so two connecting
/// segments that meet at a shared dot are not a crossing. Parallel and
/// collinear segments never count either, even when they overlap.
pub fn lines_intersect(a: &Line, b: &Line) -> bool {
    let denom = (a.x1 - a.x2) * (b.y1 - b.y2) - (a.y1 - a.y2) * (b.x1 - b.x2);
    if denom.abs() < PARALLEL_EPSILON {
        return false;
    }

    // t parameterizes a, u parameterizes b, both in [0,1] along the segment
    let t = ((a.x1 - b.x1) * (b.y1 - b.y2) - (a.y1 - b.y1) * (b.x1 - b.x2)) / denom;
    let u = -((a.x1 - a.x2) * (a.y1 - b.y1) - (a.y1 - a.y2) * (a.x1 - b.x1)) / denom;

    t > 0.0 && t < 1.0 && u > 0.0 && u < 1.0
}

/// Shortest distance from a point to a segment.
///
/// Projects onto the infinite line, clamps the projection parameter to
/// the segment, then measures to that closest point. A zero-length
/// segment degrades to plain point distance.
pub fn point_to_segment_distance(p: Point, line: &Line) -> f64 {
    let dx = line.x2 - line.x1;
    let dy = line.y2 - line.y1;

    if dx == 0.0 && dy == 0.0 {
        return p.distance(line.start());
    }

    let t = ((p.x - line.x1) * dx + (p.y - line.y1) * dy) / (dx * dx + dy * dy);
    let t = t.clamp(0.0, 1.0);

    let closest = Point::new(line.x1 + t * dx, line.y1 + t * dy);
    p.distance(closest)
}

// ============================================================================
// TESTS
// ============================================================================
