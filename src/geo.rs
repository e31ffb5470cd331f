//! # Geo
//!
//! Geometric primitives used while building tours. Points wrap ultraviolet
//! double precision vectors, 2d coordinates are stored with a zero z so the
//! same cross product serves both dimensionalities.

use float_cmp::approx_eq;
use std::{
    cmp::PartialEq,
    ops::{Mul, Sub},
};
use ultraviolet::DVec3;

#[derive(Clone, Copy, Debug, Default)]
pub struct Point {
    pub pos: DVec3,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Point {
        Point {
            pos: DVec3::new(x, y, z),
        }
    }

    pub fn new_2d(x: f64, y: f64) -> Point { Point::new(x, y, 0.) }

    pub fn cross(&self, other: &Point) -> Point { self.pos.cross(other.pos).into() }

    pub fn mag(&self) -> f64 { self.pos.mag() }
}

impl Sub<Point> for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point { (self.pos - other.pos).into() }
}

impl Mul<Point> for Point {
    type Output = Point;

    /// component-wise product
    fn mul(self, other: Point) -> Point {
        Point::new(
            self.pos.x * other.pos.x,
            self.pos.y * other.pos.y,
            self.pos.z * other.pos.z,
        )
    }
}

impl From<DVec3> for Point {
    fn from(vec3: DVec3) -> Self { Point { pos: vec3 } }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        approx_eq!(f64, self.pos.x, other.pos.x, ulps = 3)
            && approx_eq!(f64, self.pos.y, other.pos.y, ulps = 3)
            && approx_eq!(f64, self.pos.z, other.pos.z, ulps = 3)
    }
}

/// Euclidean distance between two points.
///
/// # Examples
///
/// ```
/// use tour_geo::geo::{distance, Point};
/// let a = Point::new_2d(0., 0.);
/// let b = Point::new_2d(3., 4.);
/// assert_eq!(distance(&a, &b), 5.);
/// ```
pub fn distance(left: &Point, right: &Point) -> f64 { (*right - *left).mag() }

/// Cross product of `q - p` and `r - p`.
///
/// For 2d points only the z component can be non zero, and it holds the
/// scalar 2d cross product.
///
/// # Examples
///
/// ```
/// use tour_geo::geo::{orientation_cross, Point};
/// let p = Point::new_2d(0., 0.);
/// let q = Point::new_2d(1., 0.);
/// let r = Point::new_2d(0., 1.);
/// assert_eq!(orientation_cross(&p, &q, &r), Point::new(0., 0., 1.));
/// ```
pub fn orientation_cross(p: &Point, q: &Point, r: &Point) -> Point { (*q - *p).cross(&(*r - *p)) }

/// true when every component is less than or equal to zero
fn all_non_positive(point: &Point) -> bool {
    point.pos.x <= 0. && point.pos.y <= 0. && point.pos.z <= 0.
}

/// Trait for intersection of different geo types
pub trait Intersect<RHS = Self> {
    type Output;
    fn intersect(self, rhs: RHS) -> Self::Output;
}

/// Directed edge between two points. Intersection ignores direction.
#[derive(PartialEq, Clone, Copy, Debug, Default)]
pub struct Segment {
    pub p1: Point,
    pub p2: Point,
}

impl Segment {
    pub fn new(p1: (f64, f64, f64), p2: (f64, f64, f64)) -> Segment {
        Segment {
            p1: Point::new(p1.0, p1.1, p1.2),
            p2: Point::new(p2.0, p2.1, p2.2),
        }
    }

    pub fn from_points(p1: &Point, p2: &Point) -> Segment { Segment { p1: *p1, p2: *p2 } }

    pub fn len(&self) -> f64 { distance(&self.p1, &self.p2) }

    pub fn reversed(&self) -> Segment { Segment::from_points(&self.p2, &self.p1) }

    /// Check if segments cross or touch.
    ///
    /// Orientation test applied per component of the cross products, so
    /// for 3d input it is an approximation of a true 3d segment test.
    /// Segments whose bounding boxes don't overlap never intersect, past
    /// that shared endpoints, collinear overlaps and zero length segments
    /// all count as intersecting. The box check only changes the answer for
    /// collinear segments with a gap between them, which the bare
    /// orientation test reports as intersecting.
    ///
    /// # Examples
    ///
    /// ```
    /// use tour_geo::geo::Segment;
    /// let line1 = Segment::new((0., 0., 0.), (1., 1., 0.));
    /// let line2 = Segment::new((1., 0., 0.), (0., 1., 0.));
    /// assert!(line1.intersects(&line2));
    /// let line3 = Segment::new((2., 0., 0.), (3., 0., 0.));
    /// assert!(!line1.intersects(&line3));
    /// ```
    pub fn intersects(&self, other: &Segment) -> bool {
        if !self.bbox_overlaps(other) {
            return false;
        }
        let cross1 = orientation_cross(&self.p1, &self.p2, &other.p1);
        let cross2 = orientation_cross(&self.p1, &self.p2, &other.p2);
        let cross3 = orientation_cross(&other.p1, &other.p2, &self.p1);
        let cross4 = orientation_cross(&other.p1, &other.p2, &self.p2);
        all_non_positive(&(cross1 * cross2)) && all_non_positive(&(cross3 * cross4))
    }

    /// Check if bounding boxes overlap, touching counts
    pub fn bbox_overlaps(&self, other: &Segment) -> bool {
        self.min_x() <= other.max_x()
            && other.min_x() <= self.max_x()
            && self.min_y() <= other.max_y()
            && other.min_y() <= self.max_y()
            && self.min_z() <= other.max_z()
            && other.min_z() <= self.max_z()
    }

    pub fn min_x(self) -> f64 { self.p1.pos.x.min(self.p2.pos.x) }

    pub fn min_y(self) -> f64 { self.p1.pos.y.min(self.p2.pos.y) }

    pub fn min_z(self) -> f64 { self.p1.pos.z.min(self.p2.pos.z) }

    pub fn max_x(self) -> f64 { self.p1.pos.x.max(self.p2.pos.x) }

    pub fn max_y(self) -> f64 { self.p1.pos.y.max(self.p2.pos.y) }

    pub fn max_z(self) -> f64 { self.p1.pos.z.max(self.p2.pos.z) }
}

impl Intersect<&Segment> for &Segment {
    type Output = bool;

    fn intersect(self, other: &Segment) -> bool { self.intersects(other) }
}

/// Check a candidate segment against every committed segment
pub fn intersects_any(candidate: &Segment, committed: &[Segment]) -> bool {
    committed.iter().any(|segment| segment.intersect(candidate))
}
