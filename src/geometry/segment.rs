use std::fmt::Display;

use super::{Vec2, EPSILON};

/// Finite directed line segment between `start` and `end`. The endpoints may
/// coincide; every operation has a defined result for that degenerate case.
/// Derived quantities are recomputed per call, never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// The same segment traversed in the opposite direction.
    pub fn swap(self) -> Segment {
        Segment::new(self.end, self.start)
    }

    /// Vector from start to end.
    pub fn displacement(self) -> Vec2 {
        self.end - self.start
    }

    /// Euclidean length of the segment.
    pub fn length(self) -> f64 {
        self.displacement().length()
    }

    /// Unit vector from start towards end; the zero vector for a
    /// zero-length segment.
    pub fn direction(self) -> Vec2 {
        self.displacement().unit()
    }

    /// Does the point lie on this segment, within tolerance.
    ///
    /// Collinearity is a cross-product test; the parameter range check runs
    /// per axis so that horizontal and vertical segments classify points on
    /// their zero-displacement axis without dividing by zero.
    pub fn contains(self, pt: Vec2) -> bool {
        let v = self.displacement();
        let t = pt - self.start;
        if (t.y * v.x - t.x * v.y).abs() >= EPSILON {
            return false;
        }
        axis_in_range(t.x, v.x) && axis_in_range(t.y, v.y)
    }

    /// The closest point on this segment to `pt`: the orthogonal projection
    /// onto the infinite line when that lands inside the segment, otherwise
    /// the endpoint nearer to the projection point. A zero-length segment
    /// answers its start point.
    pub fn closest_point(self, pt: Vec2) -> Vec2 {
        let r = self.displacement();
        let rr = r.dot(r);
        if rr == 0. {
            return self.start;
        }

        let t = (pt - self.start).dot(r) / rr;
        let on_line = self.start + r * t;

        if self.contains(on_line) {
            on_line
        } else if (self.start - on_line).length() < (self.end - on_line).length() {
            self.start
        } else {
            self.end
        }
    }

    /// Intersection point of two segments, if any.
    ///
    /// Non-parallel segments are solved parametrically; both parameters must
    /// fall in `[0, 1]` with endpoint-inclusive tolerance. Parallel and
    /// collinear segments have an ambiguous intersection point, so the first
    /// endpoint contained by the other segment is returned as a witness:
    /// one point proving the segments touch, not the overlap region.
    pub fn intersects(self, other: Segment) -> Option<Vec2> {
        let r = self.displacement();
        let s = other.displacement();
        let d = r.x * s.y - r.y * s.x;

        if d == 0. {
            return if self.contains(other.start) {
                Some(other.start)
            } else if self.contains(other.end) {
                Some(other.end)
            } else if other.contains(self.start) {
                Some(self.start)
            } else if other.contains(self.end) {
                Some(self.end)
            } else {
                None
            };
        }

        let q = other.start - self.start;
        let t = (q.x * s.y - q.y * s.x) / d;
        let u = (q.x * r.y - q.y * r.x) / d;

        if param_in_range(t) && param_in_range(u) {
            Some(self.start + r * t)
        } else {
            None
        }
    }
}

fn param_in_range(t: f64) -> bool {
    (-EPSILON..=1. + EPSILON).contains(&t)
}

// One axis of the containment check. A (near-)zero span accepts only a
// (near-)zero delta; anything else falls to the parameter ratio.
fn axis_in_range(delta: f64, span: f64) -> bool {
    if span.abs() < EPSILON {
        delta.abs() < EPSILON
    } else {
        param_in_range(delta / span)
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} -> {}]", self.start, self.end)
    }
}
