//! Integer segment geometry for goal-line crossing
//!
//! Everything here works on grid points (`IVec2`). Differences are taken in
//! `i64` and cross products in `i128`, so any `i32` coordinates are safe.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Orientation of an ordered point triplet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// A straight segment between two grid points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub p1: IVec2,
    pub p2: IVec2,
}

impl Segment {
    pub const fn new(p1: IVec2, p2: IVec2) -> Self {
        Self { p1, p2 }
    }

    /// True if the segment has zero length
    #[inline]
    pub fn is_point(&self) -> bool {
        self.p1 == self.p2
    }

    /// Check whether this segment touches `other` (shared endpoints and
    /// collinear overlap count)
    #[inline]
    pub fn intersects(&self, other: &Segment) -> bool {
        intersects(self, other)
    }
}

/// Orientation of the triplet (p, q, r)
///
/// Sign of `(q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y)`:
/// positive is clockwise, negative counter-clockwise, zero collinear.
pub fn orientation(p: IVec2, q: IVec2, r: IVec2) -> Orientation {
    let (p, q, r) = (p.as_i64vec2(), q.as_i64vec2(), r.as_i64vec2());
    let (a, b) = (q - p, r - q);
    let val = i128::from(a.y) * i128::from(b.x) - i128::from(a.x) * i128::from(b.y);

    match val.cmp(&0) {
        std::cmp::Ordering::Greater => Orientation::Clockwise,
        std::cmp::Ordering::Less => Orientation::CounterClockwise,
        std::cmp::Ordering::Equal => Orientation::Collinear,
    }
}

/// Whether `q` lies inside the bounding box of `p` and `r`
///
/// Only meaningful once the three points are known to be collinear.
#[inline]
pub fn on_segment(p: IVec2, q: IVec2, r: IVec2) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Segment intersection test, including the collinear degenerate cases
pub fn intersects(a: &Segment, b: &Segment) -> bool {
    let o1 = orientation(a.p1, a.p2, b.p1);
    let o2 = orientation(a.p1, a.p2, b.p2);
    let o3 = orientation(b.p1, b.p2, a.p1);
    let o4 = orientation(b.p1, b.p2, a.p2);

    // Each segment's endpoints straddle the other's line
    if o1 != o2 && o3 != o4 {
        return true;
    }

    // An endpoint lies on the other segment
    (o1 == Orientation::Collinear && on_segment(a.p1, b.p1, a.p2))
        || (o2 == Orientation::Collinear && on_segment(a.p1, b.p2, a.p2))
        || (o3 == Orientation::Collinear && on_segment(b.p1, a.p1, b.p2))
        || (o4 == Orientation::Collinear && on_segment(b.p1, a.p2, b.p2))
}
