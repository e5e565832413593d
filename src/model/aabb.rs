//! Axis-aligned bounding boxes stored as a minimum corner plus extents.
//!
//! Overlap is strict on every axis: two boxes that only share a face, edge or
//! corner are not colliding. An axis with a zero or negative extent on either
//! box never overlaps, so degenerate entities are inert rather than sticky.

use glam::Vec3;

/// Box spanning `min .. min + size` on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub size: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, size: Vec3) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec3 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec3 {
        self.min + self.size * 0.5
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self { min: self.min + offset, size: self.size }
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        overlaps(self.min, self.size, other.min, other.size)
    }

    /// True when any extent is zero, negative or NaN.
    pub fn is_degenerate(&self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0 && self.size.z > 0.0)
    }
}

#[inline]
fn axis_overlap(a_min: f32, a_len: f32, b_min: f32, b_len: f32) -> bool {
    a_len > 0.0 && b_len > 0.0 && a_min < b_min + b_len && b_min < a_min + a_len
}

/// Do box A and box B overlap? Pure and symmetric in (A, B).
pub fn overlaps(pos_a: Vec3, size_a: Vec3, pos_b: Vec3, size_b: Vec3) -> bool {
    axis_overlap(pos_a.x, size_a.x, pos_b.x, size_b.x)
        && axis_overlap(pos_a.y, size_a.y, pos_b.y, size_b.y)
        && axis_overlap(pos_a.z, size_a.z, pos_b.z, size_b.z)
}

/// Look-ahead form of [`overlaps`]: `hypothetical_a` is a position the box
/// has not moved to yet.
pub fn would_overlap(hypothetical_a: Vec3, size_a: Vec3, pos_b: Vec3, size_b: Vec3) -> bool {
    overlaps(hypothetical_a, size_a, pos_b, size_b)
}
