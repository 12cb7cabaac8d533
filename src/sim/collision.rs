//! Axis-aligned collision primitives
//!
//! All collision tests are rectangle/circle approximations: the ball is
//! treated as its bounding box for detection, with the true radius used only
//! for reposition after a reflection. Brick bounces resolve along the
//! minimum-penetration axis.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box, stored as top-left corner + size
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Overlap test against another box
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }

    /// Containment test for a point (projectile tips are points)
    pub fn contains_point(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x > self.min.x && p.x < max.x && p.y > self.min.y && p.y < max.y
    }
}

/// Axis along which an overlapping ball should reflect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceAxis {
    Horizontal,
    Vertical,
}

/// Pick the reflection axis for a ball overlapping a box: whichever axis has
/// the smaller penetration is the one the ball entered through.
pub fn penetration_axis(ball_pos: Vec2, ball_radius: f32, rect: &Aabb) -> BounceAxis {
    let center = rect.center();
    let overlap_x = (rect.size.x / 2.0 + ball_radius) - (ball_pos.x - center.x).abs();
    let overlap_y = (rect.size.y / 2.0 + ball_radius) - (ball_pos.y - center.y).abs();
    if overlap_x < overlap_y {
        BounceAxis::Horizontal
    } else {
        BounceAxis::Vertical
    }
}
