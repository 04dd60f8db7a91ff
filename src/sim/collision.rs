//! Collision detection for axis-aligned geometry
//!
//! Everything on the field is an axis-aligned box except the ball, which is a
//! circle. Two tests cover the whole game: box vs box (paddle vs pickups) and
//! circle vs box (ball vs bricks and paddle), the latter also classifying
//! which side of the box was struck.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box, top-left anchored (screen space, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    /// Extent along each axis, never negative
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size: size.max(Vec2::ZERO),
        }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.half_extents()
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }
}

/// Side of a box the ball struck, named after the contact vector's heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Evaluation order for classification; earlier entries win ties
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit compass vector for this direction
    pub fn compass(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, 1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Down => Vec2::new(0.0, -1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
        }
    }

    /// True for Left/Right, i.e. the impact should reflect horizontal motion
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Pick the compass direction with the largest strictly positive dot
    /// product against `v`. A zero vector has no direction.
    pub fn classify(v: Vec2) -> Option<Direction> {
        let n = v.normalize_or_zero();
        let mut best = None;
        let mut max = 0.0;
        for dir in Direction::ALL {
            let dot = n.dot(dir.compass());
            if dot > max {
                max = dot;
                best = Some(dir);
            }
        }
        best
    }
}

/// Result of a ball vs box check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub collided: bool,
    /// Struck side; `None` on a miss or when the ball center sits on the box
    pub direction: Option<Direction>,
    /// Vector between the closest box point and the ball center
    pub penetration: Vec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            collided: false,
            direction: None,
            penetration: Vec2::ZERO,
        }
    }
}

/// Inclusive overlap test: boxes that merely touch count as overlapping
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    let a_max = a.max();
    let b_max = b.max();
    let overlap_x = a_max.x >= b.pos.x && b_max.x >= a.pos.x;
    let overlap_y = a_max.y >= b.pos.y && b_max.y >= a.pos.y;
    overlap_x && overlap_y
}

/// Check collision between a ball and a box
///
/// The closest point on the box is found by clamping the center-to-center
/// vector onto the box half-extents. The ball hits when that point lies
/// strictly closer than its radius.
pub fn ball_aabb_collision(ball_center: Vec2, ball_radius: f32, rect: &Aabb) -> CollisionResult {
    let half = rect.half_extents();
    let rect_center = rect.center();

    let diff = ball_center - rect_center;
    let clamped = diff.clamp(-half, half);
    let closest = rect_center + clamped;

    let contact = closest - ball_center;
    if contact.length() < ball_radius {
        CollisionResult {
            collided: true,
            direction: Direction::classify(contact),
            penetration: contact,
        }
    } else {
        CollisionResult::miss()
    }
}
