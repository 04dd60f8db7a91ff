//! The ball: the only free-moving body on the field

use glam::{Vec2, Vec3};

use super::collision::Aabb;

/// A ball entity
///
/// `pos` is the top-left corner of the ball's bounding square, so the
/// center sits at `pos + radius`.
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Attached to the paddle, waiting for launch
    pub stuck: bool,
    /// Re-attach to the paddle on every paddle hit
    pub sticky: bool,
    /// Ignore collision response against breakable bricks
    pub pass_through: bool,
    pub color: Vec3,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius,
            stuck: true,
            sticky: false,
            pass_through: false,
            color: Vec3::ONE,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::splat(self.radius * 2.0)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius)
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size())
    }

    /// Advance the ball and bounce it off the left, right and top walls
    ///
    /// The bottom is open: falling out is a lost ball, not a bounce.
    pub fn integrate(&mut self, dt: f32, field_width: f32) -> Vec2 {
        if self.stuck {
            return self.pos;
        }

        self.pos += self.vel * dt;

        let size = self.size();
        if self.pos.x <= 0.0 {
            self.vel.x = -self.vel.x;
            self.pos.x = 0.0;
        } else if self.pos.x + size.x >= field_width {
            self.vel.x = -self.vel.x;
            self.pos.x = field_width - size.x;
        }

        if self.pos.y <= 0.0 {
            self.vel.y = -self.vel.y;
            self.pos.y = 0.0;
        }

        self.pos
    }

    /// Put the ball back on the paddle. Power-up flags are left alone.
    pub fn reset(&mut self, pos: Vec2, vel: Vec2) {
        self.pos = pos;
        self.vel = vel;
        self.stuck = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FIELD_WIDTH: f32 = 800.0;

    fn free_ball(pos: Vec2, vel: Vec2) -> Ball {
        let mut ball = Ball::new(pos, 12.5, vel);
        ball.stuck = false;
        ball
    }

    #[test]
    fn test_stuck_ball_does_not_move() {
        let mut ball = Ball::new(Vec2::new(100.0, 100.0), 12.5, Vec2::new(100.0, -350.0));
        ball.integrate(1.0, FIELD_WIDTH);
        assert_eq!(ball.pos, Vec2::new(100.0, 100.0));
        assert_eq!(ball.vel, Vec2::new(100.0, -350.0));
    }

    #[test]
    fn test_free_ball_moves_by_velocity() {
        let mut ball = free_ball(Vec2::new(100.0, 300.0), Vec2::new(100.0, -350.0));
        ball.integrate(0.1, FIELD_WIDTH);
        assert!((ball.pos.x - 110.0).abs() < 1e-4);
        assert!((ball.pos.y - 265.0).abs() < 1e-4);
    }

    #[test]
    fn test_left_wall_bounce() {
        let mut ball = free_ball(Vec2::new(5.0, 300.0), Vec2::new(-100.0, 0.0));
        ball.integrate(0.1, FIELD_WIDTH);
        assert_eq!(ball.pos.x, 0.0);
        assert_eq!(ball.vel.x, 100.0);
    }

    #[test]
    fn test_right_wall_bounce() {
        let mut ball = free_ball(Vec2::new(770.0, 300.0), Vec2::new(100.0, 0.0));
        ball.integrate(0.1, FIELD_WIDTH);
        assert_eq!(ball.pos.x, FIELD_WIDTH - 25.0);
        assert_eq!(ball.vel.x, -100.0);
    }

    #[test]
    fn test_top_wall_bounce() {
        let mut ball = free_ball(Vec2::new(300.0, 5.0), Vec2::new(0.0, -100.0));
        ball.integrate(0.1, FIELD_WIDTH);
        assert_eq!(ball.pos.y, 0.0);
        assert_eq!(ball.vel.y, 100.0);
    }

    #[test]
    fn test_corner_clamps_both_axes() {
        let mut ball = free_ball(Vec2::new(2.0, 2.0), Vec2::new(-100.0, -100.0));
        ball.integrate(0.1, FIELD_WIDTH);
        assert_eq!(ball.pos, Vec2::ZERO);
        assert_eq!(ball.vel, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_no_bottom_bounce() {
        let mut ball = free_ball(Vec2::new(300.0, 590.0), Vec2::new(0.0, 100.0));
        ball.integrate(1.0, FIELD_WIDTH);
        assert!(ball.pos.y > 600.0);
        assert_eq!(ball.vel.y, 100.0);
    }

    #[test]
    fn test_reset_keeps_power_up_flags() {
        let mut ball = free_ball(Vec2::new(300.0, 300.0), Vec2::new(10.0, 10.0));
        ball.sticky = true;
        ball.pass_through = true;
        ball.reset(Vec2::new(1.0, 2.0), Vec2::new(100.0, -350.0));
        assert!(ball.stuck);
        assert!(ball.sticky);
        assert!(ball.pass_through);
        assert_eq!(ball.pos, Vec2::new(1.0, 2.0));
        assert_eq!(ball.vel, Vec2::new(100.0, -350.0));
    }

    proptest! {
        #[test]
        fn prop_ball_stays_inside_walls(
            x in 0.0f32..775.0,
            y in 0.0f32..575.0,
            vx in -2000.0f32..2000.0,
            vy in -2000.0f32..2000.0,
            steps in proptest::collection::vec(0.0f32..0.1, 1..200),
        ) {
            let mut ball = free_ball(Vec2::new(x, y), Vec2::new(vx, vy));
            for dt in steps {
                ball.integrate(dt, FIELD_WIDTH);
                prop_assert!(ball.pos.x >= 0.0);
                prop_assert!(ball.pos.y >= 0.0);
                prop_assert!(ball.pos.x + ball.size().x <= FIELD_WIDTH);
            }
        }
    }
}
