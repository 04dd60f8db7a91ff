//! Power-ups: falling pickups that modify the ball, the paddle or the screen
//!
//! A pickup drops from a destroyed brick and is collected by touching the
//! paddle. Timed kinds keep their effect for `duration` seconds. Several
//! pickups of one kind can run at once, so each kind's effect is reference
//! counted and only reverted when the last running instance expires.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::collision::{Aabb, aabb_overlap};
use super::state::{Paddle, PostEffects};

/// Pickup box size
pub const POWERUP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
/// Falling speed (pixels/s, screen space)
pub const POWERUP_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);
/// Ball speed multiplier per speed pickup
pub const SPEED_FACTOR: f32 = 1.2;
/// Paddle width gained per pad-size pickup
pub const PAD_SIZE_INCREMENT: f32 = 50.0;

const STICKY_TINT: Vec3 = Vec3::new(1.0, 0.5, 1.0);
const PASS_THROUGH_TINT: Vec3 = Vec3::new(1.0, 0.5, 0.5);

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    Sticky,
    PassThrough,
    PadSizeIncrease,
    Confuse,
    Chaos,
}

impl PowerUpKind {
    /// Spawn roll order
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Speed,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::PadSizeIncrease,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Speed => "speed",
            PowerUpKind::Sticky => "sticky",
            PowerUpKind::PassThrough => "pass-through",
            PowerUpKind::PadSizeIncrease => "pad-size-increase",
            PowerUpKind::Confuse => "confuse",
            PowerUpKind::Chaos => "chaos",
        }
    }

    /// One in `n` chance to drop from a destroyed brick
    pub fn spawn_odds(&self) -> u32 {
        match self {
            PowerUpKind::Confuse | PowerUpKind::Chaos => 15,
            _ => 75,
        }
    }

    /// Effect duration in seconds (zero for instant kinds)
    pub fn duration(&self) -> f32 {
        match self {
            PowerUpKind::Sticky => 20.0,
            PowerUpKind::PassThrough => 10.0,
            PowerUpKind::Confuse | PowerUpKind::Chaos => 15.0,
            PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => 0.0,
        }
    }

    /// Instant kinds apply once and are never reverted
    pub fn is_timed(&self) -> bool {
        !matches!(self, PowerUpKind::Speed | PowerUpKind::PadSizeIncrease)
    }

    pub fn color(&self) -> Vec3 {
        match self {
            PowerUpKind::Speed => Vec3::new(0.5, 0.5, 1.0),
            PowerUpKind::Sticky => Vec3::new(1.0, 0.5, 1.0),
            PowerUpKind::PassThrough => Vec3::new(0.5, 1.0, 0.5),
            PowerUpKind::PadSizeIncrease => Vec3::new(1.0, 0.6, 0.4),
            PowerUpKind::Confuse => Vec3::new(1.0, 0.3, 0.3),
            PowerUpKind::Chaos => Vec3::new(0.9, 0.25, 0.25),
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

/// A pickup entity
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub rect: Aabb,
    pub vel: Vec2,
    /// Seconds of effect left once activated
    pub duration: f32,
    pub activated: bool,
    /// Collected or missed; no longer drawn or collectable
    pub destroyed: bool,
    pub color: Vec3,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            kind,
            rect: Aabb::new(pos, POWERUP_SIZE),
            vel: POWERUP_VELOCITY,
            duration: kind.duration(),
            activated: false,
            destroyed: false,
            color: kind.color(),
        }
    }
}

/// Number of running instances per timed kind
#[derive(Debug, Clone, Default)]
pub struct ActiveEffects {
    counts: [u32; PowerUpKind::ALL.len()],
}

impl ActiveEffects {
    pub fn count(&self, kind: PowerUpKind) -> u32 {
        self.counts[kind.index()]
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.count(kind) > 0
    }

    fn acquire(&mut self, kind: PowerUpKind) {
        self.counts[kind.index()] += 1;
    }

    /// Drop one instance; true when that was the last one
    fn release(&mut self, kind: PowerUpKind) -> bool {
        let count = &mut self.counts[kind.index()];
        *count = count.saturating_sub(1);
        *count == 0
    }
}

/// Everything a power-up may modify
pub struct EffectTargets<'a> {
    pub ball: &'a mut Ball,
    pub paddle: &'a mut Paddle,
    pub post: &'a mut PostEffects,
}

/// All pickups on the field plus the running effect counts
#[derive(Debug, Clone, Default)]
pub struct PowerUps {
    items: Vec<PowerUp>,
    active: ActiveEffects,
}

impl PowerUps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[PowerUp] {
        &self.items
    }

    pub fn active(&self) -> &ActiveEffects {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a pickup directly (level scripting, tests)
    pub fn push(&mut self, power_up: PowerUp) {
        self.items.push(power_up);
    }

    /// Roll every kind independently and drop the winners at `pos`.
    /// Returns how many were spawned.
    pub fn spawn<R: Rng>(&mut self, pos: Vec2, rng: &mut R) -> usize {
        let before = self.items.len();
        for kind in PowerUpKind::ALL {
            if rng.random_range(0..kind.spawn_odds()) == 0 {
                log::debug!("Spawned {} power-up at ({:.0}, {:.0})", kind.as_str(), pos.x, pos.y);
                self.items.push(PowerUp::new(kind, pos));
            }
        }
        self.items.len() - before
    }

    /// Collect pickups touching the paddle and discard ones that fell off
    /// the bottom. Returns the kinds collected this call.
    pub fn collect(&mut self, targets: &mut EffectTargets<'_>, field_height: f32) -> Vec<PowerUpKind> {
        let mut collected = Vec::new();
        for i in 0..self.items.len() {
            let item = &mut self.items[i];
            if item.destroyed {
                continue;
            }
            if item.rect.pos.y >= field_height {
                item.destroyed = true;
                continue;
            }
            if aabb_overlap(&targets.paddle.rect, &item.rect) {
                item.destroyed = true;
                item.activated = true;
                let kind = item.kind;
                if kind.is_timed() {
                    self.active.acquire(kind);
                }
                activate(kind, targets);
                collected.push(kind);
            }
        }
        collected
    }

    /// Move pickups, run down active timers, and drop finished entries
    pub fn update(&mut self, dt: f32, targets: &mut EffectTargets<'_>) {
        let mut expired = Vec::new();
        for item in &mut self.items {
            item.rect.pos += item.vel * dt;

            if item.activated {
                item.duration -= dt;
                if item.duration <= 0.0 {
                    item.activated = false;
                    if item.kind.is_timed() {
                        expired.push(item.kind);
                    }
                }
            }
        }

        for kind in expired {
            if self.active.release(kind) {
                log::info!("Power-up expired: {}", kind.as_str());
                revert(kind, targets);
            }
        }

        self.items.retain(|p| !p.destroyed || p.activated);
    }

    /// Forget all pickups and running effects without reverting anything
    pub fn clear(&mut self) {
        self.items.clear();
        self.active = ActiveEffects::default();
    }
}

/// Apply a kind's effect. Only collected pickups are tracked for expiry.
pub fn activate(kind: PowerUpKind, targets: &mut EffectTargets<'_>) {
    log::info!("Power-up activated: {}", kind.as_str());
    match kind {
        PowerUpKind::Speed => targets.ball.vel *= SPEED_FACTOR,
        PowerUpKind::Sticky => {
            targets.ball.sticky = true;
            targets.paddle.color = STICKY_TINT;
        }
        PowerUpKind::PassThrough => {
            targets.ball.pass_through = true;
            targets.ball.color = PASS_THROUGH_TINT;
        }
        PowerUpKind::PadSizeIncrease => targets.paddle.rect.size.x += PAD_SIZE_INCREMENT,
        PowerUpKind::Confuse => {
            if !targets.post.chaos {
                targets.post.confuse = true;
            }
        }
        PowerUpKind::Chaos => {
            if !targets.post.confuse {
                targets.post.chaos = true;
            }
        }
    }
}

fn revert(kind: PowerUpKind, targets: &mut EffectTargets<'_>) {
    match kind {
        PowerUpKind::Sticky => {
            targets.ball.sticky = false;
            targets.paddle.color = Vec3::ONE;
        }
        PowerUpKind::PassThrough => {
            targets.ball.pass_through = false;
            targets.ball.color = Vec3::ONE;
        }
        PowerUpKind::Confuse => targets.post.confuse = false,
        PowerUpKind::Chaos => targets.post.chaos = false,
        PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => {}
    }
}
