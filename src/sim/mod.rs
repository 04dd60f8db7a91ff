//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (bricks and pickups in insertion order)
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod level;
pub mod particles;
pub mod powerup;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use collision::{Aabb, CollisionResult, Direction, aabb_overlap, ball_aabb_collision};
pub use level::{Brick, Level, LevelError};
pub use particles::{Emitter, Particle, ParticlePool};
pub use powerup::{ActiveEffects, EffectTargets, PowerUp, PowerUpKind, PowerUps};
pub use state::{GameEvent, GamePhase, GameState, Paddle, PostEffects, RoundConfig};
pub use tick::{bounce_off_paddle, do_collisions, process_input, resolve_brick_hit, tick, update};
