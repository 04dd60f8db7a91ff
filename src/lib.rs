//! Breakout - brick-breaking simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collisions, ball, pickups, particles, rounds)
//! - `renderer`: Draw lists and GPU instance data for a sprite backend
//! - `platform`: Input state
//! - `audio`: Sound and music dispatch
//! - `settings`: JSON configuration

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};
pub use sim::{GameEvent, GamePhase, GameState};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Timestep used by the headless driver
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest step a frame may take; callers clamp to this
    pub const MAX_DT: f32 = 0.05;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    /// Pixels per second
    pub const PADDLE_SPEED: f32 = 500.0;
    /// How hard an off-center hit bends the bounce
    pub const PADDLE_STEERING: f32 = 2.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.5;
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -350.0);

    pub const STARTING_LIVES: u32 = 3;

    /// Seconds of screen shake after a solid brick hit
    pub const SHAKE_TIME: f32 = 0.05;

    /// Trail particles spawned per frame
    pub const TRAIL_SPAWN_COUNT: usize = 2;
}
