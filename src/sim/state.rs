//! Game state and core simulation types
//!
//! `GameState` owns everything that lives for a round: the ball, the paddle,
//! the levels and their bricks, pickups and the particle trail.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::collision::Aabb;
use super::level::Level;
use super::particles::{MAX_PARTICLES, ParticlePool};
use super::powerup::PowerUps;
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::renderer::SpriteSet;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Level select, ball parked on the paddle
    Menu,
    /// Active gameplay
    Active,
    /// Level cleared, waiting for confirmation
    Win,
}

/// Notifications for the audio and presentation layers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Sound(SoundEffect),
    /// Background loop should start playing
    MusicStart,
    /// Background loop should stop
    MusicStop,
    PhaseChanged(GamePhase),
    LifeLost { remaining: u32 },
    LevelCompleted { level: usize },
}

/// Screen-space post-processing toggles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostEffects {
    pub shake: bool,
    pub confuse: bool,
    pub chaos: bool,
}

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    pub rect: Aabb,
    pub color: Vec3,
}

impl Paddle {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            rect: Aabb::new(pos, size),
            color: Vec3::ONE,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.rect.pos.x + self.rect.size.x / 2.0
    }
}

/// Parameters fixed for the lifetime of a game
#[derive(Debug, Clone)]
pub struct RoundConfig {
    pub width: f32,
    pub height: f32,
    pub seed: u64,
    pub particle_capacity: usize,
    pub starting_lives: u32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            seed: 0,
            particle_capacity: MAX_PARTICLES,
            starting_lives: STARTING_LIVES,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: RoundConfig,
    pub phase: GamePhase,
    pub levels: Vec<Level>,
    /// Index of the selected level
    pub level: usize,
    pub lives: u32,
    pub paddle: Paddle,
    pub ball: Ball,
    pub power_ups: PowerUps,
    pub particles: ParticlePool,
    pub post: PostEffects,
    /// Seconds of screen shake left
    pub shake_time: f32,
    pub sprites: SpriteSet,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a game sitting in the menu with the first level selected
    pub fn new(config: RoundConfig, mut levels: Vec<Level>, sprites: SpriteSet) -> Self {
        if levels.is_empty() {
            log::warn!("No levels supplied, using an empty field");
            levels.push(Level::default());
        }

        let paddle = Paddle::new(paddle_home(&config, PADDLE_SIZE.x), PADDLE_SIZE);
        let ball = Ball::new(
            ball_home(&paddle),
            BALL_RADIUS,
            INITIAL_BALL_VELOCITY,
        );

        Self {
            phase: GamePhase::Menu,
            levels,
            level: 0,
            lives: config.starting_lives,
            paddle,
            ball,
            power_ups: PowerUps::new(),
            particles: ParticlePool::new(config.particle_capacity),
            post: PostEffects::default(),
            shake_time: 0.0,
            sprites,
            rng: Pcg32::seed_from_u64(config.seed),
            events: Vec::new(),
            config,
        }
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.level]
    }

    /// Take all notifications queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.emit(GameEvent::PhaseChanged(phase));
        }
    }

    /// Restore the selected level and everything a round accumulates:
    /// bricks, lives, pickups, running effects, the trail and paddle growth.
    pub fn reset_level(&mut self) {
        self.levels[self.level].reset();
        self.lives = self.config.starting_lives;

        self.power_ups.clear();
        self.particles.clear();
        self.post.confuse = false;
        self.post.chaos = false;
        self.ball.sticky = false;
        self.ball.pass_through = false;
        self.ball.color = Vec3::ONE;
        self.paddle.rect.size = PADDLE_SIZE;
        self.paddle.color = Vec3::ONE;
        log::debug!("Level {} reset", self.level);
    }

    /// Center the paddle at the bottom and park the ball on it
    pub fn reset_player(&mut self) {
        self.paddle.rect.pos = paddle_home(&self.config, self.paddle.rect.size.x);
        let home = ball_home(&self.paddle);
        self.ball.reset(home, INITIAL_BALL_VELOCITY);
    }
}

fn paddle_home(config: &RoundConfig, paddle_width: f32) -> Vec2 {
    Vec2::new(
        config.width / 2.0 - paddle_width / 2.0,
        config.height - PADDLE_SIZE.y,
    )
}

fn ball_home(paddle: &Paddle) -> Vec2 {
    Vec2::new(
        paddle.center_x() - BALL_RADIUS,
        paddle.rect.pos.y - BALL_RADIUS * 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::powerup::{PowerUp, PowerUpKind};

    fn state() -> GameState {
        let level = Level::parse("1 2 2\n0 3 0", FIELD_WIDTH, FIELD_HEIGHT / 2.0).unwrap();
        GameState::new(RoundConfig::default(), vec![level], SpriteSet::default())
    }

    #[test]
    fn test_new_state_parks_ball_on_paddle() {
        let state = state();
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.lives, STARTING_LIVES);
        assert!(state.ball.stuck);
        assert_eq!(state.paddle.rect.pos, Vec2::new(350.0, 580.0));
        assert_eq!(state.ball.pos, Vec2::new(387.5, 555.0));
        assert_eq!(state.ball.vel, INITIAL_BALL_VELOCITY);
        assert_eq!(state.particles.capacity(), MAX_PARTICLES);
    }

    #[test]
    fn test_empty_level_list_gets_placeholder() {
        let state = GameState::new(RoundConfig::default(), Vec::new(), SpriteSet::default());
        assert_eq!(state.levels.len(), 1);
        assert!(state.current_level().bricks.is_empty());
    }

    #[test]
    fn test_reset_level_clears_round_progress() {
        let mut state = state();
        state.levels[0].bricks[1].destroyed = true;
        state.lives = 1;
        state.paddle.rect.size.x = 200.0;
        state.ball.pass_through = true;
        state.post.confuse = true;
        state.power_ups.push(PowerUp::new(PowerUpKind::Chaos, Vec2::ZERO));
        crate::sim::update(&mut state, 0.01);
        assert!(state.particles.alive().count() > 0);

        state.reset_level();
        assert!(state.current_level().bricks.iter().all(|b| !b.destroyed));
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.paddle.rect.size, PADDLE_SIZE);
        assert!(!state.ball.pass_through);
        assert!(!state.post.confuse);
        assert!(state.power_ups.is_empty());
        assert_eq!(state.particles.alive().count(), 0);
        assert_eq!(state.particles.last_used(), 0);
    }

    #[test]
    fn test_reset_player_recenters_wide_paddle() {
        let mut state = state();
        state.paddle.rect.size.x = 150.0;
        state.paddle.rect.pos.x = 10.0;
        state.ball.stuck = false;
        state.ball.sticky = true;

        state.reset_player();
        assert_eq!(state.paddle.rect.pos.x, 325.0);
        assert!(state.ball.stuck);
        assert!(state.ball.sticky);
        assert_eq!(state.ball.pos.x, 400.0 - BALL_RADIUS);
    }

    #[test]
    fn test_phase_change_emits_event_once() {
        let mut state = state();
        state.set_phase(GamePhase::Active);
        state.set_phase(GamePhase::Active);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::PhaseChanged(GamePhase::Active)]
        );
        assert!(state.drain_events().is_empty());
    }
}
