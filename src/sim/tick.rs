//! Per-frame simulation
//!
//! `process_input` turns held keys into paddle motion and menu navigation,
//! `update` advances the world by `dt` seconds. Callers clamp `dt`.

use glam::Vec2;

use super::ball::Ball;
use super::collision::{Aabb, CollisionResult, Direction, ball_aabb_collision};
use super::particles::Emitter;
use super::state::{GameEvent, GamePhase, GameState};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::platform::{InputState, Key};

/// Handle input, then advance the simulation
pub fn tick(state: &mut GameState, input: &mut InputState, dt: f32) {
    process_input(state, input, dt);
    update(state, dt);
}

/// Apply player input for this frame
pub fn process_input(state: &mut GameState, input: &mut InputState, dt: f32) {
    match state.phase {
        GamePhase::Active => {
            let step = PADDLE_SPEED * dt;

            if input.is_held(Key::Left) && state.paddle.rect.pos.x >= 0.0 {
                state.paddle.rect.pos.x -= step;
                if state.ball.stuck {
                    state.ball.pos.x -= step;
                }
            }

            if input.is_held(Key::Right)
                && state.paddle.rect.pos.x <= state.config.width - state.paddle.rect.size.x
            {
                state.paddle.rect.pos.x += step;
                if state.ball.stuck {
                    state.ball.pos.x += step;
                }
            }

            if input.is_held(Key::Launch) {
                state.ball.stuck = false;
            }
        }

        GamePhase::Menu => {
            if input.take_press(Key::Confirm) {
                state.set_phase(GamePhase::Active);
                state.emit(GameEvent::MusicStart);
            }

            let count = state.levels.len();
            if count == 0 {
                return;
            }
            if input.take_press(Key::Up) {
                state.level = (state.level + 1) % count;
                log::info!("Selected level {}", state.level + 1);
            }
            if input.take_press(Key::Down) {
                state.level = (state.level + count - 1) % count;
                log::info!("Selected level {}", state.level + 1);
            }
        }

        GamePhase::Win => {
            if input.is_held(Key::Confirm) {
                input.mark_processed(Key::Confirm);
                state.post.chaos = false;
                state.set_phase(GamePhase::Menu);
            }
        }
    }
}

/// Advance the world by `dt` seconds
pub fn update(state: &mut GameState, dt: f32) {
    state.ball.integrate(dt, state.config.width);
    do_collisions(state);

    let offset = Vec2::splat(state.ball.radius / 2.0);
    state.particles.update(
        dt,
        Emitter::from(&state.ball),
        TRAIL_SPAWN_COUNT,
        offset,
        &mut state.rng,
    );

    update_power_ups(state, dt);

    if state.phase == GamePhase::Active && state.current_level().is_completed() {
        log::info!("Level {} complete", state.level + 1);
        let level = state.level;
        state.reset_level();
        state.reset_player();
        state.post.chaos = true;
        state.emit(GameEvent::LevelCompleted { level });
        state.emit(GameEvent::MusicStop);
        state.set_phase(GamePhase::Win);
    }

    if state.ball.pos.y >= state.config.height {
        state.lives = state.lives.saturating_sub(1);
        log::info!("Ball lost, {} lives left", state.lives);
        state.emit(GameEvent::LifeLost {
            remaining: state.lives,
        });
        if state.lives == 0 {
            state.reset_level();
            state.emit(GameEvent::MusicStop);
            state.set_phase(GamePhase::Menu);
        }
        state.reset_player();
    }

    if state.shake_time > 0.0 {
        state.shake_time -= dt;
        if state.shake_time <= 0.0 {
            state.post.shake = false;
        }
    }
}

/// Resolve ball vs bricks, then ball vs paddle
pub fn do_collisions(state: &mut GameState) {
    let ball = &mut state.ball;
    let level = &mut state.levels[state.level];

    for brick in level.bricks.iter_mut().filter(|b| !b.destroyed) {
        let result = ball_aabb_collision(ball.center(), ball.radius, &brick.rect);
        if !result.collided {
            continue;
        }

        if brick.is_solid {
            state.shake_time = SHAKE_TIME;
            state.post.shake = true;
            state.events.push(GameEvent::Sound(SoundEffect::SolidBrickHit));
        } else {
            brick.destroyed = true;
            state.power_ups.spawn(brick.rect.pos, &mut state.rng);
            state
                .events
                .push(GameEvent::Sound(SoundEffect::NonSolidBrickHit));
        }

        if ball.pass_through && !brick.is_solid {
            continue;
        }
        resolve_brick_hit(ball, &result);
    }

    if !state.ball.stuck {
        let result = ball_aabb_collision(
            state.ball.center(),
            state.ball.radius,
            &state.paddle.rect,
        );
        if result.collided {
            bounce_off_paddle(&mut state.ball, &state.paddle.rect);
            state.emit(GameEvent::Sound(SoundEffect::PaddleHit));
        }
    }
}

/// Reflect the ball off a brick side and push it back out
///
/// A hit without a direction (ball center inside the brick) is left alone.
pub fn resolve_brick_hit(ball: &mut Ball, result: &CollisionResult) {
    let Some(dir) = result.direction else {
        return;
    };

    if dir.is_horizontal() {
        ball.vel.x = -ball.vel.x;
        let depth = ball.radius - result.penetration.x.abs();
        if dir == Direction::Left {
            ball.pos.x += depth;
        } else {
            ball.pos.x -= depth;
        }
    } else {
        ball.vel.y = -ball.vel.y;
        let depth = ball.radius - result.penetration.y.abs();
        if dir == Direction::Up {
            ball.pos.y -= depth;
        } else {
            ball.pos.y += depth;
        }
    }
}

/// Send the ball back up, steered by where it struck the paddle
///
/// The further from the paddle center, the sharper the angle. Speed is kept
/// unchanged across the bounce.
pub fn bounce_off_paddle(ball: &mut Ball, paddle: &Aabb) {
    let half_width = paddle.size.x / 2.0;
    let distance = ball.center().x - (paddle.pos.x + half_width);
    let fraction = distance / half_width;

    let speed = ball.vel.length();
    let steered = Vec2::new(
        INITIAL_BALL_VELOCITY.x * fraction * PADDLE_STEERING,
        -ball.vel.y.abs(),
    );
    ball.vel = match steered.try_normalize() {
        Some(dir) => dir * speed,
        None => Vec2::new(0.0, -speed),
    };
    ball.stuck = ball.sticky;
}

fn update_power_ups(state: &mut GameState, dt: f32) {
    let height = state.config.height;
    let mut targets = super::powerup::EffectTargets {
        ball: &mut state.ball,
        paddle: &mut state.paddle,
        post: &mut state.post,
    };

    let collected = state.power_ups.collect(&mut targets, height);
    state.power_ups.update(dt, &mut targets);

    for _ in collected {
        state
            .events
            .push(GameEvent::Sound(SoundEffect::PowerUpCollected));
    }
}
