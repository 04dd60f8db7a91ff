//! Render boundary
//!
//! The game describes each frame as a flat list of sprite draws plus HUD
//! text; a backend turns those into GPU work. Post-processing toggles are
//! read straight from `GameState::post`.

pub mod sprite;
pub mod vertex;

pub use sprite::{SpriteHandle, SpriteSet};
pub use vertex::SpriteInstance;

use glam::{Vec2, Vec3, Vec4};

use crate::sim::{GamePhase, GameState};

/// Edge length of a particle quad
pub const PARTICLE_SIZE: f32 = 10.0;

/// One textured quad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub sprite: SpriteHandle,
    /// Top-left corner
    pub position: Vec2,
    pub size: Vec2,
    /// Radians
    pub rotation: f32,
    pub color: Vec4,
}

impl DrawCommand {
    fn quad(sprite: SpriteHandle, position: Vec2, size: Vec2, color: Vec3) -> Self {
        Self {
            sprite,
            position,
            size,
            rotation: 0.0,
            color: color.extend(1.0),
        }
    }
}

/// A line of HUD text
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub text: String,
    pub position: Vec2,
    pub scale: f32,
    pub color: Vec3,
}

impl TextCommand {
    fn new(text: impl Into<String>, x: f32, y: f32, scale: f32, color: Vec3) -> Self {
        Self {
            text: text.into(),
            position: Vec2::new(x, y),
            scale,
            color,
        }
    }
}

impl GameState {
    /// Sprites for this frame, back to front
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        let sprites = &self.sprites;
        let mut out = Vec::new();

        out.push(DrawCommand::quad(
            sprites.background,
            Vec2::ZERO,
            Vec2::new(self.config.width, self.config.height),
            Vec3::ONE,
        ));

        for brick in self.current_level().bricks.iter().filter(|b| !b.destroyed) {
            let sprite = if brick.is_solid {
                sprites.solid_brick
            } else {
                sprites.brick
            };
            out.push(DrawCommand::quad(
                sprite,
                brick.rect.pos,
                brick.rect.size,
                brick.color,
            ));
        }

        out.push(DrawCommand::quad(
            sprites.paddle,
            self.paddle.rect.pos,
            self.paddle.rect.size,
            self.paddle.color,
        ));

        for p in self.power_ups.items().iter().filter(|p| !p.destroyed) {
            out.push(DrawCommand::quad(
                sprites.power_up(p.kind),
                p.rect.pos,
                p.rect.size,
                p.color,
            ));
        }

        // Additive pass
        for p in self.particles.alive() {
            out.push(DrawCommand {
                sprite: sprites.particle,
                position: p.pos,
                size: Vec2::splat(PARTICLE_SIZE),
                rotation: 0.0,
                color: p.color,
            });
        }

        out.push(DrawCommand::quad(
            sprites.ball,
            self.ball.pos,
            self.ball.size(),
            self.ball.color,
        ));

        out
    }

    /// Lives counter plus the prompt for the current phase
    pub fn hud_lines(&self) -> Vec<TextCommand> {
        let mid = self.config.height / 2.0;
        let mut lines = vec![TextCommand::new(
            format!("Lives: {}", self.lives),
            5.0,
            5.0,
            1.0,
            Vec3::ONE,
        )];

        match self.phase {
            GamePhase::Menu => {
                lines.push(TextCommand::new(
                    "Press ENTER to start",
                    250.0,
                    mid,
                    1.0,
                    Vec3::ONE,
                ));
                lines.push(TextCommand::new(
                    "Press W or S to select level",
                    245.0,
                    mid + 20.0,
                    0.75,
                    Vec3::ONE,
                ));
            }
            GamePhase::Win => {
                lines.push(TextCommand::new(
                    "You WON!!!",
                    320.0,
                    mid - 20.0,
                    1.0,
                    Vec3::new(0.0, 1.0, 0.0),
                ));
                lines.push(TextCommand::new(
                    "Press ENTER to retry or ESC to quit",
                    130.0,
                    mid,
                    1.0,
                    Vec3::new(1.0, 1.0, 0.0),
                ));
            }
            GamePhase::Active => {}
        }

        lines
    }
}
