//! Breakout headless driver
//!
//! Loads settings and levels, then lets an autopilot play for a fixed number
//! of frames and logs what happened. Usage:
//!
//! ```text
//! breakout [settings.json] [frames]
//! ```

use anyhow::{Context, Result};

use breakout::audio::{AudioManager, LogBackend, SoundEffect};
use breakout::consts::*;
use breakout::platform::{InputState, Key};
use breakout::renderer::{SpriteSet, vertex};
use breakout::sim::{GameEvent, GamePhase, GameState, Level, tick};
use breakout::Settings;

const DEFAULT_FRAMES: u32 = 60 * 120;

/// Game instance plus everything a frontend would own
struct Driver {
    state: GameState,
    input: InputState,
    audio: AudioManager<LogBackend>,
    frame: u32,
    lives_lost: u32,
    levels_won: u32,
}

impl Driver {
    fn new(settings: &Settings) -> Self {
        let config = settings.round_config();
        let levels = load_levels(settings, config.width, config.height / 2.0);

        let mut audio = AudioManager::new(LogBackend::new());
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);

        Self {
            state: GameState::new(config, levels, SpriteSet::sequential()),
            input: InputState::new(),
            audio,
            frame: 0,
            lives_lost: 0,
            levels_won: 0,
        }
    }

    fn step(&mut self, dt: f32) {
        self.autopilot();
        tick(&mut self.state, &mut self.input, dt.min(MAX_DT));

        let events = self.state.drain_events();
        self.audio.handle_events(&events);
        for event in &events {
            match event {
                GameEvent::LifeLost { .. } => self.lives_lost += 1,
                GameEvent::LevelCompleted { .. } => self.levels_won += 1,
                _ => {}
            }
        }

        // Exercise the render boundary the way a frontend would
        let draws = self.state.draw_list();
        let instances = vertex::instances(&draws);
        if self.frame % 600 == 0 {
            log::debug!(
                "frame {}: {} sprites ({} bytes), post {:?}",
                self.frame,
                draws.len(),
                vertex::as_bytes(&instances).len(),
                self.state.post
            );
        }
        self.frame += 1;
    }

    /// Track the ball with the paddle and tap through menus
    fn autopilot(&mut self) {
        let input = &mut self.input;
        match self.state.phase {
            GamePhase::Menu | GamePhase::Win => {
                // Alternate press/release so debounced confirms get through
                if input.is_held(Key::Confirm) {
                    input.release(Key::Confirm);
                } else {
                    input.press(Key::Confirm);
                }
            }
            GamePhase::Active => {
                input.release(Key::Confirm);
                let target = self.state.ball.center().x;
                let paddle = self.state.paddle.center_x();
                let dead_zone = self.state.paddle.rect.size.x / 4.0;

                input.release(Key::Left);
                input.release(Key::Right);
                if self.state.ball.stuck {
                    input.press(Key::Launch);
                } else {
                    input.release(Key::Launch);
                    if target < paddle - dead_zone {
                        input.press(Key::Left);
                    } else if target > paddle + dead_zone {
                        input.press(Key::Right);
                    }
                }
            }
        }
    }
}

fn load_levels(settings: &Settings, width: f32, height: f32) -> Vec<Level> {
    settings
        .levels
        .iter()
        .filter_map(|path| match Level::load_file(path, width, height) {
            Ok(level) => Some(level),
            Err(e) => {
                log::warn!("Skipping level: {e}");
                None
            }
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Breakout (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| "settings.json".to_string());
    let frames = match args.next() {
        Some(n) => n
            .parse::<u32>()
            .with_context(|| format!("invalid frame count {n:?}"))?,
        None => DEFAULT_FRAMES,
    };

    let settings = Settings::load(&settings_path)
        .with_context(|| format!("loading settings from {settings_path}"))?;

    let mut driver = Driver::new(&settings);
    for _ in 0..frames {
        driver.step(SIM_DT);
    }

    let level = driver.state.current_level();
    let broken = level
        .bricks
        .iter()
        .filter(|b| !b.is_solid && b.destroyed)
        .count();
    let backend = driver.audio.backend();
    log::info!(
        "{} frames: phase {:?}, lives {}, {} bricks broken, {} lives lost, {} levels won",
        driver.frame,
        driver.state.phase,
        driver.state.lives,
        broken,
        driver.lives_lost,
        driver.levels_won
    );
    for effect in SoundEffect::ALL {
        log::info!("  {}: {}", effect.as_str(), backend.count(effect));
    }

    Ok(())
}
