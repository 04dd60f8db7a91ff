//! Audio dispatch
//!
//! The simulation only queues `GameEvent`s. `AudioManager` turns them into
//! calls on an `AudioBackend`, applying volume and mute settings, and owns
//! the background music loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Power-up caught by the paddle
    PowerUpCollected,
    /// Ball hits an indestructible brick
    SolidBrickHit,
    /// Ball breaks a brick
    NonSolidBrickHit,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::PaddleHit,
        SoundEffect::PowerUpCollected,
        SoundEffect::SolidBrickHit,
        SoundEffect::NonSolidBrickHit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::PaddleHit => "paddle_hit",
            SoundEffect::PowerUpCollected => "powerup_collected",
            SoundEffect::SolidBrickHit => "solid_brick_hit",
            SoundEffect::NonSolidBrickHit => "brick_hit",
        }
    }
}

/// Handle to a playing music loop
///
/// The backend polls the shared flag and stops once it is set. Dropping the
/// handle stops the loop too.
#[derive(Debug, Default)]
pub struct MusicLoop {
    stop: Arc<AtomicBool>,
}

impl MusicLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag handed to whatever actually plays the loop
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }
}

impl Drop for MusicLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Something that can make noise
pub trait AudioBackend {
    /// Fire and forget a sound effect at `volume` (0.0 - 1.0)
    fn play(&mut self, effect: SoundEffect, volume: f32);

    /// Start the background loop; it must end once `stop` is set
    fn start_music(&mut self, stop: Arc<AtomicBool>, volume: f32);
}

/// Backend that only logs, used by the headless driver and in tests
#[derive(Debug, Default)]
pub struct LogBackend {
    played: Vec<SoundEffect>,
    music_starts: usize,
}

impl LogBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every effect played so far, in order
    pub fn played(&self) -> &[SoundEffect] {
        &self.played
    }

    pub fn count(&self, effect: SoundEffect) -> usize {
        self.played.iter().filter(|&&e| e == effect).count()
    }

    pub fn music_starts(&self) -> usize {
        self.music_starts
    }
}

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("play {} at {:.2}", effect.as_str(), volume);
        self.played.push(effect);
    }

    fn start_music(&mut self, _stop: Arc<AtomicBool>, volume: f32) {
        log::debug!("music start at {:.2}", volume);
        self.music_starts += 1;
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music: Option<MusicLoop>,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol);
    }

    /// Start the music loop unless one is already running
    pub fn start_music(&mut self) {
        if self.is_music_playing() {
            return;
        }
        let music = MusicLoop::new();
        let vol = self.effective_volume(self.music_volume);
        self.backend.start_music(music.stop_flag(), vol);
        self.music = Some(music);
    }

    pub fn stop_music(&mut self) {
        if let Some(music) = self.music.take() {
            music.stop();
        }
    }

    pub fn is_music_playing(&self) -> bool {
        self.music.as_ref().is_some_and(|m| !m.is_stopped())
    }

    /// React to a single simulation event; non-audio events are ignored
    pub fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Sound(effect) => self.play(*effect),
            GameEvent::MusicStart => self.start_music(),
            GameEvent::MusicStop => self.stop_music(),
            _ => {}
        }
    }

    pub fn handle_events<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for event in events {
            self.handle_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_reach_backend() {
        let mut audio = AudioManager::new(LogBackend::new());
        audio.handle_events(&[
            GameEvent::Sound(SoundEffect::PaddleHit),
            GameEvent::LifeLost { remaining: 2 },
            GameEvent::Sound(SoundEffect::NonSolidBrickHit),
            GameEvent::Sound(SoundEffect::PaddleHit),
        ]);
        assert_eq!(
            audio.backend().played(),
            &[
                SoundEffect::PaddleHit,
                SoundEffect::NonSolidBrickHit,
                SoundEffect::PaddleHit
            ]
        );
        assert_eq!(audio.backend().count(SoundEffect::PaddleHit), 2);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(LogBackend::new());
        audio.set_muted(true);
        audio.play(SoundEffect::SolidBrickHit);
        assert!(audio.backend().played().is_empty());

        audio.set_muted(false);
        audio.set_sfx_volume(-1.0);
        audio.play(SoundEffect::SolidBrickHit);
        assert!(audio.backend().played().is_empty());
    }

    #[test]
    fn test_music_lifecycle() {
        let mut audio = AudioManager::new(LogBackend::new());
        audio.handle_event(&GameEvent::MusicStart);
        assert!(audio.is_music_playing());

        // A second start while playing is ignored
        audio.handle_event(&GameEvent::MusicStart);
        assert_eq!(audio.backend().music_starts(), 1);

        audio.handle_event(&GameEvent::MusicStop);
        assert!(!audio.is_music_playing());

        audio.handle_event(&GameEvent::MusicStart);
        assert_eq!(audio.backend().music_starts(), 2);
    }

    #[test]
    fn test_dropping_loop_sets_stop_flag() {
        let music = MusicLoop::new();
        let flag = music.stop_flag();
        assert!(!flag.load(Ordering::Acquire));
        drop(music);
        assert!(flag.load(Ordering::Acquire));
    }
}
