//! Game settings and preferences
//!
//! Stored as JSON next to the binary. Missing fields take their defaults, a
//! missing file means all defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::RoundConfig;
use crate::sim::particles::MAX_PARTICLES;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub width: f32,
    pub height: f32,
    /// RNG seed for pickups and particle jitter
    pub seed: u64,
    /// Particle pool capacity
    pub max_particles: usize,
    pub starting_lives: u32,
    /// Level files, in menu order
    pub levels: Vec<PathBuf>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            seed: 0,
            max_particles: MAX_PARTICLES,
            starting_lives: STARTING_LIVES,
            levels: ["one", "two", "three", "four"]
                .iter()
                .map(|name| PathBuf::from(format!("levels/{name}.lvl")))
                .collect(),

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults if it does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        let settings = Self::from_json(&json).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Saved settings to {}", path.display());
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Simulation parameters derived from these settings
    pub fn round_config(&self) -> RoundConfig {
        RoundConfig {
            width: self.width,
            height: self.height,
            seed: self.seed,
            particle_capacity: self.max_particles,
            starting_lives: self.starting_lives.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_field() {
        let config = Settings::default().round_config();
        assert_eq!(config.width, FIELD_WIDTH);
        assert_eq!(config.height, FIELD_HEIGHT);
        assert_eq!(config.starting_lives, 3);
        assert_eq!(config.particle_capacity, 2000);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "muted": true }"#).unwrap();
        assert_eq!(settings.seed, 42);
        assert!(settings.muted);
        assert_eq!(settings.levels.len(), 4);
        assert_eq!(settings.levels[0], PathBuf::from("levels/one.lvl"));
    }

    #[test]
    fn test_zero_lives_clamped() {
        let settings = Settings::from_json(r#"{ "starting_lives": 0 }"#).unwrap();
        assert_eq!(settings.round_config().starting_lives, 1);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load("no/such/settings.json").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("breakout-settings-{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.seed = 7;
        settings.levels = vec![PathBuf::from("custom.lvl")];
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        let path = std::env::temp_dir().join(format!("breakout-bad-{}.json", std::process::id()));
        fs::write(&path, "{ not json").unwrap();
        let err = Settings::load(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, SettingsError::Parse { .. }));
    }
}
