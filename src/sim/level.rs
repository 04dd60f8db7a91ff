//! Brick field built from a tile grid
//!
//! Level files are plain text: one row per line, whitespace separated tile
//! codes. `0` is empty, `1` is a solid (indestructible) brick, anything
//! greater is a breakable brick whose tint depends on the code.

use std::fs;
use std::path::Path;

use glam::{Vec2, Vec3};
use thiserror::Error;

use super::collision::Aabb;

/// Errors raised while turning a level file into bricks
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("bad tile code {token:?} on line {line}")]
    BadTile { line: usize, token: String },
    #[error("level has no tiles")]
    Empty,
}

/// Tint for solid bricks
pub const SOLID_COLOR: Vec3 = Vec3::new(0.8, 0.8, 0.7);

/// Tint for a breakable tile code; unknown positive codes fall back to white
pub fn tile_color(code: u32) -> Vec3 {
    match code {
        2 => Vec3::new(0.2, 0.6, 1.0),
        3 => Vec3::new(0.0, 0.7, 0.0),
        4 => Vec3::new(0.8, 0.8, 0.4),
        5 => Vec3::new(1.0, 0.5, 0.0),
        _ => Vec3::ONE,
    }
}

/// A static obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub rect: Aabb,
    pub is_solid: bool,
    pub destroyed: bool,
    pub color: Vec3,
}

/// One level's brick layout
#[derive(Debug, Clone, Default)]
pub struct Level {
    pub bricks: Vec<Brick>,
}

impl Level {
    /// Read and build a level from disk, fitting it into `width` × `height`
    pub fn load_file(path: impl AsRef<Path>, width: f32, height: f32) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let level = Self::parse(&text, width, height)?;
        log::info!(
            "Loaded level {} ({} bricks)",
            path.display(),
            level.bricks.len()
        );
        Ok(level)
    }

    /// Build a level from level-file text
    pub fn parse(text: &str, width: f32, height: f32) -> Result<Self, LevelError> {
        let grid = parse_tiles(text)?;
        Ok(Self::from_tiles(&grid, width, height))
    }

    /// Build bricks from a rectangular tile grid. Ragged rows are laid out
    /// using the first row's width.
    pub fn from_tiles(tiles: &[Vec<u32>], width: f32, height: f32) -> Self {
        let rows = tiles.len();
        let cols = tiles.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Self::default();
        }

        let unit = Vec2::new(width / cols as f32, height / rows as f32);
        let mut bricks = Vec::new();

        for (y, row) in tiles.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                if code == 0 {
                    continue;
                }
                let pos = Vec2::new(unit.x * x as f32, unit.y * y as f32);
                let is_solid = code == 1;
                bricks.push(Brick {
                    rect: Aabb::new(pos, unit),
                    is_solid,
                    destroyed: false,
                    color: if is_solid { SOLID_COLOR } else { tile_color(code) },
                });
            }
        }

        Self { bricks }
    }

    /// All breakable bricks are gone
    pub fn is_completed(&self) -> bool {
        self.bricks.iter().all(|b| b.is_solid || b.destroyed)
    }

    /// Bring every brick back
    pub fn reset(&mut self) {
        for brick in &mut self.bricks {
            brick.destroyed = false;
        }
    }
}

fn parse_tiles(text: &str) -> Result<Vec<Vec<u32>>, LevelError> {
    let mut grid = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<u32>().map_err(|_| LevelError::BadTile {
                    line: i + 1,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        grid.push(row);
    }

    if grid.is_empty() {
        return Err(LevelError::Empty);
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_by_two_grid() {
        let level = Level::parse("1 0\n0 2\n", 200.0, 200.0).unwrap();
        assert_eq!(level.bricks.len(), 2);

        let solid = &level.bricks[0];
        assert!(solid.is_solid);
        assert_eq!(solid.rect.pos, Vec2::ZERO);
        assert_eq!(solid.rect.size, Vec2::new(100.0, 100.0));
        assert_eq!(solid.color, SOLID_COLOR);

        let breakable = &level.bricks[1];
        assert!(!breakable.is_solid);
        assert_eq!(breakable.rect.pos, Vec2::new(100.0, 100.0));
        assert_eq!(breakable.rect.size, Vec2::new(100.0, 100.0));
        assert_eq!(breakable.color, Vec3::new(0.2, 0.6, 1.0));
    }

    #[test]
    fn test_unknown_code_is_white_breakable() {
        let level = Level::parse("9", 50.0, 10.0).unwrap();
        assert_eq!(level.bricks.len(), 1);
        assert!(!level.bricks[0].is_solid);
        assert_eq!(level.bricks[0].color, Vec3::ONE);
    }

    #[test]
    fn test_non_square_units() {
        let level = Level::parse("2 3 4 5\n5 4 3 2", 800.0, 300.0).unwrap();
        assert_eq!(level.bricks.len(), 8);
        assert_eq!(level.bricks[5].rect.pos, Vec2::new(200.0, 150.0));
        assert_eq!(level.bricks[5].rect.size, Vec2::new(200.0, 150.0));
    }

    #[test]
    fn test_bad_tile_reports_line() {
        let err = Level::parse("1 1\n1 x\n", 100.0, 100.0).unwrap_err();
        match err {
            LevelError::BadTile { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_tile_rejected() {
        assert!(matches!(
            Level::parse("1 -1", 100.0, 100.0),
            Err(LevelError::BadTile { .. })
        ));
    }

    #[test]
    fn test_empty_level_rejected() {
        assert!(matches!(Level::parse("\n  \n", 100.0, 100.0), Err(LevelError::Empty)));
    }

    #[test]
    fn test_missing_file() {
        let err = Level::load_file("does/not/exist.lvl", 100.0, 100.0).unwrap_err();
        assert!(matches!(err, LevelError::Io { .. }));
    }

    #[test]
    fn test_completion_ignores_solid_bricks() {
        let mut level = Level::parse("1 2 2", 300.0, 100.0).unwrap();
        assert!(!level.is_completed());

        level.bricks[1].destroyed = true;
        assert!(!level.is_completed());
        level.bricks[2].destroyed = true;
        assert!(level.is_completed());

        level.reset();
        assert!(level.bricks.iter().all(|b| !b.destroyed));
        assert!(!level.is_completed());
    }

    #[test]
    fn test_bundled_levels_load() {
        for name in ["one", "two", "three", "four"] {
            let path = format!("levels/{name}.lvl");
            let level = Level::load_file(&path, 800.0, 300.0).unwrap();
            assert!(!level.bricks.is_empty(), "{path}");
            assert!(!level.is_completed(), "{path}");
        }
    }
}
