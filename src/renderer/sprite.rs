//! Opaque sprite handles
//!
//! The simulation never loads textures. Whoever owns the GPU resources hands
//! the game a `SpriteSet` and gets the same handles back in draw commands.

use crate::sim::PowerUpKind;

/// Identifier for a texture owned by the presentation layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SpriteHandle(pub u32);

/// Every sprite the game draws
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpriteSet {
    pub background: SpriteHandle,
    pub brick: SpriteHandle,
    pub solid_brick: SpriteHandle,
    pub paddle: SpriteHandle,
    pub ball: SpriteHandle,
    pub particle: SpriteHandle,
    /// Indexed like `PowerUpKind::ALL`
    pub power_ups: [SpriteHandle; 6],
}

impl SpriteSet {
    /// Distinct handles numbered from zero, in field order
    pub fn sequential() -> Self {
        let mut power_ups = [SpriteHandle::default(); 6];
        for (i, handle) in power_ups.iter_mut().enumerate() {
            *handle = SpriteHandle(6 + i as u32);
        }
        Self {
            background: SpriteHandle(0),
            brick: SpriteHandle(1),
            solid_brick: SpriteHandle(2),
            paddle: SpriteHandle(3),
            ball: SpriteHandle(4),
            particle: SpriteHandle(5),
            power_ups,
        }
    }

    pub fn power_up(&self, kind: PowerUpKind) -> SpriteHandle {
        self.power_ups[kind.index()]
    }
}
