//! GPU-ready instance data for sprite batches

use bytemuck::{Pod, Zeroable};

use super::DrawCommand;

/// One textured quad, laid out for an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
    /// Radians
    pub rotation: f32,
    pub sprite: u32,
    pub _pad: [u32; 2],
}

impl From<&DrawCommand> for SpriteInstance {
    fn from(cmd: &DrawCommand) -> Self {
        Self {
            position: cmd.position.to_array(),
            size: cmd.size.to_array(),
            color: cmd.color.to_array(),
            rotation: cmd.rotation,
            sprite: cmd.sprite.0,
            _pad: [0; 2],
        }
    }
}

/// Pack a draw list for upload
pub fn instances(commands: &[DrawCommand]) -> Vec<SpriteInstance> {
    commands.iter().map(SpriteInstance::from).collect()
}

/// Raw bytes of an instance slice
pub fn as_bytes(instances: &[SpriteInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
