use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer coordinate of a single cell in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPosition {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        BlockPosition { x, y, z }
    }

    /// Block containing a floating point entity position. Each axis is
    /// floored, so `-0.5` lands in block `-1`. Callers pass finite values;
    /// NaN and out-of-range input saturate like an `as` cast.
    pub fn from_entity_pos(pos: (f64, f64, f64)) -> Self {
        BlockPosition {
            x: pos.0.floor() as i32,
            y: pos.1.floor() as i32,
            z: pos.2.floor() as i32,
        }
    }

    pub fn component_min(self, other: BlockPosition) -> BlockPosition {
        BlockPosition {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
            z: self.z.min(other.z),
        }
    }

    pub fn component_max(self, other: BlockPosition) -> BlockPosition {
        BlockPosition {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            z: self.z.max(other.z),
        }
    }
}

impl From<(i32, i32, i32)> for BlockPosition {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        BlockPosition { x, y, z }
    }
}

impl From<BlockPosition> for (i32, i32, i32) {
    fn from(pos: BlockPosition) -> Self {
        (pos.x, pos.y, pos.z)
    }
}

impl fmt::Display for BlockPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}
