//! Read access to the blocks of a world.
//!
//! The counter only ever asks "what is at this position"; [`BlockAccessor`]
//! is that seam. [`SparseWorld`] is a small keyed store implementing it,
//! used by the command line tool and the tests.

use crate::block_id::{BlockId, DEFAULT_EMPTY_BLOCK};
use crate::block_position::BlockPosition;
use crate::error::{CensusError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub trait BlockAccessor {
    /// Block id at `pos`. Must be cheap to call once per cell and must not
    /// mutate the world.
    fn block_id_at(&self, pos: BlockPosition) -> &BlockId;
}

impl<A: BlockAccessor + ?Sized> BlockAccessor for &A {
    fn block_id_at(&self, pos: BlockPosition) -> &BlockId {
        (**self).block_id_at(pos)
    }
}

/// World where only explicitly placed blocks are stored. Every other
/// position reads as the fill block.
///
/// Placed blocks are kept as palette indices, so a world with millions of
/// stone blocks stores the id once.
#[derive(Debug, Clone)]
pub struct SparseWorld {
    fill: BlockId,
    palette: Vec<BlockId>,
    palette_index: FxHashMap<BlockId, usize>,
    blocks: FxHashMap<BlockPosition, usize>,
}

/// On-disk JSON shape of a [`SparseWorld`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldDescription {
    #[serde(default = "default_fill")]
    pub default: String,
    #[serde(default)]
    pub blocks: Vec<PlacedBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedBlock {
    pub pos: (i32, i32, i32),
    pub id: String,
}

fn default_fill() -> String {
    DEFAULT_EMPTY_BLOCK.to_string()
}

impl Default for SparseWorld {
    fn default() -> Self {
        SparseWorld::new(DEFAULT_EMPTY_BLOCK)
    }
}

impl SparseWorld {
    pub fn new(fill: impl Into<BlockId>) -> Self {
        SparseWorld {
            fill: fill.into(),
            palette: Vec::new(),
            palette_index: FxHashMap::default(),
            blocks: FxHashMap::default(),
        }
    }

    pub fn fill_block(&self) -> &BlockId {
        &self.fill
    }

    fn get_or_insert_in_palette(&mut self, id: BlockId) -> usize {
        match self.palette_index.get(&id) {
            Some(&index) => index,
            None => {
                let index = self.palette.len();
                self.palette.push(id.clone());
                self.palette_index.insert(id, index);
                index
            }
        }
    }

    /// Places `id` at `pos`. Placing the fill block clears the position.
    pub fn set_block(&mut self, pos: impl Into<BlockPosition>, id: impl Into<BlockId>) {
        let (pos, id) = (pos.into(), id.into());
        if id == self.fill {
            self.blocks.remove(&pos);
            return;
        }
        let index = self.get_or_insert_in_palette(id);
        self.blocks.insert(pos, index);
    }

    pub fn get_block(&self, pos: impl Into<BlockPosition>) -> &BlockId {
        self.block_id_at(pos.into())
    }

    /// Number of explicitly placed blocks.
    pub fn placed_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn from_description(description: WorldDescription) -> Self {
        let mut world = SparseWorld::new(description.default);
        for block in description.blocks {
            world.set_block(block.pos, block.id);
        }
        world
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let description: WorldDescription = serde_json::from_str(json)
            .map_err(|e| CensusError::World(format!("Invalid world description: {}", e)))?;
        Ok(Self::from_description(description))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CensusError::World(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }
}

impl BlockAccessor for SparseWorld {
    fn block_id_at(&self, pos: BlockPosition) -> &BlockId {
        match self.blocks.get(&pos) {
            Some(&index) => &self.palette[index],
            None => &self.fill,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_positions_read_as_fill() {
        let world = SparseWorld::default();
        assert_eq!(world.get_block((0, 0, 0)), "game:air");
        assert_eq!(world.get_block((i32::MIN, 5, i32::MAX)), "game:air");
    }

    #[test]
    fn test_set_and_get_block() {
        let mut world = SparseWorld::default();
        world.set_block((1, 2, 3), "game:soil-medium-normal");
        world.set_block((-1, 2, 3), "game:soil-medium-normal");
        world.set_block((1, 2, 4), "game:rock-granite");

        assert_eq!(world.get_block((1, 2, 3)), "game:soil-medium-normal");
        assert_eq!(world.get_block((1, 2, 4)), "game:rock-granite");
        assert_eq!(world.placed_count(), 3);
        assert_eq!(world.palette.len(), 2);
    }

    #[test]
    fn test_setting_fill_clears_position() {
        let mut world = SparseWorld::default();
        world.set_block((0, 0, 0), "game:rock-granite");
        world.set_block((0, 0, 0), "game:air");
        assert_eq!(world.placed_count(), 0);
        assert_eq!(world.get_block((0, 0, 0)), "game:air");
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "default": "game:air",
            "blocks": [
                {"pos": [0, 0, 0], "id": "game:rock-granite"},
                {"pos": [0, 1, 0], "id": "game:log-oak-ud"}
            ]
        }"#;
        let world = SparseWorld::from_json_str(json).unwrap();
        assert_eq!(world.get_block((0, 0, 0)), "game:rock-granite");
        assert_eq!(world.get_block((0, 1, 0)), "game:log-oak-ud");
        assert_eq!(world.get_block((0, 2, 0)), "game:air");
    }

    #[test]
    fn test_from_json_str_defaults_fill() {
        let world = SparseWorld::from_json_str(r#"{"blocks": []}"#).unwrap();
        assert_eq!(world.fill_block(), "game:air");
    }

    #[test]
    fn test_from_json_str_rejects_garbage() {
        let err = SparseWorld::from_json_str("not json").unwrap_err();
        assert!(matches!(err, CensusError::World(_)));
    }
}
