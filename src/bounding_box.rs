use crate::block_position::BlockPosition;
use serde::{Deserialize, Serialize};

/// Inclusive axis-aligned box of block positions.
///
/// The only constructor is [`BoundingBox::from_corners`], so `min` is never
/// greater than `max` on any axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Corners")]
pub struct BoundingBox {
    min: BlockPosition,
    max: BlockPosition,
}

/// Serialized shape of a box. Deserialized corners go through
/// [`BoundingBox::from_corners`], so reversed input is normalized.
#[derive(Deserialize)]
struct Corners {
    min: BlockPosition,
    max: BlockPosition,
}

impl From<Corners> for BoundingBox {
    fn from(corners: Corners) -> Self {
        BoundingBox::from_corners(corners.min, corners.max)
    }
}

impl BoundingBox {
    /// Normalizes two arbitrary corners into a box. Corner order does not
    /// matter and equal corners give a single-cell box.
    pub fn from_corners(a: impl Into<BlockPosition>, b: impl Into<BlockPosition>) -> Self {
        let (a, b) = (a.into(), b.into());
        BoundingBox {
            min: a.component_min(b),
            max: a.component_max(b),
        }
    }

    pub fn min(&self) -> BlockPosition {
        self.min
    }

    pub fn max(&self) -> BlockPosition {
        self.max
    }

    /// Cell count along each axis. Returned as `u64` because a box spanning
    /// the full `i32` range is `2^32` cells wide.
    pub fn dimensions(&self) -> (u64, u64, u64) {
        (
            axis_len(self.min.x, self.max.x),
            axis_len(self.min.y, self.max.y),
            axis_len(self.min.z, self.max.z),
        )
    }

    /// Number of cells in the box, saturating at `u64::MAX`.
    pub fn volume(&self) -> u64 {
        let (w, h, l) = self.dimensions();
        w.saturating_mul(h).saturating_mul(l)
    }

    /// Calls `f` for every cell, x outermost, then y, then z.
    pub fn for_each_position<F>(&self, mut f: F)
    where
        F: FnMut(BlockPosition),
    {
        for x in self.min.x..=self.max.x {
            for y in self.min.y..=self.max.y {
                for z in self.min.z..=self.max.z {
                    f(BlockPosition::new(x, y, z));
                }
            }
        }
    }

    /// Lazy iterator over every cell in the same order as
    /// [`BoundingBox::for_each_position`].
    pub fn positions(&self) -> impl Iterator<Item = BlockPosition> {
        let (min, max) = (self.min, self.max);
        (min.x..=max.x).flat_map(move |x| {
            (min.y..=max.y)
                .flat_map(move |y| (min.z..=max.z).map(move |z| BlockPosition::new(x, y, z)))
        })
    }
}

fn axis_len(min: i32, max: i32) -> u64 {
    (i64::from(max) - i64::from(min) + 1) as u64
}
