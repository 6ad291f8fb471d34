use crate::accessor::BlockAccessor;
use crate::block_id::{BlockId, DEFAULT_EMPTY_BLOCK};
use crate::bounding_box::BoundingBox;
use crate::config::CensusConfig;
use crate::error::{CensusError, Result};
use crate::tally::BlockTally;
use tracing::{debug, info};

/// Counts every non-empty block inside `bbox`.
///
/// Cells are visited x outermost, then y, then z, which fixes the order of
/// the returned tally. Cells whose id equals `empty` are skipped. The box is
/// not size checked here; see [`BlockCounter`] for the guarded version.
pub fn count_region<A>(bbox: &BoundingBox, accessor: &A, empty: &str) -> BlockTally
where
    A: BlockAccessor + ?Sized,
{
    let mut tally = BlockTally::new();
    bbox.for_each_position(|pos| {
        let id = accessor.block_id_at(pos);
        if id == empty {
            return;
        }
        if tally.record(id) {
            debug!("first {} at {}", id, pos);
        }
    });
    tally
}

/// Region counter carrying the empty block id and an optional volume limit.
#[derive(Debug, Clone)]
pub struct BlockCounter {
    empty_block: BlockId,
    max_volume: Option<u64>,
}

impl Default for BlockCounter {
    fn default() -> Self {
        BlockCounter::new(DEFAULT_EMPTY_BLOCK)
    }
}

impl BlockCounter {
    /// Counter without a volume limit.
    pub fn new(empty_block: impl Into<BlockId>) -> Self {
        BlockCounter {
            empty_block: empty_block.into(),
            max_volume: None,
        }
    }

    pub fn from_config(config: &CensusConfig) -> Self {
        BlockCounter {
            empty_block: BlockId::new(config.empty_block.as_str()),
            max_volume: config.max_volume,
        }
    }

    pub fn with_max_volume(mut self, limit: Option<u64>) -> Self {
        self.max_volume = limit;
        self
    }

    pub fn check_volume(&self, bbox: &BoundingBox) -> Result<()> {
        let volume = bbox.volume();
        match self.max_volume {
            Some(limit) if volume > limit => Err(CensusError::VolumeTooLarge { volume, limit }),
            _ => Ok(()),
        }
    }

    pub fn count<A>(&self, bbox: &BoundingBox, accessor: &A) -> Result<BlockTally>
    where
        A: BlockAccessor + ?Sized,
    {
        self.check_volume(bbox)?;
        info!(
            "Scanning {} blocks from {} to {}",
            bbox.volume(),
            bbox.min(),
            bbox.max()
        );
        let tally = count_region(bbox, accessor, self.empty_block.as_str());
        info!(
            "Scan finished: {} blocks of {} types",
            tally.total(),
            tally.len()
        );
        Ok(tally)
    }
}
