use crate::block_id::BlockId;
use rustc_hash::FxHashMap;

/// Occurrence count per block id, iterated in the order ids were first seen.
///
/// Entries live in a palette vector; `index` maps an id to its slot so that
/// incrementing stays O(1).
#[derive(Debug, Clone, Default)]
pub struct BlockTally {
    entries: Vec<(BlockId, u64)>,
    index: FxHashMap<BlockId, usize>,
}

impl BlockTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `id`. Returns true if the id was new.
    pub fn record(&mut self, id: &BlockId) -> bool {
        self.record_many(id, 1)
    }

    /// Adds `count` occurrences of `id`, saturating at `u64::MAX`.
    pub fn record_many(&mut self, id: &BlockId, count: u64) -> bool {
        match self.index.get(id) {
            Some(&slot) => {
                let entry = &mut self.entries[slot].1;
                *entry = entry.saturating_add(count);
                false
            }
            None => self.insert(id, count),
        }
    }

    /// Like [`BlockTally::record_many`], but returns `None` and leaves the
    /// tally untouched if the count would overflow.
    pub fn try_record_many(&mut self, id: &BlockId, count: u64) -> Option<bool> {
        match self.index.get(id) {
            Some(&slot) => {
                let entry = &mut self.entries[slot].1;
                *entry = entry.checked_add(count)?;
                Some(false)
            }
            None => Some(self.insert(id, count)),
        }
    }

    fn insert(&mut self, id: &BlockId, count: u64) -> bool {
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push((id.clone(), count));
        true
    }

    pub fn get(&self, id: &str) -> Option<u64> {
        self.index.get(id).map(|&slot| self.entries[slot].1)
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |sum, (_, count)| sum.saturating_add(*count))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BlockId, u64)> {
        self.entries.iter().map(|(id, count)| (id, *count))
    }

    /// Copy of this tally with entries ordered by id.
    pub fn sorted_by_name(&self) -> BlockTally {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.into_iter().collect()
    }
}

impl PartialEq for BlockTally {
    /// Equal when both hold the same entries in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for BlockTally {}

impl FromIterator<(BlockId, u64)> for BlockTally {
    fn from_iter<I: IntoIterator<Item = (BlockId, u64)>>(iter: I) -> Self {
        let mut tally = BlockTally::new();
        for (id, count) in iter {
            tally.record_many(&id, count);
        }
        tally
    }
}

impl IntoIterator for BlockTally {
    type Item = (BlockId, u64);
    type IntoIter = std::vec::IntoIter<(BlockId, u64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(code: &str) -> BlockId {
        BlockId::new(code)
    }

    #[test]
    fn test_record_keeps_first_seen_order() {
        let mut tally = BlockTally::new();
        assert!(tally.record(&id("game:rock-granite")));
        assert!(tally.record(&id("game:soil-medium-normal")));
        assert!(!tally.record(&id("game:rock-granite")));
        assert!(tally.record(&id("game:clay-blue")));

        let order: Vec<(&str, u64)> = tally.iter().map(|(id, n)| (id.as_str(), n)).collect();
        assert_eq!(
            order,
            vec![
                ("game:rock-granite", 2),
                ("game:soil-medium-normal", 1),
                ("game:clay-blue", 1),
            ]
        );
        assert_eq!(tally.len(), 3);
        assert_eq!(tally.total(), 4);
    }

    #[test]
    fn test_get() {
        let mut tally = BlockTally::new();
        tally.record_many(&id("game:log-oak-ud"), 12);
        assert_eq!(tally.get("game:log-oak-ud"), Some(12));
        assert_eq!(tally.get("game:air"), None);
    }

    #[test]
    fn test_sorted_by_name() {
        let tally: BlockTally = vec![(id("b"), 1), (id("c"), 3), (id("a"), 2)]
            .into_iter()
            .collect();
        let sorted = tally.sorted_by_name();
        let names: Vec<&str> = sorted.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(sorted.get("c"), Some(3));
        assert_ne!(sorted, tally);
    }

    #[test]
    fn test_from_iter_merges_duplicates() {
        let tally: BlockTally = vec![(id("a"), 2), (id("b"), 1), (id("a"), 5)]
            .into_iter()
            .collect();
        assert_eq!(tally.len(), 2);
        assert_eq!(tally.get("a"), Some(7));
    }

    #[test]
    fn test_counts_do_not_overflow() {
        let mut tally = BlockTally::new();
        tally.record_many(&id("a"), u64::MAX);
        tally.record_many(&id("b"), 5);
        assert_eq!(tally.total(), u64::MAX);

        assert_eq!(tally.try_record_many(&id("a"), 1), None);
        assert_eq!(tally.get("a"), Some(u64::MAX));
        assert_eq!(tally.try_record_many(&id("b"), 2), Some(false));
        assert_eq!(tally.try_record_many(&id("c"), 1), Some(true));

        tally.record_many(&id("a"), 10);
        assert_eq!(tally.get("a"), Some(u64::MAX));
    }
}
