//! Symbol frequency counting.
//!
//! Symbols are bytes. A [`FrequencyTable`] holds one counter per byte value
//! and always iterates in ascending symbol order, so two runs over the same
//! input observe the same entries in the same order.

use std::fmt;

/// Number of distinct byte symbols.
pub const ALPHABET_SIZE: usize = 256;

/// One distinct symbol and how often it occurs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub symbol: u8,
    pub count: u64,
}

/// Symbol to count mapping for a byte sequence.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }
}

impl fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|e| (e.symbol, e.count)))
            .finish()
    }
}

impl FrequencyTable {
    /// Count every byte of `data`.
    pub fn count(data: &[u8]) -> Self {
        let mut table = Self::default();
        for &byte in data {
            table.counts[usize::from(byte)] += 1;
        }
        table
    }

    /// Count `data` in parallel chunks and merge the partial tables.
    #[cfg(feature = "rayon")]
    pub fn count_parallel(data: &[u8], chunk_size: usize) -> Self {
        use rayon::prelude::*;

        data.par_chunks(chunk_size.max(1))
            .map(Self::count)
            .reduce(Self::default, |mut acc, part| {
                acc.merge(&part);
                acc
            })
    }

    /// Add the counts of `other` into `self`, saturating at `u64::MAX`.
    pub fn merge(&mut self, other: &Self) {
        for (mine, &theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine = mine.saturating_add(theirs);
        }
    }

    /// Count for `symbol` (zero if it never occurs).
    #[inline]
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[usize::from(symbol)]
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// True when no symbol was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Total number of symbols counted, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0, |acc, &c| acc.saturating_add(c))
    }

    /// Entries with a non-zero count, sorted by symbol.
    pub fn iter(&self) -> impl Iterator<Item = FrequencyEntry> + '_ {
        self.counts
            .iter()
            .zip(0..=u8::MAX)
            .filter(|&(&count, _)| count > 0)
            .map(|(&count, symbol)| FrequencyEntry { symbol, count })
    }
}

/// Entries for the same symbol are summed, saturating at `u64::MAX`.
impl FromIterator<FrequencyEntry> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = FrequencyEntry>>(iter: I) -> Self {
        let mut table = Self::default();
        for entry in iter {
            let count = &mut table.counts[usize::from(entry.symbol)];
            *count = count.saturating_add(entry.count);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_empty() {
        let table = FrequencyTable::count(b"");
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.total(), 0);
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn test_count_aggregates_duplicates() {
        let table = FrequencyTable::count(b"abracadabra");
        assert_eq!(table.get(b'a'), 5);
        assert_eq!(table.get(b'b'), 2);
        assert_eq!(table.get(b'r'), 2);
        assert_eq!(table.get(b'c'), 1);
        assert_eq!(table.get(b'd'), 1);
        assert_eq!(table.get(b'z'), 0);
        assert_eq!(table.len(), 5);
        assert_eq!(table.total(), 11);
    }

    #[test]
    fn test_iter_sorted_by_symbol() {
        let table = FrequencyTable::count(b"zyxzyz\x00\xff");
        let symbols: Vec<u8> = table.iter().map(|e| e.symbol).collect();
        assert_eq!(symbols, vec![0x00, b'x', b'y', b'z', 0xff]);
        assert!(table.iter().all(|e| e.count >= 1));
    }

    #[test]
    fn test_merge_matches_whole_count() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let (left, right) = data.split_at(17);

        let mut merged = FrequencyTable::count(left);
        merged.merge(&FrequencyTable::count(right));

        assert_eq!(merged, FrequencyTable::count(data));
    }

    #[test]
    fn test_from_entries() {
        let table: FrequencyTable = [
            FrequencyEntry {
                symbol: b'a',
                count: 5,
            },
            FrequencyEntry {
                symbol: b'b',
                count: 2,
            },
        ]
        .into_iter()
        .collect();

        assert_eq!(table.get(b'a'), 5);
        assert_eq!(table.get(b'b'), 2);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_counts_saturate() {
        let big = FrequencyEntry {
            symbol: b'a',
            count: u64::MAX - 1,
        };
        let table: FrequencyTable = [big, big].into_iter().collect();
        assert_eq!(table.get(b'a'), u64::MAX);

        let mut merged = FrequencyTable::count(b"aab");
        merged.merge(&table);
        assert_eq!(merged.get(b'a'), u64::MAX);
        assert_eq!(merged.get(b'b'), 1);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_count_parallel() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i * 7 % 251) as u8).collect();
        assert_eq!(
            FrequencyTable::count_parallel(&data, 333),
            FrequencyTable::count(&data)
        );
    }
}
