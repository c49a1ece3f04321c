use std::collections::HashMap;

use log::debug;

use crate::{Observation, RangeIndex, Run};

/// An ingestion-side store that groups observations by value.
///
/// Inserting is O(1) amortized. Each distinct value keeps every occurrence in
/// insertion order, so multiplicities survive into the built index.
///
/// # Examples
/// ```
/// use data_capture::CaptureStore;
///
/// let mut store = CaptureStore::<u32>::new();
/// store.insert(3);
/// store.insert(1);
/// store.insert(3);
///
/// assert_eq!(store.len(), 3);
/// assert_eq!(store.count(3), 2);
/// assert_eq!(store.max_seen(), Some(3));
/// ```
#[derive(Clone, Debug)]
pub struct CaptureStore<T: Observation = u64> {
    groups: HashMap<T, Vec<T>>,
    max: Option<T>,
    len: usize,
}

impl<T: Observation> CaptureStore<T> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
            max: None,
            len: 0,
        }
    }

    /// Creates an empty store with room for `distinct` values before the
    /// group map reallocates.
    pub fn with_capacity(distinct: usize) -> Self {
        Self {
            groups: HashMap::with_capacity(distinct),
            max: None,
            len: 0,
        }
    }

    /// Records one observation of `value`.
    #[inline]
    pub fn insert(&mut self, value: T) {
        self.groups.entry(value).or_default().push(value);
        self.max = Some(match self.max {
            Some(max) if max >= value => max,
            _ => value,
        });
        self.len += 1;
    }

    /// Returns the total number of observations, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of distinct values observed.
    #[inline]
    pub fn distinct(&self) -> usize {
        self.groups.len()
    }

    /// Returns the largest value inserted, or `None` for an empty store.
    #[inline]
    pub fn max_seen(&self) -> Option<T> {
        self.max
    }

    /// Returns how many times `value` has been inserted.
    pub fn count(&self, value: T) -> usize {
        self.groups.get(&value).map_or(0, Vec::len)
    }

    /// Removes every observation, keeping allocated capacity.
    pub fn clear(&mut self) {
        self.groups.clear();
        self.max = None;
        self.len = 0;
    }

    /// Builds an immutable [`RangeIndex`] from the current observations.
    ///
    /// This is a counting sort: every integer from zero through
    /// [`max_seen`](Self::max_seen) is visited once, and each observed value
    /// has its group appended to the output in insertion order. The cost is
    /// O(max + n), so the build is only cheap when observed values are dense
    /// relative to their largest value. A handful of huge, sparse values will
    /// make the scan dominate.
    ///
    /// The store is left untouched; building twice without an intervening
    /// insert produces identical indexes.
    pub fn build(&self) -> RangeIndex<T> {
        let mut ordered = Vec::with_capacity(self.len);
        let mut runs = HashMap::with_capacity(self.groups.len());

        let Some(max) = self.max else {
            return RangeIndex::from_parts(ordered, runs);
        };

        // stepping in `T` stops at `max` without overflowing at `T::max_value()`
        let mut value = T::zero();
        loop {
            if let Some(group) = self.groups.get(&value) {
                runs.insert(value, Run::new(ordered.len(), group.len()));
                ordered.extend_from_slice(group);
            }
            if value == max {
                break;
            }
            value = value + T::one();
        }

        debug!(
            "built range index: {} observations, {} distinct values, scanned 0..={:?}",
            ordered.len(),
            runs.len(),
            max
        );

        RangeIndex::from_parts(ordered, runs)
    }
}

impl<T: Observation> Default for CaptureStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Observation> Extend<T> for CaptureStore<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Observation> FromIterator<T> for CaptureStore<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}
