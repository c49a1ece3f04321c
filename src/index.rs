use core::ops::Range;
use std::collections::HashMap;

use log::trace;
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::{CaptureStore, Error, Observation, Result};

/// The contiguous block of equal values within a [`RangeIndex`].
///
/// A run is described by the offset of its first element in the ordered
/// sequence and the number of occurrences it holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Run {
    start: usize,
    len: usize,
}

impl Run {
    #[inline]
    pub(crate) fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Returns the offset of the first occurrence.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the offset one past the last occurrence.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Returns the number of occurrences in the run.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the run holds no occurrences. Runs produced by a
    /// build are never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Converts the run to the standard `Range` of offsets it covers.
    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// An immutable, query-optimized view over captured observations.
///
/// Holds every observation in one ascending sequence (stable within equal
/// values) and the [`Run`] of each distinct value. Queries must name values
/// that were observed when the index was built; anything else returns
/// [`Error::KeyNotFound`] rather than falling back to a nearby value.
///
/// # Examples
/// ```
/// use data_capture::{CaptureStore, Error};
///
/// let store: CaptureStore<u32> = [5, 3, 5, 1, 3, 3].into_iter().collect();
/// let index = store.build();
///
/// assert_eq!(index.as_slice(), &[1, 3, 3, 3, 5, 5]);
/// assert_eq!(index.less(3), Ok(&[1][..]));
/// assert_eq!(index.greater(3), Ok(&[5, 5][..]));
/// assert_eq!(index.between(1, 3), Ok(&[1, 3, 3, 3][..]));
/// assert_eq!(index.less(4), Err(Error::KeyNotFound { value: 4 }));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde-serialize",
    serde(
        try_from = "RawRangeIndex<T>",
        bound(deserialize = "T: Deserialize<'de>")
    )
)]
pub struct RangeIndex<T: Observation = u64> {
    ordered: Vec<T>,
    runs: HashMap<T, Run>,
}

/// Unchecked wire form of a [`RangeIndex`], validated on conversion.
#[cfg(feature = "serde-serialize")]
#[derive(Deserialize)]
struct RawRangeIndex<T: Observation> {
    ordered: Vec<T>,
    runs: HashMap<T, Run>,
}

#[cfg(feature = "serde-serialize")]
impl<T: Observation> TryFrom<RawRangeIndex<T>> for RangeIndex<T> {
    type Error = Error;

    fn try_from(raw: RawRangeIndex<T>) -> Result<Self> {
        Self::try_from_parts(raw.ordered, raw.runs)
    }
}

impl<T: Observation> RangeIndex<T> {
    #[inline]
    pub(crate) fn from_parts(ordered: Vec<T>, runs: HashMap<T, Run>) -> Self {
        Self { ordered, runs }
    }

    /// Reassembles an index from parts that were not produced by a build.
    ///
    /// `ordered` must be ascending, every run must lie within `ordered` and
    /// hold only its own value, and together the runs must cover every
    /// observation. Once that holds, no query can slice out of bounds.
    #[cfg_attr(not(feature = "serde-serialize"), allow(dead_code))]
    pub(crate) fn try_from_parts(ordered: Vec<T>, runs: HashMap<T, Run>) -> Result<Self> {
        if ordered.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(Error::Unsorted);
        }

        let mut covered = 0;
        for (&value, run) in &runs {
            let occurrences = run
                .start
                .checked_add(run.len)
                .and_then(|end| ordered.get(run.start..end));
            match occurrences {
                Some(slice) if !slice.is_empty() && slice.iter().all(|v| *v == value) => {
                    covered += run.len;
                }
                _ => {
                    return Err(Error::InvalidRun {
                        value: value.as_(),
                    })
                }
            }
        }

        // runs of distinct values are disjoint, so full coverage means every
        // observation sits in the run of its own value
        if covered != ordered.len() {
            return Err(Error::IncompleteRuns {
                covered,
                len: ordered.len(),
            });
        }

        Ok(Self { ordered, runs })
    }

    /// Returns the run of `value`.
    pub fn run(&self, value: T) -> Result<Run> {
        self.runs.get(&value).copied().ok_or_else(|| {
            trace!("range index lookup for unobserved value {:?}", value);
            Error::KeyNotFound { value: value.as_() }
        })
    }

    /// Returns the offset at which the run of `value` begins.
    #[inline]
    pub fn offset(&self, value: T) -> Result<usize> {
        self.run(value).map(|run| run.start())
    }

    /// Returns every occurrence of `value`.
    pub fn occurrences(&self, value: T) -> Result<&[T]> {
        let run = self.run(value)?;
        Ok(&self.ordered[run.to_range()])
    }

    /// Returns every observation strictly less than `value`.
    pub fn less(&self, value: T) -> Result<&[T]> {
        let run = self.run(value)?;
        Ok(&self.ordered[..run.start()])
    }

    /// Returns every observation in `start..=end`, including all occurrences
    /// of both endpoints.
    ///
    /// Both endpoints must have been observed. A reversed range
    /// (`start > end`) is empty.
    pub fn between(&self, start: T, end: T) -> Result<&[T]> {
        let lower = self.run(start)?.start();
        let upper = self.run(end)?.end();
        if start > end {
            return Ok(&[]);
        }
        Ok(&self.ordered[lower..upper])
    }

    /// Returns every observation strictly greater than `value`.
    pub fn greater(&self, value: T) -> Result<&[T]> {
        let run = self.run(value)?;
        Ok(&self.ordered[run.end()..])
    }

    /// Returns `true` if `value` was observed.
    #[inline]
    pub fn contains(&self, value: T) -> bool {
        self.runs.contains_key(&value)
    }

    /// Returns the total number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Returns `true` if the index holds no observations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Returns the ordered sequence of all observations.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.ordered
    }

    /// Iterates the distinct observed values in ascending order.
    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        let mut pos = 0;
        core::iter::from_fn(move || {
            let value = *self.ordered.get(pos)?;
            // every observation belongs to the run of its value
            pos = self.runs[&value].end();
            Some(value)
        })
    }
}

impl<T: Observation> From<&CaptureStore<T>> for RangeIndex<T> {
    fn from(store: &CaptureStore<T>) -> Self {
        store.build()
    }
}

impl<'a, T: Observation> IntoIterator for &'a RangeIndex<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.iter()
    }
}
