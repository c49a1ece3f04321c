#![doc = include_str!("../README.md")]
//!
//! # Quick Start
//!
//! ```rust
//! use data_capture::CaptureStore;
//!
//! // Capture observations (defaults to u64 values)
//! let mut capture = CaptureStore::new();
//! for value in [3u64, 9, 3, 4, 6] {
//!     capture.insert(value);
//! }
//!
//! // Build the query structure once
//! let stats = capture.build();
//!
//! assert_eq!(stats.less(4)?, &[3, 3]);
//! assert_eq!(stats.between(3, 6)?, &[3, 3, 4, 6]);
//! assert_eq!(stats.greater(4)?, &[6, 9]);
//! # Ok::<(), data_capture::Error>(())
//! ```
//!
//! # Value Types
//!
//! Observations are unsigned integers: `u8`, `u16`, `u32`, `u64`, or `usize`.
//! Negative values cannot be captured at all.
//!
//! ```rust
//! use data_capture::CaptureStore;
//!
//! let small: CaptureStore<u8> = [200u8, 7, 7].into_iter().collect();
//! assert_eq!(small.build().as_slice(), &[7, 7, 200]);
//! ```
//!
//! # Lookups
//!
//! Queries only accept values that were observed before the build. There is
//! no nearest-value fallback:
//!
//! ```rust
//! use data_capture::{CaptureStore, Error};
//!
//! let stats = CaptureStore::<u32>::from_iter([1, 2, 4]).build();
//! assert_eq!(stats.less(3), Err(Error::KeyNotFound { value: 3 }));
//! assert!(stats.contains(4));
//! ```
//!
//! # Build Cost
//!
//! [`CaptureStore::build`] is a counting sort. It walks every integer from
//! zero to the largest observation, so it is linear in that span plus the
//! number of observations. Keep observed values dense and bounded.

mod capture;
mod error;
mod index;
mod observation;

pub use capture::CaptureStore;
pub use error::{Error, Result};
pub use index::{RangeIndex, Run};
pub use observation::Observation;

#[cfg(test)]
#[path = "tests/capture_store_tests.rs"]
mod capture_store_tests;

#[cfg(test)]
#[path = "tests/range_index_tests.rs"]
mod range_index_tests;
