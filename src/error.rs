use thiserror::Error;

/// Result type alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by range index queries and index reconstruction.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("value {value} was never observed")]
    KeyNotFound { value: u64 },
    #[error("ordered observations are not in ascending order")]
    Unsorted,
    #[error("run for value {value} does not match the ordered observations")]
    InvalidRun { value: u64 },
    #[error("runs cover {covered} of {len} observations")]
    IncompleteRuns { covered: usize, len: usize },
}
