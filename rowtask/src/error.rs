use alloc::boxed::Box;
use alloc::string::String;

/// A non-fatal scheduling error.
///
/// None of these abort the host. When `update_row_states` reports one, the visible range and
/// all row flags are left untouched, so a later call with a fixed configuration recovers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    #[error("scroll selector is not configured")]
    ScrollSelectorUnset,
    #[error("parent selector is not configured")]
    ParentSelectorUnset,
    #[error("scroll selector `{0}` did not match any element")]
    ScrollContainerNotFound(String),
    #[error("parent selector `{0}` did not match any element")]
    RowContainerNotFound(String),
    /// Row indexes must be exactly `0..len`.
    #[error("row indexes are not contiguous ({len} rows registered, last index {last})")]
    SparseRows { len: usize, last: usize },
    #[error("row offsets decrease at index {index} ({previous} > {current})")]
    NonMonotonicOffsets {
        index: usize,
        previous: u64,
        current: u64,
    },
}

/// The error type returned by task callbacks.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("{0}")]
    Message(String),
    #[error("{0}")]
    Source(Box<dyn core::error::Error + 'static>),
}

impl TaskError {
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub fn from_source(source: impl core::error::Error + 'static) -> Self {
        Self::Source(Box::new(source))
    }
}

impl From<String> for TaskError {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for TaskError {
    fn from(message: &str) -> Self {
        Self::Message(message.into())
    }
}
