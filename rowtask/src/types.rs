/// A half-open range of row indexes: `start_index..end_index`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl VisibleRange {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    /// Creates a range; an `end_index` below `start_index` collapses to an empty range.
    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index: end_index.max(start_index),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }

    pub fn iter(&self) -> core::ops::Range<usize> {
        self.start_index..self.end_index
    }
}

/// Vertical geometry of one row, relative to the row container.
///
/// Rows that are not currently mounted read as all zeros.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowMetrics {
    pub top: u64,
    pub height: u32,
}

impl RowMetrics {
    pub fn end(&self) -> u64 {
        self.top.saturating_add(self.height as u64)
    }
}

/// The extended visibility window in row-container coordinates: `top..bottom`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub top: u64,
    pub bottom: u64, // exclusive
}

impl Window {
    /// Builds the window for a scroll container state.
    ///
    /// `container_offset` is how far the row container starts below the scroll container's
    /// origin. The part of it that has not been scrolled past shrinks the usable viewport.
    pub fn extended(
        scroll_top: u64,
        client_height: u32,
        container_offset: u64,
        buffer: u32,
    ) -> Self {
        let buffer = buffer as u64;
        let top = scroll_top.saturating_sub(container_offset.saturating_add(buffer));
        let bottom = scroll_top
            .saturating_add(client_height as u64)
            .saturating_add(buffer)
            .saturating_sub(container_offset);
        Self { top, bottom }
    }

    pub fn is_empty(&self) -> bool {
        self.top >= self.bottom
    }

    /// Whether a row with these metrics intersects the window.
    ///
    /// Edges that only touch the window do not count.
    pub fn intersects(&self, row: RowMetrics) -> bool {
        !self.is_empty() && row.end() > self.top && row.top < self.bottom
    }
}
