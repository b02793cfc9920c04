use alloc::string::String;
use alloc::vec::Vec;

use rowtask::RowMetricsProvider;

/// An element of a [`StackLayout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    /// The scrolling ancestor.
    Scroll,
    /// The row container, offset `rows_offset` pixels into the scroll container.
    Rows,
    Row(usize),
}

/// An in-memory layout: rows stacked top to bottom inside a row container, which itself sits
/// inside a scroll container.
///
/// This is a ready-made [`RowMetricsProvider`] for headless or TUI hosts that own their own
/// geometry, and a convenient stand-in for a DOM in tests. Rows can be unmounted to model
/// virtualization; an unmounted row keeps its slot in the layout but cannot be resolved.
#[derive(Clone, Debug)]
pub struct StackLayout {
    scroll_selector: String,
    parent_selector: String,
    scroll_top: u64,
    client_height: u32,
    rows_offset: u32,
    heights: Vec<u32>,
    tops: Vec<u64>,
    mounted: Vec<bool>,
}

impl StackLayout {
    pub fn new(
        parent_selector: impl Into<String>,
        scroll_selector: impl Into<String>,
        client_height: u32,
    ) -> Self {
        Self {
            scroll_selector: scroll_selector.into(),
            parent_selector: parent_selector.into(),
            scroll_top: 0,
            client_height,
            rows_offset: 0,
            heights: Vec::new(),
            tops: Vec::new(),
            mounted: Vec::new(),
        }
    }

    /// Places the row container `rows_offset` pixels below the scroll container's origin
    /// (e.g. below a table header).
    pub fn with_rows_offset(mut self, rows_offset: u32) -> Self {
        self.rows_offset = rows_offset;
        self
    }

    pub fn parent_selector(&self) -> &str {
        &self.parent_selector
    }

    pub fn scroll_selector(&self) -> &str {
        &self.scroll_selector
    }

    pub fn row_count(&self) -> usize {
        self.heights.len()
    }

    pub fn rows_offset(&self) -> u32 {
        self.rows_offset
    }

    pub fn set_rows_offset(&mut self, rows_offset: u32) {
        self.rows_offset = rows_offset;
        self.set_scroll_top(self.scroll_top);
    }

    /// Appends a mounted row and returns its index.
    pub fn push_row(&mut self, height: u32) -> usize {
        let index = self.heights.len();
        let top = self.content_height();
        self.heights.push(height);
        self.tops.push(top);
        self.mounted.push(true);
        index
    }

    /// Changes a row's height and shifts every row below it. Returns `false` for an unknown
    /// index.
    pub fn set_row_height(&mut self, index: usize, height: u32) -> bool {
        let Some(slot) = self.heights.get_mut(index) else {
            return false;
        };
        *slot = height;
        self.relayout_from(index);
        true
    }

    pub fn row_height(&self, index: usize) -> Option<u32> {
        self.heights.get(index).copied()
    }

    pub fn row_top(&self, index: usize) -> Option<u64> {
        self.tops.get(index).copied()
    }

    pub fn truncate(&mut self, len: usize) {
        self.heights.truncate(len);
        self.tops.truncate(len);
        self.mounted.truncate(len);
        self.set_scroll_top(self.scroll_top);
    }

    pub fn clear(&mut self) {
        self.truncate(0);
    }

    pub fn set_mounted(&mut self, index: usize, mounted: bool) -> bool {
        let Some(slot) = self.mounted.get_mut(index) else {
            return false;
        };
        *slot = mounted;
        true
    }

    pub fn is_mounted(&self, index: usize) -> bool {
        self.mounted.get(index).copied().unwrap_or(false)
    }

    /// Sum of all row heights.
    pub fn content_height(&self) -> u64 {
        match (self.tops.last(), self.heights.last()) {
            (Some(&top), Some(&height)) => top.saturating_add(height as u64),
            _ => 0,
        }
    }

    /// Height of everything inside the scroll container.
    pub fn scroll_height(&self) -> u64 {
        (self.rows_offset as u64).saturating_add(self.content_height())
    }

    pub fn max_scroll_top(&self) -> u64 {
        self.scroll_height()
            .saturating_sub(self.client_height as u64)
    }

    pub fn current_scroll_top(&self) -> u64 {
        self.scroll_top
    }

    /// Scrolls, clamping like a browser does. Returns the applied offset.
    pub fn set_scroll_top(&mut self, scroll_top: u64) -> u64 {
        self.scroll_top = scroll_top.min(self.max_scroll_top());
        self.scroll_top
    }

    pub fn current_client_height(&self) -> u32 {
        self.client_height
    }

    pub fn set_client_height(&mut self, client_height: u32) {
        self.client_height = client_height;
        self.set_scroll_top(self.scroll_top);
    }

    fn relayout_from(&mut self, index: usize) {
        let mut top = match index.checked_sub(1) {
            Some(prev) => self.tops[prev].saturating_add(self.heights[prev] as u64),
            None => 0,
        };
        for i in index..self.heights.len() {
            self.tops[i] = top;
            top = top.saturating_add(self.heights[i] as u64);
        }
    }
}

impl RowMetricsProvider for StackLayout {
    type Element = Node;

    fn query_selector(&self, selector: &str) -> Option<Node> {
        if selector == self.scroll_selector {
            Some(Node::Scroll)
        } else if selector == self.parent_selector {
            Some(Node::Rows)
        } else {
            None
        }
    }

    fn resolve_row_element(&self, parent: &Node, index: usize) -> Option<Node> {
        (*parent == Node::Rows && self.is_mounted(index)).then_some(Node::Row(index))
    }

    fn offset_top(&self, element: &Node) -> u64 {
        match *element {
            Node::Scroll => 0,
            Node::Rows => self.rows_offset as u64,
            Node::Row(i) => self.row_top(i).unwrap_or(0),
        }
    }

    fn offset_height(&self, element: &Node) -> u32 {
        match *element {
            Node::Scroll => self.client_height,
            Node::Rows => u32::try_from(self.content_height()).unwrap_or(u32::MAX),
            Node::Row(i) => self.row_height(i).unwrap_or(0),
        }
    }

    fn offset_parent(&self, element: &Node) -> Option<Node> {
        match *element {
            Node::Scroll => None,
            Node::Rows => Some(Node::Scroll),
            Node::Row(_) => Some(Node::Rows),
        }
    }

    fn scroll_top(&self, element: &Node) -> u64 {
        match *element {
            Node::Scroll => self.scroll_top,
            _ => 0,
        }
    }

    fn client_height(&self, element: &Node) -> u32 {
        match *element {
            Node::Scroll => self.client_height,
            other => self.offset_height(&other),
        }
    }
}
