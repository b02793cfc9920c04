use crate::RowMetrics;

/// Read-only access to the host's layout tree.
///
/// In a browser this is a thin layer over the DOM (`querySelector`, `offsetTop`,
/// `offsetParent`, ...); headless hosts can implement it over their own layout state. The
/// scheduler never mutates anything through this trait.
///
/// Rows may be recycled or unmounted between two reads, so `resolve_row_element` is allowed to
/// return `None` at any time. Missing elements read as zero metrics.
pub trait RowMetricsProvider {
    type Element: Clone + PartialEq;

    /// Resolves a selector string to an element.
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;

    /// Finds the row element with the given index under `parent` (the `data-row-index` lookup).
    fn resolve_row_element(&self, parent: &Self::Element, index: usize) -> Option<Self::Element>;

    /// Offset of `element` from the top of its offset parent.
    fn offset_top(&self, element: &Self::Element) -> u64;

    fn offset_height(&self, element: &Self::Element) -> u32;

    fn offset_parent(&self, element: &Self::Element) -> Option<Self::Element>;

    fn scroll_top(&self, element: &Self::Element) -> u64;

    fn client_height(&self, element: &Self::Element) -> u32;

    /// Reads the geometry of the row at `index`, or zeros when it is not mounted.
    fn row_metrics(&self, parent: &Self::Element, index: usize) -> RowMetrics {
        match self.resolve_row_element(parent, index) {
            Some(element) => RowMetrics {
                top: self.offset_top(&element),
                height: self.offset_height(&element),
            },
            None => RowMetrics::default(),
        }
    }
}
