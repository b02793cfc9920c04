use alloc::string::String;

/// Extra pixels of look-ahead/look-behind added around the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Buffer {
    /// A fixed margin in pixels.
    Fixed(u32),
    /// One client height of the scroll container, so the margin follows the display size.
    #[default]
    Viewport,
}

impl Buffer {
    pub fn resolve(self, client_height: u32) -> u32 {
        match self {
            Self::Fixed(px) => px,
            Self::Viewport => client_height,
        }
    }
}

/// Configuration for [`crate::RowScheduler`].
///
/// Changes take effect on the next `update_row_states` call; the last computed visible range
/// is kept as-is until then.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulerOptions {
    /// Selector of the container whose children are the addressable rows.
    pub parent_selector: Option<String>,
    /// Selector of the scrolling ancestor.
    pub scroll_selector: Option<String>,
    pub buffer: Buffer,
    /// Defers `execute` callbacks to the next [`crate::RowScheduler::run_frame`].
    ///
    /// When `false`, executes run inside `update_row_states`, right after the cleanups of the
    /// same tick. Useful for hosts without a "before next repaint" primitive.
    pub defer_execute: bool,
    /// Verifies that row offsets never decrease before every tick. This probes every row, so
    /// it is off by default; see [`crate::RowScheduler::validate_layout`].
    pub check_monotonic: bool,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            parent_selector: None,
            scroll_selector: None,
            buffer: Buffer::default(),
            defer_execute: true,
            check_monotonic: false,
        }
    }
}

impl SchedulerOptions {
    pub fn new(parent_selector: impl Into<String>, scroll_selector: impl Into<String>) -> Self {
        Self {
            parent_selector: Some(parent_selector.into()),
            scroll_selector: Some(scroll_selector.into()),
            ..Self::default()
        }
    }

    pub fn with_parent_selector(mut self, parent_selector: impl Into<String>) -> Self {
        self.parent_selector = Some(parent_selector.into());
        self
    }

    pub fn with_scroll_selector(mut self, scroll_selector: impl Into<String>) -> Self {
        self.scroll_selector = Some(scroll_selector.into());
        self
    }

    pub fn with_buffer(mut self, buffer: Buffer) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn with_buffer_px(mut self, px: u32) -> Self {
        self.buffer = Buffer::Fixed(px);
        self
    }

    pub fn with_defer_execute(mut self, defer_execute: bool) -> Self {
        self.defer_execute = defer_execute;
        self
    }

    pub fn with_check_monotonic(mut self, check_monotonic: bool) -> Self {
        self.check_monotonic = check_monotonic;
        self
    }
}
