/// Lets at most one event through per `interval_ms`.
///
/// The core scheduler does no debouncing of its own; hosts are expected to throttle scroll
/// handlers. This is the time-based gate used by [`crate::Controller`]; time is whatever
/// monotonic millisecond clock the adapter already has.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollThrottle {
    pub interval_ms: u64,
    last_ms: Option<u64>,
}

impl ScrollThrottle {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// Returns `true` (and starts a new interval) if the previous pass is at least
    /// `interval_ms` old.
    pub fn try_pass(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_ms {
            if now_ms.saturating_sub(last) < self.interval_ms {
                return false;
            }
        }
        self.last_ms = Some(now_ms);
        true
    }

    pub fn last_pass_ms(&self) -> Option<u64> {
        self.last_ms
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
