/// Quiet period before a query change propagates, in milliseconds.
pub const QUIET_PERIOD_MS: u64 = 500;

/// Trailing-edge debounce driven by an external millisecond clock.
///
/// Each `push` replaces the pending value and restarts the quiet period;
/// `poll` releases the value once the period has elapsed with no further
/// pushes. A cancelled value never fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceGate<T> {
    quiet_ms: u64,
    pending: Option<(T, u64)>,
}

impl<T> Default for DebounceGate<T> {
    fn default() -> Self {
        Self::new(QUIET_PERIOD_MS)
    }
}

impl<T> DebounceGate<T> {
    pub fn new(quiet_ms: u64) -> Self {
        Self {
            quiet_ms,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T, now_ms: u64) {
        self.pending = Some((value, now_ms.saturating_add(self.quiet_ms)));
    }

    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now_ms => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }
}
