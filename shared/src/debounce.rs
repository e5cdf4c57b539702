/// Quiet period before a burst of city keystrokes triggers a backdrop fetch.
pub const DEBOUNCE_MS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Collapses a burst of events into the last one.
///
/// The host schedules a timer for every ticket handed out by [`trigger`](Self::trigger)
/// and calls [`settle`](Self::settle) when it fires; only the newest ticket
/// settles, so at most one action runs per quiet period.
#[derive(Debug, Clone)]
pub struct Debouncer {
    wait_ms: u32,
    latest: u64,
}

impl Debouncer {
    pub fn new(wait_ms: u32) -> Self {
        Self { wait_ms, latest: 0 }
    }

    pub fn wait_ms(&self) -> u32 {
        self.wait_ms
    }

    pub fn trigger(&mut self) -> DebounceTicket {
        self.latest += 1;
        DebounceTicket(self.latest)
    }

    pub fn settle(&self, ticket: DebounceTicket) -> bool {
        ticket.0 == self.latest
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_MS)
    }
}
