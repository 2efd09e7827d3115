//! Latest-wins guard for overlapping preview requests.
//!
//! Every outgoing request is tagged with a ticket; only the response to the
//! most recently issued ticket may touch the view-model.

/// Sequence number attached to one outgoing sync request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SyncTicket(u64);

impl SyncTicket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct SyncTracker {
    issued: u64,
}

impl SyncTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket; any earlier ticket becomes stale.
    pub fn issue(&mut self) -> SyncTicket {
        self.issued += 1;
        SyncTicket(self.issued)
    }

    /// Invalidate every in-flight request without issuing a new one.
    pub fn invalidate(&mut self) {
        self.issued += 1;
    }

    pub fn is_current(&self, ticket: SyncTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Highest sequence number handed out so far.
    pub fn latest(&self) -> u64 {
        self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let mut tracker = SyncTracker::new();
        let first = tracker.issue();
        let second = tracker.issue();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert!(first < second);
    }

    #[test]
    fn test_invalidate_stales_outstanding_ticket() {
        let mut tracker = SyncTracker::new();
        let ticket = tracker.issue();
        tracker.invalidate();
        assert!(!tracker.is_current(ticket));
        assert_eq!(tracker.latest(), 2);
    }
}
