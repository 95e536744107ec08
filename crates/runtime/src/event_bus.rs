/// Minimal event type for traceability.
///
/// Structured text keyed by a static `kind`; the sequence number orders events
/// across a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub seq: u64,
    pub kind: &'static str,
    pub message: String,
}

/// Ordered event log. Unbounded by default; a bus built with
/// [`EventBus::with_limit`] keeps only the newest `limit` events.
#[derive(Debug, Default)]
pub struct EventBus {
    next_seq: u64,
    events: Vec<Event>,
    limit: Option<usize>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn emit(&mut self, kind: &'static str, message: impl Into<String>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Event {
            seq,
            kind,
            message: message.into(),
        });
        if let Some(limit) = self.limit {
            if self.events.len() > limit {
                let excess = self.events.len() - limit;
                self.events.drain(..excess);
            }
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }

    pub fn count_kind(&self, kind: &str) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;

    #[test]
    fn records_events_in_order() {
        let mut bus = EventBus::new();
        bus.emit("step", "address-entry");
        bus.emit("step", "address-selection");
        assert_eq!(bus.events().len(), 2);
        assert_eq!(bus.events()[1].seq, 1);
        assert_eq!(bus.count_kind("step"), 2);
    }

    #[test]
    fn drain_clears_events_but_keeps_sequence() {
        let mut bus = EventBus::new();
        bus.emit("k", "m");
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.events().is_empty());
        bus.emit("k", "n");
        assert_eq!(bus.last().map(|e| e.seq), Some(1));
    }

    #[test]
    fn limited_bus_keeps_newest_events() {
        let mut bus = EventBus::with_limit(3);
        for i in 0..10 {
            bus.emit("k", i.to_string());
        }
        let seqs: Vec<u64> = bus.events().iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![7, 8, 9]);
        assert_eq!(bus.last().map(|e| e.message.as_str()), Some("9"));
    }

    #[test]
    fn zero_limit_records_nothing() {
        let mut bus = EventBus::with_limit(0);
        bus.emit("k", "m");
        assert!(bus.events().is_empty());
        bus.emit("k", "n");
        assert!(bus.last().is_none());
    }
}
