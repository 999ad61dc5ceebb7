//! Minimum-spacing gate for ready signals.

/// Debounce state: when the last event was accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebounceState {
    pub last_event_secs: f64,
}

/// Outcome of offering a ready signal to the gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateDecision {
    Accepted,
    /// Dropped; `since_last_secs` is the gap to the last accepted event.
    Rejected { since_last_secs: f64 },
}

impl DebounceState {
    /// Initial state. Starting at `-debounce_secs` guarantees the first
    /// ready signal at any `t >= 0` is accepted.
    pub fn initial(debounce_secs: f64) -> Self {
        Self {
            last_event_secs: -debounce_secs,
        }
    }

    pub fn transition(self, timestamp_secs: f64, debounce_secs: f64) -> (DebounceState, GateDecision) {
        let since_last_secs = timestamp_secs - self.last_event_secs;
        if since_last_secs >= debounce_secs {
            (
                DebounceState {
                    last_event_secs: timestamp_secs,
                },
                GateDecision::Accepted,
            )
        } else {
            (self, GateDecision::Rejected { since_last_secs })
        }
    }
}

/// Stateful wrapper around [`DebounceState`].
#[derive(Debug, Clone)]
pub struct DebounceGate {
    state: DebounceState,
    debounce_secs: f64,
}

impl DebounceGate {
    pub fn new(debounce_secs: f64) -> Self {
        Self {
            state: DebounceState::initial(debounce_secs),
            debounce_secs,
        }
    }

    /// Offer a ready signal at `timestamp_secs`. Rejected signals are
    /// dropped, not queued.
    pub fn offer(&mut self, timestamp_secs: f64) -> GateDecision {
        let (next, decision) = self.state.transition(timestamp_secs, self.debounce_secs);
        self.state = next;
        decision
    }

    pub fn last_event_secs(&self) -> f64 {
        self.state.last_event_secs
    }

    pub fn debounce_secs(&self) -> f64 {
        self.debounce_secs
    }
}
