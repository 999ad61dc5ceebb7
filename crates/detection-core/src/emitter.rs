//! Ordered collection of accepted events.

use gazecue_model::event::GazeEvent;

#[derive(Debug, Clone, Default)]
pub struct EventEmitter {
    events: Vec<GazeEvent>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an accepted event. Events arrive in frame order.
    pub fn emit(&mut self, event: GazeEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GazeEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Hand over the finalized sequence.
    pub fn finish(self) -> Vec<GazeEvent> {
        self.events
    }
}
