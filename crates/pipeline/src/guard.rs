use std::collections::HashSet;
use std::sync::Mutex;

/// Per-conversation single-flight guard for drift evaluation.
///
/// A seek or reload can re-fire the metadata-loaded event before a previous
/// correction has been persisted; holding a permit for the conversation id
/// serializes those evaluations within one pipeline instance. Independent
/// instances (separate tabs) share no state and need no cross-instance
/// locking.
#[derive(Default)]
pub struct DriftGuard {
    in_flight: Mutex<HashSet<String>>,
}

impl DriftGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a permit, or `None` when an evaluation for this conversation
    /// is already in flight.
    pub fn try_begin(&self, conversation_id: &str) -> Option<DriftPermit<'_>> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !in_flight.insert(conversation_id.to_string()) {
            return None;
        }
        Some(DriftPermit {
            guard: self,
            conversation_id: conversation_id.to_string(),
        })
    }

    fn end(&self, conversation_id: &str) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        in_flight.remove(conversation_id);
    }
}

pub struct DriftPermit<'a> {
    guard: &'a DriftGuard,
    conversation_id: String,
}

impl Drop for DriftPermit<'_> {
    fn drop(&mut self) {
        self.guard.end(&self.conversation_id);
    }
}
