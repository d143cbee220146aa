//! At-most-one-in-flight request slots
//!
//! Each form (classification, summary, ingestion) owns one slot. Starting a
//! request takes a [`Ticket`] carrying a fresh v7 UUID; the result is stored
//! only if that ticket is still the one in flight when it is committed.

use crate::PipelineError;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

struct SlotState<T> {
    in_flight: Option<Uuid>,
    latest: Option<T>,
}

/// Guarded holder for the in-flight request and the last committed result
pub struct RequestSlot<T> {
    name: &'static str,
    state: Mutex<SlotState<T>>,
}

impl<T: Clone> RequestSlot<T> {
    /// Create an empty slot; `name` appears in `Busy` errors and logs
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Mutex::new(SlotState {
                in_flight: None,
                latest: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState<T>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a request, failing with `Busy` if one is already running
    pub fn begin(&self) -> Result<Ticket<'_, T>, PipelineError> {
        let mut state = self.lock();
        if state.in_flight.is_some() {
            return Err(PipelineError::Busy(self.name));
        }
        let id = Uuid::now_v7();
        state.in_flight = Some(id);
        tracing::debug!(slot = self.name, request = %id, "Request started");
        Ok(Ticket {
            slot: self,
            id,
            settled: false,
        })
    }

    /// Invalidate the in-flight request, returning its id
    pub fn cancel(&self) -> Option<Uuid> {
        let cancelled = self.lock().in_flight.take();
        if let Some(id) = cancelled {
            tracing::info!(slot = self.name, request = %id, "Request cancelled");
        }
        cancelled
    }

    /// Whether a request is currently running
    pub fn is_busy(&self) -> bool {
        self.lock().in_flight.is_some()
    }

    /// Last committed result
    pub fn latest(&self) -> Option<T> {
        self.lock().latest.clone()
    }

    fn release(&self, id: Uuid) {
        let mut state = self.lock();
        if state.in_flight == Some(id) {
            state.in_flight = None;
        }
    }
}

/// Token for one running request.
///
/// Dropping a ticket without committing releases the slot.
pub struct Ticket<'a, T: Clone> {
    slot: &'a RequestSlot<T>,
    id: Uuid,
    settled: bool,
}

impl<T: Clone> Ticket<'_, T> {
    /// Request id
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Store `value` as the slot's latest result if this ticket is current
    pub fn commit(mut self, value: T) -> Result<T, PipelineError> {
        self.settled = true;
        let mut state = self.slot.lock();
        if state.in_flight != Some(self.id) {
            tracing::warn!(
                slot = self.slot.name,
                request = %self.id,
                "Discarding result of superseded request"
            );
            return Err(PipelineError::Stale(self.id));
        }
        state.in_flight = None;
        state.latest = Some(value.clone());
        Ok(value)
    }
}

impl<T: Clone> Drop for Ticket<'_, T> {
    fn drop(&mut self) {
        if !self.settled {
            self.slot.release(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_is_busy() {
        let slot: RequestSlot<u32> = RequestSlot::new("test");
        let _ticket = slot.begin().unwrap();
        assert!(slot.is_busy());
        assert!(matches!(slot.begin(), Err(PipelineError::Busy("test"))));
    }

    #[test]
    fn test_commit_stores_latest() {
        let slot = RequestSlot::new("test");
        let ticket = slot.begin().unwrap();
        assert_eq!(ticket.commit(7).unwrap(), 7);
        assert!(!slot.is_busy());
        assert_eq!(slot.latest(), Some(7));
    }

    #[test]
    fn test_cancelled_ticket_is_stale() {
        let slot = RequestSlot::new("test");
        let ticket = slot.begin().unwrap();
        let id = ticket.id();
        assert_eq!(slot.cancel(), Some(id));
        assert!(matches!(ticket.commit(1), Err(PipelineError::Stale(s)) if s == id));
        assert_eq!(slot.latest(), None);
    }

    #[test]
    fn test_newer_request_wins() {
        let slot = RequestSlot::new("test");
        let old = slot.begin().unwrap();
        slot.cancel();
        let new = slot.begin().unwrap();
        assert!(old.commit(1).is_err());
        // the stale commit must not release the newer request
        assert!(slot.is_busy());
        new.commit(2).unwrap();
        assert_eq!(slot.latest(), Some(2));
    }

    #[test]
    fn test_drop_releases_slot() {
        let slot: RequestSlot<u32> = RequestSlot::new("test");
        {
            let _ticket = slot.begin().unwrap();
        }
        assert!(!slot.is_busy());
        assert!(slot.begin().is_ok());
    }
}
