//! Domain events emitted after an operation fully commits.

use harvest_types::ParticipantId;

/// Ledger-level events that observers can subscribe to via the [`EventBus`].
///
/// Events fire only on success — a failed operation emits nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerEvent {
    /// Principal was staked.
    Deposited {
        participant: ParticipantId,
        amount: u128,
    },
    /// Principal was unstaked and returned.
    Withdrawn {
        participant: ParticipantId,
        amount: u128,
    },
    /// Accrued reward was paid out and reset to zero.
    RewardClaimed {
        participant: ParticipantId,
        reward: u128,
    },
}

/// Synchronous fan-out event bus for ledger events.
///
/// Listeners are invoked inline on the emitting thread; keep handlers fast
/// to avoid stalling ledger operations.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&LedgerEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &LedgerEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn alice() -> ParticipantId {
        ParticipantId::new("alice")
    }

    #[test]
    fn emit_calls_all_listeners() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let c1 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        }));

        let c2 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c2.fetch_add(10, Ordering::SeqCst);
        }));

        bus.emit(&LedgerEvent::Deposited {
            participant: alice(),
            amount: 500,
        });

        assert_eq!(counter.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn emit_with_no_listeners_is_noop() {
        let bus = EventBus::new();
        bus.emit(&LedgerEvent::Withdrawn {
            participant: alice(),
            amount: 1,
        }); // should not panic
    }

    #[test]
    fn listener_receives_correct_event_variant() {
        let saw_deposit = Arc::new(AtomicUsize::new(0));
        let saw_claim = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let sd = Arc::clone(&saw_deposit);
        let sc = Arc::clone(&saw_claim);
        bus.subscribe(Box::new(move |event| match event {
            LedgerEvent::Deposited { .. } => {
                sd.fetch_add(1, Ordering::SeqCst);
            }
            LedgerEvent::RewardClaimed { .. } => {
                sc.fetch_add(1, Ordering::SeqCst);
            }
            _ => {}
        }));

        bus.emit(&LedgerEvent::Deposited {
            participant: alice(),
            amount: 9,
        });
        bus.emit(&LedgerEvent::RewardClaimed {
            participant: alice(),
            reward: 3,
        });

        assert_eq!(saw_deposit.load(Ordering::SeqCst), 1);
        assert_eq!(saw_claim.load(Ordering::SeqCst), 1);
    }
}
