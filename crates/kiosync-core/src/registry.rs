// ── Hub device registry capability ──
//
// The hub owns device provisioning; the engine only needs two operations
// from it. Injecting them as a trait keeps the core testable without a
// real hub behind it.

use dashmap::DashMap;

use crate::device::{Slot, StateUpdate};

/// The hub's device registry, as seen by the engine.
///
/// Both operations are idempotent and fire-and-forget. A slot the hub
/// never provisioned simply reports `contains == false` and the engine
/// skips it silently.
pub trait DeviceRegistry: Send + Sync {
    /// Whether the hub currently has a device for this slot.
    fn contains(&self, slot: Slot) -> bool;

    /// Push the latest state for a slot. No-op for unknown slots.
    fn update(&self, slot: Slot, update: StateUpdate);
}

/// In-process registry used by standalone runs and tests.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    slots: DashMap<Slot, Option<StateUpdate>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with all seven slots provisioned.
    pub fn with_all_slots() -> Self {
        let registry = Self::new();
        for slot in Slot::ALL {
            registry.register(slot);
        }
        registry
    }

    /// Provision a slot with no state yet.
    pub fn register(&self, slot: Slot) {
        self.slots.entry(slot).or_insert(None);
    }

    /// Latest pushed state for a slot, if any.
    pub fn get(&self, slot: Slot) -> Option<StateUpdate> {
        self.slots.get(&slot).and_then(|entry| entry.value().clone())
    }
}

impl DeviceRegistry for MemoryRegistry {
    fn contains(&self, slot: Slot) -> bool {
        self.slots.contains_key(&slot)
    }

    fn update(&self, slot: Slot, update: StateUpdate) {
        if let Some(mut entry) = self.slots.get_mut(&slot) {
            *entry = Some(update);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_ignores_unregistered_slot() {
        let registry = MemoryRegistry::new();
        registry.update(Slot::Screen, StateUpdate::switch(true));

        assert!(!registry.contains(Slot::Screen));
        assert!(registry.get(Slot::Screen).is_none());
    }

    #[test]
    fn update_overwrites_registered_slot() {
        let registry = MemoryRegistry::new();
        registry.register(Slot::Battery);

        registry.update(Slot::Battery, StateUpdate::level(50));
        registry.update(Slot::Battery, StateUpdate::level(49));

        assert_eq!(registry.get(Slot::Battery), Some(StateUpdate::level(49)));
    }
}
