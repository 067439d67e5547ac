// ── Inbound command model ──

use crate::device::Slot;

/// What the hub asked a slot to do.
///
/// Mirrors the hub's remote-control semantics: best-effort, not a
/// validated protocol. Pairings that make no sense for a slot (a level on
/// a switch, anything on the battery sensor) are dropped silently by the
/// dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TurnOn,
    TurnOff,
    SetLevel(i64),
}

/// A command envelope routed through the controller's command channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub slot: Slot,
    pub action: Action,
}

impl Command {
    pub fn new(slot: Slot, action: Action) -> Self {
        Self { slot, action }
    }
}
