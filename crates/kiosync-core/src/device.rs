// ── Logical device slots and snapshot mapping ──
//
// A tablet maps onto seven logical hub devices identified by stable small
// integer ids. The hub provisions (or doesn't) each slot; the engine only
// pushes updates into slots that currently exist.

use kiosync_api::DeviceInfo;

/// The seven logical hub devices backed by one tablet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Slot {
    /// Binary switch mirroring `screenOn`.
    Screen = 1,
    /// Binary switch mirroring `screensaverEnabled`.
    Screensaver = 2,
    /// 0-100 level mirroring `batteryLevel`.
    Battery = 3,
    /// Binary switch mirroring `isPlugged`.
    Charging = 4,
    /// Binary switch mirroring `motionDetectorStarted`.
    MotionSensor = 5,
    /// Push trigger: reload the configured start URL. Never updated by sync.
    LoadStartUrl = 6,
    /// Dimmer mirroring `screenBrightness`.
    Brightness = 7,
}

impl Slot {
    /// All slots, in id order.
    pub const ALL: [Slot; 7] = [
        Slot::Screen,
        Slot::Screensaver,
        Slot::Battery,
        Slot::Charging,
        Slot::MotionSensor,
        Slot::LoadStartUrl,
        Slot::Brightness,
    ];

    /// Stable hub unit id.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Resolve a hub unit id back to a slot.
    pub fn from_id(id: u8) -> Option<Slot> {
        Slot::ALL.into_iter().find(|slot| slot.id() == id)
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Slot::Screen => "screen",
            Slot::Screensaver => "screensaver",
            Slot::Battery => "battery",
            Slot::Charging => "charging",
            Slot::MotionSensor => "motion-sensor",
            Slot::LoadStartUrl => "load-start-url",
            Slot::Brightness => "brightness",
        };
        f.write_str(name)
    }
}

/// Idempotent state pushed to the hub for one slot: a numeric flag plus a
/// display string (hub `nValue`/`sValue` semantics).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateUpdate {
    pub flag: i32,
    pub display: String,
}

impl StateUpdate {
    /// Binary switch state.
    pub fn switch(on: bool) -> Self {
        Self {
            flag: i32::from(on),
            display: if on { "On" } else { "Off" }.into(),
        }
    }

    /// Plain 0-100 level (battery). Flag and display both carry the value.
    pub fn level(value: i64) -> Self {
        let value = value.clamp(0, 100);
        Self {
            flag: value as i32,
            display: value.to_string(),
        }
    }

    /// Dimmer level: on/off flag derived from `value > 0`, display carries
    /// the clamped level.
    pub fn dimmer(value: i64) -> Self {
        let value = value.clamp(0, 100);
        Self {
            flag: i32::from(value > 0),
            display: value.to_string(),
        }
    }
}

/// Snapshot field → slot mapping, iterated once per poll.
pub(crate) const SNAPSHOT_MAP: [(Slot, fn(&DeviceInfo) -> StateUpdate); 6] = [
    (Slot::Screen, |info| StateUpdate::switch(info.screen_on)),
    (Slot::Screensaver, |info| {
        StateUpdate::switch(info.screensaver_enabled)
    }),
    (Slot::Battery, |info| StateUpdate::level(info.battery_level)),
    (Slot::Charging, |info| StateUpdate::switch(info.is_plugged)),
    (Slot::MotionSensor, |info| {
        StateUpdate::switch(info.motion_detector_started)
    }),
    (Slot::Brightness, |info| {
        StateUpdate::dimmer(info.screen_brightness)
    }),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_updates() {
        assert_eq!(
            StateUpdate::switch(true),
            StateUpdate {
                flag: 1,
                display: "On".into()
            }
        );
        assert_eq!(
            StateUpdate::switch(false),
            StateUpdate {
                flag: 0,
                display: "Off".into()
            }
        );
    }

    #[test]
    fn level_clamps_below_and_above() {
        assert_eq!(StateUpdate::level(-5).display, "0");
        assert_eq!(StateUpdate::level(-5).flag, 0);
        assert_eq!(StateUpdate::level(150).display, "100");
        assert_eq!(StateUpdate::level(150).flag, 100);
        assert_eq!(StateUpdate::level(87).display, "87");
    }

    #[test]
    fn dimmer_flag_derived_from_level() {
        let off = StateUpdate::dimmer(0);
        assert_eq!(off.flag, 0);
        assert_eq!(off.display, "0");

        let dim = StateUpdate::dimmer(42);
        assert_eq!(dim.flag, 1);
        assert_eq!(dim.display, "42");

        let over = StateUpdate::dimmer(150);
        assert_eq!(over.flag, 1);
        assert_eq!(over.display, "100");
    }

    #[test]
    fn slot_ids_round_trip() {
        for slot in Slot::ALL {
            assert_eq!(Slot::from_id(slot.id()), Some(slot));
        }
        assert_eq!(Slot::from_id(0), None);
        assert_eq!(Slot::from_id(8), None);
    }

    #[test]
    fn load_start_url_has_no_snapshot_mapping() {
        assert!(
            SNAPSHOT_MAP
                .iter()
                .all(|(slot, _)| *slot != Slot::LoadStartUrl)
        );
    }
}
