use serde::Deserialize;

/// Decoded `getDeviceInfo` response.
///
/// The tablet firmware omits fields freely depending on version and device
/// capabilities, so every field defaults: absent booleans read as `false`,
/// absent levels as `0`, an absent start URL as `None`. The snapshot is
/// consumed once per poll and never retained.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceInfo {
    pub screen_on: bool,
    pub screensaver_enabled: bool,
    pub battery_level: i64,
    pub is_plugged: bool,
    pub motion_detector_started: bool,
    pub screen_brightness: i64,
    pub start_url: Option<String>,
}
