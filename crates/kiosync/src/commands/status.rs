//! `kiosync status` -- one refresh, then print the snapshot.

use kiosync_core::{Controller, LinkState, TabletConfig};

use crate::error::CliError;

pub async fn handle(controller: Controller, tablet: &TabletConfig) -> Result<(), CliError> {
    let snapshot = controller.fetch_snapshot().await?;

    let link = match &*controller.link_state().borrow() {
        LinkState::Connected => "connected".to_string(),
        LinkState::Degraded { reason } => format!("degraded ({reason})"),
        LinkState::Unknown => "unknown".to_string(),
    };

    let mut lines = vec![
        format!("Tablet:      {}:{}", tablet.host, tablet.port),
        format!("Link:        {link}"),
    ];

    match snapshot {
        Some(info) => {
            lines.push(format!("Screen:      {}", on_off(info.screen_on)));
            lines.push(format!("Screensaver: {}", on_off(info.screensaver_enabled)));
            lines.push(format!("Battery:     {}%", info.battery_level.clamp(0, 100)));
            lines.push(format!("Charging:    {}", on_off(info.is_plugged)));
            lines.push(format!(
                "Motion:      {}",
                on_off(info.motion_detector_started)
            ));
            lines.push(format!(
                "Brightness:  {}",
                info.screen_brightness.clamp(0, 100)
            ));
            lines.push(format!(
                "Start URL:   {}",
                info.start_url.as_deref().unwrap_or("-")
            ));
        }
        None => lines.push("Snapshot:    tablet answered but sent no usable data".to_string()),
    }

    println!("{}", lines.join("\n"));
    Ok(())
}

fn on_off(value: bool) -> &'static str {
    if value { "On" } else { "Off" }
}
