// ── Controller ──
//
// Full lifecycle management for one tablet: owns the API client, the
// injected hub registry, the link monitor, and the poll gate. `run()`
// spawns the background tick and command-processor tasks; the CLI's
// one-shot subcommands call `execute()` / `fetch_snapshot()` directly.
//
// Failure policy: everything is absorbed at the call site that detects
// it. Transport failures update the link monitor (which rate-limits its
// own logging), malformed bodies count as "no data", and neither path can
// kill the poll loop.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use kiosync_api::{Client, DeviceInfo};

use crate::command::{Action, Command};
use crate::config::TabletConfig;
use crate::device::{SNAPSHOT_MAP, Slot, StateUpdate};
use crate::error::CoreError;
use crate::link::{LinkMonitor, LinkState};
use crate::poll::PollGate;
use crate::registry::DeviceRegistry;

/// Fixed scheduler tick. The configured refresh interval is enforced on
/// top of this by the poll gate.
pub const TICK_PERIOD: Duration = Duration::from_secs(10);

const COMMAND_CHANNEL_SIZE: usize = 16;

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ControllerInner>` so the background tasks
/// and the embedder can share one instance.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    api: Client,
    registry: Arc<dyn DeviceRegistry>,
    /// Single-writer health tracker. The tokio mutex serializes updates
    /// from the refresh and command paths; last-write-wins is fine, it
    /// only affects log emission.
    link: Mutex<LinkMonitor>,
    link_rx: watch::Receiver<LinkState>,
    /// Never held across an await.
    gate: StdMutex<PollGate>,
    command_tx: mpsc::Sender<Command>,
    command_rx: StdMutex<Option<mpsc::Receiver<Command>>>,
}

impl Controller {
    /// Build a controller from a resolved config and an injected registry.
    ///
    /// Does not talk to the tablet; the first transport call happens on
    /// the first poll tick or command.
    pub fn new(
        config: &TabletConfig,
        registry: Arc<dyn DeviceRegistry>,
    ) -> Result<Self, CoreError> {
        let api = Client::new(
            &config.host,
            config.port,
            config.username.clone(),
            config.password.clone(),
            config.timeout,
        )?;

        let link = LinkMonitor::new();
        let link_rx = link.subscribe();
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);

        Ok(Self {
            inner: Arc::new(ControllerInner {
                api,
                registry,
                link: Mutex::new(link),
                link_rx,
                gate: StdMutex::new(PollGate::new(config.refresh_interval)),
                command_tx,
                command_rx: StdMutex::new(Some(command_rx)),
            }),
        })
    }

    /// Spawn the background tasks: the 10 s poll tick and the command
    /// processor. Both stop when `cancel` fires.
    pub fn run(&self, cancel: &CancellationToken) -> Vec<JoinHandle<()>> {
        let mut handles = vec![tokio::spawn(poll_task(self.clone(), cancel.clone()))];

        let rx = self
            .inner
            .command_rx
            .lock()
            .expect("command receiver lock poisoned")
            .take();
        if let Some(rx) = rx {
            handles.push(tokio::spawn(command_processor_task(
                self.clone(),
                rx,
                cancel.clone(),
            )));
        }

        info!("tablet sync engine started");
        handles
    }

    /// Sender half of the inbound command channel.
    pub fn commands(&self) -> mpsc::Sender<Command> {
        self.inner.command_tx.clone()
    }

    /// Subscribe to link-state transitions.
    pub fn link_state(&self) -> watch::Receiver<LinkState> {
        self.inner.link_rx.clone()
    }

    // ── Refresh path ─────────────────────────────────────────────────

    /// Run one refresh cycle if the poll gate grants it for `now`.
    ///
    /// Returns whether a cycle actually ran. A tick that fires while a
    /// previous cycle is still in flight, or before the configured
    /// interval has elapsed, is a no-op.
    pub async fn refresh_if_due(&self, now: Instant) -> bool {
        let permit = self
            .inner
            .gate
            .lock()
            .expect("poll gate lock poisoned")
            .try_acquire(now);
        let Some(permit) = permit else {
            return false;
        };

        // Errors are already absorbed: health is recorded inside
        // fetch_snapshot and the monitor does the logging.
        let _ = self.fetch_snapshot().await;

        drop(permit);
        true
    }

    /// Fetch the device-info snapshot, record link health, and push the
    /// mapped updates into every registered slot.
    ///
    /// `Ok(None)` means the tablet answered but sent nothing usable --
    /// the poll cycle is skipped without touching any device.
    pub async fn fetch_snapshot(&self) -> Result<Option<DeviceInfo>, CoreError> {
        match self.record(self.inner.api.device_info().await).await? {
            Some(info) => {
                self.apply_snapshot(&info);
                Ok(Some(info))
            }
            None => {
                debug!("snapshot unusable, skipping device updates");
                Ok(None)
            }
        }
    }

    fn apply_snapshot(&self, info: &DeviceInfo) {
        for (slot, transform) in SNAPSHOT_MAP {
            if !self.inner.registry.contains(slot) {
                continue;
            }
            self.inner.registry.update(slot, transform(info));
        }
    }

    // ── Command path ─────────────────────────────────────────────────

    /// Best-effort dispatch: failures are logged and swallowed, matching
    /// the hub's fire-and-forget remote-control semantics. Used by the
    /// command processor task.
    pub async fn dispatch(&self, slot: Slot, action: Action) {
        if let Err(err) = self.execute(slot, action).await {
            debug!(%slot, "command failed: {err}");
        }
    }

    /// Translate one hub command into tablet API calls.
    ///
    /// Commands for slots the hub never provisioned, and pairings with no
    /// mapping (battery, charging, a level on a switch), are dropped
    /// silently -- no API call, no error.
    pub async fn execute(&self, slot: Slot, action: Action) -> Result<(), CoreError> {
        if !self.inner.registry.contains(slot) {
            debug!(%slot, "ignoring command for unprovisioned device");
            return Ok(());
        }

        match (slot, action) {
            (Slot::Screen, Action::TurnOn) => self.record(self.inner.api.screen_on().await).await,
            (Slot::Screen, _) => self.record(self.inner.api.screen_off().await).await,
            (Slot::Screensaver, action @ (Action::TurnOn | Action::TurnOff)) => {
                let value = bool_value(action == Action::TurnOn);
                self.record(self.inner.api.set_config("screensaver", value).await)
                    .await
            }
            (Slot::MotionSensor, action @ (Action::TurnOn | Action::TurnOff)) => {
                let value = bool_value(action == Action::TurnOn);
                self.record(
                    self.inner
                        .api
                        .set_config("motionDetectionEnabled", value)
                        .await,
                )
                .await
            }
            (Slot::LoadStartUrl, _) => self.reload_start_url().await,
            (Slot::Brightness, Action::SetLevel(level)) => self.set_brightness(level).await,
            _ => {
                debug!(%slot, ?action, "ignoring command with no mapping");
                Ok(())
            }
        }
    }

    /// Read the configured start URL off the tablet, then tell it to
    /// navigate there. Soft no-op when the read fails or no URL is set.
    async fn reload_start_url(&self) -> Result<(), CoreError> {
        let Ok(info) = self.record(self.inner.api.device_info().await).await else {
            return Ok(());
        };
        let url = info
            .and_then(|info| info.start_url)
            .filter(|url| !url.is_empty());
        let Some(url) = url else {
            debug!("no start URL configured, nothing to reload");
            return Ok(());
        };

        info!(%url, "reloading start URL");
        self.record(self.inner.api.load_url(&url).await).await
    }

    /// Set the screen brightness, then update the hub's dimmer slot
    /// optimistically instead of waiting for the next poll. Uses the same
    /// on/off derivation as the sync path.
    async fn set_brightness(&self, level: i64) -> Result<(), CoreError> {
        let level = level.clamp(0, 100);
        self.record(self.inner.api.set_screen_brightness(level).await)
            .await?;

        if self.inner.registry.contains(Slot::Brightness) {
            self.inner
                .registry
                .update(Slot::Brightness, StateUpdate::dimmer(level));
        }
        Ok(())
    }

    /// Record the outcome of a completed transport call in the link
    /// monitor. Health tracking stays centralized here: the API client
    /// itself never touches it.
    async fn record<T>(&self, result: Result<T, kiosync_api::Error>) -> Result<T, CoreError> {
        let mut link = self.inner.link.lock().await;
        match result {
            Ok(value) => {
                link.record_success();
                Ok(value)
            }
            Err(err) => {
                link.record_failure(err.failure_kind(), &err.to_string());
                Err(err.into())
            }
        }
    }

    // ── One-shot convenience ─────────────────────────────────────────

    /// Build a controller, run the closure, return its result. No
    /// background tasks -- for single CLI invocations.
    pub async fn oneshot<F, Fut, T>(
        config: &TabletConfig,
        registry: Arc<dyn DeviceRegistry>,
        f: F,
    ) -> Result<T, CoreError>
    where
        F: FnOnce(Controller) -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let controller = Controller::new(config, registry)?;
        f(controller).await
    }
}

fn bool_value(on: bool) -> &'static str {
    if on { "true" } else { "false" }
}

// ── Background tasks ─────────────────────────────────────────────────

/// Fixed-cadence tick driving the refresh path. The first tick fires
/// immediately, so the hub gets an initial sync right after startup.
async fn poll_task(controller: Controller, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(TICK_PERIOD);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                controller.refresh_if_due(Instant::now()).await;
            }
        }
    }

    debug!("poll task stopped");
}

/// Drains the inbound command channel. May run concurrently with an
/// in-progress refresh; only the refresh path is mutually exclusive with
/// itself.
async fn command_processor_task(
    controller: Controller,
    mut rx: mpsc::Receiver<Command>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            envelope = rx.recv() => match envelope {
                Some(command) => controller.dispatch(command.slot, command.action).await,
                None => break,
            }
        }
    }

    debug!("command processor stopped");
}
