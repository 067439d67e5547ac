//! Polling engine between `kiosync-api` and a home-automation hub.
//!
//! This crate owns the synchronization logic for one tablet:
//!
//! - **[`Controller`]** — Central facade. Owns the API client, the link
//!   monitor, and the poll gate; [`run()`](Controller::run) spawns the
//!   background tick and command-processor tasks, while one-shot callers
//!   use [`execute()`](Controller::execute) and
//!   [`fetch_snapshot()`](Controller::fetch_snapshot) directly.
//!
//! - **[`PollGate`]** — Converts the fixed 10 s scheduler tick into the
//!   configured refresh cadence and guards against overlapping refresh
//!   cycles. The permit it vends releases the in-flight flag on `Drop`,
//!   so the guard is released on every exit path.
//!
//! - **[`LinkMonitor`]** — Tri-state connection health (`Unknown` /
//!   `Connected` / `Degraded`). Emits a log event only on transitions, so
//!   a sustained outage produces exactly one error line. Observable via a
//!   `watch` channel.
//!
//! - **[`DeviceRegistry`]** — Injected hub capability. The engine pushes
//!   idempotent [`StateUpdate`]s into whatever registry the embedder
//!   provides; [`MemoryRegistry`] ships for standalone runs and tests.
//!
//! - **[`Slot`]** — The seven logical hub devices a tablet maps to, with
//!   the table-driven snapshot-field transforms.
//!
//! The engine never reads config files -- the binary resolves a
//! [`TabletConfig`] and hands it in.

pub mod command;
pub mod config;
pub mod controller;
pub mod device;
pub mod error;
pub mod link;
pub mod poll;
pub mod registry;

pub use command::{Action, Command};
// Re-exported for consumers that inspect snapshots (e.g. the CLI's
// `status` output) without depending on the api crate directly.
pub use kiosync_api::{DeviceInfo, FailureKind};
pub use config::TabletConfig;
pub use controller::Controller;
pub use device::{Slot, StateUpdate};
pub use error::CoreError;
pub use link::{LinkMonitor, LinkState};
pub use poll::{PollGate, PollPermit};
pub use registry::{DeviceRegistry, MemoryRegistry};
