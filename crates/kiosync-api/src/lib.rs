//! Async client for the HTTP control API exposed by kiosk-browser tablets.
//!
//! The tablet serves a single endpoint (`http://{host}:{port}/`) where every
//! operation is a GET request selected by a `cmd` query parameter and
//! authenticated with a `password` (and optional `username`) parameter.
//!
//! This crate covers transport mechanics only: URL and query construction,
//! timeouts, response decoding, and failure classification. It deliberately
//! carries no polling or device-mapping logic -- that lives in
//! `kiosync-core`, which also owns connection-health bookkeeping.

mod client;
mod error;
mod models;

pub use client::{Client, DEFAULT_TIMEOUT};
pub use error::{Error, FailureKind};
pub use models::DeviceInfo;
