// Tablet control API HTTP client
//
// Wraps `reqwest::Client` with the tablet's single-endpoint GET protocol:
// every operation is `GET /?cmd={cmd}&password={password}[&username=..]`
// plus command-specific extra parameters. Responses are JSON on modern
// firmware but may be bare HTML/text on older builds -- the client treats
// an undecodable 200 body as "no data" rather than a failure.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::DeviceInfo;

/// Default per-request timeout. Callers sit on a shared scheduler thread,
/// so a hung tablet must never block a poll cycle for longer than this.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Raw HTTP client for the tablet's control endpoint.
///
/// Cheaply cloneable -- the inner `reqwest::Client` is an `Arc` around a
/// connection pool, so concurrent command and poll paths can share one
/// instance.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoint: Url,
    username: Option<String>,
    password: SecretString,
}

impl Client {
    /// Create a client for `http://{host}:{port}/`.
    ///
    /// An empty username is normalized to "no username" and left off the
    /// query string entirely; an empty password is still sent (the tablet
    /// accepts `password=` when remote admin is unprotected).
    pub fn new(
        host: &str,
        port: u16,
        username: Option<String>,
        password: SecretString,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let endpoint = Url::parse(&format!("http://{host}:{port}/"))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(Error::Transport)?;

        Ok(Self {
            http,
            endpoint,
            username: username.filter(|u| !u.is_empty()),
            password,
        })
    }

    /// The tablet endpoint this client talks to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    // ── Generic command call ─────────────────────────────────────────

    /// Issue a control command and decode the response body as JSON.
    ///
    /// Returns `Ok(None)` when the tablet answered HTTP 200 with a body
    /// that is not JSON -- older firmware replies to mutating commands
    /// with plain text, which is not a transport failure.
    pub async fn call(&self, cmd: &str, extra: &[(&str, &str)]) -> Result<Option<Value>, Error> {
        let mut request = self.http.get(self.endpoint.clone()).query(&[
            ("cmd", cmd),
            ("password", self.password.expose_secret()),
        ]);

        if let Some(ref username) = self.username {
            request = request.query(&[("username", username.as_str())]);
        }
        if !extra.is_empty() {
            request = request.query(extra);
        }

        debug!(%cmd, "GET {}", self.endpoint);

        let response = request.send().await.map_err(Error::Transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(Error::Transport)?;
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => {
                trace!(%cmd, "response: {value}");
                Ok(Some(value))
            }
            Err(_) => {
                debug!(%cmd, "non-JSON response body ({} bytes)", body.len());
                Ok(None)
            }
        }
    }

    // ── Typed endpoints ──────────────────────────────────────────────

    /// Fetch the full device-info snapshot (`cmd=getDeviceInfo&type=json`).
    ///
    /// Returns `Ok(None)` when the body is not JSON or not an object --
    /// callers treat both the same way: skip this poll, no device updates.
    pub async fn device_info(&self) -> Result<Option<DeviceInfo>, Error> {
        let Some(value) = self.call("getDeviceInfo", &[("type", "json")]).await? else {
            return Ok(None);
        };

        match serde_json::from_value(value) {
            Ok(info) => Ok(Some(info)),
            Err(err) => {
                debug!("device info has unexpected shape: {err}");
                Ok(None)
            }
        }
    }

    /// Turn the screen on.
    pub async fn screen_on(&self) -> Result<(), Error> {
        self.call("screenOn", &[]).await.map(drop)
    }

    /// Turn the screen off.
    pub async fn screen_off(&self) -> Result<(), Error> {
        self.call("screenOff", &[]).await.map(drop)
    }

    /// Write a configuration key (`cmd=setConfig&key=..&value=..`).
    pub async fn set_config(&self, key: &str, value: &str) -> Result<(), Error> {
        self.call("setConfig", &[("key", key), ("value", value)])
            .await
            .map(drop)
    }

    /// Navigate the tablet browser to a URL.
    pub async fn load_url(&self, url: &str) -> Result<(), Error> {
        self.call("loadUrl", &[("url", url)]).await.map(drop)
    }

    /// Set the screen brightness (0-100, sent as a string value).
    pub async fn set_screen_brightness(&self, level: i64) -> Result<(), Error> {
        self.call("setScreenBrightness", &[("value", &level.to_string())])
            .await
            .map(drop)
    }
}
