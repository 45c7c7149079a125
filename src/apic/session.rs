//! Session establishment and the on-disk session artifact

use super::endpoint::Endpoint;
use super::transport::ControllerTransport;
use crate::config::Credentials;
use crate::error::{Error, Result, SessionFileError};
use crate::utils::json as json_util;
use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value, json};
use std::fmt;
use std::fs;
use std::path::Path;

/// Name of the cookie the controller expects the token in
pub const SESSION_COOKIE: &str = "APIC-cookie";

/// Tokens are valid for ten minutes after issue
pub const SESSION_LIFETIME_SECS: i64 = 600;

/// Session token plus the raw attribute set the controller returned
#[derive(Clone, PartialEq)]
pub struct Session {
    token: String,
    attributes: Map<String, Value>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"********")
            .field("created_at", &self.created_at())
            .finish()
    }
}

/// Exchange administrator credentials for a session token
pub fn login(
    transport: &dyn ControllerTransport,
    endpoint: &Endpoint,
    credentials: &Credentials,
) -> Result<Session> {
    let body = json!({
        "aaaUser": {
            "attributes": {
                "name": credentials.username,
                "pwd": credentials.password,
            }
        }
    });

    let reply = transport.post_json(&endpoint.login_url(), &body, None)?;
    if !reply.is_success() {
        return Err(Error::LoginRejected {
            status: reply.status,
            payload: reply.body,
        });
    }

    let attributes = reply
        .body
        .pointer("/imdata/0/aaaLogin/attributes")
        .and_then(Value::as_object)
        .cloned()
        .ok_or_else(|| Error::malformed("login", "imdata[0].aaaLogin.attributes not found"))?;

    Session::from_attributes(attributes)
        .ok_or_else(|| Error::malformed("login", "token attribute missing or empty"))
}

impl Session {
    /// Build a session from a login attribute object; `None` without a token
    pub fn from_attributes(attributes: Map<String, Value>) -> Option<Self> {
        let token = attributes
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())?
            .to_string();
        Some(Self { token, attributes })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Value for the `Cookie` request header
    pub fn cookie(&self) -> String {
        format!("{}={}", SESSION_COOKIE, self.token)
    }

    /// Issue time from the `creationTime` attribute (epoch seconds)
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let secs = match self.attributes.get("creationTime")? {
            Value::String(s) => s.trim().parse::<i64>().ok()?,
            Value::Number(n) => n.as_i64()?,
            _ => return None,
        };
        DateTime::from_timestamp(secs, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.created_at()
            .map(|created| created + Duration::seconds(SESSION_LIFETIME_SECS))
    }

    /// A session with no readable issue time is treated as expired
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            Some(expires) => now >= expires,
            None => true,
        }
    }

    /// Write the attributes as indented JSON, replacing any existing file
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let buf = json_util::to_pretty_vec(&self.attributes).map_err(|e| session_error(path, e.into()))?;
        fs::write(path, buf).map_err(|e| session_error(path, e.into()))?;
        log::debug!("Session attributes written to {}", path.display());
        Ok(())
    }

    /// Load a session previously written by [`Session::write_to`]
    pub fn read_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| session_error(path, e.into()))?;
        let attributes: Map<String, Value> =
            serde_json::from_str(&content).map_err(|e| session_error(path, e.into()))?;
        Self::from_attributes(attributes)
            .ok_or_else(|| session_error(path, SessionFileError::MissingToken))
    }
}

fn session_error(path: &Path, source: SessionFileError) -> Error {
    Error::Session {
        path: path.to_path_buf(),
        source,
    }
}
