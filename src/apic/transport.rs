use crate::config::Settings;
use crate::error::Result;
use reqwest::header::COOKIE;
use serde_json::Value;

/// Status and decoded body of a controller response
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

impl Reply {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// The controller answers accepted requests with 200; anything else,
    /// including other 2xx codes, is a rejection
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Capability to POST JSON to the controller
///
/// The stages only talk to the controller through this trait so they can be
/// driven without a network.
pub trait ControllerTransport {
    /// POST `body` to `url`, sending `cookie` as the `Cookie` header when set
    fn post_json(&self, url: &str, body: &Value, cookie: Option<&str>) -> Result<Reply>;
}

/// Blocking HTTPS transport
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(settings: &Settings) -> Result<Self> {
        if !settings.verify_tls {
            log::warn!("TLS certificate verification is disabled");
        }

        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("apic-standby/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.timeout())
            .danger_accept_invalid_certs(!settings.verify_tls)
            .build()?;

        Ok(Self { client })
    }
}

impl ControllerTransport for HttpTransport {
    fn post_json(&self, url: &str, body: &Value, cookie: Option<&str>) -> Result<Reply> {
        log::debug!("POST {}", url);

        let mut request = self.client.post(url).json(body);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let text = response.text()?;
        log::debug!("{} -> HTTP {} ({} bytes)", url, status, text.len());

        Ok(Reply::new(status, decode_body(text)))
    }
}

/// Controllers sometimes answer errors with plain text; keep it as a string
fn decode_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}
