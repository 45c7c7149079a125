//! CIMC credential validation

use super::endpoint::Endpoint;
use super::session::Session;
use super::transport::ControllerTransport;
use crate::config::CimcAccess;
use crate::error::{Error, Result};
use serde_json::{Value, json};

/// A node whose CIMC the controller could reach and log into
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedNode {
    pub serial_number: String,
    /// Full verification response, shown to the operator
    pub payload: Value,
}

/// Ask the controller to verify CIMC access and report the node's serial number
pub fn verify_cimc(
    transport: &dyn ControllerTransport,
    endpoint: &Endpoint,
    session: &Session,
    cimc: &CimcAccess,
) -> Result<VerifiedNode> {
    let body = json!({
        "address": cimc.address,
        "username": cimc.username,
        "password": cimc.password,
        "addressType": "cimc",
        "controllerType": "physical",
    });

    let reply = transport.post_json(&endpoint.verify_url(), &body, Some(&session.cookie()))?;
    if !reply.is_success() {
        return Err(Error::ValidationRejected {
            status: reply.status,
            payload: reply.body,
        });
    }

    let serial_number = reply
        .body
        .get("serialNumber")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::malformed("verify", "serialNumber missing or not a string"))?
        .to_string();

    Ok(VerifiedNode {
        serial_number,
        payload: reply.body,
    })
}
