//! Standby controller join request

use super::endpoint::Endpoint;
use super::session::Session;
use super::transport::ControllerTransport;
use crate::config::StandbyNode;
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;

/// Body of `POST /api/workflows/v1/controller/add`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddControllerRequest<'a> {
    admin_password: &'a str,
    force: bool,
    nodes: [NodeSpec<'a>; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeSpec<'a> {
    node_name: &'a str,
    controller_type: &'static str,
    node_id: u32,
    serial_number: &'a str,
    pod_id: u32,
    standby: bool,
    cimc: CimcSpec<'a>,
    oob_network: OobNetworkSpec<'a>,
}

#[derive(Debug, Serialize)]
struct CimcSpec<'a> {
    address4: &'a str,
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OobNetworkSpec<'a> {
    address4: &'a str,
    gateway4: &'a str,
    #[serde(rename = "enableIPv4")]
    enable_ipv4: bool,
}

impl<'a> AddControllerRequest<'a> {
    /// Join request for one standby node
    ///
    /// `force` is always false and `standby` always true; neither comes from
    /// configuration.
    pub fn standby(node: &'a StandbyNode, serial_number: &'a str) -> Self {
        Self {
            admin_password: &node.admin_password,
            force: false,
            nodes: [NodeSpec {
                node_name: &node.name,
                controller_type: "physical",
                node_id: node.node_id,
                serial_number,
                pod_id: node.pod_id,
                standby: true,
                cimc: CimcSpec {
                    address4: &node.cimc.address,
                    username: &node.cimc.username,
                    password: &node.cimc.password,
                },
                oob_network: OobNetworkSpec {
                    address4: &node.oob_address,
                    gateway4: &node.oob_gateway,
                    enable_ipv4: true,
                },
            }],
        }
    }
}

/// Submit the join request. Success means the controller accepted it; the
/// node boots and syncs with the cluster afterwards.
pub fn add_standby(
    transport: &dyn ControllerTransport,
    endpoint: &Endpoint,
    session: &Session,
    node: &StandbyNode,
    serial_number: &str,
) -> Result<Value> {
    let request = AddControllerRequest::standby(node, serial_number);
    let body = serde_json::to_value(&request)
        .map_err(|e| Error::malformed("add", format!("could not encode request: {}", e)))?;

    log::debug!(
        "Submitting standby node {} (id {}, pod {}, serial {})",
        node.name,
        node.node_id,
        node.pod_id,
        serial_number
    );

    let reply = transport.post_json(&endpoint.add_url(), &body, Some(&session.cookie()))?;
    if !reply.is_success() {
        return Err(Error::JoinRejected {
            status: reply.status,
            payload: reply.body,
        });
    }
    Ok(reply.body)
}
