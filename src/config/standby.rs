use super::yaml::YamlDoc;
use crate::error::ConfigError;
use std::fmt;
use std::path::Path;

pub const DEFAULT_STANDBY_FILE: &str = "apic_standby.yaml";

/// CIMC (out-of-band management controller) access for the standby node
#[derive(Clone, PartialEq, Eq)]
pub struct CimcAccess {
    pub address: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for CimcAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CimcAccess")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// Everything the controller needs to place the standby node
#[derive(Clone, PartialEq, Eq)]
pub struct StandbyNode {
    pub name: String,
    pub node_id: u32,
    pub admin_password: String,
    pub pod_id: u32,
    pub oob_address: String,
    pub oob_gateway: String,
    pub cimc: CimcAccess,
}

impl fmt::Debug for StandbyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandbyNode")
            .field("name", &self.name)
            .field("node_id", &self.node_id)
            .field("pod_id", &self.pod_id)
            .field("oob_address", &self.oob_address)
            .field("oob_gateway", &self.oob_gateway)
            .field("cimc", &self.cimc)
            .finish_non_exhaustive()
    }
}

impl StandbyNode {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_doc(&YamlDoc::load(path)?)
    }

    pub fn from_doc(doc: &YamlDoc) -> Result<Self, ConfigError> {
        Ok(Self {
            cimc: CimcAccess {
                address: doc.string("standby_apic_cimc_ip")?,
                username: doc.string("standby_apic_cimc_user")?,
                password: doc.string("standby_apic_cimc_pwd")?,
            },
            name: doc.string("standby_apic_name")?,
            node_id: doc.number("standby_apic_node_id")?,
            admin_password: doc.string("standby_apic_admin_pwd")?,
            oob_address: doc.string("standby_apic_oob_ip")?,
            oob_gateway: doc.string("standby_apic_oob_gw")?,
            pod_id: doc.number("standby_apic_pod_id")?,
        })
    }
}
