// Configuration documents
//
// Two flat YAML documents describe the controller and the standby node.
// An optional TOML file holds tool settings.

pub mod controller;
pub mod settings;
pub mod standby;
pub mod yaml;

pub use controller::{ControllerConfig, Credentials, DEFAULT_CONTROLLER_FILE};
pub use settings::{Settings, SettingsOverrides};
pub use standby::{CimcAccess, DEFAULT_STANDBY_FILE, StandbyNode};
