// APIC REST client
//
// One module per stage of the standby workflow, plus the transport they
// share. Every request goes through `ControllerTransport`.

pub mod cluster;
pub mod endpoint;
pub mod session;
pub mod transport;
pub mod verify;

#[cfg(test)]
pub(crate) mod stub;

pub use cluster::{AddControllerRequest, add_standby};
pub use endpoint::Endpoint;
pub use session::{SESSION_COOKIE, SESSION_LIFETIME_SECS, Session, login};
pub use transport::{ControllerTransport, HttpTransport, Reply};
pub use verify::{VerifiedNode, verify_cimc};
