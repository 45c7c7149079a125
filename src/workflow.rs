//! Standby controller pipeline: login, CIMC validation, cluster join

use crate::apic::{self, ControllerTransport, Endpoint};
use crate::config::{ControllerConfig, Settings, SettingsOverrides, StandbyNode};
use crate::error::{Error, Result};
use crate::utils::json::to_pretty_string;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Everything a run needs, loaded before any request is made
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub controller: ControllerConfig,
    pub node: StandbyNode,
    pub settings: Settings,
}

/// Read both YAML documents and the optional settings file
pub fn load_run_config(
    controller_file: &Path,
    standby_file: &Path,
    settings_file: Option<&Path>,
    overrides: &SettingsOverrides,
) -> Result<RunConfig> {
    let controller = ControllerConfig::load(controller_file)?;
    let node = StandbyNode::load(standby_file)?;
    let settings = Settings::load(settings_file)?.apply(overrides)?;

    Ok(RunConfig {
        controller,
        node,
        settings,
    })
}

/// Where a run is. Transitions only move forward, one step at a time.
///
/// A failed run ends in [`RunFailure`], which records the last stage reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Authenticated,
    Validated,
    Submitted,
    Success,
}

impl Stage {
    /// Next stage on the success path; `Success` has none
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Idle => Some(Stage::Authenticated),
            Stage::Authenticated => Some(Stage::Validated),
            Stage::Validated => Some(Stage::Submitted),
            Stage::Submitted => Some(Stage::Success),
            Stage::Success => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Authenticated => "authenticated",
            Stage::Validated => "validated",
            Stage::Submitted => "submitted",
            Stage::Success => "success",
        };
        f.write_str(name)
    }
}

/// Result of an accepted join request
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOutcome {
    pub serial_number: String,
    pub stage: Stage,
}

/// A run that stopped before the controller accepted the join request
#[derive(Debug, Error)]
#[error("run stopped after stage '{stage}'")]
pub struct RunFailure {
    /// Last stage the run completed
    pub stage: Stage,
    #[source]
    pub error: Error,
}

impl RunFailure {
    pub fn exit_code(&self) -> i32 {
        self.error.exit_code()
    }

    pub fn payload(&self) -> Option<&Value> {
        self.error.payload()
    }
}

struct Progress {
    stage: Stage,
}

impl Progress {
    fn advance(&mut self) {
        if let Some(next) = self.stage.next() {
            log::debug!("stage {} -> {}", self.stage, next);
            self.stage = next;
        }
    }
}

/// Run the three stages in order against `transport`
///
/// The join request is never sent unless CIMC validation succeeded.
pub fn run(
    config: &RunConfig,
    transport: &dyn ControllerTransport,
) -> Result<JoinOutcome, RunFailure> {
    let mut progress = Progress { stage: Stage::Idle };
    match run_stages(config, transport, &mut progress) {
        Ok(serial_number) => Ok(JoinOutcome {
            serial_number,
            stage: progress.stage,
        }),
        Err(error) => {
            log::debug!("run stopped after stage {}", progress.stage);
            Err(RunFailure {
                stage: progress.stage,
                error,
            })
        }
    }
}

fn run_stages(
    config: &RunConfig,
    transport: &dyn ControllerTransport,
    progress: &mut Progress,
) -> Result<String> {
    let endpoint = Endpoint::new(&config.controller.address);

    println!("Logging in to {} as {}...", endpoint.base(), config.controller.credentials.username);
    let session = apic::login(transport, &endpoint, &config.controller.credentials)?;
    progress.advance();
    println!("✓ Session established");

    // Session tokens expire ten minutes after creation
    session.write_to(&config.settings.session_file)?;
    println!("✓ Session saved to {}", config.settings.session_file.display());

    println!();
    println!("CIMC credential validation in progress...");
    println!();
    let verified = apic::verify_cimc(transport, &endpoint, &session, &config.node.cimc)?;
    progress.advance();
    println!("✓ CIMC credentials are valid:");
    println!();
    println!("{}", to_pretty_string(&verified.payload));

    println!();
    println!(
        "Adding Standby APIC with serial number {} to existing APIC cluster...",
        verified.serial_number
    );
    println!();
    apic::add_standby(
        transport,
        &endpoint,
        &session,
        &config.node,
        &verified.serial_number,
    )?;
    progress.advance();

    println!("✓ Standby APIC added successfully!");
    println!();
    println!("Open the APIC GUI and verify the Standby controller status. Standby APIC status shows as Booting Up");
    println!("Go to System -> Controllers -> expand APIC node -> select 'Cluster As Seen By Node'");
    progress.advance();

    Ok(verified.serial_number)
}
