use anyhow::Result;
use apic_standby::apic::{HttpTransport, Session};
use apic_standby::config::{
    DEFAULT_CONTROLLER_FILE, DEFAULT_STANDBY_FILE, Settings, SettingsOverrides,
};
use apic_standby::error::{EXIT_FAULT, EXIT_SUCCESS, Error};
use apic_standby::utils::json::to_pretty_string;
use apic_standby::workflow::RunFailure;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "apic-standby")]
#[command(about = "Add a standby controller to an existing APIC cluster", long_about = None)]
struct Cli {
    /// Show debug output (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the standby node's CIMC credentials and join it to the cluster
    Add {
        /// Controller address and admin credentials
        #[arg(long, default_value = DEFAULT_CONTROLLER_FILE)]
        apic_config: PathBuf,
        /// Standby node descriptor
        #[arg(long, default_value = DEFAULT_STANDBY_FILE)]
        standby_config: PathBuf,
        #[command(flatten)]
        opts: SettingsArgs,
    },
    /// Show whether the saved session token is still inside its 10 minute window
    Session {
        #[command(flatten)]
        opts: SettingsArgs,
    },
}

#[derive(Args)]
struct SettingsArgs {
    /// Tool settings file (TOML)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Skip TLS certificate verification
    #[arg(long)]
    insecure: bool,
    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
    /// Where the session attributes are written
    #[arg(long)]
    session_file: Option<PathBuf>,
}

impl SettingsArgs {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            insecure: self.insecure,
            timeout_secs: self.timeout,
            session_file: self.session_file.clone(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match handle_command(cli.command) {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => report(&err),
    };
    std::process::exit(code);
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Add {
            apic_config,
            standby_config,
            opts,
        } => {
            // Both documents are loaded before any request is made
            let config = apic_standby::load_run_config(
                &apic_config,
                &standby_config,
                opts.settings.as_deref(),
                &opts.overrides(),
            )?;
            let transport = HttpTransport::new(&config.settings)?;
            apic_standby::run(&config, &transport)?;
        }
        Commands::Session { opts } => {
            let settings = Settings::load(opts.settings.as_deref())?.apply(&opts.overrides())?;
            show_session(&settings)?;
        }
    }
    Ok(())
}

fn show_session(settings: &Settings) -> Result<()> {
    let session = Session::read_from(&settings.session_file)?;
    println!("Session file: {}", settings.session_file.display());

    match (session.created_at(), session.expires_at()) {
        (Some(created), Some(expires)) => {
            println!("  Created: {}", created.to_rfc3339());
            println!("  Expires: {}", expires.to_rfc3339());
        }
        _ => println!("  Created: unknown (no creationTime attribute)"),
    }

    if session.is_expired(chrono::Utc::now()) {
        println!("✗ Session has expired; run 'apic-standby add' to log in again");
    } else {
        println!("✓ Session is still valid");
    }
    Ok(())
}

/// Print the failure and pick the exit code. Rejections carry the
/// controller's response body, which is shown for diagnosis.
fn report(err: &anyhow::Error) -> i32 {
    eprintln!();
    eprintln!("Error: {:#}", err);

    if let Some(failure) = err.downcast_ref::<RunFailure>() {
        return report_error(&failure.error);
    }
    match err.downcast_ref::<Error>() {
        Some(error) => report_error(error),
        None => EXIT_FAULT,
    }
}

fn report_error(error: &Error) -> i32 {
    if let Some(payload) = error.payload() {
        eprintln!();
        eprintln!("{}", to_pretty_string(payload));
    }
    error.exit_code()
}
