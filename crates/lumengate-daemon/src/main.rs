//! Lumengate - identity-triggered lighting daemon.
//!
//! Reads identities from the configured reader, resolves them against
//! the profile store, and switches effects on the local playback
//! service until interrupted.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lumengate_auth::Authenticator;
use lumengate_daemon::config::{CatalogChoice, Config, ReaderKind, SecurityMode};
use lumengate_daemon::session::{InteractivePrompt, Session};
use lumengate_hw::{
    FppController, IdentityReader, PromptReader, RfidReader, SerialBadgeReader, ShutdownFlag,
    WiegandReader,
};
use lumengate_store::FlatFileStore;

/// Lumengate - access-controlled lighting trigger
#[derive(Parser, Debug)]
#[command(name = "lumengate")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Identity reader variant
    #[arg(long, value_enum, default_value_t = ReaderKind::Prompt)]
    reader: ReaderKind,

    /// Credential scheme for stored identifiers
    #[arg(long, value_enum, default_value_t = SecurityMode::None)]
    security: SecurityMode,

    /// Require a secondary key with each identity
    #[arg(long)]
    dual_factor: bool,

    /// Effect catalog offered at enrollment
    #[arg(long, value_enum, default_value_t = CatalogChoice::Short)]
    catalog: CatalogChoice,

    /// Device node for hardware readers
    #[arg(long)]
    device: Option<PathBuf>,

    /// Data directory for profile stores
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    // Initialize tracing
    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("lumengate={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config {
        reader: args.reader,
        security: args.security,
        dual_factor: args.dual_factor,
        catalog: args.catalog,
        data_dir: args.data_dir,
        device: args.device,
    };

    // All configuration errors are fatal before the loop starts.
    config.validate()?;
    let scheme = config.scheme()?;
    let catalog = config.effect_catalog();

    tracing::info!(
        reader = config.reader.name(),
        scheme = scheme.name(),
        dual_factor = config.dual_factor,
        store = %config.store_path().display(),
        "Starting lumengate"
    );

    let store = FlatFileStore::open(config.store_path())?;

    let shutdown = ShutdownFlag::new();
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            tracing::info!("Interrupt received, shutting down");
            shutdown.trigger();
        })?;
    }

    let reader: Box<dyn IdentityReader> = match config.reader {
        ReaderKind::Prompt => {
            Box::new(PromptReader::new().with_dual_factor(config.dual_factor))
        }
        // validate() guarantees a device path for hardware readers.
        ReaderKind::Rfid => Box::new(RfidReader::open(device_path(&config)?)?),
        ReaderKind::Serial => Box::new(SerialBadgeReader::open(device_path(&config)?)?),
        ReaderKind::Wiegand => Box::new(WiegandReader::open(device_path(&config)?)?),
    };

    let session = Session::new(
        reader,
        FppController::new(),
        store,
        InteractivePrompt::new(catalog),
        Authenticator::new(scheme),
        catalog,
        shutdown,
    );
    session.run()
}

fn device_path(config: &Config) -> anyhow::Result<&std::path::Path> {
    config
        .device
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("--device is required for the {} reader", config.reader.name()))
}
