//! VAIO Control Center entry point.
//!
//! Loads the configuration, wires the settings mirror to an attribute store
//! and the console panel, then runs the single-threaded event loop.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config_from()          -- TOML file or defaults
//!  └─ SysfsAttributeStore::new()  -- or MockAttributeStore with --demo
//!  └─ SettingsMirror::initialize() -- file → panel
//!  └─ run_console()               -- stdin / 500 ms timer / Ctrl-C
//! ```
//!
//! # Subcommands
//!
//! - `run` (default) – interactive panel on stdin/stdout.
//! - `status [--json]` – print the panel once and exit.
//! - `config init [--force]` – write the effective config file.
//! - `config path` – print where the config file is looked up.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use vaio_control::application::settings_mirror::{AttributeStore, SettingsMirror};
use vaio_control::event_loop::{run_console, shutdown_on, LoopExit};
use vaio_control::infrastructure::{
    storage::config::{self, AppConfig},
    sysfs::{mock::MockAttributeStore, SysfsAttributeStore},
    ui_bridge::{command::HELP, PanelState},
};

/// Sony VAIO hardware control panel.
#[derive(Debug, Parser)]
#[command(name = "vaio-control", version, about)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, env = "VAIO_CONTROL_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the sony-laptop attribute files (overrides the config).
    #[arg(long, env = "VAIO_CONTROL_SYSFS_ROOT")]
    sysfs_root: Option<PathBuf>,

    /// Use a built-in fake attribute tree instead of sysfs.
    #[arg(long)]
    demo: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive panel (default).
    Run,
    /// Print the current settings once and exit.
    Status {
        /// Print a JSON snapshot instead of the text panel.
        #[arg(long)]
        json: bool,
    },
    /// Manage the config file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Write the effective configuration (defaults plus `--sysfs-root`).
    Init {
        /// Replace an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print the config file path.
    Path,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config::config_file_path().context("failed to locate config file")?,
    };
    let mut config =
        config::load_config_from(&config_path).context("failed to load configuration")?;
    if let Some(root) = &cli.sysfs_root {
        config.sysfs.root = root.clone();
    }

    init_logging(&config);

    let command = match cli.command.unwrap_or(Command::Run) {
        Command::Config { action } => return run_config(action, &config_path, &config),
        other => other,
    };

    let store = build_store(cli.demo, &config);
    let mut mirror = SettingsMirror::new(store);
    let mut panel = PanelState::new();
    mirror.initialize(&mut panel);

    match command {
        Command::Status { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&panel.to_dto())?);
            } else {
                print!("{}", panel.render());
            }
            Ok(())
        }
        Command::Run => run_interactive(&mut mirror, &mut panel),
        Command::Config { .. } => Ok(()),
    }
}

fn run_config(action: ConfigAction, path: &Path, config: &AppConfig) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init { force } => {
            if force {
                config::save_config_to(path, config)
            } else {
                config::create_config_to(path, config)
            }
            .with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {}", path.display());
            println!("{}", path.display());
        }
        ConfigAction::Path => println!("{}", path.display()),
    }
    Ok(())
}

/// Initialises structured logging on stderr.  `RUST_LOG` overrides the
/// configured level.
fn init_logging(config: &AppConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.panel.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_store(demo: bool, config: &AppConfig) -> Arc<dyn AttributeStore> {
    if demo {
        info!("using built-in demo attribute tree");
        return Arc::new(MockAttributeStore::demo());
    }
    let store = SysfsAttributeStore::new(&config.sysfs.root);
    if !store.root().is_dir() {
        warn!("{} does not exist; is sony-laptop loaded?", store.root().display());
    }
    info!("reading attributes from {}", store.root().display());
    Arc::new(store)
}

fn run_interactive(mirror: &mut SettingsMirror, panel: &mut PanelState) -> anyhow::Result<()> {
    // One thread: UI events and the sensor timer never run concurrently.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build runtime")?;

    print!("{}", panel.render());
    println!("{HELP}");

    let exit = runtime.block_on(async {
        let shutdown = shutdown_on(tokio::signal::ctrl_c());
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        run_console(mirror, panel, stdin, &mut std::io::stdout(), shutdown).await
    })?;

    info!("control panel stopped ({exit:?})");
    if exit == LoopExit::InputClosed {
        println!();
    }
    Ok(())
}
