mod config;
mod error;

use std::path::{Path, PathBuf};

use authz::{Action, ActionKind, Authorization, Grant};
use clap::{Parser, Subcommand};
use keeper::{Keeper, MemoryGrantStore};
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

use config::Config;
use error::{Error, Result};

const CONFIG_FILE: &str = "authz.toml";

#[derive(Parser)]
#[command(name = "authz")]
#[command(about = "Check actions against scoped authorization grants", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the action kinds grants can be issued for
    Kinds,
    /// Structurally validate a grant
    Validate {
        /// Grant JSON file
        #[arg(short, long)]
        grant: PathBuf,
    },
    /// Ask a grant to accept an action and print the decision
    Accept {
        /// Grant JSON file
        #[arg(short, long)]
        grant: PathBuf,
        /// Action JSON file
        #[arg(short, long)]
        action: PathBuf,
    },
    /// Dispatch an action through a grants file and persist the result
    Exec {
        /// Grants JSON file, rewritten on success
        #[arg(long)]
        grants: PathBuf,
        #[arg(long)]
        granter: String,
        #[arg(long)]
        grantee: String,
        /// Action JSON file
        #[arg(short, long)]
        action: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config)?;
    init_tracing(&config);
    tracing::debug!(
        path = %cli.config.display(),
        account_prefix = %config.address.account_prefix,
        "configuration loaded"
    );

    match cli.command {
        Commands::Kinds => cmd_kinds(),
        Commands::Validate { grant } => cmd_validate(&config, &grant),
        Commands::Accept { grant, action } => cmd_accept(&grant, &action),
        Commands::Exec {
            grants,
            granter,
            grantee,
            action,
        } => cmd_exec(&config, &grants, &granter, &grantee, &action),
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn cmd_kinds() -> Result<()> {
    println!("{:<30}  TYPE URL", "KIND");
    println!("{}", "-".repeat(90));
    for kind in ActionKind::ALL {
        println!("{:<30}  {}", format!("{kind:?}"), kind.type_url());
    }
    Ok(())
}

fn cmd_validate(config: &Config, grant_path: &Path) -> Result<()> {
    let grant: Grant = read_json(grant_path)?;
    Authorization::validate_basic(&grant, &config.codec())?;
    println!(
        "valid: {} ({} allowed)",
        grant.action_kind,
        grant.allowed_principals.len()
    );
    Ok(())
}

fn cmd_accept(grant_path: &Path, action_path: &Path) -> Result<()> {
    let grant: Grant = read_json(grant_path)?;
    let action: Action = read_json(action_path)?;
    let decision = grant.accept(&action)?;
    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}

fn cmd_exec(
    config: &Config,
    grants_path: &Path,
    granter: &str,
    grantee: &str,
    action_path: &Path,
) -> Result<()> {
    let store = MemoryGrantStore::load(grants_path)?;
    let action: Action = read_json(action_path)?;

    tracing::debug!(
        path = %grants_path.display(),
        grants = store.len(),
        type_url = %action.type_url(),
        "dispatching action"
    );

    let mut keeper = Keeper::new(store, config.codec());
    let decision = keeper.dispatch(granter, grantee, &action)?;
    keeper.store().save(grants_path)?;
    tracing::info!(
        path = %grants_path.display(),
        grants = keeper.store().len(),
        "grants file updated"
    );

    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}
