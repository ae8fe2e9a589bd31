//! consulta - Clinic console shell

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use consulta_core::{
    decode_identity, Preferences, ProfileClient, ProfileImageLoader, Session, TokenStore,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "consulta",
    version,
    about = "Clinic console shell",
    long_about = "Session-aware console for the clinic platform.\n\
                  \n\
                  Shows the signed-in identity, profile image state, and the\n\
                  notification inbox in a terminal shell with modal overlays.\n\
                  \n\
                  Examples:\n\
                    consulta                         # Run the console (default)\n\
                    consulta login <token>           # Save a bearer token\n\
                    consulta logout                  # Remove the saved token\n\
                    consulta whoami                  # Print the decoded identity\n\
                    consulta whoami --json           # Same, as JSON\n\
                  \n\
                  Environment Variables:\n\
                    CONSULTA_CONFIG_DIR              # Override config directory\n\
                    CONSULTA_PROFILE_API             # Profile service base URL"
)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Path to config directory (default: <user config dir>/consulta)
    #[arg(long, env = "CONSULTA_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Base URL of the profile service
    #[arg(
        long,
        env = "CONSULTA_PROFILE_API",
        default_value = "http://localhost:3000"
    )]
    profile_api: String,
}

#[derive(Subcommand)]
enum Mode {
    /// Run the console (default)
    Console,
    /// Save a bearer token and exit
    Login {
        /// Bearer token issued by the clinic backend
        token: String,
    },
    /// Remove the saved bearer token and exit
    Logout,
    /// Print the identity decoded from the saved token
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_dir = cli
        .config_dir
        .clone()
        .or_else(|| dirs::config_dir().map(|d| d.join("consulta")))
        .context("Could not determine config directory")?;

    match cli.mode.unwrap_or(Mode::Console) {
        Mode::Console => {
            run_console(&config_dir, &cli.profile_api).await?;
        }
        Mode::Login { token } => {
            init_stderr_tracing();
            run_login(&config_dir, &token)?;
        }
        Mode::Logout => {
            init_stderr_tracing();
            run_logout(&config_dir)?;
        }
        Mode::Whoami { json } => {
            init_stderr_tracing();
            run_whoami(&config_dir, json)?;
        }
    }

    Ok(())
}

/// Log to stderr for the one-shot subcommands
fn init_stderr_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Log to a file while the alternate screen owns the terminal
fn init_file_tracing(config_dir: &Path) -> Result<()> {
    let log_dir = config_dir.join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let file = std::fs::File::create(log_dir.join("consulta.log"))
        .context("Failed to create log file")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(file)
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run_console(config_dir: &Path, profile_api: &str) -> Result<()> {
    init_file_tracing(config_dir)?;
    tracing::info!("Starting console (profile service: {profile_api})");

    let store = TokenStore::new(config_dir);
    let session = Arc::new(Session::new(store.load(), Some(store)));

    let client =
        ProfileClient::new(profile_api).context("Failed to build profile service client")?;
    let profile = Arc::new(ProfileImageLoader::new(
        client,
        session.event_bus().clone(),
    ));

    let preferences = Preferences::load(config_dir);

    consulta_tui::run(session, profile, preferences).await
}

fn run_login(config_dir: &Path, token: &str) -> Result<()> {
    let store = TokenStore::new(config_dir);
    store.save(token).context("Failed to persist token")?;

    // The token is stored either way; a malformed one just reads as
    // logged-out in the console.
    match decode_identity(token) {
        Ok(identity) => println!("Signed in as {} ({})", identity.name, identity.role),
        Err(e) => println!("Token saved, but its claims are unreadable: {}", e.summary()),
    }
    Ok(())
}

fn run_logout(config_dir: &Path) -> Result<()> {
    let store = TokenStore::new(config_dir);
    store.clear().context("Failed to remove token")?;
    println!("Signed out");
    Ok(())
}

fn run_whoami(config_dir: &Path, json: bool) -> Result<()> {
    let store = TokenStore::new(config_dir);
    let Some(token) = store.load() else {
        bail!("Not signed in (no token saved)");
    };

    let identity = decode_identity(&token).context("Saved token is malformed")?;

    if json {
        let value = serde_json::json!({
            "userId": identity.user_id,
            "name": identity.name,
            "role": identity.role,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{} ({})", identity.name, identity.role);
        println!("user id: {}", identity.user_id);
    }
    Ok(())
}
