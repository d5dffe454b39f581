//! Backoffice CLI
//!
//! Command-line front end for the admin back-office:
//! - Log in with an admin account
//! - Show the dashboard counters
//! - Inspect or drop the stored session
//! - Generate a config file

use anyhow::Context;
use backoffice::client::AdminClient;
use backoffice::config::{generate_default_config, Config, LoggingConfig};
use backoffice::flows::{
    ensure_authenticated, logout, redirect_if_authenticated, DashboardFlow, DashboardState,
    GuardOutcome, LoginError, LoginFlow, LoginPage, Ports,
};
use backoffice::session::{FileStore, SessionCredential};
use backoffice::ui::TerminalView;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "backoffice")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Admin back-office client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the usual locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Admin API base URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Session file, overrides the config file
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in with an admin account
    Login {
        /// Phone number (10 digits)
        #[arg(short, long)]
        phone: String,
        /// Password
        #[arg(long, env = "BACKOFFICE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Show dashboard statistics
    Stats,

    /// Drop the stored session
    Logout,

    /// Show the stored session
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let (mut config, load_error) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, None),
        None => match Config::load_default() {
            Ok(config) => (config, None),
            Err(e) => (Config::from_env(), Some(e)),
        },
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if let Some(path) = cli.session_file {
        config.session.store_path = path.to_string_lossy().to_string();
    }

    init_logging(&config.logging);
    if let Some(e) = load_error {
        tracing::warn!("{}; using defaults with environment overrides", e);
    }

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing config to {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(ExitCode::SUCCESS);
    }

    let store = FileStore::new(&config.session.store_path);
    let view = TerminalView::new();
    let client = AdminClient::new(config.api.client_config())?;
    let ports = Ports::new(&client, &store, &view, &view);

    match cli.command {
        Commands::Login { phone, password } => {
            if redirect_if_authenticated(&store, &view)? == LoginPage::AlreadyAuthenticated {
                println!("Already logged in. Run `backoffice stats`, or `backoffice logout` first.");
                return Ok(ExitCode::SUCCESS);
            }

            let flow = LoginFlow::new(ports, config.login_settings(), config.ui.loading_policy());
            match flow.submit(&phone, password.as_deref().unwrap_or_default()).await {
                Ok(credential) => {
                    println!("Logged in ({})", credential.roles.join(", "));
                    Ok(ExitCode::SUCCESS)
                }
                Err(LoginError::Session(e)) => Err(e.into()),
                // already written to the form
                Err(_) => Ok(ExitCode::FAILURE),
            }
        }

        Commands::Stats => {
            if ensure_authenticated(&store, &view)? == GuardOutcome::Redirected {
                eprintln!("Not logged in. Run `backoffice login --phone <number>` first.");
                return Ok(ExitCode::FAILURE);
            }

            let flow = DashboardFlow::new(ports, &config.api.base_url, config.ui.loading_policy());
            match flow.load().await? {
                DashboardState::Rendered(_) => Ok(ExitCode::SUCCESS),
                DashboardState::SessionExpired => {
                    eprintln!("Session expired. Log in again.");
                    Ok(ExitCode::FAILURE)
                }
                DashboardState::Failed(_) => Ok(ExitCode::FAILURE),
            }
        }

        Commands::Logout => {
            logout(&store, &view)?;
            println!("Logged out");
            Ok(ExitCode::SUCCESS)
        }

        Commands::Status => {
            match SessionCredential::load(&store)? {
                Some(credential) => {
                    println!("Logged in");
                    println!("  Token:   {}", credential.masked_token());
                    println!("  Roles:   {}", credential.roles.join(", "));
                    println!("  API URL: {}", credential.base_url);
                }
                None => println!("Not logged in"),
            }
            println!("  Session file: {:?}", store.path());
            Ok(ExitCode::SUCCESS)
        }

        Commands::Config { .. } => Ok(ExitCode::SUCCESS),
    }
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("backoffice={}", logging.level)),
    );

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
