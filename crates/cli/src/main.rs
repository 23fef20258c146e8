//! MyTrack admin CLI - the admin dashboard from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Overview of users with their offered actions
//! mytrack-admin users list
//!
//! # Ban (or unban) a user
//! mytrack-admin users ban u1
//!
//! # Owners only: change a role
//! mytrack-admin users role u1 moderator
//!
//! # Review verification requests
//! mytrack-admin verification list
//! mytrack-admin verification approve u2
//!
//! # Edit a plan configuration
//! mytrack-admin plans set pro --max-pages -1 --feature has_analytics=true
//!
//! # Follow system metrics until Ctrl+C
//! mytrack-admin watch
//! ```
//!
//! # Environment Variables
//!
//! - `MYTRACK_BACKEND_URL` - Backend origin, e.g. `https://mytrack.example`
//! - `MYTRACK_API_TOKEN` - Bearer token of an admin or owner account
//! - `MYTRACK_ADMIN_EMAIL` / `MYTRACK_ADMIN_PASSWORD` - Login instead of a token
//! - `MYTRACK_METRICS_POLL_SECS` - Metrics poll interval (default 30)
//! - `MYTRACK_LOG_JSON` - Emit JSON logs when set
//! - `SENTRY_DSN` - Optional error tracking

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use mytrack_admin::{AdminConfig, Dashboard};
use mytrack_core::{PageId, Plan, Role, UserId};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "mytrack-admin")]
#[command(author, version, about = "MyTrack admin dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    Users {
        #[command(subcommand)]
        action: UserCommand,
    },
    /// Manage link pages
    Pages {
        #[command(subcommand)]
        action: PageCommand,
    },
    /// Review artist verification requests
    Verification {
        #[command(subcommand)]
        action: VerificationCommand,
    },
    /// Inspect and edit plan configurations
    Plans {
        #[command(subcommand)]
        action: PlanCommand,
    },
    /// Show platform-wide analytics
    Analytics,
    /// Show backend host metrics
    Metrics,
    /// Follow host metrics until interrupted
    Watch,
}

#[derive(Subcommand)]
enum UserCommand {
    /// List users with stats and offered actions
    List,
    /// Ban a user, or unban a banned one
    Ban { user_id: String },
    /// Grant or revoke the verified badge
    Verify { user_id: String },
    /// Change a user's role (owners only)
    Role {
        user_id: String,
        /// New role (`user`, `moderator`, `admin`)
        role: Role,
    },
    /// Move a user to another plan
    Plan {
        user_id: String,
        /// New plan (`free`, `pro`, `ultimate`)
        plan: Plan,
    },
}

#[derive(Subcommand)]
enum PageCommand {
    /// List pages
    List,
    /// Switch a page between active and disabled
    Toggle { page_id: String },
}

#[derive(Subcommand)]
enum VerificationCommand {
    /// List pending requests
    List,
    /// Approve the request of a user
    Approve { user_id: String },
    /// Reject the request of a user
    Reject { user_id: String },
}

#[derive(Subcommand)]
enum PlanCommand {
    /// Show every plan configuration
    List,
    /// Edit and save one plan configuration
    Set {
        plan: Plan,
        /// Page limit, -1 for unlimited
        #[arg(long, allow_negative_numbers = true)]
        max_pages: Option<i64>,
        /// Feature flag as `key=true|false`, repeatable
        #[arg(long = "feature", value_parser = commands::plans::parse_feature_toggle)]
        features: Vec<commands::plans::FeatureToggle>,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &AdminConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mytrack_admin=info,mytrack_cli=info".into());

    let json = std::env::var_os("MYTRACK_LOG_JSON").is_some();
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_target(false));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    // Another provider may already be installed; either way TLS is usable.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    let config = AdminConfig::from_env();
    let sentry_guard = config.as_ref().ok().and_then(init_sentry);
    init_tracing();

    let result: Result<(), Box<dyn std::error::Error>> = match config {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &AdminConfig) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = Dashboard::connect(config).await?;
    dashboard.activate()?;
    dashboard.wait_ready().await?;

    let result = dispatch(cli.command, &dashboard).await;
    dashboard.deactivate().await;
    result
}

async fn dispatch(command: Commands, dashboard: &Dashboard) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Users { action } => match action {
            UserCommand::List => commands::users::list(dashboard),
            UserCommand::Ban { user_id } => {
                dashboard.toggle_ban(&UserId::new(user_id)).await?;
            }
            UserCommand::Verify { user_id } => {
                dashboard.toggle_verified(&UserId::new(user_id)).await?;
            }
            UserCommand::Role { user_id, role } => {
                dashboard.change_role(&UserId::new(user_id), role).await?;
            }
            UserCommand::Plan { user_id, plan } => {
                dashboard.change_plan(&UserId::new(user_id), plan).await?;
            }
        },
        Commands::Pages { action } => match action {
            PageCommand::List => commands::pages::list(dashboard),
            PageCommand::Toggle { page_id } => {
                dashboard.toggle_page_status(&PageId::new(page_id)).await?;
            }
        },
        Commands::Verification { action } => match action {
            VerificationCommand::List => commands::verification::list(dashboard),
            VerificationCommand::Approve { user_id } => {
                dashboard.approve_verification(&UserId::new(user_id)).await?;
            }
            VerificationCommand::Reject { user_id } => {
                dashboard.reject_verification(&UserId::new(user_id)).await?;
            }
        },
        Commands::Plans { action } => match action {
            PlanCommand::List => commands::plans::list(dashboard),
            PlanCommand::Set {
                plan,
                max_pages,
                features,
            } => commands::plans::set(dashboard, plan, max_pages, &features).await?,
        },
        Commands::Analytics => commands::monitor::analytics(dashboard),
        Commands::Metrics => commands::monitor::metrics(dashboard),
        Commands::Watch => commands::monitor::watch(dashboard).await?,
    }
    Ok(())
}
