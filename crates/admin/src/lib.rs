//! MyTrack admin dashboard library.
//!
//! Client-side controller for the MyTrack admin panel: it loads users,
//! pages, analytics, system metrics, verification requests and plan
//! configurations from the backend, and mediates administrator actions
//! against them.
//!
//! # Security
//!
//! This crate holds HIGH PRIVILEGE credentials: an admin or owner bearer
//! token can ban users, change roles and reconfigure plans. Tokens and
//! passwords are kept in [`secrecy::SecretString`] and never logged.
//!
//! # Example
//!
//! ```no_run
//! use mytrack_admin::{AdminConfig, Dashboard};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AdminConfig::from_env()?;
//! let dashboard = Dashboard::connect(&config).await?;
//! dashboard.activate()?;
//! dashboard.wait_ready().await?;
//!
//! let stats = dashboard.state().user_stats();
//! println!("{} users, {} banned", stats.total, stats.banned);
//!
//! dashboard.deactivate().await;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod notify;
pub mod permissions;
pub mod presentation;
pub mod state;

pub use api::{AdminApi, ApiError};
pub use config::{AdminConfig, ConfigError, Credentials};
pub use dashboard::{Dashboard, PlanEdit};
pub use error::DashboardError;
pub use notify::{Notification, NotificationKind};
pub use permissions::{UserAction, UserActions};
pub use state::{DashboardState, UserStats};
