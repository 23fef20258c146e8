//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MYTRACK_BACKEND_URL` - Backend origin (e.g., `https://mytrack.example`);
//!   the REST API lives under `{origin}/api`
//! - Either `MYTRACK_API_TOKEN`, or both `MYTRACK_ADMIN_EMAIL` and
//!   `MYTRACK_ADMIN_PASSWORD`
//!
//! ## Optional
//! - `MYTRACK_METRICS_POLL_SECS` - System metrics poll interval (default: 30)
//! - `MYTRACK_HTTP_TIMEOUT_SECS` - Per-request timeout (default: 15)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default interval between system metrics polls.
pub const DEFAULT_METRICS_POLL_SECS: u64 = 30;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// How the client authenticates against the admin API.
///
/// Implements `Debug` manually to redact secrets.
#[derive(Clone)]
pub enum Credentials {
    /// A pre-issued bearer token.
    Token(SecretString),
    /// Email and password exchanged for a token via `/auth/login`.
    Password {
        email: String,
        password: SecretString,
    },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token(_) => f.debug_tuple("Token").field(&"[REDACTED]").finish(),
            Self::Password { email, .. } => f
                .debug_struct("Password")
                .field("email", email)
                .field("password", &"[REDACTED]")
                .finish(),
        }
    }
}

/// Admin client configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Backend origin, also used to resolve relative cover images
    pub backend_url: Url,
    /// Authentication material for the admin API
    pub credentials: Credentials,
    /// Interval between system metrics polls
    pub metrics_poll_interval: Duration,
    /// Per-request timeout for the HTTP client
    pub http_timeout: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
}

impl AdminConfig {
    /// Build a configuration with defaults for everything but the backend
    /// and credentials.
    #[must_use]
    pub fn new(backend_url: Url, credentials: Credentials) -> Self {
        Self {
            backend_url,
            credentials,
            metrics_poll_interval: Duration::from_secs(DEFAULT_METRICS_POLL_SECS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let backend_url = env.required("MYTRACK_BACKEND_URL")?;
        let backend_url = Url::parse(&backend_url).map_err(|e| {
            ConfigError::InvalidEnvVar("MYTRACK_BACKEND_URL".to_string(), e.to_string())
        })?;

        let credentials = Credentials::from_env(&env)?;
        let metrics_poll_interval =
            env.seconds_or_default("MYTRACK_METRICS_POLL_SECS", DEFAULT_METRICS_POLL_SECS)?;
        let http_timeout =
            env.seconds_or_default("MYTRACK_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;

        Ok(Self {
            backend_url,
            credentials,
            metrics_poll_interval,
            http_timeout,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Base URL of the REST API (`{backend}/api/`).
    ///
    /// # Errors
    ///
    /// Returns error if the backend URL cannot be extended with a path.
    pub fn api_base(&self) -> Result<Url, url::ParseError> {
        let origin = self.backend_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{origin}/api/"))
    }
}

impl Credentials {
    fn from_env<F>(env: &Env<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = env.optional("MYTRACK_API_TOKEN") {
            // Tokens are issued by the backend; a weak one is suspicious but not fatal
            if let Err(e) = validate_secret_strength(&token, "MYTRACK_API_TOKEN") {
                tracing::warn!("MYTRACK_API_TOKEN validation warning: {e}");
            }
            return Ok(Self::Token(SecretString::from(token)));
        }

        match (
            env.optional("MYTRACK_ADMIN_EMAIL"),
            env.optional("MYTRACK_ADMIN_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Ok(Self::Password {
                email,
                password: SecretString::from(password),
            }),
            (Some(_), None) => Err(ConfigError::MissingEnvVar(
                "MYTRACK_ADMIN_PASSWORD".to_string(),
            )),
            _ => Err(ConfigError::MissingEnvVar("MYTRACK_API_TOKEN".to_string())),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get a positive number of seconds with a default value.
    fn seconds_or_default(&self, key: &str, default: u64) -> Result<Duration, ConfigError> {
        let Some(raw) = self.optional(key) else {
            return Ok(Duration::from_secs(default));
        };
        let secs = raw
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
        if secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        Ok(Duration::from_secs(secs))
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}
