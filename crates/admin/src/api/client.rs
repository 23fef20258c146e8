//! MyTrack admin REST client.
//!
//! Every endpoint is relative to the API base (`{backend}/api/`). Requests
//! carry a bearer token set once as a default header.
//!
//! List endpoints are read row by row: a row that does not parse is logged
//! and skipped so one bad record cannot hide the rest of the list.

use std::sync::Arc;
use std::time::Duration;

use mytrack_core::{PageId, Plan, Role, UserId};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;
use urlencoding::encode;

use super::error::ApiError;
use super::types::{BanUpdate, LoginRequest, LoginResponse, PlanUpdate, RoleUpdate, VerifyUpdate};
use crate::config::{AdminConfig, Credentials};
use crate::models::{
    GlobalAnalytics, Page, PlanConfig, PlanConfigUpdate, SystemMetrics, TogglePageResponse, User,
    VerificationRequest,
};

/// Client for the `/admin` endpoints of the MyTrack backend.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct AdminApi {
    inner: Arc<AdminApiInner>,
}

struct AdminApiInner {
    client: reqwest::Client,
    base: Url,
}

impl AdminApi {
    /// Create a client that authenticates with `token`.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(base: Url, token: &SecretString, timeout: Duration) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        let mut auth_value =
            HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| ApiError::InvalidToken(e.to_string()))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(AdminApiInner { client, base }),
        })
    }

    /// Build a client from configuration, logging in first when only
    /// email/password credentials are configured.
    ///
    /// # Errors
    ///
    /// Returns error if the login request fails or the client cannot be built.
    pub async fn connect(config: &AdminConfig) -> Result<Self, ApiError> {
        let base = config.api_base()?;
        match &config.credentials {
            Credentials::Token(token) => Self::new(base, token, config.http_timeout),
            Credentials::Password { email, password } => {
                let login = Self::login(&base, email, password, config.http_timeout).await?;
                Self::new(base, &SecretString::from(login.token), config.http_timeout)
            }
        }
    }

    /// Exchange email and password for a session token.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the credentials are rejected.
    #[instrument(skip(base, password, timeout))]
    pub async fn login(
        base: &Url,
        email: &str,
        password: &SecretString,
        timeout: Duration,
    ) -> Result<LoginResponse, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let response = client
            .post(base.join("auth/login")?)
            .json(&LoginRequest {
                email,
                password: password.expose_secret(),
            })
            .send()
            .await?;
        let login: LoginResponse = handle_response(response).await?;
        debug!(user = %login.user.username, role = %login.user.role, "Logged in");
        Ok(login)
    }

    /// Base URL all endpoints are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base
    }

    /// The account the token belongs to.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get("auth/me").await
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let users: Vec<User> = self.get_rows("admin/users").await?;
        debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_pages(&self) -> Result<Vec<Page>, ApiError> {
        let pages: Vec<Page> = self.get_rows("admin/pages").await?;
        debug!(count = pages.len(), "Fetched pages");
        Ok(pages)
    }

    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn global_analytics(&self) -> Result<GlobalAnalytics, ApiError> {
        self.get("admin/analytics/global").await
    }

    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn system_metrics(&self) -> Result<SystemMetrics, ApiError> {
        self.get("admin/system/metrics").await
    }

    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn verification_requests(&self) -> Result<Vec<VerificationRequest>, ApiError> {
        let requests: Vec<VerificationRequest> = self.get_rows("admin/verification/requests").await?;
        debug!(count = requests.len(), "Fetched verification requests");
        Ok(requests)
    }

    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn plan_configs(&self) -> Result<Vec<PlanConfig>, ApiError> {
        self.get_rows("admin/plan-configs").await
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// # Errors
    ///
    /// Returns error if the request fails or the server rejects it.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn set_user_banned(&self, user_id: &UserId, is_banned: bool) -> Result<(), ApiError> {
        let path = format!("admin/users/{}/ban", encode(user_id.as_str()));
        self.put_ack(&path, Some(&BanUpdate { is_banned })).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails or the server rejects it.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn set_user_role(&self, user_id: &UserId, role: Role) -> Result<(), ApiError> {
        let path = format!("admin/users/{}/role", encode(user_id.as_str()));
        self.put_ack(&path, Some(&RoleUpdate { role })).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails or the server rejects it.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn set_user_plan(&self, user_id: &UserId, plan: Plan) -> Result<(), ApiError> {
        let path = format!("admin/users/{}/plan", encode(user_id.as_str()));
        self.put_ack(&path, Some(&PlanUpdate { plan })).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails or the server rejects it.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn set_user_verified(
        &self,
        user_id: &UserId,
        is_verified: bool,
    ) -> Result<(), ApiError> {
        let path = format!("admin/users/{}/verify", encode(user_id.as_str()));
        self.put_ack(&path, Some(&VerifyUpdate { is_verified })).await
    }

    /// Replace a plan's configuration with `update` (all fields).
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the server rejects it.
    #[instrument(skip(self, update))]
    pub async fn update_plan_config(
        &self,
        plan: Plan,
        update: &PlanConfigUpdate,
    ) -> Result<(), ApiError> {
        let path = format!("admin/plan-configs/{}", plan.as_str());
        self.put_ack(&path, Some(update)).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails or the server rejects it.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn approve_verification(&self, user_id: &UserId) -> Result<(), ApiError> {
        let path = format!("admin/verification/{}/approve", encode(user_id.as_str()));
        self.put_ack::<()>(&path, None).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails or the server rejects it.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn reject_verification(&self, user_id: &UserId) -> Result<(), ApiError> {
        let path = format!("admin/verification/{}/reject", encode(user_id.as_str()));
        self.put_ack::<()>(&path, None).await
    }

    /// Flip a page between active and disabled.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the server rejects it.
    #[instrument(skip(self), fields(page_id = %page_id))]
    pub async fn toggle_page_status(&self, page_id: &PageId) -> Result<TogglePageResponse, ApiError> {
        let url = self.endpoint(&format!("admin/pages/{}/disable", encode(page_id.as_str())))?;
        let response = self.inner.client.put(url).send().await?;
        handle_response(response).await
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base.join(path)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self.inner.client.get(url).send().await?;
        handle_response(response).await
    }

    /// GET a JSON array, skipping rows that do not deserialize as `T`.
    async fn get_rows<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let rows: Vec<serde_json::Value> = self.get(path).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value(row) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    warn!(path, error = %e, "Skipping malformed row");
                    None
                }
            })
            .collect())
    }

    /// PUT and discard the acknowledgement body.
    async fn put_ack<B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        let mut request = self.inner.client.put(url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let text = response.text().await.unwrap_or_default();
        Err(ApiError::from_response(status.as_u16(), &text))
    }
}

impl std::fmt::Debug for AdminApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminApi")
            .field("base", &self.inner.base.as_str())
            .finish_non_exhaustive()
    }
}

/// Parse a success body as JSON or turn the failure into an [`ApiError`].
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(ApiError::from_response(status.as_u16(), &text));
    }

    serde_json::from_str(&text).map_err(|e| ApiError::Parse(format!("{e}: {text}")))
}
