//! Unify report builder session
//!
//! A session logs in once, then saves one report definition. Every request
//! carries the same Basic credentials; the client's cookie jar replays the
//! session cookies Unify sets.
//!
//! ```text
//! Unauthenticated --login ok--> Authenticated --save ok--> Saved
//!        ^                            |
//!        +------- login fails         +--save fails--> Failed
//! ```

use super::{SavedReport, SessionCookies};
use crate::config::{secret_string, SecretString, UnifyConfig};
use crate::domain::{BridgeError, ReportDefinition, Result, UnifyError};
use base64::{engine::general_purpose, Engine as _};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, RequestBuilder};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Where a session is in its lifecycle
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
    Saved {
        report: SavedReport,
    },
    Failed {
        /// HTTP status of the failed save, `None` for transport failures
        status: Option<u16>,
    },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticated => "authenticated",
            Self::Saved { .. } => "saved",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Client for the Unify `login` and `saveReport` endpoints
///
/// # Example
///
/// ```no_run
/// use dkbridge::adapters::unify::UnifySession;
/// use dkbridge::config::load_config;
/// use dkbridge::domain::ReportDefinition;
///
/// # async fn example(definition: ReportDefinition) -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config("dkbridge.toml")?;
/// let mut session = UnifySession::new(&config.unify)?;
///
/// session.login().await?;
/// let saved = session.save(&definition).await?;
/// println!("Saved as {:?}", saved.report_id);
/// # Ok(())
/// # }
/// ```
pub struct UnifySession {
    login_url: Url,
    save_url: Url,
    client: Client,
    cookies: SessionCookies,
    auth_header: SecretString,
    app_name: String,
    state: SessionState,
}

impl UnifySession {
    /// Create an unauthenticated session
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unusable base URL or when the
    /// HTTP client cannot be built.
    pub fn new(config: &UnifyConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| BridgeError::Configuration(format!("Invalid unify.base_url: {e}")))?;
        let login_url = endpoint(&base_url, "login")?;
        let save_url = endpoint(&base_url, "saveReport")?;

        let cookies = SessionCookies::new(save_url.clone());

        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .cookie_provider(cookies.jar());

        if !config.tls_verify {
            tracing::warn!("TLS certificate verification is disabled for Unify");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            BridgeError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        let credentials = format!(
            "{}:{}",
            config.username,
            config.password.expose_secret().as_ref()
        );
        let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());

        Ok(Self {
            login_url,
            save_url,
            client,
            cookies,
            auth_header: secret_string(format!("Basic {encoded}")),
            app_name: config.app_name.clone(),
            state: SessionState::Unauthenticated,
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Cookies the next save will send
    pub fn cookies(&self) -> &SessionCookies {
        &self.cookies
    }

    /// True once login succeeded and no save has failed since
    pub fn is_authenticated(&self) -> bool {
        matches!(
            self.state,
            SessionState::Authenticated | SessionState::Saved { .. }
        )
    }

    fn post(&self, url: Url) -> RequestBuilder {
        let auth: &str = self.auth_header.expose_secret().as_ref();
        self.client.post(url).header(AUTHORIZATION, auth)
    }

    /// Log in with the configured credentials and app identity
    ///
    /// On success the session is `Authenticated` and its jar holds the
    /// cookies the platform set. On failure it is `Unauthenticated`, whatever
    /// it was before.
    ///
    /// # Errors
    ///
    /// [`UnifyError::AuthenticationFailed`] for a non-2xx answer or a
    /// transport failure.
    pub async fn login(&mut self) -> std::result::Result<(), UnifyError> {
        let url = self.login_url.clone();
        tracing::debug!(url = %url, app_name = %self.app_name, "Unify login");

        let response = match self
            .post(url)
            .json(&serde_json::json!({ "appName": self.app_name }))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                self.state = SessionState::Unauthenticated;
                return Err(UnifyError::AuthenticationFailed {
                    status: None,
                    message: format!("login request failed: {e}"),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            self.state = SessionState::Unauthenticated;
            return Err(UnifyError::AuthenticationFailed {
                status: Some(status.as_u16()),
                message: if body.is_empty() {
                    format!("login returned status {status}")
                } else {
                    format!("login returned status {status}: {body}")
                },
            });
        }

        if self.cookies.is_empty() {
            tracing::warn!("Unify login succeeded without setting session cookies");
        }

        tracing::info!(
            status = status.as_u16(),
            cookies = self.cookies.len(),
            "Logged in to Unify"
        );
        self.state = SessionState::Authenticated;
        Ok(())
    }

    /// Submit a report definition
    ///
    /// Nothing prevents saving twice: a session that already saved logs a
    /// warning and submits again, which creates a second report.
    ///
    /// # Errors
    ///
    /// - [`UnifyError::NotAuthenticated`] before a successful login or after
    ///   a failed save, with no request sent
    /// - [`UnifyError::SaveRejected`] for a non-2xx answer, body kept verbatim
    /// - [`UnifyError::Connection`] for a transport failure
    /// - [`UnifyError::InvalidResponse`] for a 2xx answer that is not JSON
    pub async fn save(
        &mut self,
        definition: &ReportDefinition,
    ) -> std::result::Result<SavedReport, UnifyError> {
        match &self.state {
            SessionState::Authenticated => {}
            SessionState::Saved { report } => {
                tracing::warn!(
                    previous_report_id = ?report.report_id,
                    report_name = %definition.report_name,
                    "Session already saved a report; saving again creates a duplicate"
                );
            }
            SessionState::Unauthenticated | SessionState::Failed { .. } => {
                return Err(UnifyError::NotAuthenticated);
            }
        }

        let url = self.save_url.clone();
        tracing::debug!(url = %url, report_name = %definition.report_name, "Unify saveReport");

        let request = self
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(definition);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                self.state = SessionState::Failed { status: None };
                return Err(UnifyError::Connection(format!("saveReport failed: {e}")));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                self.state = SessionState::Failed {
                    status: Some(status.as_u16()),
                };
                return Err(UnifyError::Connection(format!(
                    "failed to read saveReport response: {e}"
                )));
            }
        };

        if !status.is_success() {
            self.state = SessionState::Failed {
                status: Some(status.as_u16()),
            };
            return Err(UnifyError::SaveRejected {
                status: status.as_u16(),
                body,
            });
        }

        let document = if body.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&body) {
                Ok(document) => document,
                Err(e) => {
                    self.state = SessionState::Failed {
                        status: Some(status.as_u16()),
                    };
                    return Err(UnifyError::InvalidResponse(format!(
                        "saveReport answered {status} with a non-JSON body: {e}"
                    )));
                }
            }
        };

        let saved = SavedReport::from_response(document);
        tracing::info!(
            status = status.as_u16(),
            report_name = %definition.report_name,
            report_id = ?saved.report_id,
            "Saved report to Unify"
        );

        self.state = SessionState::Saved {
            report: saved.clone(),
        };
        Ok(saved)
    }
}

/// `base_url` with `name` appended as a path segment
fn endpoint(base_url: &Url, name: &str) -> Result<Url> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| {
            BridgeError::Configuration(format!(
                "unify.base_url cannot be used as a base URL: {base_url}"
            ))
        })?
        .pop_if_empty()
        .push(name);
    Ok(url)
}
