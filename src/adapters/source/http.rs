//! DK report service REST adapter
//!
//! Talks to the DK report service over HTTP:
//!
//! - `GET {base}/reports?name=<name>` → `[{"report_name", "report_id"}]`
//! - `GET {base}/reports/{report_id}/batches` → `[{"schedule_event_id", ...}]`
//! - `GET {base}/batches/{batch_id}/data?type=csv` → CSV text

use super::{DataFormat, SourceDataService};
use crate::config::{secret_string, SecretString, SourceConfig};
use crate::domain::ids::{BatchId, ReportId};
use crate::domain::{BatchRecord, BridgeError, Dataset, ReportRecord, Result, SourceError};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, ClientBuilder, Response};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// HTTP implementation of [`SourceDataService`]
pub struct HttpSourceService {
    base_url: Url,
    location: String,
    client: Client,
    auth_header: Option<SecretString>,
}

impl HttpSourceService {
    /// Create a new adapter from the `[source]` configuration section
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `base_url` is missing or invalid,
    /// or when the HTTP client cannot be built.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let raw = config.base_url.as_deref().ok_or_else(|| {
            BridgeError::Configuration("source.base_url is required for the HTTP source".into())
        })?;
        let base_url = Url::parse(raw)
            .map_err(|e| BridgeError::Configuration(format!("Invalid source.base_url: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(BridgeError::Configuration(format!(
                "source.base_url cannot be used as a base URL: {raw}"
            )));
        }

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                BridgeError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        let auth_header = match (&config.username, &config.password) {
            (Some(username), Some(password)) => {
                let credentials = format!("{username}:{}", password.expose_secret().as_ref());
                let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
                Some(secret_string(format!("Basic {encoded}")))
            }
            _ => None,
        };

        Ok(Self {
            location: raw.to_string(),
            base_url,
            client,
            auth_header,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> std::result::Result<Url, SourceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SourceError::Unavailable("source base URL has no path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> std::result::Result<Response, SourceError> {
        let mut request = self.client.get(url.clone()).query(query);
        if let Some(auth) = &self.auth_header {
            let auth: &str = auth.expose_secret().as_ref();
            request = request.header(AUTHORIZATION, auth);
        }

        tracing::debug!(url = %url, "DK source request");

        let response = request
            .send()
            .await
            .map_err(|e| SourceError::Unavailable(format!("GET {url} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Unavailable(format!(
                "GET {url} returned status {status}: {body}"
            )));
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> std::result::Result<T, SourceError> {
        let response = self.get(url.clone(), query).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| SourceError::Unavailable(format!("Invalid response from {url}: {e}")))
    }
}

#[async_trait]
impl SourceDataService for HttpSourceService {
    async fn lookup_reports(
        &self,
        name: &str,
    ) -> std::result::Result<Vec<ReportRecord>, SourceError> {
        let url = self.endpoint(&["reports"])?;
        self.get_json(url, &[("name", name)]).await
    }

    async fn lookup_batches(
        &self,
        report_id: &ReportId,
    ) -> std::result::Result<Vec<BatchRecord>, SourceError> {
        let url = self.endpoint(&["reports", report_id.as_str(), "batches"])?;
        self.get_json(url, &[]).await
    }

    async fn fetch_data(
        &self,
        batch_id: &BatchId,
        format: DataFormat,
    ) -> std::result::Result<Dataset, SourceError> {
        let url = self.endpoint(&["batches", batch_id.as_str(), "data"])?;
        let response = self.get(url.clone(), &[("type", format.as_str())]).await?;
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Unavailable(format!("Failed to read {url}: {e}")))?;

        match format {
            DataFormat::Csv => Dataset::from_csv(&body),
        }
    }

    fn location(&self) -> &str {
        &self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::SourceKind;
    use crate::config::secret_string;
    use crate::core::resolve::SelectionPolicy;
    use mockito::Matcher;

    fn config(base_url: &str) -> SourceConfig {
        SourceConfig {
            kind: SourceKind::Http,
            report_name: "Coffee Sales".to_string(),
            base_url: Some(base_url.to_string()),
            directory: None,
            username: None,
            password: None,
            timeout_seconds: 5,
            report_selection: SelectionPolicy::First,
            batch_selection: SelectionPolicy::First,
        }
    }

    #[tokio::test]
    async fn test_lookup_reports_encodes_name() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/reports")
            .match_query(Matcher::UrlEncoded("name".into(), "Coffee Sales".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"report_name": "Coffee Sales", "report_id": "R1"}]"#)
            .create_async()
            .await;

        let source = HttpSourceService::new(&config(&format!("{}/api/", server.url()))).unwrap();
        let reports = source.lookup_reports("Coffee Sales").await.unwrap();

        mock.assert_async().await;
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].report_id.as_str(), "R1");
    }

    #[tokio::test]
    async fn test_lookup_batches_with_basic_auth() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/reports/R1/batches")
            .match_header("authorization", "Basic ZGs6c2VjcmV0")
            .with_status(200)
            .with_body(r#"[{"schedule_event_id": 501}, {"schedule_event_id": 500}]"#)
            .create_async()
            .await;

        let mut cfg = config(&server.url());
        cfg.username = Some("dk".to_string());
        cfg.password = Some(secret_string("secret".to_string()));
        let source = HttpSourceService::new(&cfg).unwrap();

        let batches = source
            .lookup_batches(&ReportId::new("R1").unwrap())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(batches[0].schedule_event_id.as_str(), "501");
    }

    #[tokio::test]
    async fn test_no_credentials_sends_no_authorization() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/reports/R1/batches")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let source = HttpSourceService::new(&config(&server.url())).unwrap();
        let batches = source
            .lookup_batches(&ReportId::new("R1").unwrap())
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(batches.is_empty());
    }

    #[test]
    fn test_debug_does_not_leak_credentials() {
        let mut cfg = config("https://dk.example.com/api");
        cfg.username = Some("dk".to_string());
        cfg.password = Some(secret_string("secret".to_string()));
        let source = HttpSourceService::new(&cfg).unwrap();

        let debug = format!("{:?}", source.auth_header);
        assert!(!debug.contains("ZGs6c2VjcmV0"));
    }

    #[tokio::test]
    async fn test_fetch_data_parses_csv() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/batches/B1/data")
            .match_query(Matcher::UrlEncoded("type".into(), "csv".into()))
            .with_status(200)
            .with_header("content-type", "text/csv")
            .with_body("category,sales\nCOFFEE ADDITIVE/FLAVORING,1000\n")
            .create_async()
            .await;

        let source = HttpSourceService::new(&config(&server.url())).unwrap();
        let dataset = source
            .fetch_data(&BatchId::new("B1").unwrap(), DataFormat::Csv)
            .await
            .unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.value(0, "sales"), Some("1000"));
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/reports")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("maintenance window")
            .create_async()
            .await;

        let source = HttpSourceService::new(&config(&server.url())).unwrap();
        let err = source.lookup_reports("Coffee Sales").await.unwrap_err();

        match err {
            SourceError::Unavailable(msg) => {
                assert!(msg.contains("503"));
                assert!(msg.contains("maintenance window"));
            }
            other => panic!("Expected Unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_unavailable() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/reports/R1/batches")
            .with_status(200)
            .with_body("<html>login</html>")
            .create_async()
            .await;

        let source = HttpSourceService::new(&config(&server.url())).unwrap();
        let result = source.lookup_batches(&ReportId::new("R1").unwrap()).await;
        assert!(matches!(result, Err(SourceError::Unavailable(_))));
    }

    #[test]
    fn test_missing_base_url() {
        let mut cfg = config("http://localhost");
        cfg.base_url = None;
        assert!(matches!(
            HttpSourceService::new(&cfg),
            Err(BridgeError::Configuration(_))
        ));
    }
}
