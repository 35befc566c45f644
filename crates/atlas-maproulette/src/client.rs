//! HTTP implementation of [`MapRouletteApi`].

use std::path::Path;
use std::time::Duration;

use atlas_config::{MapRouletteConfig, RetryConfig};
use serde::Deserialize;
use serde_json::Value;

use crate::api::{MapRouletteApi, ProjectRequest};
use crate::challenge::ChallengeRequest;
use crate::error::MapRouletteError;
use crate::http::{check_response, is_missing, is_retryable_status, retry_delay};
use crate::task::TaskRequest;

/// Header carrying the user's API key.
pub const API_KEY_HEADER: &str = "apiKey";

/// Response shape of every create/lookup endpoint we use.
#[derive(Deserialize)]
struct Created {
    id: u64,
}

/// Which failures a request may be retried after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resend {
    /// Lookups: any transient failure.
    Idempotent,
    /// Creations: only when the server cannot have acted on the request.
    Once,
}

impl Resend {
    fn allows(self, error: &MapRouletteError) -> bool {
        match self {
            Self::Idempotent => error.is_transient(),
            Self::Once => error.is_safe_to_resend(),
        }
    }
}

/// MapRoulette v2 API client.
pub struct MapRouletteClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    retry: RetryConfig,
}

impl MapRouletteClient {
    /// Build a client from validated connection settings.
    ///
    /// TLS verification follows `verify_tls`. When both `cert_path` and
    /// `key_path` are set, the PEM pair is presented as client identity.
    ///
    /// # Errors
    ///
    /// Returns [`MapRouletteError::Config`] if the settings are incomplete,
    /// [`MapRouletteError::Identity`] if the certificate or key cannot be
    /// loaded, or [`MapRouletteError::Http`] if the client fails to build.
    pub fn new(config: &MapRouletteConfig, retry: RetryConfig) -> Result<Self, MapRouletteError> {
        config.validate()?;

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("atlas-checks/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(!config.verify_tls);
        if let Some((cert, key)) = config.client_identity_paths() {
            builder = builder.identity(load_identity(Path::new(cert), Path::new(key))?);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.api_base_url(),
            api_key: config.api_key.clone(),
            retry,
        })
    }

    /// Absolute URL of `path` under the API base.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request built by `build`, retrying failures `mode` allows.
    ///
    /// Returns the response as soon as its status is not retryable; callers
    /// decide how to treat 4xx.
    async fn send<F>(
        &self,
        op: &'static str,
        mode: Resend,
        build: F,
    ) -> Result<reqwest::Response, MapRouletteError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let attempts = self.retry.attempts();
        let mut attempt = 1;
        loop {
            let result = match build().header(API_KEY_HEADER, &self.api_key).send().await {
                Ok(resp) if is_retryable_status(resp.status()) => check_response(resp).await,
                Ok(resp) => Ok(resp),
                Err(e) => Err(MapRouletteError::from(e)),
            };
            match result {
                Err(err) if mode.allows(&err) && attempt < attempts => {
                    let delay = retry_delay(&err, &self.retry, attempt);
                    tracing::warn!(
                        op,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "MapRoulette request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    async fn lookup_id(&self, op: &'static str, url: &str) -> Result<Option<u64>, MapRouletteError> {
        let resp = self.send(op, Resend::Idempotent, || self.http.get(url)).await?;
        if is_missing(resp.status()) {
            return Ok(None);
        }
        let resp = check_response(resp).await?;
        parse_created(resp).await.map(Some)
    }
}

async fn parse_created(resp: reqwest::Response) -> Result<u64, MapRouletteError> {
    let body = resp.text().await?;
    serde_json::from_str::<Created>(&body)
        .map(|created| created.id)
        .map_err(|e| MapRouletteError::Parse(format!("{e}: {body}")))
}

/// Read a PEM certificate and key into one client identity.
fn load_identity(cert: &Path, key: &Path) -> Result<reqwest::Identity, MapRouletteError> {
    let read = |path: &Path| {
        std::fs::read(path).map_err(|e| MapRouletteError::Identity {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    };
    let mut pem = read(cert)?;
    pem.push(b'\n');
    pem.extend(read(key)?);
    reqwest::Identity::from_pem(&pem).map_err(|e| MapRouletteError::Identity {
        path: cert.to_path_buf(),
        reason: e.to_string(),
    })
}

impl MapRouletteApi for MapRouletteClient {
    async fn find_project(&self, name: &str) -> Result<Option<u64>, MapRouletteError> {
        let url = self.endpoint(&format!("projectByName/{}", urlencoding::encode(name)));
        self.lookup_id("find_project", &url).await
    }

    async fn create_project(&self, project: &ProjectRequest) -> Result<u64, MapRouletteError> {
        let url = self.endpoint("project");
        let resp = self
            .send("create_project", Resend::Once, || self.http.post(&url).json(project))
            .await?;
        let id = parse_created(check_response(resp).await?).await?;
        tracing::info!(project = %project.name, id, "created project");
        Ok(id)
    }

    async fn find_challenge(
        &self,
        project_id: u64,
        name: &str,
    ) -> Result<Option<u64>, MapRouletteError> {
        let url = self.endpoint(&format!(
            "project/{project_id}/challenge/{}",
            urlencoding::encode(name)
        ));
        self.lookup_id("find_challenge", &url).await
    }

    async fn create_challenge(
        &self,
        challenge: &ChallengeRequest,
    ) -> Result<u64, MapRouletteError> {
        let url = self.endpoint("challenge");
        let resp = self
            .send("create_challenge", Resend::Once, || self.http.post(&url).json(challenge))
            .await?;
        let id = parse_created(check_response(resp).await?).await?;
        tracing::info!(challenge = %challenge.name, id, "created challenge");
        Ok(id)
    }

    async fn create_tasks(&self, tasks: &[TaskRequest]) -> Result<Value, MapRouletteError> {
        let url = self.endpoint("tasks");
        let resp = self
            .send("create_tasks", Resend::Once, || self.http.post(&url).json(tasks))
            .await?;
        let body = check_response(resp).await?.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| MapRouletteError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> MapRouletteConfig {
        MapRouletteConfig {
            hostname: "maproulette.example.org/".into(),
            api_key: "secret".into(),
            ..MapRouletteConfig::default()
        }
    }

    #[test]
    fn endpoints_hang_off_api_base() {
        let client = MapRouletteClient::new(&config(), RetryConfig::disabled()).unwrap();
        assert_eq!(
            client.endpoint("challenge"),
            "https://maproulette.example.org/api/v2/challenge"
        );
        assert_eq!(
            client.endpoint("/tasks"),
            "https://maproulette.example.org/api/v2/tasks"
        );
    }

    #[test]
    fn creations_are_not_resent_after_server_errors() {
        let server_error = MapRouletteError::Api {
            status: 503,
            message: String::new(),
        };
        let refused = MapRouletteError::RateLimited { retry_after_secs: 0 };

        assert!(Resend::Idempotent.allows(&server_error));
        assert!(!Resend::Once.allows(&server_error));
        assert!(Resend::Once.allows(&refused));
    }

    #[test]
    fn unconfigured_connection_is_rejected() {
        let result = MapRouletteClient::new(&MapRouletteConfig::default(), RetryConfig::default());
        assert!(matches!(result, Err(MapRouletteError::Config(_))));
    }

    #[test]
    fn missing_certificate_is_identity_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config();
        cfg.cert_path = dir.path().join("absent.crt").to_string_lossy().into_owned();
        cfg.key_path = dir.path().join("absent.key").to_string_lossy().into_owned();

        match MapRouletteClient::new(&cfg, RetryConfig::default()) {
            Err(MapRouletteError::Identity { path, .. }) => {
                assert!(path.ends_with("absent.crt"));
            }
            Err(other) => panic!("expected identity error, got {other:?}"),
            Ok(_) => panic!("expected identity error"),
        }
    }
}
