use std::env;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use url::Url;

use tracker_core::model::{Credential, ProblemId, Topic, UserProfile};

use crate::repository::{
    CompletionRepository, CurriculumRepository, ProfileRepository, Storage, StorageError,
};

mod wire;

use wire::{CompletionRequest, ProfileEnvelope, ProgressDto, TopicDto};

pub const API_URL_ENV: &str = "TRACKER_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HttpInitError {
    #[error("invalid API base url {raw:?}: {source}")]
    InvalidBaseUrl {
        raw: String,
        source: url::ParseError,
    },
    #[error("API base url {0} cannot carry paths")]
    OpaqueBaseUrl(String),
    #[error(transparent)]
    Client(#[from] reqwest::Error),
}

/// Where the remote tracker API lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteConfig {
    base_url: Url,
}

impl RemoteConfig {
    /// Parse a base url, normalizing it to end in `/` so endpoints join beneath it.
    ///
    /// # Errors
    ///
    /// Returns `HttpInitError` if the url is invalid or cannot be a base.
    pub fn parse(raw: &str) -> Result<Self, HttpInitError> {
        let mut base_url = Url::parse(raw.trim()).map_err(|source| HttpInitError::InvalidBaseUrl {
            raw: raw.to_owned(),
            source,
        })?;
        if base_url.cannot_be_a_base() {
            return Err(HttpInitError::OpaqueBaseUrl(raw.to_owned()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url })
    }

    /// Read `TRACKER_API_URL`, falling back to the local development server.
    ///
    /// # Errors
    ///
    /// Returns `HttpInitError` if the configured url is invalid.
    pub fn from_env() -> Result<Self, HttpInitError> {
        let raw = env::var(API_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.into());
        Self::parse(&raw)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path relative to the base url.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the joined url is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, StorageError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

/// Remote tracker API over HTTP with a bearer credential on every request.
#[derive(Clone)]
pub struct HttpRepository {
    client: Client,
    config: RemoteConfig,
    credential: Credential,
}

impl HttpRepository {
    /// # Errors
    ///
    /// Returns `HttpInitError::Client` if the HTTP client cannot be built.
    pub fn new(config: RemoteConfig, credential: Credential) -> Result<Self, HttpInitError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, config, credential))
    }

    /// Use a preconfigured client (proxy, TLS or timeout settings are the caller's).
    #[must_use]
    pub fn with_client(client: Client, config: RemoteConfig, credential: Credential) -> Self {
        Self {
            client,
            config,
            credential,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StorageError> {
        let url = self.config.endpoint(path)?;
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .bearer_auth(self.credential.token())
            .send()
            .await
            .map_err(connection)?;
        let body = check_status(response)?
            .bytes()
            .await
            .map_err(connection)?;
        serde_json::from_slice(&body).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn post_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), StorageError> {
        let url = self.config.endpoint(path)?;
        debug!(%url, "POST");
        let response = self
            .client
            .post(url)
            .bearer_auth(self.credential.token())
            .json(body)
            .send()
            .await
            .map_err(connection)?;
        check_status(response)?;
        Ok(())
    }
}

fn connection(err: reqwest::Error) -> StorageError {
    StorageError::Connection(err.to_string())
}

fn check_status(response: Response) -> Result<Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StorageError::Unauthorized,
        StatusCode::NOT_FOUND => StorageError::NotFound,
        other => StorageError::Status(other.as_u16()),
    })
}

#[async_trait]
impl CurriculumRepository for HttpRepository {
    async fn fetch_curriculum(&self) -> Result<Vec<Topic>, StorageError> {
        let dtos: Vec<TopicDto> = self.get_json("topics").await?;
        wire::map_topics(dtos)
    }
}

#[async_trait]
impl CompletionRepository for HttpRepository {
    async fn fetch_completed(&self) -> Result<Vec<ProblemId>, StorageError> {
        let dto: ProgressDto = self.get_json("progress").await?;
        wire::map_progress(dto)
    }

    async fn mark_complete(&self, id: &ProblemId) -> Result<(), StorageError> {
        self.post_json(
            "progress/complete",
            &CompletionRequest {
                problem_id: id.as_str(),
            },
        )
        .await
    }

    async fn mark_incomplete(&self, id: &ProblemId) -> Result<(), StorageError> {
        self.post_json(
            "progress/uncomplete",
            &CompletionRequest {
                problem_id: id.as_str(),
            },
        )
        .await
    }
}

#[async_trait]
impl ProfileRepository for HttpRepository {
    async fn fetch_profile(&self) -> Result<UserProfile, StorageError> {
        let envelope: ProfileEnvelope = self.get_json("auth/me").await?;
        Ok(wire::map_profile(envelope))
    }
}

impl Storage {
    /// Build storage backed by the remote HTTP API.
    ///
    /// # Errors
    ///
    /// Returns `HttpInitError` if the HTTP client cannot be built.
    pub fn http(config: RemoteConfig, credential: Credential) -> Result<Self, HttpInitError> {
        let repo = HttpRepository::new(config, credential)?;
        let curriculum: Arc<dyn CurriculumRepository> = Arc::new(repo.clone());
        let completions: Arc<dyn CompletionRepository> = Arc::new(repo.clone());
        let profiles: Arc<dyn ProfileRepository> = Arc::new(repo);
        Ok(Self {
            curriculum,
            completions,
            profiles,
        })
    }
}
