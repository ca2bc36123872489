use std::path::PathBuf;
use std::time::Duration;

use app_logging::{app_debug, app_info};
use futures_util::StreamExt;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::filename::{content_disposition_filename, sanitize_filename, transcript_filename};
use crate::persist::AtomicFileWriter;
use crate::{ApiError, DeleteOutcome, FailureKind, ProjectSummary, TranscriptPayload};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_download_bytes: u64,
    pub download_dir: PathBuf,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_download_bytes: 512 * 1024 * 1024,
            download_dir: PathBuf::from("downloads"),
        }
    }
}

/// Client for the transcription backend's project endpoints.
#[async_trait::async_trait]
pub trait ProjectApi: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, ApiError>;

    async fn get_transcript(&self, project_id: &str) -> Result<TranscriptPayload, ApiError>;

    async fn delete_project(&self, project_id: &str) -> Result<DeleteOutcome, ApiError>;

    /// Saves the transcript file into the download directory and returns its path.
    async fn download_transcript(&self, project_id: &str, title: &str)
        -> Result<PathBuf, ApiError>;

    /// Saves one audio file into the download directory and returns its path.
    async fn download_audio(&self, project_id: &str, filename: &str) -> Result<PathBuf, ApiError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct ReqwestProjectApi {
    settings: ApiSettings,
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestProjectApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be used as a base url", settings.base_url),
            ));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            base_url,
            client,
        })
    }

    /// `{base}/api/projects/{segments...}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::new(FailureKind::InvalidUrl, "base url cannot be a base"))?
            .pop_if_empty()
            .extend(["api", "projects"])
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<Response, ApiError> {
        app_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        check_status(response).await
    }

    async fn read_limited(&self, response: Response) -> Result<Vec<u8>, ApiError> {
        let max_bytes = self.settings.max_download_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    async fn save(&self, response: Response, fallback_name: String) -> Result<PathBuf, ApiError> {
        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(content_disposition_filename)
            .map(|name| sanitize_filename(&name))
            .unwrap_or(fallback_name);
        let bytes = self.read_limited(response).await?;

        let dir = self.settings.download_dir.clone();
        let path = tokio::task::spawn_blocking(move || {
            AtomicFileWriter::new(dir).write(&filename, &bytes)
        })
        .await
        .map_err(|err| ApiError::new(FailureKind::Io, err.to_string()))??;
        app_info!("Saved download to {:?}", path);
        Ok(path)
    }
}

#[async_trait::async_trait]
impl ProjectApi for ReqwestProjectApi {
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, ApiError> {
        let response = self.get(self.endpoint(&[])?).await?;
        decode_json(response).await
    }

    async fn get_transcript(&self, project_id: &str) -> Result<TranscriptPayload, ApiError> {
        let response = self
            .get(self.endpoint(&[project_id, "transcript"])?)
            .await?;
        decode_json(response).await
    }

    async fn delete_project(&self, project_id: &str) -> Result<DeleteOutcome, ApiError> {
        let url = self.endpoint(&[project_id])?;
        app_debug!("DELETE {}", url);
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        let outcome: DeleteOutcome = decode_json(response).await?;
        if !outcome.success {
            return Err(ApiError::new(
                FailureKind::Decode,
                outcome
                    .message
                    .unwrap_or_else(|| "backend did not confirm deletion".to_string()),
            ));
        }
        Ok(outcome)
    }

    async fn download_transcript(
        &self,
        project_id: &str,
        title: &str,
    ) -> Result<PathBuf, ApiError> {
        let response = self
            .get(self.endpoint(&[project_id, "transcript", "download"])?)
            .await?;
        self.save(response, transcript_filename(title)).await
    }

    async fn download_audio(&self, project_id: &str, filename: &str) -> Result<PathBuf, ApiError> {
        if filename.is_empty() || filename.contains("..") || filename.starts_with('/') {
            return Err(ApiError::new(
                FailureKind::InvalidFilename,
                format!("refusing to request {filename:?}"),
            ));
        }
        let response = self
            .get(self.endpoint(&[project_id, "audio", filename])?)
            .await?;
        self.save(response, sanitize_filename(filename)).await
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response
        .bytes()
        .await
        .ok()
        .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
        .map(|body| body.error)
        .unwrap_or_else(|| status.to_string());
    Err(ApiError::new(FailureKind::HttpStatus(status.as_u16()), detail))
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&body).map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
