use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer};

use crate::persist::PersistError;

pub type RequestId = u64;

/// One entry of `GET /api/projects`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectSummary {
    pub id: String,
    pub name: Option<String>,
    pub date: Option<String>,
    pub timestamp: Option<String>,
    pub url: Option<String>,
    pub has_transcript: bool,
    #[serde(deserialize_with = "null_as_empty")]
    pub audio_files: Vec<String>,
}

/// Body of `GET /api/projects/{id}/transcript`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptPayload {
    #[serde(default)]
    pub project_id: Option<String>,
    pub text: String,
}

/// Body of `DELETE /api/projects/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct DeleteOutcome {
    pub success: bool,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ProjectsListed {
        request: RequestId,
        result: Result<Vec<ProjectSummary>, ApiError>,
    },
    TranscriptFetched {
        request: RequestId,
        result: Result<TranscriptPayload, ApiError>,
    },
    ProjectDeleted {
        request: RequestId,
        project_id: String,
        result: Result<(), ApiError>,
    },
    DownloadCompleted {
        project_id: String,
        result: Result<PathBuf, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<PersistError> for ApiError {
    fn from(err: PersistError) -> Self {
        ApiError::new(FailureKind::Io, err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    InvalidFilename,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Io,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::InvalidFilename => write!(f, "invalid filename"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "unexpected response body"),
            FailureKind::Io => write!(f, "io error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
