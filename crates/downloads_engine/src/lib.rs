//! Downloads engine: backend API client and effect execution.
mod api;
mod engine;
mod filename;
mod persist;
mod types;

pub use api::{ApiSettings, ProjectApi, ReqwestProjectApi};
pub use engine::EngineHandle;
pub use filename::{content_disposition_filename, sanitize_filename, transcript_filename};
pub use persist::{ensure_download_dir, AtomicFileWriter, PersistError};
pub use types::{
    ApiError, DeleteOutcome, EngineEvent, FailureKind, ProjectSummary, RequestId,
    TranscriptPayload,
};
