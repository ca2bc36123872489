use crate::{ProjectRecord, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked for the project list (also sent once at startup).
    RefreshRequested,
    /// Backend answered a list request.
    ProjectsLoaded {
        request: RequestId,
        result: Result<Vec<ProjectRecord>, String>,
    },
    /// User chose to view a project's transcript.
    ProjectSelected { project_id: String },
    /// Backend answered a transcript request.
    TranscriptLoaded {
        request: RequestId,
        result: Result<String, String>,
    },
    /// User left the transcript view.
    BackToList,
    /// User clicked Copy in the transcript view.
    CopyTranscriptClicked,
    /// Clipboard write finished.
    ClipboardFinished { ok: bool },
    /// User acknowledged the blocking alert.
    AlertDismissed,
    /// User asked to download a project's transcript file.
    DownloadTranscriptClicked { project_id: String },
    /// User asked to download one of a project's audio files.
    DownloadAudioClicked { project_id: String, filename: String },
    /// A download finished; `Ok` carries the saved location.
    DownloadFinished { result: Result<String, String> },
    /// User clicked Delete on a project; opens the confirmation gate.
    DeleteRequested { project_id: String },
    /// User accepted the confirmation gate.
    DeleteConfirmed,
    /// User dismissed the confirmation gate.
    DeleteCancelled,
    /// Backend answered a delete request.
    ProjectDeleted {
        request: RequestId,
        project_id: String,
        result: Result<(), String>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
