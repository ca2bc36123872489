use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchProjects {
        request: RequestId,
    },
    FetchTranscript {
        request: RequestId,
        project_id: String,
    },
    DeleteProject {
        request: RequestId,
        project_id: String,
    },
    DownloadTranscript {
        project_id: String,
        title: String,
    },
    DownloadAudio {
        project_id: String,
        filename: String,
    },
    CopyToClipboard {
        text: String,
    },
}
