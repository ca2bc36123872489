use std::collections::VecDeque;

use app_logging::{app_debug, app_warn};
use downloads_core::{Effect, Msg, ProjectRecord};
use downloads_engine::{EngineEvent, EngineHandle, ProjectSummary};

use super::clipboard;

/// Executes core effects and turns their completions back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    pending: VecDeque<Msg>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            pending: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchProjects { request } => {
                    app_debug!("FetchProjects request={}", request);
                    self.engine.list_projects(request);
                }
                Effect::FetchTranscript {
                    request,
                    project_id,
                } => {
                    app_debug!("FetchTranscript request={} project={}", request, project_id);
                    self.engine.fetch_transcript(request, project_id);
                }
                Effect::DeleteProject {
                    request,
                    project_id,
                } => {
                    app_debug!("DeleteProject request={} project={}", request, project_id);
                    self.engine.delete_project(request, project_id);
                }
                Effect::DownloadTranscript { project_id, title } => {
                    self.engine.download_transcript(project_id, title);
                }
                Effect::DownloadAudio {
                    project_id,
                    filename,
                } => {
                    self.engine.download_audio(project_id, filename);
                }
                Effect::CopyToClipboard { text } => {
                    let ok = clipboard::copy_text(&text);
                    self.pending.push_back(Msg::ClipboardFinished { ok });
                }
            }
        }
    }

    /// Next completion, if any. Never blocks.
    pub fn poll(&mut self) -> Option<Msg> {
        if let Some(msg) = self.pending.pop_front() {
            return Some(msg);
        }
        self.engine.try_recv().map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ProjectsListed { request, result } => Msg::ProjectsLoaded {
            request,
            result: result
                .map(|projects| projects.into_iter().map(to_record).collect())
                .map_err(|err| err.to_string()),
        },
        EngineEvent::TranscriptFetched { request, result } => Msg::TranscriptLoaded {
            request,
            result: result
                .map(|payload| payload.text)
                .map_err(|err| err.to_string()),
        },
        EngineEvent::ProjectDeleted {
            request,
            project_id,
            result,
        } => Msg::ProjectDeleted {
            request,
            project_id,
            result: result.map_err(|err| err.to_string()),
        },
        EngineEvent::DownloadCompleted { project_id, result } => {
            if let Err(err) = &result {
                app_warn!("Download for {} failed: {}", project_id, err);
            }
            Msg::DownloadFinished {
                result: result
                    .map(|path| path.display().to_string())
                    .map_err(|err| err.to_string()),
            }
        }
    }
}

fn to_record(summary: ProjectSummary) -> ProjectRecord {
    ProjectRecord {
        id: summary.id,
        name: summary.name,
        date: summary.date,
        timestamp: summary.timestamp,
        url: summary.url,
        has_transcript: summary.has_transcript,
        audio_files: summary.audio_files,
    }
}
