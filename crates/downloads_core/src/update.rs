use app_logging::{app_debug, app_info, app_warn};

use crate::{AppState, Effect, Msg, Screen};

pub const LOAD_PROJECTS_FAILED: &str = "Failed to load projects. Please try again later.";
pub const LOAD_TRANSCRIPT_FAILED: &str = "Failed to load transcript. Please try again later.";
pub const DELETE_PROJECT_FAILED: &str = "Failed to delete project. Please try again later.";
pub const DOWNLOAD_FAILED: &str = "Failed to download file. Please try again later.";
pub const COPY_SUCCEEDED: &str = "Transcript copied to clipboard!";
pub const COPY_FAILED: &str =
    "Failed to copy transcript. Please try manually selecting and copying the text.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::RefreshRequested => {
            // A reload already in flight covers this request.
            if state.list_in_flight() {
                app_debug!("Refresh ignored: list request already in flight");
                Vec::new()
            } else {
                let request = state.begin_list_request();
                vec![Effect::FetchProjects { request }]
            }
        }
        Msg::ProjectsLoaded { request, result } => {
            if !state.is_current_list_request(request) {
                app_debug!("Dropping stale project list response request={}", request);
                return (state, Vec::new());
            }
            match result {
                Ok(records) => {
                    app_info!("Loaded {} projects", records.len());
                    state.apply_projects(records);
                }
                Err(err) => {
                    app_warn!("Error fetching projects: {}", err);
                    state.fail_projects(LOAD_PROJECTS_FAILED);
                }
            }
            Vec::new()
        }
        Msg::ProjectSelected { project_id } => match state.project(&project_id).cloned() {
            Some(project) if project.has_transcript => {
                let request = state.begin_transcript_request(project);
                vec![Effect::FetchTranscript {
                    request,
                    project_id,
                }]
            }
            Some(_) => {
                app_debug!("Project {} has no transcript to show", project_id);
                Vec::new()
            }
            None => {
                app_debug!("Ignoring selection of unknown project {}", project_id);
                Vec::new()
            }
        },
        Msg::TranscriptLoaded { request, result } => {
            if !state.is_current_transcript_request(request) {
                app_debug!("Dropping stale transcript response request={}", request);
                return (state, Vec::new());
            }
            match result {
                Ok(text) => state.show_transcript(text),
                Err(err) => {
                    app_warn!("Error fetching transcript: {}", err);
                    state.fail_transcript(LOAD_TRANSCRIPT_FAILED);
                }
            }
            Vec::new()
        }
        Msg::BackToList => {
            state.return_to_list();
            Vec::new()
        }
        Msg::CopyTranscriptClicked => {
            let text = state.transcript_text();
            if state.screen() == Screen::Transcript && !text.is_empty() {
                vec![Effect::CopyToClipboard {
                    text: text.to_string(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::ClipboardFinished { ok } => {
            if ok {
                state.set_alert(COPY_SUCCEEDED);
            } else {
                app_warn!("Could not copy transcript to clipboard");
                state.set_alert(COPY_FAILED);
            }
            Vec::new()
        }
        Msg::AlertDismissed => {
            state.dismiss_alert();
            Vec::new()
        }
        Msg::DownloadTranscriptClicked { project_id } => match state.project(&project_id) {
            Some(project) if project.has_transcript => {
                let title = project.display_name().to_string();
                state.set_notice(format!("Downloading transcript for {title}..."));
                vec![Effect::DownloadTranscript { project_id, title }]
            }
            _ => Vec::new(),
        },
        Msg::DownloadAudioClicked {
            project_id,
            filename,
        } => match state.project(&project_id) {
            Some(project) if project.audio_files.contains(&filename) => {
                state.set_notice(format!("Downloading {filename}..."));
                vec![Effect::DownloadAudio {
                    project_id,
                    filename,
                }]
            }
            _ => Vec::new(),
        },
        Msg::DownloadFinished { result } => {
            match result {
                Ok(location) => state.set_notice(format!("Saved {location}")),
                Err(err) => {
                    app_warn!("Download failed: {}", err);
                    state.set_notice(DOWNLOAD_FAILED.to_string());
                }
            }
            Vec::new()
        }
        Msg::DeleteRequested { project_id } => {
            if state.delete_in_flight() {
                return (state, Vec::new());
            }
            if let Some(project) = state.project(&project_id).cloned() {
                state.open_delete_gate(project);
            }
            Vec::new()
        }
        Msg::DeleteConfirmed => match state.begin_delete_request() {
            Some((request, project_id)) => vec![Effect::DeleteProject {
                request,
                project_id,
            }],
            None => Vec::new(),
        },
        Msg::DeleteCancelled => {
            // The backend call cannot be recalled once sent.
            if !state.delete_in_flight() {
                state.close_delete_gate();
            }
            Vec::new()
        }
        Msg::ProjectDeleted {
            request,
            project_id,
            result,
        } => {
            if !state.is_current_delete_request(request) {
                app_debug!("Dropping stale delete response request={}", request);
                return (state, Vec::new());
            }
            state.close_delete_gate();
            match result {
                Ok(()) => {
                    app_info!("Project {} deleted", project_id);
                    state.forget_transcript_of(&project_id);
                    state.remove_project(&project_id);
                    // Supersedes any reload already in flight.
                    let request = state.begin_list_request();
                    vec![Effect::FetchProjects { request }]
                }
                Err(err) => {
                    app_warn!("Error deleting project {}: {}", project_id, err);
                    state.set_error(DELETE_PROJECT_FAILED);
                    Vec::new()
                }
            }
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
