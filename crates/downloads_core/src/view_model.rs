use crate::{FileBadge, Screen};

pub const EMPTY_LIST_MESSAGE: &str =
    "No projects found. Start by processing a YouTube video on the Process Video page.";
pub const EMPTY_TRANSCRIPT_MESSAGE: &str = "No transcript content available.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub screen: Screen,
    pub loading_projects: bool,
    /// No list response has arrived yet.
    pub initial_load: bool,
    pub loading_transcript: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
    /// Blocking message; the next user input only acknowledges it.
    pub alert: Option<String>,
    pub projects: Vec<ProjectRowView>,
    pub empty_message: Option<&'static str>,
    pub transcript: Option<TranscriptView>,
    pub delete_prompt: Option<DeletePromptView>,
    pub dirty: bool,
}

impl AppViewModel {
    /// Looks up a row by its 1-based list position.
    pub fn row(&self, position: usize) -> Option<&ProjectRowView> {
        self.projects.iter().find(|row| row.position == position)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRowView {
    pub position: usize,
    pub project_id: String,
    pub title: String,
    pub date_label: String,
    pub short_url: Option<String>,
    pub badges: Vec<FileBadge>,
    pub can_view_transcript: bool,
    pub audio_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptView {
    pub project_id: String,
    pub title: String,
    pub source_url: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePromptView {
    pub project_id: String,
    pub title: String,
    pub in_progress: bool,
}

impl DeletePromptView {
    pub fn message(&self) -> String {
        format!(
            "Are you sure you want to delete \"{}\"? This action cannot be undone and all associated files will be permanently removed.",
            self.title
        )
    }
}
