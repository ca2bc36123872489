use crate::date::display_date;
use crate::project::{order_projects, short_url, ListedProject, ProjectRecord};
use crate::view_model::{
    AppViewModel, DeletePromptView, ProjectRowView, TranscriptView, EMPTY_LIST_MESSAGE,
    EMPTY_TRANSCRIPT_MESSAGE,
};

/// Monotonic id attached to every outgoing backend request.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    List,
    Transcript,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingDelete {
    project: ProjectRecord,
    request: Option<RequestId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    projects: Vec<ListedProject>,
    has_loaded: bool,
    screen: Screen,
    selected: Option<ProjectRecord>,
    /// Project whose transcript is being fetched; becomes `selected` on arrival.
    pending_selection: Option<ProjectRecord>,
    transcript: String,
    pending_delete: Option<PendingDelete>,
    error: Option<String>,
    notice: Option<String>,
    alert: Option<String>,
    last_request: RequestId,
    list_request: Option<RequestId>,
    transcript_request: Option<RequestId>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let projects = self
            .projects
            .iter()
            .enumerate()
            .map(|(index, listed)| project_row(index, &listed.record))
            .collect::<Vec<_>>();

        let empty_message = (self.has_loaded && self.list_request.is_none() && projects.is_empty())
            .then_some(EMPTY_LIST_MESSAGE);

        let transcript = match (self.screen, &self.selected) {
            (Screen::Transcript, Some(project)) => Some(TranscriptView {
                project_id: project.id.clone(),
                title: project.display_name().to_string(),
                source_url: project.url.clone().filter(|url| !url.is_empty()),
                text: if self.transcript.is_empty() {
                    EMPTY_TRANSCRIPT_MESSAGE.to_string()
                } else {
                    self.transcript.clone()
                },
            }),
            _ => None,
        };

        let delete_prompt = self.pending_delete.as_ref().map(|pending| DeletePromptView {
            project_id: pending.project.id.clone(),
            title: pending.project.display_name().to_string(),
            in_progress: pending.request.is_some(),
        });

        AppViewModel {
            screen: self.screen,
            loading_projects: self.list_request.is_some(),
            initial_load: !self.has_loaded,
            loading_transcript: self.transcript_request.is_some(),
            error: self.error.clone(),
            notice: self.notice.clone(),
            alert: self.alert.clone(),
            projects,
            empty_message,
            transcript,
            delete_prompt,
            dirty: self.dirty,
        }
    }

    /// Returns whether a re-render is needed and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn project(&self, project_id: &str) -> Option<&ProjectRecord> {
        self.projects
            .iter()
            .map(|listed| &listed.record)
            .find(|record| record.id == project_id)
    }

    pub fn listed_projects(&self) -> &[ListedProject] {
        &self.projects
    }

    pub fn transcript_text(&self) -> &str {
        &self.transcript
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn next_request(&mut self) -> RequestId {
        self.last_request += 1;
        self.last_request
    }

    pub(crate) fn list_in_flight(&self) -> bool {
        self.list_request.is_some()
    }

    pub(crate) fn begin_list_request(&mut self) -> RequestId {
        let request = self.next_request();
        self.list_request = Some(request);
        self.mark_dirty();
        request
    }

    pub(crate) fn is_current_list_request(&self, request: RequestId) -> bool {
        self.list_request == Some(request)
    }

    pub(crate) fn apply_projects(&mut self, records: Vec<ProjectRecord>) {
        self.list_request = None;
        self.has_loaded = true;
        self.projects = order_projects(records);
        self.error = None;
        self.mark_dirty();
    }

    pub(crate) fn fail_projects(&mut self, message: &str) {
        self.list_request = None;
        self.has_loaded = true;
        self.error = Some(message.to_string());
        self.mark_dirty();
    }

    pub(crate) fn begin_transcript_request(&mut self, project: ProjectRecord) -> RequestId {
        let request = self.next_request();
        self.transcript_request = Some(request);
        self.pending_selection = Some(project);
        self.mark_dirty();
        request
    }

    pub(crate) fn is_current_transcript_request(&self, request: RequestId) -> bool {
        self.transcript_request == Some(request)
    }

    pub(crate) fn show_transcript(&mut self, text: String) {
        self.transcript_request = None;
        self.selected = self.pending_selection.take();
        self.transcript = text;
        self.screen = Screen::Transcript;
        self.error = None;
        self.mark_dirty();
    }

    pub(crate) fn fail_transcript(&mut self, message: &str) {
        self.transcript_request = None;
        self.return_to_list();
        self.error = Some(message.to_string());
        self.mark_dirty();
    }

    pub(crate) fn return_to_list(&mut self) {
        self.screen = Screen::List;
        self.selected = None;
        self.pending_selection = None;
        self.transcript.clear();
        self.transcript_request = None;
        self.mark_dirty();
    }

    /// Drops every transcript reference to a deleted project: an in-flight
    /// fetch is abandoned and an open view returns to the list.
    pub(crate) fn forget_transcript_of(&mut self, project_id: &str) {
        let is_target = |project: &Option<ProjectRecord>| {
            project.as_ref().is_some_and(|project| project.id == project_id)
        };
        if is_target(&self.pending_selection) {
            self.pending_selection = None;
            self.transcript_request = None;
            self.mark_dirty();
        }
        if is_target(&self.selected) {
            self.return_to_list();
        }
    }

    pub(crate) fn open_delete_gate(&mut self, project: ProjectRecord) {
        self.pending_delete = Some(PendingDelete {
            project,
            request: None,
        });
        self.mark_dirty();
    }

    pub(crate) fn delete_in_flight(&self) -> bool {
        self.pending_delete
            .as_ref()
            .is_some_and(|pending| pending.request.is_some())
    }

    /// Marks the open gate as accepted; returns the request and project id to delete.
    pub(crate) fn begin_delete_request(&mut self) -> Option<(RequestId, String)> {
        if self.pending_delete.is_none() || self.delete_in_flight() {
            return None;
        }
        let request = self.next_request();
        let pending = self.pending_delete.as_mut()?;
        pending.request = Some(request);
        let project_id = pending.project.id.clone();
        self.mark_dirty();
        Some((request, project_id))
    }

    pub(crate) fn is_current_delete_request(&self, request: RequestId) -> bool {
        self.pending_delete
            .as_ref()
            .is_some_and(|pending| pending.request == Some(request))
    }

    pub(crate) fn close_delete_gate(&mut self) {
        self.pending_delete = None;
        self.mark_dirty();
    }

    pub(crate) fn remove_project(&mut self, project_id: &str) {
        self.projects.retain(|listed| listed.record.id != project_id);
        self.mark_dirty();
    }

    pub(crate) fn set_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.mark_dirty();
    }

    pub(crate) fn set_notice(&mut self, message: String) {
        self.notice = Some(message);
        self.mark_dirty();
    }

    pub(crate) fn set_alert(&mut self, message: &str) {
        self.alert = Some(message.to_string());
        self.mark_dirty();
    }

    pub(crate) fn dismiss_alert(&mut self) {
        if self.alert.take().is_some() {
            self.mark_dirty();
        }
    }
}

fn project_row(index: usize, record: &ProjectRecord) -> ProjectRowView {
    ProjectRowView {
        position: index + 1,
        project_id: record.id.clone(),
        title: record.display_name().to_string(),
        date_label: display_date(record),
        short_url: record
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(short_url),
        badges: record.file_badges(),
        can_view_transcript: record.has_transcript,
        audio_files: record.audio_files.clone(),
    }
}
