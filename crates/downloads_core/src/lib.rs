//! Downloads core: date resolution, project ordering and the pure state machine.
pub mod date;
mod effect;
mod msg;
mod project;
mod state;
mod update;
mod view_model;

pub use date::{display_date, resolve, ResolvedDate, UnresolvedReason};
pub use effect::Effect;
pub use msg::Msg;
pub use project::{order_projects, short_url, FileBadge, ListedProject, ProjectRecord};
pub use state::{AppState, RequestId, Screen};
pub use update::{
    update, COPY_FAILED, COPY_SUCCEEDED, DELETE_PROJECT_FAILED, DOWNLOAD_FAILED,
    LOAD_PROJECTS_FAILED, LOAD_TRANSCRIPT_FAILED,
};
pub use view_model::{
    AppViewModel, DeletePromptView, ProjectRowView, TranscriptView, EMPTY_LIST_MESSAGE,
    EMPTY_TRANSCRIPT_MESSAGE,
};
