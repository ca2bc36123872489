use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::date::resolve;

const URL_DISPLAY_LIMIT: usize = 50;
const URL_DISPLAY_KEEP: usize = 47;

/// Snapshot of one project as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectRecord {
    pub id: String,
    pub name: Option<String>,
    pub date: Option<String>,
    pub timestamp: Option<String>,
    pub url: Option<String>,
    pub has_transcript: bool,
    pub audio_files: Vec<String>,
}

impl ProjectRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Title if present, otherwise the video-id prefix of the project id.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.id.split('_').next().unwrap_or(&self.id),
        }
    }

    pub fn has_audio(&self) -> bool {
        !self.audio_files.is_empty()
    }

    pub fn file_badges(&self) -> Vec<FileBadge> {
        let mut badges = Vec::new();
        if self.has_transcript {
            badges.push(FileBadge::Transcript);
        }
        if self.has_audio() {
            badges.push(FileBadge::Audio(self.audio_files.len()));
        }
        if badges.is_empty() {
            badges.push(FileBadge::NoFiles);
        }
        badges
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileBadge {
    Transcript,
    Audio(usize),
    NoFiles,
}

impl FileBadge {
    pub fn label(self) -> String {
        match self {
            FileBadge::Transcript => "Transcript".to_string(),
            FileBadge::Audio(count) => format!("Audio ({count})"),
            FileBadge::NoFiles => "No Files".to_string(),
        }
    }
}

/// A project annotated with its sort key for one render cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedProject {
    pub record: ProjectRecord,
    pub sort_date: Option<NaiveDateTime>,
}

/// Orders projects newest first. Projects without a resolvable date go last,
/// by descending id.
pub fn order_projects(records: Vec<ProjectRecord>) -> Vec<ListedProject> {
    let mut listed: Vec<ListedProject> = records
        .into_iter()
        .map(|record| {
            let sort_date = resolve(&record).valid();
            ListedProject { record, sort_date }
        })
        .collect();
    listed.sort_by(compare_listed);
    listed
}

fn compare_listed(a: &ListedProject, b: &ListedProject) -> Ordering {
    match (a.sort_date, b.sort_date) {
        (Some(a_date), Some(b_date)) => b_date.cmp(&a_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.record.id.cmp(&a.record.id),
    }
}

/// Truncates long source URLs for the list column.
pub fn short_url(url: &str) -> String {
    if url.chars().count() > URL_DISPLAY_LIMIT {
        let kept: String = url.chars().take(URL_DISPLAY_KEEP).collect();
        format!("{kept}...")
    } else {
        url.to_string()
    }
}
