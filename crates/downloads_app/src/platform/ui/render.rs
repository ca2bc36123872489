use std::fmt::Write;

use downloads_core::{AppViewModel, ProjectRowView, Screen, TranscriptView};

const RULE: &str = "------------------------------------------------------------";

/// Renders the whole screen as plain text.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    match view.screen {
        Screen::List => render_list(&mut out, view),
        Screen::Transcript => match &view.transcript {
            Some(transcript) => render_transcript(&mut out, transcript),
            None => render_list(&mut out, view),
        },
    }

    if let Some(error) = &view.error {
        let _ = writeln!(out, "! {error}");
    }
    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "* {notice}");
    }
    if let Some(prompt) = &view.delete_prompt {
        let _ = writeln!(out, "{RULE}");
        if prompt.in_progress {
            let _ = writeln!(out, "Deleting \"{}\"...", prompt.title);
        } else {
            let _ = writeln!(out, "{}", prompt.message());
            let _ = writeln!(out, "Delete? [yes/no]");
        }
    }
    if let Some(alert) = &view.alert {
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "{alert}");
        let _ = writeln!(out, "(press Enter to continue)");
    }
    out
}

fn render_list(out: &mut String, view: &AppViewModel) {
    let _ = writeln!(out, "Downloads");
    let _ = writeln!(out, "{RULE}");

    if view.loading_projects && view.initial_load {
        let _ = writeln!(out, "Loading projects...");
        return;
    }
    if view.loading_projects {
        let _ = writeln!(out, "Refreshing...");
    }
    if view.loading_transcript {
        let _ = writeln!(out, "Loading transcript...");
    }
    if let Some(message) = view.empty_message {
        let _ = writeln!(out, "{message}");
    }
    for row in &view.projects {
        render_row(out, row);
    }
}

fn render_row(out: &mut String, row: &ProjectRowView) {
    let badges: Vec<String> = row.badges.iter().map(|badge| badge.label()).collect();
    let _ = writeln!(out, "{:>3}. {}", row.position, row.title);
    let _ = writeln!(out, "     {} | {}", row.date_label, badges.join(", "));
    if let Some(url) = &row.short_url {
        let _ = writeln!(out, "     {url}");
    }
    for (index, name) in row.audio_files.iter().enumerate() {
        let _ = writeln!(out, "     [{}] {name}", index + 1);
    }
}

fn render_transcript(out: &mut String, transcript: &TranscriptView) {
    let _ = writeln!(out, "{}", transcript.title);
    if let Some(url) = &transcript.source_url {
        let _ = writeln!(out, "Source: {url}");
    }
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{}", transcript.text);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "copy | download | delete | back");
}
