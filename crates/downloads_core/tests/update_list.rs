use std::sync::Once;

use downloads_core::{
    update, AppState, Effect, Msg, ProjectRecord, RequestId, EMPTY_LIST_MESSAGE,
    LOAD_PROJECTS_FAILED,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(app_logging::initialize_for_tests);
}

fn refresh(state: AppState) -> (AppState, RequestId) {
    let (state, effects) = update(state, Msg::RefreshRequested);
    match effects.as_slice() {
        [Effect::FetchProjects { request }] => (state, *request),
        other => panic!("expected a single FetchProjects effect, got {other:?}"),
    }
}

fn project(id: &str) -> ProjectRecord {
    ProjectRecord {
        has_transcript: true,
        ..ProjectRecord::new(id)
    }
}

#[test]
fn refresh_emits_fetch_and_marks_loading() {
    init_logging();
    let (mut state, request) = refresh(AppState::new());
    let view = state.view();

    assert_eq!(request, 1);
    assert!(view.loading_projects);
    assert!(view.initial_load);
    assert_eq!(view.empty_message, None);
    assert!(state.consume_dirty());
}

#[test]
fn loaded_projects_are_ordered_newest_first() {
    init_logging();
    let (state, request) = refresh(AppState::new());
    let (mut state, effects) = update(
        state,
        Msg::ProjectsLoaded {
            request,
            result: Ok(vec![
                project("a_20250407_120000"),
                project("b"),
                project("c_20250408_120000"),
            ]),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.loading_projects);
    assert!(!view.initial_load);
    let order: Vec<_> = view.projects.iter().map(|r| r.project_id.as_str()).collect();
    assert_eq!(order, vec!["c_20250408_120000", "a_20250407_120000", "b"]);
    assert_eq!(view.projects[0].position, 1);
    assert_eq!(view.projects[0].date_label, "April 8, 2025 12:00 PM");
    assert_eq!(view.projects[2].date_label, "Unknown date");
    assert!(state.consume_dirty());
}

#[test]
fn refresh_while_loading_is_ignored() {
    init_logging();
    let (state, _request) = refresh(AppState::new());
    let (mut state, effects) = update(state, Msg::RefreshRequested);

    assert!(effects.is_empty());
    assert!(state.view().loading_projects);
    assert!(state.consume_dirty());
}

#[test]
fn failed_load_keeps_previous_list_and_shows_error() {
    init_logging();
    let (state, request) = refresh(AppState::new());
    let (state, _) = update(
        state,
        Msg::ProjectsLoaded {
            request,
            result: Ok(vec![project("keep_20250101_000000")]),
        },
    );

    let (state, request) = refresh(state);
    let (state, effects) = update(
        state,
        Msg::ProjectsLoaded {
            request,
            result: Err("connection refused".to_string()),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.error.as_deref(), Some(LOAD_PROJECTS_FAILED));
    assert_eq!(view.projects.len(), 1);
    assert_eq!(view.projects[0].project_id, "keep_20250101_000000");
    assert!(!view.loading_projects);
}

#[test]
fn successful_load_clears_error() {
    init_logging();
    let (state, request) = refresh(AppState::new());
    let (state, _) = update(
        state,
        Msg::ProjectsLoaded {
            request,
            result: Err("boom".to_string()),
        },
    );
    assert!(state.view().error.is_some());

    let (state, request) = refresh(state);
    let (state, _) = update(
        state,
        Msg::ProjectsLoaded {
            request,
            result: Ok(Vec::new()),
        },
    );
    let view = state.view();
    assert_eq!(view.error, None);
    assert_eq!(view.empty_message, Some(EMPTY_LIST_MESSAGE));
}

#[test]
fn stale_list_response_is_discarded() {
    init_logging();
    let (state, stale) = refresh(AppState::new());
    let (state, _) = update(
        state,
        Msg::ProjectsLoaded {
            request: stale,
            result: Ok(vec![project("x_20250101_000000")]),
        },
    );
    let (state, fresh) = refresh(state);
    assert!(fresh > stale);

    // A duplicate answer for the older generation arrives late.
    let (mut state, effects) = update(
        state,
        Msg::ProjectsLoaded {
            request: stale,
            result: Ok(Vec::new()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().projects.len(), 1);
    assert!(state.view().loading_projects);
    let _ = state.consume_dirty();

    let (mut state, _) = update(
        state,
        Msg::ProjectsLoaded {
            request: fresh,
            result: Ok(vec![project("y_20250102_000000")]),
        },
    );
    assert_eq!(state.view().projects[0].project_id, "y_20250102_000000");
    assert!(state.consume_dirty());
}

#[test]
fn unsolicited_response_changes_nothing() {
    init_logging();
    let state = AppState::new();
    let before = state.view();
    let (next, effects) = update(
        state,
        Msg::ProjectsLoaded {
            request: 42,
            result: Ok(vec![project("ghost")]),
        },
    );
    assert_eq!(next.view(), before);
    assert!(effects.is_empty());
}

#[test]
fn row_view_carries_display_details() {
    init_logging();
    let (state, request) = refresh(AppState::new());
    let record = ProjectRecord {
        name: Some("Rust Talk".to_string()),
        url: Some(format!("https://www.youtube.com/watch?v={}", "z".repeat(30))),
        has_transcript: false,
        audio_files: vec!["part1.wav".to_string()],
        date: Some("April 7, 2025 at 08:25 PM".to_string()),
        ..ProjectRecord::new("vid_20250407_202500")
    };
    let (state, _) = update(
        state,
        Msg::ProjectsLoaded {
            request,
            result: Ok(vec![record]),
        },
    );

    let view = state.view();
    let row = view.row(1).expect("row 1");
    assert_eq!(row.title, "Rust Talk");
    assert_eq!(row.date_label, "April 7, 2025 at 08:25 PM");
    assert!(row.short_url.as_deref().unwrap().ends_with("..."));
    assert!(!row.can_view_transcript);
    assert_eq!(row.audio_files, vec!["part1.wav".to_string()]);
    assert!(view.row(2).is_none());
}
