use downloads_core::{
    update, AppState, Effect, Msg, ProjectRecord, RequestId, Screen, COPY_FAILED, COPY_SUCCEEDED,
    DOWNLOAD_FAILED, EMPTY_TRANSCRIPT_MESSAGE, LOAD_TRANSCRIPT_FAILED,
};
use pretty_assertions::assert_eq;

fn loaded_state(records: Vec<ProjectRecord>) -> AppState {
    let (state, _) = update(AppState::new(), Msg::RefreshRequested);
    let (state, _) = update(
        state,
        Msg::ProjectsLoaded {
            request: 1,
            result: Ok(records),
        },
    );
    state
}

fn talk() -> ProjectRecord {
    ProjectRecord {
        name: Some("Talk".to_string()),
        url: Some("https://youtu.be/abc".to_string()),
        has_transcript: true,
        audio_files: vec!["talk.wav".to_string()],
        ..ProjectRecord::new("abc_20250407_204454")
    }
}

fn select(state: AppState, project_id: &str) -> (AppState, RequestId) {
    let (state, effects) = update(
        state,
        Msg::ProjectSelected {
            project_id: project_id.to_string(),
        },
    );
    match effects.as_slice() {
        [Effect::FetchTranscript {
            request,
            project_id: requested,
        }] => {
            assert_eq!(requested, project_id);
            (state, *request)
        }
        other => panic!("expected a FetchTranscript effect, got {other:?}"),
    }
}

#[test]
fn selecting_project_shows_transcript_on_success() {
    app_logging::initialize_for_tests();
    let (state, request) = select(loaded_state(vec![talk()]), "abc_20250407_204454");
    let view = state.view();
    assert!(view.loading_transcript);
    assert_eq!(view.screen, Screen::List);

    let text = "Line one\n\n  indented line two\n".to_string();
    let (state, effects) = update(
        state,
        Msg::TranscriptLoaded {
            request,
            result: Ok(text.clone()),
        },
    );
    assert!(effects.is_empty());

    let view = state.view();
    assert_eq!(view.screen, Screen::Transcript);
    assert!(!view.loading_transcript);
    let transcript = view.transcript.expect("transcript view");
    assert_eq!(transcript.title, "Talk");
    assert_eq!(transcript.text, text);
    assert_eq!(transcript.source_url.as_deref(), Some("https://youtu.be/abc"));
}

#[test]
fn transcript_failure_stays_on_list_with_error() {
    app_logging::initialize_for_tests();
    let (state, request) = select(loaded_state(vec![talk()]), "abc_20250407_204454");
    let (state, _) = update(
        state,
        Msg::TranscriptLoaded {
            request,
            result: Err("404".to_string()),
        },
    );

    let view = state.view();
    assert_eq!(view.screen, Screen::List);
    assert_eq!(view.transcript, None);
    assert_eq!(view.error.as_deref(), Some(LOAD_TRANSCRIPT_FAILED));
}

#[test]
fn empty_transcript_shows_placeholder() {
    let (state, request) = select(loaded_state(vec![talk()]), "abc_20250407_204454");
    let (state, _) = update(
        state,
        Msg::TranscriptLoaded {
            request,
            result: Ok(String::new()),
        },
    );
    assert_eq!(
        state.view().transcript.unwrap().text,
        EMPTY_TRANSCRIPT_MESSAGE
    );
}

#[test]
fn projects_without_transcript_or_unknown_ids_are_not_fetched() {
    let bare = ProjectRecord::new("bare");
    let state = loaded_state(vec![bare]);
    let (state, effects) = update(
        state,
        Msg::ProjectSelected {
            project_id: "bare".to_string(),
        },
    );
    assert!(effects.is_empty());
    let (_state, effects) = update(
        state,
        Msg::ProjectSelected {
            project_id: "missing".to_string(),
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn newer_selection_supersedes_older_transcript_response() {
    let other = ProjectRecord {
        has_transcript: true,
        ..ProjectRecord::new("other_20250101_000000")
    };
    let state = loaded_state(vec![talk(), other]);
    let (state, first) = select(state, "abc_20250407_204454");
    let (state, second) = select(state, "other_20250101_000000");

    let (state, _) = update(
        state,
        Msg::TranscriptLoaded {
            request: first,
            result: Ok("stale text".to_string()),
        },
    );
    assert_eq!(state.view().screen, Screen::List);

    let (state, _) = update(
        state,
        Msg::TranscriptLoaded {
            request: second,
            result: Ok("fresh text".to_string()),
        },
    );
    let transcript = state.view().transcript.unwrap();
    assert_eq!(transcript.project_id, "other_20250101_000000");
    assert_eq!(transcript.text, "fresh text");
}

#[test]
fn open_transcript_keeps_its_label_while_next_one_loads() {
    let other = ProjectRecord {
        name: Some("Other".to_string()),
        has_transcript: true,
        ..ProjectRecord::new("other_20250101_000000")
    };
    let state = loaded_state(vec![talk(), other]);
    let (state, first) = select(state, "abc_20250407_204454");
    let (state, _) = update(
        state,
        Msg::TranscriptLoaded {
            request: first,
            result: Ok("talk text".to_string()),
        },
    );

    let (state, second) = select(state, "other_20250101_000000");
    let view = state.view();
    assert!(view.loading_transcript);
    let shown = view.transcript.unwrap();
    assert_eq!(shown.project_id, "abc_20250407_204454");
    assert_eq!(shown.title, "Talk");
    assert_eq!(shown.text, "talk text");

    let (state, _) = update(
        state,
        Msg::TranscriptLoaded {
            request: second,
            result: Ok("other text".to_string()),
        },
    );
    let shown = state.view().transcript.unwrap();
    assert_eq!(shown.project_id, "other_20250101_000000");
    assert_eq!(shown.title, "Other");
    assert_eq!(shown.text, "other text");
}

#[test]
fn back_to_list_drops_pending_transcript() {
    let (state, request) = select(loaded_state(vec![talk()]), "abc_20250407_204454");
    let (state, _) = update(state, Msg::BackToList);
    let (state, _) = update(
        state,
        Msg::TranscriptLoaded {
            request,
            result: Ok("late".to_string()),
        },
    );
    let view = state.view();
    assert_eq!(view.screen, Screen::List);
    assert!(!view.loading_transcript);
}

#[test]
fn copy_emits_clipboard_effect_and_alert_reports_outcome() {
    let (state, request) = select(loaded_state(vec![talk()]), "abc_20250407_204454");
    let (state, _) = update(
        state,
        Msg::TranscriptLoaded {
            request,
            result: Ok("copy me".to_string()),
        },
    );

    let (state, effects) = update(state, Msg::CopyTranscriptClicked);
    assert_eq!(
        effects,
        vec![Effect::CopyToClipboard {
            text: "copy me".to_string()
        }]
    );

    let before = state.view();
    let (state, _) = update(state, Msg::ClipboardFinished { ok: false });
    let view = state.view();
    assert_eq!(view.alert.as_deref(), Some(COPY_FAILED));
    assert_eq!(view.screen, before.screen);
    assert_eq!(view.transcript, before.transcript);

    let (state, _) = update(state, Msg::AlertDismissed);
    assert_eq!(state.view().alert, None);

    let (state, _) = update(state, Msg::ClipboardFinished { ok: true });
    assert_eq!(state.view().alert.as_deref(), Some(COPY_SUCCEEDED));
}

#[test]
fn copy_on_list_screen_does_nothing() {
    let (_state, effects) = update(loaded_state(vec![talk()]), Msg::CopyTranscriptClicked);
    assert!(effects.is_empty());
}

#[test]
fn downloads_are_delegated_and_reported() {
    let state = loaded_state(vec![talk()]);
    let (state, effects) = update(
        state,
        Msg::DownloadTranscriptClicked {
            project_id: "abc_20250407_204454".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::DownloadTranscript {
            project_id: "abc_20250407_204454".to_string(),
            title: "Talk".to_string(),
        }]
    );

    let (state, effects) = update(
        state,
        Msg::DownloadAudioClicked {
            project_id: "abc_20250407_204454".to_string(),
            filename: "talk.wav".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::DownloadAudio {
            project_id: "abc_20250407_204454".to_string(),
            filename: "talk.wav".to_string(),
        }]
    );

    let (state, effects) = update(
        state,
        Msg::DownloadAudioClicked {
            project_id: "abc_20250407_204454".to_string(),
            filename: "other.wav".to_string(),
        },
    );
    assert!(effects.is_empty());

    let (state, _) = update(
        state,
        Msg::DownloadFinished {
            result: Ok("downloads/talk.wav".to_string()),
        },
    );
    assert_eq!(
        state.view().notice.as_deref(),
        Some("Saved downloads/talk.wav")
    );

    let (state, _) = update(
        state,
        Msg::DownloadFinished {
            result: Err("http status 404".to_string()),
        },
    );
    assert_eq!(state.view().notice.as_deref(), Some(DOWNLOAD_FAILED));
}
