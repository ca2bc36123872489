use downloads_core::{update, AppState, Msg};

#[test]
fn noop_and_tick_leave_state_untouched() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);
    assert_eq!(state, next);
    assert!(effects.is_empty());

    let (next, effects) = update(state.clone(), Msg::Tick);
    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn back_to_list_on_fresh_state_has_no_effects() {
    let (_next, effects) = update(AppState::new(), Msg::BackToList);
    assert!(effects.is_empty());
}
