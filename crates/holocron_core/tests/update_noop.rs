use std::time::Instant;

use holocron_core::{update, AppState, Endpoints, Msg, DEFAULT_API_BASE};

#[test]
fn tick_without_pending_search_is_noop() {
    let state = AppState::new(Endpoints::new(DEFAULT_API_BASE).unwrap());
    let (next, effects) = update(state.clone(), Msg::Tick { now: Instant::now() });

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn cancellation_without_load_is_noop() {
    let state = AppState::new(Endpoints::new(DEFAULT_API_BASE).unwrap());
    let (next, effects) = update(state.clone(), Msg::LoadCancelled { request_id: 7 });

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
