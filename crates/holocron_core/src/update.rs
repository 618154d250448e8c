use holocron_logging::{holo_debug, holo_info};

use crate::{AppState, Effect, Msg};

/// Reason shown while a debounced search is loading.
pub const SEARCH_REASON: &str = "Searching";
/// Reason shown while a previous/next page is loading.
pub const PAGING_REASON: &str = "Loading";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            let url = state.endpoints().default_listing();
            load_page(&mut state, Some(url), None)
        }
        Msg::InputChanged { text, at } => {
            state.debouncer_mut().schedule(text, at);
            Vec::new()
        }
        Msg::Tick { now } => match state.debouncer_mut().poll(now) {
            Some(text) => search(&mut state, text),
            None => Vec::new(),
        },
        Msg::PrevClicked => {
            if state.prev_enabled() {
                let url = state.prev_url().map(ToOwned::to_owned);
                load_page(&mut state, url, Some(PAGING_REASON))
            } else {
                Vec::new()
            }
        }
        Msg::NextClicked => {
            if state.next_enabled() {
                let url = state.next_url().map(ToOwned::to_owned);
                load_page(&mut state, url, Some(PAGING_REASON))
            } else {
                Vec::new()
            }
        }
        Msg::LoadRequested { url, reason } => load_page(&mut state, Some(url), reason.as_deref()),
        Msg::PageLoaded { request_id, page } => {
            if state.is_current(request_id) {
                holo_info!(
                    "Request {} loaded {} result(s)",
                    request_id,
                    page.result_count()
                );
                state.finish_success(page);
            } else {
                holo_debug!("Ignoring late page for superseded request {}", request_id);
            }
            Vec::new()
        }
        Msg::LoadFailed {
            request_id,
            message,
        } => {
            if state.is_current(request_id) {
                holo_info!("Request {} failed: {}", request_id, message);
                state.finish_failure(message);
            } else {
                holo_debug!("Ignoring failure of superseded request {}", request_id);
            }
            Vec::new()
        }
        // The load that superseded this one owns the final state.
        Msg::LoadCancelled { request_id } => {
            holo_debug!("Request {} cancelled", request_id);
            Vec::new()
        }
    };

    (state, effects)
}

fn load_page(state: &mut AppState, url: Option<String>, reason: Option<&str>) -> Vec<Effect> {
    match url {
        Some(url) if !url.is_empty() => state.begin_load(url, reason),
        _ => Vec::new(),
    }
}

fn search(state: &mut AppState, text: String) -> Vec<Effect> {
    if text.trim() == state.last_query().trim() {
        return Vec::new();
    }
    let url = state.endpoints().search_url(&text);
    state.set_last_query(text);
    load_page(state, Some(url), Some(SEARCH_REASON))
}
