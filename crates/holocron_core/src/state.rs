use std::time::Duration;

use crate::render;
use crate::view_model::PageViewModel;
use crate::{Debouncer, Effect, Endpoints, PageData, RequestId, DEFAULT_QUIET_WINDOW};

const LOADING_STATUS: &str = "Loading…";
const FAILED_STATUS: &str = "Could not load the API.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading { request_id: RequestId },
}

/// How the most recent load cycle that reached the view ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Success { count: usize },
    Failed { message: String },
}

/// The page state of one browsing session.
///
/// Owned by whoever drives [`crate::update`]; nothing else mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    endpoints: Endpoints,
    debouncer: Debouncer<String>,
    current_url: String,
    next_url: Option<String>,
    prev_url: Option<String>,
    last_query: String,
    in_flight: Option<RequestId>,
    next_request_id: RequestId,
    status: String,
    results_html: String,
    last_outcome: Option<LoadOutcome>,
    dirty: bool,
}

impl AppState {
    pub fn new(endpoints: Endpoints) -> Self {
        Self::with_quiet_window(endpoints, DEFAULT_QUIET_WINDOW)
    }

    pub fn with_quiet_window(endpoints: Endpoints, quiet: Duration) -> Self {
        let current_url = endpoints.default_listing();
        Self {
            endpoints,
            debouncer: Debouncer::new(quiet),
            current_url,
            next_url: None,
            prev_url: None,
            last_query: String::new(),
            in_flight: None,
            next_request_id: 1,
            status: String::new(),
            results_html: String::new(),
            last_outcome: None,
            dirty: false,
        }
    }

    pub fn view(&self) -> PageViewModel {
        PageViewModel {
            phase: self.phase(),
            current_url: self.current_url.clone(),
            status: self.status.clone(),
            results_html: self.results_html.clone(),
            prev_enabled: self.prev_enabled(),
            next_enabled: self.next_enabled(),
            last_outcome: self.last_outcome.clone(),
        }
    }

    /// The previous-page button is live only with a cursor and no load running.
    pub fn prev_enabled(&self) -> bool {
        self.prev_url.is_some() && self.in_flight.is_none()
    }

    pub fn next_enabled(&self) -> bool {
        self.next_url.is_some() && self.in_flight.is_none()
    }

    pub fn phase(&self) -> LoadPhase {
        match self.in_flight {
            Some(request_id) => LoadPhase::Loading { request_id },
            None => LoadPhase::Idle,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    pub fn next_url(&self) -> Option<&str> {
        self.next_url.as_deref()
    }

    pub fn prev_url(&self) -> Option<&str> {
        self.prev_url.as_deref()
    }

    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    /// Whether a debounced search is still waiting for its quiet window.
    pub fn has_pending_search(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn debouncer_mut(&mut self) -> &mut Debouncer<String> {
        &mut self.debouncer
    }

    pub(crate) fn set_last_query(&mut self, query: String) {
        self.last_query = query;
    }

    /// Starts a load of `url`, superseding any load still in flight.
    pub(crate) fn begin_load(&mut self, url: String, reason: Option<&str>) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(2);
        if let Some(superseded) = self.in_flight.take() {
            effects.push(Effect::CancelFetch {
                request_id: superseded,
            });
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight = Some(request_id);

        self.current_url = url.clone();
        self.status = match reason {
            Some(reason) => format!("{reason}…"),
            None => LOADING_STATUS.to_string(),
        };
        self.results_html = render::loading_placeholder();
        self.dirty = true;

        effects.push(Effect::FetchPage { request_id, url });
        effects
    }

    pub(crate) fn is_current(&self, request_id: RequestId) -> bool {
        self.in_flight == Some(request_id)
    }

    pub(crate) fn finish_success(&mut self, page: PageData) {
        let count = page.result_count();
        self.next_url = page.next;
        self.prev_url = page.previous;
        self.results_html = render::render_results(page.results.as_deref());
        self.status = format!("Showing {count} characters.");
        self.last_outcome = Some(LoadOutcome::Success { count });
        self.finish();
    }

    pub(crate) fn finish_failure(&mut self, message: String) {
        self.next_url = None;
        self.prev_url = None;
        self.results_html = render::error_card(&message);
        self.status = FAILED_STATUS.to_string();
        self.last_outcome = Some(LoadOutcome::Failed { message });
        self.finish();
    }

    fn finish(&mut self) {
        self.in_flight = None;
        self.dirty = true;
    }
}
