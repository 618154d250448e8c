//! Holocron core: pure search/pagination state machine and view rendering.
mod debounce;
mod effect;
mod endpoints;
mod msg;
mod person;
mod render;
mod state;
mod update;
mod view_model;

pub use debounce::{Debouncer, DEFAULT_QUIET_WINDOW};
pub use effect::Effect;
pub use endpoints::{Endpoints, DEFAULT_API_BASE};
pub use msg::Msg;
pub use person::{PageData, Person, RequestId};
pub use render::{
    card_html, error_card, escape_html, loading_placeholder, person_id_from_url, render_results,
};
pub use state::{AppState, LoadOutcome, LoadPhase};
pub use update::{update, PAGING_REASON, SEARCH_REASON};
pub use view_model::PageViewModel;
