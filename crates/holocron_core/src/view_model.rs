use crate::{LoadOutcome, LoadPhase};

/// Everything a front end needs to draw the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageViewModel {
    pub phase: LoadPhase,
    pub current_url: String,
    pub status: String,
    /// Markup for the results container. Record fields are already escaped.
    pub results_html: String,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    /// How the last settled load ended; `None` until the first one settles.
    pub last_outcome: Option<LoadOutcome>,
}
