use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Session start: load the default listing.
    Started,
    /// User edited the search input. `at` is when the edit happened.
    InputChanged { text: String, at: Instant },
    /// Clock tick; fires the debounced search once its window has elapsed.
    Tick { now: Instant },
    /// User clicked the previous-page button.
    PrevClicked,
    /// User clicked the next-page button.
    NextClicked,
    /// Direct load of an arbitrary URL, optionally tagged with a reason.
    LoadRequested { url: String, reason: Option<String> },
    /// Engine delivered a decoded page.
    PageLoaded {
        request_id: crate::RequestId,
        page: crate::PageData,
    },
    /// Engine reported an HTTP or transport failure.
    LoadFailed {
        request_id: crate::RequestId,
        message: String,
    },
    /// Engine confirmed a superseded load was aborted.
    LoadCancelled { request_id: crate::RequestId },
}
