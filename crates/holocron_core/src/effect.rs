use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Abort a superseded load. Its completion must not be reported as a result.
    CancelFetch { request_id: RequestId },
    /// GET `url` as JSON, bound to a fresh cancellation token.
    FetchPage { request_id: RequestId, url: String },
}
