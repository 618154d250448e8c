//! Holocron engine: HTTP IO for page loads, with single-flight cancellation.
mod engine;
mod fetch;
mod types;

pub use engine::EngineHandle;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use types::{
    EngineError, EngineEvent, FailureKind, FetchError, PeoplePage, PersonRecord, RequestId,
};
