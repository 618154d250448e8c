use holocron_core::{Effect, Msg, PageData, Person};
use holocron_engine::{EngineError, EngineEvent, EngineHandle, PeoplePage, PersonRecord};
use holocron_logging::{holo_debug, holo_info, holo_warn};

/// Executes core effects against the fetch engine and turns engine events
/// back into core messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::CancelFetch { request_id } => {
                    holo_debug!("CancelFetch request_id={}", request_id);
                    self.engine.cancel(request_id);
                }
                Effect::FetchPage { request_id, url } => {
                    holo_info!("FetchPage request_id={} url={}", request_id, url);
                    self.engine.load(request_id, url);
                }
            }
        }
    }

    /// Next engine event as a core message, if one is waiting.
    pub fn poll(&self) -> Result<Option<Msg>, EngineError> {
        Ok(self.engine.try_recv()?.map(map_event))
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::LoadCompleted {
            request_id,
            result: Ok(page),
        } => Msg::PageLoaded {
            request_id,
            page: map_page(page),
        },
        EngineEvent::LoadCompleted {
            request_id,
            result: Err(err),
        } => {
            holo_warn!("Request {} failed ({}): {}", request_id, err.kind, err.message);
            Msg::LoadFailed {
                request_id,
                message: err.message,
            }
        }
        EngineEvent::LoadCancelled { request_id } => Msg::LoadCancelled { request_id },
    }
}

fn map_page(page: PeoplePage) -> PageData {
    PageData {
        results: page
            .results
            .map(|records| records.into_iter().map(map_person).collect()),
        next: page.next,
        previous: page.previous,
    }
}

fn map_person(record: PersonRecord) -> Person {
    Person {
        url: record.url,
        name: record.name,
        birth_year: record.birth_year,
        gender: record.gender,
        height: record.height,
        mass: record.mass,
        films: record.films,
    }
}
