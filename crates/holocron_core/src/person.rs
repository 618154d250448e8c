/// Handle of one issued page load. Allocated by the core, echoed back by the
/// engine on completion.
pub type RequestId = u64;

/// One record of the people directory, as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Person {
    pub url: String,
    pub name: String,
    pub birth_year: String,
    pub gender: String,
    pub height: String,
    pub mass: String,
    pub films: Vec<String>,
}

/// A decoded page of results with its pagination cursors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageData {
    /// `None` when the response carried no `results` field at all.
    pub results: Option<Vec<Person>>,
    pub next: Option<String>,
    pub previous: Option<String>,
}

impl PageData {
    pub fn result_count(&self) -> usize {
        self.results.as_ref().map_or(0, Vec::len)
    }
}
