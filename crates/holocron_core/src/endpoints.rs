use url::Url;

pub const DEFAULT_API_BASE: &str = "https://swapi.py4e.com/api";

/// Builds request URLs for the people resource of one API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    people: Url,
}

impl Endpoints {
    /// `base` is the API root, e.g. `https://swapi.py4e.com/api`. A trailing
    /// slash is optional.
    pub fn new(base: &str) -> Result<Self, url::ParseError> {
        let root = format!("{}/people/", base.trim().trim_end_matches('/'));
        let people = Url::parse(&root)?;
        Ok(Self { people })
    }

    /// First page of the unfiltered listing.
    pub fn default_listing(&self) -> String {
        let mut url = self.people.clone();
        url.set_query(Some("page=1"));
        url.into()
    }

    /// Maps a raw search input to a request URL. Blank input falls back to
    /// the default listing.
    pub fn search_url(&self, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            return self.default_listing();
        }
        let mut url = self.people.clone();
        url.query_pairs_mut().clear().append_pair("search", query);
        url.into()
    }
}
