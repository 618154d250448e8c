//! HTML fragments for the results container.
//!
//! Every value that comes from the API is untrusted and goes through
//! [`escape_html`] before it is interpolated.

use crate::Person;

const ID_PLACEHOLDER: &str = "—";

/// Escapes the five HTML-significant characters. `&` is replaced first so
/// the entities produced by later replacements are not escaped again.
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Extracts the numeric id from a record URL ending in `/people/<digits>/`.
/// The trailing slash is optional. Returns an empty string when the URL does
/// not end in that shape.
pub fn person_id_from_url(url: &str) -> &str {
    let path = url.strip_suffix('/').unwrap_or(url);
    let Some((head, digits)) = path.rsplit_once('/') else {
        return "";
    };
    let numeric = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());
    if numeric && head.ends_with("/people") {
        digits
    } else {
        ""
    }
}

pub fn card_html(person: &Person) -> String {
    let id = match person_id_from_url(&person.url) {
        "" => ID_PLACEHOLDER,
        id => id,
    };
    format!(
        r#"
<article class="person-card">
  <header>
    <h5 class="person-name">{name}</h5>
    <span class="person-id">#{id}</span>
  </header>
  <p class="person-born">{birth_year}</p>
  <dl class="person-facts">
    <dt>Gender</dt><dd>{gender}</dd>
    <dt>Height</dt><dd>{height} cm</dd>
    <dt>Mass</dt><dd>{mass} kg</dd>
    <dt>Films</dt><dd>{films}</dd>
  </dl>
</article>
"#,
        name = escape_html(&person.name),
        id = escape_html(id),
        birth_year = escape_html(&person.birth_year),
        gender = escape_html(&person.gender),
        height = escape_html(&person.height),
        mass = escape_html(&person.mass),
        films = person.films.len(),
    )
}

/// One card per record in input order, or a single notice when there is
/// nothing to show.
pub fn render_results(people: Option<&[Person]>) -> String {
    match people {
        Some(people) if !people.is_empty() => people.iter().map(card_html).collect(),
        _ => notice("No results."),
    }
}

pub fn loading_placeholder() -> String {
    notice("Loading…")
}

/// Error notice for a failed load. A blank message is shown as "unknown".
pub fn error_card(message: &str) -> String {
    let message = if message.trim().is_empty() {
        "unknown"
    } else {
        message
    };
    format!(
        r#"<div class="notice notice-error">Error loading data ({}).</div>"#,
        escape_html(message)
    )
}

fn notice(text: &str) -> String {
    format!(r#"<div class="notice">{text}</div>"#)
}
