use holocron_core::{
    card_html, error_card, escape_html, loading_placeholder, person_id_from_url, render_results,
    Person,
};

fn luke() -> Person {
    Person {
        url: "https://swapi.py4e.com/api/people/1/".to_string(),
        name: "Luke Skywalker".to_string(),
        birth_year: "19BBY".to_string(),
        gender: "male".to_string(),
        height: "172".to_string(),
        mass: "77".to_string(),
        films: vec![
            "https://swapi.py4e.com/api/films/1/".to_string(),
            "https://swapi.py4e.com/api/films/2/".to_string(),
        ],
    }
}

#[test]
fn escapes_all_special_characters() {
    assert_eq!(
        escape_html(r#"Han & "Solo" <3"#),
        "Han &amp; &quot;Solo&quot; &lt;3"
    );
    assert_eq!(escape_html("<a href='x'>"), "&lt;a href=&#039;x&#039;&gt;");
    assert_eq!(escape_html("plain"), "plain");
}

#[test]
fn ampersand_is_escaped_before_other_entities() {
    assert_eq!(escape_html("<&>"), "&lt;&amp;&gt;");
    assert_eq!(escape_html("&lt;"), "&amp;lt;");
}

#[test]
fn extracts_trailing_people_id() {
    assert_eq!(person_id_from_url("https://host/api/people/1/"), "1");
    assert_eq!(person_id_from_url("https://host/api/people/42"), "42");
    assert_eq!(person_id_from_url("https://host/api/planets/1/"), "");
    assert_eq!(person_id_from_url("https://host/api/people/abc/"), "");
    assert_eq!(person_id_from_url("https://host/api/people/"), "");
    assert_eq!(person_id_from_url("https://host/api/people/1//"), "");
    assert_eq!(person_id_from_url(""), "");
}

#[test]
fn card_shows_id_and_fields() {
    let html = card_html(&luke());
    assert!(html.contains(r#"<h5 class="person-name">Luke Skywalker</h5>"#));
    assert!(html.contains("#1</span>"));
    assert!(html.contains("<dd>172 cm</dd>"));
    assert!(html.contains("<dd>77 kg</dd>"));
    assert!(html.contains("<dt>Films</dt><dd>2</dd>"));
    assert!(html.contains("19BBY"));
}

#[test]
fn card_without_id_uses_placeholder_and_escapes_fields() {
    let person = Person {
        url: "not a record url".to_string(),
        name: "<script>alert('x')</script>".to_string(),
        ..Person::default()
    };
    let html = card_html(&person);
    assert!(html.contains("#—</span>"));
    assert!(html.contains("&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"));
    assert!(!html.contains("<script>"));
}

#[test]
fn empty_results_render_single_notice() {
    let expected = r#"<div class="notice">No results.</div>"#;
    assert_eq!(render_results(Some(&[])), expected);
    assert_eq!(render_results(None), expected);
    assert!(!render_results(None).contains("person-card"));
}

#[test]
fn results_render_in_input_order() {
    let mut leia = luke();
    leia.name = "Leia Organa".to_string();
    leia.url = "https://swapi.py4e.com/api/people/5/".to_string();

    let html = render_results(Some(&[luke(), leia]));
    assert_eq!(html.matches("person-card").count(), 2);
    let luke_at = html.find("Luke Skywalker").unwrap();
    let leia_at = html.find("Leia Organa").unwrap();
    assert!(luke_at < leia_at);
}

#[test]
fn placeholder_and_error_fragments() {
    assert!(loading_placeholder().contains("Loading…"));
    assert_eq!(
        error_card("HTTP 500"),
        r#"<div class="notice notice-error">Error loading data (HTTP 500).</div>"#
    );
    assert!(error_card("").contains("(unknown)"));
}

#[test]
fn blank_error_message_falls_back_to_unknown() {
    assert_eq!(
        error_card("  \n"),
        r#"<div class="notice notice-error">Error loading data (unknown).</div>"#
    );
    assert!(error_card("<b>").contains("(&lt;b&gt;)"));
}
