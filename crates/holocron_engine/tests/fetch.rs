use std::time::Duration;

use holocron_engine::{FailureKind, FetchSettings, Fetcher, PersonRecord, ReqwestFetcher};
use pretty_assertions::assert_eq;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE_JSON: &str = r#"{
  "count": 82,
  "next": "https://swapi.py4e.com/api/people/?page=2",
  "previous": null,
  "results": [
    {
      "name": "Luke Skywalker",
      "height": "172",
      "mass": "77",
      "birth_year": "19BBY",
      "gender": "male",
      "films": ["https://swapi.py4e.com/api/films/1/"],
      "url": "https://swapi.py4e.com/api/people/1/"
    }
  ]
}"#;

fn fetcher() -> ReqwestFetcher {
    ReqwestFetcher::new(FetchSettings::default()).expect("client")
}

#[tokio::test]
async fn fetches_and_decodes_page_with_json_accept_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/people/"))
        .and(query_param("page", "1"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE_JSON, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/api/people/?page=1", server.uri());
    let page = fetcher().fetch_page(&url).await.expect("fetch ok");

    assert_eq!(
        page.next.as_deref(),
        Some("https://swapi.py4e.com/api/people/?page=2")
    );
    assert_eq!(page.previous, None);
    assert_eq!(
        page.results,
        Some(vec![PersonRecord {
            url: "https://swapi.py4e.com/api/people/1/".to_string(),
            name: "Luke Skywalker".to_string(),
            birth_year: "19BBY".to_string(),
            gender: "male".to_string(),
            height: "172".to_string(),
            mass: "77".to_string(),
            films: vec!["https://swapi.py4e.com/api/films/1/".to_string()],
        }])
    );
}

#[tokio::test]
async fn missing_fields_decode_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/people/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"results":[{"name":"R2-D2"}]}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let url = format!("{}/api/people/?search=r2", server.uri());
    let page = fetcher().fetch_page(&url).await.expect("fetch ok");
    let results = page.results.expect("results");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "R2-D2");
    assert_eq!(results[0].url, "");
    assert!(results[0].films.is_empty());
    assert_eq!(page.next, None);
}

#[tokio::test]
async fn null_and_non_string_fields_do_not_fail_the_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/people/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"results":[
                {"name":"Luke","films":null},
                {"name":null,"height":172,"mass":77.5,"gender":true},
                {"name":"BB-8","films":["a",3,null]}
            ]}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let url = format!("{}/api/people/?page=1", server.uri());
    let page = fetcher().fetch_page(&url).await.expect("fetch ok");
    let results = page.results.expect("results");

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].name, "Luke");
    assert!(results[0].films.is_empty());
    assert_eq!(results[1].name, "");
    assert_eq!(results[1].height, "172");
    assert_eq!(results[1].mass, "77.5");
    assert_eq!(results[1].gender, "true");
    assert_eq!(results[2].films, vec!["a", "3", ""]);
}

#[tokio::test]
async fn absent_results_field_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"next":null}"#, "application/json"))
        .mount(&server)
        .await;

    let page = fetcher().fetch_page(&server.uri()).await.expect("fetch ok");
    assert_eq!(page.results, None);
}

#[tokio::test]
async fn non_success_status_reports_http_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/api/people/?page=99", server.uri());
    let err = fetcher().fetch_page(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert_eq!(err.message, "HTTP 404");
    assert_eq!(err.to_string(), "HTTP 404");
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"))
        .mount(&server)
        .await;

    let err = fetcher().fetch_page(&server.uri()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
    assert!(err.message.starts_with("invalid JSON"));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE_JSON, "application/json"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 16,
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings).expect("client");
    let err = fetcher.fetch_page(&server.uri()).await.unwrap_err();
    assert!(matches!(
        err.kind,
        FailureKind::TooLarge { max_bytes: 16, .. }
    ));
}

#[tokio::test]
async fn request_timeout_applies_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(300))
                .set_body_raw(PAGE_JSON, "application/json"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings).expect("client");
    let err = fetcher.fetch_page(&server.uri()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn unreachable_host_is_a_network_failure() {
    // Bind then drop a listener so the port is known to be closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let url = format!("http://127.0.0.1:{port}/api/people/?page=1");

    let err = fetcher().fetch_page(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
    assert!(!err.message.is_empty());
}

#[tokio::test]
async fn invalid_url_is_rejected_before_sending() {
    let err = fetcher().fetch_page("not a url").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
