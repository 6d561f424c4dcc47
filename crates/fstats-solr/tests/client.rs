//! HTTP-level tests for `SolrClient` against the in-process mock server.

// Integration tests live outside cfg(test)
#![allow(clippy::tests_outside_test_module)]

use std::{thread, time::Duration};

use fstats_solr::{
    ClientOptions, Endpoint, Filter, IndexQuery, QueryFailureKind, ResultFormat, SolrClient,
    mock::{MockCollection, MockResponse, MockSolr},
};

/// Client for `collection` on the mock server, bypassing any proxy configured in the
/// environment.
fn client_for(server: &MockSolr, collection: &str) -> SolrClient {
    SolrClient::new(
        server.endpoint(),
        collection,
        ClientOptions {
            timeout: Duration::from_secs(5),
            system_proxy: false,
        },
    )
    .unwrap()
}

fn books() -> MockCollection {
    MockCollection::new("books")
        .schema_fields(&["id", "title"])
        .used_fields(&["title", "author"])
        .total(10)
        .present("id", 10)
        .present("title", 8)
}

#[test]
fn schema_fields_come_from_schema_handler() {
    let server = MockSolr::with_collection(books());
    let client = client_for(&server, "books");

    assert_eq!(client.schema_fields().unwrap(), vec!["id", "title"]);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/solr/books/schema");
    assert_eq!(requests[0].param("wt"), Some("json"));
}

#[test]
fn used_fields_come_from_csv_header() {
    let server = MockSolr::with_collection(books());
    let client = client_for(&server, "books");

    assert_eq!(client.used_fields().unwrap(), vec!["title", "author"]);

    let requests = server.requests();
    assert_eq!(requests[0].param("q"), Some("*:*"));
    assert_eq!(requests[0].param("rows"), Some("0"));
    assert_eq!(requests[0].param("wt"), Some("csv"));
}

#[test]
fn count_sends_filter_as_query() {
    let server = MockSolr::with_collection(books());
    let client = client_for(&server, "books");

    assert_eq!(client.count(&Filter::All).unwrap(), 10);
    assert_eq!(client.count(&Filter::exists("title")).unwrap(), 8);
    assert_eq!(client.count(&Filter::missing("title")).unwrap(), 2);

    let queries: Vec<_> = server
        .requests()
        .iter()
        .map(|r| r.param("q").unwrap_or_default().to_string())
        .collect();
    assert_eq!(queries, vec!["*:*", "title:*", "-title:*"]);
}

#[test]
fn raw_query_returns_body() {
    let server = MockSolr::with_collection(books());
    let client = client_for(&server, "books");

    let body = client.query(&Filter::All, ResultFormat::Csv).unwrap();
    assert_eq!(body, "title,author\n");
}

#[test]
fn non_success_status_is_query_failure() {
    let server = MockSolr::with_collection(books());
    let client = client_for(&server, "films");

    let err = client.schema_fields().unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.collection, "films");
    assert_eq!(err.endpoint, server.endpoint().as_str());
    assert!(err.request.ends_with("/solr/films/schema?wt=json"));
    let display = err.to_string();
    assert!(display.contains("404"));
    assert!(display.contains("Not Found"));
}

#[test]
fn empty_error_body_is_reported_as_absent() {
    let server = MockSolr::start(|_| MockResponse::status(500, ""));
    let client = client_for(&server, "books");

    let err = client.count(&Filter::All).unwrap_err();

    match err.kind {
        QueryFailureKind::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, None);
        }
        other => panic!("unexpected failure kind: {other:?}"),
    }
}

#[test]
fn schema_without_fields_is_query_failure() {
    let server = MockSolr::start(|_| MockResponse::ok(r#"{"schema":{"name":"books"}}"#));
    let client = client_for(&server, "books");

    let err = client.schema_fields().unwrap_err();

    assert!(matches!(
        err.kind,
        QueryFailureKind::UnexpectedResponse { .. }
    ));
    assert!(err.to_string().contains(r#"{\"schema\":{\"name\":\"books\"}}"#));
}

#[test]
fn multi_line_csv_is_query_failure() {
    let server = MockSolr::start(|_| MockResponse::ok("id,title\n1,Dune\n"));
    let client = client_for(&server, "books");

    let err = client.used_fields().unwrap_err();

    match err.kind {
        QueryFailureKind::UnexpectedResponse { body, .. } => {
            assert_eq!(body, "id,title\n1,Dune\n");
        }
        other => panic!("unexpected failure kind: {other:?}"),
    }
}

#[test]
fn missing_num_found_is_query_failure() {
    let server = MockSolr::start(|_| MockResponse::ok(r#"{"response":{"docs":[]}}"#));
    let client = client_for(&server, "books");

    let err = client.count(&Filter::exists("title")).unwrap_err();

    assert!(matches!(
        err.kind,
        QueryFailureKind::UnexpectedResponse { .. }
    ));
    assert!(err.request.contains("q=title%3A*"));
}

#[test]
fn connection_refused_is_query_failure() {
    // Bind then drop a server so the port is known to be closed.
    let server = MockSolr::start(|_| MockResponse::ok(""));
    let endpoint = server.endpoint();
    drop(server);

    let client = SolrClient::new(
        endpoint,
        "books",
        ClientOptions {
            timeout: Duration::from_secs(5),
            system_proxy: false,
        },
    )
    .unwrap();

    let err = client.count(&Filter::All).unwrap_err();

    assert!(matches!(
        err.kind,
        QueryFailureKind::Transport { .. } | QueryFailureKind::Timeout { .. }
    ));
    assert_eq!(err.status(), None);
}

#[test]
fn mixed_case_scheme_matches_request_url() {
    let server = MockSolr::with_collection(books());
    let endpoint = Endpoint::new(&format!("HTTP://{}", server.host()), Some(server.port()));
    let client = SolrClient::new(
        endpoint,
        "films",
        ClientOptions {
            timeout: Duration::from_secs(5),
            system_proxy: false,
        },
    )
    .unwrap();

    let err = client.schema_fields().unwrap_err();

    assert!(err.endpoint.starts_with("http://"));
    assert!(err.request.starts_with(&err.endpoint));
    assert_eq!(err.status(), Some(404));
}

#[test]
fn slow_response_is_timeout_failure() {
    let server = MockSolr::start(|_| {
        thread::sleep(Duration::from_secs(3));
        MockResponse::ok("")
    });
    let client = SolrClient::new(
        server.endpoint(),
        "books",
        ClientOptions {
            timeout: Duration::from_secs(1),
            system_proxy: false,
        },
    )
    .unwrap();

    let err = client.count(&Filter::All).unwrap_err();

    assert!(matches!(
        err.kind,
        QueryFailureKind::Timeout { timeout } if timeout == Duration::from_secs(1)
    ));
    assert_eq!(err.collection, "books");
    assert_eq!(
        err.request,
        format!("{}books/select?q=*%3A*&rows=0&wt=json", server.endpoint())
    );
}
