use httpmock::prelude::*;
use page_inspect::{FetchError, InspectError, Inspector, InspectorConfig, OutputFormat, render};
use std::time::Duration;

const PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <title>Mock Home</title>
    <meta name="description" content="A page served by the mock server.">
    <link rel="stylesheet" href="/style.css">
</head>
<body>
    <h1>Home</h1>
    <h2>Links</h2>
    <p><a href="/about">About</a> <a href="/contact#form">Contact</a> <a href="/about">About</a></p>
    <p><a href="https://external.example.org/">Elsewhere</a> <a href="#top">Top</a>
       <a href="javascript:void(0)">Nothing</a></p>
</body>
</html>"##;

#[tokio::test]
async fn test_inspect_full_pipeline() {
    let server = MockServer::start_async().await;
    let page_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200)
                .header("Content-Type", "text/html; charset=utf-8")
                .header("Cache-Control", "max-age=60")
                .body(PAGE);
        })
        .await;

    let report = Inspector::new(server.url("/")).inspect().await.unwrap();
    page_mock.assert_async().await;

    assert_eq!(report.status, 200);
    assert_eq!(report.title.as_deref(), Some("Mock Home"));
    assert_eq!(
        report.description.as_deref(),
        Some("A page served by the mock server.")
    );
    assert_eq!(report.language.as_deref(), Some("en"));
    assert_eq!(report.headings.len(), 2);
    assert_eq!(
        report.internal_links,
        vec![server.url("/about"), server.url("/contact")]
    );
    assert_eq!(report.external_links, vec!["https://external.example.org/"]);
    assert_eq!(report.performance.page_size, PAGE.len());
    assert_eq!(report.performance.resources.stylesheets, 1);
    assert_eq!(
        report.performance.compression.cache_control.as_deref(),
        Some("max-age=60")
    );

    let text = render::render(&report, OutputFormat::Text).unwrap();
    assert!(text.contains("Title:         Mock Home"));
    assert!(text.contains("External Links (1):"));
}

#[tokio::test]
async fn test_non_2xx_is_fetch_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("<html><title>Not found</title></html>");
        })
        .await;

    let err = Inspector::new(server.url("/missing"))
        .inspect()
        .await
        .unwrap_err();
    match err {
        InspectError::Fetch(FetchError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_is_fetch_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(503);
        })
        .await;

    let err = Inspector::new(server.url("/")).inspect().await.unwrap_err();
    assert!(matches!(
        err,
        InspectError::Fetch(FetchError::Status { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_unreachable_host() {
    // Nothing listens on port 1
    let err = Inspector::new("http://127.0.0.1:1/")
        .with_timeout(5)
        .inspect()
        .await
        .unwrap_err();
    match err {
        InspectError::Fetch(fetch) => assert!(fetch.is_unreachable()),
        other => panic!("expected fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/slow");
            then.status(200)
                .delay(Duration::from_secs(3))
                .body("<html></html>");
        })
        .await;

    let err = Inspector::new(server.url("/slow"))
        .with_timeout(1)
        .inspect()
        .await
        .unwrap_err();
    assert!(matches!(err, InspectError::Fetch(FetchError::Timeout { .. })));
}

#[tokio::test]
async fn test_empty_body_gives_empty_report() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/empty");
            then.status(200).header("Content-Type", "text/html");
        })
        .await;

    let report = Inspector::new(server.url("/empty")).inspect().await.unwrap();
    assert_eq!(report.title, None);
    assert_eq!(report.description, None);
    assert!(report.headings.is_empty());
    assert!(report.internal_links.is_empty());
    assert!(report.external_links.is_empty());
    assert_eq!(report.performance.page_size, 0);
}

#[tokio::test]
async fn test_plain_text_is_parsed_best_effort() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/notes.txt");
            then.status(200)
                .header("Content-Type", "text/plain")
                .body("<title>Notes</title><a href=\"/index\">Index</a>");
        })
        .await;

    let report = Inspector::new(server.url("/notes.txt"))
        .inspect()
        .await
        .unwrap();
    assert_eq!(report.title.as_deref(), Some("Notes"));
    assert_eq!(report.internal_links, vec![server.url("/index")]);
}

#[tokio::test]
async fn test_binary_content_is_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/logo.png");
            then.status(200)
                .header("Content-Type", "image/png")
                .body(vec![0x89, b'P', b'N', b'G']);
        })
        .await;

    let err = Inspector::new(server.url("/logo.png"))
        .inspect()
        .await
        .unwrap_err();
    match err {
        InspectError::Parse { content_type } => assert_eq!(content_type, "image/png"),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_response_too_large() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/big");
            then.status(200)
                .header("Content-Type", "text/html")
                .body("x".repeat(200));
        })
        .await;

    let config = InspectorConfig {
        max_response_bytes: 100,
        ..InspectorConfig::default()
    };
    let err = Inspector::new(server.url("/big"))
        .with_config(config)
        .inspect()
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InspectError::Fetch(FetchError::TooLarge { limit: 100, .. })
    ));
}

#[tokio::test]
async fn test_redirect_is_followed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/old");
            then.status(301).header("Location", server.url("/new/"));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/new/");
            then.status(200)
                .header("Content-Type", "text/html")
                .body(r#"<a href="child">Child</a>"#);
        })
        .await;

    let report = Inspector::new(server.url("/old")).inspect().await.unwrap();
    assert_eq!(report.url, server.url("/old"));
    assert_eq!(report.final_url, server.url("/new/"));
    assert_eq!(report.internal_links, vec![server.url("/new/child")]);
}

#[tokio::test]
async fn test_exclude_patterns_from_config() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200)
                .header("Content-Type", "text/html")
                .body(PAGE);
        })
        .await;

    let report = Inspector::new(server.url("/"))
        .with_config_str(r#"{"exclude_patterns": ["/contact", "external\\.example"]}"#)
        .unwrap()
        .inspect()
        .await
        .unwrap();
    assert_eq!(report.internal_links, vec![server.url("/about")]);
    assert!(report.external_links.is_empty());
}

#[tokio::test]
async fn test_invalid_inputs_fail_before_fetching() {
    let err = Inspector::new("ftp://example.com/")
        .inspect()
        .await
        .unwrap_err();
    assert!(matches!(err, InspectError::Fetch(FetchError::InvalidUrl { .. })));

    let err = Inspector::new("https://example.com/")
        .with_exclude_pattern("(unclosed")
        .inspect()
        .await
        .unwrap_err();
    assert!(matches!(err, InspectError::Pattern(_)));
    assert!(err.is_config());
}
