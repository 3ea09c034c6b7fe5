//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the rescue sites and exercise
//! fetch, extraction and merge end-to-end.

use flate2::write::GzEncoder;
use flate2::Compression;
use pet_crossref::config::{parse_config, Config};
use pet_crossref::crawler::{crawl, Coordinator};
use pet_crossref::{merge_results, FetchError};
use std::io::Write;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PATTERN_EXTRACTOR: &str = r#"
[source.extractor]
kind = "pattern"
pattern = 'href="([^"]+)">(\d{2,}-\d{5,})<'
"#;

const STRUCTURED_EXTRACTOR: &str = r#"
[source.extractor]
kind = "structured"
"#;

/// Builds one `[[source]]` block for the given site and pages
fn source_block(site: &str, pages: &[&str], extractor: &str) -> String {
    let pages = pages
        .iter()
        .map(|p| format!("\"{}\"", p))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "[[source]]\nsite = \"{}\"\npages = [{}]\n{}\n",
        site, pages, extractor
    )
}

fn create_test_config(blocks: &[String]) -> Config {
    let content = format!("[http]\ntimeout-secs = 5\n\n{}", blocks.concat());
    parse_config(&content).expect("Failed to parse test config")
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn label(server: &MockServer) -> String {
    server.uri().trim_start_matches("http://").to_string()
}

fn petfinder_json(pets: &[(&str, &str)]) -> String {
    let animals = pets
        .iter()
        .map(|(id, link)| {
            format!(
                r#"{{"animal": {{"organization_animal_identifier": "{}", "social_sharing": {{"email_url": "{}"}}}}}}"#,
                id, link
            )
        })
        .collect::<Vec<_>>()
        .join(",");
    format!(r#"{{"result": {{"animals": [{}]}}}}"#, animals)
}

#[tokio::test]
async fn test_one_hit_and_one_empty_site() {
    let site_a = MockServer::start().await;
    let site_b = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pets"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<html><a href="/animals/a1">123-45678</a></html>"#)
                .insert_header("content-type", "text/html"),
        )
        .mount(&site_a)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(petfinder_json(&[])))
        .mount(&site_b)
        .await;

    let config = create_test_config(&[
        source_block(&site_a.uri(), &["/pets"], PATTERN_EXTRACTOR),
        source_block(&site_b.uri(), &["/search"], STRUCTURED_EXTRACTOR),
    ]);

    let report = crawl(&config).await.expect("Crawl failed");

    let mut expected_labels = vec![label(&site_a), label(&site_b)];
    expected_labels.sort();
    assert_eq!(report.site_labels(), expected_labels);
    assert!(report.failures.is_empty());

    assert_eq!(report.pets.len(), 1);
    let entry = &report.pets[0];
    assert_eq!(entry.id, "123-45678");
    assert_eq!(entry.presence_count, 1);

    let a_column = expected_labels
        .iter()
        .position(|l| *l == label(&site_a))
        .unwrap();
    assert_eq!(entry.links[a_column], format!("{}/animals/a1", site_a.uri()));
    assert_eq!(entry.links[1 - a_column], "");
}

#[tokio::test]
async fn test_pet_on_every_site_ranks_last() {
    let mut servers = Vec::new();
    let mut blocks = Vec::new();

    for _ in 0..3 {
        let server = MockServer::start().await;
        let shared = format!("{}/pets/shared", server.uri());
        let body = petfinder_json(&[("12-00001", shared.as_str()), ("12-00002", "")]);
        Mock::given(method("GET"))
            .and(path("/api"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
        blocks.push(source_block(&server.uri(), &["/api"], STRUCTURED_EXTRACTOR));
        servers.push(server);
    }

    // only the first site lists the third pet
    Mock::given(method("GET"))
        .and(path("/extra"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(petfinder_json(&[("12-00003", "/p/3")])),
        )
        .mount(&servers[0])
        .await;
    blocks.push(source_block(&servers[0].uri(), &["/extra"], STRUCTURED_EXTRACTOR));

    let config = create_test_config(&blocks);
    let coordinator = Coordinator::new(&config).unwrap();
    let results = coordinator.run().await;
    assert!(results.iter().all(|r| r.is_success()));

    let report = merge_results(&results, chrono::Local::now());
    assert_eq!(report.sites.len(), 3);

    let ids: Vec<&str> = report.pets.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["12-00003", "12-00001", "12-00002"]);
    assert_eq!(report.pets[0].presence_count, 1);
    assert_eq!(report.pets[1].presence_count, 3);
    assert_eq!(report.pets[2].presence_count, 3);
    // a pet listed without a link still counts, pointing at the site itself
    assert!(report.pets[2].links.iter().all(|l| l.starts_with("http://")));
}

#[tokio::test]
async fn test_failing_sources_do_not_stop_others() {
    let good = MockServer::start().await;
    let broken = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pets"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<a href="/p/1">10-00001</a><a href="/p/2">10-00002</a>"#),
        )
        .mount(&good)
        .await;

    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&broken)
        .await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&broken)
        .await;

    Mock::given(method("GET"))
        .and(path("/gz"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-encoding", "gzip")
                .set_body_bytes(b"not really gzip".to_vec()),
        )
        .mount(&broken)
        .await;

    let config = create_test_config(&[
        source_block(&good.uri(), &["/pets"], PATTERN_EXTRACTOR),
        source_block(&broken.uri(), &["/down", "/missing"], PATTERN_EXTRACTOR),
        source_block(&broken.uri(), &["/json"], STRUCTURED_EXTRACTOR),
        source_block(&broken.uri(), &["/gz"], PATTERN_EXTRACTOR),
    ]);

    let results = Coordinator::new(&config).unwrap().run().await;
    assert_eq!(results.len(), 5);

    assert!(results[0].is_success());
    assert!(matches!(
        results[1].outcome,
        Err(FetchError::Status { status: 500, .. })
    ));
    assert!(matches!(
        results[2].outcome,
        Err(FetchError::Status { status: 404, .. })
    ));
    assert!(matches!(
        results[3].outcome,
        Err(FetchError::Extraction { .. })
    ));
    assert!(matches!(results[4].outcome, Err(FetchError::Decode { .. })));

    let report = merge_results(&results, chrono::Local::now());
    assert_eq!(report.sites.len(), 2);
    assert_eq!(report.pets.len(), 2);
    assert_eq!(report.failures.len(), 4);
    assert!(report.failures[0].url.ends_with("/down"));
}

#[tokio::test]
async fn test_slow_source_times_out_without_blocking_others() {
    let fast = MockServer::start().await;
    let slow = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pets"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"<a href="/p/1">10-00001</a>"#))
        .mount(&fast)
        .await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<a href="/p/1">10-00001</a>"#)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&slow)
        .await;

    let content = format!(
        "[http]\ntimeout-secs = 1\n\n{}{}",
        source_block(&fast.uri(), &["/pets"], PATTERN_EXTRACTOR),
        source_block(&slow.uri(), &["/slow"], PATTERN_EXTRACTOR),
    );
    let config = parse_config(&content).expect("Failed to parse test config");

    let results = Coordinator::new(&config).unwrap().run().await;
    assert_eq!(results.len(), 2);
    assert!(results[0].is_success());
    match &results[1].outcome {
        Err(FetchError::Timeout { url }) => assert!(url.ends_with("/slow")),
        other => panic!("expected timeout, got {:?}", other),
    }

    let report = merge_results(&results, chrono::Local::now());
    assert_eq!(report.pets.len(), 1);
    assert_eq!(report.pets[0].presence_count, 1);
    assert_eq!(report.failures.len(), 1);
}

#[tokio::test]
async fn test_gzip_body_is_inflated() {
    let server = MockServer::start().await;
    let body = petfinder_json(&[("20-12345", "https://example.org/pets/1")]);

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-encoding", "gzip")
                .insert_header("content-type", "application/json")
                .set_body_bytes(gzip(body.as_bytes())),
        )
        .mount(&server)
        .await;

    let config = create_test_config(&[source_block(
        &server.uri(),
        &["/search"],
        STRUCTURED_EXTRACTOR,
    )]);

    let results = Coordinator::new(&config).unwrap().run().await;
    let pets = results[0].pets().expect("gzip source should succeed");
    assert_eq!(
        pets.get("20-12345").map(String::as_str),
        Some("https://example.org/pets/1")
    );
}

#[tokio::test]
async fn test_source_headers_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(header("x-requested-with", "XMLHttpRequest"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(petfinder_json(&[("30-00001", "/p/1")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let block = format!(
        "[[source]]\nsite = \"{}\"\npages = [\"/search\"]\nheaders = {{ X-Requested-With = \"XMLHttpRequest\" }}\n{}\n",
        server.uri(),
        STRUCTURED_EXTRACTOR
    );
    let config = create_test_config(&[block]);

    let results = Coordinator::new(&config).unwrap().run().await;
    assert!(results[0].is_success(), "{:?}", results[0].outcome);
    assert_eq!(results[0].pets().unwrap().len(), 1);
}

#[tokio::test]
async fn test_pages_of_one_site_merge_into_one_column() {
    let server = MockServer::start().await;

    for (page, body) in [
        ("/page0", r#"<a href="/a/1">40-00001</a><a href="/old">40-00002</a>"#),
        ("/page1", r#"<a href="/a/3">40-00003</a>"#),
        ("/page2", r#"<a href="/new">40-00002</a>"#),
    ] {
        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
    }

    let config = create_test_config(&[source_block(
        &server.uri(),
        &["/page0", "/page1", "/page2"],
        PATTERN_EXTRACTOR,
    )]);

    let report = crawl(&config).await.unwrap();

    assert_eq!(report.site_labels(), vec![label(&server)]);
    assert_eq!(report.pets.len(), 3);
    assert_eq!(
        report.entry("40-00002").unwrap().links,
        vec![format!("{}/new", server.uri())]
    );
}
