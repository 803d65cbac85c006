//! Integration tests for the scraping pipeline
//! Serves fixture HTML pages from a local mock server and checks the files
//! written by a full run.

use eduvision_scholarships::config::Config;
use eduvision_scholarships::fetch::HttpFetcher;
use eduvision_scholarships::pipeline;
use eduvision_scholarships::types::ScholarshipRecord;
use mockito::{Matcher, Server, ServerGuard};
use std::fs;
use std::path::Path;

fn fixture(name: &str) -> String {
    fs::read_to_string(Path::new("tests/fixtures").join(name))
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e))
}

fn test_config(server: &ServerGuard, output_dir: &Path) -> Config {
    let mut config = Config {
        base_url: server.url(),
        delay_ms: 0,
        ..Config::default()
    };
    config.http.backoff_factor = 0.0;
    config.http.max_retries = 1;
    config.output.dir = output_dir.to_path_buf();
    config
}

fn mock_listing(server: &mut ServerGuard, page: &str, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/scholarships/")
        .match_query(Matcher::UrlEncoded("page".into(), page.into()))
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(body)
        .create()
}

fn mock_page(server: &mut ServerGuard, path: &str, status: usize, body: &str) -> mockito::Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(body)
        .create()
}

fn read_csv(path: &Path) -> (Vec<String>, Vec<csv::StringRecord>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader.records().map(|r| r.unwrap()).collect();
    (headers, rows)
}

#[test]
fn test_two_page_site_end_to_end() {
    let mut server = Server::new();
    let listing = fixture("listing.html");
    let _page1 = mock_listing(&mut server, "1", &listing);
    let _page2 = mock_listing(&mut server, "2", &listing);
    let _hec = mock_page(&mut server, "/scholarships/hec-need-based", 200, &fixture("detail_bachelor.html"));
    let _punjab = mock_page(&mut server, "/scholarships/punjab-merit-matric", 200, &fixture("detail_matric.html"));

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&server, dir.path());
    let fetcher = HttpFetcher::new(&config.http).unwrap();

    let summary = pipeline::run(&fetcher, &config).unwrap();

    assert_eq!(summary.discovered, 2);
    assert_eq!(summary.scraped, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.bachelors, 1);
    assert_eq!(summary.outputs.len(), 3);

    // JSON: both records, full content included
    let json = fs::read_to_string(config.output.json_path()).unwrap();
    let records: Vec<ScholarshipRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(records.len(), 2);

    let hec = &records[0];
    assert_eq!(hec.url, format!("{}/scholarships/hec-need-based", server.url()));
    assert_eq!(hec.title, "HEC Need Based Scholarship");
    assert_eq!(hec.level, "Bachelor");
    assert_eq!(hec.kind, "Need Based");
    assert_eq!(hec.offered_by, "Higher Education Commission");
    assert_eq!(
        hec.eligibility,
        "Enrolled in a public sector university Family income below Rs. 45,000"
    );
    assert!(hec.deadline.starts_with("15-02-2024"));
    assert_eq!(
        hec.application_link,
        format!("{}/apply/hec-need-based", server.url())
    );
    assert!(hec.full_content.contains("Bachelor of Science students are eligible."));

    let punjab = &records[1];
    assert_eq!(punjab.level, "Matric");
    assert_eq!(punjab.kind, "Merit Based");
    assert_eq!(punjab.deadline, "30 June 2024");

    // All-records CSV
    let (headers, rows) = read_csv(&config.output.csv_path());
    assert_eq!(headers.len(), 12);
    assert_eq!(headers[4], "type");
    assert_eq!(rows.len(), 2);

    // Bachelor's CSV: one row with the parsed deadline
    let (headers, rows) = read_csv(&config.output.bachelors_path());
    assert_eq!(headers.last().map(String::as_str), Some("clean_deadline"));
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "HEC Need Based Scholarship");
    assert_eq!(&rows[0][12], "2024-02-15");
}

#[test]
fn test_failed_detail_page_is_skipped() {
    let mut server = Server::new();
    let listing = fixture("listing.html");
    let _page1 = mock_listing(&mut server, "1", &listing);
    let _page2 = mock_listing(&mut server, "2", &listing);
    let _hec = mock_page(&mut server, "/scholarships/hec-need-based", 404, "not found");
    let _punjab = mock_page(&mut server, "/scholarships/punjab-merit-matric", 200, &fixture("detail_matric.html"));

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&server, dir.path());
    let fetcher = HttpFetcher::new(&config.http).unwrap();

    let summary = pipeline::run(&fetcher, &config).unwrap();

    assert_eq!(summary.discovered, 2);
    assert_eq!(summary.scraped, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.bachelors, 0);

    let (_, rows) = read_csv(&config.output.csv_path());
    assert_eq!(rows.len(), 1);

    // Bachelor's file is still written, header only
    let (headers, rows) = read_csv(&config.output.bachelors_path());
    assert_eq!(headers.len(), 13);
    assert!(rows.is_empty());
}

#[test]
fn test_empty_listing_writes_no_files() {
    let mut server = Server::new();
    let _page1 = mock_listing(&mut server, "1", "<html><body><p>No scholarships yet</p></body></html>");

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&server, dir.path());
    let fetcher = HttpFetcher::new(&config.http).unwrap();

    let summary = pipeline::run(&fetcher, &config).unwrap();

    assert_eq!(summary.discovered, 0);
    assert!(summary.outputs.is_empty());
    assert!(!config.output.json_path().exists());
    assert!(!config.output.csv_path().exists());
    assert!(!config.output.bachelors_path().exists());
}
