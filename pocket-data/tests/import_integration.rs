//! Imports the on-disk fixture through the real HTTP client into a mock
//! contact book server.

use std::fs::File;
use std::path::{Path, PathBuf};

use pocket_core::contacts::{ApiConfig, ContactRepository, InMemoryContactRepository};
use pocket_data::{ContactImportError, ContactImporter};
use pocket_http::HttpContactRepository;
use pretty_assertions::assert_eq;

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("contacts.csv")
}

#[test]
fn fixture_parses_in_file_order() {
    let file = File::open(fixture_path()).expect("fixture should open");

    let records = ContactImporter::parse(file).expect("fixture should parse");

    let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Ada Lovelace", "Grace Hopper", "Katherine Johnson"]);
    assert_eq!(records[2].phone, "555-0102");
}

#[tokio::test]
async fn fixture_loads_into_memory_book() {
    let repo = InMemoryContactRepository::new();
    let records = ContactImporter::parse(File::open(fixture_path()).unwrap()).unwrap();

    let added = ContactImporter::load(&repo, &records).await.unwrap();

    assert_eq!(added, 3);
    assert_eq!(repo.list_contacts().await.unwrap().len(), 3);
}

#[tokio::test]
async fn fixture_loads_through_http_client() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/controller/add-contact/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("1"))
        .expect(3)
        .mount(&server)
        .await;

    let config = ApiConfig {
        root_url: server.uri(),
        ..ApiConfig::default()
    };
    let repo = HttpContactRepository::new(&config).unwrap();
    let records = ContactImporter::parse(File::open(fixture_path()).unwrap()).unwrap();

    let added = ContactImporter::load(&repo, &records).await.unwrap();

    assert_eq!(added, 3);
}

#[tokio::test]
async fn server_rejection_reports_row() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/controller/add-contact/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Invalid API key"))
        .mount(&server)
        .await;

    let config = ApiConfig {
        root_url: server.uri(),
        ..ApiConfig::default()
    };
    let repo = HttpContactRepository::new(&config).unwrap();
    let records = ContactImporter::parse(File::open(fixture_path()).unwrap()).unwrap();

    let result = ContactImporter::load(&repo, &records).await;

    let err = result.expect_err("import should fail");
    assert!(matches!(err, ContactImportError::Contact { row: 1, .. }));
    assert_eq!(
        err.to_string(),
        "row 1: failed to add contact: Invalid API key"
    );
}
