//! End-to-end batch tests against a mock archive server.

use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pdb_dl::{AccessionCode, Config, Error, FileFormat, StructureFetcher};

fn gzip_bytes(content: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content).unwrap();
    encoder.finish().unwrap()
}

/// Fetcher pointed at the mock server, downloading into a fresh tempdir
async fn test_fetcher(server: &MockServer) -> (StructureFetcher, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = Config {
        endpoint: server.uri(),
        download_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    let fetcher = StructureFetcher::new(config).await.unwrap();
    (fetcher, dir)
}

#[tokio::test]
async fn fetch_unpacks_payload_and_removes_intermediate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1abc.pdb.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(gzip_bytes(b"HEADER...")))
        .mount(&server)
        .await;

    let (fetcher, dir) = test_fetcher(&server).await;
    let code = AccessionCode::parse("1abc").unwrap();
    let output = fetcher.fetch(&code, FileFormat::Pdb).await.unwrap();

    assert_eq!(output, dir.path().join("1abc.pdb"));
    assert_eq!(std::fs::read(&output).unwrap(), b"HEADER...");
    assert!(!dir.path().join("1abc.pdb.gz").exists());
}

#[tokio::test]
async fn batch_with_uppercase_identifier_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1abc.pdb.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(gzip_bytes(b"HEADER...")))
        .mount(&server)
        .await;

    let (fetcher, dir) = test_fetcher(&server).await;
    let report = fetcher.fetch_all(["1ABC"], FileFormat::Pdb).await;

    assert!(report.all_succeeded());
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(
        std::fs::read(dir.path().join("1abc.pdb")).unwrap(),
        b"HEADER..."
    );
}

#[tokio::test]
async fn http_404_mid_batch_does_not_abort_remaining_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1abc.pdb.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(gzip_bytes(b"HEADER...")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/zzzz.pdb.gz"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (fetcher, dir) = test_fetcher(&server).await;
    let report = fetcher.fetch_all(["1abc", "zzzz"], FileFormat::Pdb).await;

    assert!(!report.all_succeeded());
    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 1);

    assert!(dir.path().join("1abc.pdb").exists());
    assert!(!dir.path().join("zzzz.pdb").exists());
    assert!(!dir.path().join("zzzz.pdb.gz").exists());

    match &report.outcomes[1].result {
        Err(Error::HttpStatus { status, .. }) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected HTTP status failure, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_identifier_makes_no_network_call() {
    let server = MockServer::start().await;
    // Any request reaching the server fails the test on drop.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (fetcher, dir) = test_fetcher(&server).await;
    let report = fetcher.fetch_all(["toolong5"], FileFormat::Pdb).await;

    assert!(!report.all_succeeded());
    assert!(matches!(
        report.outcomes[0].result,
        Err(Error::InvalidAccession { length: 8, .. })
    ));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn cif_format_selects_cif_path_and_extension() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/9xyz.cif.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(gzip_bytes(b"data_9XYZ\n")))
        .mount(&server)
        .await;

    let (fetcher, dir) = test_fetcher(&server).await;
    let report = fetcher.fetch_all(["9XYZ.cif"], FileFormat::Cif).await;

    assert!(report.all_succeeded());
    assert_eq!(
        std::fs::read(dir.path().join("9xyz.cif")).unwrap(),
        b"data_9XYZ\n"
    );
    assert!(!dir.path().join("9xyz.cif.gz").exists());
}

#[tokio::test]
async fn repeated_fetch_overwrites_previous_output() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1abc.pdb.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(gzip_bytes(b"HEADER...")))
        .mount(&server)
        .await;

    let (fetcher, dir) = test_fetcher(&server).await;

    let first = fetcher.fetch_all(["1abc"], FileFormat::Pdb).await;
    assert!(first.all_succeeded());
    let second = fetcher.fetch_all(["1abc"], FileFormat::Pdb).await;
    assert!(second.all_succeeded());

    assert_eq!(
        std::fs::read(dir.path().join("1abc.pdb")).unwrap(),
        b"HEADER..."
    );
}

#[tokio::test]
async fn corrupt_gzip_payload_leaves_no_files_behind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1abc.pdb.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"not a gzip stream".to_vec()))
        .mount(&server)
        .await;

    let (fetcher, dir) = test_fetcher(&server).await;
    let report = fetcher.fetch_all(["1abc"], FileFormat::Pdb).await;

    assert!(!report.all_succeeded());
    assert!(matches!(
        report.outcomes[0].result,
        Err(Error::Decompression(_))
    ));
    assert!(!dir.path().join("1abc.pdb").exists());
    assert!(!dir.path().join("1abc.pdb.gz").exists());
}

#[tokio::test]
async fn connection_failure_is_a_per_item_network_error() {
    // Bind-then-drop gives a port with nothing listening. (A dropped
    // wiremock MockServer keeps listening — it is returned to a pool —
    // so bind a raw listener instead.)
    let endpoint = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let dir = TempDir::new().unwrap();
    let config = Config {
        endpoint,
        download_dir: dir.path().to_path_buf(),
        request_timeout_secs: 5,
        ..Config::default()
    };
    let fetcher = StructureFetcher::new(config).await.unwrap();

    let report = fetcher.fetch_all(["1abc"], FileFormat::Pdb).await;
    assert!(!report.all_succeeded());
    assert!(matches!(report.outcomes[0].result, Err(Error::Network(_))));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn empty_batch_is_vacuously_successful() {
    let server = MockServer::start().await;
    let (fetcher, _dir) = test_fetcher(&server).await;

    let report = fetcher.fetch_all(Vec::<String>::new(), FileFormat::Pdb).await;
    assert!(report.all_succeeded());
    assert!(report.outcomes.is_empty());
}
