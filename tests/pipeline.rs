use keyword_gap::fetcher::{Fetcher, HttpFetcher};
use keyword_gap::parser::{ContentExtractor, Preset};
use keyword_gap::search_console::{DateRange, JsonKeywordSource};
use keyword_gap::{AnalyzerConfig, FetchError, GapAnalyzer, KeywordRecord};
use std::sync::Arc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn modelos_page(heading: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html><head><title>{heading}</title></head>
<body>
  <header><nav>Inicio | Formularios | Contacto</nav></header>
  <h1>{heading}</h1>
  <div class="c-description-block__container container-fluid u-max-width">{body}</div>
</body></html>"#
    )
}

async fn mount_page(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(html).insert_header("Content-Type", "text/html; charset=utf-8"))
        .mount(server)
        .await;
}

fn analyzer(source: JsonKeywordSource, retries: u32) -> GapAnalyzer {
    GapAnalyzer::new(
        Arc::new(source),
        Arc::new(HttpFetcher::new(5, retries).unwrap()),
        ContentExtractor::from_preset(Preset::Modelos).unwrap(),
        DateRange::default(),
        AnalyzerConfig::new().with_retries(retries).with_progress(false),
    )
}

#[tokio::test]
async fn test_end_to_end_report() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/modelos/modelo-002/",
        modelos_page("Modelo 002", "<p>Rellena el <b>modelo 002</b> y presenta la declaración censal.</p>"),
    )
    .await;
    mount_page(
        &server,
        "/modelos/modelo-036/",
        modelos_page("Modelo 036", "<p>Información sobre el alta censal.</p>"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/modelos/roto/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let source = JsonKeywordSource::shared(vec![
        KeywordRecord::new("Modelo 002", 10, 100),
        KeywordRecord::new("declaracion censal", 4, 40),
        KeywordRecord::new("formulario", 5, 50),
        KeywordRecord::new("Informacion", 1, 10),
        // navigation text is outside the content block
        KeywordRecord::new("contacto", 7, 70),
    ]);

    let urls: Vec<String> = ["/modelos/modelo-002/", "/modelos/roto/", "/modelos/modelo-036/"]
        .iter()
        .map(|route| format!("{}{}", server.uri(), route))
        .collect();

    let outcome = analyzer(source, 0).run(&urls).await.unwrap();

    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].position, 2);
    assert!(outcome.skipped[0].reason.contains("500"));

    let reports = outcome.report.reports();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].position, 1);
    assert_eq!(reports[1].position, 3);

    let present: Vec<_> = reports[0]
        .results
        .iter()
        .filter(|r| r.present)
        .map(|r| r.keyword.as_str())
        .collect();
    assert_eq!(present, vec!["modelo 002", "declaracion censal"]);

    let summaries = outcome.report.summaries();
    assert_eq!(summaries[0].count_present, 2);
    assert_eq!(summaries[0].count_absent, 3);
    assert_eq!(summaries[0].impressions_absent, 130);
    assert_eq!(summaries[0].clicks_absent, 13);
    assert_eq!(summaries[0].total_keywords(), 5);

    // "Información" in the page, "Informacion" as the keyword
    assert_eq!(summaries[1].count_present, 1);
    assert_eq!(summaries[1].clicks_present, 1);

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("results.xlsx");
    outcome.report.write_xlsx(&output).unwrap();
    assert!(std::fs::metadata(&output).unwrap().len() > 0);
}

#[tokio::test]
async fn test_page_without_content_block_is_skipped() {
    let server = MockServer::start().await;
    mount_page(&server, "/otra/", "<html><body><p>Sin bloque</p></body></html>".to_string()).await;

    let source = JsonKeywordSource::shared(vec![KeywordRecord::new("bloque", 1, 1)]);
    let urls = vec![format!("{}/otra/", server.uri())];

    let outcome = analyzer(source, 0).run(&urls).await.unwrap();

    assert!(outcome.report.is_empty());
    assert_eq!(outcome.skipped.len(), 1);
}

#[tokio::test]
async fn test_fetch_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notfound"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(5, 0).unwrap();
    let result = fetcher.fetch_page(&format!("{}/notfound", server.uri())).await;

    match result {
        Err(FetchError::Http { status }) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected HTTP 404 error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_without_retries_sends_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/error"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(5, 0).unwrap();
    let result = fetcher.fetch_page(&format!("{}/error", server.uri())).await;
    assert!(matches!(result, Err(FetchError::Http { .. })));
}

#[tokio::test]
async fn test_fetch_retry_recovers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_page(&server, "/flaky", "<p>ok</p>".to_string()).await;

    let fetcher = HttpFetcher::new(5, 1).unwrap();
    let body = fetcher.fetch_page(&format!("{}/flaky", server.uri())).await.unwrap();
    assert!(body.contains("ok"));
}
