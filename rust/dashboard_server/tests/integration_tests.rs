// tests/integration_tests.rs

use actix_web::{test, web, App};
use dashboard_server::config::Settings;
use dashboard_server::configure;
use dashboard_server::dashboard::{DashboardResponse, DashboardState, StatsPanel, NO_DATA_MESSAGE};
use dashboard_server::models::{ErrorResponse, OptionsResponse};
use std::path::{Path, PathBuf};
use stock_data::TickerSource;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../stock_data/tests/fixtures")
}

fn test_state(output_dir: &Path) -> web::Data<DashboardState> {
    let settings = Settings {
        data_dir: fixtures(),
        output_dir: output_dir.to_path_buf(),
        tickers: vec![
            TickerSource::new("AAPL", "HistoricalData_Apple.csv"),
            TickerSource::new("RELIANCE", "RELIANCE.csv"),
            TickerSource::new("MINI", "MINI.csv"),
        ],
        ..Settings::default()
    };
    web::Data::new(DashboardState::initialize(settings).unwrap())
}

#[actix_rt::test]
async fn test_dashboard_endpoint_success() {
    let out = tempfile::tempdir().unwrap();
    let mut app = test::init_service(
        App::new().app_data(test_state(out.path())).configure(configure)
    ).await;

    let req = test::TestRequest::get()
        .uri("/api/dashboard?ticker=AAPL&year=2023&month=June")
        .to_request();

    let resp = test::call_service(&mut app, req).await;

    assert!(resp.status().is_success());

    let response_body = test::read_body(resp).await;
    let result: DashboardResponse = serde_json::from_slice(&response_body).unwrap();

    match result.stats {
        StatsPanel::Cards { cards } => {
            let labels: Vec<&str> = cards.iter().map(|c| c.label.as_str()).collect();
            assert_eq!(labels, vec!["Open", "High", "Low", "Close"]);
            assert_eq!(cards[3].value, "$189.25");
        }
        other => panic!("expected stat cards, got {:?}", other),
    }
    assert_eq!(result.volume_chart.data.len(), 1);
    assert_eq!(result.scatter_chart.data.len(), 1);
    assert_eq!(result.candlestick_chart.data.len(), 1);
    assert_eq!(result.prediction_chart.data.len(), 2);

    // predictions are written as a side effect of the refresh
    let written = std::fs::read_to_string(out.path().join("predictions_AAPL.csv")).unwrap();
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("date,predicted_close"));
    assert_eq!(lines.count(), 12);
}

#[actix_rt::test]
async fn test_dashboard_endpoint_raw_json() {
    let out = tempfile::tempdir().unwrap();
    let mut app = test::init_service(
        App::new().app_data(test_state(out.path())).configure(configure)
    ).await;

    let req = test::TestRequest::get()
        .uri("/api/dashboard?ticker=RELIANCE&year=2021&month=April")
        .to_request();
    let value: serde_json::Value = test::call_and_read_body_json(&mut app, req).await;

    assert_eq!(value["stats"]["kind"], "cards");
    assert_eq!(value["candlestick_chart"]["data"][0]["type"], "candlestick");
    assert_eq!(value["candlestick_chart"]["data"][0]["x"][0], "2021-04-28");
    assert_eq!(value["prediction_chart"]["data"][1]["line"]["dash"], "dash");
    assert_eq!(
        value["scatter_chart"]["layout"]["title"]["text"],
        "High and Low Comparison"
    );
}

#[actix_rt::test]
async fn test_dashboard_endpoint_no_data() {
    let out = tempfile::tempdir().unwrap();
    let mut app = test::init_service(
        App::new().app_data(test_state(out.path())).configure(configure)
    ).await;

    let req = test::TestRequest::get()
        .uri("/api/dashboard?ticker=AAPL&year=2020&month=March")
        .to_request();

    let resp = test::call_service(&mut app, req).await;
    assert!(resp.status().is_success());

    let response_body = test::read_body(resp).await;
    let result: DashboardResponse = serde_json::from_slice(&response_body).unwrap();

    assert_eq!(
        result.stats,
        StatsPanel::Placeholder {
            message: NO_DATA_MESSAGE.to_string()
        }
    );
    assert!(result.volume_chart.is_empty());
    assert!(result.scatter_chart.is_empty());
    assert!(result.candlestick_chart.is_empty());
    assert!(result.prediction_chart.is_empty());
    assert!(result.predictions_file.is_none());
}

#[actix_rt::test]
async fn test_dashboard_endpoint_close_only_ticker() {
    let out = tempfile::tempdir().unwrap();
    let mut app = test::init_service(
        App::new().app_data(test_state(out.path())).configure(configure)
    ).await;

    let req = test::TestRequest::get()
        .uri("/api/dashboard?ticker=MINI&year=2020&month=March")
        .to_request();
    let result: DashboardResponse = test::call_and_read_body_json(&mut app, req).await;

    assert!(result.volume_chart.is_empty());
    assert!(result.scatter_chart.is_empty());
    assert!(result.candlestick_chart.is_empty());
    assert_eq!(result.prediction_chart.data.len(), 2);
    assert!(out.path().join("predictions_MINI.csv").exists());
}

#[actix_rt::test]
async fn test_dashboard_endpoint_bad_request() {
    let out = tempfile::tempdir().unwrap();
    let mut app = test::init_service(
        App::new().app_data(test_state(out.path())).configure(configure)
    ).await;

    let req = test::TestRequest::get()
        .uri("/api/dashboard?ticker=GOOG&year=2023&month=June")
        .to_request();

    let resp = test::call_service(&mut app, req).await;

    assert_eq!(resp.status(), 400);

    let response_body = test::read_body(resp).await;
    let result: ErrorResponse = serde_json::from_slice(&response_body).unwrap();

    assert!(!result.success);
    assert_eq!(result.message, "Unknown ticker: GOOG".to_string());
}

#[actix_rt::test]
async fn test_dashboard_endpoint_invalid_month() {
    let out = tempfile::tempdir().unwrap();
    let mut app = test::init_service(
        App::new().app_data(test_state(out.path())).configure(configure)
    ).await;

    let req = test::TestRequest::get()
        .uri("/api/dashboard?ticker=AAPL&year=2023&month=Smarch")
        .to_request();

    let resp = test::call_service(&mut app, req).await;
    assert_eq!(resp.status(), 400);

    let response_body = test::read_body(resp).await;
    let result: ErrorResponse = serde_json::from_slice(&response_body).unwrap();
    assert_eq!(result.message, "Invalid month name: Smarch");
}

#[actix_rt::test]
async fn test_dashboard_endpoint_malformed_query() {
    let out = tempfile::tempdir().unwrap();
    let mut app = test::init_service(
        App::new().app_data(test_state(out.path())).configure(configure)
    ).await;

    for uri in [
        "/api/dashboard?ticker=AAPL&year=abc&month=June",
        "/api/dashboard?ticker=AAPL&year=2023",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), 400, "{}", uri);

        let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap().to_string();
        assert!(content_type.starts_with("application/json"), "{}", uri);

        let response_body = test::read_body(resp).await;
        let result: ErrorResponse = serde_json::from_slice(&response_body).unwrap();
        assert!(!result.success);
        assert!(result.message.starts_with("Query deserialize error"), "{}", result.message);
    }
}

#[actix_rt::test]
async fn test_options_endpoint() {
    let out = tempfile::tempdir().unwrap();
    let mut app = test::init_service(
        App::new().app_data(test_state(out.path())).configure(configure)
    ).await;

    let req = test::TestRequest::get().uri("/api/options").to_request();
    let result: OptionsResponse = test::call_and_read_body_json(&mut app, req).await;

    assert_eq!(result.options.tickers, vec!["AAPL", "RELIANCE", "MINI"]);
    assert_eq!(result.options.years, vec![2020, 2021, 2022, 2023]);
    assert_eq!(
        result.options.months,
        vec!["January", "March", "April", "May", "June"]
    );

    let selection = result.default_selection.unwrap();
    assert_eq!(selection.ticker, "AAPL");
    assert_eq!(selection.year, 2020);
    assert_eq!(selection.month, "January");
}

#[actix_rt::test]
async fn test_index_page() {
    let out = tempfile::tempdir().unwrap();
    let mut app = test::init_service(
        App::new().app_data(test_state(out.path())).configure(configure)
    ).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&mut app, req).await;

    assert!(resp.status().is_success());
    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let response_body = test::read_body(resp).await;
    let html = String::from_utf8(response_body.to_vec()).unwrap();
    assert!(html.contains("Stock Price Dashboard"));
    assert!(html.contains("id=\"prediction-chart\""));
}

#[actix_rt::test]
async fn test_health_check() {
    let mut app = test::init_service(
        App::new().configure(configure)
    ).await;

    let req = test::TestRequest::get()
        .uri("/health")
        .to_request();

    let resp = test::call_service(&mut app, req).await;

    assert!(resp.status().is_success());
    let response_body = test::read_body(resp).await;
    assert_eq!(response_body, "OK");
}
