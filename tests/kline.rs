//! `EastmoneyClient::get_kline` against a local one-shot HTTP responder.

use chrono::NaiveDate;
use eastmoney_mcp::error::QuoteError;
use eastmoney_mcp::types::history::HistoryRequest;
use eastmoney_mcp::types::{Adjust, Market, Period};
use eastmoney_mcp::{EastmoneyClient, EastmoneyProvider, HistoryArgs, HistoryQueryHandler, MarketConfig};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve exactly one HTTP response and hand back the request head.
async fn one_shot(status: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let task = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8_lossy(&head).into_owned()
    });
    (base, task)
}

fn request(symbol: &str) -> HistoryRequest {
    HistoryRequest {
        symbol: symbol.into(),
        period: Period::Weekly,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        adjust: Adjust::Forward,
    }
}

const TWO_BARS: &str = r#"{"rc":0,"rt":17,"data":{"code":"600519","market":1,"name":"贵州茅台","klines":[
    "2024-01-05,1720.00,1690.00,1730.50,1680.00,34567,5890000000.00,2.91,-1.75,-30.00,0.28",
    "2024-01-12,1690.00,1705.20,1712.00,1660.10,29876,5020000000.00,3.07,0.90,15.20,0.24"
]}}"#;

#[tokio::test]
async fn test_get_kline_builds_query_and_parses_rows() {
    let (base, server) = one_shot("200 OK", TWO_BARS.to_owned()).await;
    let client = EastmoneyClient::with_base_url(base).unwrap();

    let bars = client.get_kline(Market::CnA, &request("600519")).await.unwrap();
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    assert_eq!(bars[0].code.as_deref(), Some("600519"));
    assert_eq!(bars[1].close, 1705.2);
    assert_eq!(bars[1].volume, 29876);

    let head = server.await.unwrap();
    let request_line = head.lines().next().unwrap();
    assert!(request_line.starts_with("GET /api/qt/stock/kline/get?"));
    for param in ["secid=1.600519", "klt=102", "fqt=1", "beg=20240101", "end=20240131"] {
        assert!(request_line.contains(param), "missing {param} in {request_line}");
    }
}

#[tokio::test]
async fn test_null_data_is_empty() {
    let (base, _server) = one_shot("200 OK", r#"{"rc":0,"rt":17,"data":null}"#.to_owned()).await;
    let client = EastmoneyClient::with_base_url(base).unwrap();
    let bars = client.get_kline(Market::Hk, &request("99999")).await.unwrap();
    assert!(bars.is_empty());
}

#[tokio::test]
async fn test_nonzero_rc_is_api_error() {
    let (base, _server) = one_shot("200 OK", r#"{"rc":102,"rt":17,"data":null}"#.to_owned()).await;
    let client = EastmoneyClient::with_base_url(base).unwrap();
    let err = client.get_kline(Market::Us, &request("AAPL")).await.unwrap_err();
    assert!(matches!(err, QuoteError::Api(ref body) if body.rc == 102), "{err:?}");
}

#[tokio::test]
async fn test_http_failure_is_status_error() {
    let (base, _server) = one_shot("503 Service Unavailable", "busy".to_owned()).await;
    let client = EastmoneyClient::with_base_url(base).unwrap();
    let err = client.get_kline(Market::Us, &request("AAPL")).await.unwrap_err();
    match err {
        QuoteError::HttpStatus { status, body } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(body, "busy");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_eastmoney_provider_through_handler() {
    let (base, _server) = one_shot("200 OK", TWO_BARS.to_owned()).await;
    let client = EastmoneyClient::with_base_url(base).unwrap();
    let provider = Arc::new(EastmoneyProvider::new(client, Market::CnA));
    assert_eq!(provider.market(), Market::CnA);

    let handler = HistoryQueryHandler::new(MarketConfig::cn_a(provider));
    let text = handler
        .handle_to_string(HistoryArgs::new("600519", "weekly", "20240101", "20240131", "qfq"))
        .await;
    assert!(text.contains("**数据条数**: 2 条"), "{text}");
    assert!(text.contains("| 2024-01-12 | 600519 "));
    assert!(text.contains("1705.20"));
}

#[tokio::test]
async fn test_unreachable_provider_is_api_error() {
    // Bind then drop to get a port nobody listens on.
    let addr = TcpListener::bind("127.0.0.1:0").await.unwrap().local_addr().unwrap();
    let client = EastmoneyClient::with_base_url(format!("http://{addr}")).unwrap();
    let handler = HistoryQueryHandler::new(MarketConfig::hk(Arc::new(EastmoneyProvider::new(
        client,
        Market::Hk,
    ))));
    let text = handler
        .handle_to_string(HistoryArgs::new("00700", "daily", "20240101", "20240131", ""))
        .await;
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["code"], "API_ERROR");
    assert!(json["error"].as_str().unwrap().contains("HTTP request failed"));
}
