//! End-to-end forwarding tests against real TCP mock destinations.

use std::net::SocketAddr;

use cors_proxy::config::ProxyConfig;
use reqwest::StatusCode;
use tokio::net::TcpListener;

mod common;

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn missing_url_parameter_returns_400_with_cors() {
    let (proxy, shutdown) = common::start_proxy(ProxyConfig::default()).await;

    let res = client()
        .get(format!("http://{proxy}/"))
        .send()
        .await
        .expect("proxy unreachable");

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    let body = res.text().await.unwrap();
    assert!(body.contains("url"));

    shutdown.trigger();
}

#[tokio::test]
async fn relays_status_headers_and_body() {
    let upstream = common::start_mock_upstream(
        b"HTTP/1.1 200 OK\r\n\
          Content-Length: 5\r\n\
          X-Upstream: yes\r\n\
          Content-Disposition: attachment; filename=x.bin\r\n\
          Connection: close\r\n\r\n\
          hello"
            .to_vec(),
    )
    .await;
    let (proxy, shutdown) = common::start_proxy(ProxyConfig::default()).await;

    let res = client()
        .get(format!("http://{proxy}/?url=http://{upstream}"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get("x-upstream").unwrap(), "yes");
    assert!(res.headers().get("content-disposition").is_none());
    assert_eq!(
        res.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    assert_eq!(res.text().await.unwrap(), "hello");

    shutdown.trigger();
}

#[tokio::test]
async fn binary_bodies_round_trip_byte_for_byte() {
    let payload: Vec<u8> = (0..=255u8).collect();
    let mut raw = format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n",
        payload.len()
    )
    .into_bytes();
    raw.extend_from_slice(&payload);

    let upstream = common::start_mock_upstream(raw).await;
    let (proxy, shutdown) = common::start_proxy(ProxyConfig::default()).await;

    let res = client()
        .get(format!("http://{proxy}/?url=http://{upstream}"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.bytes().await.unwrap().as_ref(), payload.as_slice());

    shutdown.trigger();
}

#[tokio::test]
async fn destination_sees_path_query_and_filtered_headers() {
    let (upstream, mut captured) = common::start_capture_upstream().await;
    let (proxy, shutdown) = common::start_proxy(ProxyConfig::default()).await;

    let res = client()
        .get(format!("http://{proxy}/foo?url=http://{upstream}&a=1&b=2"))
        .header("x-custom", "1")
        .header("origin", "http://app.example")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let request = captured.recv().await.unwrap().to_lowercase();
    assert!(
        request.starts_with("get /foo?a=1&b=2 http/1.1"),
        "unexpected request line in: {request}"
    );
    assert!(request.contains("x-custom: 1"));
    assert!(!request.contains("origin:"), "origin must not be forwarded");
    // The Host header belongs to the destination, not the proxy.
    assert!(request.contains(&format!("host: {upstream}").to_lowercase()));

    shutdown.trigger();
}

#[tokio::test]
async fn request_bodies_are_forwarded_upstream() {
    let (upstream, mut captured) = common::start_capture_upstream().await;
    let (proxy, shutdown) = common::start_proxy(ProxyConfig::default()).await;

    let res = client()
        .post(format!("http://{proxy}/?url=http://{upstream}"))
        .header("content-type", "text/plain")
        .body("ping")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let request = captured.recv().await.unwrap();
    assert!(request.starts_with("POST / HTTP/1.1"));
    assert!(request.to_lowercase().contains("content-type: text/plain"));
    assert!(request.ends_with("ping"));

    shutdown.trigger();
}

#[tokio::test]
async fn unreachable_destination_returns_500_with_cause() {
    // Bind and immediately drop to get a port nothing listens on.
    let dead_addr: SocketAddr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    let (proxy, shutdown) = common::start_proxy(ProxyConfig::default()).await;

    let res = client()
        .get(format!("http://{proxy}/?url=http://{dead_addr}"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    let body = res.text().await.unwrap();
    assert!(
        body.contains("error reaching upstream"),
        "error body should describe the failure, got: {body}"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn repeated_gets_relay_identical_status_and_headers() {
    let upstream = common::start_mock_upstream(
        b"HTTP/1.1 203 Non-Authoritative Information\r\n\
          Content-Length: 2\r\n\
          X-Marker: stable\r\n\
          Connection: close\r\n\r\n\
          ok"
            .to_vec(),
    )
    .await;
    let (proxy, shutdown) = common::start_proxy(ProxyConfig::default()).await;

    let url = format!("http://{proxy}/?url=http://{upstream}");
    let first = client().get(&url).send().await.unwrap();
    let second = client().get(&url).send().await.unwrap();

    assert_eq!(first.status(), second.status());
    assert_eq!(
        first.headers().get("x-marker"),
        second.headers().get("x-marker")
    );

    shutdown.trigger();
}
