//! Readiness poller timing against mock servers and closed ports
//!
//! The poller blocks, so every wait runs on a blocking thread while the mock
//! server keeps serving on the async runtime.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use web_scaffold::{Readiness, ReadinessError, ReadinessPoller};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Scheduling and connection overhead allowed on top of the exact bounds.
const SLACK: Duration = Duration::from_millis(400);

fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/")
}

async fn wait_in_background(
    url: String,
    timeout: Duration,
    interval: Duration,
    expect_json: bool,
) -> (Result<Readiness, ReadinessError>, Duration) {
    tokio::task::spawn_blocking(move || {
        let poller = ReadinessPoller::new(timeout, interval)
            .unwrap()
            .expect_json(expect_json);
        let started = Instant::now();
        let result = poller.wait(&url);
        (result, started.elapsed())
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn ready_endpoint_returns_on_first_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h1>ok</h1>"))
        .mount(&server)
        .await;

    let (result, elapsed) = wait_in_background(
        format!("{}/", server.uri()),
        Duration::from_secs(5),
        Duration::from_millis(100),
        false,
    )
    .await;

    let readiness = result.unwrap();
    assert_eq!(readiness.attempts, 1);
    assert!(elapsed < Duration::from_secs(1));
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_endpoint_fails_between_timeout_and_timeout_plus_interval() {
    let timeout = Duration::from_millis(600);
    let interval = Duration::from_millis(100);

    let (result, elapsed) = wait_in_background(closed_port_url(), timeout, interval, false).await;

    match result {
        Err(ReadinessError::Unreachable { attempts, .. }) => assert!(attempts > 1),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(elapsed >= timeout, "gave up early after {elapsed:?}");
    assert!(elapsed <= timeout + interval + SLACK, "gave up late after {elapsed:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn error_status_is_retried_until_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let timeout = Duration::from_millis(500);
    let interval = Duration::from_millis(100);
    let (result, elapsed) =
        wait_in_background(format!("{}/", server.uri()), timeout, interval, false).await;

    match result {
        Err(ReadinessError::Unreachable {
            attempts,
            last_error,
            ..
        }) => {
            assert!(attempts >= 2);
            assert!(last_error.contains("503"), "last error: {last_error}");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(elapsed >= timeout);
    assert!(elapsed <= timeout + interval + SLACK);
}

#[tokio::test(flavor = "multi_thread")]
async fn endpoint_that_comes_up_later_is_detected_within_one_interval() {
    let server = MockServer::start().await;
    let interval = Duration::from_millis(200);

    let waiter = tokio::spawn(wait_in_background(
        format!("{}/", server.uri()),
        Duration::from_secs(10),
        interval,
        false,
    ));

    // Unmatched requests get 404 until the mock is mounted.
    tokio::time::sleep(Duration::from_millis(700)).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let available_at = Instant::now();

    let (result, _) = waiter.await.unwrap();
    let detected_after = available_at.elapsed();

    let readiness = result.unwrap();
    assert!(readiness.attempts > 1);
    assert!(
        detected_after <= interval + SLACK,
        "detected {detected_after:?} after the endpoint came up"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn expect_json_rejects_non_json_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("starting"))
        .mount(&server)
        .await;

    let (result, _) = wait_in_background(
        format!("{}/status", server.uri()),
        Duration::from_millis(400),
        Duration::from_millis(100),
        true,
    )
    .await;

    match result {
        Err(ReadinessError::Unreachable { last_error, .. }) => {
            assert!(last_error.contains("invalid json"), "last error: {last_error}");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn expect_json_accepts_grid_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "value": { "ready": true } })),
        )
        .mount(&server)
        .await;

    let (result, _) = wait_in_background(
        format!("{}/status", server.uri()),
        Duration::from_secs(5),
        Duration::from_millis(100),
        true,
    )
    .await;

    assert_eq!(result.unwrap().attempts, 1);
}

/// Accepts the first connection and never answers it; every later
/// connection gets `200 OK`. Returns the base URL and a connection counter.
fn stalls_first_connection() -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    let connections = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&connections);

    thread::spawn(move || {
        let mut held: Vec<TcpStream> = Vec::new();
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                held.push(stream);
                continue;
            }
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = stream.write_all(
                b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            );
        }
    });

    (url, connections)
}

#[test]
fn hung_attempt_is_abandoned_after_one_interval() {
    let (url, connections) = stalls_first_connection();
    let interval = Duration::from_millis(200);
    let poller = ReadinessPoller::new(Duration::from_secs(4), interval).unwrap();

    let started = Instant::now();
    let readiness = poller.wait(&url).unwrap();
    let elapsed = started.elapsed();

    assert!(readiness.attempts >= 2, "attempts: {}", readiness.attempts);
    assert!(connections.load(Ordering::SeqCst) >= 2);
    assert!(
        elapsed <= interval * 2 + SLACK,
        "took {elapsed:?} to get past the stalled connection"
    );
}
