//! End-to-end checks against a running stack.
//!
//! Ignored by default; run inside the compose network with
//! `cargo test --test ui_smoke -- --ignored`. An application that never
//! becomes reachable fails the test; only that check runs by default.

use std::thread;
use std::time::Duration;
use web_scaffold::HarnessConfig;

fn reachable_app() -> HarnessConfig {
    require_reachable(HarnessConfig::from_env().unwrap())
}

fn require_reachable(config: HarnessConfig) -> HarnessConfig {
    let poller = config.poller().unwrap();
    poller
        .wait(&config.app_url)
        .unwrap_or_else(|e| panic!("application is not reachable: {e}"));
    config
}

#[test]
#[should_panic(expected = "application is not reachable")]
fn unreachable_app_fails_the_run() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    require_reachable(HarnessConfig {
        app_url: format!("http://127.0.0.1:{port}/"),
        timeout_secs: 1,
        interval_secs: 1,
        ..HarnessConfig::default()
    });
}

#[test]
#[ignore]
fn homepage_renders() {
    let config = reachable_app();

    let response = reqwest::blocking::get(&config.app_url).unwrap();
    assert!(response.status().is_success());

    let body = response.text().unwrap();
    assert!(body.contains("<h1>Welcome to Web Scaffold with MySQL</h1>"));
}

#[test]
#[ignore]
fn db_test_page_reports_success() {
    let config = reachable_app();
    let url = config.app_path("/db-test");

    // The database may still be running its init script when the app is up.
    for attempt in 1..=5 {
        let body = reqwest::blocking::get(&url).and_then(|r| r.text());
        match body {
            Ok(body) if body.contains("<div class=\"success\">Database connection successful") => {
                return;
            }
            Ok(_) => eprintln!("attempt {attempt}: database not ready yet"),
            Err(e) => eprintln!("attempt {attempt}: request failed: {e}"),
        }
        thread::sleep(Duration::from_secs(3));
    }
    panic!("database test page did not report success within the expected time");
}

#[test]
#[ignore]
fn products_api_lists_the_products_table() {
    let config = reachable_app();

    let response = reqwest::blocking::get(config.app_path("/api/products?limit=5")).unwrap();
    assert!(response.status().is_success());

    let json: serde_json::Value = response.json().unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["limit"], 5);
    assert!(json["data"]["items"].is_array());
}
