//! Catalog fetch integration tests.
//!
//! Starts a fake catalog service with axum and drives the real client and
//! store against it.

use std::collections::HashMap;
use std::time::Duration;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use serde_json::json;
use tokio::sync::mpsc;

use ingame::browse::{derive_filtered_page, derive_suggestions};
use ingame::catalog::{
    spawn_fetch, CatalogClient, CatalogError, CatalogStatus, CatalogStore, Completion,
    FetchOutcome, Platform,
};

fn game(id: u64, title: &str, platform: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "thumbnail": format!("https://www.freetogame.com/g/{id}/thumbnail.jpg"),
        "short_description": format!("{title} description"),
        "game_url": format!("https://www.freetogame.com/open/{id}"),
        "genre": "Shooter",
        "platform": platform,
        "publisher": "Publisher",
        "developer": "Developer",
        "release_date": "2020-01-01",
        "freetogame_profile_url": format!("https://www.freetogame.com/{id}")
    })
}

async fn games(Query(params): Query<HashMap<String, String>>) -> axum::Json<serde_json::Value> {
    match params.get("platform").map(String::as_str) {
        Some("browser") => {
            // Slow enough for a later pc request to overtake it.
            tokio::time::sleep(Duration::from_millis(300)).await;
            axum::Json(json!([
                game(10, "Browser Quest", "Web Browser"),
                game(11, "Halo Arena", "Web Browser"),
            ]))
        }
        _ => {
            let mut list: Vec<_> = (1..=20)
                .map(|i| game(100 + i, &format!("Raid {i}"), "PC (Windows)"))
                .collect();
            list.push(game(1, "Halo", "PC (Windows)"));
            list.push(game(2, "Half-Life", "PC (Windows)"));
            axum::Json(serde_json::Value::Array(list))
        }
    }
}

/// Bind to port 0 and return the actual address.
async fn start_server() -> String {
    let app = Router::new()
        .route("/api/games", get(games))
        .route(
            "/down/games",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        )
        .route("/garbage/games", get(|| async { "<html>not json</html>" }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn fetch_decodes_catalog() {
    let base = start_server().await;
    let client = CatalogClient::with_url(format!("{base}/api/"));

    let records = client.fetch(Some(Platform::Pc)).await.unwrap();
    assert_eq!(records.len(), 22);
    assert_eq!(records[0].title, "Raid 1");
    assert_eq!(records[20].title, "Halo");
    assert_eq!(records[20].platform, "PC (Windows)");
    assert_eq!(records[20].developer.as_deref(), Some("Developer"));

    // No platform means pc.
    let default = client.fetch(None).await.unwrap();
    assert_eq!(default, records);
}

#[tokio::test]
async fn fetch_reports_http_status() {
    let base = start_server().await;
    let client = CatalogClient::with_url(format!("{base}/down"));

    match client.fetch(Some(Platform::Pc)).await {
        Err(CatalogError::Status { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_reports_bad_payload() {
    let base = start_server().await;
    let client = CatalogClient::with_url(format!("{base}/garbage"));

    let err = client.fetch(Some(Platform::Pc)).await.unwrap_err();
    assert!(matches!(err, CatalogError::Decode(_)));
}

#[tokio::test]
async fn fetch_reports_unreachable_service() {
    let unreachable = CatalogClient::with_settings("http://127.0.0.1:9".to_string(), None, 2);
    let err = unreachable.fetch(Some(Platform::Pc)).await.unwrap_err();
    assert!(matches!(err, CatalogError::Network(_)));
}

#[tokio::test]
async fn late_response_for_previous_platform_is_discarded() {
    let base = start_server().await;
    let client = CatalogClient::with_url(format!("{base}/api"));
    let handle = tokio::runtime::Handle::current();
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchOutcome>();

    let mut store = CatalogStore::new(Platform::Browser);
    let slow = store.select_platform(Platform::Browser);
    spawn_fetch(&handle, client.clone(), slow, tx.clone());
    let fast = store.select_platform(Platform::Pc);
    spawn_fetch(&handle, client.clone(), fast, tx.clone());

    let (ticket, result) = rx.recv().await.unwrap();
    assert_eq!(ticket, fast);
    assert_eq!(store.complete(ticket, result), Completion::Applied);

    let (ticket, result) = rx.recv().await.unwrap();
    assert_eq!(ticket, slow);
    assert_eq!(store.complete(ticket, result), Completion::Stale);

    let snapshot = store.snapshot();
    assert_eq!(snapshot.platform, Platform::Pc);
    assert_eq!(snapshot.status, CatalogStatus::Ready);
    assert_eq!(snapshot.records.len(), 22);
    assert!(snapshot.records.iter().all(|r| r.platform == "PC (Windows)"));
}

#[tokio::test]
async fn suggestions_and_pages_agree_on_fetched_catalog() {
    let base = start_server().await;
    let client = CatalogClient::with_url(format!("{base}/api"));
    let catalog = client.fetch(Some(Platform::Pc)).await.unwrap();

    let suggestions = derive_suggestions(&catalog, "ha");
    let page = derive_filtered_page(&catalog, "ha", 1, 15);
    assert_eq!(suggestions, page.matches);
    let titles: Vec<&str> = page
        .visible()
        .iter()
        .map(|&i| catalog[i].title.as_str())
        .collect();
    assert_eq!(titles, vec!["Halo", "Half-Life"]);

    let all = derive_filtered_page(&catalog, "", 2, 15);
    assert_eq!(all.page_count, 2);
    assert_eq!(all.visible().len(), 7);
}
