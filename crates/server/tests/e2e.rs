use std::net::SocketAddr;
use std::time::Duration;

use axum::{http::StatusCode, routing::get, Json, Router};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::external::ExternalDataService;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::{routes, ServerState};

struct TestApp {
    base_url: String,
}

async fn spawn(router: Router) -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await { eprintln!("server error: {}", e); }
    });
    Ok(addr)
}

async fn start_server_with_upstream(upstream_url: String) -> anyhow::Result<TestApp> {
    let client = common::external::build_client(Duration::from_secs(1), Duration::from_secs(2))?;
    let state = ServerState::seeded(ExternalDataService::new(client, upstream_url));
    let addr = spawn(routes::build_router(state, CorsLayer::very_permissive())).await?;
    Ok(TestApp { base_url: format!("http://{}:{}", addr.ip(), addr.port()) })
}

async fn start_server() -> anyhow::Result<TestApp> {
    start_server_with_upstream("http://127.0.0.1:9/unused".into()).await
}

async fn list_ids(c: &reqwest::Client, app: &TestApp) -> anyhow::Result<Vec<u64>> {
    let body = c.get(format!("{}/api/accounts", app.base_url)).send().await?.json::<Value>().await?;
    Ok(body["data"]
        .as_array()
        .map(|a| a.iter().filter_map(|v| v["id"].as_u64()).collect())
        .unwrap_or_default())
}

#[tokio::test]
async fn e2e_list_returns_seed() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/api/accounts", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Fetched all accounts");
    assert_eq!(body["data"][0]["name"], "John Doe");
    assert_eq!(body["data"][0]["balance"], 5000.0);
    assert_eq!(body["data"][0]["email"], "john@example.com");
    assert_eq!(body["data"][1]["id"], 2);
    Ok(())
}

#[tokio::test]
async fn e2e_create_zero_balance_then_delete() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{}/api/accounts", app.base_url))
        .json(&json!({"name": "A", "balance": 0, "email": "a@x.com"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Account created successfully");
    assert_eq!(body["data"]["id"], 3);
    assert_eq!(body["data"]["balance"], 0.0);

    let res = c.delete(format!("{}/api/accounts/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Account deleted successfully");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["name"], "John Doe");

    assert_eq!(list_ids(&c, &app).await?, vec![2, 3]);

    let res = c.get(format!("{}/api/accounts/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"success": false, "message": "Account not found"}));
    Ok(())
}

#[tokio::test]
async fn e2e_partial_update_only_touches_balance() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.put(format!("{}/api/accounts/2", app.base_url))
        .json(&json!({"balance": 100}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Account updated successfully");
    assert_eq!(body["data"], json!({"id": 2, "name": "Jane Smith", "balance": 100.0, "email": "jane@example.com"}));

    let res = c.get(format!("{}/api/accounts/2", app.base_url)).send().await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Account retrieved");
    assert_eq!(body["data"]["balance"], 100.0);
    Ok(())
}

#[tokio::test]
async fn e2e_create_missing_fields_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    for payload in [
        json!({"name": "", "balance": 10, "email": "x@x.com"}),
        json!({"name": "A", "email": "x@x.com"}),
        json!({"name": "A", "balance": null, "email": "x@x.com"}),
        json!({"name": "A", "balance": 1}),
    ] {
        let res = c.post(format!("{}/api/accounts", app.base_url)).json(&payload).send().await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
        let body = res.json::<Value>().await?;
        assert_eq!(body, json!({"success": false, "message": "Please provide name, balance, and email"}));
    }

    assert_eq!(list_ids(&c, &app).await?, vec![1, 2]);
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_id_is_404_everywhere() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let url = format!("{}/api/accounts/99", app.base_url);

    assert_eq!(c.get(&url).send().await?.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(c.put(&url).json(&json!({"name": "x"})).send().await?.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(c.delete(&url).send().await?.status(), HttpStatusCode::NOT_FOUND);

    assert_eq!(list_ids(&c, &app).await?, vec![1, 2]);
    Ok(())
}

#[tokio::test]
async fn e2e_external_data_relays_upstream() -> anyhow::Result<()> {
    let upstream = Router::new().route(
        "/posts/1",
        get(|| async { Json(json!({"userId": 1, "id": 1, "title": "hello"})) }),
    );
    let up = spawn(upstream).await?;
    let app = start_server_with_upstream(format!("http://{up}/posts/1")).await?;

    let res = reqwest::get(format!("{}/api/external-data", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "External data fetched");
    assert_eq!(body["data"], json!({"userId": 1, "id": 1, "title": "hello"}));
    Ok(())
}

#[tokio::test]
async fn e2e_external_data_failure_is_500() -> anyhow::Result<()> {
    let upstream = Router::new().route("/posts/1", get(|| async { StatusCode::BAD_GATEWAY }));
    let up = spawn(upstream).await?;
    let app = start_server_with_upstream(format!("http://{up}/posts/1")).await?;

    let res = reqwest::get(format!("{}/api/external-data", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Error fetching external data");
    assert!(body["error"].as_str().is_some_and(|e| e.contains("502")));
    assert!(body.get("data").is_none());
    Ok(())
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/api/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);
    assert!(body["timestamp"].is_string());
    Ok(())
}
