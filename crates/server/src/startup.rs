use std::{future::Future, net::SocketAddr};

use axum::Router;
use configs::AppConfig;
use service::external::ExternalDataService;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ROUTES};
use crate::state::ServerState;

// 前端可能从其它源访问 API，CORS 全放开
fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn parse_bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = cfg.server.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server bind address {raw}: {e}")))
}

/// Build the router from configuration: a freshly seeded store plus the external relay.
pub fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let client = common::external::build_client(cfg.external.connect_timeout(), cfg.external.request_timeout())?;
    let external = ExternalDataService::new(client, cfg.external.url.clone());
    let state = ServerState::seeded(external);
    Ok(routes::build_router(state, build_cors()))
}

/// Serve `app` on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

/// Public entry: build the app and run the HTTP server
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg)?;

    let addr = parse_bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.to_string(), source })?;

    info!(%addr, external_url = %cfg.external.url, "backend server running on http://{addr}");
    for (method, path) in ROUTES {
        info!("{method:<6} {path}");
    }

    serve(listener, app, shutdown).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 5050;
        assert_eq!(parse_bind_addr(&cfg).unwrap().port(), 5050);

        cfg.server.host = "not a host".into();
        assert!(matches!(parse_bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }
}
