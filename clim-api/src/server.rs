//! HTTP server: router construction and the serve loop

use axum::routing::get;
use axum::{middleware, Router};
use clim_db::Database;
use std::future::Future;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;

use crate::config::ServerConfig;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::web::handlers::{api, home};
use crate::web::request_log::log_requests;

/// Read-only climate observation API server
#[derive(Clone)]
pub struct ClimateServer {
    config: ServerConfig,
    state: AppState,
}

impl ClimateServer {
    pub fn new(config: ServerConfig, db: Database) -> Self {
        Self {
            config,
            state: AppState::new(db),
        }
    }

    /// Build the Axum router with all routes.
    ///
    /// The fixed `/api/v1.0/*` routes take precedence over the `:start`
    /// capture, so `/api/v1.0/tobs` never reaches the summary handler.
    pub fn build_router(&self) -> Router {
        let routes = Router::new()
            .route("/", get(home::home))
            .route("/api/v1.0/precipitation", get(api::precipitation))
            .route("/api/v1.0/stations", get(api::stations))
            .route("/api/v1.0/tobs", get(api::tobs))
            .route("/api/v1.0/:start", get(api::summary_from))
            .route("/api/v1.0/:start/:end", get(api::summary_between));
        with_middleware(routes, self.config.request_timeout).with_state(self.state.clone())
    }

    /// Bind the configured address and serve until Ctrl+C.
    pub async fn run(self) -> ApiResult<()> {
        let addr = self.config.bind_addr;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::ServerStartup(format!("Failed to bind to {}: {}", addr, e)))?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> ApiResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        log::info!("[clim-api] listening on http://{}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        log::info!("[clim-api] server stopped");
        Ok(())
    }
}

/// Request logging plus a per-request timeout answered with 408.
fn with_middleware(routes: Router<AppState>, request_timeout: Duration) -> Router<AppState> {
    routes.layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn(log_requests))
            .layer(TimeoutLayer::new(request_timeout)),
    )
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("[clim-api] received Ctrl+C, shutting down"),
        Err(e) => log::error!("[clim-api] failed to listen for Ctrl+C: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const STATIONS_CSV: &str = "\
station,name,latitude,longitude,elevation
USC00519397,\"WAIKIKI 717.2, HI US\",21.2716,-157.8168,3.0
USC00519281,\"WAIHEE 837.5, HI US\",21.45167,-157.84889,32.9
";

    const MEASUREMENTS_CSV: &str = "\
station,date,prcp,tobs
USC00519397,2016-08-23,0.00,81
USC00519397,2017-08-23,0.00,81
USC00519281,2016-08-23,1.79,77
USC00519281,2016-08-24,,77
USC00519281,2017-08-18,0.06,79
";

    fn test_router() -> Router {
        let db = Database::new().unwrap();
        db.load_stations(STATIONS_CSV).unwrap();
        db.load_measurements(MEASUREMENTS_CSV).unwrap();
        ClimateServer::new(ServerConfig::default(), db).build_router()
    }

    async fn get(router: Router, uri: &str) -> Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = get(test_router(), uri).await;
        let status = response.status();
        assert_eq!(response.headers()["content-type"], "application/json");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn home_lists_routes_as_html() {
        let response = get(test_router(), "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("/api/v1.0/precipitation"));
        assert!(body.contains("/api/v1.0/START DATE/END DATE"));
    }

    #[tokio::test]
    async fn precipitation_returns_date_prcp_objects() {
        let (status, body) = get_json("/api/v1.0/precipitation").await;
        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], json!({"date": "2016-08-23", "prcp": 0.0}));
        assert_eq!(rows[3], json!({"date": "2016-08-24", "prcp": null}));
    }

    #[tokio::test]
    async fn stations_returns_flat_names() {
        let (status, body) = get_json("/api/v1.0/stations").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["WAIKIKI 717.2, HI US", "WAIHEE 837.5, HI US"]));
    }

    #[tokio::test]
    async fn tobs_returns_pairs_for_most_active_station() {
        let (status, body) = get_json("/api/v1.0/tobs").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([["2016-08-24", 77.0], ["2017-08-18", 79.0]]));
    }

    #[tokio::test]
    async fn start_summary_returns_triple() {
        let (status, body) = get_json("/api/v1.0/2016-08-24").await;
        assert_eq!(status, StatusCode::OK);
        // tobs: 81 77 79
        assert_eq!(body, json!([77.0, 79.0, 81.0]));
    }

    #[tokio::test]
    async fn start_end_summary_returns_triple() {
        let (status, body) = get_json("/api/v1.0/2016-08-23/2016-08-24").await;
        assert_eq!(status, StatusCode::OK);
        // tobs: 81 77 77
        assert_eq!(body, json!([77.0, 78.33, 81.0]));
    }

    #[tokio::test]
    async fn reversed_range_returns_nulls() {
        let (status, body) = get_json("/api/v1.0/2017-08-23/2016-08-23").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([null, null, null]));
    }

    #[tokio::test]
    async fn unparsable_start_is_not_an_error() {
        let (status, body) = get_json("/api/v1.0/someday").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([null, null, null]));
    }

    #[tokio::test]
    async fn unknown_nested_route_is_not_found() {
        let response = get(test_router(), "/api/v1.0/a/b/c").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn slow_request_times_out() {
        let routes = Router::new().route(
            "/slow",
            axum::routing::get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let router = with_middleware(routes, Duration::from_millis(20))
            .with_state(AppState::new(Database::new().unwrap()));
        let response = get(router, "/slow").await;
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn writes_are_not_routed() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1.0/precipitation")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
