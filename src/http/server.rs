//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the employee routes
//! - Wire up middleware (request ID, tracing, metrics, timeout, body limit)
//! - Serve on a listener until the shutdown future resolves

use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::get,
    Router,
};
use std::future::Future;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::employees::EmployeeService;
use crate::http::handlers;
use crate::observability::metrics;

macro_rules! employee_path {
    ($suffix:literal) => {
        concat!("/api/v1/employee", $suffix)
    };
}

/// Collection path; every employee route hangs off it.
pub const EMPLOYEE_BASE_PATH: &str = employee_path!("");

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: EmployeeService,
}

/// HTTP server fronting the employee service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig, service: EmployeeService) -> Self {
        let router = Self::build_router(&config, AppState { service });
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route(
                EMPLOYEE_BASE_PATH,
                get(handlers::list_all).post(handlers::create),
            )
            .route(employee_path!("/search/{search_string}"), get(handlers::search))
            .route(employee_path!("/highestSalary"), get(handlers::highest_salary))
            .route(
                employee_path!("/topTenHighestEarningEmployeeNames"),
                get(handlers::top_ten_names),
            )
            .route(
                employee_path!("/{id}"),
                get(handlers::get_by_id).delete(handlers::delete_by_id),
            )
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.server.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.server.request_timeout_secs)))
            .layer(middleware::from_fn(metrics::track_requests))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` resolves, then drain in-flight requests.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

fn request_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
