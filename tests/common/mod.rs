//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    Router,
};
use employee_bff::config::ServiceConfig;
use employee_bff::{EmployeeService, HttpEmployeeGateway, HttpServer};
use tokio::net::TcpListener;

/// A request as seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub body: String,
}

type Responder = dyn Fn(&Recorded) -> (u16, String) + Send + Sync;

struct MockState {
    requests: Mutex<Vec<Recorded>>,
    responder: Box<Responder>,
}

/// Handle to a running mock upstream.
#[derive(Clone)]
pub struct MockUpstream {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockUpstream {
    /// Base URL the gateway should be pointed at.
    pub fn base_url(&self) -> String {
        format!("http://{}/api/v1/employee", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    body: String,
) -> (StatusCode, String) {
    let recorded = Recorded {
        method,
        path: uri.path().to_string(),
        body,
    };
    let (status, body) = (state.responder)(&recorded);
    state.requests.lock().unwrap().push(recorded);
    (StatusCode::from_u16(status).unwrap(), body)
}

/// Start a programmable mock upstream on an ephemeral port.
pub async fn start_programmable_backend<F>(f: F) -> MockUpstream
where
    F: Fn(&Recorded) -> (u16, String) + Send + Sync + 'static,
{
    let state = Arc::new(MockState {
        requests: Mutex::new(Vec::new()),
        responder: Box::new(f),
    });
    let app = Router::new().fallback(handle).with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockUpstream { addr, state }
}

/// Start a mock upstream that always answers with the same status and body.
pub async fn start_mock_backend(status: u16, body: &'static str) -> MockUpstream {
    start_programmable_backend(move |_| (status, body.to_string())).await
}

/// Gateway pointed at the mock upstream.
pub fn gateway_for(upstream: &MockUpstream) -> HttpEmployeeGateway {
    let mut config = ServiceConfig::default();
    config.upstream.base_url = upstream.base_url();
    HttpEmployeeGateway::from_config(&config.upstream).unwrap()
}

/// Start the BFF in front of the mock upstream; returns its base URL.
pub async fn start_bff(upstream: &MockUpstream) -> String {
    let mut config = ServiceConfig::default();
    config.upstream.base_url = upstream.base_url();
    let gateway = HttpEmployeeGateway::from_config(&config.upstream).unwrap();
    let service = EmployeeService::new(Arc::new(gateway));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config, service);
    tokio::spawn(async move {
        server.run(listener, std::future::pending()).await.unwrap();
    });

    format!("http://{addr}")
}

/// Upstream JSON for one employee.
pub fn employee_json(id: &str, name: &str, salary: i64) -> String {
    format!(
        r#"{{"id":"{id}","employee_name":"{name}","employee_salary":{salary},"employee_age":30,"employee_title":"Engineer","employee_email":"{id}@company.com"}}"#
    )
}

/// Wrap a JSON value in the upstream `data` envelope.
pub fn envelope(data: &str) -> String {
    format!(r#"{{"data":{data},"status":"Successfully processed request."}}"#)
}

/// Envelope holding a list of employees given as (id, name, salary).
pub fn employee_list(rows: &[(&str, &str, i64)]) -> String {
    let items: Vec<String> = rows
        .iter()
        .map(|(id, name, salary)| employee_json(id, name, *salary))
        .collect();
    envelope(&format!("[{}]", items.join(",")))
}
