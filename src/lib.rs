//! Backend-for-frontend over a third-party employee API.
//!
//! Adds name search, top-N salary ranking and create-input validation on
//! top of an upstream that may throttle or fail.

pub mod config;
pub mod employees;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::schema::ServiceConfig;
pub use employees::EmployeeService;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use upstream::{EmployeeGateway, HttpEmployeeGateway};
