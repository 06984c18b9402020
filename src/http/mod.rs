//! HTTP presentation layer.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, middleware: request id, trace, metrics, timeout, body limit)
//!     → handlers.rs (extract path/body, call EmployeeService)
//!     → response.rs (EmployeeError → status code + body)
//!     → Send to client
//! ```

pub mod handlers;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer, EMPLOYEE_BASE_PATH};
