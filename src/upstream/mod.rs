//! Upstream gateway subsystem.
//!
//! # Data Flow
//! ```text
//! EmployeeService
//!     → gateway.rs (EmployeeGateway port)
//!     → client.rs (reqwest call, status classification, envelope decoding)
//!     → upstream employee API
//! ```
//!
//! # Design Decisions
//! - 429 is reported as RateLimited, every other fault as Failure
//! - Absent payloads are empty results, not errors (except for create)
//! - Retry/backoff is left to callers; nothing here retries

pub mod client;
pub mod gateway;
pub mod types;

pub use client::{GatewayInitError, HttpEmployeeGateway};
pub use gateway::EmployeeGateway;
pub use types::{Employee, NewEmployee, Operation, UpstreamError, UpstreamResult};
