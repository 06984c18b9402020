//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers, service and gateway produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached to the request span
//! - Metrics are cheap and recorded unconditionally

pub mod logging;
pub mod metrics;
