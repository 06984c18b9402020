//! Employee aggregation subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → service.rs (search / ranking / create / delete composition)
//!         → validation.rs (create-input rules, all violations collected)
//!         → ranking.rs (bounded min-heap top-N by salary)
//!     → upstream gateway
//! ```

pub mod error;
pub mod ranking;
pub mod service;
pub mod validation;

pub use error::{EmployeeError, EmployeeResult};
pub use ranking::{top_n_by_salary, SalaryFormatError};
pub use service::EmployeeService;
pub use validation::{validate_create, CreateEmployeeRequest, ValidationError};
