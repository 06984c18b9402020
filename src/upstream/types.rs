//! Upstream record types, wire envelopes and error definitions.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// An employee record as served by the upstream API.
///
/// The same shape is handed back to our own callers, so field names follow
/// the upstream wire format.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Employee {
    /// Opaque upstream identifier.
    pub id: String,

    #[serde(rename = "employee_name")]
    pub name: String,

    /// Decimal salary text. Upstream may send a string or a number.
    #[serde(rename = "employee_salary", deserialize_with = "salary_text")]
    pub salary: String,

    #[serde(rename = "employee_age", default, deserialize_with = "null_as_default")]
    pub age: i32,

    #[serde(rename = "employee_title", default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(rename = "employee_email", default, deserialize_with = "null_as_default")]
    pub email: String,
}

impl Employee {
    /// Parse the salary text as an integer.
    pub fn salary_value(&self) -> Result<i64, std::num::ParseIntError> {
        self.salary.parse()
    }
}

/// A create request that already passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub salary: i64,
    pub age: i32,
    pub title: String,
}

/// The upstream operations, named the way they appear in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListAll,
    GetById,
    Create,
    DeleteByName,
}

impl Operation {
    /// Stable label for metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            Operation::ListAll => "list_all",
            Operation::GetById => "get_by_id",
            Operation::Create => "create",
            Operation::DeleteByName => "delete_by_name",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Operation::ListAll => "retrieve employees",
            Operation::GetById => "retrieve employee",
            Operation::Create => "create employee",
            Operation::DeleteByName => "delete employee",
        };
        f.write_str(text)
    }
}

/// Failures reported by the gateway. Never retried inside this layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// Upstream answered 429.
    #[error("Failed to {operation}. Rate limit exceeded")]
    RateLimited { operation: Operation },

    /// Any other non-success status, transport fault or unusable payload.
    #[error("Failed to {operation}")]
    Failure { operation: Operation, detail: String },
}

impl UpstreamError {
    pub fn operation(&self) -> Operation {
        match self {
            UpstreamError::RateLimited { operation } | UpstreamError::Failure { operation, .. } => {
                *operation
            }
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, UpstreamError::RateLimited { .. })
    }
}

/// Result type for gateway operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// `{ "data": ... }` envelope wrapping every upstream payload.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: Option<T>,
}

/// Body of `POST {base}`.
#[derive(Debug, Serialize)]
pub struct CreateEmployeePayload<'a> {
    pub name: &'a str,
    pub salary: String,
    pub age: i32,
    pub title: &'a str,
}

impl<'a> From<&'a NewEmployee> for CreateEmployeePayload<'a> {
    fn from(employee: &'a NewEmployee) -> Self {
        Self {
            name: &employee.name,
            salary: employee.salary.to_string(),
            age: employee.age,
            title: &employee.title,
        }
    }
}

/// Body of `DELETE {base}`.
#[derive(Debug, Serialize)]
pub struct DeleteEmployeePayload<'a> {
    pub name: &'a str,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumericText {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<NumericText> for String {
    fn from(value: NumericText) -> Self {
        match value {
            NumericText::Text(text) => text,
            NumericText::Integer(n) => n.to_string(),
            NumericText::Float(n) => n.to_string(),
        }
    }
}

/// Accept salary as either a JSON string or number, keeping it as text.
pub(crate) fn salary_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    NumericText::deserialize(deserializer).map(String::from)
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Same as [`salary_text`] for optional inbound fields.
pub(crate) fn optional_salary_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumericText>::deserialize(deserializer).map(|value| value.map(String::from))
}
