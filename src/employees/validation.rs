//! Create-input validation.
//!
//! Every rule is checked and all violations are reported together.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::upstream::types::optional_salary_text;
use crate::upstream::NewEmployee;

pub const MIN_AGE: i32 = 16;
pub const MAX_AGE: i32 = 75;

pub const NAME_BLANK: &str = "Name cannot be null or blank.";
pub const SALARY_MISSING: &str = "Salary must not be null.";
pub const SALARY_NOT_INTEGER: &str = "Salary string must parse to an integer.";
pub const SALARY_NOT_POSITIVE: &str = "Salary must be greater than zero.";
pub const AGE_MISSING: &str = "Age must not be null.";
pub const AGE_OUT_OF_RANGE: &str = "Age must be between 16 and 75.";
pub const TITLE_BLANK: &str = "Title must not be null or blank.";

/// Unvalidated create input as received from callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreateEmployeeRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "optional_salary_text")]
    pub salary: Option<String>,
    pub age: Option<i32>,
    pub title: Option<String>,
}

/// One or more rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
    violations: Vec<&'static str>,
}

impl ValidationError {
    pub fn violations(&self) -> &[&'static str] {
        &self.violations
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.violations.join(" "))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Check a create request, returning the typed record on success.
pub fn validate_create(request: &CreateEmployeeRequest) -> Result<NewEmployee, ValidationError> {
    let mut violations = Vec::new();

    let name = non_blank(request.name.as_deref());
    if name.is_none() {
        violations.push(NAME_BLANK);
    }

    let salary = match request.salary.as_deref() {
        None => {
            violations.push(SALARY_MISSING);
            None
        }
        Some(text) => match text.parse::<i32>() {
            Ok(salary) if salary > 0 => Some(i64::from(salary)),
            Ok(_) => {
                violations.push(SALARY_NOT_POSITIVE);
                None
            }
            Err(_) => {
                violations.push(SALARY_NOT_INTEGER);
                None
            }
        },
    };

    let age = match request.age {
        None => {
            violations.push(AGE_MISSING);
            None
        }
        Some(age) if !(MIN_AGE..=MAX_AGE).contains(&age) => {
            violations.push(AGE_OUT_OF_RANGE);
            None
        }
        Some(age) => Some(age),
    };

    let title = non_blank(request.title.as_deref());
    if title.is_none() {
        violations.push(TITLE_BLANK);
    }

    match (name, salary, age, title) {
        (Some(name), Some(salary), Some(age), Some(title)) => Ok(NewEmployee {
            name: name.to_string(),
            salary,
            age,
            title: title.to_string(),
        }),
        _ => Err(ValidationError { violations }),
    }
}
