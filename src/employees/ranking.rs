//! Top-N salary selection.
//!
//! A min-heap capped at `n` entries keeps the best candidates seen so far;
//! on overflow the smallest is evicted. Cost is O(len · log n).
//!
//! Equal salaries keep upstream encounter order: of two employees with the
//! same salary the earlier one ranks higher and survives eviction.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::num::ParseIntError;
use thiserror::Error;

use crate::upstream::Employee;

/// An employee whose salary text is not an integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("salary {salary:?} of employee {id} is not an integer")]
pub struct SalaryFormatError {
    pub id: String,
    pub salary: String,
    #[source]
    pub source: ParseIntError,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Rank {
    salary: i64,
    position: Reverse<usize>,
}

/// Select the `n` best-paid employees, highest salary first.
///
/// Returns every employee when `n` exceeds the collection and nothing when
/// `n` is zero. A single unparsable salary aborts the whole ranking.
pub fn top_n_by_salary(n: usize, employees: &[Employee]) -> Result<Vec<Employee>, SalaryFormatError> {
    Ok(top_n_ranked(n, employees)?
        .into_iter()
        .map(|(_, employee)| employee.clone())
        .collect())
}

/// Like [`top_n_by_salary`], paired with each parsed salary.
pub fn top_n_ranked(n: usize, employees: &[Employee]) -> Result<Vec<(i64, &Employee)>, SalaryFormatError> {
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut heap = BinaryHeap::with_capacity(n.min(employees.len()) + 1);
    for (position, employee) in employees.iter().enumerate() {
        let salary = employee.salary_value().map_err(|source| SalaryFormatError {
            id: employee.id.clone(),
            salary: employee.salary.clone(),
            source,
        })?;

        heap.push(Reverse(Rank {
            salary,
            position: Reverse(position),
        }));
        if heap.len() > n {
            heap.pop();
        }
    }

    // Ascending over `Reverse<Rank>` is descending over `Rank`.
    Ok(heap
        .into_sorted_vec()
        .into_iter()
        .map(|Reverse(rank)| (rank.salary, &employees[rank.position.0]))
        .collect())
}
