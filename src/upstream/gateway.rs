//! Gateway port used by the aggregation service.

use async_trait::async_trait;

use crate::upstream::types::{Employee, NewEmployee, UpstreamResult};

/// Domain operations against the upstream employee API.
///
/// Implementations classify HTTP failures into [`UpstreamError`] and never
/// retry on their own.
///
/// [`UpstreamError`]: crate::upstream::UpstreamError
#[async_trait]
pub trait EmployeeGateway: Send + Sync {
    /// Every employee, in upstream order. An absent payload is an empty list.
    async fn list_all(&self) -> UpstreamResult<Vec<Employee>>;

    /// `None` when upstream answers without a payload or with a null record.
    async fn get_by_id(&self, id: &str) -> UpstreamResult<Option<Employee>>;

    /// Create an employee and return the record upstream assigned.
    async fn create(&self, employee: &NewEmployee) -> UpstreamResult<Employee>;

    /// Delete by name. `false` when upstream did not confirm the delete.
    async fn delete_by_name(&self, name: &str) -> UpstreamResult<bool>;
}
