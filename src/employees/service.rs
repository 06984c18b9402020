//! Aggregation service layered over the upstream gateway.
//!
//! Each call performs at most one upstream round trip, except delete which
//! resolves the id to a name first. Nothing is cached between calls.

use std::sync::Arc;

use crate::employees::error::{EmployeeError, EmployeeResult};
use crate::employees::ranking::{top_n_by_salary, top_n_ranked};
use crate::employees::validation::{validate_create, CreateEmployeeRequest};
use crate::upstream::{Employee, EmployeeGateway};

/// Number of names returned by [`EmployeeService::top_ten_names`].
pub const TOP_EARNERS: usize = 10;

/// Keep employees whose name contains `query`, ignoring case.
///
/// An empty query matches everyone. Upstream order is preserved.
pub fn filter_by_name(employees: Vec<Employee>, query: &str) -> Vec<Employee> {
    let needle = query.to_lowercase();
    employees
        .into_iter()
        .filter(|employee| employee.name.to_lowercase().contains(&needle))
        .collect()
}

/// Employee operations exposed to the HTTP layer.
#[derive(Clone)]
pub struct EmployeeService {
    gateway: Arc<dyn EmployeeGateway>,
}

impl EmployeeService {
    pub fn new(gateway: Arc<dyn EmployeeGateway>) -> Self {
        Self { gateway }
    }

    pub async fn list_all(&self) -> EmployeeResult<Vec<Employee>> {
        Ok(self.gateway.list_all().await?)
    }

    pub async fn search(&self, query: &str) -> EmployeeResult<Vec<Employee>> {
        let employees = self.gateway.list_all().await?;
        let total = employees.len();
        let matches = filter_by_name(employees, query);
        tracing::debug!(query = %query, total, matched = matches.len(), "Name search");
        Ok(matches)
    }

    pub async fn get_by_id(&self, id: &str) -> EmployeeResult<Option<Employee>> {
        Ok(self.gateway.get_by_id(id).await?)
    }

    /// Highest salary across all employees; `None` when there are none.
    pub async fn highest_salary(&self) -> EmployeeResult<Option<i64>> {
        let employees = self.gateway.list_all().await?;
        let top = top_n_ranked(1, &employees)?;
        Ok(top.first().map(|(salary, _)| *salary))
    }

    /// Names of the ten best-paid employees, highest salary first.
    pub async fn top_ten_names(&self) -> EmployeeResult<Vec<String>> {
        let employees = self.gateway.list_all().await?;
        let top = top_n_by_salary(TOP_EARNERS, &employees)?;
        Ok(top.into_iter().map(|employee| employee.name).collect())
    }

    pub async fn create(&self, request: &CreateEmployeeRequest) -> EmployeeResult<Employee> {
        let new_employee = validate_create(request).map_err(|e| {
            tracing::info!(violations = %e, "Rejected create request");
            e
        })?;
        Ok(self.gateway.create(&new_employee).await?)
    }

    /// Delete the employee with `id`, returning their name.
    ///
    /// Upstream deletes by name, so the id is resolved first.
    pub async fn delete_by_id(&self, id: &str) -> EmployeeResult<Option<String>> {
        let Some(employee) = self.gateway.get_by_id(id).await? else {
            return Ok(None);
        };

        if employee.name.trim().is_empty() {
            return Err(EmployeeError::BadRequest("Employee name is blank".to_string()));
        }

        if !self.gateway.delete_by_name(&employee.name).await? {
            tracing::warn!(id = %id, name = %employee.name, "Upstream did not confirm delete");
            return Err(EmployeeError::DeleteRejected { name: employee.name });
        }

        tracing::info!(id = %id, "Employee deleted");
        Ok(Some(employee.name))
    }
}

impl std::fmt::Debug for EmployeeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmployeeService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employees::validation::{NAME_BLANK, TITLE_BLANK};
    use crate::upstream::{NewEmployee, Operation, UpstreamError, UpstreamResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubGateway {
        employees: Vec<Employee>,
        failure: Option<UpstreamError>,
        confirm_delete: bool,
        deleted: Mutex<Vec<String>>,
        created: Mutex<Vec<NewEmployee>>,
    }

    impl StubGateway {
        fn with(employees: Vec<Employee>) -> Self {
            Self {
                employees,
                confirm_delete: true,
                ..Self::default()
            }
        }

        fn check(&self) -> UpstreamResult<()> {
            match &self.failure {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl EmployeeGateway for StubGateway {
        async fn list_all(&self) -> UpstreamResult<Vec<Employee>> {
            self.check()?;
            Ok(self.employees.clone())
        }

        async fn get_by_id(&self, id: &str) -> UpstreamResult<Option<Employee>> {
            self.check()?;
            Ok(self.employees.iter().find(|e| e.id == id).cloned())
        }

        async fn create(&self, employee: &NewEmployee) -> UpstreamResult<Employee> {
            self.check()?;
            self.created.lock().unwrap().push(employee.clone());
            Ok(Employee {
                id: "generated".into(),
                name: employee.name.clone(),
                salary: employee.salary.to_string(),
                age: employee.age,
                title: employee.title.clone(),
                email: String::new(),
            })
        }

        async fn delete_by_name(&self, name: &str) -> UpstreamResult<bool> {
            self.check()?;
            self.deleted.lock().unwrap().push(name.to_string());
            Ok(self.confirm_delete)
        }
    }

    fn employee(id: &str, name: &str, salary: &str) -> Employee {
        Employee {
            id: id.into(),
            name: name.into(),
            salary: salary.into(),
            age: 54,
            title: "Software Engineer".into(),
            email: "foo@bar.com".into(),
        }
    }

    fn roster() -> Vec<Employee> {
        vec![
            employee("1", "John Doe", "57000"),
            employee("2", "Billy Sue", "61000"),
            employee("3", "Bob Test", "45000"),
            employee("4", "Alice Tester", "99000"),
            employee("5", "Foo Bar", "12000"),
        ]
    }

    fn build(gateway: StubGateway) -> (EmployeeService, Arc<StubGateway>) {
        let gateway = Arc::new(gateway);
        (EmployeeService::new(gateway.clone()), gateway)
    }

    #[tokio::test]
    async fn test_search_matches_substring_in_order() {
        let (service, _) = build(StubGateway::with(roster()));
        let found = service.search("Test").await.unwrap();
        let ids: Vec<&str> = found.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "4"]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let (service, _) = build(StubGateway::with(vec![employee("1", "JOHN doe", "1")]));
        let lower = service.search("john doe").await.unwrap();
        let upper = service.search("JOHN DOE").await.unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.len(), 1);
    }

    #[tokio::test]
    async fn test_search_partial_and_missing() {
        let (service, _) = build(StubGateway::with(vec![employee("1", "one fish two fish", "1")]));
        assert_eq!(service.search("sh tw").await.unwrap().len(), 1);
        assert!(service.search("Test").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_empty_query_matches_all() {
        let (service, _) = build(StubGateway::with(roster()));
        assert_eq!(service.search("").await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_search_propagates_rate_limit() {
        let (service, _) = build(StubGateway {
            failure: Some(UpstreamError::RateLimited { operation: Operation::ListAll }),
            ..StubGateway::default()
        });
        let error = service.search("x").await.unwrap_err();
        assert!(matches!(error, EmployeeError::Upstream(UpstreamError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn test_highest_salary() {
        let (service, _) = build(StubGateway::with(roster()));
        assert_eq!(service.highest_salary().await.unwrap(), Some(99000));
    }

    #[tokio::test]
    async fn test_highest_salary_without_employees() {
        let (service, _) = build(StubGateway::with(Vec::new()));
        assert_eq!(service.highest_salary().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_highest_salary_bad_data() {
        let mut employees = roster();
        employees.push(employee("6", "Broken", "n/a"));
        let (service, _) = build(StubGateway::with(employees));
        let error = service.highest_salary().await.unwrap_err();
        assert!(matches!(error, EmployeeError::DataIntegrity(_)));
    }

    #[tokio::test]
    async fn test_top_ten_names() {
        let employees: Vec<Employee> = (0..15)
            .map(|i| employee(&i.to_string(), &format!("name {i}"), &(i * 1000).to_string()))
            .collect();
        let (service, _) = build(StubGateway::with(employees));
        let names = service.top_ten_names().await.unwrap();
        let expected: Vec<String> = (5..15).rev().map(|i| format!("name {i}")).collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn test_create_validates_before_calling_upstream() {
        let (service, gateway) = build(StubGateway::with(Vec::new()));
        let request = CreateEmployeeRequest {
            name: Some(" ".into()),
            salary: Some("10".into()),
            age: Some(30),
            title: None,
        };
        let error = service.create(&request).await.unwrap_err();
        match error {
            EmployeeError::Validation(e) => assert_eq!(e.violations(), &[NAME_BLANK, TITLE_BLANK]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(gateway.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_forwards_validated_record() {
        let (service, gateway) = build(StubGateway::with(Vec::new()));
        let request = CreateEmployeeRequest {
            name: Some("john doe".into()),
            salary: Some("123456".into()),
            age: Some(26),
            title: Some("IT Technician".into()),
        };
        let created = service.create(&request).await.unwrap();
        assert_eq!(created.id, "generated");
        assert_eq!(gateway.created.lock().unwrap()[0].salary, 123456);
    }

    #[tokio::test]
    async fn test_delete_by_id_resolves_name() {
        let (service, gateway) = build(StubGateway::with(roster()));
        let name = service.delete_by_id("2").await.unwrap();
        assert_eq!(name.as_deref(), Some("Billy Sue"));
        assert_eq!(*gateway.deleted.lock().unwrap(), vec!["Billy Sue".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_by_id_missing() {
        let (service, gateway) = build(StubGateway::with(roster()));
        assert_eq!(service.delete_by_id("nope").await.unwrap(), None);
        assert!(gateway.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_id_blank_name() {
        let (service, gateway) = build(StubGateway::with(vec![employee("1", "  ", "1")]));
        let error = service.delete_by_id("1").await.unwrap_err();
        assert!(matches!(error, EmployeeError::BadRequest(ref m) if m == "Employee name is blank"));
        assert!(gateway.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_id_unconfirmed() {
        let (service, _) = build(StubGateway {
            confirm_delete: false,
            ..StubGateway::with(roster())
        });
        let error = service.delete_by_id("1").await.unwrap_err();
        assert!(matches!(error, EmployeeError::DeleteRejected { ref name } if name == "John Doe"));
    }
}
