#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use employee_rds::db::employee_repo::EmployeeStore;
use employee_rds::errors::AppError;
use employee_rds::models::employee::Employee;
use employee_rds::state::AppState;
use employee_rds::utils::validation::{EmployeeColumn, FieldUpdate, FieldValue};

/// Builds the service with the real route table and fallback over the given state.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .configure(employee_rds::routes::configure)
                .default_service(actix_web::web::to(
                    employee_rds::handlers::fallback::route_not_found,
                )),
        )
        .await
    };
}

/// Table stand-in. Counts every statement that would have written to storage.
#[derive(Default)]
pub struct InMemoryStore {
    rows: Mutex<HashMap<Uuid, Employee>>,
    mutations: AtomicUsize,
}

impl InMemoryStore {
    pub fn mutations(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    pub fn row(&self, id: Uuid) -> Option<Employee> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl EmployeeStore for InMemoryStore {
    async fn create(&self, employee: &Employee) -> Result<(), AppError> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&employee.id) {
            return Err(AppError::DatabaseError(
                "duplicate key value violates unique constraint \"employees_pkey\"".to_string(),
            ));
        }
        rows.insert(employee.id, employee.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Employee, AppError> {
        self.row(id)
            .ok_or_else(|| AppError::NotFound("employee not found.".to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().unwrap().remove(&id).map_or(0, |_| 1))
    }

    async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.rows.lock().unwrap().contains_key(&id))
    }

    async fn apply_partial_update(&self, id: Uuid, fields: &[FieldUpdate]) -> Result<u64, AppError> {
        if fields.is_empty() {
            return Err(AppError::BadRequest("Failed to update. No fields were provided".to_string()));
        }
        self.mutations.fetch_add(1, Ordering::SeqCst);

        let mut rows = self.rows.lock().unwrap();
        let Some(mut employee) = rows.remove(&id) else {
            return Ok(0);
        };
        for update in fields {
            match (update.column, &update.value) {
                (EmployeeColumn::FirstName, FieldValue::Text(v)) => employee.first_name = v.clone(),
                (EmployeeColumn::LastName, FieldValue::Text(v)) => employee.last_name = v.clone(),
                (EmployeeColumn::Field, FieldValue::Text(v)) => employee.field = v.clone(),
                (EmployeeColumn::StartTime, FieldValue::Date(v)) => employee.start_time = *v,
                (EmployeeColumn::Dob, FieldValue::Date(v)) => employee.dob = *v,
                (EmployeeColumn::Salary, FieldValue::Integer(v)) => employee.salary = *v,
                (column, value) => panic!("{:?} cannot hold {:?}", column, value),
            }
        }
        rows.insert(employee.id, employee);
        Ok(1)
    }
}

/// Every call fails the way a dropped database connection would.
pub struct BrokenStore;

#[async_trait]
impl EmployeeStore for BrokenStore {
    async fn create(&self, _: &Employee) -> Result<(), AppError> {
        Err(broken())
    }

    async fn get(&self, _: Uuid) -> Result<Employee, AppError> {
        Err(broken())
    }

    async fn delete(&self, _: Uuid) -> Result<u64, AppError> {
        Err(broken())
    }

    async fn exists(&self, _: Uuid) -> Result<bool, AppError> {
        Err(broken())
    }

    async fn apply_partial_update(&self, _: Uuid, _: &[FieldUpdate]) -> Result<u64, AppError> {
        Err(broken())
    }
}

fn broken() -> AppError {
    AppError::DatabaseError("connection reset by peer".to_string())
}

/// Answers every call only after `delay`.
pub struct SlowStore {
    pub delay: Duration,
}

#[async_trait]
impl EmployeeStore for SlowStore {
    async fn create(&self, _: &Employee) -> Result<(), AppError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }

    async fn get(&self, _: Uuid) -> Result<Employee, AppError> {
        tokio::time::sleep(self.delay).await;
        Err(AppError::NotFound("employee not found.".to_string()))
    }

    async fn delete(&self, _: Uuid) -> Result<u64, AppError> {
        tokio::time::sleep(self.delay).await;
        Ok(0)
    }

    async fn exists(&self, _: Uuid) -> Result<bool, AppError> {
        tokio::time::sleep(self.delay).await;
        Ok(true)
    }

    async fn apply_partial_update(&self, _: Uuid, _: &[FieldUpdate]) -> Result<u64, AppError> {
        tokio::time::sleep(self.delay).await;
        Ok(0)
    }
}

pub fn state_with(store: Arc<dyn EmployeeStore>) -> AppState {
    AppState::new(store, Duration::from_secs(5))
}

pub fn ada(id: Uuid) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "first_name": "Ada",
        "last_name": "Lovelace",
        "field": "Engineering",
        "start_time": "2012-05-01",
        "dob": "1990-01-01",
        "salary": 75000
    })
}

pub fn ada_row(id: Uuid) -> Employee {
    Employee {
        id,
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        field: "Engineering".to_string(),
        start_time: NaiveDate::from_ymd_opt(2012, 5, 1).unwrap(),
        dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        salary: 75000,
    }
}
