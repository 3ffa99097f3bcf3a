use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One row of the employee table. Also the create payload: dates come in as `YYYY-MM-DD`.
#[derive(sqlx::FromRow, Serialize, Deserialize, Validate, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Employee {
    pub id: Uuid,
    #[validate(length(min = 1, message = "first_name must not be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name must not be empty"))]
    pub last_name: String,
    pub field: String,
    pub start_time: NaiveDate,
    pub dob: NaiveDate,
    pub salary: i32,
}

/// Read shape returned by `GET /employee/{id}`: dates go out as midnight UTC timestamps.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EmployeeResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub field: String,
    pub start_time: DateTime<Utc>,
    pub dob: DateTime<Utc>,
    pub salary: i32,
}

fn at_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        EmployeeResponse {
            id: employee.id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            field: employee.field,
            start_time: at_midnight(employee.start_time),
            dob: at_midnight(employee.dob),
            salary: employee.salary,
        }
    }
}
