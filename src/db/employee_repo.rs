use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::employee::Employee;
use crate::utils::validation::{FieldUpdate, FieldValue};

/// Storage operations behind the HTTP handlers.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn create(&self, employee: &Employee) -> Result<(), AppError>;

    /// Fails with `AppError::NotFound` when no row has this id.
    async fn get(&self, id: Uuid) -> Result<Employee, AppError>;

    /// Returns the number of rows removed; zero for an unknown id.
    async fn delete(&self, id: Uuid) -> Result<u64, AppError>;

    async fn exists(&self, id: Uuid) -> Result<bool, AppError>;

    /// Writes only the given columns. An empty set is rejected before any statement runs.
    async fn apply_partial_update(&self, id: Uuid, fields: &[FieldUpdate]) -> Result<u64, AppError>;
}

/// Statement text for one table, rendered once at startup.
#[derive(Debug, Clone)]
pub struct EmployeeQueries {
    pub insert: String,
    pub select: String,
    pub delete: String,
    pub exists: String,
    pub update_prefix: String,
}

impl EmployeeQueries {
    pub fn for_table(table: &str) -> Self {
        EmployeeQueries {
            insert: format!(
                "INSERT INTO {} (id, first_name, last_name, field, start_time, dob, salary) VALUES ($1, $2, $3, $4, $5, $6, $7)",
                table
            ),
            select: format!(
                "SELECT id, first_name, last_name, field, start_time, dob, salary FROM {} WHERE id = $1",
                table
            ),
            delete: format!("DELETE FROM {} WHERE id = $1", table),
            exists: format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", table),
            update_prefix: format!("UPDATE {} SET ", table),
        }
    }
}

/// Builds `UPDATE <table> SET a = $1, b = $2 WHERE id = $n`. Column names come from the
/// allow-list; every value is a bind parameter.
pub fn build_update_query(
    update_prefix: &str,
    id: Uuid,
    fields: &[FieldUpdate],
) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(update_prefix);
    let mut separated = query.separated(", ");

    for update in fields {
        separated.push(format!("{} = ", update.column.column_name()));
        match &update.value {
            FieldValue::Text(v) => separated.push_bind_unseparated(v.clone()),
            FieldValue::Date(v) => separated.push_bind_unseparated(*v),
            FieldValue::Integer(v) => separated.push_bind_unseparated(*v),
        };
    }

    query.push(" WHERE id = ");
    query.push_bind(id);
    query
}

pub struct PgEmployeeRepository {
    pool: PgPool,
    table_name: String,
    queries: EmployeeQueries,
}

impl PgEmployeeRepository {
    pub fn new(pool: PgPool, table_name: impl Into<String>) -> Self {
        let table_name = table_name.into();
        let queries = EmployeeQueries::for_table(&table_name);
        PgEmployeeRepository {
            pool,
            table_name,
            queries,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeRepository {
    async fn create(&self, employee: &Employee) -> Result<(), AppError> {
        sqlx::query(&self.queries.insert)
            .bind(employee.id)
            .bind(&employee.first_name)
            .bind(&employee.last_name)
            .bind(&employee.field)
            .bind(employee.start_time)
            .bind(employee.dob)
            .bind(employee.salary)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Employee, AppError> {
        sqlx::query_as::<_, Employee>(&self.queries.select)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("employee not found.".to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(&self.queries.delete)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let found = sqlx::query_scalar::<_, bool>(&self.queries.exists)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(found)
    }

    async fn apply_partial_update(&self, id: Uuid, fields: &[FieldUpdate]) -> Result<u64, AppError> {
        if fields.is_empty() {
            return Err(AppError::BadRequest(
                "Failed to update. No fields were provided".to_string(),
            ));
        }

        let mut query = build_update_query(&self.queries.update_prefix, id, fields);
        let result = query.build().execute(&self.pool).await?;
        log::debug!(
            "Updated {} column(s) of employee {} in {}",
            fields.len(),
            id,
            self.table_name
        );
        Ok(result.rows_affected())
    }
}
