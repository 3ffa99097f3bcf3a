use chrono::NaiveDate;
use serde_json::{Map, Value};
use validator::Validate;

use crate::errors::AppError;

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(|err| {
        let mut details = err
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let errors = errs
                    .iter()
                    .map(|e| e.message.as_deref().unwrap_or(e.code.as_ref()).to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}: [{}]", field, errors)
            })
            .collect::<Vec<_>>();
        details.sort();
        AppError::BadRequest(format!("Validation failed: {}", details.join("; ")))
    })
}

/// Columns a partial update may touch. Declaration order is the order of the SET clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EmployeeColumn {
    Id,
    FirstName,
    LastName,
    Field,
    StartTime,
    Dob,
    Salary,
}

impl EmployeeColumn {
    pub const ALL: [EmployeeColumn; 7] = [
        EmployeeColumn::Id,
        EmployeeColumn::FirstName,
        EmployeeColumn::LastName,
        EmployeeColumn::Field,
        EmployeeColumn::StartTime,
        EmployeeColumn::Dob,
        EmployeeColumn::Salary,
    ];

    /// Request field name to column. Field names and column names coincide.
    pub fn from_field(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.column_name() == name)
    }

    pub fn column_name(self) -> &'static str {
        match self {
            EmployeeColumn::Id => "id",
            EmployeeColumn::FirstName => "first_name",
            EmployeeColumn::LastName => "last_name",
            EmployeeColumn::Field => "field",
            EmployeeColumn::StartTime => "start_time",
            EmployeeColumn::Dob => "dob",
            EmployeeColumn::Salary => "salary",
        }
    }

    fn coerce(self, value: &Value) -> Result<FieldValue, String> {
        let name = self.column_name();
        match self {
            EmployeeColumn::Id => Err(format!("{} is immutable once created", name)),
            EmployeeColumn::FirstName | EmployeeColumn::LastName => match value.as_str() {
                Some(s) if !s.is_empty() => Ok(FieldValue::Text(s.to_string())),
                _ => Err(format!("{} must be a non-empty string", name)),
            },
            EmployeeColumn::Field => value
                .as_str()
                .map(|s| FieldValue::Text(s.to_string()))
                .ok_or_else(|| format!("{} must be a string", name)),
            EmployeeColumn::StartTime | EmployeeColumn::Dob => value
                .as_str()
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
                .map(FieldValue::Date)
                .ok_or_else(|| format!("{} must be a date formatted YYYY-MM-DD", name)),
            EmployeeColumn::Salary => value
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .map(FieldValue::Integer)
                .ok_or_else(|| format!("{} must be a 32-bit integer", name)),
        }
    }
}

/// A typed value, bound as a statement parameter and never spliced into SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
    Integer(i32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    pub column: EmployeeColumn,
    pub value: FieldValue,
}

/// Checks every key of an update body against the column allow-list and coerces each
/// value to its column type. Any failure rejects the whole set.
pub fn validate_update_fields(fields: &Map<String, Value>) -> Result<Vec<FieldUpdate>, AppError> {
    if fields.is_empty() {
        return Err(AppError::BadRequest(
            "Failed to update. No fields were provided".to_string(),
        ));
    }

    let mut columns = Vec::with_capacity(fields.len());
    for key in fields.keys() {
        match EmployeeColumn::from_field(key) {
            Some(column) => columns.push((column, key)),
            None => {
                return Err(AppError::BadRequest(format!(
                    "Failed to update. Key: {} is not a valid name",
                    key
                )))
            }
        }
    }

    let mut updates = Vec::with_capacity(columns.len());
    for (column, key) in columns {
        let value = column
            .coerce(&fields[key])
            .map_err(|msg| AppError::BadRequest(format!("Failed to update. {}", msg)))?;
        updates.push(FieldUpdate { column, value });
    }
    updates.sort_by_key(|u| u.column);

    Ok(updates)
}
