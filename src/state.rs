use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::db::employee_repo::EmployeeStore;
use crate::errors::AppError;

/// Built once at startup and shared with every handler through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EmployeeStore>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(store: Arc<dyn EmployeeStore>, request_timeout: Duration) -> Self {
        AppState {
            store,
            request_timeout,
        }
    }

    /// Runs a storage call under the request deadline. Dropping the returned future
    /// (client went away) cancels the call as well.
    pub async fn within_deadline<T, F>(&self, call: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                log::error!(
                    "Storage call exceeded the {:?} request deadline",
                    self.request_timeout
                );
                Err(AppError::Timeout(self.request_timeout))
            }
        }
    }
}
