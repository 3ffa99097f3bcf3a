pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::db::employee_repo::PgEmployeeRepository;
use crate::errors::StartupError;
use crate::state::AppState;
use crate::utils::secrets::{resolve_credential, SecretSource};

/// Resolves credentials, opens and probes the pool and builds the shared state.
/// Any failure is returned; deciding to exit is left to the caller.
pub async fn bootstrap(config: &Config, secrets: &dyn SecretSource) -> Result<AppState, StartupError> {
    let credential = resolve_credential(secrets, &config.secret_id).await?;
    let pool = db::create_pool(&credential).await?;
    let repository = PgEmployeeRepository::new(pool, config.table_name.clone());
    log::info!("Serving employees from table {}", repository.table_name());

    Ok(AppState::new(Arc::new(repository), config.request_timeout))
}
