pub mod employee_repo;

use std::time::Duration;

use sqlx::{Connection, PgPool};
use url::Url;

use crate::errors::StartupError;
use crate::utils::secrets::Credential;

pub const LIVENESS_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Assembles a `postgres://` DSN. User, password and database name are percent-encoded;
/// the database name is always a single path segment.
pub fn build_dsn(credential: &Credential) -> Result<String, StartupError> {
    let invalid = |part: &str| StartupError::Bootstrap(format!("invalid {} in credentials", part));

    let mut dsn = Url::parse("postgres://localhost")
        .map_err(|err| StartupError::Bootstrap(err.to_string()))?;
    dsn.set_host(Some(&credential.host)).map_err(|_| invalid("host"))?;
    dsn.set_port(Some(credential.port)).map_err(|_| invalid("port"))?;
    dsn.set_username(&credential.username).map_err(|_| invalid("username"))?;
    dsn.set_password(Some(&credential.password)).map_err(|_| invalid("password"))?;
    dsn.path_segments_mut()
        .map_err(|_| invalid("database name"))?
        .clear()
        .push(&credential.db_name);

    Ok(dsn.into())
}

/// Opens the shared pool and refuses to hand it out until a connection answers a ping.
pub async fn create_pool(credential: &Credential) -> Result<PgPool, StartupError> {
    let dsn = build_dsn(credential)?;
    let pool = PgPool::connect_lazy(&dsn)
        .map_err(|err| StartupError::Bootstrap(format!("failed to connect to the database: {}", err)))?;

    probe(&pool, LIVENESS_PROBE_TIMEOUT).await?;
    log::info!("Database answered the liveness probe");
    Ok(pool)
}

pub async fn probe(pool: &PgPool, timeout: Duration) -> Result<(), StartupError> {
    let ping = async {
        let mut conn = pool.acquire().await?;
        conn.ping().await
    };

    match tokio::time::timeout(timeout, ping).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(StartupError::Bootstrap(format!(
            "failed to ping the database: {}",
            err
        ))),
        Err(_) => Err(StartupError::Bootstrap(format!(
            "liveness probe timed out after {}s",
            timeout.as_secs_f32()
        ))),
    }
}
