use std::fmt;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use serde::Deserialize;

use crate::errors::StartupError;

pub const CURRENT_VERSION_STAGE: &str = "AWSCURRENT";

/// Database credentials as stored in the secret. Held in memory only.
#[derive(Deserialize, Clone, PartialEq)]
pub struct Credential {
    #[serde(rename = "Host", alias = "host")]
    pub host: String,
    #[serde(rename = "Port", alias = "port")]
    pub port: u16,
    #[serde(rename = "Username", alias = "username")]
    pub username: String,
    #[serde(rename = "Password", alias = "password")]
    pub password: String,
    #[serde(rename = "DBName", alias = "dbname")]
    pub db_name: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("db_name", &self.db_name)
            .finish()
    }
}

/// Anything that can hand back the raw payload of a secret by identifier.
#[async_trait]
pub trait SecretSource: Send + Sync {
    async fn secret_string(&self, secret_id: &str) -> Result<String, StartupError>;
}

pub struct AwsSecretSource {
    client: SecretsManagerClient,
}

/// Region and credentials come from the SDK's default chains: env, profile, then IMDS.
pub async fn load_aws_config() -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest()).load().await
}

impl AwsSecretSource {
    pub async fn from_env() -> Self {
        let aws_config = load_aws_config().await;

        AwsSecretSource {
            client: SecretsManagerClient::new(&aws_config),
        }
    }
}

#[async_trait]
impl SecretSource for AwsSecretSource {
    async fn secret_string(&self, secret_id: &str) -> Result<String, StartupError> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .version_stage(CURRENT_VERSION_STAGE)
            .send()
            .await
            .map_err(|err| {
                StartupError::SecretFetch(format!("{}: {}", secret_id, DisplayErrorContext(&err)))
            })?;

        output.secret_string().map(str::to_string).ok_or_else(|| {
            StartupError::SecretFetch(format!("{}: secret has no string payload", secret_id))
        })
    }
}

pub fn decode_credential(payload: &str) -> Result<Credential, StartupError> {
    serde_json::from_str(payload).map_err(|err| StartupError::SecretDecode(err.to_string()))
}

pub async fn resolve_credential(
    source: &dyn SecretSource,
    secret_id: &str,
) -> Result<Credential, StartupError> {
    let payload = source.secret_string(secret_id).await?;
    let credential = decode_credential(&payload)?;
    log::info!("Resolved database credentials from secret {}", secret_id);
    Ok(credential)
}
