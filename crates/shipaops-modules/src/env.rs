//! Application environment variable module

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shipaops_client::{Client, Result};

use crate::ensure::require_application;
use crate::outcome::ModuleOutcome;

pub const RESULT_KEY: &str = "shipa_app_env";

/// One environment variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

/// Declared inputs for the env module.
#[derive(Debug, Clone, Deserialize)]
pub struct EnvParams {
    /// Target application; must exist.
    pub app: String,

    pub envs: Vec<EnvVar>,

    /// Skip the app restart the server would otherwise trigger.
    #[serde(default)]
    pub norestart: bool,

    /// Mark the variables private (hidden from reads).
    #[serde(default)]
    pub private: bool,
}

impl EnvParams {
    pub fn payload(&self) -> Value {
        json!({
            "app": self.app,
            "envs": self.envs,
            "norestart": self.norestart,
            "private": self.private,
        })
    }
}

pub async fn run(client: &Client, params: &EnvParams) -> Result<ModuleOutcome> {
    client.check_auth().await?;
    require_application(client, &params.app).await?;

    let resource = client.set_env(&params.app, &params.payload()).await?;
    Ok(ModuleOutcome::new(true, resource, RESULT_KEY))
}
