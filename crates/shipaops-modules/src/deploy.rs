//! Application deploy module
//!
//! Deploys are not reconciled against previous state; a successful deploy
//! always reports a change.

use std::path::PathBuf;

use serde::Deserialize;
use shipaops_client::{Client, DeployRequest, Result};

use crate::ensure::require_application;
use crate::outcome::ModuleOutcome;

pub const RESULT_KEY: &str = "shipa_app_deploy";

/// Declared inputs for the deploy module.
#[derive(Debug, Clone, Deserialize)]
pub struct DeployParams {
    /// Target application; must exist.
    pub app: String,

    /// Image reference to deploy.
    pub image: String,

    #[serde(default)]
    pub private_image: bool,
    #[serde(default)]
    pub registry_user: Option<String>,
    #[serde(default)]
    pub registry_secret: Option<String>,

    /// Canary rollout step count.
    #[serde(default)]
    pub steps: Option<u32>,
    /// Traffic weight added per step.
    #[serde(default)]
    pub step_weight: Option<u32>,
    /// Pause between steps, e.g. `2h13m` or `90s`.
    #[serde(default)]
    pub step_interval: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub detach: bool,
    #[serde(default)]
    pub message: Option<String>,

    /// Path to a shipa.yaml to ship alongside the image.
    #[serde(default)]
    pub shipayaml: Option<PathBuf>,
}

impl DeployParams {
    pub fn request(&self) -> DeployRequest {
        DeployRequest {
            image: self.image.clone(),
            private_image: self.private_image,
            registry_user: self.registry_user.clone(),
            registry_secret: self.registry_secret.clone(),
            steps: self.steps,
            step_weight: self.step_weight,
            step_interval: self.step_interval.clone(),
            port: self.port,
            detach: self.detach,
            message: self.message.clone(),
            shipayaml: self.shipayaml.clone(),
        }
    }
}

pub async fn run(client: &Client, params: &DeployParams) -> Result<ModuleOutcome> {
    client.check_auth().await?;
    require_application(client, &params.app).await?;

    let resource = client.deploy_app(&params.app, &params.request()).await?;
    Ok(ModuleOutcome::new(true, resource, RESULT_KEY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_params() {
        let params: DeployParams = serde_json::from_value(json!({
            "app": "blog",
            "image": "registry.example.com/blog:v2",
        }))
        .unwrap();
        let request = params.request();
        assert_eq!(request.image, "registry.example.com/blog:v2");
        assert!(!request.private_image);
        assert!(request.shipayaml.is_none());
    }

    #[test]
    fn test_canary_params_flow_through() {
        let params: DeployParams = serde_json::from_value(json!({
            "app": "blog",
            "image": "blog:v2",
            "steps": 4,
            "step_weight": 25,
            "step_interval": "8h",
        }))
        .unwrap();
        let form = params.request().form_params().unwrap();
        assert!(form.contains(&("step-interval".to_string(), "28800".to_string())));
    }
}
