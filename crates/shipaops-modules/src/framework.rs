//! Framework (pool) module

use serde::Deserialize;
use serde_json::Value;
use shipaops_client::{framework_payload, Client, ResourceKind, Result};

use crate::ensure::apply_resource;
use crate::outcome::ModuleOutcome;

/// Declared inputs for the framework module.
#[derive(Debug, Clone, Deserialize)]
pub struct FrameworkParams {
    /// Framework name.
    pub name: String,

    /// Framework resources block; defaults to a plain kubernetes
    /// provisioner setup when omitted.
    #[serde(default)]
    pub resources: Option<Value>,
}

pub async fn run(client: &Client, params: &FrameworkParams) -> Result<ModuleOutcome> {
    client.check_auth().await?;

    let payload = framework_payload(&params.name, params.resources.clone());
    apply_resource(client, ResourceKind::Framework, &params.name, payload).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_resources_optional() {
        let params: FrameworkParams = serde_json::from_value(json!({"name": "dev"})).unwrap();
        assert_eq!(params.name, "dev");
        assert!(params.resources.is_none());
    }

    #[test]
    fn test_params_resources_passthrough() {
        let params: FrameworkParams = serde_json::from_value(json!({
            "name": "prod",
            "resources": {"general": {"plan": {"name": "large"}}},
        }))
        .unwrap();
        assert_eq!(params.resources.unwrap()["general"]["plan"]["name"], "large");
    }
}
