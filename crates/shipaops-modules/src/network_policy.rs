//! Application network policy module

use serde::Deserialize;
use serde_json::{Map, Value};
use shipaops_client::{Client, ResourceState, Result, ShipaError};

use crate::ensure::require_application;
use crate::outcome::ModuleOutcome;

pub const RESULT_KEY: &str = "shipa_network_policy";

/// Declared inputs for the network policy module.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkPolicyParams {
    /// Target application; must exist.
    pub app: String,

    #[serde(default)]
    pub ingress: Option<Value>,
    #[serde(default)]
    pub egress: Option<Value>,

    /// Restart the app so the policy takes effect immediately.
    #[serde(default)]
    pub restart_app: bool,
}

impl NetworkPolicyParams {
    pub fn payload(&self) -> Value {
        let mut payload = Map::new();
        payload.insert("app".into(), Value::String(self.app.clone()));
        if let Some(ingress) = &self.ingress {
            payload.insert("ingress".into(), ingress.clone());
        }
        if let Some(egress) = &self.egress {
            payload.insert("egress".into(), egress.clone());
        }
        payload.insert("restart_app".into(), Value::Bool(self.restart_app));
        Value::Object(payload)
    }
}

pub async fn run(client: &Client, params: &NetworkPolicyParams) -> Result<ModuleOutcome> {
    client.check_auth().await?;
    require_application(client, &params.app).await?;

    client
        .put_network_policy(&params.app, &params.payload())
        .await?;

    // Read back the canonical policy the server now holds.
    let resource = match client.get_network_policy(&params.app).await? {
        ResourceState::Present(value) => value,
        ResourceState::Absent { response } => {
            return Err(ShipaError::NotFound {
                resource: params.app.clone(),
                response,
            })
        }
    };

    Ok(ModuleOutcome::new(true, resource, RESULT_KEY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_omits_absent_directions() {
        let params: NetworkPolicyParams = serde_json::from_value(json!({
            "app": "blog",
            "ingress": {"policy_mode": "allow-all"},
        }))
        .unwrap();
        let payload = params.payload();
        assert_eq!(payload["ingress"]["policy_mode"], "allow-all");
        assert!(payload.get("egress").is_none());
        assert_eq!(payload["restart_app"], false);
    }
}
