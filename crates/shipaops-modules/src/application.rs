//! Application module

use serde::Deserialize;
use serde_json::{Map, Value};
use shipaops_client::{bind_volumes, Client, ResourceKind, Result, Volume};

use crate::ensure::apply_resource;
use crate::outcome::ModuleOutcome;

/// Declared inputs for the application module.
///
/// `framework` and `teamowner` follow the declared spelling but are renamed
/// to the server's `pool` / `teamOwner` on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationParams {
    pub name: String,
    pub framework: String,
    pub teamowner: String,
    pub plan: Value,
    pub tags: Vec<String>,

    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub units: Option<Value>,
    #[serde(default)]
    pub cname: Option<Vec<String>>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub entrypoints: Option<Value>,
    #[serde(default)]
    pub routers: Option<Value>,
    #[serde(default)]
    pub lock: Option<Value>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub volumes: Option<Vec<Volume>>,
}

impl ApplicationParams {
    /// Assemble the wire payload: renames applied, absent optionals
    /// omitted, volumes mapped to `volumesToBind`.
    pub fn payload(&self) -> Value {
        let mut payload = Map::new();
        payload.insert("name".into(), Value::String(self.name.clone()));
        payload.insert("pool".into(), Value::String(self.framework.clone()));
        payload.insert("teamOwner".into(), Value::String(self.teamowner.clone()));
        payload.insert("plan".into(), self.plan.clone());
        payload.insert(
            "tags".into(),
            Value::Array(self.tags.iter().cloned().map(Value::String).collect()),
        );

        if let Some(description) = &self.description {
            payload.insert("description".into(), Value::String(description.clone()));
        }
        if let Some(units) = &self.units {
            payload.insert("units".into(), units.clone());
        }
        if let Some(cname) = &self.cname {
            payload.insert(
                "cname".into(),
                Value::Array(cname.iter().cloned().map(Value::String).collect()),
            );
        }
        if let Some(ip) = &self.ip {
            payload.insert("ip".into(), Value::String(ip.clone()));
        }
        if let Some(org) = &self.org {
            payload.insert("org".into(), Value::String(org.clone()));
        }
        if let Some(entrypoints) = &self.entrypoints {
            payload.insert("entrypoints".into(), entrypoints.clone());
        }
        if let Some(routers) = &self.routers {
            payload.insert("routers".into(), routers.clone());
        }
        if let Some(lock) = &self.lock {
            payload.insert("lock".into(), lock.clone());
        }
        if let Some(platform) = &self.platform {
            payload.insert("platform".into(), Value::String(platform.clone()));
        }
        if let Some(status) = &self.status {
            payload.insert("status".into(), Value::String(status.clone()));
        }
        if let Some(volumes) = &self.volumes {
            payload.insert("volumesToBind".into(), bind_volumes(volumes));
        }

        Value::Object(payload)
    }
}

pub async fn run(client: &Client, params: &ApplicationParams) -> Result<ModuleOutcome> {
    client.check_auth().await?;

    let payload = params.payload();
    apply_resource(client, ResourceKind::Application, &params.name, payload).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_params() -> ApplicationParams {
        serde_json::from_value(json!({
            "name": "blog",
            "framework": "dev",
            "teamowner": "platform",
            "plan": {"name": "small"},
            "tags": ["web"],
        }))
        .unwrap()
    }

    #[test]
    fn test_payload_renames() {
        let payload = base_params().payload();
        assert_eq!(payload["pool"], "dev");
        assert_eq!(payload["teamOwner"], "platform");
        assert!(payload.get("framework").is_none());
        assert!(payload.get("teamowner").is_none());
    }

    #[test]
    fn test_payload_omits_absent_optionals() {
        let payload = base_params().payload();
        assert!(payload.get("description").is_none());
        assert!(payload.get("volumesToBind").is_none());
    }

    #[test]
    fn test_payload_binds_volumes() {
        let params: ApplicationParams = serde_json::from_value(json!({
            "name": "blog",
            "framework": "dev",
            "teamowner": "platform",
            "plan": {"name": "small"},
            "tags": [],
            "volumes": [{"name": "v1", "mountPath": "/data"}],
        }))
        .unwrap();
        let payload = params.payload();
        assert_eq!(
            payload["volumesToBind"],
            json!([{"volumeName": "v1", "volumeMountPath": "/data"}])
        );
        assert!(payload.get("volumes").is_none());
    }
}
