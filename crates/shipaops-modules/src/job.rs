//! Job module
//!
//! Jobs have no update operation on the control plane; an existing job is
//! left untouched and only reported.

use serde::Deserialize;
use serde_json::{Map, Value};
use shipaops_client::{Client, ResourceKind, Result};

use crate::ensure::create_if_absent;
use crate::outcome::ModuleOutcome;

/// Declared inputs for the job module. Optional fields use the server's
/// own camelCase spellings.
#[derive(Debug, Clone, Deserialize)]
pub struct JobParams {
    pub name: String,
    pub framework: String,
    pub containers: Vec<Value>,
    pub policy: Value,

    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "backoffLimit")]
    pub backoff_limit: Option<u32>,
    #[serde(default)]
    pub completions: Option<u32>,
    #[serde(default)]
    pub parallelism: Option<u32>,
    #[serde(default)]
    pub suspend: Option<bool>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default, rename = "type")]
    pub job_type: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl JobParams {
    pub fn payload(&self) -> Value {
        let mut payload = Map::new();
        payload.insert("name".into(), Value::String(self.name.clone()));
        payload.insert("framework".into(), Value::String(self.framework.clone()));
        payload.insert(
            "containers".into(),
            Value::Array(self.containers.clone()),
        );
        payload.insert("policy".into(), self.policy.clone());

        if let Some(description) = &self.description {
            payload.insert("description".into(), Value::String(description.clone()));
        }
        if let Some(limit) = self.backoff_limit {
            payload.insert("backoffLimit".into(), Value::from(limit));
        }
        if let Some(completions) = self.completions {
            payload.insert("completions".into(), Value::from(completions));
        }
        if let Some(parallelism) = self.parallelism {
            payload.insert("parallelism".into(), Value::from(parallelism));
        }
        if let Some(suspend) = self.suspend {
            payload.insert("suspend".into(), Value::Bool(suspend));
        }
        if let Some(team) = &self.team {
            payload.insert("team".into(), Value::String(team.clone()));
        }
        if let Some(job_type) = &self.job_type {
            payload.insert("type".into(), Value::String(job_type.clone()));
        }
        if let Some(version) = &self.version {
            payload.insert("version".into(), Value::String(version.clone()));
        }

        Value::Object(payload)
    }
}

pub async fn run(client: &Client, params: &JobParams) -> Result<ModuleOutcome> {
    client.check_auth().await?;

    let payload = params.payload();
    create_if_absent(client, ResourceKind::Job, &params.name, payload).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_keeps_server_spellings() {
        let params: JobParams = serde_json::from_value(json!({
            "name": "nightly-report",
            "framework": "batch",
            "containers": [{"name": "main", "image": "report:1"}],
            "policy": {"restartPolicy": "Never"},
            "backoffLimit": 3,
            "type": "cronjob",
        }))
        .unwrap();
        let payload = params.payload();
        assert_eq!(payload["framework"], "batch");
        assert_eq!(payload["backoffLimit"], 3);
        assert_eq!(payload["type"], "cronjob");
        assert!(payload.get("suspend").is_none());
    }
}
