//! Cluster module

use serde::Deserialize;
use serde_json::{json, Value};
use shipaops_client::{payload::resolve_endpoint_secrets, Client, ResourceKind, Result};

use crate::ensure::apply_resource;
use crate::outcome::ModuleOutcome;

/// Declared inputs for the cluster module.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterParams {
    /// Cluster name.
    pub name: String,

    /// Connection endpoint: addresses plus `caCert` / `token` /
    /// `clientCert` / `clientKey`. The secret fields accept either a
    /// literal value or a path to a file holding one.
    pub endpoint: Value,

    /// Resource limits and framework bindings.
    pub resources: Value,
}

impl ClusterParams {
    pub fn payload(&self) -> Result<Value> {
        let mut endpoint = self.endpoint.clone();
        resolve_endpoint_secrets(&mut endpoint)?;
        Ok(json!({
            "name": self.name,
            "endpoint": endpoint,
            "resources": self.resources,
        }))
    }
}

pub async fn run(client: &Client, params: &ClusterParams) -> Result<ModuleOutcome> {
    client.check_auth().await?;

    let payload = params.payload()?;
    apply_resource(client, ResourceKind::Cluster, &params.name, payload).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_payload_resolves_secret_files() {
        let mut cert = tempfile::NamedTempFile::new().unwrap();
        write!(cert, "CERT-PEM\n").unwrap();

        let params: ClusterParams = serde_json::from_value(json!({
            "name": "gke-east",
            "endpoint": {
                "addresses": ["https://10.0.0.1:6443"],
                "caCert": cert.path().to_str().unwrap(),
                "token": "literal-token",
            },
            "resources": {"frameworks": {"name": ["dev"]}},
        }))
        .unwrap();

        let payload = params.payload().unwrap();
        assert_eq!(payload["endpoint"]["caCert"], "CERT-PEM");
        assert_eq!(payload["endpoint"]["token"], "literal-token");
        assert_eq!(payload["name"], "gke-east");
    }
}
