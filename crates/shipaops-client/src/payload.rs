//! Resource payload shaping
//!
//! Transforms between what modules declare and what the control plane
//! expects on the wire: the framework envelope, volume bind lists, and the
//! file-or-literal cluster secrets.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::Result;

/// Wrap a framework name and optional resources in the wire envelope.
///
/// The default resources block is constructed fresh on every call; a
/// shared default would let one invocation's mutations leak into the next.
pub fn framework_payload(name: &str, resources: Option<Value>) -> Value {
    let resources = resources.unwrap_or_else(default_framework_resources);
    json!({
        "shipaFramework": name,
        "resources": resources,
    })
}

fn default_framework_resources() -> Value {
    json!({
        "general": {
            "setup": {
                "provisioner": "kubernetes"
            }
        }
    })
}

/// A declared volume mount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Volume {
    pub name: String,
    #[serde(rename = "mountPath")]
    pub mount_path: String,
    #[serde(rename = "mountOptions", skip_serializing_if = "Option::is_none")]
    pub mount_options: Option<Value>,
}

/// Map declared volumes to the server's `volumesToBind` shape.
///
/// `volumeMountOptions` is present only when `mountOptions` was supplied.
pub fn bind_volumes(volumes: &[Volume]) -> Value {
    let bound: Vec<Value> = volumes
        .iter()
        .map(|v| {
            let mut vol = json!({
                "volumeName": v.name,
                "volumeMountPath": v.mount_path,
            });
            if let Some(options) = &v.mount_options {
                vol["volumeMountOptions"] = options.clone();
            }
            vol
        })
        .collect();
    Value::Array(bound)
}

/// Resolve a field that holds either a literal value or a path to one.
///
/// If the value names an existing file, the file's contents are returned
/// with surrounding whitespace trimmed; otherwise the value itself is kept.
/// The file can change between the existence check and the read; callers
/// accept last-reader-wins semantics.
pub fn file_or_literal(value: &str) -> Result<String> {
    let path = std::path::Path::new(value);
    if path.is_file() {
        let contents = std::fs::read_to_string(path)?;
        return Ok(contents.trim_matches([' ', '\n']).to_string());
    }
    Ok(value.to_string())
}

/// Replace file-path-valued secret fields in a cluster endpoint with the
/// file contents. Only string-valued fields are touched.
pub fn resolve_endpoint_secrets(endpoint: &mut Value) -> Result<()> {
    for field in ["caCert", "token", "clientCert", "clientKey"] {
        let Some(Value::String(current)) = endpoint.get(field) else {
            continue;
        };
        let resolved = file_or_literal(current)?;
        endpoint[field] = Value::String(resolved);
    }
    Ok(())
}
