//! Deploy request shaping
//!
//! The deploy endpoint is the one place the control plane expects
//! `application/x-www-form-urlencoded` instead of JSON. This module turns a
//! structured deploy request into the ordered form pairs the server expects,
//! including the step-interval duration grammar and the shipa.yaml
//! file-to-base64 upload.

use std::path::PathBuf;
use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use regex::Regex;

use crate::error::{Result, ShipaError};

/// Marker the server embeds in deploy responses when the image fails its
/// vulnerability scan. Present even on a 200, so the gate runs regardless
/// of status code.
pub const VULNERABILITY_MARKER: &str = "There are vulnerabilities!";

/// A structured deploy request for an application.
#[derive(Debug, Clone, Default)]
pub struct DeployRequest {
    pub image: String,
    pub private_image: bool,
    pub registry_user: Option<String>,
    pub registry_secret: Option<String>,
    pub steps: Option<u32>,
    pub step_weight: Option<u32>,
    pub step_interval: Option<String>,
    pub port: Option<u16>,
    pub detach: bool,
    pub message: Option<String>,
    /// Path to a shipa.yaml; the file contents are base64-encoded into the
    /// request.
    pub shipayaml: Option<PathBuf>,
}

impl DeployRequest {
    /// Build the form pairs in the order the server expects.
    ///
    /// Fields are included only when present; list values would be repeated
    /// under the same key per standard multi-value form encoding.
    pub fn form_params(&self) -> Result<Vec<(String, String)>> {
        let mut params: Vec<(String, String)> = Vec::new();
        params.push(("image".into(), self.image.clone()));

        if self.private_image {
            params.push(("private-image".into(), "true".into()));
            if let Some(user) = &self.registry_user {
                params.push(("registry-user".into(), user.clone()));
            }
            if let Some(secret) = &self.registry_secret {
                params.push(("registry-secret".into(), secret.clone()));
            }
        }

        if let Some(steps) = self.steps {
            params.push(("steps".into(), steps.to_string()));
        }
        if let Some(weight) = self.step_weight {
            params.push(("step-weight".into(), weight.to_string()));
        }
        if let Some(interval) = &self.step_interval {
            let seconds = parse_step_interval(interval)?;
            params.push(("step-interval".into(), seconds.to_string()));
        }

        if let Some(port) = self.port {
            params.push(("port-number".into(), port.to_string()));
            params.push(("port-protocol".into(), "TCP".into()));
        }

        if self.detach {
            params.push(("detach".into(), "true".into()));
        }
        if let Some(message) = &self.message {
            params.push(("message".into(), message.clone()));
        }

        if let Some(path) = &self.shipayaml {
            let contents = std::fs::read_to_string(path)?;
            params.push(("shipayaml".into(), BASE64.encode(contents)));
        }

        Ok(params)
    }
}

/// Parse a step interval like `2h13m` or `90s` into total whole seconds.
///
/// Grammar: `(\d+d)?(\d+h)?(\d+m)?(\d+s)?`, each component optional,
/// fractional values allowed. An input matching none of the components is
/// an error rather than zero.
pub fn parse_step_interval(input: &str) -> Result<u64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(
            r"^(?:(\d+(?:\.\d+)?)d)?(?:(\d+(?:\.\d+)?)h)?(?:(\d+(?:\.\d+)?)m)?(?:(\d+(?:\.\d+)?)s)?$",
        )
        .expect("step interval regex")
    });

    let caps = re
        .captures(input.trim())
        .ok_or_else(|| ShipaError::InvalidDuration(input.to_string()))?;

    let mut seconds = 0.0_f64;
    let mut matched = false;
    for (group, unit) in [(1, 86400.0), (2, 3600.0), (3, 60.0), (4, 1.0)] {
        if let Some(m) = caps.get(group) {
            let value: f64 = m
                .as_str()
                .parse()
                .map_err(|_| ShipaError::InvalidDuration(input.to_string()))?;
            seconds += value * unit;
            matched = true;
        }
    }
    if !matched {
        return Err(ShipaError::InvalidDuration(input.to_string()));
    }
    Ok(seconds as u64)
}

/// Whether a deploy response body tripped the server-side security scan.
pub fn hit_security_gate(body: &str) -> bool {
    body.contains(VULNERABILITY_MARKER)
}
