//! Application cname module

use serde::Deserialize;
use serde_json::{json, Value};
use shipaops_client::{Client, Result};

use crate::ensure::require_application;
use crate::outcome::ModuleOutcome;

pub const RESULT_KEY: &str = "shipa_app_cname";

/// Declared inputs for the cname module.
#[derive(Debug, Clone, Deserialize)]
pub struct CnameParams {
    /// Target application; must exist.
    pub app: String,

    /// Hostname to bind.
    pub cname: String,

    /// Scheme selector: https when true, http otherwise.
    pub encrypt: bool,
}

impl CnameParams {
    pub fn payload(&self) -> Value {
        let scheme = if self.encrypt { "https" } else { "http" };
        json!({
            "app": self.app,
            "cname": self.cname,
            "encrypt": self.encrypt,
            "scheme": scheme,
        })
    }
}

pub async fn run(client: &Client, params: &CnameParams) -> Result<ModuleOutcome> {
    client.check_auth().await?;
    require_application(client, &params.app).await?;

    let resource = client.set_cname(&params.app, &params.payload()).await?;
    Ok(ModuleOutcome::new(true, resource, RESULT_KEY))
}
