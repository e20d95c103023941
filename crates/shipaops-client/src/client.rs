//! Authenticated Shipa API client
//!
//! One method per control-plane operation, all going through a single
//! request executor that owns the bearer header, the per-call timeout and
//! the JSON/form body distinction. Non-2xx responses are ordinary
//! inspectable outcomes; only transport failures (connect errors, timeouts)
//! become `ShipaError::Transport`.

use std::time::Duration;

use reqwest::Method;
use serde_json::Value;

use crate::deploy::{hit_security_gate, DeployRequest};
use crate::endpoint::Endpoint;
use crate::error::{Result, ShipaError};
use crate::kind::{ErrorSniff, ResourceKind};

/// Timeout for everything except deploy.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Deploys block until the rollout finishes server-side, so they get a much
/// longer budget than the rest of the API.
pub const DEPLOY_TIMEOUT: Duration = Duration::from_secs(1500);

const STATUS_OK: u16 = 200;
const STATUS_CREATED: u16 = 201;

/// Result of fetching a resource.
///
/// `Absent` covers every non-200 response: a 404 and a 500 are
/// indistinguishable here, and the raw body stands in as the not-found
/// message. Longstanding server contract, not to be silently improved.
#[derive(Debug, Clone)]
pub enum ResourceState {
    Present(Value),
    Absent { response: String },
}

impl ResourceState {
    pub fn exists(&self) -> bool {
        matches!(self, ResourceState::Present(_))
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            ResourceState::Present(value) => Some(value),
            ResourceState::Absent { .. } => None,
        }
    }
}

/// Shipa control-plane client for a single (host, token) pair.
///
/// Credentials live only for the invocation and are never logged.
pub struct Client {
    http: reqwest::Client,
    endpoint: Endpoint,
    token: String,
}

impl Client {
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        // Timeouts are applied per request; deploy needs a longer budget
        // than everything else.
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            endpoint: Endpoint::new(host),
            token: token.into(),
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Verify the token against the plan listing before doing anything else.
    ///
    /// Any non-200 is reported as an auth failure, which conflates bad
    /// tokens with unreachable hosts and server errors; only transport-level
    /// failures surface separately.
    pub async fn check_auth(&self) -> Result<()> {
        let (status, _) = self
            .request(Method::GET, &self.endpoint.plans(), RequestBody::Empty, DEFAULT_TIMEOUT)
            .await?;
        if status != STATUS_OK {
            return Err(ShipaError::AuthFailed(format!(
                "plan listing returned status {status}"
            )));
        }
        tracing::debug!(host = self.endpoint.host(), "authenticated against control plane");
        Ok(())
    }

    /// Fetch a resource; exists iff the server answers 200.
    pub async fn get_resource(&self, kind: ResourceKind, name: &str) -> Result<ResourceState> {
        let url = self.endpoint.resource(kind, name);
        let (status, body) = self
            .request(Method::GET, &url, RequestBody::Empty, DEFAULT_TIMEOUT)
            .await?;
        Ok(classify_get(status, body))
    }

    /// Create a resource; ok iff 200/201 and the kind's sniff passes.
    pub async fn create_resource(&self, kind: ResourceKind, payload: &Value) -> Result<Value> {
        let url = self.endpoint.collection(kind);
        tracing::info!(%kind, "creating resource");
        self.write(
            Method::POST,
            &url,
            RequestBody::Json(payload),
            &[STATUS_OK, STATUS_CREATED],
            kind.error_sniff(),
        )
        .await
    }

    /// Update a resource; ok iff 200 and the kind's sniff passes.
    pub async fn update_resource(
        &self,
        kind: ResourceKind,
        name: &str,
        payload: &Value,
    ) -> Result<Value> {
        let url = self.endpoint.resource(kind, name);
        tracing::info!(%kind, name, "updating resource");
        self.write(
            Method::PUT,
            &url,
            RequestBody::Json(payload),
            &[STATUS_OK],
            kind.error_sniff(),
        )
        .await
    }

    /// Bind a cname to an application.
    pub async fn set_cname(&self, app: &str, payload: &Value) -> Result<Value> {
        let url = self.endpoint.app_cname(app);
        self.write(
            Method::POST,
            &url,
            RequestBody::Json(payload),
            &[STATUS_OK, STATUS_CREATED],
            ErrorSniff::Quoted,
        )
        .await
    }

    /// Set environment variables on an application.
    pub async fn set_env(&self, app: &str, payload: &Value) -> Result<Value> {
        let url = self.endpoint.app_env(app);
        self.write(
            Method::POST,
            &url,
            RequestBody::Json(payload),
            &[STATUS_OK, STATUS_CREATED],
            ErrorSniff::Quoted,
        )
        .await
    }

    /// Replace the network policy bound to an application.
    pub async fn put_network_policy(&self, app: &str, payload: &Value) -> Result<Value> {
        let url = self.endpoint.app_network_policy(app);
        self.write(
            Method::PUT,
            &url,
            RequestBody::Json(payload),
            &[STATUS_OK],
            ErrorSniff::Quoted,
        )
        .await
    }

    /// Read back the network policy bound to an application.
    pub async fn get_network_policy(&self, app: &str) -> Result<ResourceState> {
        let url = self.endpoint.app_network_policy(app);
        let (status, body) = self
            .request(Method::GET, &url, RequestBody::Empty, DEFAULT_TIMEOUT)
            .await?;
        Ok(classify_get(status, body))
    }

    /// Deploy an image to an application.
    ///
    /// The deploy endpoint takes form encoding, runs with the long timeout,
    /// and is gated on the server's vulnerability scan: the scan marker in
    /// the body forces failure no matter what status came back.
    pub async fn deploy_app(&self, app: &str, request: &DeployRequest) -> Result<Value> {
        let params = request.form_params()?;
        let url = self.endpoint.app_deploy(app);
        tracing::info!(app, image = %request.image, "deploying application");
        let (status, body) = self
            .request(Method::POST, &url, RequestBody::Form(&params), DEPLOY_TIMEOUT)
            .await?;

        if hit_security_gate(&body) {
            return Err(ShipaError::SecurityGate { response: body });
        }
        if !write_accepted(status, &[STATUS_OK, STATUS_CREATED], &body, ErrorSniff::Bare) {
            return Err(ShipaError::WriteFailed { response: body });
        }
        Ok(parse_body(body))
    }

    async fn write(
        &self,
        method: Method,
        url: &str,
        body: RequestBody<'_>,
        ok_statuses: &[u16],
        sniff: ErrorSniff,
    ) -> Result<Value> {
        let (status, text) = self.request(method, url, body, DEFAULT_TIMEOUT).await?;
        if !write_accepted(status, ok_statuses, &text, sniff) {
            return Err(ShipaError::WriteFailed { response: text });
        }
        Ok(parse_body(text))
    }

    async fn request(
        &self,
        method: Method,
        url: &str,
        body: RequestBody<'_>,
        timeout: Duration,
    ) -> Result<(u16, String)> {
        let mut builder = self
            .http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(timeout);

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(params) => builder.form(params),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        tracing::debug!(url, status, "control plane responded");
        Ok((status, text))
    }
}

enum RequestBody<'a> {
    Empty,
    Json(&'a Value),
    Form(&'a [(String, String)]),
}

/// Map a GET response to existence. 200 means present; everything else is
/// absent with the raw body as the message.
fn classify_get(status: u16, body: String) -> ResourceState {
    if status == STATUS_OK {
        ResourceState::Present(parse_body(body))
    } else {
        ResourceState::Absent { response: body }
    }
}

/// Dual success gate for writes: status code AND absence of the kind's
/// error marker in the body.
fn write_accepted(status: u16, ok_statuses: &[u16], body: &str, sniff: ErrorSniff) -> bool {
    ok_statuses.contains(&status) && !sniff.rejects(body)
}

/// Response bodies are JSON when the server behaves, plain text when it
/// does not; keep both representable.
fn parse_body(body: String) -> Value {
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_get_present() {
        let state = classify_get(200, r#"{"name": "blog"}"#.to_string());
        assert!(state.exists());
        assert_eq!(state.value().unwrap()["name"], "blog");
    }

    #[test]
    fn test_classify_get_absent_keeps_body() {
        let state = classify_get(404, "app not found".to_string());
        assert!(!state.exists());
        match state {
            ResourceState::Absent { response } => assert_eq!(response, "app not found"),
            ResourceState::Present(_) => panic!("expected absent"),
        }
    }

    #[test]
    fn test_classify_get_treats_server_error_as_absent() {
        // A 500 is indistinguishable from not-found, by longstanding
        // behavior.
        assert!(!classify_get(500, "internal error".to_string()).exists());
    }

    #[test]
    fn test_write_accepted_statuses() {
        assert!(write_accepted(200, &[200, 201], "{}", ErrorSniff::Quoted));
        assert!(write_accepted(201, &[200, 201], "{}", ErrorSniff::Quoted));
        assert!(!write_accepted(201, &[200], "{}", ErrorSniff::Quoted));
        assert!(!write_accepted(400, &[200, 201], "{}", ErrorSniff::Quoted));
    }

    #[test]
    fn test_write_rejected_by_quoted_marker_on_success_status() {
        let body = r#"{"Error": "pool dev not found"}"#;
        assert!(!write_accepted(200, &[200, 201], body, ErrorSniff::Quoted));
    }

    #[test]
    fn test_write_rejected_by_bare_marker_on_success_status() {
        assert!(!write_accepted(200, &[200], "deploy error: bad image", ErrorSniff::Bare));
        // The quoted policy lets the same body through.
        assert!(write_accepted(200, &[200], "deploy error: bad image", ErrorSniff::Quoted));
    }

    #[test]
    fn test_parse_body_falls_back_to_string() {
        assert_eq!(parse_body("{\"a\": 1}".to_string()), json!({"a": 1}));
        assert_eq!(parse_body("OK".to_string()), json!("OK"));
    }
}
