//! Shipa API endpoint construction
//!
//! Pure URL building from (host, resource kind, optional name, optional
//! sub-resource). No I/O, no state beyond the host.

use crate::kind::ResourceKind;

const PLANS: &str = "plans";

/// Builds absolute URLs for the Shipa control-plane API.
#[derive(Debug, Clone)]
pub struct Endpoint {
    host: String,
}

impl Endpoint {
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into().trim_end_matches('/').to_string();
        Self { host }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Plan listing, used by the access check.
    pub fn plans(&self) -> String {
        format!("{}/{}", self.host, PLANS)
    }

    /// Collection URL for a resource kind, e.g. `.../pools-config`.
    pub fn collection(&self, kind: ResourceKind) -> String {
        format!("{}/{}", self.host, kind.path())
    }

    /// URL of a single named resource, e.g. `.../apps/myapp`.
    pub fn resource(&self, kind: ResourceKind, name: &str) -> String {
        format!("{}/{}/{}", self.host, kind.path(), name)
    }

    pub fn app_deploy(&self, app: &str) -> String {
        self.app_sub(app, "deploy")
    }

    pub fn app_cname(&self, app: &str) -> String {
        self.app_sub(app, "cname")
    }

    pub fn app_env(&self, app: &str) -> String {
        self.app_sub(app, "env")
    }

    pub fn app_network_policy(&self, app: &str) -> String {
        self.app_sub(app, "network-policy")
    }

    fn app_sub(&self, app: &str, sub: &str) -> String {
        format!("{}/{}/{}/{}", self.host, ResourceKind::Application.path(), app, sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> Endpoint {
        Endpoint::new("https://shipa.example.com:8081")
    }

    #[test]
    fn test_plans_url() {
        assert_eq!(endpoint().plans(), "https://shipa.example.com:8081/plans");
    }

    #[test]
    fn test_collection_and_resource() {
        let e = endpoint();
        assert_eq!(
            e.collection(ResourceKind::Framework),
            "https://shipa.example.com:8081/pools-config"
        );
        assert_eq!(
            e.resource(ResourceKind::Cluster, "gke-east"),
            "https://shipa.example.com:8081/provisioner/clusters/gke-east"
        );
        assert_eq!(
            e.resource(ResourceKind::Application, "blog"),
            "https://shipa.example.com:8081/apps/blog"
        );
    }

    #[test]
    fn test_app_sub_resources() {
        let e = endpoint();
        assert_eq!(e.app_deploy("blog"), "https://shipa.example.com:8081/apps/blog/deploy");
        assert_eq!(e.app_cname("blog"), "https://shipa.example.com:8081/apps/blog/cname");
        assert_eq!(e.app_env("blog"), "https://shipa.example.com:8081/apps/blog/env");
        assert_eq!(
            e.app_network_policy("blog"),
            "https://shipa.example.com:8081/apps/blog/network-policy"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let e = Endpoint::new("https://shipa.example.com/");
        assert_eq!(e.plans(), "https://shipa.example.com/plans");
    }
}
