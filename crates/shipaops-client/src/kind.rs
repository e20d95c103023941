//! Resource kind routing and per-kind write policies

/// A resource kind addressable through the control-plane CRUD surface.
///
/// Carries the routing segment, the key under which modules report the
/// resource, the fields stripped before idempotency comparison, and the
/// error-marker sniff applied to write responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Framework,
    Application,
    Cluster,
    Job,
}

impl ResourceKind {
    /// Path segment under the API host.
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Framework => "pools-config",
            ResourceKind::Application => "apps",
            ResourceKind::Cluster => "provisioner/clusters",
            ResourceKind::Job => "jobs",
        }
    }

    /// Key under which modules report the canonical resource state.
    pub fn result_key(&self) -> &'static str {
        match self {
            ResourceKind::Framework => "shipa_framework",
            ResourceKind::Application => "shipa_application",
            ResourceKind::Cluster => "shipa_cluster",
            ResourceKind::Job => "shipa_job",
        }
    }

    /// Server-managed fields ignored when comparing before/after snapshots.
    pub fn volatile_fields(&self) -> &'static [&'static str] {
        &["updatedAt"]
    }

    /// Error-marker policy applied to this kind's write responses.
    ///
    /// The policies differ on purpose: unifying them would change failure
    /// behavior for payloads that legitimately contain the word "error".
    pub fn error_sniff(&self) -> ErrorSniff {
        match self {
            ResourceKind::Framework => ErrorSniff::None,
            _ => ErrorSniff::Quoted,
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Framework => write!(f, "framework"),
            ResourceKind::Application => write!(f, "application"),
            ResourceKind::Cluster => write!(f, "cluster"),
            ResourceKind::Job => write!(f, "job"),
        }
    }
}

/// Body sniff applied on top of the HTTP status check.
///
/// A write can come back 200/201 and still carry an error document; the
/// server is not consistent about status codes. `Quoted` looks for the
/// substring `"error"` including the quotes, `Bare` for `error` anywhere
/// in the body. Both are case-insensitive. `Bare` can reject legitimate
/// payloads that merely mention the word, which is why it is confined to
/// the operations that have always used it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSniff {
    None,
    Quoted,
    Bare,
}

impl ErrorSniff {
    /// Whether `body` carries this policy's error marker.
    pub fn rejects(&self, body: &str) -> bool {
        match self {
            ErrorSniff::None => false,
            ErrorSniff::Quoted => body.to_lowercase().contains("\"error\""),
            ErrorSniff::Bare => body.to_lowercase().contains("error"),
        }
    }
}
