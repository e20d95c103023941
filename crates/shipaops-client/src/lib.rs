//! Shipa control-plane HTTP client
//!
//! Shared client core for the shipaops resource modules: endpoint
//! construction, bearer-token request execution, generic CRUD operations
//! parameterized by [`ResourceKind`], deploy payload shaping, and the
//! structural change detection behind the idempotency flag.
//!
//! The client is single-shot by design: one (host, token) pair per
//! invocation, no retries, no shared state across invocations. Retry and
//! backoff policy belongs to whatever orchestrates the invocations.

pub mod client;
pub mod deploy;
pub mod diff;
pub mod endpoint;
pub mod error;
pub mod kind;
pub mod payload;

pub use client::{Client, ResourceState, DEFAULT_TIMEOUT, DEPLOY_TIMEOUT};
pub use deploy::{parse_step_interval, DeployRequest, VULNERABILITY_MARKER};
pub use diff::state_changed;
pub use endpoint::Endpoint;
pub use error::{Result, ShipaError};
pub use kind::{ErrorSniff, ResourceKind};
pub use payload::{bind_volumes, file_or_literal, framework_payload, Volume};
