//! Idempotent resource modules for the Shipa control plane
//!
//! One module per resource kind, each a thin consumer of
//! [`shipaops_client`]: declare typed params, verify access, run the
//! check-then-write flow, report a [`ModuleOutcome`] with the changed flag
//! and the canonical post-operation state.
//!
//! # Available modules
//!
//! - `framework` — resource-scheduling pools
//! - `application` — applications
//! - `cluster` — downstream compute clusters
//! - `job` — jobs (create-only)
//! - `deploy` — image deploys (form-encoded, long timeout)
//! - `cname` — custom hostnames on an application
//! - `env` — application environment variables
//! - `network_policy` — ingress/egress rules on an application

pub mod application;
pub mod cluster;
pub mod cname;
pub mod deploy;
mod ensure;
pub mod env;
pub mod framework;
pub mod job;
pub mod network_policy;
pub mod outcome;

pub use application::ApplicationParams;
pub use cluster::ClusterParams;
pub use cname::CnameParams;
pub use deploy::DeployParams;
pub use env::{EnvParams, EnvVar};
pub use framework::FrameworkParams;
pub use job::JobParams;
pub use network_policy::NetworkPolicyParams;
pub use outcome::ModuleOutcome;
