//! Shared check-then-write flow for CRUD resource kinds

use serde_json::Value;
use shipaops_client::{state_changed, Client, ResourceKind, ResourceState, Result, ShipaError};

use crate::outcome::ModuleOutcome;

/// Bring a named resource to the desired payload and report the changed flag.
///
/// Flow: fetch current state; update when present, create when absent;
/// re-fetch the canonical state; compare snapshots minus volatile fields.
/// The check-then-act window is not atomic against concurrent external
/// mutation: last write wins, no compare-and-swap guarantee.
pub(crate) async fn apply_resource(
    client: &Client,
    kind: ResourceKind,
    name: &str,
    payload: Value,
) -> Result<ModuleOutcome> {
    let before = client.get_resource(kind, name).await?;

    match &before {
        ResourceState::Present(_) => {
            client.update_resource(kind, name, &payload).await?;
        }
        ResourceState::Absent { .. } => {
            client.create_resource(kind, &payload).await?;
        }
    }

    finish(client, kind, name, before).await
}

/// Create-only variant for kinds without an update operation (jobs). When
/// the resource already exists nothing is written.
pub(crate) async fn create_if_absent(
    client: &Client,
    kind: ResourceKind,
    name: &str,
    payload: Value,
) -> Result<ModuleOutcome> {
    let before = client.get_resource(kind, name).await?;

    if !before.exists() {
        client.create_resource(kind, &payload).await?;
    }

    finish(client, kind, name, before).await
}

async fn finish(
    client: &Client,
    kind: ResourceKind,
    name: &str,
    before: ResourceState,
) -> Result<ModuleOutcome> {
    // If the write landed but this re-fetch fails, the invocation reports
    // failure even though the server was mutated. Known gap, kept.
    let after = match client.get_resource(kind, name).await? {
        ResourceState::Present(value) => value,
        ResourceState::Absent { response } => {
            return Err(ShipaError::NotFound {
                resource: name.to_string(),
                response,
            })
        }
    };

    let changed = state_changed(before.value(), &after, kind.volatile_fields());
    tracing::debug!(%kind, name, changed, "resource reconciled");
    Ok(ModuleOutcome::new(changed, after, kind.result_key()))
}

/// Require an application to exist before touching one of its
/// sub-resources, surfacing the raw get body on failure.
pub(crate) async fn require_application(client: &Client, app: &str) -> Result<()> {
    match client.get_resource(ResourceKind::Application, app).await? {
        ResourceState::Present(_) => Ok(()),
        ResourceState::Absent { response } => Err(ShipaError::NotFound {
            resource: app.to_string(),
            response,
        }),
    }
}
