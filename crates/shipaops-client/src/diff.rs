//! Change detection for the idempotency flag
//!
//! Snapshots are compared structurally: `serde_json::Value` equality treats
//! objects as unordered maps and arrays as ordered sequences, which matches
//! how the server renders resources. Volatile server-managed fields are
//! stripped first so a no-op write does not report a change.

use serde_json::Value;

/// Remove volatile top-level fields from a snapshot.
pub fn strip_volatile(state: &mut Value, fields: &[&str]) {
    if let Value::Object(map) = state {
        for field in fields {
            map.remove(*field);
        }
    }
}

/// Decide the changed flag for one invocation.
///
/// A create always counts as a change. For an update, the pre-write and
/// post-write snapshots are compared after stripping volatile fields.
pub fn state_changed(before: Option<&Value>, after: &Value, volatile: &[&str]) -> bool {
    let Some(before) = before else {
        return true;
    };
    let mut before = before.clone();
    let mut after = after.clone();
    strip_volatile(&mut before, volatile);
    strip_volatile(&mut after, volatile);
    before != after
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const VOLATILE: &[&str] = &["updatedAt"];

    #[test]
    fn test_create_is_always_a_change() {
        assert!(state_changed(None, &json!({"name": "a"}), VOLATILE));
    }

    #[test]
    fn test_identical_update_is_not_a_change() {
        let before = json!({"name": "a", "updatedAt": "2024-01-01T00:00:00Z"});
        let after = json!({"name": "a", "updatedAt": "2024-06-01T12:00:00Z"});
        assert!(!state_changed(Some(&before), &after, VOLATILE));
    }

    #[test]
    fn test_differing_field_is_a_change() {
        let before = json!({"name": "a", "pool": "dev"});
        let after = json!({"name": "a", "pool": "prod"});
        assert!(state_changed(Some(&before), &after, VOLATILE));
    }

    #[test]
    fn test_object_key_order_is_irrelevant() {
        let before = json!({"pool": "dev", "name": "a"});
        let after = json!({"name": "a", "pool": "dev"});
        assert!(!state_changed(Some(&before), &after, VOLATILE));
    }

    #[test]
    fn test_nested_difference_is_detected() {
        let before = json!({"plan": {"cpu": "1", "memory": "512Mi"}});
        let after = json!({"plan": {"cpu": "2", "memory": "512Mi"}});
        assert!(state_changed(Some(&before), &after, VOLATILE));
    }
}
