//! Group resolver module
//!
//! Lets users name an action without its group. The group is found by
//! listing the actions visible to the user and matching on name.

use anyhow::{Context, Result, anyhow};
use cds_client::{Action, ActionClient};

use crate::types::ActionRef;

/// Resolve an action reference to a `(group, name)` pair
///
/// Qualified references are returned as is, without any request.
///
/// # Errors
/// Returns an error if:
/// - No action has that name
/// - Actions with that name exist in several groups (ambiguous)
/// - A matching action carries no group
/// - API call fails
pub async fn resolve_action_group(
    client: &ActionClient,
    action_ref: &ActionRef,
) -> Result<(String, String)> {
    if let ActionRef::Qualified { group, name } = action_ref {
        return Ok((group.clone(), name.clone()));
    }

    let name = action_ref.name();

    let actions = client
        .list_actions()
        .await
        .context("Failed to fetch actions for group resolution")?;

    let group = pick_group(&actions, name)?;
    Ok((group, name.to_string()))
}

/// Find the single group holding an action called `name`
fn pick_group(actions: &[Action], name: &str) -> Result<String> {
    let matches: Vec<_> = actions.iter().filter(|a| a.name == name).collect();

    match matches.len() {
        0 => Err(anyhow!("No action named '{}'", name)),
        1 => matches[0]
            .group_name()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Action '{}' has no group, use group/name", name)),
        _ => {
            let groups: Vec<&str> = matches.iter().filter_map(|a| a.group_name()).collect();
            Err(anyhow!(
                "Ambiguous name '{}' exists in several groups: {}",
                name,
                groups.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn action(name: &str, group: &str) -> Action {
        serde_json::from_value(json!({ "name": name, "group": { "name": group } })).unwrap()
    }

    #[test]
    fn test_pick_single_group() {
        let actions = vec![action("build", "ops"), action("deploy", "ops")];
        assert_eq!(pick_group(&actions, "deploy").unwrap(), "ops");
    }

    #[test]
    fn test_pick_missing() {
        let actions = vec![action("build", "ops")];
        let err = pick_group(&actions, "deploy").unwrap_err();
        assert!(err.to_string().contains("No action named"));
    }

    #[test]
    fn test_pick_ambiguous() {
        let actions = vec![action("deploy", "ops"), action("deploy", "shared.infra")];
        let err = pick_group(&actions, "deploy").unwrap_err();
        assert!(err.to_string().contains("ops, shared.infra"));
    }

    #[test]
    fn test_pick_without_group() {
        let actions = vec![Action::new("deploy")];
        assert!(pick_group(&actions, "deploy").is_err());
    }

    #[tokio::test]
    async fn test_qualified_ref_skips_lookup() {
        // Nothing listens here; a request would fail the test
        let client = ActionClient::new("http://127.0.0.1:9");
        let resolved = resolve_action_group(&client, &ActionRef::parse("ops/deploy"))
            .await
            .unwrap();
        assert_eq!(resolved, ("ops".to_string(), "deploy".to_string()));
    }
}
