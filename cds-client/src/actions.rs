//! Action CRUD endpoints

use crate::ActionClient;
use crate::error::Result;
use crate::transport::Method;
use cds_core::domain::action::Action;
use cds_core::domain::usage::PipelineUsingAction;

impl ActionClient {
    // =============================================================================
    // Action Queries
    // =============================================================================

    /// List every action visible to the caller
    ///
    /// # Returns
    /// The actions, in the order the server sent them
    pub async fn list_actions(&self) -> Result<Vec<Action>> {
        let response = self.issue(Method::Get, "/action", None).await?;

        Self::handle_list_response(response)
    }

    /// Get an action by group and name
    ///
    /// # Arguments
    /// * `group_name` - Name of the group owning the action
    /// * `name` - Action name, unique within the group
    ///
    /// # Example
    /// ```no_run
    /// # use cds_client::ActionClient;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = ActionClient::new("http://localhost:8081");
    /// let action = client.get_action("shared.infra", "GitClone").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_action(&self, group_name: &str, name: &str) -> Result<Action> {
        Self::require_non_empty(group_name, "group name")?;
        Self::require_non_empty(name, "action name")?;

        let path = format!("/action/{}/{}", group_name, name);
        let response = self.issue(Method::Get, &path, None).await?;

        Self::handle_response(response)
    }

    /// List the pipelines using an action
    ///
    /// # Arguments
    /// * `name` - Action name
    ///
    /// # Returns
    /// The usages in server order
    pub async fn get_usage(&self, name: &str) -> Result<Vec<PipelineUsingAction>> {
        Self::require_non_empty(name, "action name")?;

        let path = format!("/action/{}/usage", name);
        let response = self.issue(Method::Get, &path, None).await?;

        Self::handle_list_response(response)
    }

    // =============================================================================
    // Action Management
    // =============================================================================

    /// Create an action
    ///
    /// The action is posted to `/action/{action.name}`.
    ///
    /// # Returns
    /// The action as stored by the server
    ///
    /// # Example
    /// ```no_run
    /// # use cds_client::{Action, ActionClient};
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = ActionClient::new("http://localhost:8081");
    /// let created = client.create_action(&Action::new("deploy")).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_action(&self, action: &Action) -> Result<Action> {
        Self::require_non_empty(&action.name, "action name")?;

        let path = format!("/action/{}", action.name);
        let body = Self::json_body(action)?;
        let response = self.issue(Method::Post, &path, Some(body)).await?;

        Self::handle_response(response)
    }

    /// Update an action
    ///
    /// `name` addresses the stored action; `action.name` may differ (rename).
    ///
    /// # Arguments
    /// * `name` - Current name of the action
    /// * `action` - The new state
    pub async fn update_action(&self, name: &str, action: &Action) -> Result<Action> {
        Self::require_non_empty(name, "action name")?;

        let path = format!("/action/{}", name);
        let body = Self::json_body(action)?;
        let response = self.issue(Method::Put, &path, Some(body)).await?;

        Self::handle_response(response)
    }

    /// Delete an action
    ///
    /// # Arguments
    /// * `name` - The action name
    pub async fn delete_action(&self, name: &str) -> Result<()> {
        Self::require_non_empty(name, "action name")?;

        let path = format!("/action/{}", name);
        let response = self.issue(Method::Delete, &path, None).await?;

        Self::handle_empty_response(response)
    }
}
