//! Audit and requirement endpoints

use crate::ActionClient;
use crate::error::Result;
use crate::transport::Method;
use cds_core::domain::action::Requirement;
use cds_core::domain::audit::ActionAudit;

impl ActionClient {
    /// List the distinct requirements declared across all actions
    ///
    /// Workers use this to advertise the binaries they provide.
    pub async fn list_requirements(&self) -> Result<Vec<Requirement>> {
        let response = self.issue(Method::Get, "/action/requirement", None).await?;

        Self::handle_list_response(response)
    }

    /// Get the change history of an action
    ///
    /// # Arguments
    /// * `action_id` - Numeric ID of the action
    pub async fn get_action_audit(&self, action_id: i64) -> Result<Vec<ActionAudit>> {
        let path = format!("/action/{}/audit", action_id);
        let response = self.issue(Method::Get, &path, None).await?;

        Self::handle_list_response(response)
    }
}
