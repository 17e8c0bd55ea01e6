//! Import/export endpoints

use crate::ActionClient;
use crate::error::Result;
use crate::transport::{Method, RequestBody};
use cds_core::domain::action::Action;
use cds_core::dto::action::{ExportFormat, ImportOutcome};

impl ActionClient {
    /// Export an action as YAML or JSON text
    ///
    /// The text is returned as sent by the server, ready to be written to a
    /// file and imported elsewhere.
    ///
    /// # Arguments
    /// * `name` - Action name
    /// * `format` - Output format
    pub async fn export_action(&self, name: &str, format: ExportFormat) -> Result<String> {
        Self::require_non_empty(name, "action name")?;

        let path = format!("/action/{}/export?format={}", name, format.as_str());
        let response = self.issue(Method::Get, &path, None).await?;

        Self::check_status(response).map(|r| r.body)
    }

    /// Import an action from exported text
    ///
    /// Creates the action if no action with that name exists, replaces it
    /// otherwise.
    ///
    /// # Arguments
    /// * `content` - YAML or JSON document
    /// * `format` - Format of `content`, sent as the content type
    ///
    /// # Example
    /// ```no_run
    /// # use cds_client::ActionClient;
    /// # use cds_core::dto::action::ExportFormat;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = ActionClient::new("http://localhost:8081");
    /// let yaml = std::fs::read_to_string("deploy.yml")?;
    /// let outcome = client.import_action(yaml, ExportFormat::Yaml).await?;
    /// println!("created: {}", outcome.created);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn import_action(
        &self,
        content: impl Into<String>,
        format: ExportFormat,
    ) -> Result<ImportOutcome> {
        let body = RequestBody::Raw {
            content_type: format.content_type(),
            content: content.into(),
        };
        let response = self
            .issue(Method::Post, "/action/import", Some(body))
            .await?;

        // 201 when the action did not exist yet, 200 when it was replaced
        let created = response.status == 201;
        let action: Action = Self::handle_response(response)?;

        Ok(ImportOutcome { action, created })
    }
}
