// Workflow approval submission.
//
// Single request/response pair per approver action. Deliberately no automatic
// retry: a failed submission is reported to the user and the guard/modal state
// is left where they can re-attempt.

use crate::models::requests::WorkflowApprovalRequest;
use crate::models::responses::{ApiResponse, ApprovalResultDto};
use crate::utils::logging::mask_identifier;
use async_trait::async_trait;
use log::{info, warn};
use tokio::time::Duration;
use uuid::Uuid;

const DEFAULT_WORKFLOW_BASE_URL: &str = "https://workflow.lendsuite.internal";
const SUBMIT_TIMEOUT: Duration = Duration::from_secs(12);

/// Seam between the navigation orchestrator and the workflow service, so
/// tests can substitute a recording double.
#[async_trait]
pub trait ApprovalApi: Send + Sync {
    /// Submit an approver decision. `Ok` means the service accepted the
    /// decision; anything else is an error the caller reports to the user.
    async fn submit(&self, request: &WorkflowApprovalRequest) -> anyhow::Result<ApprovalResultDto>;
}

/// HTTP client for the workflow service's approval endpoint.
pub struct ApprovalClient {
    base_url: String,
}

impl ApprovalClient {
    /// `base_url` overrides the built-in default (environments, tests).
    pub fn new(base_url: Option<&str>) -> anyhow::Result<Self> {
        let base = base_url
            .unwrap_or(DEFAULT_WORKFLOW_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        url::Url::parse(&base)
            .map_err(|e| anyhow::anyhow!("Invalid workflow base URL '{}': {}", base, e))?;
        Ok(Self { base_url: base })
    }
}

#[async_trait]
impl ApprovalApi for ApprovalClient {
    async fn submit(&self, request: &WorkflowApprovalRequest) -> anyhow::Result<ApprovalResultDto> {
        let correlation_id = Uuid::new_v4().simple().to_string();
        let url = format!("{}/workflow/approve", self.base_url);
        info!(
            "[FLOW: approval] [STEP: submit] Submitting {} for instance {} (correlation_id={})",
            request.action.as_str(),
            mask_identifier(&request.instance_identity),
            correlation_id
        );

        let client = reqwest::Client::builder().timeout(SUBMIT_TIMEOUT).build()?;

        let resp = client.post(&url).json(request).send().await?;
        if !resp.status().is_success() {
            warn!(
                "[FLOW: approval] [STEP: submit] Workflow service returned HTTP {} (correlation_id={})",
                resp.status(),
                correlation_id
            );
            return Err(anyhow::anyhow!("HTTP {}", resp.status()));
        }

        let parsed: ApiResponse<ApprovalResultDto> = resp.json().await?;
        if !parsed.success {
            let message = parsed
                .error
                .or(parsed.message)
                .unwrap_or_else(|| "Approval submission rejected".to_string());
            warn!(
                "[FLOW: approval] [STEP: submit] Submission rejected: {} (correlation_id={})",
                message, correlation_id
            );
            return Err(anyhow::anyhow!(message));
        }

        info!(
            "[FLOW: approval] [STEP: submit] Submission accepted (correlation_id={})",
            correlation_id
        );
        Ok(parsed.data.unwrap_or_default())
    }
}
