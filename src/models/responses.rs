// API response models
// Wire contracts for the workflow approval service.

use serde::{Deserialize, Serialize};

// =========================
// Generic wrapper (matches the service's ApiResponse<T> envelope)
// =========================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            message: None,
        }
    }
}

// =========================
// Workflow approval
// =========================

/// The approval endpoint's payload is opaque to this core beyond
/// success/failure; the optional fields are kept for logging only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApprovalResultDto {
    pub instance_identity: Option<String>,
    pub workflow_status: Option<String>,
}
