// API request models
// Wire contracts for the workflow approval service.

use serde::{Deserialize, Serialize};

/// Approver decision at the terminal wizard step.
///
/// Serialized in the wire format the workflow service expects
/// (`APPROVED` / `REJECTED` / `SENDBACK`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalAction {
    #[serde(rename = "APPROVED")]
    Approved,
    #[serde(rename = "REJECTED")]
    Rejected,
    #[serde(rename = "SENDBACK")]
    SendBack,
}

impl ApprovalAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalAction::Approved => "APPROVED",
            ApprovalAction::Rejected => "REJECTED",
            ApprovalAction::SendBack => "SENDBACK",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowApprovalRequest {
    pub instance_identity: String,
    pub action: ApprovalAction,
    pub remarks: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approval_action_serializes_to_wire_format() {
        assert_eq!(
            serde_json::to_string(&ApprovalAction::Approved).unwrap(),
            "\"APPROVED\""
        );
        assert_eq!(
            serde_json::to_string(&ApprovalAction::Rejected).unwrap(),
            "\"REJECTED\""
        );
        assert_eq!(
            serde_json::to_string(&ApprovalAction::SendBack).unwrap(),
            "\"SENDBACK\""
        );
    }

    #[test]
    fn approval_request_uses_camel_case_keys() {
        let req = WorkflowApprovalRequest {
            instance_identity: "abc-123".to_string(),
            action: ApprovalAction::Approved,
            remarks: "ok".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["instanceIdentity"], "abc-123");
        assert_eq!(json["action"], "APPROVED");
        assert_eq!(json["remarks"], "ok");
    }
}
