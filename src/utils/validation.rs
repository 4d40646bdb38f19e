// Input validation utilities
// Step validators call these and translate failures into guard reasons; the
// approval flow uses them to reject bad input before any remote call.

use crate::guards::GuardState;
use anyhow::Result;
use regex::Regex;

/// Maximum remarks length accepted by the workflow service.
const MAX_REMARKS_LEN: usize = 500;

/// Validate a PAN (permanent account number): five letters, four digits, one
/// letter, e.g. `ABCDE1234F`. Input is trimmed and upper-cased first.
pub fn validate_pan(pan: &str) -> Result<()> {
    let s = pan.trim().to_ascii_uppercase();
    if s.is_empty() {
        return Err(anyhow::anyhow!("PAN is required"));
    }

    let pan_re = Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$")
        .map_err(|e| anyhow::anyhow!("Internal error: failed to compile PAN regex: {}", e))?;
    if !pan_re.is_match(&s) {
        return Err(anyhow::anyhow!(
            "Invalid PAN format. Expected format: AAAAA9999A. Received length: {}",
            s.len()
        ));
    }
    Ok(())
}

/// Guard state for a PAN field: clear when the PAN is valid, blocking with a
/// human-readable reason otherwise.
pub fn pan_guard(pan: &str) -> GuardState {
    match validate_pan(pan) {
        Ok(()) => GuardState::clear(),
        Err(e) if pan.trim().is_empty() => GuardState::blocking_titled(e.to_string(), "Incomplete"),
        Err(e) => GuardState::blocking(e.to_string()),
    }
}

/// Validate a backend-assigned identity (customer, Form 60 submission,
/// workflow instance): non-empty, printable, no whitespace inside.
pub fn validate_identity(identity: &str) -> Result<()> {
    let s = identity.trim();
    if s.is_empty() {
        return Err(anyhow::anyhow!("Identity is required"));
    }
    if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(anyhow::anyhow!("Identity contains invalid characters"));
    }
    Ok(())
}

/// Validate approver remarks before submission.
pub fn validate_remarks(remarks: &str) -> Result<()> {
    let s = remarks.trim();
    if s.is_empty() {
        return Err(anyhow::anyhow!("Remarks are required"));
    }
    if s.len() > MAX_REMARKS_LEN {
        return Err(anyhow::anyhow!(
            "Remarks cannot exceed {} characters",
            MAX_REMARKS_LEN
        ));
    }
    Ok(())
}
