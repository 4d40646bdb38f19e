// Logging utilities
// Tag parsing plus dual JSON/human-readable formatting, and masking of
// business identifiers so customer codes and PANs never land in logs verbatim.

use log::Level;
use serde_json::json;

/// Mask a business identifier (PAN, customer code, workflow instance id).
/// Short values are fully masked; longer ones keep two characters at each end
/// for troubleshooting.
pub fn mask_identifier(input: &str) -> String {
    let chars: Vec<char> = input.trim().chars().collect();
    if chars.len() <= 6 {
        return "***".to_string();
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

fn extract_tag(message: &str, marker: &str) -> (Option<String>, String) {
    let Some(start) = message.find(marker) else {
        return (None, message.to_string());
    };
    let Some(end) = message[start..].find(']') else {
        return (None, message.to_string());
    };
    let value = message[start + marker.len()..start + end].trim().to_string();
    let cleaned = format!("{} {}", &message[..start], &message[start + end + 1..])
        .trim()
        .to_string();
    (Some(value), cleaned)
}

/// Extract `[FLOW: ...]` and `[STEP: ...]` tags from a log message, returning
/// the tags and the cleaned message.
pub fn parse_log_tags(message: &str) -> (Option<String>, Option<String>, String) {
    let (flow, rest) = extract_tag(message, "[FLOW:");
    let (step, cleaned) = extract_tag(&rest, "[STEP:");
    (flow, step, cleaned)
}

/// Format a log entry as one JSON line for structured parsing.
pub fn format_json_line(
    timestamp: &str,
    level: Level,
    target: &str,
    message: &str,
    flow: Option<&str>,
    step: Option<&str>,
) -> String {
    let mut entry = json!({
        "timestamp": timestamp,
        "level": level.as_str(),
        "target": target,
        "message": message,
    });
    if let Some(flow) = flow {
        entry["flow"] = json!(flow);
    }
    if let Some(step) = step {
        entry["step"] = json!(step);
    }
    serde_json::to_string(&entry).unwrap_or_else(|_| "{}".to_string())
}

/// Format a log entry as a human-readable line.
pub fn format_text_line(
    timestamp: &str,
    level: Level,
    target: &str,
    message: &str,
    flow: Option<&str>,
    step: Option<&str>,
) -> String {
    let mut line = format!("[{}] [{}]", timestamp, level.as_str());
    if let Some(flow) = flow {
        line.push_str(&format!(" [FLOW: {}]", flow));
    }
    if let Some(step) = step {
        line.push_str(&format!(" [STEP: {}]", step));
    }
    line.push_str(&format!(" [{}] {}", target, message));
    line
}
