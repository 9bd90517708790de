//! Verdict parser.
//!
//! Structures the model's free-text reply into a [`ComplianceVerdict`].
//! The upstream text is model-generated with no schema guarantee, so this
//! module never fails: anything it cannot confidently extract becomes
//! `unknown`, and the overall status is always derived from the per-item
//! results rather than trusted from the reply's own summary line.

use common::{ComplianceVerdict, ItemStatus, OverallStatus};

use crate::client::InferenceReply;
use crate::prompt::{FINAL_COMPLIANCE_LABEL, ITEM_LABELS};

/// Parse one reply into a structured verdict.
pub fn parse(reply: &InferenceReply) -> ComplianceVerdict {
    let text = match reply.as_text() {
        Some(text) => text,
        None => return ComplianceVerdict::undetermined(),
    };

    let [helmet_label, coat_label, boots_label] = ITEM_LABELS;
    let mut helmet = ItemStatus::Unknown;
    let mut coat = ItemStatus::Unknown;
    let mut boots = ItemStatus::Unknown;
    let mut claimed: Option<OverallStatus> = None;

    for line in text.lines() {
        if let Some(value) = value_after_label(line, helmet_label) {
            helmet = item_token(value);
        } else if let Some(value) = value_after_label(line, coat_label) {
            coat = item_token(value);
        } else if let Some(value) = value_after_label(line, boots_label) {
            boots = item_token(value);
        } else if let Some(value) = value_after_label(line, FINAL_COMPLIANCE_LABEL) {
            claimed = overall_token(value);
        }
    }

    let verdict = ComplianceVerdict::from_items(helmet, coat, boots);
    if let Some(claim) = claimed {
        if claim != verdict.overall {
            tracing::warn!(
                claimed = ?claim,
                derived = ?verdict.overall,
                "reply's own compliance claim contradicts its item lines; using derived status"
            );
        }
    }
    verdict
}

/// If `line` begins with `label` (case-insensitive, tolerant of leading
/// list markers and whitespace), return the value after the separator.
fn value_after_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let trimmed = line
        .trim()
        .trim_start_matches(['-', '*', '•', '.'])
        .trim_start();

    let head = trimmed.get(..label.len())?;
    if !head.eq_ignore_ascii_case(label) {
        return None;
    }

    let rest = trimmed[label.len()..].trim_start();
    let rest = rest.strip_prefix([':', '-']).unwrap_or(rest);
    Some(rest.trim())
}

/// First word of the value, stripped of punctuation, matched as yes/no.
fn item_token(value: &str) -> ItemStatus {
    match first_word(value).as_str() {
        "yes" => ItemStatus::Yes,
        "no" => ItemStatus::No,
        _ => ItemStatus::Unknown,
    }
}

/// Safe/unsafe token of the summary line, if recognizable.
fn overall_token(value: &str) -> Option<OverallStatus> {
    match first_word(value).as_str() {
        "safe" => Some(OverallStatus::Safe),
        "unsafe" => Some(OverallStatus::Unsafe),
        _ => None,
    }
}

fn first_word(value: &str) -> String {
    value
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_matches(|c: char| !c.is_ascii_alphanumeric())
        .to_ascii_lowercase()
}
