//! Structured PPE compliance verdict.
//!
//! The verdict is the only durable output of the verification pipeline:
//! a tri-state result per tracked item plus an overall status derived from
//! the items, never taken on faith from the inference service.

use serde::{Deserialize, Serialize};

/// Result for a single tracked PPE item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// The item was explicitly reported as present.
    Yes,
    /// The item was explicitly reported as missing.
    No,
    /// The reply did not mention the item, or the token was unrecognized.
    Unknown,
}

/// Overall compliance status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    /// All three items present.
    Safe,
    /// Every item resolved and at least one is missing.
    Unsafe,
    /// At least one item could not be determined.
    Undetermined,
}

impl OverallStatus {
    /// Derive the overall status from per-item results.
    ///
    /// Invariant: `Safe` iff all items are `Yes`. Any `Unknown` item means
    /// the check is incomplete, so the result is `Undetermined` rather than
    /// a definitive claim in either direction.
    pub fn derive(items: [ItemStatus; 3]) -> Self {
        if items.iter().any(|i| *i == ItemStatus::Unknown) {
            OverallStatus::Undetermined
        } else if items.iter().all(|i| *i == ItemStatus::Yes) {
            OverallStatus::Safe
        } else {
            OverallStatus::Unsafe
        }
    }
}

/// Structured verdict for one verification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceVerdict {
    /// Hard hat or protective headgear.
    pub helmet: ItemStatus,
    /// High-visibility green safety coat.
    pub green_safety_coat: ItemStatus,
    /// Closed-toe protective footwear.
    pub safety_boots: ItemStatus,
    /// Derived overall status, see [`OverallStatus::derive`].
    pub overall: OverallStatus,
}

impl ComplianceVerdict {
    /// Build a verdict from per-item results, deriving the overall status.
    pub fn from_items(
        helmet: ItemStatus,
        green_safety_coat: ItemStatus,
        safety_boots: ItemStatus,
    ) -> Self {
        Self {
            helmet,
            green_safety_coat,
            safety_boots,
            overall: OverallStatus::derive([helmet, green_safety_coat, safety_boots]),
        }
    }

    /// The fallback verdict: nothing could be determined.
    pub fn undetermined() -> Self {
        Self::from_items(ItemStatus::Unknown, ItemStatus::Unknown, ItemStatus::Unknown)
    }
}
