use serde::{Deserialize, Serialize};

use super::config::PriorityThresholds;

/// Discrete lead priority tier, ordered from least to most pressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadPriority {
    Low,
    Normal,
    High,
    Urgent,
}

impl LeadPriority {
    pub const fn label(self) -> &'static str {
        match self {
            LeadPriority::Low => "low",
            LeadPriority::Normal => "normal",
            LeadPriority::High => "high",
            LeadPriority::Urgent => "urgent",
        }
    }

    /// First match wins: urgent, high, then non-positive scores are low.
    pub fn classify(score: i32, thresholds: &PriorityThresholds) -> Self {
        if score >= thresholds.urgent {
            LeadPriority::Urgent
        } else if score >= thresholds.high {
            LeadPriority::High
        } else if score <= 0 {
            LeadPriority::Low
        } else {
            LeadPriority::Normal
        }
    }
}
