//! Rule-based lead scoring.
//!
//! An enquiry's free text is matched against a tenant keyword table, its structured fields are
//! checked against configured boost rules, two built-in heuristics are added, and the total is
//! bucketed into a [`LeadPriority`]. Everything here is pure computation over the inputs.

mod boosts;
mod config;
mod heuristics;
mod keywords;
mod priority;
mod text;

pub use config::{
    BoostCondition, BoostField, BoostRule, ConfigWarning, KeywordRule, PriorityThresholds,
    ScoringConfig, ScoringConfigError,
};
pub use priority::LeadPriority;

use serde::{Deserialize, Serialize};

/// Enquiry fields the engine reads. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub notes: Option<String>,
    pub postcode: Option<String>,
    pub source: Option<String>,
    pub phone: Option<String>,
    #[serde(alias = "valueEstimate")]
    pub value_estimate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordHit {
    pub keyword: String,
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostHit {
    pub rule: String,
    pub points: i32,
}

/// Itemised provenance for a score so persisted leads can be audited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringReason {
    pub keywords: Vec<KeywordHit>,
    pub boosts: Vec<BoostHit>,
}

impl ScoringReason {
    /// Sum of every itemised contribution, clamped to the `i32` range once at the end so the
    /// result does not depend on item order.
    pub fn total(&self) -> i32 {
        let sum: i64 = self
            .keywords
            .iter()
            .map(|hit| i64::from(hit.points))
            .chain(self.boosts.iter().map(|hit| i64::from(hit.points)))
            .sum();
        sum.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub score: i32,
    pub priority: LeadPriority,
    pub reason: ScoringReason,
}

/// Score a single enquiry against `config`.
pub fn score_enquiry(input: &ScoringInput, config: &ScoringConfig) -> ScoringResult {
    let text = text::searchable_text(input);
    let keywords = keywords::match_keywords(&text, &config.keywords);

    let mut boosts = boosts::evaluate_boost_rules(input, &config.boost_rules);
    boosts.extend(heuristics::fixed_boosts(input));

    let reason = ScoringReason { keywords, boosts };
    let score = reason.total();

    ScoringResult {
        score,
        priority: LeadPriority::classify(score, &config.priority_thresholds),
        reason,
    }
}

/// Stateless scorer bound to one tenant's config.
#[derive(Debug, Clone, Default)]
pub struct LeadScoringEngine {
    config: ScoringConfig,
}

impl LeadScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, input: &ScoringInput) -> ScoringResult {
        score_enquiry(input, &self.config)
    }
}
