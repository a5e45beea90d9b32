use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Tenant-authored rule set consumed by the lead scoring engine.
///
/// The config is plain data: keyword and boost tables are evaluated in the order they are
/// listed, and nothing in the engine mutates them, so one instance can be shared across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub keywords: Vec<KeywordRule>,
    #[serde(default, alias = "boostRules")]
    pub boost_rules: Vec<BoostRule>,
    #[serde(default, alias = "priorityThresholds")]
    pub priority_thresholds: PriorityThresholds,
}

/// Points awarded when a keyword appears anywhere in the enquiry text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    pub points: i32,
}

impl KeywordRule {
    pub fn new(keyword: impl Into<String>, points: i32) -> Self {
        Self {
            keyword: keyword.into(),
            points,
        }
    }
}

/// Conditional bonus evaluated against one structured enquiry field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostRule {
    pub field: BoostField,
    pub condition: BoostCondition,
    pub value: String,
    pub points: i32,
}

impl BoostRule {
    /// Human-readable provenance, e.g. `valueEstimate gte 1000`.
    pub fn description(&self) -> String {
        format!(
            "{} {} {}",
            self.field.label(),
            self.condition.label(),
            self.value
        )
    }
}

/// Structured enquiry fields a boost rule may inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoostField {
    Source,
    Postcode,
    ValueEstimate,
}

impl BoostField {
    pub const fn label(self) -> &'static str {
        match self {
            BoostField::Source => "source",
            BoostField::Postcode => "postcode",
            BoostField::ValueEstimate => "valueEstimate",
        }
    }

    pub const fn is_numeric(self) -> bool {
        matches!(self, BoostField::ValueEstimate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoostCondition {
    Equals,
    Contains,
    Gte,
    Lte,
}

impl BoostCondition {
    pub const fn label(self) -> &'static str {
        match self {
            BoostCondition::Equals => "equals",
            BoostCondition::Contains => "contains",
            BoostCondition::Gte => "gte",
            BoostCondition::Lte => "lte",
        }
    }

    pub const fn is_numeric(self) -> bool {
        matches!(self, BoostCondition::Gte | BoostCondition::Lte)
    }
}

/// Score cutoffs for the `high` and `urgent` tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityThresholds {
    pub high: i32,
    pub urgent: i32,
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self {
            high: 15,
            urgent: 30,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            keywords: vec![
                KeywordRule::new("emergency", 20),
                KeywordRule::new("urgent", 15),
                KeywordRule::new("no power", 15),
                KeywordRule::new("asap", 10),
                KeywordRule::new("rewire", 10),
                KeywordRule::new("fuse board", 8),
                KeywordRule::new("consumer unit", 8),
                KeywordRule::new("commercial", 8),
                KeywordRule::new("eicr", 5),
                KeywordRule::new("quote", 3),
            ],
            boost_rules: Vec::new(),
            priority_thresholds: PriorityThresholds::default(),
        }
    }
}

impl ScoringConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ScoringConfigError> {
        serde_json::from_str(raw).map_err(ScoringConfigError::Parse)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScoringConfigError> {
        serde_json::from_reader(reader).map_err(ScoringConfigError::Parse)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ScoringConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ScoringConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Reports authoring mistakes without rejecting the config; scoring stays well-defined
    /// for every config, these only surface behaviour the author probably did not intend.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let thresholds = self.priority_thresholds;
        if thresholds.high > thresholds.urgent {
            warnings.push(ConfigWarning::InvertedThresholds {
                high: thresholds.high,
                urgent: thresholds.urgent,
            });
        }

        for (index, rule) in self.keywords.iter().enumerate() {
            if rule.keyword.trim().is_empty() {
                warnings.push(ConfigWarning::BlankKeyword { index });
            }
        }

        for (index, rule) in self.boost_rules.iter().enumerate() {
            if !rule.condition.is_numeric() {
                continue;
            }
            if !rule.field.is_numeric() {
                warnings.push(ConfigWarning::NumericConditionOnTextField {
                    index,
                    rule: rule.description(),
                });
            } else if rule.value.trim().parse::<f64>().is_err() {
                warnings.push(ConfigWarning::UnparseableNumericValue {
                    index,
                    value: rule.value.clone(),
                });
            }
        }

        warnings
    }
}

/// Non-fatal findings from [`ScoringConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigWarning {
    #[error("high threshold {high} exceeds urgent threshold {urgent}; urgent takes precedence")]
    InvertedThresholds { high: i32, urgent: i32 },
    #[error("keyword #{index} is blank; empty keywords never match, whitespace ones match literally")]
    BlankKeyword { index: usize },
    #[error("boost rule #{index} ({rule}) compares a text field numerically and never matches")]
    NumericConditionOnTextField { index: usize, rule: String },
    #[error("boost rule #{index} value '{value}' is not a number and never matches")]
    UnparseableNumericValue { index: usize, value: String },
}

/// Failure loading a scoring config from disk or JSON.
#[derive(Debug, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("unable to read scoring config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scoring config: {0}")]
    Parse(#[source] serde_json::Error),
}
