use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// Qualitative band chosen from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallTier {
    Outstanding,
    VeryStrong,
    SolidEffort,
    NeedsImprovement,
}

impl OverallTier {
    pub fn from_score(final_score: u32) -> Self {
        if final_score >= 90 {
            Self::Outstanding
        } else if final_score >= 75 {
            Self::VeryStrong
        } else if final_score >= 50 {
            Self::SolidEffort
        } else {
            Self::NeedsImprovement
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Outstanding => "Outstanding",
            Self::VeryStrong => "Very strong",
            Self::SolidEffort => "Solid effort",
            Self::NeedsImprovement => "Needs improvement",
        }
    }

    pub const fn feedback(self) -> &'static str {
        match self {
            Self::Outstanding => "Outstanding introduction! All criteria were met with high marks, demonstrating excellent preparation and delivery.",
            Self::VeryStrong => "Very strong performance. Good grasp of content, flow, and clarity. Review areas with scores below 10 for continuous improvement.",
            Self::SolidEffort => "Solid effort. The core content is present, but work on one or two specific areas (like WPM or Filler Rate) could significantly boost your score.",
            Self::NeedsImprovement => "Needs improvement. Focus on ensuring all mandatory content points are covered and practicing your delivery for better pace and clarity.",
        }
    }
}

/// Observed value reported next to a metric score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Flag(u8),
    Text(String),
}

impl MetricValue {
    pub fn flag(present: bool) -> Self {
        Self::Flag(u8::from(present))
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Flag(flag) => write!(f, "{flag}"),
            MetricValue::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricScore {
    #[serde(skip)]
    pub name: &'static str,
    #[serde(rename = "Value")]
    pub value: MetricValue,
    #[serde(rename = "Score")]
    pub score: u32,
    #[serde(rename = "Feedback")]
    pub feedback: String,
    #[serde(rename = "Weightage")]
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    pub name: &'static str,
    pub total_score: u32,
    pub metrics: Vec<MetricScore>,
}

impl CategoryScore {
    pub fn metric(&self, name: &str) -> Option<&MetricScore> {
        self.metrics.iter().find(|metric| metric.name == name)
    }

    pub fn max_points(&self) -> u32 {
        self.metrics.iter().map(|metric| metric.weight).sum()
    }
}

struct MetricsByName<'a>(&'a [MetricScore]);

impl Serialize for MetricsByName<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for metric in self.0 {
            map.serialize_entry(metric.name, metric)?;
        }
        map.end()
    }
}

impl Serialize for CategoryScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CategoryScore", 2)?;
        state.serialize_field("TotalScore", &self.total_score)?;
        state.serialize_field("Metrics", &MetricsByName(&self.metrics))?;
        state.end()
    }
}

/// Categories in rubric order, serialized as a name-keyed map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetailedFeedback(pub Vec<CategoryScore>);

impl DetailedFeedback {
    pub fn categories(&self) -> &[CategoryScore] {
        &self.0
    }

    pub fn category(&self, name: &str) -> Option<&CategoryScore> {
        self.0.iter().find(|category| category.name == name)
    }
}

impl Serialize for DetailedFeedback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for category in &self.0 {
            map.serialize_entry(category.name, category)?;
        }
        map.end()
    }
}

/// Outcome of scoring one transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub final_score: u32,
    pub total_word_count: usize,
    pub total_duration_sec: f64,
    pub detailed_feedback: DetailedFeedback,
    pub overall_feedback: String,
    #[serde(skip)]
    pub tier: OverallTier,
}

impl ScoreResult {
    pub fn category(&self, name: &str) -> Option<&CategoryScore> {
        self.detailed_feedback.category(name)
    }

    pub fn metric(&self, category: &str, metric: &str) -> Option<&MetricScore> {
        self.category(category)?.metric(metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tiers_use_inclusive_lower_bounds() {
        assert_eq!(OverallTier::from_score(90), OverallTier::Outstanding);
        assert_eq!(OverallTier::from_score(89), OverallTier::VeryStrong);
        assert_eq!(OverallTier::from_score(75), OverallTier::VeryStrong);
        assert_eq!(OverallTier::from_score(50), OverallTier::SolidEffort);
        assert_eq!(OverallTier::from_score(49), OverallTier::NeedsImprovement);
        assert_eq!(OverallTier::from_score(0), OverallTier::NeedsImprovement);
    }

    #[test]
    fn serializes_nested_feedback_in_rubric_order() {
        let result = ScoreResult {
            final_score: 7,
            total_word_count: 3,
            total_duration_sec: 60.0,
            detailed_feedback: DetailedFeedback(vec![CategoryScore {
                name: "Speech Rate",
                total_score: 2,
                metrics: vec![MetricScore {
                    name: "Speech rate (WPM)",
                    value: MetricValue::Text("3.00".to_string()),
                    score: 2,
                    feedback: "Too slow.".to_string(),
                    weight: 10,
                }],
            }]),
            overall_feedback: OverallTier::NeedsImprovement.feedback().to_string(),
            tier: OverallTier::NeedsImprovement,
        };

        let value = serde_json::to_value(&result).expect("serializes");
        assert_eq!(
            value["detailed_feedback"],
            json!({
                "Speech Rate": {
                    "TotalScore": 2,
                    "Metrics": {
                        "Speech rate (WPM)": {
                            "Value": "3.00",
                            "Score": 2,
                            "Feedback": "Too slow.",
                            "Weightage": 10
                        }
                    }
                }
            })
        );
        assert!(value.get("tier").is_none());
        assert_eq!(value["final_score"], 7);
    }
}
