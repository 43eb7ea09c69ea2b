//! Metric-name categories.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const QUERY_METRICS: &[&str] = &["QueryTemplate"];
pub const RESULT_METRICS: &[&str] = &["ReturnedRows", "ReturnedBytes", "ResultCacheHit"];
pub const TIME_METRICS: &[&str] = &["ExecTime", "CompileTime", "PlanTime", "LockWaitTime", "ElapsedTime"];
pub const STRUCTURE_METRICS: &[&str] = &["NumJoins", "NumTables", "NumColumns"];

/// Coarse grouping of a metric node, used as a stand-in for semantic
/// similarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    QueryMetrics,
    ResultMetrics,
    TimeMetrics,
    StructureMetrics,
    Other,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::QueryMetrics => "query_metrics",
            Category::ResultMetrics => "result_metrics",
            Category::TimeMetrics => "time_metrics",
            Category::StructureMetrics => "structure_metrics",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Exact-match lookup of `label` in the fixed metric tables.
pub fn categorize(label: &str) -> Category {
    if QUERY_METRICS.contains(&label) {
        Category::QueryMetrics
    } else if RESULT_METRICS.contains(&label) {
        Category::ResultMetrics
    } else if TIME_METRICS.contains(&label) {
        Category::TimeMetrics
    } else if STRUCTURE_METRICS.contains(&label) {
        Category::StructureMetrics
    } else {
        Category::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        assert_eq!(categorize("QueryTemplate"), Category::QueryMetrics);
        assert_eq!(categorize("ResultCacheHit"), Category::ResultMetrics);
        assert_eq!(categorize("LockWaitTime"), Category::TimeMetrics);
        assert_eq!(categorize("NumColumns"), Category::StructureMetrics);
    }

    #[test]
    fn test_match_is_exact() {
        assert_eq!(categorize("exectime"), Category::Other);
        assert_eq!(categorize("ExecTime "), Category::Other);
        assert_eq!(categorize(""), Category::Other);
    }

    #[test]
    fn test_names() {
        assert_eq!(Category::TimeMetrics.to_string(), "time_metrics");
        assert_eq!(Category::Other.name(), "other");
    }
}
