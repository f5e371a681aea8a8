use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_SCORE: u32 = 100;

/// Resume score returned by the scoring service. Transient: never saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub score: u32, // 0 – 100
    /// Points per category, e.g. "experience" → 25.
    #[serde(default)]
    pub breakdown: BTreeMap<String, u32>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl Score {
    pub fn is_in_range(&self) -> bool {
        self.score <= MAX_SCORE
    }

    /// Clamps an out-of-range score to 100.
    pub fn clamped(mut self) -> Self {
        self.score = self.score.min(MAX_SCORE);
        self
    }
}

/// Result of the summary-generation exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSummary {
    pub summary: String,
    /// Advisory note (e.g. "this is a template"). Not an error.
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedContent {
    pub optimized: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// Acknowledgement of a successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveAck {
    pub document_id: String,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_score_from_backend_json() {
        let score: Score = serde_json::from_value(json!({
            "score": 70,
            "breakdown": {"personal_info": 15, "summary": 0},
            "suggestions": ["Good progress! Add more details to reach excellence"]
        }))
        .unwrap();
        assert_eq!(score.score, 70);
        assert_eq!(score.breakdown["personal_info"], 15);
        assert!(score.is_in_range());
    }

    #[test]
    fn test_score_clamped() {
        let score = Score {
            score: 140,
            breakdown: BTreeMap::new(),
            suggestions: vec![],
        };
        assert!(!score.is_in_range());
        assert_eq!(score.clamped().score, 100);
    }

    #[test]
    fn test_summary_note_optional() {
        let s: GeneratedSummary = serde_json::from_value(json!({"summary": "Hi"})).unwrap();
        assert!(s.note.is_none());
    }
}
