//! Final interview decision.

use crate::error::{MockMateError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    #[serde(alias = "hire", alias = "HIRE")]
    Hire,
    /// The backend spells it `"Not Hire"`.
    #[serde(
        rename = "Not Hire",
        alias = "NoHire",
        alias = "No Hire",
        alias = "no_hire",
        alias = "NO_HIRE",
        alias = "No_Hire"
    )]
    NoHire,
}

impl Decision {
    /// `Hire` is rendered in the positive style.
    pub fn is_positive(&self) -> bool {
        matches!(self, Decision::Hire)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Hire => f.write_str("Hire"),
            Decision::NoHire => f.write_str("Not Hire"),
        }
    }
}

/// Outcome of one interview attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewResult {
    pub decision: Decision,
    /// Probability of the decision being "hire", in `[0, 1]`.
    pub confidence: f64,
    pub summary: String,
}

impl InterviewResult {
    /// Builds a result from the `[p_no_hire, p_hire]` pair returned by the
    /// result endpoint.
    pub fn from_probability(
        decision: Decision,
        probability: &[f64],
        summary: impl Into<String>,
    ) -> Result<Self> {
        let raw = match probability {
            [_, hire, ..] => *hire,
            [only] => *only,
            [] => {
                return Err(MockMateError::validation(
                    "result response is missing the probability pair",
                ));
            }
        };
        if !raw.is_finite() {
            return Err(MockMateError::validation(format!(
                "result probability is not a number: {raw}"
            )));
        }

        Ok(Self {
            decision,
            confidence: raw.clamp(0.0, 1.0),
            summary: summary.into(),
        })
    }

    /// Confidence as a whole percentage.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hire_with_ninety_percent() {
        let result =
            InterviewResult::from_probability(Decision::Hire, &[0.1, 0.9], "Strong answers.").unwrap();
        assert!(result.decision.is_positive());
        assert_eq!(result.decision.to_string(), "Hire");
        assert_eq!(result.confidence_percent(), 90);
        assert_eq!(result.summary, "Strong answers.");
    }

    #[test]
    fn test_probability_is_clamped() {
        let result = InterviewResult::from_probability(Decision::NoHire, &[0.0, 1.7], "").unwrap();
        assert_eq!(result.confidence, 1.0);
        assert!(!result.decision.is_positive());
    }

    #[test]
    fn test_missing_probability_is_rejected() {
        let err = InterviewResult::from_probability(Decision::Hire, &[], "").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_decision_aliases() {
        let decision: Decision = serde_json::from_str(r#""No Hire""#).unwrap();
        assert_eq!(decision, Decision::NoHire);
        let decision: Decision = serde_json::from_str(r#""Hire""#).unwrap();
        assert_eq!(decision, Decision::Hire);
    }

    #[test]
    fn test_not_hire_matches_backend_spelling() {
        let decision: Decision = serde_json::from_str(r#""Not Hire""#).unwrap();
        assert_eq!(decision, Decision::NoHire);
        assert_eq!(decision.to_string(), "Not Hire");
        assert_eq!(serde_json::to_string(&decision).unwrap(), r#""Not Hire""#);
    }
}
