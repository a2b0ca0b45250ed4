//! Questions and answer evaluations of the REST interview flow.

use crate::id::RemoteId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
}

impl Difficulty {
    /// The first question is asked at beginner level, later ones at
    /// intermediate level.
    pub fn for_answered(answered: usize) -> Self {
        if answered == 0 {
            Difficulty::Beginner
        } else {
            Difficulty::Intermediate
        }
    }
}

/// A question produced by the question endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: Option<RemoteId>,
    pub text: String,
    pub category: String,
    pub difficulty: String,
}

/// One answered question and its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub question_id: Option<RemoteId>,
    pub question: String,
    pub answer: String,
    /// Similarity score in `[0, 1]`.
    pub similarity_score: f64,
    pub feedback: String,
    pub assessment_id: Option<RemoteId>,
}

impl Evaluation {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.similarity_score)
    }

    pub fn score_percent(&self) -> u32 {
        (self.similarity_score.clamp(0.0, 1.0) * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Fair,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            ScoreBand::Strong
        } else if score >= 0.6 {
            ScoreBand::Fair
        } else {
            ScoreBand::Weak
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreBand::Strong => f.write_str("strong"),
            ScoreBand::Fair => f.write_str("fair"),
            ScoreBand::Weak => f.write_str("weak"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(0.8), ScoreBand::Strong);
        assert_eq!(ScoreBand::from_score(0.79), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(0.6), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(0.1), ScoreBand::Weak);
    }

    #[test]
    fn test_difficulty_progression() {
        assert_eq!(Difficulty::for_answered(0), Difficulty::Beginner);
        assert_eq!(Difficulty::for_answered(3), Difficulty::Intermediate);
        assert_eq!(serde_json::to_string(&Difficulty::Beginner).unwrap(), r#""beginner""#);
    }
}
