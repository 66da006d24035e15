//! NLI judgment and verdict types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw label produced by the NLI classifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NliLabel {
    Entailment,
    Contradiction,
    Neutral,
}

impl NliLabel {
    /// Candidate labels offered to the zero-shot classifier
    pub const CANDIDATES: [&'static str; 3] = ["entailment", "contradiction", "neutral"];

    pub fn as_str(&self) -> &'static str {
        match self {
            NliLabel::Entailment => "entailment",
            NliLabel::Contradiction => "contradiction",
            NliLabel::Neutral => "neutral",
        }
    }
}

impl FromStr for NliLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entailment" => Ok(NliLabel::Entailment),
            "contradiction" => Ok(NliLabel::Contradiction),
            "neutral" => Ok(NliLabel::Neutral),
            other => Err(format!("unknown NLI label: {}", other)),
        }
    }
}

/// Verdict vocabulary
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum VerdictLabel {
    Entailed,
    Contradicted,
    Unverifiable,
}

impl VerdictLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictLabel::Entailed => "ENTAILED",
            VerdictLabel::Contradicted => "CONTRADICTED",
            VerdictLabel::Unverifiable => "UNVERIFIABLE",
        }
    }
}

impl From<NliLabel> for VerdictLabel {
    fn from(label: NliLabel) -> Self {
        match label {
            NliLabel::Entailment => VerdictLabel::Entailed,
            NliLabel::Contradiction => VerdictLabel::Contradicted,
            NliLabel::Neutral => VerdictLabel::Unverifiable,
        }
    }
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classifier judgment for a (claim, evidence) pair
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NliJudgment {
    pub label: NliLabel,
    pub confidence: f64,
}

impl NliJudgment {
    pub fn new(label: NliLabel, confidence: f64) -> Self {
        Self { label, confidence }
    }
}

/// Final verdict for a claim
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct VerificationVerdict {
    pub label: VerdictLabel,
    pub confidence: f64,
}

impl VerificationVerdict {
    pub fn unverifiable() -> Self {
        Self {
            label: VerdictLabel::Unverifiable,
            confidence: 0.0,
        }
    }
}

/// Verdict plus the evidence it was derived from
#[derive(Debug, Clone, Serialize)]
pub struct ClaimVerification {
    pub claim: String,
    pub verdict: VerificationVerdict,
    pub evidence: Vec<String>,
    /// Evidence items or sources dropped after a failed call
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_mapping() {
        assert_eq!(VerdictLabel::from(NliLabel::Entailment), VerdictLabel::Entailed);
        assert_eq!(VerdictLabel::from(NliLabel::Contradiction), VerdictLabel::Contradicted);
        assert_eq!(VerdictLabel::from(NliLabel::Neutral), VerdictLabel::Unverifiable);
    }

    #[test]
    fn test_label_parsing() {
        assert_eq!("neutral".parse::<NliLabel>(), Ok(NliLabel::Neutral));
        assert!("ENTAILMENT".parse::<NliLabel>().is_err());
    }

    #[test]
    fn test_verdict_serialization() {
        let verdict = VerificationVerdict {
            label: VerdictLabel::Contradicted,
            confidence: 0.9,
        };
        let value = serde_json::to_value(verdict).unwrap();
        assert_eq!(value["label"], "CONTRADICTED");
    }
}
