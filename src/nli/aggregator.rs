//! Contradiction-first aggregation of NLI judgments

use super::models::{NliJudgment, VerdictLabel, VerificationVerdict};

/// A label must beat this confidence strictly to be committed to
pub const COMMIT_THRESHOLD: f64 = 0.5;

/// Round to 3 decimals from the exact binary value (0.5125 is stored below
/// the midpoint and rounds down)
fn round3(value: f64) -> f64 {
    format!("{:.3}", value).parse::<f64>().unwrap_or(value)
}

fn max_confidence<'a>(
    judgments: impl Iterator<Item = &'a (VerdictLabel, f64)>,
    label: VerdictLabel,
) -> Option<f64> {
    judgments
        .filter(|(l, _)| *l == label)
        .map(|(_, c)| *c)
        .fold(None, |acc, c| Some(acc.map_or(c, |m: f64| m.max(c))))
}

/// Combine per-evidence judgments into one verdict.
///
/// Contradictions above the threshold win over entailments; otherwise the
/// claim is unverifiable and reports the strongest confidence seen.
pub fn aggregate(judgments: &[NliJudgment]) -> VerificationVerdict {
    if judgments.is_empty() {
        return VerificationVerdict::unverifiable();
    }

    let mapped: Vec<(VerdictLabel, f64)> = judgments
        .iter()
        .map(|j| (VerdictLabel::from(j.label), j.confidence))
        .collect();

    for label in [VerdictLabel::Contradicted, VerdictLabel::Entailed] {
        if let Some(max) = max_confidence(mapped.iter(), label) {
            if max > COMMIT_THRESHOLD {
                return VerificationVerdict {
                    label,
                    confidence: round3(max),
                };
            }
        }
    }

    let strongest = mapped
        .iter()
        .map(|(_, c)| *c)
        .fold(f64::NEG_INFINITY, f64::max);

    VerificationVerdict {
        label: VerdictLabel::Unverifiable,
        confidence: round3(strongest),
    }
}
