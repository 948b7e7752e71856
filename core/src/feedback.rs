use std::fmt;

use crate::score::Evaluation;

/// Status line shown under the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    IdealMode,
    DrawFromMemory,
    IdealSaved,
    IdealRequired,
    IdealCleared,
    AttemptCleared,
    Matched(u32),
    Mismatched(u32),
}

impl Feedback {
    /// `None` when there is nothing to score yet.
    pub fn from_evaluation(evaluation: Evaluation) -> Option<Self> {
        match evaluation {
            Evaluation::InsufficientData => None,
            Evaluation::Scored(result) if result.pass => {
                Some(Feedback::Matched(result.percentage()))
            }
            Evaluation::Scored(result) => Some(Feedback::Mismatched(result.percentage())),
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::IdealMode => f.write_str("Ideal route"),
            Feedback::DrawFromMemory => f.write_str("Draw it from memory"),
            Feedback::IdealSaved => f.write_str("Ideal route saved"),
            Feedback::IdealRequired => f.write_str("Save the ideal route first"),
            Feedback::IdealCleared => f.write_str("Ideal route cleared"),
            Feedback::AttemptCleared => f.write_str("Attempt cleared"),
            Feedback::Matched(pct) => write!(f, "Match: {pct}%"),
            Feedback::Mismatched(pct) => write!(f, "No match: {pct}%"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::ScoreResult;

    #[test]
    fn scored_evaluations_map_to_pass_or_fail() {
        let pass = ScoreResult {
            score: 0.166,
            pass: true,
            normalized_distance: 0.05,
        };
        assert_eq!(
            Feedback::from_evaluation(Evaluation::Scored(pass)),
            Some(Feedback::Matched(17))
        );
        let fail = ScoreResult {
            score: 0.0,
            pass: false,
            normalized_distance: 0.12,
        };
        assert_eq!(
            Feedback::from_evaluation(Evaluation::Scored(fail)),
            Some(Feedback::Mismatched(0))
        );
        assert_eq!(Feedback::from_evaluation(Evaluation::InsufficientData), None);
    }

    #[test]
    fn display_includes_percentage() {
        assert_eq!(Feedback::Matched(83).to_string(), "Match: 83%");
        assert_eq!(Feedback::Mismatched(4).to_string(), "No match: 4%");
    }
}
