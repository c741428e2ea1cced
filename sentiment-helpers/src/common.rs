use crate::Float;
use std::fmt::{Display, Formatter};

/// The two classes a review can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    /// Maps a sigmoid score to a class. Only scores strictly above one half
    /// count as positive.
    pub fn from_score<F: Float>(score: F) -> Self {
        let half = F::from_f64(0.5).unwrap_or_else(F::zero);
        if score > half {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
        }
    }
}

impl Display for Sentiment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of scoring a single review.
///
/// F: The float type of the score (e.g., f32, f64).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction<F: Float> {
    pub sentiment: Sentiment,
    /// Raw model output in `(0, 1)`, not the probability of the chosen class.
    pub confidence: F,
}

impl<F: Float> Prediction<F> {
    pub fn from_score(score: F) -> Self {
        Prediction {
            sentiment: Sentiment::from_score(score),
            confidence: score,
        }
    }
}

impl<F: Float> Display for Prediction<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Sentiment: {}, Confidence: {:.4}",
            self.sentiment, self.confidence
        )
    }
}
