//! Presentation model for prediction results.
//!
//! The pipeline does not render pixels or markup; it produces a
//! [`PredictionDisplay`] that a host UI consumes: the predicted digit as
//! text, the confidence percentage with one decimal place, and one
//! proportional-width bar per class. Bars are labeled with their
//! percentage only above a visibility threshold so near-zero classes stay
//! uncluttered.

use crate::core::constants::BAR_LABEL_MIN_PCT;
use crate::predictor::DigitPrediction;

/// Text shown before any prediction has completed.
const PLACEHOLDER: &str = "-";

/// One confidence bar in the per-class histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityBar {
    /// The class this bar represents.
    pub digit: usize,
    /// Bar width as a percentage of full scale (0 to 100).
    pub width_pct: f32,
    /// Percentage label, present only when the bar is wide enough to
    /// carry text.
    pub label: Option<String>,
}

/// Renderable state of the prediction panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionDisplay {
    /// Predicted digit as display text.
    pub digit: String,
    /// Confidence percentage as display text (one decimal place).
    pub confidence: String,
    /// Per-class confidence bars, one per digit in order.
    pub bars: Vec<ProbabilityBar>,
}

impl PredictionDisplay {
    /// The empty state: placeholder digit and confidence, no bars.
    pub fn placeholder() -> Self {
        Self {
            digit: PLACEHOLDER.to_string(),
            confidence: PLACEHOLDER.to_string(),
            bars: Vec::new(),
        }
    }

    /// True when the display shows the placeholder state.
    pub fn is_placeholder(&self) -> bool {
        self.digit == PLACEHOLDER
    }

    /// Builds the display state for a completed prediction.
    pub fn from_prediction(prediction: &DigitPrediction) -> Self {
        let bars = prediction
            .probabilities
            .iter()
            .enumerate()
            .map(|(digit, &probability)| {
                let width_pct = probability * 100.0;
                let label = if width_pct > BAR_LABEL_MIN_PCT {
                    Some(format!("{:.1}%", width_pct))
                } else {
                    None
                };
                ProbabilityBar {
                    digit,
                    width_pct,
                    label,
                }
            })
            .collect();

        Self {
            digit: prediction.digit.to_string(),
            confidence: format!("{:.1}%", prediction.confidence * 100.0),
            bars,
        }
    }
}

impl Default for PredictionDisplay {
    fn default() -> Self {
        Self::placeholder()
    }
}
