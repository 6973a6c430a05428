//! High-level digit recognizer.
//!
//! [`DigitRecognizer`] composes the preprocessor, the lazily-loaded
//! inference session, and the score postprocessing into a single
//! `predict` call over a sketch surface. The session is constructed on
//! the first prediction (or eagerly via [`DigitRecognizer::preload`]) and
//! reused afterwards.

use crate::core::constants::NUM_CLASSES;
use crate::core::{DigitError, DigitResult};
use crate::inference::{AssetSource, DigitSession, FsAssetSource, SessionConfig};
use crate::processors::{argmax, softmax, GrayscaleNormalizer, PreprocessConfig};
use image::RgbImage;
use std::path::Path;
use tracing::debug;

/// Configuration for the digit recognizer.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RecognizerConfig {
    /// Preprocessing configuration.
    pub preprocess: PreprocessConfig,
    /// Inference session configuration.
    pub session: SessionConfig,
}

impl RecognizerConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> DigitResult<()> {
        self.preprocess.validate()?;
        self.session.validate()
    }
}

/// Result of one prediction over the sketch surface.
#[derive(Debug, Clone)]
pub struct DigitPrediction {
    /// Predicted digit (0 through 9).
    pub digit: usize,
    /// Probability of the predicted digit.
    pub confidence: f32,
    /// Full probability distribution over the ten classes.
    pub probabilities: Vec<f32>,
}

/// Digit recognizer over sketch surfaces.
#[derive(Debug)]
pub struct DigitRecognizer {
    normalizer: GrayscaleNormalizer,
    session: DigitSession,
    source: Box<dyn AssetSource>,
}

impl DigitRecognizer {
    /// Creates a recognizer with the given configuration and asset source.
    pub fn new(config: RecognizerConfig, source: Box<dyn AssetSource>) -> DigitResult<Self> {
        Ok(Self {
            normalizer: GrayscaleNormalizer::new(config.preprocess)?,
            session: DigitSession::new(config.session)?,
            source,
        })
    }

    /// Creates a recognizer serving model assets from a local directory,
    /// with default preprocessing.
    pub fn from_asset_dir(dir: impl AsRef<Path>) -> DigitResult<Self> {
        Self::new(
            RecognizerConfig::default(),
            Box::new(FsAssetSource::new(dir.as_ref())),
        )
    }

    /// Eagerly loads the model instead of waiting for the first prediction.
    ///
    /// A failure leaves the recognizer retryable; the next call (or the
    /// next prediction) fetches the assets again.
    pub fn preload(&mut self) -> DigitResult<()> {
        self.session.ensure_ready(self.source.as_ref())
    }

    /// True once the inference session is constructed.
    pub fn is_loaded(&self) -> bool {
        self.session.is_ready()
    }

    /// Runs the full pipeline over a sketch surface.
    ///
    /// Loads the model on first use, converts the surface to a normalized
    /// tensor, runs the forward pass, and converts raw scores to a
    /// probability distribution.
    ///
    /// # Returns
    ///
    /// The predicted digit with its confidence and full distribution, or
    /// an error from the load, preprocess, or inference boundary. The
    /// surface and any constructed session remain valid after an error.
    pub fn predict(&mut self, surface: &RgbImage) -> DigitResult<DigitPrediction> {
        self.session.ensure_ready(self.source.as_ref())?;

        let tensor = self.normalizer.tensor_from_surface(surface)?;
        let scores = self.session.infer(&tensor)?;
        let probabilities = softmax(&scores);

        let (digit, confidence) = argmax(&probabilities).ok_or_else(|| {
            DigitError::invalid_input(format!(
                "expected {} probabilities, got an empty distribution",
                NUM_CLASSES
            ))
        })?;
        debug!("predicted digit {} with confidence {:.3}", digit, confidence);

        Ok(DigitPrediction {
            digit,
            confidence,
            probabilities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::SketchPad;
    use crate::core::SimpleError;

    #[derive(Debug)]
    struct FailingSource;

    impl AssetSource for FailingSource {
        fn fetch(&self, name: &str) -> DigitResult<Vec<u8>> {
            Err(DigitError::asset_fetch(name, SimpleError::new("unreachable")))
        }
    }

    #[test]
    fn test_predict_surfaces_load_failure() {
        let mut recognizer =
            DigitRecognizer::new(RecognizerConfig::default(), Box::new(FailingSource)).unwrap();
        let pad = SketchPad::with_defaults();

        let err = recognizer.predict(pad.surface()).unwrap_err();
        assert!(matches!(err, DigitError::AssetFetch { .. }));
        assert!(!recognizer.is_loaded());
    }

    #[test]
    fn test_failed_load_stays_retryable() {
        let mut recognizer =
            DigitRecognizer::new(RecognizerConfig::default(), Box::new(FailingSource)).unwrap();

        assert!(recognizer.preload().is_err());
        assert!(!recognizer.is_loaded());
        // The recognizer retries rather than staying permanently failed.
        assert!(recognizer.preload().is_err());
    }

    #[test]
    fn test_missing_asset_dir_is_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut recognizer = DigitRecognizer::from_asset_dir(dir.path().join("missing")).unwrap();
        let err = recognizer.preload().unwrap_err();
        assert!(matches!(err, DigitError::AssetFetch { .. }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RecognizerConfig {
            preprocess: PreprocessConfig {
                std: -1.0,
                ..PreprocessConfig::default()
            },
            ..RecognizerConfig::default()
        };
        assert!(DigitRecognizer::new(config, Box::new(FailingSource)).is_err());
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let config = RecognizerConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: RecognizerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.session.graph_asset, config.session.graph_asset);
        assert_eq!(parsed.preprocess.mean, config.preprocess.mean);
    }
}
