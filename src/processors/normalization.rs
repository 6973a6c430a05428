//! Surface-to-tensor preprocessing.
//!
//! Converts the sketch surface into the model's input tensor: downsample to
//! the model's input geometry, average the color channels to grayscale,
//! invert intensity so ink-on-background becomes high-value-on-low (the
//! training set draws bright digits on a dark field), and apply an affine
//! normalization against the training distribution.
//!
//! The normalization parameters are configuration rather than code: models
//! retrained on a different distribution swap the mean/std pair without
//! touching the preprocessing path.

use crate::core::constants::{INPUT_SIDE, MNIST_MEAN, MNIST_STD};
use crate::core::{DigitError, DigitResult, Tensor4D};
use image::{imageops, imageops::FilterType, RgbImage};

/// Configuration for surface preprocessing.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PreprocessConfig {
    /// Side length of the square model input.
    pub target_side: u32,
    /// Scaling factor applied to inverted intensities before normalization.
    pub scale: f32,
    /// Mean of the model's training distribution.
    pub mean: f32,
    /// Standard deviation of the model's training distribution.
    pub std: f32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            target_side: INPUT_SIDE,
            scale: 1.0 / 255.0,
            mean: MNIST_MEAN,
            std: MNIST_STD,
        }
    }
}

impl PreprocessConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> DigitResult<()> {
        if self.target_side == 0 {
            return Err(DigitError::config("target side must be greater than 0"));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(DigitError::config(format!(
                "scale must be positive and finite, got {}",
                self.scale
            )));
        }
        if !self.mean.is_finite() {
            return Err(DigitError::config(format!(
                "mean must be finite, got {}",
                self.mean
            )));
        }
        if !self.std.is_finite() || self.std <= 0.0 {
            return Err(DigitError::config(format!(
                "standard deviation must be greater than 0, got {}",
                self.std
            )));
        }
        Ok(())
    }
}

/// Normalizes sketch surfaces into model input tensors.
///
/// The affine step is precomputed into per-value coefficients
/// (alpha = scale / std, beta = -mean / std) so each pixel costs one
/// multiply-add.
#[derive(Debug)]
pub struct GrayscaleNormalizer {
    target_side: u32,
    /// Scaling factor applied to the inverted intensity (alpha = scale / std).
    alpha: f32,
    /// Offset applied after scaling (beta = -mean / std).
    beta: f32,
}

impl GrayscaleNormalizer {
    /// Creates a normalizer from the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Target geometry and normalization parameters.
    ///
    /// # Returns
    ///
    /// A new normalizer, or a configuration error if validation fails.
    pub fn new(config: PreprocessConfig) -> DigitResult<Self> {
        config.validate()?;
        Ok(Self {
            target_side: config.target_side,
            alpha: config.scale / config.std,
            beta: -config.mean / config.std,
        })
    }

    /// Creates a normalizer with the default MNIST parameters.
    pub fn with_defaults() -> Self {
        Self::new(PreprocessConfig::default()).expect("default preprocess config is valid")
    }

    /// Side length of the tensors this normalizer produces.
    pub fn target_side(&self) -> u32 {
        self.target_side
    }

    /// Converts a sketch surface into a normalized NCHW input tensor.
    ///
    /// Deterministic for a given surface: downsamples with a bilinear
    /// filter, averages the three color channels, inverts, and applies the
    /// affine normalization. The result has shape
    /// `(1, 1, target_side, target_side)` in row-major order.
    pub fn tensor_from_surface(&self, surface: &RgbImage) -> DigitResult<Tensor4D> {
        let side = self.target_side;
        let scaled = imageops::resize(surface, side, side, FilterType::Triangle);

        let mut values = Vec::with_capacity((side * side) as usize);
        for pixel in scaled.pixels() {
            let gray =
                (pixel.0[0] as f32 + pixel.0[1] as f32 + pixel.0[2] as f32) / 3.0;
            let inverted = 255.0 - gray;
            values.push(inverted * self.alpha + self.beta);
        }

        let values_len = values.len();
        Tensor4D::from_shape_vec((1, 1, side as usize, side as usize), values).map_err(|_| {
            DigitError::invalid_input(format!(
                "cannot shape {} values into a 1x1x{}x{} tensor",
                values_len, side, side
            ))
        })
    }
}
