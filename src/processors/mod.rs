//! Tensor preprocessing and score postprocessing.
//!
//! * [`normalization`] - Surface downsampling and affine normalization
//! * [`postprocess`] - Softmax and argmax over raw model scores

pub mod normalization;
pub mod postprocess;

pub use normalization::{GrayscaleNormalizer, PreprocessConfig};
pub use postprocess::{argmax, softmax};
