//! Core types for the digit recognition pipeline.
//!
//! * [`constants`] - Tensor geometry, normalization parameters, asset names
//! * [`errors`] - Error taxonomy and result alias

pub mod constants;
pub mod errors;

pub use errors::{BoxedError, DigitError, DigitResult, SimpleError};

/// 4-dimensional tensor in NCHW layout, the model's input shape.
pub type Tensor4D = ndarray::Array4<f32>;
