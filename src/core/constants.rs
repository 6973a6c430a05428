//! Constants used throughout the digit recognition pipeline.
//!
//! This module defines the tensor geometry expected by the model, the
//! normalization parameters of its training distribution, and the default
//! names of the model assets and graph endpoints.

/// Side length of the model input tensor.
///
/// The model consumes 28x28 grayscale images, the geometry of the
/// classic MNIST digit dataset.
pub const INPUT_SIDE: u32 = 28;

/// Total number of elements in one input tensor (28 * 28).
pub const INPUT_LEN: usize = (INPUT_SIDE * INPUT_SIDE) as usize;

/// Number of output classes (digits 0 through 9).
pub const NUM_CLASSES: usize = 10;

/// Mean of the MNIST training distribution.
pub const MNIST_MEAN: f32 = 0.1307;

/// Standard deviation of the MNIST training distribution.
pub const MNIST_STD: f32 = 0.3081;

/// Default side length of the sketch surface.
pub const DEFAULT_SURFACE_SIDE: u32 = 280;

/// Default stroke width for sketch rasterization, in surface pixels.
pub const DEFAULT_STROKE_WIDTH: f32 = 20.0;

/// Default name of the model graph asset.
pub const DEFAULT_GRAPH_ASSET: &str = "model.onnx";

/// Default name of the external weights asset.
///
/// The graph file references this payload by name, so it must sit next to
/// the graph when the session is constructed.
pub const DEFAULT_WEIGHTS_ASSET: &str = "model.onnx.data";

/// Name of the model's input tensor.
pub const MODEL_INPUT_NAME: &str = "input";

/// Name of the model's output tensor.
pub const MODEL_OUTPUT_NAME: &str = "output";

/// Minimum percentage at which a probability bar receives a text label.
///
/// Bars below this threshold stay unlabeled to avoid visual clutter.
pub const BAR_LABEL_MIN_PCT: f32 = 5.0;
