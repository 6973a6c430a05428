//! # inkdigit
//!
//! A handwritten-digit recognition pipeline: a persistent sketch surface
//! captures stroke gestures, a preprocessor downsamples the drawing to a
//! normalized 28x28 tensor, and an ONNX model (loaded lazily from a graph
//! file plus an external weights blob) produces per-class scores that are
//! softmaxed into a confidence histogram.
//!
//! ## Components
//!
//! - **Stroke Capture**: fixed-width round-cap rasterization of pointer
//!   and touch gestures onto a reusable surface
//! - **Preprocessing**: downsample, grayscale, invert, and normalize
//!   against the model's training distribution
//! - **Inference**: lazily-constructed, retryable ONNX Runtime session
//! - **Presentation**: predicted digit, confidence, and proportional
//!   probability bars as a renderable data model
//!
//! ## Modules
//!
//! * [`core`] - Error taxonomy, constants, and tensor aliases
//! * [`canvas`] - Sketch surface and stroke capture
//! * [`processors`] - Tensor preprocessing and score postprocessing
//! * [`inference`] - Asset retrieval and the inference session
//! * [`predictor`] - High-level digit recognizer
//! * [`display`] - Presentation model for prediction results
//! * [`app`] - Application state object wiring the pieces together
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use inkdigit::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Serve model.onnx and model.onnx.data from a local directory.
//! let source = Box::new(FsAssetSource::new("assets"));
//! let mut app = DigitApp::new(AppConfig::default(), source)?;
//! app.preload()?;
//!
//! // Draw a stroke and run the pipeline.
//! app.pointer_down(60.0, 40.0);
//! app.pointer_move(80.0, 240.0);
//! app.pointer_up();
//!
//! let display = app.predict()?;
//! println!("predicted {} ({})", display.digit, display.confidence);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod canvas;
pub mod core;
pub mod display;
pub mod inference;
pub mod predictor;
pub mod processors;

/// Initializes the tracing subscriber for logging.
///
/// Sets up the tracing subscriber with an environment filter and a
/// formatting layer. Typically called once at application startup.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Application state (essential)
    pub use crate::app::{AppConfig, DigitApp};

    // Sketch surface
    pub use crate::canvas::{SketchPad, SketchPadConfig};

    // Recognition
    pub use crate::predictor::{DigitPrediction, DigitRecognizer, RecognizerConfig};

    // Presentation
    pub use crate::display::{PredictionDisplay, ProbabilityBar};

    // Assets and session lifecycle
    pub use crate::inference::{AssetSource, FsAssetSource, SessionConfig, SessionState};

    // Error handling (essential)
    pub use crate::core::{DigitError, DigitResult};
}
