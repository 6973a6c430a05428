//! Error types for the digit recognition pipeline.
//!
//! The taxonomy follows the three failure boundaries of the pipeline:
//! asset retrieval, session construction, and inference. All variants are
//! non-fatal; callers keep the sketch surface and (where applicable) the
//! session usable after reporting the error.

use thiserror::Error;

/// Convenient result alias for pipeline operations.
pub type DigitResult<T> = Result<T, DigitError>;

/// Boxed error type used for error chaining.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by the digit recognition pipeline.
#[derive(Debug, Error)]
pub enum DigitError {
    /// One of the model asset payloads could not be retrieved.
    #[error("failed to fetch asset '{asset}'")]
    AssetFetch {
        /// Name of the asset that could not be retrieved.
        asset: String,
        #[source]
        source: BoxedError,
    },

    /// The inference session could not be constructed from the fetched assets.
    #[error("failed to construct inference session: {context}")]
    SessionBuild {
        /// Description of the construction step that failed.
        context: String,
        #[source]
        source: BoxedError,
    },

    /// A forward pass failed after the session was ready.
    #[error("inference failed: {context}")]
    Inference {
        /// Description of the inference step that failed.
        context: String,
        #[source]
        source: BoxedError,
    },

    /// Input data failed validation.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of the validation failure.
        message: String,
    },

    /// A configuration value failed validation.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },
}

impl DigitError {
    /// Creates an asset retrieval error for the named payload.
    pub fn asset_fetch(
        asset: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::AssetFetch {
            asset: asset.into(),
            source: Box::new(source),
        }
    }

    /// Creates a session construction error with context.
    pub fn session_build(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::SessionBuild {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Creates an inference error with context.
    pub fn inference(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Inference {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Creates an input validation error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Human-readable guidance for surfacing the error to a user.
    ///
    /// Asset retrieval failures point at the asset server, since a missing
    /// `model.onnx` or `model.onnx.data` almost always means the files are
    /// not being served from the expected location. The other variants
    /// carry their own detail.
    pub fn user_guidance(&self) -> String {
        match self {
            Self::AssetFetch { asset, .. } => format!(
                "Could not load the model.\n\
                 Asset '{asset}' was not retrievable.\n\
                 Check that your local server is running and that both \
                 model.onnx and model.onnx.data exist."
            ),
            other => format!("Could not complete the request.\nDetails: {other}"),
        }
    }
}

/// Minimal error type for failures with no underlying source.
#[derive(Debug)]
pub struct SimpleError {
    message: String,
}

impl SimpleError {
    /// Creates a new simple error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SimpleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SimpleError {}
