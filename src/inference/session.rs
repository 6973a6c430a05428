//! Lazily-constructed ONNX inference session.
//!
//! [`DigitSession`] moves through `Unloaded -> Loading -> Ready`. Loading
//! fetches the two asset payloads and constructs an `ort` session from
//! them; this is the expensive one-time step, and every later prediction
//! reuses the same session. Any load failure resets the state to
//! `Unloaded` so a later request can retry; there is no absorbing failed
//! state.
//!
//! The session takes `&mut self` for both loading and inference, so a
//! forward pass can never overlap session construction and at most one
//! inference is in flight at a time.

use crate::core::constants::{
    DEFAULT_GRAPH_ASSET, DEFAULT_WEIGHTS_ASSET, MODEL_INPUT_NAME, MODEL_OUTPUT_NAME, NUM_CLASSES,
};
use crate::core::{DigitError, DigitResult, SimpleError, Tensor4D};
use crate::inference::assets::{AssetSource, ModelAssets};
use ort::logging::LogLevel;
use ort::session::Session;
use ort::value::TensorRef;
use std::path::PathBuf;
use tracing::{debug, info};

/// Configuration for the inference session.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SessionConfig {
    /// Name of the model graph asset.
    pub graph_asset: String,
    /// Name of the external weights asset. The graph references this
    /// payload by name, so it must match what the graph expects.
    pub weights_asset: String,
    /// Name of the model's input tensor.
    pub input_name: String,
    /// Name of the model's output tensor. Discovered from the session when
    /// not set.
    pub output_name: Option<String>,
    /// Directory where fetched payloads are staged for the runtime.
    /// Defaults to a crate-specific directory under the system temp dir.
    pub stage_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            graph_asset: DEFAULT_GRAPH_ASSET.to_string(),
            weights_asset: DEFAULT_WEIGHTS_ASSET.to_string(),
            input_name: MODEL_INPUT_NAME.to_string(),
            output_name: Some(MODEL_OUTPUT_NAME.to_string()),
            stage_dir: None,
        }
    }
}

impl SessionConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> DigitResult<()> {
        if self.graph_asset.is_empty() || self.weights_asset.is_empty() {
            return Err(DigitError::config("asset names must be non-empty"));
        }
        if self.graph_asset == self.weights_asset {
            return Err(DigitError::config(format!(
                "graph and weights assets must be distinct, both are '{}'",
                self.graph_asset
            )));
        }
        if self.input_name.is_empty() {
            return Err(DigitError::config("model input name must be non-empty"));
        }
        Ok(())
    }

    fn resolved_stage_dir(&self) -> PathBuf {
        self.stage_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("inkdigit-assets"))
    }
}

/// Lifecycle state of the inference session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session; assets have not been retrieved (or the last load failed).
    Unloaded,
    /// Assets are being retrieved and the session constructed.
    Loading,
    /// The session is constructed and reusable.
    Ready,
}

/// Lazily-initialized wrapper around an `ort` session.
pub struct DigitSession {
    config: SessionConfig,
    session: Option<Session>,
    state: SessionState,
}

impl std::fmt::Debug for DigitSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitSession")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish()
    }
}

impl DigitSession {
    /// Creates an unloaded session with the given configuration.
    pub fn new(config: SessionConfig) -> DigitResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            session: None,
            state: SessionState::Unloaded,
        })
    }

    /// Creates an unloaded session with the default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SessionConfig::default()).expect("default session config is valid")
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// True once the session is constructed.
    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    /// Ensures the session is constructed, fetching assets if necessary.
    ///
    /// A ready session returns immediately, so the expensive construction
    /// runs at most once across any number of prediction requests. On
    /// failure the state resets to [`SessionState::Unloaded`] and the next
    /// call retries from scratch.
    pub fn ensure_ready(&mut self, source: &dyn AssetSource) -> DigitResult<()> {
        if self.session.is_some() {
            debug!("reusing constructed inference session");
            return Ok(());
        }

        self.state = SessionState::Loading;
        match self.load(source) {
            Ok(session) => {
                self.session = Some(session);
                self.state = SessionState::Ready;
                info!("inference session ready");
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Unloaded;
                Err(e)
            }
        }
    }

    /// Runs a forward pass over a `(1, 1, 28, 28)` input tensor.
    ///
    /// # Arguments
    ///
    /// * `tensor` - Normalized input tensor.
    ///
    /// # Returns
    ///
    /// The raw per-class scores, or an inference error. The session stays
    /// valid for subsequent attempts after an error.
    pub fn infer(&mut self, tensor: &Tensor4D) -> DigitResult<[f32; NUM_CLASSES]> {
        let session = self.session.as_mut().ok_or_else(|| {
            DigitError::invalid_input("inference requested before the session is ready")
        })?;

        let output_name = match &self.config.output_name {
            Some(name) => name.clone(),
            None => session
                .outputs
                .first()
                .map(|output| output.name.clone())
                .ok_or_else(|| {
                    DigitError::invalid_input("model has no outputs; the graph may be corrupted")
                })?,
        };

        let input_tensor = TensorRef::from_array_view(tensor.view()).map_err(|e| {
            DigitError::inference(
                format!("failed to convert input tensor with shape {:?}", tensor.shape()),
                e,
            )
        })?;
        let inputs = ort::inputs![self.config.input_name.as_str() => input_tensor];

        let outputs = session
            .run(inputs)
            .map_err(|e| DigitError::inference("forward pass failed", e))?;

        let (output_shape, output_data) = outputs[output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                DigitError::inference(
                    format!("failed to extract output tensor '{}' as f32", output_name),
                    e,
                )
            })?;

        if output_data.len() != NUM_CLASSES {
            return Err(DigitError::inference(
                format!(
                    "expected {} class scores, got {} (output shape {:?})",
                    NUM_CLASSES,
                    output_data.len(),
                    output_shape
                ),
                SimpleError::new("unexpected output shape"),
            ));
        }

        let mut scores = [0.0f32; NUM_CLASSES];
        scores.copy_from_slice(output_data);
        debug!("forward pass complete");
        Ok(scores)
    }

    /// Fetches both payloads, stages them side by side, and constructs the
    /// session.
    fn load(&self, source: &dyn AssetSource) -> DigitResult<Session> {
        info!("loading model assets");
        let assets = ModelAssets::fetch(source, &self.config.graph_asset, &self.config.weights_asset)?;

        // The runtime resolves the external weights blob relative to the
        // graph file, so both payloads must land in the same directory.
        let stage_dir = self.config.resolved_stage_dir();
        let graph_path = self
            .stage(&stage_dir, &assets)
            .map_err(|e| DigitError::session_build("failed to stage model assets", e))?;

        let builder = Session::builder()
            .map_err(|e| DigitError::session_build("failed to create session builder", e))?
            .with_log_level(LogLevel::Error)
            .map_err(|e| DigitError::session_build("failed to configure session logging", e))?;

        let session = builder.commit_from_file(&graph_path).map_err(|e| {
            DigitError::session_build(
                format!(
                    "failed to construct session from '{}'; the assets may be malformed",
                    graph_path.display()
                ),
                e,
            )
        })?;

        info!(
            "constructed inference session ({} graph bytes, {} weight bytes)",
            assets.graph.len(),
            assets.weights.len()
        );
        Ok(session)
    }

    /// Writes both payloads into the stage directory, returning the staged
    /// graph path.
    fn stage(&self, dir: &std::path::Path, assets: &ModelAssets) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let weights_path = dir.join(&self.config.weights_asset);
        std::fs::write(&weights_path, &assets.weights)?;
        let graph_path = dir.join(&self.config.graph_asset);
        std::fs::write(&graph_path, &assets.graph)?;
        Ok(graph_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Source that counts fetches and optionally fails them all.
    #[derive(Debug)]
    struct CountingSource {
        fetches: Cell<usize>,
        fail: bool,
    }

    impl CountingSource {
        fn failing() -> Self {
            Self {
                fetches: Cell::new(0),
                fail: true,
            }
        }
    }

    impl AssetSource for CountingSource {
        fn fetch(&self, name: &str) -> DigitResult<Vec<u8>> {
            self.fetches.set(self.fetches.get() + 1);
            if self.fail {
                Err(DigitError::asset_fetch(name, SimpleError::new("simulated fetch failure")))
            } else {
                Ok(vec![0u8; 4])
            }
        }
    }

    #[test]
    fn test_new_session_is_unloaded() {
        let session = DigitSession::with_defaults();
        assert_eq!(session.state(), SessionState::Unloaded);
        assert!(!session.is_ready());
    }

    #[test]
    fn test_fetch_failure_leaves_session_retryable() {
        let mut session = DigitSession::with_defaults();
        let source = CountingSource::failing();

        let err = session.ensure_ready(&source).unwrap_err();
        assert!(matches!(err, DigitError::AssetFetch { .. }));
        assert_eq!(session.state(), SessionState::Unloaded);

        // A later request retries from scratch instead of staying failed.
        let first_round = source.fetches.get();
        assert!(session.ensure_ready(&source).is_err());
        assert!(source.fetches.get() > first_round);
    }

    #[test]
    fn test_malformed_assets_are_session_build_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("model.onnx"), b"not a real model").unwrap();
        std::fs::write(dir.path().join("model.onnx.data"), b"not real weights").unwrap();

        let config = SessionConfig {
            stage_dir: Some(dir.path().join("stage")),
            ..SessionConfig::default()
        };
        let mut session = DigitSession::new(config).unwrap();
        let source = crate::inference::assets::FsAssetSource::new(dir.path());

        let err = session.ensure_ready(&source).unwrap_err();
        assert!(matches!(err, DigitError::SessionBuild { .. }));
        assert_eq!(session.state(), SessionState::Unloaded);
    }

    #[test]
    fn test_infer_before_ready_is_rejected() {
        let mut session = DigitSession::with_defaults();
        let tensor = Tensor4D::zeros((1, 1, 28, 28));
        let err = session.infer(&tensor).unwrap_err();
        assert!(matches!(err, DigitError::InvalidInput { .. }));
    }

    #[test]
    fn test_config_rejects_colliding_asset_names() {
        let config = SessionConfig {
            graph_asset: "model.onnx".to_string(),
            weights_asset: "model.onnx".to_string(),
            ..SessionConfig::default()
        };
        assert!(DigitSession::new(config).is_err());
    }

    #[test]
    fn test_config_rejects_empty_names() {
        let config = SessionConfig {
            graph_asset: String::new(),
            ..SessionConfig::default()
        };
        assert!(DigitSession::new(config).is_err());

        let config = SessionConfig {
            input_name: String::new(),
            ..SessionConfig::default()
        };
        assert!(DigitSession::new(config).is_err());
    }
}
