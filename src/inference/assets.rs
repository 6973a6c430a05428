//! Model asset retrieval.
//!
//! The model ships as two payloads: a small graph file and a larger
//! external-weights blob that the graph references by name. Both are
//! required; a missing payload is an asset-fetch error, reported before any
//! session construction is attempted.
//!
//! Retrieval sits behind the [`AssetSource`] seam so the rest of the
//! pipeline never performs IO directly. The bundled implementation serves a
//! local directory; other transports implement the same trait.

use crate::core::{DigitError, DigitResult};
use std::path::PathBuf;
use tracing::debug;

/// Source of model asset payloads, addressed by name.
pub trait AssetSource: std::fmt::Debug {
    /// Retrieves the named asset as raw bytes.
    fn fetch(&self, name: &str) -> DigitResult<Vec<u8>>;
}

/// Asset source backed by a local directory.
#[derive(Debug, Clone)]
pub struct FsAssetSource {
    root: PathBuf,
}

impl FsAssetSource {
    /// Creates a source serving assets from the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory this source serves from.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl AssetSource for FsAssetSource {
    fn fetch(&self, name: &str) -> DigitResult<Vec<u8>> {
        let path = self.root.join(name);
        std::fs::read(&path).map_err(|e| DigitError::asset_fetch(name, e))
    }
}

/// The two payloads needed to construct an inference session.
#[derive(Debug)]
pub struct ModelAssets {
    /// Serialized model graph.
    pub graph: Vec<u8>,
    /// External weights blob referenced by the graph.
    pub weights: Vec<u8>,
}

impl ModelAssets {
    /// Fetches both payloads from the given source.
    ///
    /// The weights blob is fetched first: it is the larger payload, so a
    /// misconfigured source fails before the graph transfer starts.
    pub fn fetch(
        source: &dyn AssetSource,
        graph_name: &str,
        weights_name: &str,
    ) -> DigitResult<Self> {
        let weights = source.fetch(weights_name)?;
        debug!("fetched '{}': {} bytes", weights_name, weights.len());

        let graph = source.fetch(graph_name)?;
        debug!("fetched '{}': {} bytes", graph_name, graph.len());

        Ok(Self { graph, weights })
    }
}
