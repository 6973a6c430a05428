//! Model asset retrieval and the lazily-constructed inference session.
//!
//! * [`assets`] - Asset source seam and the two-payload model bundle
//! * [`session`] - Session lifecycle state machine and forward pass

pub mod assets;
pub mod session;

pub use assets::{AssetSource, FsAssetSource, ModelAssets};
pub use session::{DigitSession, SessionConfig, SessionState};
