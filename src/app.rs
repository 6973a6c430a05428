//! Application state object tying the pipeline together.
//!
//! [`DigitApp`] owns the sketch pad, the recognizer, and the current
//! display state; there is no module-level mutable state. It is
//! constructed once at startup and lives for the rest of the process.
//!
//! Event flow is single-threaded: gesture events mutate the pad, `clear`
//! resets pad and display together, and `predict` runs the full pipeline,
//! mutating the display only after the whole run succeeds. A failed
//! prediction leaves the previous display (and the pad) untouched, so the
//! UI is never left partially updated.

use crate::canvas::{SketchPad, SketchPadConfig};
use crate::core::DigitResult;
use crate::display::PredictionDisplay;
use crate::inference::AssetSource;
use crate::predictor::{DigitRecognizer, RecognizerConfig};
use tracing::warn;

/// Configuration for the application state object.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct AppConfig {
    /// Sketch surface configuration.
    pub sketch_pad: SketchPadConfig,
    /// Recognizer configuration.
    pub recognizer: RecognizerConfig,
}

/// Application state: sketch pad, recognizer, and display.
#[derive(Debug)]
pub struct DigitApp {
    pad: SketchPad,
    recognizer: DigitRecognizer,
    display: PredictionDisplay,
}

impl DigitApp {
    /// Creates the application state with the given asset source.
    pub fn new(config: AppConfig, source: Box<dyn AssetSource>) -> DigitResult<Self> {
        Ok(Self {
            pad: SketchPad::new(config.sketch_pad)?,
            recognizer: DigitRecognizer::new(config.recognizer, source)?,
            display: PredictionDisplay::placeholder(),
        })
    }

    /// Eagerly loads the model at startup.
    ///
    /// Mirrors lazy loading on first prediction; a failure here is
    /// reported to the caller and the app remains usable, since the next
    /// prediction retries the load.
    pub fn preload(&mut self) -> DigitResult<()> {
        self.recognizer.preload().inspect_err(|e| {
            warn!("model preload failed: {}", e.user_guidance());
        })
    }

    /// Pointer pressed: starts a stroke.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.pad.begin_stroke(x, y);
    }

    /// Pointer moved: extends the active stroke.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.pad.extend_stroke(x, y);
    }

    /// Pointer released (or left the surface): ends the stroke.
    pub fn pointer_up(&mut self) {
        self.pad.end_stroke();
    }

    /// Touch began: same semantics as a pointer press.
    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.pointer_down(x, y);
    }

    /// Touch moved: same semantics as a pointer move.
    pub fn touch_move(&mut self, x: f32, y: f32) {
        self.pointer_move(x, y);
    }

    /// Touch ended: same semantics as a pointer release.
    pub fn touch_end(&mut self) {
        self.pointer_up();
    }

    /// Clears the surface and resets the display to the placeholder state.
    pub fn clear(&mut self) {
        self.pad.clear();
        self.display = PredictionDisplay::placeholder();
    }

    /// Runs the full pipeline and updates the display.
    ///
    /// The display is only mutated after a fully successful run; on error
    /// the previous display state stays in place and the error carries
    /// user-facing guidance via
    /// [`DigitError::user_guidance`](crate::core::DigitError::user_guidance).
    pub fn predict(&mut self) -> DigitResult<&PredictionDisplay> {
        let prediction = self
            .recognizer
            .predict(self.pad.surface())
            .inspect_err(|e| {
                warn!("prediction failed: {}", e.user_guidance());
            })?;
        self.display = PredictionDisplay::from_prediction(&prediction);
        Ok(&self.display)
    }

    /// Current display state.
    pub fn display(&self) -> &PredictionDisplay {
        &self.display
    }

    /// Read access to the sketch pad.
    pub fn pad(&self) -> &SketchPad {
        &self.pad
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DigitError, DigitResult, SimpleError};

    #[derive(Debug)]
    struct FailingSource;

    impl AssetSource for FailingSource {
        fn fetch(&self, name: &str) -> DigitResult<Vec<u8>> {
            Err(DigitError::asset_fetch(name, SimpleError::new("unreachable")))
        }
    }

    fn app() -> DigitApp {
        DigitApp::new(AppConfig::default(), Box::new(FailingSource)).unwrap()
    }

    fn ink_pixel_count(app: &DigitApp) -> usize {
        app.pad()
            .surface()
            .pixels()
            .filter(|p| p.0 != [255, 255, 255])
            .count()
    }

    #[test]
    fn test_starts_with_placeholder_display() {
        let app = app();
        assert!(app.display().is_placeholder());
    }

    #[test]
    fn test_pointer_gestures_draw_on_pad() {
        let mut app = app();
        app.pointer_down(40.0, 40.0);
        app.pointer_move(200.0, 120.0);
        app.pointer_up();
        assert!(ink_pixel_count(&app) > 0);
    }

    #[test]
    fn test_touch_and_pointer_are_equivalent() {
        let mut by_pointer = app();
        by_pointer.pointer_down(40.0, 40.0);
        by_pointer.pointer_move(200.0, 120.0);
        by_pointer.pointer_up();

        let mut by_touch = app();
        by_touch.touch_start(40.0, 40.0);
        by_touch.touch_move(200.0, 120.0);
        by_touch.touch_end();

        assert_eq!(
            by_pointer.pad().surface().as_raw(),
            by_touch.pad().surface().as_raw()
        );
    }

    #[test]
    fn test_clear_resets_pad_and_display() {
        let mut app = app();
        app.pointer_down(40.0, 40.0);
        app.pointer_move(200.0, 120.0);
        app.pointer_up();
        assert!(ink_pixel_count(&app) > 0);

        app.clear();
        assert_eq!(ink_pixel_count(&app), 0);
        assert!(app.display().is_placeholder());
    }

    #[test]
    fn test_failed_predict_leaves_display_untouched() {
        let mut app = app();
        app.pointer_down(40.0, 40.0);
        app.pointer_move(200.0, 120.0);
        app.pointer_up();

        assert!(app.predict().is_err());
        assert!(app.display().is_placeholder());
        // The pad keeps its strokes for a retry.
        assert!(ink_pixel_count(&app) > 0);
    }

    #[test]
    fn test_preload_failure_is_retryable() {
        let mut app = app();
        assert!(app.preload().is_err());
        assert!(app.preload().is_err());
        // The app is still usable for drawing afterwards.
        app.pointer_down(40.0, 40.0);
        app.pointer_move(100.0, 100.0);
        app.pointer_up();
        assert!(ink_pixel_count(&app) > 0);
    }
}
