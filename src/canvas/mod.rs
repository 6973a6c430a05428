//! Sketch surface and stroke capture.
//!
//! [`SketchPad`] owns a persistent raster surface and rasterizes stroke
//! gestures onto it as they arrive. A gesture is a begin/extend/end
//! sequence in surface-relative coordinates; every `extend` immediately
//! draws the segment from the previous point with a fixed stroke width and
//! round cap and join. Pointer and touch input both collapse to the same
//! three operations, so the pad itself is input-source agnostic.
//!
//! The surface is created once and reused across predictions; `clear`
//! repaints the background without reallocating.

use crate::core::{DigitError, DigitResult};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

/// Ink color for rasterized strokes.
const INK_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Background color of a blank surface.
const BACKGROUND_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Configuration for the sketch surface.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SketchPadConfig {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Stroke width in pixels.
    pub stroke_width: f32,
}

impl Default for SketchPadConfig {
    fn default() -> Self {
        Self {
            width: crate::core::constants::DEFAULT_SURFACE_SIDE,
            height: crate::core::constants::DEFAULT_SURFACE_SIDE,
            stroke_width: crate::core::constants::DEFAULT_STROKE_WIDTH,
        }
    }
}

impl SketchPadConfig {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// Ok if the surface dimensions and stroke width are usable, or a
    /// configuration error otherwise.
    pub fn validate(&self) -> DigitResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(DigitError::config(format!(
                "surface dimensions must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(DigitError::config(format!(
                "stroke width must be positive and finite, got {}",
                self.stroke_width
            )));
        }
        Ok(())
    }
}

/// Persistent sketch surface with gesture-driven stroke rasterization.
#[derive(Debug)]
pub struct SketchPad {
    surface: RgbImage,
    stroke_radius: i32,
    active: bool,
    last_point: Option<(f32, f32)>,
}

impl SketchPad {
    /// Creates a new pad with a blank background.
    ///
    /// # Arguments
    ///
    /// * `config` - Surface dimensions and stroke width.
    ///
    /// # Returns
    ///
    /// A new pad, or a configuration error if `config` is invalid.
    pub fn new(config: SketchPadConfig) -> DigitResult<Self> {
        config.validate()?;
        let surface = RgbImage::from_pixel(config.width, config.height, BACKGROUND_COLOR);
        let stroke_radius = ((config.stroke_width / 2.0).round() as i32).max(1);
        Ok(Self {
            surface,
            stroke_radius,
            active: false,
            last_point: None,
        })
    }

    /// Creates a pad with the default configuration.
    pub fn with_defaults() -> Self {
        // The default config always validates.
        Self::new(SketchPadConfig::default()).expect("default sketch pad config is valid")
    }

    /// Starts a new stroke at a surface-relative coordinate.
    ///
    /// Nothing is rasterized until the stroke is extended.
    pub fn begin_stroke(&mut self, x: f32, y: f32) {
        self.active = true;
        self.last_point = Some((x, y));
    }

    /// Extends the active stroke to a new coordinate.
    ///
    /// Rasterizes the segment from the previous point immediately. A no-op
    /// when no stroke is active.
    pub fn extend_stroke(&mut self, x: f32, y: f32) {
        if !self.active {
            return;
        }
        if let Some(from) = self.last_point {
            self.stamp_segment(from, (x, y));
        }
        self.last_point = Some((x, y));
    }

    /// Ends the active stroke.
    pub fn end_stroke(&mut self) {
        self.active = false;
        self.last_point = None;
    }

    /// Returns true while a stroke gesture is in progress.
    pub fn is_drawing(&self) -> bool {
        self.active
    }

    /// Repaints the surface with the uniform background color.
    ///
    /// The underlying buffer is reused, never reallocated.
    pub fn clear(&mut self) {
        for pixel in self.surface.pixels_mut() {
            *pixel = BACKGROUND_COLOR;
        }
    }

    /// Read access to the raster surface.
    pub fn surface(&self) -> &RgbImage {
        &self.surface
    }

    /// Surface dimensions as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        self.surface.dimensions()
    }

    /// Rasterizes one segment by stamping filled circles along it.
    ///
    /// Stamping at sub-pixel steps gives the fixed-width stroke a round cap
    /// and round join for free; out-of-bounds stamps are clipped by the
    /// drawing primitive.
    fn stamp_segment(&mut self, from: (f32, f32), to: (f32, f32)) {
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let length = (dx * dx + dy * dy).sqrt();
        let steps = (length.ceil() as u32).max(1);

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = (from.0 + dx * t).round() as i32;
            let y = (from.1 + dy * t).round() as i32;
            draw_filled_circle_mut(&mut self.surface, (x, y), self.stroke_radius, INK_COLOR);
        }
    }
}
