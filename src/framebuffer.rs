//! In-memory pixel framebuffer backing the terminal display.

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::style::Color;

use crate::render::{Framebuffer, Layer, TextAlignment};

/// Line of text written onto the framebuffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TextRun {
    /// Horizontal offset, interpreted according to `alignment`.
    pub(crate) x: u32,
    /// Pixel row of the top edge of the text.
    pub(crate) y: u32,
    /// Text to show.
    pub(crate) text: String,
    /// Horizontal anchoring.
    pub(crate) alignment: TextAlignment,
}

/// Two-layer pixel surface with a text overlay.
///
/// Each layer holds an optional color per pixel; the visible color of a pixel is the foreground
/// one when set and the background one otherwise. Text lives on the foreground and is wiped
/// together with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelFramebuffer {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// Row-major background layer.
    background: Vec<Option<Color>>,
    /// Row-major foreground layer.
    foreground: Vec<Option<Color>>,
    /// Text written since the foreground was last cleared.
    texts: Vec<TextRun>,
}

impl PixelFramebuffer {
    /// Creates a blank framebuffer of `width x height` pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the pixel count does not fit in memory indices.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = usize::try_from(
            width
                .checked_mul(height)
                .ok_or_eyre("framebuffer dimensions overflow")?,
        )?;

        Ok(Self {
            width,
            height,
            background: vec![None; len],
            foreground: vec![None; len],
            texts: Vec::new(),
        })
    }

    /// Returns the visible color of a pixel, or `None` if nothing was ever drawn there.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let index = self.index(x, y)?;
        let top = self.foreground.get(index).copied().flatten();

        top.or_else(|| self.background.get(index).copied().flatten())
    }

    /// Text currently shown on the foreground.
    pub(crate) fn texts(&self) -> &[TextRun] {
        &self.texts
    }

    /// Returns the storage index of a pixel, or `None` when it lies off the surface.
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            usize::try_from(y * self.width + x).ok()
        } else {
            None
        }
    }

    /// Paints a single foreground pixel, ignoring positions off the surface.
    fn plot(&mut self, x: u32, y: u32, color: Color) {
        if let Some(index) = self.index(x, y) {
            if let Some(pixel) = self.foreground.get_mut(index) {
                *pixel = Some(color);
            }
        }
    }
}

impl Framebuffer for PixelFramebuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, layer: Layer, color: Color) {
        match layer {
            Layer::Background => self.background.fill(Some(color)),
            Layer::Foreground => {
                self.foreground.fill(Some(color));
                self.texts.clear();
            }
        }
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Color) {
        let right = x.saturating_add(width).min(self.width);
        let bottom = y.saturating_add(height).min(self.height);

        for row in y..bottom {
            for column in x..right {
                self.plot(column, row, color);
            }
        }
    }

    fn fill_circle(&mut self, center_x: u32, center_y: u32, radius: u32, color: Color) {
        let radius_squared = u64::from(radius) * u64::from(radius);
        let right = center_x.saturating_add(radius).min(self.width.saturating_sub(1));
        let bottom = center_y.saturating_add(radius).min(self.height.saturating_sub(1));

        for row in center_y.saturating_sub(radius)..=bottom {
            for column in center_x.saturating_sub(radius)..=right {
                let dx = u64::from(column.abs_diff(center_x));
                let dy = u64::from(row.abs_diff(center_y));
                if dx * dx + dy * dy <= radius_squared {
                    self.plot(column, row, color);
                }
            }
        }
    }

    fn display_text(&mut self, x: u32, y: u32, text: &str, alignment: TextAlignment) {
        self.texts.push(TextRun {
            x,
            y,
            text: text.to_owned(),
            alignment,
        });
    }
}
