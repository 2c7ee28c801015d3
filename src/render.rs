//! Board and splash-screen painting on top of a framebuffer.
//!
//! This module holds the drawing contract the engine renders through, the fixed palette of the
//! game, and the table mapping each cell kind to the ordered strokes that paint it.

use ratatui::style::Color;

use crate::board::{Board, Cell};

/// Color the board is cleared to before painting cells.
pub(crate) const BACKGROUND_COLOR: Color = Color::Rgb(165, 42, 42);
/// Color of wall squares.
pub(crate) const WALL_COLOR: Color = Color::Rgb(64, 64, 64);
/// Color of the player disc.
pub(crate) const PLAYER_COLOR: Color = Color::Rgb(255, 0, 0);
/// Color of a stone disc away from any target.
pub(crate) const STONE_COLOR: Color = Color::Rgb(0, 0, 255);
/// Color of a stone disc resting on a target.
pub(crate) const DONE_COLOR: Color = Color::Rgb(0, 128, 0);
/// Color of target squares.
pub(crate) const TARGET_COLOR: Color = Color::Rgb(128, 0, 128);
/// Color both layers are cleared to behind splash-screen text.
pub(crate) const SPLASH_COLOR: Color = Color::Rgb(255, 255, 255);

/// One of the two stacked framebuffer layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    /// Bottom layer, visible wherever the foreground holds nothing.
    Background,
    /// Top layer every fill and text operation draws on.
    Foreground,
}

/// Horizontal anchoring of a line of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlignment {
    /// `x` is the offset from the left edge.
    Left,
    /// The line is centered, shifted right by `x`.
    Center,
    /// `x` is the offset from the right edge.
    Right,
}

/// Pixel drawing surface the game renders to.
///
/// Coordinates are pixels from the top-left corner. Shapes reaching past the surface are clipped
/// by the implementation.
pub trait Framebuffer {
    /// Width of the surface in pixels.
    fn width(&self) -> u32;

    /// Height of the surface in pixels.
    fn height(&self) -> u32;

    /// Fills a whole layer with `color`.
    fn clear(&mut self, layer: Layer, color: Color);

    /// Fills the rectangle with top-left corner `(x, y)` on the foreground layer.
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Color);

    /// Fills the disc centered on `(center_x, center_y)` on the foreground layer.
    fn fill_circle(&mut self, center_x: u32, center_y: u32, radius: u32, color: Color);

    /// Writes a line of text whose top edge sits on pixel row `y`.
    fn display_text(&mut self, x: u32, y: u32, text: &str, alignment: TextAlignment);
}

/// Shape of a single stroke within a board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Shape {
    /// The whole cell.
    Square,
    /// A disc centered in the cell, shrunk by `inset` sixteenths of the cell size.
    Disc {
        /// Distance between the disc and the cell border, in sixteenths of a cell.
        inset: u32,
    },
}

/// A colored shape painted for a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Stroke {
    /// What to paint.
    pub(crate) shape: Shape,
    /// Which color to paint it in.
    pub(crate) color: Color,
}

/// Square covering a target cell.
const TARGET_SQUARE: Stroke = Stroke {
    shape: Shape::Square,
    color: TARGET_COLOR,
};
/// Disc marking the player.
const PLAYER_DISC: Stroke = Stroke {
    shape: Shape::Disc { inset: 1 },
    color: PLAYER_COLOR,
};

/// Returns the strokes painting `cell`, bottom to top.
///
/// Composite cells paint the target square first and their occupant over it.
pub(crate) const fn strokes(cell: Cell) -> &'static [Stroke] {
    match cell {
        Cell::Empty => &[],
        Cell::Wall => &[Stroke {
            shape: Shape::Square,
            color: WALL_COLOR,
        }],
        Cell::Target => &[TARGET_SQUARE],
        Cell::Player => &[PLAYER_DISC],
        Cell::PlayerOnTarget => &[TARGET_SQUARE, PLAYER_DISC],
        Cell::Stone => &[Stroke {
            shape: Shape::Disc { inset: 3 },
            color: STONE_COLOR,
        }],
        Cell::StoneOnTarget => &[
            TARGET_SQUARE,
            Stroke {
                shape: Shape::Disc { inset: 3 },
                color: DONE_COLOR,
            },
        ],
    }
}

/// Paints boards and splash screens at a fixed cell size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Painter {
    /// Edge length of one board cell in pixels.
    cell_size: u32,
}

impl Painter {
    /// Creates a painter drawing cells of `cell_size` pixels.
    #[must_use]
    pub const fn new(cell_size: u32) -> Self {
        Self { cell_size }
    }

    /// Redraws the whole board, visiting every cell once.
    pub fn draw_board<F: Framebuffer>(self, framebuffer: &mut F, board: &Board) {
        framebuffer.clear(Layer::Background, BACKGROUND_COLOR);
        framebuffer.clear(Layer::Foreground, BACKGROUND_COLOR);

        let half = self.cell_size / 2;
        for (position, cell) in board.positions() {
            let x = to_pixels(position.column, self.cell_size);
            let y = to_pixels(position.row, self.cell_size);

            for stroke in strokes(cell) {
                match stroke.shape {
                    Shape::Square => {
                        framebuffer.fill_rect(x, y, self.cell_size, self.cell_size, stroke.color);
                    }
                    Shape::Disc { inset } => {
                        let inset = (self.cell_size.saturating_mul(inset) / 16).max(1);
                        framebuffer.fill_circle(
                            x.saturating_add(half),
                            y.saturating_add(half),
                            half.saturating_sub(inset),
                            stroke.color,
                        );
                    }
                }
            }
        }
    }

    /// Shows the screen offered between two levels.
    pub fn level_finished<F: Framebuffer>(framebuffer: &mut F) {
        Self::splash(framebuffer, "Level finished", "Space to continue!");
    }

    /// Shows the screen offered once the last level is solved.
    pub fn game_finished<F: Framebuffer>(framebuffer: &mut F) {
        Self::splash(framebuffer, "Game finished", "Space to restart game!");
    }

    /// Clears both layers and writes two centered lines at one and two thirds of the height.
    fn splash<F: Framebuffer>(framebuffer: &mut F, title: &str, hint: &str) {
        framebuffer.clear(Layer::Background, SPLASH_COLOR);
        framebuffer.clear(Layer::Foreground, SPLASH_COLOR);

        let height = framebuffer.height();
        framebuffer.display_text(0, height / 3, title, TextAlignment::Center);
        framebuffer.display_text(0, height / 3 * 2, hint, TextAlignment::Center);
    }
}

/// Converts a board coordinate to the pixel coordinate of the cell's top-left corner.
fn to_pixels(coordinate: usize, cell_size: u32) -> u32 {
    u32::try_from(coordinate)
        .unwrap_or(u32::MAX)
        .saturating_mul(cell_size)
}
