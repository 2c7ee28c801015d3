//! This crate contains the library for the terminal Sokoban game sokoterm.
//!
//! The game rules live in [`Engine`], which applies moves to a live copy of a [`LevelTemplate`]
//! and renders every change onto a [`Framebuffer`]. The binary shows a [`PixelFramebuffer`] in the
//! terminal through [`App`].

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
mod board;
mod config;
mod engine;
mod events;
mod file_loader;
mod framebuffer;
mod level;
mod logging;
mod render;
mod types;
mod ui;

pub use app::App;
pub use board::{transition, Board, Cell, Position};
pub use config::Config;
pub use engine::{Engine, MoveOutcome};
pub use framebuffer::PixelFramebuffer;
pub use level::{builtin_templates, LevelCatalog, LevelTemplate};
pub use logging::init_logging;
pub use render::{Framebuffer, Layer, Painter, TextAlignment};
pub use types::{Direction, Input, Status};
