//! User interface rendering of the framebuffer and the status bar.

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::half_block,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
    Frame,
};

use crate::{
    framebuffer::{PixelFramebuffer, TextRun},
    render::{Framebuffer as _, TextAlignment},
    types::Status,
    App,
};

/// Updates the application UI based on the persistent state.
///
/// This function renders the engine framebuffer centered on the screen, with a status bar below
/// it naming the level in play and the keys available in the current state.
///
/// # Errors
///
/// This function may return errors from layout lookups or data conversion failures.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    frame.render_widget(Clear, frame.area());

    let framebuffer = app.engine.framebuffer();
    // Oversized framebuffers are clipped by the layout.
    let columns = u16::try_from(framebuffer.width()).unwrap_or(u16::MAX);
    let rows = u16::try_from(framebuffer.height().div_ceil(2)).unwrap_or(u16::MAX);

    let overall_layout = Layout::vertical([
        Constraint::Min(1),    // Board area
        Constraint::Length(3), // Tooltip block
    ])
    .split(frame.area());
    let content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get board content area from layout")?;
    let tooltip_full_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let board_area = centered(content_area, columns, rows)?;
    frame.render_widget(FramebufferView { framebuffer }, board_area);

    let (title, help) = status_bar(app);
    let tooltip_width = columns.max(u16::try_from(help.len())?.saturating_add(2));
    let tooltip_area = centered(tooltip_full_area, tooltip_width, tooltip_full_area.height)?;

    // Render tooltip as a block at the bottom center with top border
    let tooltip_block = Block::bordered()
        .title(title)
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    let tooltip = Paragraph::new(help)
        .alignment(Alignment::Center)
        .block(tooltip_block);

    frame.render_widget(tooltip, tooltip_area);

    Ok(())
}

/// Returns a `width x height` rectangle centered in `area`, shrunk to fit when needed.
///
/// # Errors
///
/// This function may return errors if the layout does not produce the centered area.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Result<Rect> {
    let row = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area)
        .first()
        .copied()
        .ok_or_eyre("failed to get centered row from vertical layout")?;

    Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(row)
        .first()
        .copied()
        .ok_or_eyre("failed to get centered area from horizontal layout")
}

/// Builds the status bar title and key help for the current game state.
fn status_bar(app: &App) -> (String, &'static str) {
    let engine = &app.engine;

    match engine.status() {
        Status::Playing => (
            format!(
                "Level {}/{}: {}",
                engine.level_index() + 1,
                engine.level_count(),
                engine.level_name()
            ),
            "(arrows/hjkl) move (space) restart (q) quit",
        ),
        Status::LevelClear => (
            "Level solved".to_owned(),
            "(space) next level (q) quit",
        ),
        Status::GameClear => (
            "All levels solved".to_owned(),
            "(space) restart game (q) quit",
        ),
    }
}

/// Widget showing a pixel framebuffer with two pixel rows per terminal row.
///
/// Each terminal cell draws an upper half block whose foreground is the even pixel row and whose
/// background is the odd one below it. Text runs are laid over the pixels in black on white.
#[derive(Debug)]
struct FramebufferView<'fb> {
    /// Framebuffer to show.
    framebuffer: &'fb PixelFramebuffer,
}

impl Widget for FramebufferView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            let top_row = u32::from(row) * 2;
            for column in 0..area.width {
                let x = u32::from(column);
                let top = self.framebuffer.pixel(x, top_row).unwrap_or(Color::Reset);
                let bottom = self
                    .framebuffer
                    .pixel(x, top_row + 1)
                    .unwrap_or(Color::Reset);

                if let Some(cell) =
                    buf.cell_mut((area.x.saturating_add(column), area.y.saturating_add(row)))
                {
                    let _ = cell
                        .set_char(half_block::UPPER)
                        .set_fg(top)
                        .set_bg(bottom);
                }
            }
        }

        let text_style = Style::default().fg(Color::Black).bg(Color::White);
        for run in self.framebuffer.texts() {
            let Ok(row) = u16::try_from(run.y / 2) else {
                continue;
            };
            if row >= area.height {
                continue;
            }

            let column = text_column(run, area.width);
            let _ = buf.set_stringn(
                area.x.saturating_add(column),
                area.y.saturating_add(row),
                &run.text,
                usize::from(area.width.saturating_sub(column)),
                text_style,
            );
        }
    }
}

/// Returns the first terminal column of a text run inside an area `width` columns wide.
///
/// Text running past either edge is clipped by the caller; the column itself is clamped to the
/// area.
fn text_column(run: &TextRun, width: u16) -> u16 {
    let width = i32::from(width);
    let length = i32::try_from(run.text.chars().count()).unwrap_or(i32::MAX);
    let offset = i32::try_from(run.x).unwrap_or(i32::MAX);

    let column = match run.alignment {
        TextAlignment::Left => offset,
        TextAlignment::Center => {
            rounded_div::i32(width.saturating_sub(length), 2).saturating_add(offset)
        }
        TextAlignment::Right => width.saturating_sub(length).saturating_sub(offset),
    };

    u16::try_from(column.clamp(0, width)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::{
        config::Config,
        engine::Engine,
        level::{LevelCatalog, LevelTemplate},
        render::Painter,
        types::Direction,
    };

    /// Creates an app over the built-in levels.
    fn create_test_app() -> App {
        App::new(&Config::default()).expect("built-in levels should load")
    }

    /// Creates a test terminal with known dimensions for UI testing.
    fn create_test_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 24);
        Terminal::new(backend).expect("failed to create test terminal")
    }

    /// Replaces the engine of `app` with one over two levels, each solved by one push right.
    fn install_one_push_level(app: &mut App) {
        let template =
            LevelTemplate::parse("one push", "*****\n*pox*\n*****").expect("level should parse");
        let catalog = LevelCatalog::new(vec![template.clone(), template])
            .expect("catalog should not be empty");
        let framebuffer = PixelFramebuffer::new(20, 12).expect("framebuffer should allocate");
        app.engine = Engine::new(catalog, Painter::new(4), framebuffer);
        app.engine.initialize_level(0);
    }

    /// Concatenates every symbol of the terminal buffer, row after row.
    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    /// Draws `app` once and asserts the draw succeeded.
    fn draw_once(app: &mut App, terminal: &mut Terminal<TestBackend>) {
        let result = terminal.draw(|frame| {
            draw(app, frame).expect("drawing should succeed in test");
        });
        assert!(result.is_ok());
    }

    #[test]
    fn test_draw_playing_level() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();

        draw_once(&mut app, &mut terminal);

        let text = screen_text(&terminal);
        assert!(text.contains("Level 1/4: Level 1"));
        assert!(text.contains("(space) restart"));
        assert!(text.contains(half_block::UPPER));
    }

    #[test]
    fn test_draw_board_pixels_as_half_blocks() {
        let mut app = create_test_app();
        install_one_push_level(&mut app);
        let mut terminal = create_test_terminal();

        draw_once(&mut app, &mut terminal);

        let buffer = terminal.backend().buffer();
        let upper = half_block::UPPER.to_string();
        let wall = crate::render::WALL_COLOR;
        let painted = buffer
            .content()
            .iter()
            .filter(|cell| cell.symbol() == upper && cell.fg == wall)
            .count();
        assert!(painted > 0, "wall pixels should be shown");
    }

    #[test]
    fn test_draw_level_finished_splash() {
        let mut app = create_test_app();
        install_one_push_level(&mut app);
        let mut terminal = create_test_terminal();

        let _ = app.engine.attempt_move(Direction::Right);
        app.engine.show_splash();
        draw_once(&mut app, &mut terminal);

        let text = screen_text(&terminal);
        assert!(text.contains("Level finished"));
        assert!(text.contains("Space to continue!"));
        assert!(text.contains("Level solved"));
    }

    #[test]
    fn test_draw_on_a_tiny_terminal() {
        let mut app = create_test_app();
        let mut terminal =
            Terminal::new(TestBackend::new(10, 5)).expect("failed to create test terminal");

        draw_once(&mut app, &mut terminal);
    }

    #[test]
    fn test_draw_framebuffer_wider_than_a_terminal_axis() {
        let mut app = create_test_app();
        let template =
            LevelTemplate::parse("wide", "*****\n*pox*\n*****").expect("level should parse");
        let catalog = LevelCatalog::new(vec![template]).expect("catalog should not be empty");
        let framebuffer = PixelFramebuffer::new(70_000, 2).expect("framebuffer should allocate");
        app.engine = Engine::new(catalog, Painter::new(4), framebuffer);
        app.engine.initialize_level(0);
        let mut terminal = create_test_terminal();

        draw_once(&mut app, &mut terminal);

        assert!(screen_text(&terminal).contains("Level 1/1: wide"));
    }

    #[test]
    fn test_text_column_alignments() {
        let run = |alignment| TextRun {
            x: 1,
            y: 0,
            text: "abcd".to_owned(),
            alignment,
        };

        assert_eq!(text_column(&run(TextAlignment::Left), 20), 1);
        assert_eq!(text_column(&run(TextAlignment::Center), 20), 9);
        assert_eq!(text_column(&run(TextAlignment::Right), 20), 15);
    }

    #[test]
    fn test_text_column_is_clamped() {
        let run = TextRun {
            x: 0,
            y: 0,
            text: "a line longer than the area".to_owned(),
            alignment: TextAlignment::Right,
        };

        assert_eq!(text_column(&run, 10), 0);
    }

    #[test]
    fn test_centered_shrinks_to_fit() {
        let area = Rect::new(0, 0, 10, 4);
        let inner = centered(area, 20, 8).expect("layout should succeed");

        assert!(inner.width <= 10);
        assert!(inner.height <= 4);
    }
}
