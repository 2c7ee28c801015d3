//! Core application state and logic for the Sokoban game.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;
use tracing::debug;

use crate::{
    config::Config,
    engine::{Engine, MoveOutcome},
    events,
    file_loader,
    framebuffer::PixelFramebuffer,
    level::{builtin_templates, LevelCatalog},
    render::Painter,
    types::Input,
    ui,
};

/// Application state container for the Sokoban game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to. The game rules live in
/// the [`Engine`]; the application adds the pause between solving a level and its splash screen.
#[derive(Debug)]
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Game engine drawing onto the in-memory framebuffer shown by the UI.
    pub(crate) engine: Engine<PixelFramebuffer>,
    /// Time the solved board stays on screen before the splash screen.
    pause: Duration,
    /// Moment the pending splash screen is due, if a level was just solved.
    pause_deadline: Option<Instant>,
}

impl App {
    /// Creates the application and loads the starting level.
    ///
    /// The catalog holds the built-in levels, unless disabled, followed by the valid level files
    /// found in the configured directory. The framebuffer is sized to fit the largest of them.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - The levels directory cannot be read
    /// - No level is left to play
    /// - The framebuffer dimensions do not fit in memory
    pub fn new(config: &Config) -> Result<Self> {
        let mut templates = if config.no_builtin {
            Vec::new()
        } else {
            builtin_templates()?
        };
        if let Some(dir) = &config.levels_dir {
            file_loader::fetch_files(dir, &mut templates)?;
        }
        let catalog = LevelCatalog::new(templates)?;

        let (columns, rows) = catalog.max_dimensions();
        let width = u32::try_from(columns)?.saturating_mul(config.cell_size);
        let height = u32::try_from(rows)?.saturating_mul(config.cell_size);
        let framebuffer = PixelFramebuffer::new(width, height)?;

        let start = config.level % catalog.level_count();
        let mut engine = Engine::new(catalog, Painter::new(config.cell_size), framebuffer);
        engine.initialize_level(start);

        Ok(Self {
            exit: false,
            engine,
            pause: Duration::from_millis(config.pause_ms),
            pause_deadline: None,
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal
                .try_draw(|frame| ui::draw(self, frame).map_err(std::io::Error::other))?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Applies one player input to the game.
    ///
    /// A solving move starts the pause before the splash screen.
    pub(crate) fn apply(&mut self, input: Input, now: Instant) {
        match input {
            Input::Move(direction) => {
                if self.engine.attempt_move(direction) == MoveOutcome::Solved {
                    self.pause_deadline = Some(now + self.pause);
                }
            }
            Input::Advance => {
                let _ = self.engine.advance();
            }
        }
    }

    /// Shows the pending splash screen once its pause is over.
    pub(crate) fn tick(&mut self, now: Instant) {
        if self.pause_deadline.is_some_and(|deadline| now >= deadline) {
            debug!("level-clear pause elapsed");
            self.pause_deadline = None;
            self.engine.show_splash();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        board::Position,
        render::Framebuffer as _,
        types::{Direction, Status},
    };

    /// Creates an app over the built-in levels with no pause.
    fn create_test_app() -> App {
        let config = Config {
            pause_ms: 0,
            ..Config::default()
        };
        App::new(&config).expect("built-in levels should load")
    }

    #[test]
    fn test_new_starts_the_first_level() {
        let app = create_test_app();

        assert!(!app.exit);
        assert_eq!(app.engine.level_index(), 0);
        assert_eq!(app.engine.status(), Status::Playing);
        assert_eq!(app.engine.framebuffer().width(), 40);
        assert_eq!(app.engine.framebuffer().height(), 48);
    }

    #[test]
    fn test_new_wraps_the_starting_level() {
        let config = Config {
            level: 6,
            ..Config::default()
        };
        let app = App::new(&config).expect("built-in levels should load");

        assert_eq!(app.engine.level_index(), 2);
    }

    #[test]
    fn test_new_without_any_level_fails() {
        let dir = std::env::temp_dir().join(format!("sokoterm-no-levels-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("failed to create scratch directory");
        let config = Config {
            levels_dir: Some(dir.clone()),
            no_builtin: true,
            ..Config::default()
        };

        assert!(App::new(&config).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_apply_move_walks_the_player() {
        let mut app = create_test_app();
        let before = app.engine.player();

        app.apply(Input::Move(Direction::Left), Instant::now());

        assert_ne!(app.engine.player(), before);
        assert!(app.pause_deadline.is_none());
    }

    #[test]
    fn test_splash_waits_for_the_pause() {
        let dir = std::env::temp_dir().join(format!("sokoterm-pause-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("failed to create scratch directory");
        std::fs::write(dir.join("push.sokmap"), "*****\n*pox*\n*****").expect("write level");
        std::fs::write(dir.join("second.sokmap"), "*****\n*pox*\n*****").expect("write level");
        let config = Config {
            levels_dir: Some(dir.clone()),
            no_builtin: true,
            pause_ms: 800,
            ..Config::default()
        };
        let mut app = App::new(&config).expect("level files should load");
        let start = Instant::now();

        app.apply(Input::Move(Direction::Right), start);
        assert_eq!(app.engine.status(), Status::LevelClear);
        assert!(app.engine.is_splash_pending());

        app.tick(start + Duration::from_millis(799));
        app.apply(Input::Advance, start + Duration::from_millis(799));
        assert!(app.engine.is_splash_pending(), "advancing is dropped during the pause");
        assert_eq!(app.engine.status(), Status::LevelClear);

        app.tick(start + Duration::from_millis(800));
        assert!(!app.engine.is_splash_pending());

        app.apply(Input::Advance, start + Duration::from_millis(900));
        assert_eq!(app.engine.status(), Status::Playing);
        assert_eq!(app.engine.level_index(), 1);
        assert_eq!(app.engine.player(), Some(Position::new(1, 1)));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
