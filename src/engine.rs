//! Game engine enforcing the push rules and the level progression.
//!
//! The engine owns the live board of the level in play and the framebuffer it renders to. Every
//! accepted mutation ends with exactly one full redraw; rejected moves leave both the board and
//! the screen untouched.

use tracing::{debug, info, instrument};

use crate::{
    board::{Board, Cell, Position},
    level::LevelCatalog,
    render::{Framebuffer, Painter},
    types::{Direction, Status},
};

/// Result of a single [`Engine::attempt_move`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No level is active; nothing happened.
    Inactive,
    /// The move hit a wall, the board edge, or a stone that could not be pushed.
    Blocked,
    /// The player stepped onto a free cell.
    Walked,
    /// The player pushed a stone one cell and followed it.
    Pushed,
    /// The move covered the last target and ended the level.
    Solved,
}

/// Sokoban engine for one game session.
///
/// The engine copies level templates from its catalog, applies moves to the copy and walks the
/// `Playing -> LevelClear | GameClear -> Playing` progression. The pause between solving a level
/// and showing its splash screen is left to the caller: a solved move leaves a splash pending
/// until [`Engine::show_splash`] is called, and advancing is refused until then.
#[derive(Debug)]
pub struct Engine<F> {
    /// Levels in play order.
    catalog: LevelCatalog,
    /// Index of the level in play, or of the level the next advance starts.
    level_index: usize,
    /// Live copy of the level in play. `None` before the first level and after a clear.
    board: Option<Board>,
    /// Position of the player on `board`.
    player: Position,
    /// Number of target cells of the level in play.
    target_count: usize,
    /// Whether moves are accepted.
    active: bool,
    /// Progression state.
    status: Status,
    /// Whether a splash screen is waiting to be shown after a clear.
    splash_pending: bool,
    /// Board and splash-screen painter.
    painter: Painter,
    /// Surface every draw request goes to.
    framebuffer: F,
}

impl<F: Framebuffer> Engine<F> {
    /// Creates an engine with no level loaded yet.
    ///
    /// Call [`Engine::initialize_level`] or [`Engine::advance`] to start playing.
    pub const fn new(catalog: LevelCatalog, painter: Painter, framebuffer: F) -> Self {
        Self {
            catalog,
            level_index: 0,
            board: None,
            player: Position::new(0, 0),
            target_count: 0,
            active: false,
            status: Status::Playing,
            splash_pending: false,
            painter,
            framebuffer,
        }
    }

    /// Loads the level at `index` and redraws the board.
    ///
    /// Any previous board is replaced, so this doubles as a level reset.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range, or if the template is malformed (no player or several,
    /// no targets, fewer stones than targets). Both are authoring bugs, not runtime conditions.
    #[instrument(skip(self))]
    pub fn initialize_level(&mut self, index: usize) {
        let template = self.catalog.template_at(index);
        if let Err(err) = template.validate() {
            panic!("malformed level template at index {index}: {err}");
        }

        let board = template.to_board();
        let Some(player) = board.find_player() else {
            unreachable!("a validated level holds a player cell");
        };
        let target_count = board.count_where(Cell::is_target);

        info!(
            level = index + 1,
            total = self.catalog.level_count(),
            name = template.name(),
            targets = target_count,
            "level loaded"
        );

        self.painter.draw_board(&mut self.framebuffer, &board);
        self.level_index = index;
        self.board = Some(board);
        self.player = player;
        self.target_count = target_count;
        self.active = true;
        self.status = Status::Playing;
        self.splash_pending = false;
    }

    /// Tries to move the player one cell, pushing a stone in the way.
    ///
    /// Moves off the board, into walls, or pushing a stone into a wall, the board edge or another
    /// stone are rejected without any change. An accepted move redraws the board once and then
    /// checks whether the level is solved.
    pub fn attempt_move(&mut self, direction: Direction) -> MoveOutcome {
        if !self.active {
            return MoveOutcome::Inactive;
        }
        let Some(board) = self.board.as_mut() else {
            return MoveOutcome::Inactive;
        };

        if !board.get(self.player).is_some_and(Cell::is_player) {
            debug!(player = ?self.player, "recorded player position holds no player");
            return MoveOutcome::Blocked;
        }

        let Some(destination) = board.neighbor(self.player, direction) else {
            debug!(?direction, "move blocked by the board edge");
            return MoveOutcome::Blocked;
        };
        let Some(cell) = board.get(destination) else {
            return MoveOutcome::Blocked;
        };

        let pushed = if cell.is_stone() {
            let Some(stone_destination) = board.neighbor(destination, direction) else {
                debug!(?direction, "push blocked by the board edge");
                return MoveOutcome::Blocked;
            };
            if !board.get(stone_destination).is_some_and(Cell::is_free) {
                debug!(?direction, "push blocked");
                return MoveOutcome::Blocked;
            }

            let moved = board.relocate(destination, stone_destination);
            debug_assert!(moved, "a stone always moves onto a free cell");
            true
        } else if cell.is_free() {
            false
        } else {
            debug!(?direction, ?cell, "move blocked");
            return MoveOutcome::Blocked;
        };

        let moved = board.relocate(self.player, destination);
        debug_assert!(moved, "the player always moves onto a free cell");
        self.player = destination;
        debug!(?direction, pushed, "move accepted");
        self.painter.draw_board(&mut self.framebuffer, board);

        if self.check_level_end() {
            MoveOutcome::Solved
        } else if pushed {
            MoveOutcome::Pushed
        } else {
            MoveOutcome::Walked
        }
    }

    /// Leaves `Playing` when every target is covered by a stone.
    ///
    /// On a clear the board is discarded, moves are disabled, and the level index moves on,
    /// wrapping to the first level (and to [`Status::GameClear`]) past the last one.
    fn check_level_end(&mut self) -> bool {
        let covered = self
            .board
            .as_ref()
            .map_or(0, |board| board.count_where(|cell| cell == Cell::StoneOnTarget));
        if covered != self.target_count {
            return false;
        }

        let solved = self.level_index;
        self.active = false;
        self.board = None;
        self.splash_pending = true;
        self.level_index = (solved + 1) % self.catalog.level_count();
        self.status = if self.level_index == 0 {
            Status::GameClear
        } else {
            Status::LevelClear
        };

        info!(level = solved + 1, status = ?self.status, "level solved");

        true
    }

    /// Paints the splash screen of a clear once the caller's pause is over.
    ///
    /// Does nothing when no splash is pending.
    pub fn show_splash(&mut self) {
        if !self.splash_pending {
            return;
        }

        match self.status {
            Status::LevelClear => Painter::level_finished(&mut self.framebuffer),
            Status::GameClear => Painter::game_finished(&mut self.framebuffer),
            Status::Playing => {}
        }
        self.splash_pending = false;
    }

    /// Starts the level at the current index.
    ///
    /// After a clear this is the next level (or the first one after the last); while playing it
    /// restarts the current level. Returns `false` and does nothing while a splash is pending,
    /// so an advance during the post-clear pause is dropped.
    pub fn advance(&mut self) -> bool {
        if self.splash_pending {
            debug!("advance dropped during the level-clear pause");
            return false;
        }

        self.initialize_level(self.level_index);
        true
    }

    /// Progression state.
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Index of the level in play, or of the one the next advance starts.
    pub const fn level_index(&self) -> usize {
        self.level_index
    }

    /// Number of levels in the catalog.
    pub fn level_count(&self) -> usize {
        self.catalog.level_count()
    }

    /// Name of the level at the current index.
    pub fn level_name(&self) -> &str {
        self.catalog.template_at(self.level_index).name()
    }

    /// Live board, if a level is in play.
    pub const fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Position of the player, if a level is in play.
    pub fn player(&self) -> Option<Position> {
        self.board.as_ref().map(|_| self.player)
    }

    /// Number of target cells of the level in play.
    pub const fn target_count(&self) -> usize {
        self.target_count
    }

    /// Whether moves are accepted.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Whether a clear is waiting for its splash screen.
    pub const fn is_splash_pending(&self) -> bool {
        self.splash_pending
    }

    /// Surface the engine draws on.
    pub const fn framebuffer(&self) -> &F {
        &self.framebuffer
    }
}
