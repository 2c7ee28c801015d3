//! Level data and catalog module.
//!
//! This module contains the immutable level templates the engine copies boards from, the ordered
//! catalog holding them, and the levels shipped with the game.

use color_eyre::eyre::{bail, Result};

use crate::board::{Board, Cell};

/// Immutable source layout of a level.
///
/// A template is parsed once from level text and never changes afterwards; the engine copies it
/// into a fresh [`Board`] every time the level is (re)started.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelTemplate {
    /// Display name of the level.
    ///
    /// Built-in levels are numbered, levels loaded from disk carry their file stem.
    name: String,
    /// Number of columns of the layout.
    width: usize,
    /// Number of rows of the layout.
    height: usize,
    /// Row-major cells of the layout.
    cells: Vec<Cell>,
}

impl LevelTemplate {
    /// Parses a template from level text, one row per line.
    ///
    /// Rows shorter than the widest one are padded with empty cells and trailing blank lines are
    /// dropped, so editors stripping trailing whitespace do not break a level. Leading spaces are
    /// significant.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - The text holds no rows
    /// - A character is not one of the level symbols
    pub fn parse(name: &str, text: &str) -> Result<Self> {
        let mut rows: Vec<&str> = text.lines().collect();
        while rows.last().is_some_and(|row| row.trim().is_empty()) {
            let _ = rows.pop();
        }

        Self::from_rows(name, &rows)
    }

    /// Builds a template from its rows of level text.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - There are no rows, or every row is empty
    /// - A character is not one of the level symbols
    pub fn from_rows(name: &str, rows: &[&str]) -> Result<Self> {
        let width = rows
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0);
        if width == 0 {
            bail!("level {name} has no rows");
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            for (column, symbol) in row.chars().enumerate() {
                let Some(cell) = Cell::from_symbol(symbol) else {
                    bail!(
                        "level {name} has an unknown symbol {symbol:?} at row {row_index}, column {column}"
                    );
                };
                cells.push(cell);
            }
            cells.resize((row_index + 1) * width, Cell::Empty);
        }

        Ok(Self {
            name: name.to_owned(),
            width,
            height: rows.len(),
            cells,
        })
    }

    /// Checks that the layout is playable.
    ///
    /// A playable layout holds exactly one player, at least one target, and at least as many
    /// stones as targets.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first rule the layout breaks.
    pub fn validate(&self) -> Result<()> {
        let count = |predicate: fn(Cell) -> bool| {
            self.cells.iter().filter(|cell| predicate(**cell)).count()
        };

        let players = count(Cell::is_player);
        let targets = count(Cell::is_target);
        let stones = count(Cell::is_stone);

        if players != 1 {
            bail!("level {} has {players} player cells", self.name);
        }
        if targets == 0 {
            bail!("level {} has no targets", self.name);
        }
        if stones < targets {
            bail!(
                "level {} has {stones} stones for {targets} targets",
                self.name
            );
        }

        Ok(())
    }

    /// Display name of the level.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of columns of the layout.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows of the layout.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Row-major cells of the layout.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copies the layout into a fresh, independently mutable board.
    #[must_use]
    pub fn to_board(&self) -> Board {
        Board::new(self.width, self.height, self.cells.clone())
    }
}

/// Ordered, immutable list of level templates.
#[derive(Clone, Debug)]
pub struct LevelCatalog {
    /// Templates in play order. Never empty.
    templates: Vec<LevelTemplate>,
}

impl LevelCatalog {
    /// Builds a catalog from templates in play order.
    ///
    /// # Errors
    ///
    /// Returns an error if `templates` is empty.
    pub fn new(templates: Vec<LevelTemplate>) -> Result<Self> {
        if templates.is_empty() {
            bail!("the level catalog needs at least one level");
        }

        Ok(Self { templates })
    }

    /// Builds a catalog holding only the built-in levels.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in level fails to parse or validate.
    pub fn builtin() -> Result<Self> {
        Self::new(builtin_templates()?)
    }

    /// Total number of levels.
    #[must_use]
    pub const fn level_count(&self) -> usize {
        self.templates.len()
    }

    /// Returns the template at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`LevelCatalog::level_count`]; callers wrap indices first.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "An out-of-range level index is a programmer error and must abort loudly."
    )]
    pub fn template_at(&self, index: usize) -> &LevelTemplate {
        &self.templates[index]
    }

    /// Iterates over the templates in play order.
    pub fn iter(&self) -> std::slice::Iter<'_, LevelTemplate> {
        self.templates.iter()
    }

    /// Size of the largest board in the catalog, as `(width, height)`.
    #[must_use]
    pub fn max_dimensions(&self) -> (usize, usize) {
        self.templates
            .iter()
            .fold((0, 0), |(width, height), template| {
                (width.max(template.width), height.max(template.height))
            })
    }
}

impl<'catalog> IntoIterator for &'catalog LevelCatalog {
    type Item = &'catalog LevelTemplate;
    type IntoIter = std::slice::Iter<'catalog, LevelTemplate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Parses and validates the levels shipped with the game.
///
/// # Errors
///
/// Returns an error if a built-in level is malformed.
pub fn builtin_templates() -> Result<Vec<LevelTemplate>> {
    BUILTIN_LEVELS
        .iter()
        .enumerate()
        .map(|(index, rows)| {
            let template = LevelTemplate::from_rows(&format!("Level {}", index + 1), rows)?;
            template.validate()?;
            Ok(template)
        })
        .collect()
}

/// Levels shipped with the game, in play order.
const BUILTIN_LEVELS: [&[&str]; 4] = [
    &[
        "*****",
        "*   *",
        "*   *",
        "*   ******",
        "*  xo    *",
        "*       p*",
        "*        *",
        "*  xo    *",
        "*   ******",
        "*   ******",
        "*   ******",
        "**********",
    ],
    &[
        "    ***",
        "    *x*",
        "    * ****",
        "*****o ox*",
        "*x   op***",
        "******o*",
        "     * *",
        "     *x*",
        "     ***",
    ],
    &[
        "*******",
        "* *   *",
        "* poo *",
        "* o   *",
        "* xxx *",
        "*******",
    ],
    &[
        "******",
        "*   x*",
        "*o** **",
        "*   p *",
        "* * o *",
        "*x  ***",
        "*****",
    ],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels_are_valid() {
        let catalog = LevelCatalog::builtin().expect("built-in levels should be valid");

        assert_eq!(catalog.level_count(), 4);
        assert_eq!(catalog.template_at(0).name(), "Level 1");
        assert_eq!(catalog.template_at(3).name(), "Level 4");
        for template in &catalog {
            assert!(template.validate().is_ok(), "{} should validate", template.name());
        }
    }

    #[test]
    fn test_builtin_dimensions() {
        let catalog = LevelCatalog::builtin().expect("built-in levels should be valid");

        assert_eq!(
            (catalog.template_at(0).width(), catalog.template_at(0).height()),
            (10, 12)
        );
        assert_eq!(
            (catalog.template_at(2).width(), catalog.template_at(2).height()),
            (7, 6)
        );
        assert_eq!(catalog.max_dimensions(), (10, 12));
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let template = LevelTemplate::parse("padded", "****\n*p\n*xo*\n****\n\n")
            .expect("level should parse");

        assert_eq!(template.width(), 4);
        assert_eq!(template.height(), 4);
        assert_eq!(
            template.cells().get(4..8),
            Some([Cell::Wall, Cell::Player, Cell::Empty, Cell::Empty].as_slice())
        );
    }

    #[test]
    fn test_parse_keeps_leading_spaces() {
        let template = LevelTemplate::parse("indented", "  ***\n**p**\n*xo *\n*****")
            .expect("level should parse");

        assert_eq!(template.width(), 5);
        assert_eq!(template.cells().first(), Some(&Cell::Empty));
    }

    #[test]
    fn test_parse_rejects_unknown_symbols() {
        let result = LevelTemplate::parse("bad", "*****\n*p#x*\n*****");

        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_empty_text() {
        assert!(LevelTemplate::parse("empty", "").is_err());
        assert!(LevelTemplate::parse("blank", "\n\n").is_err());
    }

    #[test]
    fn test_validate_requires_one_player() {
        let none = LevelTemplate::parse("none", "*****\n* xo*\n*****").expect("should parse");
        let two = LevelTemplate::parse("two", "*****\n*pxo*\n*p  *\n*****").expect("should parse");

        assert!(none.validate().is_err());
        assert!(two.validate().is_err());
    }

    #[test]
    fn test_validate_requires_enough_stones() {
        let no_targets = LevelTemplate::parse("bare", "****\n*po*\n****").expect("should parse");
        let short = LevelTemplate::parse("short", "*****\n*pxx*\n* o *\n*****")
            .expect("should parse");
        let spare = LevelTemplate::parse("spare", "******\n*pxoo*\n******")
            .expect("should parse");

        assert!(no_targets.validate().is_err());
        assert!(short.validate().is_err());
        assert!(spare.validate().is_ok());
    }

    #[test]
    fn test_validate_counts_covered_targets() {
        let enough =
            LevelTemplate::parse("covered", "*****\n*+od*\n*xo *\n*****").expect("should parse");
        let short =
            LevelTemplate::parse("short", "*****\n*+od*\n*x  *\n*****").expect("should parse");

        assert!(
            enough.validate().is_ok(),
            "covered targets need a stone each like open ones"
        );
        assert!(
            short.validate().is_err(),
            "a player on a target still leaves that target needing a stone"
        );
    }

    #[test]
    fn test_to_board_copies_layout() {
        let template = LevelTemplate::parse("copy", "*****\n*pxo*\n*****").expect("should parse");
        let board = template.to_board();

        assert_eq!(board.cells(), template.cells());
        assert_eq!(board.width(), template.width());
        assert_eq!(board.height(), template.height());
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        assert!(LevelCatalog::new(Vec::new()).is_err());
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_template_at_out_of_range_panics() {
        let catalog = LevelCatalog::builtin().expect("built-in levels should be valid");

        let _ = catalog.template_at(catalog.level_count());
    }
}
