//! File loading and validation utilities for level files.

use std::{fs, path::Path};

use color_eyre::eyre::{OptionExt as _, Result};
use tracing::{info, warn};

use crate::level::LevelTemplate;

/// Extension of level files.
pub(crate) const LEVEL_EXTENSION: &str = "sokmap";

/// Scans `dir` for level files and appends the valid ones to `levels`.
///
/// This function reads every file with the `.sokmap` extension in file-name order, parses and
/// validates it, and appends it under its file stem. Invalid files are skipped with a warning so
/// one broken level does not lock the player out of the others.
///
/// # Errors
///
/// This function may return errors if the directory or one of its entries cannot be read.
pub(crate) fn fetch_files(dir: &Path, levels: &mut Vec<LevelTemplate>) -> Result<()> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_dir()
            && path
                .extension()
                .is_some_and(|extension| extension == LEVEL_EXTENSION)
        {
            paths.push(path);
        }
    }
    paths.sort();

    for path in paths {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_eyre("failed to convert level file name to a string slice")?
            .to_owned();
        let contents = fs::read_to_string(&path)?;

        match parse_file_contents(&name, &contents) {
            Ok(template) => {
                info!(name, path = %path.display(), "level file loaded");
                levels.push(template);
            }
            Err(err) => warn!(path = %path.display(), %err, "skipping invalid level file"),
        }
    }

    Ok(())
}

/// Parses and validates the contents of a level file.
///
/// # Errors
///
/// Returns an error if the text is not a level or the level is not playable.
pub(crate) fn parse_file_contents(name: &str, input: &str) -> Result<LevelTemplate> {
    let template = LevelTemplate::parse(name, input)?;
    template.validate()?;

    Ok(template)
}

#[cfg(test)]
mod tests {
    use std::{env, process};

    use super::*;

    /// Creates an empty scratch directory unique to the calling test.
    fn scratch_dir(test: &str) -> std::path::PathBuf {
        let dir = env::temp_dir().join(format!("sokoterm-{test}-{}", process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("failed to create scratch directory");
        dir
    }

    #[test]
    fn test_parse_file_contents_valid_level() {
        let template = parse_file_contents("valid", "*****\n*pxo*\n*****")
            .expect("level should be accepted");

        assert_eq!(template.name(), "valid");
        assert_eq!(template.width(), 5);
    }

    #[test]
    fn test_parse_file_contents_windows_line_endings() {
        let template = parse_file_contents("crlf", "*****\r\n*pxo*\r\n*****\r\n")
            .expect("level should be accepted");

        assert_eq!(template.height(), 3);
        assert_eq!(template.width(), 5);
    }

    #[test]
    fn test_parse_file_contents_invalid_characters() {
        assert!(parse_file_contents("bad", "*****\n*p#xo*\n*****").is_err());
    }

    #[test]
    fn test_parse_file_contents_no_player() {
        assert!(parse_file_contents("lonely", "*****\n* xo*\n*****").is_err());
    }

    #[test]
    fn test_parse_file_contents_missing_stones() {
        assert!(parse_file_contents("stoneless", "*****\n*pxx*\n*****").is_err());
    }

    #[test]
    fn test_parse_file_contents_empty_input() {
        assert!(parse_file_contents("empty", "").is_err());
    }

    #[test]
    fn test_fetch_files_loads_valid_levels_in_order() {
        let dir = scratch_dir("fetch-order");
        fs::write(dir.join("b-second.sokmap"), "*****\n*pxo*\n*****").expect("write level");
        fs::write(dir.join("a-first.sokmap"), "******\n*p xo*\n******").expect("write level");
        fs::write(dir.join("broken.sokmap"), "*****\n* xo*\n*****").expect("write level");
        fs::write(dir.join("notes.txt"), "*****\n*pxo*\n*****").expect("write notes");
        fs::create_dir(dir.join("nested.sokmap")).expect("create nested directory");

        let mut levels = Vec::new();
        fetch_files(&dir, &mut levels).expect("directory should be readable");

        let names: Vec<&str> = levels.iter().map(LevelTemplate::name).collect();
        assert_eq!(names, vec!["a-first", "b-second"]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_fetch_files_missing_directory() {
        let dir = env::temp_dir().join(format!("sokoterm-missing-{}", process::id()));
        let mut levels = Vec::new();

        assert!(fetch_files(&dir, &mut levels).is_err());
        assert!(levels.is_empty());
    }
}
