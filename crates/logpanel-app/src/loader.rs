//! Log file loading and saving
//!
//! Reads a whole log file into [`LogLine`]s and writes a set of lines back out.
//! Reads are all-or-nothing: any failure aborts the load with
//! [`Error::FileRead`] instead of producing partial output.

use std::io::Write;
use std::path::{Path, PathBuf};

use logpanel_core::prelude::*;
use logpanel_core::LogLine;

/// Load lines from an optional source
///
/// An absent source is not an error; it yields no lines and leaves prompting
/// for a file to the caller.
pub fn load_source(path: Option<&Path>) -> Result<Vec<LogLine>> {
    match path {
        Some(path) => load_lines(path),
        None => {
            debug!("No log file selected, nothing to load");
            Ok(Vec::new())
        }
    }
}

/// Read a log file and parse it into lines
pub fn load_lines(path: &Path) -> Result<Vec<LogLine>> {
    let bytes = std::fs::read(path).map_err(|e| Error::file_read(path, e))?;
    let content = String::from_utf8(bytes).map_err(|e| Error::file_read(path, e))?;

    let lines = parse_lines(&content);
    info!("Loaded {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

/// Split file content into lines
///
/// Splits on `\n` and drops the single empty segment produced by a trailing
/// terminator. Interior empty lines are kept.
pub fn parse_lines(content: &str) -> Vec<LogLine> {
    let mut segments: Vec<&str> = content.split('\n').collect();
    if segments.last() == Some(&"") {
        segments.pop();
    }
    segments.into_iter().map(LogLine::new).collect()
}

/// Join line texts with `\n`
pub fn join_lines(lines: &[LogLine]) -> String {
    lines
        .iter()
        .map(|line| line.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write lines to `path`, replacing any existing file
///
/// Uses atomic write (temp file + rename) so a failed save never leaves a
/// truncated file behind.
pub fn save_lines(path: &Path, lines: &[LogLine]) -> Result<()> {
    let content = join_lines(lines);
    let temp_path = temp_path_for(path);

    let write_temp = || -> std::io::Result<()> {
        let mut file = std::fs::File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()
    };

    if let Err(e) = write_temp() {
        let _ = std::fs::remove_file(&temp_path);
        return Err(Error::file_write(path, e));
    }

    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(Error::file_write(path, e));
    }

    info!("Saved {} lines to {}", lines.len(), path.display());
    Ok(())
}

/// Temp file next to the target so the final rename stays on one filesystem
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "log".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use logpanel_core::LineColor;
    use tempfile::tempdir;

    fn texts(lines: &[LogLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_load_source_none_is_empty() {
        let lines = load_source(None).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_parse_drops_single_trailing_terminator() {
        let lines = parse_lines("a\nb\n");
        assert_eq!(texts(&lines), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_without_trailing_terminator() {
        let lines = parse_lines("a\nb");
        assert_eq!(texts(&lines), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_keeps_interior_and_extra_empty_lines() {
        let lines = parse_lines("a\n\nb\n\n");
        assert_eq!(texts(&lines), vec!["a", "", "b", ""]);
    }

    #[test]
    fn test_parse_empty_content() {
        assert!(parse_lines("").is_empty());
        assert_eq!(texts(&parse_lines("\n")), vec![""]);
    }

    #[test]
    fn test_parse_assigns_colors() {
        let lines = parse_lines("2024-01-01 [Info] start\n2024-01-01 [Error] boom\nplain\n");
        let colors: Vec<_> = lines.iter().map(|l| l.color).collect();
        assert_eq!(
            colors,
            vec![LineColor::Primary, LineColor::Red, LineColor::Primary]
        );
    }

    #[test]
    fn test_load_lines_from_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("app.log");
        std::fs::write(&path, "one [Debug]\ntwo [Warning]\n").unwrap();

        let lines = load_lines(&path).unwrap();
        assert_eq!(texts(&lines), vec!["one [Debug]", "two [Warning]"]);
        assert_eq!(lines[0].color, LineColor::Gray);
        assert_eq!(lines[1].color, LineColor::Orange);
    }

    #[test]
    fn test_load_missing_file_is_file_read_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("missing.log");

        let err = load_lines(&path).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
        assert!(err.to_string().contains("missing.log"));
    }

    #[test]
    fn test_load_invalid_utf8_is_file_read_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("binary.log");
        std::fs::write(&path, [0x66, 0x6f, 0xff, 0xfe, 0x0a]).unwrap();

        let err = load_lines(&path).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }

    #[test]
    fn test_save_overwrites_and_leaves_no_temp_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("out.log");
        std::fs::write(&path, "old content that is longer").unwrap();

        save_lines(&path, &parse_lines("x\ny\n")).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x\ny");
        let leftovers: Vec<_> = std::fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_save_into_missing_directory_is_file_write_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("no-such-dir").join("out.log");

        let err = save_lines(&path, &parse_lines("x\n")).unwrap_err();
        assert!(matches!(err, Error::FileWrite { .. }));
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("source.log");
        let original = "2024-01-01 [Info] start\n\n2024-01-01 [Error] boom\n";
        std::fs::write(&source, original).unwrap();

        let lines = load_lines(&source).unwrap();
        let saved = temp.path().join("saved.log");
        save_lines(&saved, &lines).unwrap();
        let reloaded = load_lines(&saved).unwrap();

        assert_eq!(texts(&reloaded), texts(&lines));
        // Only the trailing terminator differs
        let written = std::fs::read_to_string(&saved).unwrap();
        assert_eq!(format!("{}\n", written), original);
    }
}
