use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const FALLBACK_STEM: &str = "change-notes";

/// Replaces every character outside `[A-Za-z0-9._-]` with `_` and appends `.md`.
pub fn export_file_name(filename: &str) -> String {
    let stem = filename
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
                ch
            } else {
                '_'
            }
        })
        .collect::<String>();
    if stem.is_empty() {
        return format!("{FALLBACK_STEM}.md");
    }
    format!("{stem}.md")
}

pub fn write_notes(dir: &Path, filename: &str, notes: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory: {}", dir.display()))?;
    let path = dir.join(export_file_name(filename));
    fs::write(&path, notes)
        .with_context(|| format!("failed to write change notes: {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_path_separators() {
        assert_eq!(export_file_name("src/app.ts"), "src_app.ts.md");
    }

    #[test]
    fn replaces_each_disallowed_character() {
        assert_eq!(export_file_name("my file (1).rs"), "my_file__1_.rs.md");
        assert_eq!(export_file_name("café.py"), "caf_.py.md");
    }

    #[test]
    fn falls_back_for_empty_filename() {
        assert_eq!(export_file_name(""), "change-notes.md");
    }

    #[test]
    fn writes_notes_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_notes(&dir.path().join("out"), "../a.ts", "# Notes").unwrap();
        assert_eq!(path, dir.path().join("out").join(".._a.ts.md"));
        assert_eq!(fs::read_to_string(path).unwrap(), "# Notes");
    }
}
