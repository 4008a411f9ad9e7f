use std::path::PathBuf;

const BASE_DIR_ENV: &str = "CHANGE_NOTES_DIR";
const DEFAULT_DIR_NAME: &str = ".change-notes";

pub fn base_dir() -> PathBuf {
    if let Ok(value) = std::env::var(BASE_DIR_ENV)
        && let Some(path) = normalize_dir(&value)
    {
        return path;
    }
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR_NAME))
}

pub fn store_dir() -> PathBuf {
    base_dir().join("store")
}

pub fn ensure_dirs() -> anyhow::Result<()> {
    std::fs::create_dir_all(store_dir())?;
    Ok(())
}

fn normalize_dir(value: &str) -> Option<PathBuf> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let expanded = expand_tilde(trimmed);
    Some(expanded.components().collect())
}

fn expand_tilde(value: &str) -> PathBuf {
    let rest = match value {
        "~" => "",
        _ => match value.strip_prefix("~/") {
            Some(rest) => rest,
            None => return PathBuf::from(value),
        },
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_blank_override() {
        assert_eq!(normalize_dir("   "), None);
    }

    #[test]
    fn keeps_absolute_override() {
        assert_eq!(
            normalize_dir(" /tmp/notes/ "),
            Some(PathBuf::from("/tmp/notes"))
        );
    }

    #[test]
    fn expands_home_prefix() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_tilde("~/notes"), home.join("notes"));
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde("notes/~"), PathBuf::from("notes/~"));
    }
}
