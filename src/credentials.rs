const KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// `--key` wins, then `GEMINI_API_KEY`, then `GOOGLE_API_KEY`.
pub fn resolve(override_key: Option<&str>) -> Option<String> {
    resolve_with(override_key, get_env)
}

fn resolve_with(
    override_key: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    if let Some(key) = override_key.map(str::trim)
        && !key.is_empty()
    {
        return Some(key.to_string());
    }
    KEY_ENV_VARS.iter().find_map(|name| lookup(*name))
}

fn get_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn flag_overrides_environment() {
        let lookup = env_with(&[("GEMINI_API_KEY", "from-env")]);
        assert_eq!(
            resolve_with(Some(" from-flag "), lookup).as_deref(),
            Some("from-flag")
        );
    }

    #[test]
    fn blank_flag_falls_back_to_gemini_then_google() {
        let both = env_with(&[("GOOGLE_API_KEY", "google"), ("GEMINI_API_KEY", "gemini")]);
        assert_eq!(resolve_with(Some("  "), both).as_deref(), Some("gemini"));

        let google_only = env_with(&[("GOOGLE_API_KEY", "google")]);
        assert_eq!(resolve_with(None, google_only).as_deref(), Some("google"));
    }

    #[test]
    fn returns_none_without_any_source() {
        assert_eq!(resolve_with(None, env_with(&[])), None);
    }
}
