use crate::llm::{ErrorKind, Failure};

pub(super) fn missing_fields(
    credentials: &str,
    filename: &str,
    before_code: &str,
    after_code: &str,
) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if credentials.trim().is_empty() {
        missing.push("API key");
    }
    // Only the key is trimmed; code may be whitespace only.
    [
        ("filename", filename),
        ("before code", before_code),
        ("after code", after_code),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .for_each(|(name, _)| missing.push(name));
    missing
}

pub(super) fn validation_failure(missing: &[&str]) -> Failure {
    Failure::new(
        ErrorKind::ValidationError,
        format!(
            "All fields (API key, filename, before code, and after code) are required. Missing: {}.",
            missing.join(", ")
        ),
    )
}
