/// Normalize an emoji name for registration.
///
/// Lowercases and replaces spaces with underscores. Everything else,
/// punctuation included, passes through untouched.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}
