//! Checks for configured filename components.

/// Whether `name` can be used verbatim as part of a single Linux filename.
///
/// Rejects empty names, `.` and `..`, and anything containing `/`, `\`,
/// NUL or control characters. Everything else, including leading
/// underscores and doubled separators, is kept as written.
pub fn is_safe_filename_component(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name
            .chars()
            .any(|c| c == '/' || c == '\\' || c == '\0' || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_unusual_prefixes() {
        assert!(is_safe_filename_component("jpx_settlement_prices"));
        assert!(is_safe_filename_component("jpx__prices"));
        assert!(is_safe_filename_component("_daily"));
        assert!(is_safe_filename_component("..."));
        assert!(is_safe_filename_component("irs rates"));
    }

    #[test]
    fn rejects_path_like_names() {
        assert!(!is_safe_filename_component(""));
        assert!(!is_safe_filename_component("."));
        assert!(!is_safe_filename_component(".."));
        assert!(!is_safe_filename_component("a/b"));
        assert!(!is_safe_filename_component("a\\b"));
        assert!(!is_safe_filename_component("a\0b"));
        assert!(!is_safe_filename_component("line\nbreak"));
    }
}
