use std::path::Path;

/// Characters that are invalid in a file name on at least one major platform.
const INVALID_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Name used when sanitising leaves nothing behind.
pub const FALLBACK_NAME: &str = "unnamed";

/// Replace path separators, reserved punctuation and control characters with `_`.
///
/// The result is always a single path component, so a rendered name can never
/// point outside its target directory.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if INVALID_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Extension of a file name including the leading dot, case preserved.
///
/// Dot-files such as `.hidden` and names ending in a dot have no extension.
pub fn extension_of(name: &str) -> &str {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map_or("", |ext| &name[name.len() - ext.len() - 1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_separators() {
        assert_eq!(sanitize_filename("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_filename(r"a\b:c"), "a_b_c");
        assert_eq!(sanitize_filename("1_全景.jpg"), "1_全景.jpg");
    }

    #[test]
    fn test_sanitize_control_chars_and_whitespace() {
        assert_eq!(sanitize_filename("  tab\there  "), "tab_here");
        assert_eq!(sanitize_filename("   "), FALLBACK_NAME);
        assert_eq!(sanitize_filename(".."), FALLBACK_NAME);
    }

    #[test]
    fn test_extension_preserves_case() {
        assert_eq!(extension_of("IMG_0001.JPG"), ".JPG");
        assert_eq!(extension_of("photo.tar.gz"), ".gz");
        assert_eq!(extension_of("README"), "");
        assert_eq!(extension_of(".hidden"), "");
        assert_eq!(extension_of("a."), "");
        assert_eq!(extension_of("写真.jpeg"), ".jpeg");
    }
}
