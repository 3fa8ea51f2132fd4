//! Feature-key slug derivation.
//!
//! Slugs are computed once, when a feature is created, and stored on the
//! catalog row. Request-time code compares against the stored slug rather
//! than rederiving it, so externally bookmarked URLs survive a later rename
//! of the display key.

/// Convert a feature key into a URL-safe slug.
///
/// Lowercases the key and replaces every character outside `[a-z0-9]` with a
/// hyphen. The mapping is deterministic; uniqueness across the catalog is
/// enforced separately at creation time.
pub fn slugify(key: &str) -> String {
    key.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_key_is_unchanged() {
        assert_eq!(slugify("staff-management"), "staff-management");
    }

    #[test]
    fn uppercase_is_lowered() {
        assert_eq!(slugify("Timetable"), "timetable");
    }

    #[test]
    fn non_alphanumerics_become_hyphens() {
        assert_eq!(slugify("fees & billing"), "fees---billing");
        assert_eq!(slugify("staff_management"), "staff-management");
    }

    #[test]
    fn deterministic() {
        assert_eq!(slugify("Staff Management"), slugify("Staff Management"));
    }
}
