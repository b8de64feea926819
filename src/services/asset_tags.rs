//! Asset tag generation.
//!
//! Tags have the shape `SLUG(name)-SLUG(department)-NN` where `NN` is a
//! two-digit, zero-padded counter scoped to the exact base-tag prefix. A tag
//! is generated exactly once, right before the computer row is first stored,
//! and is immutable afterwards.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Z0-9]+").unwrap());

/// Uppercase and hyphenate an input for use in an asset tag.
/// Diacritics are stripped via NFKD normalization.
pub fn slugify(input: &str) -> String {
    let ascii: String = input.nfkd().filter(char::is_ascii).collect();
    let upper = ascii.to_uppercase();
    NON_ALNUM
        .replace_all(&upper, "-")
        .trim_matches('-')
        .to_string()
}

/// The base-tag prefix for a computer, or `None` when either input is
/// missing. A missing prefix is not an error: it signals "generate later".
pub fn base_tag(name: &str, department: &str) -> Option<String> {
    let name_slug = slugify(name);
    let department_slug = slugify(department);
    if name_slug.is_empty() || department_slug.is_empty() {
        return None;
    }
    Some(format!("{}-{}", name_slug, department_slug))
}

/// Next counter under a base-tag prefix: highest existing numeric suffix
/// plus one, starting at 1. Tags whose suffix is non-numeric or malformed
/// are ignored rather than treated as an error.
pub fn next_suffix(base: &str, existing_tags: &[String]) -> u32 {
    let prefix = format!("{}-", base);
    existing_tags
        .iter()
        .filter_map(|tag| tag.strip_prefix(prefix.as_str()))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .unwrap_or(0)
        + 1
}

/// Generate the full asset tag for a new computer given the tags already
/// present under the same prefix.
pub fn generate(name: &str, department: &str, existing_tags: &[String]) -> Option<String> {
    let base = base_tag(name, department)?;
    let suffix = next_suffix(&base, existing_tags);
    Some(format!("{}-{:02}", base, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn slugify_uppercases_and_hyphenates() {
        assert_eq!(slugify("Laptop"), "LAPTOP");
        assert_eq!(slugify("ThinkPad X1 Carbon"), "THINKPAD-X1-CARBON");
        assert_eq!(slugify("  r&d / ops  "), "R-D-OPS");
    }

    #[test]
    fn slugify_strips_diacritics() {
        assert_eq!(slugify("Ingénierie"), "INGENIERIE");
    }

    #[test]
    fn first_tag_under_a_prefix_is_01() {
        assert_eq!(
            generate("Laptop", "Engineering", &[]),
            Some("LAPTOP-ENGINEERING-01".to_string())
        );
    }

    #[test]
    fn second_tag_under_the_same_prefix_is_02() {
        let existing = tags(&["LAPTOP-ENGINEERING-01"]);
        assert_eq!(
            generate("Laptop", "Engineering", &existing),
            Some("LAPTOP-ENGINEERING-02".to_string())
        );
    }

    #[test]
    fn counter_continues_from_the_highest_suffix() {
        let existing = tags(&[
            "LAPTOP-ENGINEERING-01",
            "LAPTOP-ENGINEERING-07",
            "LAPTOP-ENGINEERING-03",
        ]);
        assert_eq!(
            generate("Laptop", "Engineering", &existing),
            Some("LAPTOP-ENGINEERING-08".to_string())
        );
    }

    #[test]
    fn malformed_suffixes_are_ignored() {
        let existing = tags(&["LAPTOP-ENGINEERING-OLD", "LAPTOP-ENGINEERING-"]);
        assert_eq!(
            generate("Laptop", "Engineering", &existing),
            Some("LAPTOP-ENGINEERING-01".to_string())
        );
    }

    #[test]
    fn longer_prefixes_do_not_collide() {
        // LAPTOP-ENG must not count tags under LAPTOP-ENGINEERING
        let existing = tags(&["LAPTOP-ENG-EXTRA-01"]);
        assert_eq!(next_suffix("LAPTOP-ENG", &existing), 1);
    }

    #[test]
    fn missing_inputs_mean_no_tag_yet() {
        assert_eq!(generate("", "Engineering", &[]), None);
        assert_eq!(generate("Laptop", "", &[]), None);
        assert_eq!(generate("---", "Engineering", &[]), None);
    }

    #[test]
    fn counter_widens_past_99() {
        let existing = tags(&["DESKTOP-SALES-99"]);
        assert_eq!(
            generate("Desktop", "Sales", &existing),
            Some("DESKTOP-SALES-100".to_string())
        );
    }
}
