//! Text normalization applied to place fields at creation time.

/// Capitalize the first letter of each whitespace-separated word.
///
/// The remainder of each word is left untouched so acronyms survive
/// ("visit NYC" becomes "Visit NYC"). Surrounding and internal runs of
/// whitespace collapse to single spaces.
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Capitalize only the first character, leaving the rest untouched.
pub fn capitalize_first(input: &str) -> String {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_capitalizes_each_word() {
        assert_eq!(title_case("the eiffel tower"), "The Eiffel Tower");
    }

    #[test]
    fn title_case_preserves_acronyms() {
        assert_eq!(title_case("visit NYC today"), "Visit NYC Today");
    }

    #[test]
    fn title_case_collapses_whitespace() {
        assert_eq!(title_case("  the   eiffel  tower "), "The Eiffel Tower");
    }

    #[test]
    fn capitalize_first_only_touches_first_letter() {
        assert_eq!(
            capitalize_first("a tall iron lattice tower"),
            "A tall iron lattice tower"
        );
    }

    #[test]
    fn capitalize_first_handles_empty() {
        assert_eq!(capitalize_first("   "), "");
    }
}
