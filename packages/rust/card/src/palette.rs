//! Language accent colors for the card's language dot.
//!
//! Colors are written in `rgb()` form so they can never coincide with a
//! user-supplied `#rrggbb` value.

/// Dot color used when the language is unknown or not in the table.
pub(crate) const NEUTRAL_LANGUAGE_COLOR: &str = "rgb(110, 118, 129)";

/// Accent color for a repository's primary language.
pub(crate) fn language_color(language: Option<&str>) -> &'static str {
    let Some(language) = language else {
        return NEUTRAL_LANGUAGE_COLOR;
    };

    match language.trim().to_ascii_lowercase().as_str() {
        "javascript" => "rgb(241, 224, 90)",
        "typescript" => "rgb(49, 120, 198)",
        "python" => "rgb(53, 114, 165)",
        "rust" => "rgb(222, 165, 132)",
        "go" => "rgb(0, 173, 216)",
        "java" => "rgb(176, 114, 25)",
        "c++" | "cpp" => "rgb(243, 75, 125)",
        "c#" | "csharp" => "rgb(23, 134, 0)",
        "ruby" => "rgb(112, 21, 22)",
        "php" => "rgb(79, 93, 149)",
        "swift" => "rgb(240, 81, 56)",
        "kotlin" => "rgb(169, 123, 255)",
        "dart" => "rgb(0, 180, 171)",
        "vue" => "rgb(65, 184, 131)",
        "html" => "rgb(227, 76, 38)",
        "css" => "rgb(86, 61, 124)",
        "shell" | "bash" => "rgb(137, 224, 81)",
        "c" => "rgb(85, 85, 85)",
        _ => NEUTRAL_LANGUAGE_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_languages() {
        assert_eq!(language_color(Some("Rust")), "rgb(222, 165, 132)");
        assert_eq!(language_color(Some("TypeScript")), "rgb(49, 120, 198)");
        assert_eq!(language_color(Some("C++")), "rgb(243, 75, 125)");
        assert_eq!(language_color(Some("cpp")), "rgb(243, 75, 125)");
        assert_eq!(language_color(Some("C#")), "rgb(23, 134, 0)");
    }

    #[test]
    fn unknown_and_missing_fall_back() {
        assert_eq!(language_color(Some("Brainfuck")), NEUTRAL_LANGUAGE_COLOR);
        assert_eq!(language_color(Some("")), NEUTRAL_LANGUAGE_COLOR);
        assert_eq!(language_color(None), NEUTRAL_LANGUAGE_COLOR);
    }

    #[test]
    fn colors_are_never_hex() {
        for language in ["JavaScript", "Rust", "Go", "C", "PHP", "Unknown"] {
            assert!(language_color(Some(language)).starts_with("rgb("), "{language}");
        }
    }
}
