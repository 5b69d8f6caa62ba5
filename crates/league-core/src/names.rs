//! Name normalization and case-insensitive comparison.
//!
//! Lookups compare folded strings directly; user input is never compiled
//! into a pattern.

/// Fold a name for comparison: lowercase, with runs of whitespace collapsed
/// to one space.
pub fn fold(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Case-insensitive equality ignoring surrounding and repeated whitespace.
pub fn same_name(a: &str, b: &str) -> bool {
    fold(a) == fold(b)
}

/// Capitalize each whitespace-separated word, lowering the rest of it.
/// Runs of whitespace collapse to a single space.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Owner handles are stored lowercased.
pub fn handle(s: &str) -> String {
    s.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("fire  SQUAD"), "Fire Squad");
        assert_eq!(title_case("mr. mime"), "Mr. Mime");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn same_name_ignores_case_and_padding() {
        assert!(same_name("Fire Squad", " fire squad "));
        assert!(!same_name("Fire Squad", "Fire Squads"));
    }

    #[test]
    fn same_name_collapses_inner_whitespace() {
        assert_eq!(fold("  Fire \t Squad "), "fire squad");
        assert!(same_name("Fire  Squad", "fire squad"));
        assert!(!same_name("FireSquad", "Fire Squad"));
    }

    #[test]
    fn pattern_characters_compare_literally() {
        assert!(!same_name(".*", "anything"));
        assert!(same_name("a+b", "A+B"));
    }
}
