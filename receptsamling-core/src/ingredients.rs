//! Ingredient text parsing.
//!
//! The web form takes ingredients as free text, one per line. Parsing trims
//! each line and discards blank ones, so the stored list never contains
//! whitespace-only entries.

/// Split free-text ingredient input into an ordered list of trimmed lines.
pub fn parse_ingredients(ingredients_text: &str) -> Vec<String> {
    ingredients_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_lines_and_trims() {
        let parsed = parse_ingredients("  flour \nsugar\n\teggs\t");
        assert_eq!(parsed, vec!["flour", "sugar", "eggs"]);
    }

    #[test]
    fn test_discards_blank_lines() {
        let parsed = parse_ingredients("flour\n\n   \nsugar\n");
        assert_eq!(parsed, vec!["flour", "sugar"]);
    }

    #[test]
    fn test_empty_input_yields_empty_list() {
        assert!(parse_ingredients("").is_empty());
        assert!(parse_ingredients("   \n\n  ").is_empty());
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let parsed = parse_ingredients("  tomatoes  \n\ncucumber\nfeta ");
        let rejoined = parsed.join("\n");
        assert_eq!(parse_ingredients(&rejoined), parsed);
    }
}
