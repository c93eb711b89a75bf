// 🏪 Brand detection - Known-brand patterns + first-word heuristic
// Best-effort: false positives and negatives are acceptable, absence is
// a valid outcome, never an error.

use crate::lexicon::BRAND_PATTERNS;

/// Detect a brand name inside a product description.
///
/// The lower-cased input is tested against the known-brand patterns in
/// list order; the first match is returned with its first letter
/// capitalized. Without a pattern hit, a heuristic guess: when the
/// original-case text has more than one word and the first word starts
/// upper-case with length > 2, that word is taken as the brand.
pub fn detect_brand(name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }

    let haystack = name.to_lowercase();

    for pattern in BRAND_PATTERNS.iter() {
        if let Some(found) = pattern.find(&haystack) {
            return Some(capitalize_first(found.as_str().trim()));
        }
    }

    // Heuristic fallback on the original-case text. Sensitive to upstream
    // OCR capitalization: all-caps dumps yield all-caps guesses,
    // all-lowercase dumps yield none.
    let words: Vec<&str> = name.split_whitespace().collect();
    if words.len() > 1 {
        let first = words[0];
        let starts_upper = first.chars().next().is_some_and(|c| c.is_uppercase());
        if first.chars().count() > 2 && starts_upper {
            return Some(first.to_string());
        }
    }

    None
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_brand_match() {
        assert_eq!(
            detect_brand("OMO LAVAGEM PERFEITA 1KG"),
            Some("Omo".to_string())
        );
        assert_eq!(
            detect_brand("Refrigerante Coca Cola 2L"),
            Some("Coca cola".to_string())
        );
        assert_eq!(
            detect_brand("biscoito bauducco recheado"),
            Some("Bauducco".to_string())
        );
    }

    #[test]
    fn test_pattern_order_first_wins() {
        // Matches both the Nestlé group (1st) and the Colgate group (5th)
        assert_eq!(
            detect_brand("nestle colgate kit"),
            Some("Nestle".to_string())
        );
    }

    #[test]
    fn test_fallback_capitalized_first_word() {
        assert_eq!(
            detect_brand("Qualita Arroz Integral"),
            Some("Qualita".to_string())
        );
        // All-caps OCR text still yields the first word as-is
        assert_eq!(
            detect_brand("PREDILECTA MOLHO TOMATE"),
            Some("PREDILECTA".to_string())
        );
    }

    #[test]
    fn test_no_brand() {
        // Lower-case first word: heuristic does not fire
        assert_eq!(detect_brand("arroz integral premium"), None);
        // Single word, no pattern
        assert_eq!(detect_brand("Arroz"), None);
        // Short first word
        assert_eq!(detect_brand("Ab cd"), None);
        assert_eq!(detect_brand(""), None);
    }
}
