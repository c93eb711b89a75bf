// 🧹 Normalizer - Raw receipt text → canonical comparable product name
// "ARROZ BRANCO TIO JOAO 5KG COD123456" → "Arroz Branco Tio Joao"

use crate::lexicon::{is_stop_word, BRAND_PATTERNS, CLEANUP_PATTERNS, TRAILING_SIZE};

/// Normalize a raw line-item description.
///
/// Pipeline, in order: trim + lower-case, fold diacritics to ASCII, remove
/// noise patterns (codes, quantities, units, prices, packaging words), strip
/// everything but letters/digits/whitespace/hyphen, drop stop words and
/// single-character tokens, then title-case what remains.
///
/// Empty input returns an empty string. Non-empty input whose tokens are all
/// removed returns the original input unchanged: normalization must never
/// produce an empty product name.
pub fn normalize(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let mut text = fold_accents(&name.trim().to_lowercase());

    for pattern in CLEANUP_PATTERNS.iter() {
        text = pattern.replace_all(&text, " ").into_owned();
    }

    // Keep letters, digits, whitespace and hyphen
    let text: String = text
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() || c == '-' {
                c
            } else {
                ' '
            }
        })
        .collect();

    let normalized = text
        .split_whitespace()
        .filter(|word| word.chars().count() > 1 && !is_stop_word(word))
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ");

    if normalized.is_empty() {
        name.to_string()
    } else {
        normalized
    }
}

/// Extract the base product name: normalized name with brand mentions and
/// trailing size tokens removed. Falls back to the input when everything
/// is stripped away.
pub fn extract_base_name(name: &str) -> String {
    let mut base = normalize(name);

    for pattern in BRAND_PATTERNS.iter() {
        base = pattern.replace_all(&base, "").trim().to_string();
    }

    base = TRAILING_SIZE.replace(&base, "").trim().to_string();
    base = base.split_whitespace().collect::<Vec<_>>().join(" ");

    if base.is_empty() {
        name.to_string()
    } else {
        base
    }
}

/// Fold Portuguese diacritics to their ASCII base letter. Receipt OCR mixes
/// accented and unaccented spellings of the same product; comparisons have
/// to land on one form.
pub(crate) fn fold_accents(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'Ç' => 'C',
            other => other,
        })
        .collect()
}

/// Upper-case the first letter of a token, leaving the rest as-is.
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
