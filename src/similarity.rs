// 📏 Similarity - Token-set + containment scoring in [0, 1]
// Symmetric by construction: both component scores ignore argument order.

use std::collections::HashSet;

/// Containment is discounted relative to true token overlap: one string
/// being a prefix/fragment of the other is weaker evidence than sharing
/// the same words.
const CONTAINMENT_DISCOUNT: f64 = 0.8;

/// Score how similar two product names are, from 0.0 (nothing shared) to
/// 1.0 (identical after lower-casing and trimming).
///
/// Two signals are computed and the larger one wins:
/// - Jaccard similarity over the whitespace token sets
/// - containment: if one string is a substring of the other,
///   `len(shorter) / len(longer) * 0.8`
pub fn similarity(a: &str, b: &str) -> f64 {
    let s1 = a.trim().to_lowercase();
    let s2 = b.trim().to_lowercase();

    if s1 == s2 {
        return 1.0;
    }
    if s1.is_empty() || s2.is_empty() {
        return 0.0;
    }

    let tokens1: HashSet<&str> = s1.split_whitespace().collect();
    let tokens2: HashSet<&str> = s2.split_whitespace().collect();

    let intersection = tokens1.intersection(&tokens2).count();
    let union = tokens1.union(&tokens2).count();
    let jaccard = intersection as f64 / union as f64;

    let containment = if s1.contains(&s2) || s2.contains(&s1) {
        let len1 = s1.chars().count() as f64;
        let len2 = s2.chars().count() as f64;
        len1.min(len2) / len1.max(len2) * CONTAINMENT_DISCOUNT
    } else {
        0.0
    };

    jaccard.max(containment)
}

// ============================================================================
// TESTS
// ============================================================================
