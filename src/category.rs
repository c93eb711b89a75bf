// 🏷️ Category - Closed five-member taxonomy + keyword classifier
// Outros is the default member and always a valid result.

use crate::lexicon::{CATEGORY_CUES, CATEGORY_KEYWORDS};
use crate::normalizer::fold_accents;
use serde::{Deserialize, Serialize};

// ============================================================================
// CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Food staples, dairy, meat, sweets
    #[serde(rename = "Alimentação")]
    Alimentacao,

    /// Household cleaning supplies
    Limpeza,

    /// Personal hygiene and care
    Higiene,

    /// Drinks of any kind
    Bebidas,

    /// Fallback bucket for everything else
    Outros,
}

impl Category {
    /// All members, in declaration order. Scoring and tie-breaks depend on
    /// this order, so iterate this slice rather than any map.
    pub const ALL: [Category; 5] = [
        Category::Alimentacao,
        Category::Limpeza,
        Category::Higiene,
        Category::Bebidas,
        Category::Outros,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Alimentacao => "Alimentação",
            Category::Limpeza => "Limpeza",
            Category::Higiene => "Higiene",
            Category::Bebidas => "Bebidas",
            Category::Outros => "Outros",
        }
    }

    /// Parse a display name back into a category. Accepts the accented and
    /// folded spellings; anything unknown is None.
    pub fn from_name(name: &str) -> Option<Category> {
        match name.trim() {
            "Alimentação" | "Alimentacao" => Some(Category::Alimentacao),
            "Limpeza" => Some(Category::Limpeza),
            "Higiene" => Some(Category::Higiene),
            "Bebidas" => Some(Category::Bebidas),
            "Outros" => Some(Category::Outros),
            _ => None,
        }
    }

    /// Position in `ALL`, used for per-category counters.
    pub(crate) fn index(self) -> usize {
        match self {
            Category::Alimentacao => 0,
            Category::Limpeza => 1,
            Category::Higiene => 2,
            Category::Bebidas => 3,
            Category::Outros => 4,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Outros
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CATEGORY DETECTION
// ============================================================================

/// Detect the category of a product description.
///
/// Counts keyword-list hits per category and picks the highest score;
/// on a tie the category declared first wins (a later category only
/// replaces the current best on a strictly greater score). When nothing
/// scores, a second pass of coarse regex cues runs in fixed order.
/// Never fails: unknown or empty input is `Outros`.
pub fn detect_category(name: &str) -> Category {
    if name.is_empty() {
        return Category::Outros;
    }

    let haystack = fold_accents(&name.to_lowercase());

    let mut best = Category::Outros;
    let mut best_score = 0usize;

    for set in CATEGORY_KEYWORDS {
        let score = set
            .keywords
            .iter()
            .filter(|keyword| haystack.contains(*keyword))
            .count();
        if score > best_score {
            best_score = score;
            best = set.category;
        }
    }

    if best_score > 0 {
        return best;
    }

    // Secondary pass: coarse cues, first match wins
    for (category, cue) in CATEGORY_CUES.iter() {
        if cue.is_match(&haystack) {
            return *category;
        }
    }

    Category::Outros
}

// ============================================================================
// TESTS
// ============================================================================
