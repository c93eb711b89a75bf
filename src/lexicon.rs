// 📚 Lexicons - Process-wide read-only classification tables
// Keyword lists, brand patterns, cleanup patterns and stop words are
// configuration data: initialized once, never mutated, safe to share
// across threads with no coordination.
//
// Declaration order is load-bearing. Category scoring and brand matching
// break ties by the first entry in these lists, so they are ordered
// slices, never sets or maps.

use crate::category::Category;
use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// CATEGORY KEYWORDS
// ============================================================================

pub(crate) struct KeywordSet {
    pub category: Category,
    pub keywords: &'static [&'static str],
}

/// Keyword lists per category, in declaration order (Alimentação first wins
/// ties). Keywords are stored accent-folded and lower-case; callers fold
/// their input the same way before matching.
pub(crate) static CATEGORY_KEYWORDS: &[KeywordSet] = &[
    KeywordSet {
        category: Category::Alimentacao,
        keywords: &[
            "arroz", "feijao", "macarrao", "massa", "acucar", "sal", "oleo",
            "azeite", "farinha", "trigo", "milho", "cereal", "biscoito",
            "bolacha", "pao", "paes", "leite", "queijo", "manteiga",
            "margarina", "iogurte", "requeijao", "carne", "frango", "peixe",
            "ovo", "ovos", "linguica", "salsicha", "fruta", "verdura",
            "legume", "tomate", "cebola", "batata", "banana", "chocolate",
            "doce", "geleia", "mel", "achocolatado", "cafe", "cha", "molho",
            "tempero", "condimento", "conserva", "enlatado",
        ],
    },
    KeywordSet {
        category: Category::Limpeza,
        keywords: &[
            "sabao", "detergente", "desinfetante", "agua sanitaria",
            "sabonete", "esponja", "vassoura", "pano", "papel higienico",
            "papel toalha", "saco", "saco de lixo", "lixo", "sabao em po",
            "amaciante", "limpa vidro", "multiuso", "desengordurante",
            "tira mancha", "alvejante", "cloro", "alcool", "perfume",
            "inseticida",
        ],
    },
    KeywordSet {
        category: Category::Higiene,
        keywords: &[
            "shampoo", "condicionador", "sabonete", "pasta de dente",
            "creme dental", "escova de dente", "fio dental", "desodorante",
            "antitranspirante", "absorvente", "protetor solar", "hidratante",
            "creme", "pomada", "algodao", "curativo", "gaze", "lenco",
            "toalha", "fralda",
        ],
    },
    KeywordSet {
        category: Category::Bebidas,
        keywords: &[
            "refrigerante", "suco", "agua", "agua mineral", "cerveja",
            "vinho", "energetico", "isotonico", "cha", "mate", "cafe",
            "achocolatado", "leite", "iogurte", "bebida lactea",
            "agua de coco", "agua tonica",
        ],
    },
];

/// Coarse fallback cues, tried in order when no keyword scored at all.
/// First match wins.
pub(crate) static CATEGORY_CUES: Lazy<Vec<(Category, Regex)>> = Lazy::new(|| {
    [
        (
            Category::Bebidas,
            r"\b(refrigerante|suco|agua|cerveja|vinho|bebida)\b",
        ),
        (Category::Limpeza, r"\b(sabao|detergente|limpeza|limpar)\b"),
        (
            Category::Higiene,
            r"\b(shampoo|sabonete|pasta|dente|higiene)\b",
        ),
        (Category::Alimentacao, r"\b(comida|alimento|comestivel)\b"),
    ]
    .iter()
    .map(|(category, pattern)| {
        (
            *category,
            Regex::new(pattern).expect("invalid category cue pattern"),
        )
    })
    .collect()
});

// ============================================================================
// BRAND PATTERNS
// ============================================================================

/// Well-known retail brand alternations, tested in order against
/// lower-cased input. Accented spellings keep a folded variant so the
/// patterns also hit normalized (accent-folded) text.
pub(crate) static BRAND_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(coca.?cola|pepsi|nestl[eé]|danone|vigor|itamb[eé])\b",
        r"(?i)\b(sadia|perdig[aã]o|seara|friboi|swift)\b",
        r"(?i)\b(omo|ariel|comfort|persil|tide)\b",
        r"(?i)\b(pantene|head.?shoulders|seda|l'oreal|loreal)\b",
        r"(?i)\b(colgate|sorriso|close.?up|sensodyne)\b",
        r"(?i)\b(nivea|dove|rexona)\b",
        r"(?i)\b(mondelez|kraft)\b",
        r"(?i)\b(bom.?bril|assolan|ype|veja)\b",
        r"(?i)\b(ambev|skol|brahma|antarctica)\b",
        r"(?i)\b(marilan|piraqu[eê]|bauducco)\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("invalid brand pattern"))
    .collect()
});

// ============================================================================
// CLEANUP PATTERNS
// ============================================================================

/// Noise patterns removed from receipt text, applied in this order.
/// Each match is replaced by a single space.
pub(crate) static CLEANUP_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Product code markers (COD123456, REF 9876)
        r"(?i)\b(cod|ref|sku)\.?\s*\d+\b",
        // Bare runs of 4+ digits (barcodes, internal codes)
        r"\b\d{4,}\b",
        // Quantity markers and multiplications (2x3, 2 X 3)
        r"(?i)\b\d+\s*x\s*\d+\b",
        // Unit with magnitude (500g, 1L, 2,5 kg)
        r"(?i)\b\d+([.,]\d+)?\s*(kg|gr|g|lt|l|ml|mg)\b",
        // Percentages
        r"\b\d+([.,]\d+)?%",
        // Currency amounts (R$ 12,34)
        r"(?i)\b(r\$|rs?)\s*\d+[.,]\d+\b",
        // Bare units of measure
        r"(?i)\b(un|pc|kg|lt|ml|gr|g|l|m)\b",
        // Packaging words
        r"(?i)\b(caixa|cx|pct|pacote|pac|unidade|unid)\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("invalid cleanup pattern"))
    .collect()
});

/// Trailing size tokens stripped when extracting a base name.
pub(crate) static TRAILING_SIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s+\d+([.,]\d+)?\s*(kg|gr|g|lt|l|ml|mg)\s*$")
        .expect("invalid trailing size pattern")
});

// ============================================================================
// STOP WORDS
// ============================================================================

/// Prepositions, articles, conjunctions and unit abbreviations dropped
/// during normalization. Single-character tokens are dropped regardless.
pub(crate) static STOP_WORDS: &[&str] = &[
    "de", "da", "do", "das", "dos", "em", "na", "no", "nas", "nos", "para",
    "com", "por", "sem", "sob", "sobre", "entre", "ate", "ou", "mas", "que",
    "qual", "quais", "os", "as", "um", "uma", "uns", "umas", "kg", "gr", "g",
    "l", "lt", "ml", "un", "pc", "cx", "pct",
];

pub(crate) fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}
