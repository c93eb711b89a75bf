// Economiza Classifier - Core Library
// Product classification and deduplication engine for retail receipt
// line items: normalization, category detection, brand detection,
// similarity scoring and duplicate grouping, plus the SQLite-backed
// correction/knowledge store the feedback workflow writes into.

pub mod brand;
pub mod category;
pub mod classifier;
pub mod grouping;
pub mod knowledge;
pub mod normalizer;
pub mod similarity;

mod lexicon;

// Re-export commonly used types
pub use brand::detect_brand;
pub use category::{detect_category, Category};
pub use classifier::{
    classification_stats, classify_item, classify_items, prepare_for_backend, BackendItem,
    ClassificationStats, ClassifiedItem, RawItem,
};
pub use grouping::{DuplicateGrouper, ProductName};
pub use knowledge::{
    knowledge_from_correction, ItemCorrection, KnowledgeRecord, KnowledgeSource, KnowledgeStore,
};
pub use normalizer::{extract_base_name, normalize};
pub use similarity::similarity;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
