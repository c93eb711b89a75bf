// 🧠 Classifier - Single entry point composing the four pure components
// raw description → Normalizer → (CategoryClassifier, BrandDetector) →
// ClassifiedItem. Stateless: every call derives a fresh value from the
// input text and the static lexicons only.

use crate::brand::detect_brand;
use crate::category::{detect_category, Category};
use crate::normalizer::{extract_base_name, normalize};
use serde::{Deserialize, Serialize};

// ============================================================================
// ITEMS
// ============================================================================

/// One line item as scraped from a receipt. Immutable input produced by
/// the receipt-ingestion collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
}

impl RawItem {
    pub fn new(name: impl Into<String>) -> Self {
        RawItem {
            name: name.into(),
            quantity: None,
            unit_price: None,
            tax: None,
        }
    }
}

/// Classification result for one line item. Derived, immutable, created
/// fresh on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedItem {
    pub original_name: String,
    pub normalized_name: String,
    pub category: Category,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    pub base_name: String,
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Classify one item: normalize its name, detect category and brand,
/// extract the base name.
///
/// Pure function of `item.name` and the static lexicons; calling it twice
/// with the same name yields byte-identical output.
pub fn classify_item(item: &RawItem) -> ClassifiedItem {
    let original_name = item.name.clone();
    let normalized_name = normalize(&original_name);
    let category = detect_category(&normalized_name);
    let brand = detect_brand(&original_name);
    let base_name = extract_base_name(&normalized_name);

    ClassifiedItem {
        original_name,
        normalized_name,
        category,
        brand,
        base_name,
    }
}

/// Classify a list of items, one independent call each.
pub fn classify_items(items: &[RawItem]) -> Vec<ClassifiedItem> {
    items.iter().map(classify_item).collect()
}

// ============================================================================
// STATS
// ============================================================================

/// Aggregate counts over a batch of classified items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationStats {
    pub total: usize,

    /// Counts indexed in `Category::ALL` order.
    pub by_category: [usize; 5],

    pub with_brand: usize,
}

impl ClassificationStats {
    pub fn for_category(&self, category: Category) -> usize {
        self.by_category[category.index()]
    }
}

pub fn classification_stats(items: &[ClassifiedItem]) -> ClassificationStats {
    let mut by_category = [0usize; 5];
    let mut with_brand = 0;

    for item in items {
        by_category[item.category.index()] += 1;
        if item.brand.is_some() {
            with_brand += 1;
        }
    }

    ClassificationStats {
        total: items.len(),
        by_category,
        with_brand,
    }
}

// ============================================================================
// BACKEND PAYLOAD
// ============================================================================

/// Item record shaped for the receipts backend: classification fields
/// merged with the priced quantities, with the upstream defaulting rules
/// (missing quantity → 1, missing prices → 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendItem {
    pub description: String,
    pub normalized_name: String,
    pub category: Category,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    pub quantity: f64,
    pub unit_price: f64,
    pub total_price: f64,
    pub tax_value: f64,
}

/// Enrich a raw item with classification data for persistence.
pub fn prepare_for_backend(item: &RawItem) -> BackendItem {
    let classified = classify_item(item);
    let quantity = item.quantity.unwrap_or(1.0);
    let unit_price = item.unit_price.unwrap_or(0.0);

    BackendItem {
        description: item.name.clone(),
        normalized_name: classified.normalized_name,
        category: classified.category,
        brand: classified.brand,
        quantity,
        unit_price,
        total_price: unit_price * quantity,
        tax_value: item.tax.unwrap_or(0.0),
    }
}

// ============================================================================
// TESTS
// ============================================================================
