// 🔍 Duplicate grouping - Anchor-based single-link clustering
// The first unprocessed item anchors a group and is the sole comparison
// reference for it. Later members are never re-compared against remaining
// candidates, so grouping is deliberately NOT transitive: A~B and B~C do
// not merge A and C unless B anchors the group. Callers depend on this
// exact behavior; a union-find would change observable output.

use crate::classifier::{ClassifiedItem, RawItem};
use crate::normalizer::normalize;
use crate::similarity::similarity;

/// Name a grouping pass compares on. Raw items compare by their raw
/// description, classified items by their normalized name.
pub trait ProductName {
    fn comparable_name(&self) -> &str;
}

impl ProductName for RawItem {
    fn comparable_name(&self) -> &str {
        &self.name
    }
}

impl ProductName for ClassifiedItem {
    fn comparable_name(&self) -> &str {
        &self.normalized_name
    }
}

// Lets mixed lists be grouped through &dyn ProductName
impl<T: ProductName + ?Sized> ProductName for &T {
    fn comparable_name(&self) -> &str {
        (**self).comparable_name()
    }
}

// ============================================================================
// DUPLICATE GROUPER
// ============================================================================

pub struct DuplicateGrouper {
    /// Similarity above this (strictly) counts as a duplicate
    pub similarity_threshold: f64,
}

impl DuplicateGrouper {
    /// Create grouper with the default 0.85 threshold
    pub fn new() -> Self {
        DuplicateGrouper {
            similarity_threshold: 0.85,
        }
    }

    /// Decide whether two items refer to the same underlying product.
    ///
    /// Both names are normalized; identical normalized names (ignoring
    /// case) are duplicates, otherwise similarity of the normalized names
    /// must strictly exceed the threshold. Empty names never match.
    pub fn is_duplicate<A, B>(&self, item1: &A, item2: &B) -> bool
    where
        A: ProductName,
        B: ProductName,
    {
        let name1 = item1.comparable_name();
        let name2 = item2.comparable_name();
        if name1.is_empty() || name2.is_empty() {
            return false;
        }

        let norm1 = normalize(name1);
        let norm2 = normalize(name2);

        if norm1.to_lowercase() == norm2.to_lowercase() {
            return true;
        }

        similarity(&norm1, &norm2) > self.similarity_threshold
    }

    /// Partition items into groups of likely-identical products.
    ///
    /// Every input item lands in exactly one group; group order follows
    /// first appearance. O(n²) pairwise comparisons, each against the
    /// group's anchor only.
    pub fn group<'a, T: ProductName>(&self, items: &'a [T]) -> Vec<Vec<&'a T>> {
        let mut groups: Vec<Vec<&T>> = Vec::new();
        let mut processed = vec![false; items.len()];

        for i in 0..items.len() {
            if processed[i] {
                continue;
            }

            let mut group = vec![&items[i]];
            processed[i] = true;

            for j in (i + 1)..items.len() {
                if processed[j] {
                    continue;
                }
                if self.is_duplicate(&items[i], &items[j]) {
                    group.push(&items[j]);
                    processed[j] = true;
                }
            }

            groups.push(group);
        }

        groups
    }
}

impl Default for DuplicateGrouper {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify_item;

    fn raw(name: &str) -> RawItem {
        RawItem::new(name)
    }

    #[test]
    fn test_identical_after_normalization() {
        let grouper = DuplicateGrouper::new();
        // Accent and size differences disappear in normalization
        assert!(grouper.is_duplicate(&raw("Arroz Tio Joao"), &raw("Arroz Tio João 5Kg")));
        assert!(grouper.is_duplicate(&raw("LEITE INTEGRAL"), &raw("leite integral 1l")));
    }

    #[test]
    fn test_not_duplicate() {
        let grouper = DuplicateGrouper::new();
        assert!(!grouper.is_duplicate(&raw("Arroz Branco"), &raw("Feijao Preto")));
        assert!(!grouper.is_duplicate(&raw(""), &raw("Arroz")));
    }

    #[test]
    fn test_groups_similar_items() {
        let grouper = DuplicateGrouper::new();
        let items = vec![
            raw("Arroz Tio Joao"),
            raw("Arroz Tio João 5Kg"),
            raw("Detergente Neutro"),
        ];

        let groups = grouper.group(&items);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[1].len(), 1);
        assert_eq!(groups[1][0].name, "Detergente Neutro");
    }

    #[test]
    fn test_partition_covers_every_item_once() {
        let grouper = DuplicateGrouper::new();
        let items = vec![
            raw("Arroz Branco"),
            raw("arroz branco"),
            raw("Suco Laranja"),
            raw("Detergente"),
            raw("Suco de Laranja 1L"),
        ];

        let groups = grouper.group(&items);

        let total: usize = groups.iter().map(|g| g.len()).sum();
        assert_eq!(total, items.len());

        // No pointer appears twice
        let mut seen: Vec<*const RawItem> = groups
            .iter()
            .flatten()
            .map(|item| *item as *const RawItem)
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), items.len());
    }

    #[test]
    fn test_empty_input() {
        let grouper = DuplicateGrouper::new();
        let items: Vec<RawItem> = Vec::new();
        assert!(grouper.group(&items).is_empty());
    }

    // Chain fixtures: B shares 6 of 7 tokens with A (0.857 > 0.85) and
    // C shares 7 of 8 with B (0.875), but C shares only 6 of 8 with A
    // (0.75). So A~B, B~C, not A~C.
    const CHAIN_A: &str = "Biscoito Recheado Chocolate Morango Baunilha Creme";
    const CHAIN_B: &str = "Biscoito Recheado Chocolate Morango Baunilha Creme Extra";
    const CHAIN_C: &str = "Biscoito Recheado Chocolate Morango Baunilha Creme Extra Premium";

    #[test]
    fn test_anchor_grouping_is_not_transitive() {
        let grouper = DuplicateGrouper::new();
        assert!(grouper.is_duplicate(&raw(CHAIN_A), &raw(CHAIN_B)));
        assert!(grouper.is_duplicate(&raw(CHAIN_B), &raw(CHAIN_C)));
        assert!(!grouper.is_duplicate(&raw(CHAIN_A), &raw(CHAIN_C)));

        // A anchors first: C is not similar enough to A, so it stays out
        let items = vec![raw(CHAIN_A), raw(CHAIN_B), raw(CHAIN_C)];
        let groups = grouper.group(&items);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[1][0].name, CHAIN_C);
    }

    #[test]
    fn test_anchor_choice_changes_grouping() {
        let grouper = DuplicateGrouper::new();
        // With B first, both A and C match the anchor and all three merge
        let items = vec![raw(CHAIN_B), raw(CHAIN_A), raw(CHAIN_C)];
        let groups = grouper.group(&items);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 3);
    }

    #[test]
    fn test_mixed_raw_and_classified_items() {
        let grouper = DuplicateGrouper::new();
        let classified = classify_item(&raw("Arroz Tio João 5Kg"));
        let plain = raw("Arroz Tio Joao");
        let other = raw("Detergente Neutro");

        // ClassifiedItem compares by normalized name, RawItem by raw name
        assert!(grouper.is_duplicate(&classified, &plain));

        let items: Vec<&dyn ProductName> = vec![&classified, &plain, &other];
        let groups = grouper.group(&items);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
    }
}
