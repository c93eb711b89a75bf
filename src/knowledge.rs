// 📝 Knowledge store - Human corrections and learned classification patterns
// SQLite-backed collaborator for the feedback workflow: the presentation
// layer records a correction, which translates into one or two knowledge
// records keyed by (pattern, category, brand) with upsert semantics.
//
// The classification functions do NOT read this store back; whether
// look-up-before-classify becomes a feature is an open product question,
// so the write path exists and the read-back path deliberately does not.

use crate::category::Category;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// RECORDS
// ============================================================================

/// Where a knowledge record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeSource {
    Manual,
    Correction,
    Auto,
}

impl KnowledgeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            KnowledgeSource::Manual => "manual",
            KnowledgeSource::Correction => "correction",
            KnowledgeSource::Auto => "auto",
        }
    }

    fn from_db(value: &str) -> KnowledgeSource {
        match value {
            "correction" => KnowledgeSource::Correction,
            "auto" => KnowledgeSource::Auto,
            _ => KnowledgeSource::Manual,
        }
    }
}

/// One learned classification pattern. Keyed by (pattern, category, brand).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeRecord {
    pub pattern: String,
    pub category: Category,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Confidence in [0, 1]
    pub confidence: f64,

    pub source: KnowledgeSource,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A human override of one classified receipt item, as submitted through
/// the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCorrection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub receipt_item_id: String,
    pub original_name: String,
    pub original_normalized_name: String,
    pub original_category: Category,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_brand: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected_normalized_name: Option<String>,

    pub corrected_category: Category,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected_brand: Option<String>,
}

/// Translate a correction into knowledge records.
///
/// The corrected pattern is recorded at confidence 1.0 (it came from a
/// human). When the normalized name itself was corrected, the original
/// pattern is also mapped to the same correction at confidence 0.9 so
/// future sightings of the uncorrected spelling resolve too.
pub fn knowledge_from_correction(correction: &ItemCorrection) -> Vec<KnowledgeRecord> {
    let pattern = correction
        .corrected_normalized_name
        .as_deref()
        .unwrap_or(&correction.original_normalized_name);

    let mut records = vec![KnowledgeRecord {
        pattern: pattern.trim().to_lowercase(),
        category: correction.corrected_category,
        brand: correction.corrected_brand.clone(),
        confidence: 1.0,
        source: KnowledgeSource::Correction,
        updated_at: None,
    }];

    if let Some(corrected) = &correction.corrected_normalized_name {
        if corrected != &correction.original_normalized_name {
            records.push(KnowledgeRecord {
                pattern: correction.original_normalized_name.trim().to_lowercase(),
                category: correction.corrected_category,
                brand: correction.corrected_brand.clone(),
                confidence: 0.9,
                source: KnowledgeSource::Correction,
                updated_at: None,
            });
        }
    }

    records
}

// ============================================================================
// STORE
// ============================================================================

pub struct KnowledgeStore {
    conn: Connection,
}

impl KnowledgeStore {
    /// Open (or create) the store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .with_context(|| format!("Failed to open knowledge store: {:?}", path.as_ref()))?;
        Self::init(&conn)?;
        Ok(KnowledgeStore { conn })
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().context("Failed to open in-memory knowledge store")?;
        Self::init(&conn)?;
        Ok(KnowledgeStore { conn })
    }

    fn init(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS item_corrections (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                receipt_item_id TEXT NOT NULL,
                original_name TEXT NOT NULL,
                original_normalized_name TEXT NOT NULL,
                original_category TEXT NOT NULL,
                original_brand TEXT,
                corrected_normalized_name TEXT,
                corrected_category TEXT NOT NULL,
                corrected_brand TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS classifier_knowledge (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                pattern TEXT NOT NULL,
                category TEXT NOT NULL,
                brand TEXT,
                confidence REAL NOT NULL DEFAULT 1.0,
                source TEXT NOT NULL DEFAULT 'manual',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE(pattern, category, brand)
            );

            CREATE INDEX IF NOT EXISTS idx_corrections_receipt_item
                ON item_corrections(receipt_item_id);

            CREATE INDEX IF NOT EXISTS idx_knowledge_pattern
                ON classifier_knowledge(pattern);",
        )
        .context("Failed to create knowledge store schema")
    }

    /// Insert a correction row. Returns its rowid.
    pub fn save_correction(&self, correction: &ItemCorrection) -> Result<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO item_corrections (
                    receipt_item_id, original_name, original_normalized_name,
                    original_category, original_brand,
                    corrected_normalized_name, corrected_category, corrected_brand,
                    created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
                params![
                    correction.receipt_item_id,
                    correction.original_name,
                    correction.original_normalized_name,
                    correction.original_category.as_str(),
                    correction.original_brand,
                    correction.corrected_normalized_name,
                    correction.corrected_category.as_str(),
                    correction.corrected_brand,
                    now,
                ],
            )
            .context("Failed to save correction")?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Corrections for one receipt item, newest first.
    pub fn corrections_for_item(&self, receipt_item_id: &str) -> Result<Vec<ItemCorrection>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, receipt_item_id, original_name, original_normalized_name,
                        original_category, original_brand,
                        corrected_normalized_name, corrected_category, corrected_brand
                 FROM item_corrections
                 WHERE receipt_item_id = ?1
                 ORDER BY created_at DESC, id DESC",
            )
            .context("Failed to prepare corrections query")?;

        let rows = stmt
            .query_map(params![receipt_item_id], row_to_correction)
            .context("Failed to query corrections")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read correction rows")?;
        Ok(rows)
    }

    /// All corrections, newest first.
    pub fn all_corrections(&self) -> Result<Vec<ItemCorrection>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, receipt_item_id, original_name, original_normalized_name,
                        original_category, original_brand,
                        corrected_normalized_name, corrected_category, corrected_brand
                 FROM item_corrections
                 ORDER BY created_at DESC, id DESC",
            )
            .context("Failed to prepare corrections query")?;

        let rows = stmt
            .query_map([], row_to_correction)
            .context("Failed to query corrections")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read correction rows")?;
        Ok(rows)
    }

    /// Upsert a knowledge record keyed by (pattern, category, brand).
    ///
    /// An existing key gets its confidence/source refreshed; a new key is
    /// inserted. The lookup is explicit because SQLite's UNIQUE constraint
    /// treats NULL brands as distinct values. Returns the rowid.
    pub fn upsert_knowledge(&self, record: &KnowledgeRecord) -> Result<i64> {
        let now = Utc::now().to_rfc3339();

        let existing: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM classifier_knowledge
                 WHERE pattern = ?1 AND category = ?2 AND brand IS ?3",
                params![record.pattern, record.category.as_str(), record.brand],
                |row| row.get(0),
            )
            .map(Some)
            .or_else(|err| match err {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })
            .context("Failed to look up knowledge record")?;

        match existing {
            Some(id) => {
                self.conn
                    .execute(
                        "UPDATE classifier_knowledge
                         SET confidence = ?1, source = ?2, updated_at = ?3
                         WHERE id = ?4",
                        params![record.confidence, record.source.as_str(), now, id],
                    )
                    .context("Failed to update knowledge record")?;
                Ok(id)
            }
            None => {
                self.conn
                    .execute(
                        "INSERT INTO classifier_knowledge
                            (pattern, category, brand, confidence, source,
                             created_at, updated_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
                        params![
                            record.pattern,
                            record.category.as_str(),
                            record.brand,
                            record.confidence,
                            record.source.as_str(),
                            now,
                        ],
                    )
                    .context("Failed to insert knowledge record")?;
                Ok(self.conn.last_insert_rowid())
            }
        }
    }

    /// Knowledge records whose pattern equals or contains the given text,
    /// highest confidence first.
    pub fn knowledge_for_pattern(&self, pattern: &str) -> Result<Vec<KnowledgeRecord>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT pattern, category, brand, confidence, source, updated_at
                 FROM classifier_knowledge
                 WHERE pattern LIKE ?1 OR pattern = ?2
                 ORDER BY confidence DESC, updated_at DESC",
            )
            .context("Failed to prepare knowledge query")?;

        let like = format!("%{}%", pattern);
        let rows = stmt
            .query_map(params![like, pattern], row_to_knowledge)
            .context("Failed to query knowledge")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read knowledge rows")?;
        Ok(rows)
    }

    /// All knowledge records, highest confidence then most recent first.
    pub fn all_knowledge(&self) -> Result<Vec<KnowledgeRecord>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT pattern, category, brand, confidence, source, updated_at
                 FROM classifier_knowledge
                 ORDER BY confidence DESC, updated_at DESC",
            )
            .context("Failed to prepare knowledge query")?;

        let rows = stmt
            .query_map([], row_to_knowledge)
            .context("Failed to query knowledge")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read knowledge rows")?;
        Ok(rows)
    }

    /// Persist a correction and the knowledge records derived from it.
    /// Returns the derived records.
    pub fn learn_from_correction(
        &self,
        correction: &ItemCorrection,
    ) -> Result<Vec<KnowledgeRecord>> {
        self.save_correction(correction)?;

        let records = knowledge_from_correction(correction);
        for record in &records {
            self.upsert_knowledge(record)?;
        }
        Ok(records)
    }

    /// Wipe both tables. Useful for tests and account resets.
    pub fn clear(&self) -> Result<()> {
        self.conn
            .execute_batch("DELETE FROM item_corrections; DELETE FROM classifier_knowledge;")
            .context("Failed to clear knowledge store")
    }
}

fn row_to_correction(row: &rusqlite::Row<'_>) -> rusqlite::Result<ItemCorrection> {
    let original_category: String = row.get(4)?;
    let corrected_category: String = row.get(7)?;
    Ok(ItemCorrection {
        id: row.get(0)?,
        receipt_item_id: row.get(1)?,
        original_name: row.get(2)?,
        original_normalized_name: row.get(3)?,
        original_category: Category::from_name(&original_category).unwrap_or_default(),
        original_brand: row.get(5)?,
        corrected_normalized_name: row.get(6)?,
        corrected_category: Category::from_name(&corrected_category).unwrap_or_default(),
        corrected_brand: row.get(8)?,
    })
}

fn row_to_knowledge(row: &rusqlite::Row<'_>) -> rusqlite::Result<KnowledgeRecord> {
    let category: String = row.get(1)?;
    let source: String = row.get(4)?;
    let updated_at: String = row.get(5)?;
    Ok(KnowledgeRecord {
        pattern: row.get(0)?,
        category: Category::from_name(&category).unwrap_or_default(),
        brand: row.get(2)?,
        confidence: row.get(3)?,
        source: KnowledgeSource::from_db(&source),
        updated_at: DateTime::parse_from_rfc3339(&updated_at)
            .ok()
            .map(|ts| ts.with_timezone(&Utc)),
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_correction() -> ItemCorrection {
        ItemCorrection {
            id: None,
            receipt_item_id: "item-1".to_string(),
            original_name: "REFRIG COCA COLA 2L".to_string(),
            original_normalized_name: "Refrig Coca Cola".to_string(),
            original_category: Category::Outros,
            original_brand: None,
            corrected_normalized_name: Some("Refrigerante Coca Cola".to_string()),
            corrected_category: Category::Bebidas,
            corrected_brand: Some("Coca Cola".to_string()),
        }
    }

    #[test]
    fn test_translation_produces_two_records_when_name_corrected() {
        let records = knowledge_from_correction(&test_correction());

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].pattern, "refrigerante coca cola");
        assert_eq!(records[0].confidence, 1.0);
        assert_eq!(records[0].category, Category::Bebidas);
        assert_eq!(records[0].source, KnowledgeSource::Correction);

        // The uncorrected spelling maps to the same correction, lower confidence
        assert_eq!(records[1].pattern, "refrig coca cola");
        assert_eq!(records[1].confidence, 0.9);
        assert_eq!(records[1].category, Category::Bebidas);
    }

    #[test]
    fn test_translation_single_record_when_only_category_corrected() {
        let mut correction = test_correction();
        correction.corrected_normalized_name = None;

        let records = knowledge_from_correction(&correction);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].pattern, "refrig coca cola");
        assert_eq!(records[0].confidence, 1.0);
    }

    #[test]
    fn test_save_and_query_corrections() {
        let store = KnowledgeStore::open_in_memory().unwrap();

        let id = store.save_correction(&test_correction()).unwrap();
        assert!(id > 0);

        let found = store.corrections_for_item("item-1").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, Some(id));
        assert_eq!(found[0].corrected_category, Category::Bebidas);
        assert_eq!(found[0].original_category, Category::Outros);

        assert!(store.corrections_for_item("item-2").unwrap().is_empty());
        assert_eq!(store.all_corrections().unwrap().len(), 1);
    }

    #[test]
    fn test_upsert_inserts_then_updates() {
        let store = KnowledgeStore::open_in_memory().unwrap();

        let mut record = KnowledgeRecord {
            pattern: "arroz tio joao".to_string(),
            category: Category::Alimentacao,
            brand: Some("Tio Joao".to_string()),
            confidence: 0.9,
            source: KnowledgeSource::Correction,
            updated_at: None,
        };

        let first_id = store.upsert_knowledge(&record).unwrap();

        record.confidence = 1.0;
        record.source = KnowledgeSource::Manual;
        let second_id = store.upsert_knowledge(&record).unwrap();

        // Same key: updated in place, not duplicated
        assert_eq!(first_id, second_id);
        let all = store.all_knowledge().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].confidence, 1.0);
        assert_eq!(all[0].source, KnowledgeSource::Manual);
        assert!(all[0].updated_at.is_some());
    }

    #[test]
    fn test_upsert_treats_null_brand_as_its_own_key() {
        let store = KnowledgeStore::open_in_memory().unwrap();

        let branded = KnowledgeRecord {
            pattern: "detergente".to_string(),
            category: Category::Limpeza,
            brand: Some("Ype".to_string()),
            confidence: 1.0,
            source: KnowledgeSource::Manual,
            updated_at: None,
        };
        let unbranded = KnowledgeRecord {
            brand: None,
            ..branded.clone()
        };

        let branded_id = store.upsert_knowledge(&branded).unwrap();
        let unbranded_id = store.upsert_knowledge(&unbranded).unwrap();
        assert_ne!(branded_id, unbranded_id);

        // Upserting the NULL-brand key again must hit the NULL-brand row
        let again = store.upsert_knowledge(&unbranded).unwrap();
        assert_eq!(again, unbranded_id);
        assert_eq!(store.all_knowledge().unwrap().len(), 2);
    }

    #[test]
    fn test_learn_from_correction_persists_everything() {
        let store = KnowledgeStore::open_in_memory().unwrap();

        let records = store.learn_from_correction(&test_correction()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(store.all_corrections().unwrap().len(), 1);
        assert_eq!(store.all_knowledge().unwrap().len(), 2);

        let found = store.knowledge_for_pattern("coca cola").unwrap();
        assert_eq!(found.len(), 2);
        // Highest confidence first
        assert_eq!(found[0].confidence, 1.0);
        assert_eq!(found[1].confidence, 0.9);
    }

    #[test]
    fn test_clear() {
        let store = KnowledgeStore::open_in_memory().unwrap();
        store.learn_from_correction(&test_correction()).unwrap();

        store.clear().unwrap();
        assert!(store.all_corrections().unwrap().is_empty());
        assert!(store.all_knowledge().unwrap().is_empty());
    }
}
