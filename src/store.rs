// 🗄️ Record Store - sole owner of the persisted document
//
// Load once on construction, rewrite the whole document after every mutation.
// Persistence failures never reach the caller: they are logged and the
// in-memory document stays authoritative for the session.
//
// Stored records that no longer fit their typed shape are held aside as raw
// JSON and written back untouched, so one bad record never costs the rest.

use crate::config::{open_storage, StoreConfig, DEFAULT_STORAGE_KEY};
use crate::document::{AppData, LoadedDocument, UnparsedRecord};
use crate::entities::{
    BankCard, CreditCard, CreditScore, Debt, DerogatoryMark, Entity, EntityKind,
};
use crate::error::StoreError;
use crate::storage::KeyValueStorage;
use crate::summary::{self, DebtSummary, FeeSummary, FinancialSummary};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, error, info, warn};

pub struct DataStore<S: KeyValueStorage = Box<dyn KeyValueStorage>> {
    storage: S,
    key: String,
    data: AppData,
    unparsed: Vec<UnparsedRecord>,
}

impl DataStore {
    /// Open the backend named by `config` and load the document from it
    pub fn open(config: &StoreConfig) -> anyhow::Result<Self> {
        let storage = open_storage(config)?;
        Ok(DataStore::with_key(storage, config.storage_key.clone()))
    }
}

impl<S: KeyValueStorage> DataStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        let mut storage = storage;
        let key = key.into();
        let loaded = load_data(&mut storage, &key);
        DataStore {
            storage,
            key,
            data: loaded.data,
            unparsed: loaded.unparsed,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.data.last_updated
    }

    /// Stored records that did not parse; kept in storage, invisible to the typed API
    pub fn unparsed_records(&self) -> &[UnparsedRecord] {
        &self.unparsed
    }

    fn save_data(&mut self) {
        self.data.touch();

        let json = match self
            .data
            .to_value_with(&self.unparsed)
            .and_then(|value| serde_json::to_string(&value))
        {
            Ok(json) => json,
            Err(e) => {
                error!(key = %self.key, error = %e, "failed to serialize document");
                return;
            }
        };

        match self.storage.set(&self.key, &json) {
            Ok(()) => debug!(key = %self.key, bytes = json.len(), "document saved"),
            Err(e) => error!(key = %self.key, error = %e, "failed to save document"),
        }
    }

    // ========================================================================
    // GENERIC ENTITY OPERATIONS
    // ========================================================================

    /// Live collection, in insertion order
    pub fn list<T: EntityKind>(&self) -> &[Entity<T>] {
        T::collection(&self.data)
    }

    pub fn find<T: EntityKind>(&self, id: &str) -> Option<&Entity<T>> {
        T::collection(&self.data).iter().find(|e| e.id == id)
    }

    /// Assign a fresh identity, append, persist
    pub fn add<T: EntityKind>(&mut self, value: T) -> Entity<T> {
        let entity = Entity::new(value);
        T::collection_mut(&mut self.data).push(entity.clone());
        self.save_data();
        info!(kind = T::KIND, id = %entity.id, "record added");
        entity
    }

    /// Shallow-merge `patch` (a JSON object of camelCase fields) over the
    /// record with `id`.
    ///
    /// `null` clears an optional field. An `id` key is ignored. Returns
    /// `Ok(None)` without writing when no record has `id`.
    pub fn update<T: EntityKind>(
        &mut self,
        id: &str,
        patch: Value,
    ) -> Result<Option<Entity<T>>, StoreError> {
        let Some(index) = T::collection(&self.data).iter().position(|e| e.id == id) else {
            debug!(kind = T::KIND, id, "update: record not found");
            return Ok(None);
        };

        let merged = merge_patch(&T::collection(&self.data)[index], patch)?;
        T::collection_mut(&mut self.data)[index] = merged.clone();
        self.save_data();
        info!(kind = T::KIND, id, "record updated");
        Ok(Some(merged))
    }

    /// Remove the record with `id`; returns whether one was removed
    pub fn delete<T: EntityKind>(&mut self, id: &str) -> bool {
        let collection = T::collection_mut(&mut self.data);
        let Some(index) = collection.iter().position(|e| e.id == id) else {
            debug!(kind = T::KIND, id, "delete: record not found");
            return false;
        };

        collection.remove(index);
        self.save_data();
        info!(kind = T::KIND, id, "record deleted");
        true
    }

    // ========================================================================
    // CREDIT SCORES
    // ========================================================================

    pub fn credit_scores(&self) -> &[Entity<CreditScore>] {
        self.list()
    }

    pub fn add_credit_score(&mut self, score: CreditScore) -> Entity<CreditScore> {
        self.add(score)
    }

    pub fn update_credit_score(
        &mut self,
        id: &str,
        patch: Value,
    ) -> Result<Option<Entity<CreditScore>>, StoreError> {
        self.update(id, patch)
    }

    pub fn delete_credit_score(&mut self, id: &str) -> bool {
        self.delete::<CreditScore>(id)
    }

    // ========================================================================
    // CREDIT CARDS
    // ========================================================================

    pub fn credit_cards(&self) -> &[Entity<CreditCard>] {
        self.list()
    }

    pub fn add_credit_card(&mut self, card: CreditCard) -> Entity<CreditCard> {
        self.add(card)
    }

    pub fn update_credit_card(
        &mut self,
        id: &str,
        patch: Value,
    ) -> Result<Option<Entity<CreditCard>>, StoreError> {
        self.update(id, patch)
    }

    pub fn delete_credit_card(&mut self, id: &str) -> bool {
        self.delete::<CreditCard>(id)
    }

    // ========================================================================
    // BANK CARDS
    // ========================================================================

    pub fn bank_cards(&self) -> &[Entity<BankCard>] {
        self.list()
    }

    pub fn add_bank_card(&mut self, card: BankCard) -> Entity<BankCard> {
        self.add(card)
    }

    pub fn update_bank_card(
        &mut self,
        id: &str,
        patch: Value,
    ) -> Result<Option<Entity<BankCard>>, StoreError> {
        self.update(id, patch)
    }

    pub fn delete_bank_card(&mut self, id: &str) -> bool {
        self.delete::<BankCard>(id)
    }

    // ========================================================================
    // DEBTS
    // ========================================================================

    pub fn debts(&self) -> &[Entity<Debt>] {
        self.list()
    }

    pub fn add_debt(&mut self, debt: Debt) -> Entity<Debt> {
        self.add(debt)
    }

    pub fn update_debt(
        &mut self,
        id: &str,
        patch: Value,
    ) -> Result<Option<Entity<Debt>>, StoreError> {
        self.update(id, patch)
    }

    pub fn delete_debt(&mut self, id: &str) -> bool {
        self.delete::<Debt>(id)
    }

    // ========================================================================
    // DEROGATORY MARKS
    // ========================================================================

    pub fn derogatory_marks(&self) -> &[Entity<DerogatoryMark>] {
        self.list()
    }

    pub fn add_derogatory_mark(&mut self, mark: DerogatoryMark) -> Entity<DerogatoryMark> {
        self.add(mark)
    }

    pub fn update_derogatory_mark(
        &mut self,
        id: &str,
        patch: Value,
    ) -> Result<Option<Entity<DerogatoryMark>>, StoreError> {
        self.update(id, patch)
    }

    pub fn delete_derogatory_mark(&mut self, id: &str) -> bool {
        self.delete::<DerogatoryMark>(id)
    }

    // ========================================================================
    // WHOLE-DOCUMENT OPERATIONS
    // ========================================================================

    /// Full copy of the current document
    pub fn export_data(&self) -> AppData {
        self.data.clone()
    }

    /// Replace the whole document (no merge) and persist
    pub fn import_data(&mut self, data: AppData) {
        self.data = data;
        self.unparsed.clear();
        self.save_data();
        info!(records = self.data.record_count(), "document imported");
    }

    /// Backup text, unparsed records included
    pub fn export_json(&self) -> Result<String, StoreError> {
        let value = self.data.to_value_with(&self.unparsed)?;
        Ok(serde_json::to_string_pretty(&value)?)
    }

    /// Parse a backup and import it, record by record.
    ///
    /// A backup that is not a document at all leaves the store as is.
    pub fn import_json(&mut self, json: &str) -> Result<(), StoreError> {
        let loaded = LoadedDocument::parse(json).map_err(StoreError::MalformedImport)?;
        if !loaded.unparsed.is_empty() {
            warn!(count = loaded.unparsed.len(), "import kept records that do not parse");
        }
        self.data = loaded.data;
        self.unparsed = loaded.unparsed;
        self.save_data();
        info!(records = self.data.record_count(), "document imported");
        Ok(())
    }

    /// Reset to an empty document and persist
    pub fn clear_all_data(&mut self) {
        self.data = AppData::empty();
        self.unparsed.clear();
        self.save_data();
        warn!(key = %self.key, "all data cleared");
    }

    // ========================================================================
    // SUMMARIES
    // ========================================================================

    pub fn financial_summary(&self) -> FinancialSummary {
        FinancialSummary::from_data(&self.data)
    }

    pub fn fee_summary(&self) -> FeeSummary {
        FeeSummary::from_data(&self.data)
    }

    pub fn debt_summary(&self) -> DebtSummary {
        DebtSummary::from_data(&self.data)
    }

    pub fn score_history(&self) -> Vec<Entity<CreditScore>> {
        summary::score_history(&self.data)
    }
}

/// Read and parse the stored document, falling back to an empty one.
///
/// Text that is not a document at all is copied to `<key>.corrupt` first, so
/// the next save cannot destroy the only copy.
fn load_data<S: KeyValueStorage>(storage: &mut S, key: &str) -> LoadedDocument {
    let empty = || LoadedDocument {
        data: AppData::empty(),
        unparsed: Vec::new(),
    };

    let stored = match storage.get(key) {
        Ok(Some(stored)) => stored,
        Ok(None) => {
            info!(key, "no stored document, starting empty");
            return empty();
        }
        Err(e) => {
            error!(key, error = %e, "failed to read stored document, starting empty");
            return empty();
        }
    };

    match LoadedDocument::parse(&stored) {
        Ok(loaded) => {
            for record in &loaded.unparsed {
                error!(
                    key,
                    collection = record.collection,
                    reason = %record.reason,
                    "stored record does not parse, keeping it as-is"
                );
            }
            info!(
                key,
                records = loaded.data.record_count(),
                unparsed = loaded.unparsed.len(),
                "document loaded"
            );
            loaded
        }
        Err(e) => {
            let backup_key = corrupt_key(key);
            error!(key, backup = %backup_key, error = %e, "stored document is malformed, starting empty");
            if let Err(e) = storage.set(&backup_key, &stored) {
                error!(key = %backup_key, error = %e, "failed to back up malformed document");
            }
            empty()
        }
    }
}

/// Where a malformed document is set aside before it can be overwritten
pub fn corrupt_key(key: &str) -> String {
    format!("{}.corrupt", key)
}

fn merge_patch<T: EntityKind>(entity: &Entity<T>, patch: Value) -> Result<Entity<T>, StoreError> {
    let Value::Object(fields) = patch else {
        return Err(StoreError::invalid_patch(T::KIND, "patch must be a JSON object"));
    };

    let mut merged = serde_json::to_value(entity)?;
    let Some(target) = merged.as_object_mut() else {
        return Err(StoreError::invalid_patch(T::KIND, "record did not serialize to an object"));
    };

    for (field, value) in fields {
        if field == "id" {
            continue;
        }
        if value.is_null() {
            target.remove(&field);
        } else {
            target.insert(field, value);
        }
    }

    serde_json::from_value(merged).map_err(|e| StoreError::invalid_patch(T::KIND, e.to_string()))
}
