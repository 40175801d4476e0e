//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json. Every read
//! is scoped to one owner.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::FinpulseError;
use crate::models::{CategoryId, Transaction, TransactionId, UserId};

use super::file_io::{lock_error, read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    #[serde(default)]
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with a category index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: category_id -> transaction_ids
    by_category: RwLock<HashMap<CategoryId, Vec<TransactionId>>>,
}

/// Newest first, ties by creation time then id
fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then(b.created_at.cmp(&a.created_at))
            .then(a.id.cmp(&b.id))
    });
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and rebuild the index
    pub fn load(&self) -> Result<(), FinpulseError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| lock_error("write", e))?;
        let mut by_category = self.by_category.write().map_err(|e| lock_error("write", e))?;

        data.clear();
        by_category.clear();

        for txn in file_data.transactions {
            by_category.entry(txn.category_id).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), FinpulseError> {
        let data = self.data.read().map_err(|e| lock_error("read", e))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut transactions);

        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    /// Get one of `owner`'s transactions
    pub fn get(&self, owner: UserId, id: TransactionId) -> Result<Option<Transaction>, FinpulseError> {
        let data = self.data.read().map_err(|e| lock_error("read", e))?;
        Ok(data.get(&id).filter(|t| t.owner == owner).cloned())
    }

    /// All of `owner`'s transactions, newest first
    pub fn list(&self, owner: UserId) -> Result<Vec<Transaction>, FinpulseError> {
        let data = self.data.read().map_err(|e| lock_error("read", e))?;

        let mut transactions: Vec<_> = data.values().filter(|t| t.owner == owner).cloned().collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    pub fn get_by_category(
        &self,
        owner: UserId,
        category_id: CategoryId,
    ) -> Result<Vec<Transaction>, FinpulseError> {
        let data = self.data.read().map_err(|e| lock_error("read", e))?;
        let by_category = self.by_category.read().map_err(|e| lock_error("read", e))?;

        let ids = by_category.get(&category_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids
            .iter()
            .filter_map(|id| data.get(id))
            .filter(|t| t.owner == owner)
            .cloned()
            .collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// `owner`'s transactions dated within `[start, end]`
    pub fn get_by_date_range(
        &self,
        owner: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, FinpulseError> {
        Ok(self
            .list(owner)?
            .into_iter()
            .filter(|t| t.date >= start && t.date <= end)
            .collect())
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), FinpulseError> {
        let mut data = self.data.write().map_err(|e| lock_error("write", e))?;
        let mut by_category = self.by_category.write().map_err(|e| lock_error("write", e))?;

        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = by_category.get_mut(&old.category_id) {
                ids.retain(|&id| id != txn.id);
            }
        }

        by_category.entry(txn.category_id).or_default().push(txn.id);
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Delete one of `owner`'s transactions, returning it if it existed
    pub fn delete(&self, owner: UserId, id: TransactionId) -> Result<Option<Transaction>, FinpulseError> {
        Ok(self.delete_many(owner, &[id])?.into_iter().next())
    }

    /// Delete several of `owner`'s transactions; ids that don't resolve are ignored
    pub fn delete_many(
        &self,
        owner: UserId,
        ids: &[TransactionId],
    ) -> Result<Vec<Transaction>, FinpulseError> {
        let mut data = self.data.write().map_err(|e| lock_error("write", e))?;
        let mut by_category = self.by_category.write().map_err(|e| lock_error("write", e))?;

        let mut removed = Vec::new();
        for id in ids {
            let owned = data.get(id).is_some_and(|t| t.owner == owner);
            if !owned {
                continue;
            }
            if let Some(txn) = data.remove(id) {
                if let Some(list) = by_category.get_mut(&txn.category_id) {
                    list.retain(|tid| tid != id);
                }
                removed.push(txn);
            }
        }

        Ok(removed)
    }

    /// Number of transactions across all owners
    pub fn count(&self) -> Result<usize, FinpulseError> {
        let data = self.data.read().map_err(|e| lock_error("read", e))?;
        Ok(data.len())
    }
}
