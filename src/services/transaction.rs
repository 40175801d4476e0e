//! Transaction service
//!
//! CRUD for transactions, the bulk operations, and the pure filter/sort used
//! by listings.

use chrono::NaiveDate;
use std::cmp::Ordering;
use tracing::info;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{FinpulseError, FinpulseResult};
use crate::models::{
    Category, CategoryId, DateRange, Money, Transaction, TransactionId, TransactionKind, UserId,
};
use crate::storage::{snapshot_diff, Storage};

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
    owner: UserId,
}

/// Ordering of listed transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransactionSort {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

impl TransactionSort {
    /// Compare two transactions; ties fall back to creation time, then id
    pub fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        let primary = match self {
            Self::DateDesc => b.date.cmp(&a.date),
            Self::DateAsc => a.date.cmp(&b.date),
            Self::AmountDesc => b.amount.cmp(&a.amount),
            Self::AmountAsc => a.amount.cmp(&b.amount),
        };
        primary
            .then(a.created_at.cmp(&b.created_at))
            .then(a.id.cmp(&b.id))
    }
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub category_id: Option<CategoryId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Every tag listed here must be present
    pub tags: Vec<String>,
    /// Case-insensitive text matched against the note and the tags
    pub search: Option<String>,
    pub min_amount: Option<Money>,
    pub max_amount: Option<Money>,
    pub sort: TransactionSort,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn date_range(mut self, range: DateRange) -> Self {
        self.start_date = Some(range.start);
        self.end_date = Some(range.end);
        self
    }

    pub fn since(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn until(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into()).filter(|s: &String| !s.trim().is_empty());
        self
    }

    pub fn amount_between(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }

    pub fn sort(mut self, sort: TransactionSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        if self.kind.is_some_and(|k| txn.kind() != k) {
            return false;
        }
        if self.category_id.is_some_and(|c| txn.category_id != c) {
            return false;
        }
        if self.start_date.is_some_and(|d| txn.date < d) || self.end_date.is_some_and(|d| txn.date > d) {
            return false;
        }
        if self.min_amount.is_some_and(|m| txn.amount < m) || self.max_amount.is_some_and(|m| txn.amount > m) {
            return false;
        }
        if !self.tags.iter().all(|t| txn.has_tag(t)) {
            return false;
        }
        if let Some(text) = &self.search {
            let needle = text.trim().to_lowercase();
            let in_note = txn
                .note
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&needle));
            let in_tags = txn.tags.iter().any(|t| t.to_lowercase().contains(&needle));
            if !in_note && !in_tags {
                return false;
            }
        }
        true
    }

    /// Matching transactions, sorted and truncated to the limit
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        let mut result: Vec<Transaction> = transactions
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect();

        result.sort_by(|a, b| self.sort.compare(a, b));

        if let Some(limit) = self.limit {
            result.truncate(limit);
        }
        result
    }
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub category_id: CategoryId,
    pub amount: Money,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub tags: Vec<String>,
}

/// Changes to apply to an existing transaction; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub category_id: Option<CategoryId>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    /// `Some(None)` clears the note
    pub note: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage, owner: UserId) -> Self {
        Self { storage, owner }
    }

    /// Create a new transaction
    pub fn create(&self, input: NewTransaction) -> FinpulseResult<Transaction> {
        let category = self.require_category(input.category_id)?;

        let mut txn = Transaction::new(self.owner, input.kind, category.id, input.amount, input.date)
            .with_tags(&input.tags);
        if let Some(note) = input.note {
            txn.set_note(Some(note));
        }

        Self::check(&txn, &category)?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            txn.note.clone(),
            &txn,
        )?;
        info!(
            transaction_id = %txn.id,
            kind = %txn.kind(),
            amount = %txn.amount,
            category = %category.name,
            "Created transaction"
        );

        Ok(txn)
    }

    pub fn get(&self, id: TransactionId) -> FinpulseResult<Option<Transaction>> {
        self.storage.transactions.get(self.owner, id)
    }

    /// Find a transaction by (a prefix of) its ID
    pub fn find(&self, identifier: &str) -> FinpulseResult<Option<Transaction>> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self.get(id);
        }

        let mut matches = self
            .storage
            .transactions
            .list(self.owner)?
            .into_iter()
            .filter(|t| t.id.matches_str(identifier));

        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(Some(txn)),
            (None, _) => Ok(None),
            (Some(_), Some(_)) => Err(FinpulseError::Validation(format!(
                "Transaction ID '{}' is ambiguous",
                identifier
            ))),
        }
    }

    pub fn resolve(&self, identifier: &str) -> FinpulseResult<Transaction> {
        self.find(identifier)?
            .ok_or_else(|| FinpulseError::transaction_not_found(identifier))
    }

    pub fn list(&self, filter: &TransactionFilter) -> FinpulseResult<Vec<Transaction>> {
        Ok(filter.apply(&self.storage.transactions.list(self.owner)?))
    }

    /// Apply `patch`; the transaction's kind never changes
    pub fn update(&self, id: TransactionId, patch: TransactionPatch) -> FinpulseResult<Transaction> {
        let mut txn = self.require(id)?;
        let before = txn.clone();

        let category_id = patch.category_id.unwrap_or(txn.category_id);
        let category = self.require_category(category_id)?;

        if category_id != txn.category_id {
            txn.set_category(category_id);
        }
        if let Some(amount) = patch.amount {
            txn.amount = amount;
        }
        if let Some(date) = patch.date {
            txn.date = date;
        }
        if let Some(note) = patch.note {
            txn.set_note(note);
        }
        if let Some(tags) = patch.tags {
            txn.set_tags(tags);
        }

        Self::check(&txn, &category)?;

        if txn == before {
            return Ok(txn);
        }
        txn.updated_at = chrono::Utc::now();

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_update(
            EntityType::Transaction,
            txn.id.to_string(),
            txn.note.clone(),
            &before,
            &txn,
        )?;
        info!(transaction_id = %txn.id, "Updated transaction");

        Ok(txn)
    }

    pub fn delete(&self, id: TransactionId) -> FinpulseResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .delete(self.owner, id)?
            .ok_or_else(|| FinpulseError::transaction_not_found(id.to_string()))?;
        self.storage.transactions.save()?;

        self.storage.log_delete(
            EntityType::Transaction,
            txn.id.to_string(),
            txn.note.clone(),
            &txn,
        )?;
        info!(transaction_id = %txn.id, "Deleted transaction");

        Ok(txn)
    }

    /// Delete every listed transaction the user owns; unknown IDs are skipped
    pub fn bulk_delete(&self, ids: &[TransactionId]) -> FinpulseResult<Vec<Transaction>> {
        let deleted = self.storage.transactions.delete_many(self.owner, ids)?;
        if deleted.is_empty() {
            return Ok(deleted);
        }
        self.storage.transactions.save()?;

        let entries: Vec<AuditEntry> = deleted
            .iter()
            .map(|t| AuditEntry::delete(EntityType::Transaction, t.id.to_string(), t.note.clone(), t))
            .collect();
        self.storage.audit().log_batch(&entries)?;
        info!(requested = ids.len(), deleted = deleted.len(), "Bulk deleted transactions");

        Ok(deleted)
    }

    /// Move every listed transaction to `category_id`
    ///
    /// All-or-nothing: an unknown ID or a transaction whose kind differs from
    /// the category's leaves everything unchanged.
    pub fn bulk_recategorize(
        &self,
        ids: &[TransactionId],
        category_id: CategoryId,
    ) -> FinpulseResult<Vec<Transaction>> {
        let category = self.require_category(category_id)?;

        let mut originals = Vec::with_capacity(ids.len());
        for id in ids {
            let txn = self.require(*id)?;
            txn.validate_category(&category)
                .map_err(|e| FinpulseError::Validation(format!("{}: {}", txn.id, e)))?;
            originals.push(txn);
        }

        let mut updated = Vec::with_capacity(originals.len());
        let mut entries = Vec::new();
        for before in &originals {
            if before.category_id == category_id {
                updated.push(before.clone());
                continue;
            }
            let mut txn = before.clone();
            txn.set_category(category_id);
            self.storage.transactions.upsert(txn.clone())?;
            entries.push(AuditEntry::update(
                EntityType::Transaction,
                txn.id.to_string(),
                txn.note.clone(),
                before,
                &txn,
                snapshot_diff(before, &txn),
            ));
            updated.push(txn);
        }

        if !entries.is_empty() {
            self.storage.transactions.save()?;
            self.storage.audit().log_batch(&entries)?;
        }
        info!(
            count = entries.len(),
            category = %category.name,
            "Recategorized transactions"
        );

        Ok(updated)
    }

    fn require(&self, id: TransactionId) -> FinpulseResult<Transaction> {
        self.get(id)?
            .ok_or_else(|| FinpulseError::transaction_not_found(id.to_string()))
    }

    fn require_category(&self, id: CategoryId) -> FinpulseResult<Category> {
        self.storage
            .categories
            .get(self.owner, id)?
            .ok_or_else(|| FinpulseError::category_not_found(id.to_string()))
    }

    fn check(txn: &Transaction, category: &Category) -> FinpulseResult<()> {
        txn.validate()
            .and_then(|_| txn.validate_category(category))
            .map_err(|e| FinpulseError::Validation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::FinpulsePaths;
    use tempfile::TempDir;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    struct Fixture {
        _temp_dir: TempDir,
        storage: Storage,
        owner: UserId,
        food: Category,
        fuel: Category,
        salary: Category,
    }

    impl Fixture {
        fn new() -> Self {
            let temp_dir = TempDir::new().unwrap();
            let paths = FinpulsePaths::with_base_dir(temp_dir.path().to_path_buf());
            let storage = Storage::open(paths).unwrap();
            let owner = UserId::new();

            let food = Category::new(owner, "Food", TransactionKind::Expense);
            let fuel = Category::new(owner, "Fuel", TransactionKind::Expense);
            let salary = Category::new(owner, "Salary", TransactionKind::Income);
            for c in [&food, &fuel, &salary] {
                storage.categories.upsert(c.clone()).unwrap();
            }

            Self {
                _temp_dir: temp_dir,
                storage,
                owner,
                food,
                fuel,
                salary,
            }
        }

        fn service(&self) -> TransactionService<'_> {
            TransactionService::new(&self.storage, self.owner)
        }

        fn add(&self, kind: TransactionKind, category: &Category, units: i64, day: u32) -> Transaction {
            self.service()
                .create(NewTransaction {
                    kind,
                    category_id: category.id,
                    amount: Money::from_units(units),
                    date: date(day),
                    note: None,
                    tags: Vec::new(),
                })
                .unwrap()
        }
    }

    #[test]
    fn test_create_validates_amount_and_category_kind() {
        let fx = Fixture::new();
        let service = fx.service();
        let input = NewTransaction {
            kind: TransactionKind::Expense,
            category_id: fx.salary.id,
            amount: Money::from_units(10),
            date: date(1),
            note: Some("lunch".into()),
            tags: vec!["work".into()],
        };

        let err = service.create(input.clone()).unwrap_err();
        assert!(err.is_validation());

        let err = service
            .create(NewTransaction {
                category_id: fx.food.id,
                amount: Money::zero(),
                ..input.clone()
            })
            .unwrap_err();
        assert!(err.is_validation());

        let txn = service
            .create(NewTransaction {
                category_id: fx.food.id,
                ..input
            })
            .unwrap();
        assert_eq!(txn.note.as_deref(), Some("lunch"));
        assert!(txn.has_tag("work"));
        assert_eq!(fx.storage.audit().read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_create_rejects_foreign_category() {
        let fx = Fixture::new();
        let stranger = TransactionService::new(&fx.storage, UserId::new());

        let err = stranger
            .create(NewTransaction {
                kind: TransactionKind::Expense,
                category_id: fx.food.id,
                amount: Money::from_units(5),
                date: date(1),
                note: None,
                tags: Vec::new(),
            })
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_patch() {
        let fx = Fixture::new();
        let txn = fx.add(TransactionKind::Expense, &fx.food, 20, 4);
        let service = fx.service();

        let updated = service
            .update(
                txn.id,
                TransactionPatch {
                    category_id: Some(fx.fuel.id),
                    amount: Some(Money::from_units(25)),
                    note: Some(Some("refill".into())),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.category_id, fx.fuel.id);
        assert_eq!(updated.amount, Money::from_units(25));
        assert_eq!(updated.kind(), TransactionKind::Expense);

        let err = service
            .update(
                txn.id,
                TransactionPatch {
                    category_id: Some(fx.salary.id),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.get(txn.id).unwrap().unwrap().category_id, fx.fuel.id);

        let entries = fx.storage.audit().read_all().unwrap();
        assert_eq!(entries.last().unwrap().operation, Operation::Update);
    }

    #[test]
    fn test_bulk_recategorize_is_all_or_nothing() {
        let fx = Fixture::new();
        let a = fx.add(TransactionKind::Expense, &fx.food, 10, 1);
        let b = fx.add(TransactionKind::Expense, &fx.food, 12, 2);
        let pay = fx.add(TransactionKind::Income, &fx.salary, 3000, 3);
        let service = fx.service();

        let err = service
            .bulk_recategorize(&[a.id, pay.id, b.id], fx.fuel.id)
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.get(a.id).unwrap().unwrap().category_id, fx.food.id);

        let moved = service.bulk_recategorize(&[a.id, b.id], fx.fuel.id).unwrap();
        assert_eq!(moved.len(), 2);
        assert!(moved.iter().all(|t| t.category_id == fx.fuel.id));

        let updates = fx
            .storage
            .audit()
            .read_all()
            .unwrap()
            .into_iter()
            .filter(|e| e.operation == Operation::Update)
            .count();
        assert_eq!(updates, 2);
    }

    #[test]
    fn test_bulk_delete_skips_unknown_ids() {
        let fx = Fixture::new();
        let a = fx.add(TransactionKind::Expense, &fx.food, 10, 1);
        let b = fx.add(TransactionKind::Expense, &fx.food, 12, 2);
        let service = fx.service();

        let deleted = service.bulk_delete(&[a.id, TransactionId::new(), b.id]).unwrap();
        assert_eq!(deleted.len(), 2);
        assert!(service.list(&TransactionFilter::new()).unwrap().is_empty());
        assert!(service.delete(a.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_find_by_prefix() {
        let fx = Fixture::new();
        let txn = fx.add(TransactionKind::Expense, &fx.food, 10, 1);
        let service = fx.service();

        assert_eq!(service.resolve(&txn.id.to_string()).unwrap().id, txn.id);
        assert_eq!(service.resolve(&txn.id.as_uuid().to_string()).unwrap().id, txn.id);
        assert!(service.resolve("txn-00000000").unwrap_err().is_not_found());
    }

    #[test]
    fn test_filter_and_sort() {
        let owner = UserId::new();
        let food = CategoryId::new();
        let txns = vec![
            Transaction::new(owner, TransactionKind::Expense, food, Money::from_units(30), date(5))
                .with_note("Weekly groceries")
                .with_tags(["home", "food"]),
            Transaction::new(owner, TransactionKind::Expense, food, Money::from_units(8), date(9))
                .with_tags(["food"]),
            Transaction::new(owner, TransactionKind::Income, CategoryId::new(), Money::from_units(500), date(1)),
        ];

        let expenses = TransactionFilter::new().kind(TransactionKind::Expense).apply(&txns);
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].date, date(9));

        let by_amount = TransactionFilter::new().sort(TransactionSort::AmountDesc).limit(2).apply(&txns);
        assert_eq!(by_amount[0].amount, Money::from_units(500));
        assert_eq!(by_amount.len(), 2);

        assert_eq!(TransactionFilter::new().tag("food").tag("home").apply(&txns).len(), 1);
        assert_eq!(TransactionFilter::new().search("GROCER").apply(&txns).len(), 1);
        assert_eq!(TransactionFilter::new().search("foo").apply(&txns).len(), 2);
        assert_eq!(
            TransactionFilter::new()
                .amount_between(Some(Money::from_units(10)), Some(Money::from_units(100)))
                .apply(&txns)
                .len(),
            1
        );
        assert_eq!(
            TransactionFilter::new()
                .date_range(DateRange::new(date(2), date(6)).unwrap())
                .apply(&txns)
                .len(),
            1
        );
    }
}
