//! Category service
//!
//! Creation, lookup, renaming and (de)activation of a user's categories.

use tracing::info;

use crate::audit::EntityType;
use crate::error::{FinpulseError, FinpulseResult};
use crate::models::{Category, CategoryId, TransactionKind, UserId};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
    owner: UserId,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage, owner: UserId) -> Self {
        Self { storage, owner }
    }

    /// Create a new category
    ///
    /// Names are unique per owner and kind, compared case-insensitively.
    pub fn create(&self, name: &str, kind: TransactionKind) -> FinpulseResult<Category> {
        let name = name.trim();
        let category = Category::new(self.owner, name, kind);
        category
            .validate()
            .map_err(|e| FinpulseError::Validation(e.to_string()))?;

        if self
            .storage
            .categories
            .get_by_name(self.owner, name, Some(kind))?
            .is_some()
        {
            return Err(FinpulseError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;
        info!(category_id = %category.id, name = %category.name, kind = %kind, "Created category");

        Ok(category)
    }

    pub fn get(&self, id: CategoryId) -> FinpulseResult<Option<Category>> {
        self.storage.categories.get(self.owner, id)
    }

    /// Find a category by name or ID string
    pub fn find(&self, identifier: &str) -> FinpulseResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_name(self.owner, identifier, None)? {
            return Ok(Some(category));
        }

        Ok(self
            .list()?
            .into_iter()
            .find(|c| c.id.matches_str(identifier)))
    }

    /// Like `find`, but a missing category is an error
    pub fn resolve(&self, identifier: &str) -> FinpulseResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| FinpulseError::category_not_found(identifier))
    }

    pub fn list(&self) -> FinpulseResult<Vec<Category>> {
        self.storage.categories.list(self.owner)
    }

    pub fn list_active(&self) -> FinpulseResult<Vec<Category>> {
        Ok(self.list()?.into_iter().filter(|c| c.active).collect())
    }

    pub fn rename(&self, id: CategoryId, name: &str) -> FinpulseResult<Category> {
        let mut category = self.require(id)?;
        let before = category.clone();
        let name = name.trim();

        if let Some(existing) = self
            .storage
            .categories
            .get_by_name(self.owner, name, Some(category.kind))?
        {
            if existing.id != id {
                return Err(FinpulseError::Duplicate {
                    entity_type: "Category",
                    identifier: name.to_string(),
                });
            }
        }

        category.rename(name);
        category
            .validate()
            .map_err(|e| FinpulseError::Validation(e.to_string()))?;

        self.persist_update(&before, &category)?;
        info!(category_id = %id, from = %before.name, to = %category.name, "Renamed category");

        Ok(category)
    }

    /// Activate or deactivate a category; history keeps pointing at it either way
    pub fn set_active(&self, id: CategoryId, active: bool) -> FinpulseResult<Category> {
        let mut category = self.require(id)?;
        if category.active == active {
            return Ok(category);
        }

        let before = category.clone();
        category.set_active(active);

        self.persist_update(&before, &category)?;
        info!(category_id = %id, active, "Changed category state");

        Ok(category)
    }

    fn require(&self, id: CategoryId) -> FinpulseResult<Category> {
        self.get(id)?
            .ok_or_else(|| FinpulseError::category_not_found(id.to_string()))
    }

    fn persist_update(&self, before: &Category, after: &Category) -> FinpulseResult<()> {
        self.storage.categories.upsert(after.clone())?;
        self.storage.categories.save()?;
        self.storage.log_update(
            EntityType::Category,
            after.id.to_string(),
            Some(after.name.clone()),
            before,
            after,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FinpulsePaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinpulsePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_and_find() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage, UserId::new());

        let food = service.create("  Food ", TransactionKind::Expense).unwrap();
        assert_eq!(food.name, "Food");

        assert_eq!(service.find("food").unwrap().unwrap().id, food.id);
        assert_eq!(service.find(&food.id.to_string()).unwrap().unwrap().id, food.id);
        assert!(service.find("nothing").unwrap().is_none());
        assert!(service.resolve("nothing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_duplicate_names_are_per_kind() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage, UserId::new());

        service.create("Gifts", TransactionKind::Expense).unwrap();
        assert!(service.create("Gifts", TransactionKind::Income).is_ok());
        assert!(matches!(
            service.create("GIFTS", TransactionKind::Expense),
            Err(FinpulseError::Duplicate { .. })
        ));
        assert!(service.create("   ", TransactionKind::Expense).unwrap_err().is_validation());
    }

    #[test]
    fn test_users_are_isolated() {
        let (_temp_dir, storage) = create_test_storage();
        let alice = CategoryService::new(&storage, UserId::new());
        let bob = CategoryService::new(&storage, UserId::new());

        let food = alice.create("Food", TransactionKind::Expense).unwrap();
        assert!(bob.get(food.id).unwrap().is_none());
        assert!(bob.find("Food").unwrap().is_none());
        assert!(bob.create("Food", TransactionKind::Expense).is_ok());
    }

    #[test]
    fn test_rename_and_deactivate_are_audited() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage, UserId::new());

        let food = service.create("Food", TransactionKind::Expense).unwrap();
        service.create("Dining", TransactionKind::Expense).unwrap();

        assert!(service.rename(food.id, "dining").is_err());
        let renamed = service.rename(food.id, "Groceries").unwrap();
        assert_eq!(renamed.name, "Groceries");

        service.set_active(food.id, false).unwrap();
        assert_eq!(service.list().unwrap().len(), 2);
        assert_eq!(service.list_active().unwrap().len(), 1);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 4);
        assert!(entries[2].diff_summary.as_deref().unwrap().contains("name"));
    }
}
