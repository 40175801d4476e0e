//! Category repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinpulseError;
use crate::models::{Category, CategoryId, TransactionKind, UserId};

use super::file_io::{lock_error, read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    #[serde(default)]
    categories: Vec<Category>,
}

pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), FinpulseError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut categories = self.categories.write().map_err(|e| lock_error("write", e))?;
        categories.clear();
        for category in file_data.categories {
            categories.insert(category.id, category);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), FinpulseError> {
        let categories = self.categories.read().map_err(|e| lock_error("read", e))?;

        let mut list: Vec<_> = categories.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        write_json_atomic(&self.path, &CategoryData { categories: list })
    }

    pub fn get(&self, owner: UserId, id: CategoryId) -> Result<Option<Category>, FinpulseError> {
        let categories = self.categories.read().map_err(|e| lock_error("read", e))?;
        Ok(categories.get(&id).filter(|c| c.owner == owner).cloned())
    }

    /// `owner`'s categories, income first, then by name
    pub fn list(&self, owner: UserId) -> Result<Vec<Category>, FinpulseError> {
        let categories = self.categories.read().map_err(|e| lock_error("read", e))?;

        let mut list: Vec<_> = categories.values().filter(|c| c.owner == owner).cloned().collect();
        list.sort_by(|a, b| {
            a.kind
                .cmp(&b.kind)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
                .then(a.id.cmp(&b.id))
        });
        Ok(list)
    }

    /// Find by name (case-insensitive), optionally restricted to one kind
    pub fn get_by_name(
        &self,
        owner: UserId,
        name: &str,
        kind: Option<TransactionKind>,
    ) -> Result<Option<Category>, FinpulseError> {
        let name = name.trim().to_lowercase();
        Ok(self
            .list(owner)?
            .into_iter()
            .find(|c| c.name.to_lowercase() == name && kind.map_or(true, |k| k == c.kind)))
    }

    pub fn upsert(&self, category: Category) -> Result<(), FinpulseError> {
        let mut categories = self.categories.write().map_err(|e| lock_error("write", e))?;
        categories.insert(category.id, category);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_is_owner_scoped_and_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let repo = CategoryRepository::new(temp_dir.path().join("categories.json"));
        repo.load().unwrap();

        let owner = UserId::new();
        repo.upsert(Category::new(owner, "rent", TransactionKind::Expense)).unwrap();
        repo.upsert(Category::new(owner, "Food", TransactionKind::Expense)).unwrap();
        repo.upsert(Category::new(owner, "Salary", TransactionKind::Income)).unwrap();
        repo.upsert(Category::new(UserId::new(), "Other", TransactionKind::Expense))
            .unwrap();

        let names: Vec<_> = repo.list(owner).unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Salary", "Food", "rent"]);
    }

    #[test]
    fn test_get_by_name() {
        let temp_dir = TempDir::new().unwrap();
        let repo = CategoryRepository::new(temp_dir.path().join("categories.json"));
        let owner = UserId::new();
        repo.upsert(Category::new(owner, "Gifts", TransactionKind::Income)).unwrap();

        assert!(repo.get_by_name(owner, "gifts", None).unwrap().is_some());
        assert!(repo
            .get_by_name(owner, "GIFTS", Some(TransactionKind::Expense))
            .unwrap()
            .is_none());
        assert!(repo.get_by_name(UserId::new(), "Gifts", None).unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("categories.json");
        let repo = CategoryRepository::new(path.clone());
        let owner = UserId::new();
        let category = Category::new(owner, "Travel", TransactionKind::Expense).with_style("#ff9800", "plane");
        let id = category.id;
        repo.upsert(category).unwrap();
        repo.save().unwrap();

        let reloaded = CategoryRepository::new(path);
        reloaded.load().unwrap();
        let category = reloaded.get(owner, id).unwrap().unwrap();
        assert_eq!(category.icon, "plane");
        assert!(category.active);
    }
}
