//! Budget target repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinpulseError;
use crate::models::{Target, TargetId, UserId};

use super::file_io::{lock_error, read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TargetData {
    #[serde(default)]
    targets: Vec<Target>,
}

pub struct TargetRepository {
    path: PathBuf,
    targets: RwLock<HashMap<TargetId, Target>>,
}

impl TargetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            targets: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), FinpulseError> {
        let file_data: TargetData = read_json(&self.path)?;

        let mut targets = self.targets.write().map_err(|e| lock_error("write", e))?;
        targets.clear();
        for target in file_data.targets {
            targets.insert(target.id, target);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), FinpulseError> {
        let targets = self.targets.read().map_err(|e| lock_error("read", e))?;

        let mut list: Vec<_> = targets.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        write_json_atomic(&self.path, &TargetData { targets: list })
    }

    pub fn get(&self, owner: UserId, id: TargetId) -> Result<Option<Target>, FinpulseError> {
        let targets = self.targets.read().map_err(|e| lock_error("read", e))?;
        Ok(targets.get(&id).filter(|t| t.owner == owner).cloned())
    }

    /// `owner`'s targets in creation order
    pub fn list(&self, owner: UserId) -> Result<Vec<Target>, FinpulseError> {
        let targets = self.targets.read().map_err(|e| lock_error("read", e))?;

        let mut list: Vec<_> = targets.values().filter(|t| t.owner == owner).cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(list)
    }

    pub fn upsert(&self, target: Target) -> Result<(), FinpulseError> {
        let mut targets = self.targets.write().map_err(|e| lock_error("write", e))?;
        targets.insert(target.id, target);
        Ok(())
    }

    pub fn delete(&self, owner: UserId, id: TargetId) -> Result<Option<Target>, FinpulseError> {
        let mut targets = self.targets.write().map_err(|e| lock_error("write", e))?;
        if !targets.get(&id).is_some_and(|t| t.owner == owner) {
            return Ok(None);
        }
        Ok(targets.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    #[test]
    fn test_upsert_get_delete() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TargetRepository::new(temp_dir.path().join("targets.json"));
        repo.load().unwrap();

        let owner = UserId::new();
        let target = Target::monthly(owner, "Groceries", Money::from_units(400), today());
        let id = target.id;
        repo.upsert(target).unwrap();

        assert!(repo.get(owner, id).unwrap().is_some());
        assert!(repo.get(UserId::new(), id).unwrap().is_none());
        assert!(repo.delete(UserId::new(), id).unwrap().is_none());
        assert!(repo.delete(owner, id).unwrap().is_some());
        assert!(repo.list(owner).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload_keeps_period() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("targets.json");
        let repo = TargetRepository::new(path.clone());

        let owner = UserId::new();
        let target = Target::monthly(owner, "Groceries", Money::from_units(400), today());
        let id = target.id;
        repo.upsert(target).unwrap();
        repo.save().unwrap();

        let reloaded = TargetRepository::new(path);
        reloaded.load().unwrap();
        let target = reloaded.get(owner, id).unwrap().unwrap();
        assert_eq!(target.period_start, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(target.period_end, NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
    }
}
