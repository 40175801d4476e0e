//! Saving goal repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinpulseError;
use crate::models::{GoalId, SavingGoal, UserId};

use super::file_io::{lock_error, read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct GoalData {
    #[serde(default)]
    goals: Vec<SavingGoal>,
}

pub struct GoalRepository {
    path: PathBuf,
    goals: RwLock<HashMap<GoalId, SavingGoal>>,
}

impl GoalRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            goals: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), FinpulseError> {
        let file_data: GoalData = read_json(&self.path)?;

        let mut goals = self.goals.write().map_err(|e| lock_error("write", e))?;
        goals.clear();
        for goal in file_data.goals {
            goals.insert(goal.id, goal);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), FinpulseError> {
        let goals = self.goals.read().map_err(|e| lock_error("read", e))?;

        let mut list: Vec<_> = goals.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        write_json_atomic(&self.path, &GoalData { goals: list })
    }

    pub fn get(&self, owner: UserId, id: GoalId) -> Result<Option<SavingGoal>, FinpulseError> {
        let goals = self.goals.read().map_err(|e| lock_error("read", e))?;
        Ok(goals.get(&id).filter(|g| g.owner == owner).cloned())
    }

    /// `owner`'s goals in creation order
    pub fn list(&self, owner: UserId) -> Result<Vec<SavingGoal>, FinpulseError> {
        let goals = self.goals.read().map_err(|e| lock_error("read", e))?;

        let mut list: Vec<_> = goals.values().filter(|g| g.owner == owner).cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(list)
    }

    pub fn upsert(&self, goal: SavingGoal) -> Result<(), FinpulseError> {
        let mut goals = self.goals.write().map_err(|e| lock_error("write", e))?;
        goals.insert(goal.id, goal);
        Ok(())
    }

    pub fn delete(&self, owner: UserId, id: GoalId) -> Result<Option<SavingGoal>, FinpulseError> {
        let mut goals = self.goals.write().map_err(|e| lock_error("write", e))?;
        if !goals.get(&id).is_some_and(|g| g.owner == owner) {
            return Ok(None);
        }
        Ok(goals.remove(&id))
    }
}
