//! Category model
//!
//! Categories are user-defined labels for transactions. A category has a
//! fixed kind, and only transactions of the same kind may reference it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, UserId};
use super::transaction::TransactionKind;

pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// A transaction category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// The user who owns this category
    pub owner: UserId,

    /// Category name
    pub name: String,

    /// Whether this category labels income or expenses
    pub kind: TransactionKind,

    /// Display color token (e.g. "#4caf50")
    #[serde(default = "default_color")]
    pub color: String,

    /// Display icon token
    #[serde(default = "default_icon")]
    pub icon: String,

    /// Inactive categories are hidden from pickers but keep their history
    #[serde(default = "default_active")]
    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_color() -> String {
    "#607d8b".to_string()
}

fn default_icon() -> String {
    "tag".to_string()
}

fn default_active() -> bool {
    true
}

impl Category {
    /// Create a new active category
    pub fn new(owner: UserId, name: impl Into<String>, kind: TransactionKind) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            owner,
            name: name.into(),
            kind,
            color: default_color(),
            icon: default_icon(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set color and icon in one go
    pub fn with_style(mut self, color: impl Into<String>, icon: impl Into<String>) -> Self {
        self.color = color.into();
        self.icon = icon.into();
        self
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if trimmed.len() > MAX_CATEGORY_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(trimmed.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Category name too long ({} characters, max {})",
                len, MAX_CATEGORY_NAME_LEN
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
