//! Storage initialization
//!
//! First-run setup: directories plus a starter set of categories.

use crate::config::FinpulsePaths;
use crate::error::FinpulseError;
use crate::models::{Category, TransactionKind, UserId};

use super::categories::CategoryRepository;

const DEFAULT_INCOME: &[&str] = &["Salary", "Other Income"];

const DEFAULT_EXPENSES: &[&str] = &[
    "Rent",
    "Utilities",
    "Groceries",
    "Transportation",
    "Dining Out",
    "Entertainment",
    "Health",
];

/// Initialize storage for a fresh installation
///
/// Starter categories for `owner` are written only when no categories file
/// exists yet. Returns the number of categories created.
pub fn initialize_storage(paths: &FinpulsePaths, owner: UserId) -> Result<usize, FinpulseError> {
    paths.ensure_directories()?;

    if !needs_initialization(paths) {
        return Ok(0);
    }

    let repo = CategoryRepository::new(paths.categories_file());
    let defaults = DEFAULT_INCOME
        .iter()
        .map(|name| (*name, TransactionKind::Income))
        .chain(DEFAULT_EXPENSES.iter().map(|name| (*name, TransactionKind::Expense)));

    let mut created = 0;
    for (name, kind) in defaults {
        repo.upsert(Category::new(owner, name, kind))?;
        created += 1;
    }
    repo.save()?;

    Ok(created)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &FinpulsePaths) -> bool {
    !paths.categories_file().exists()
}
