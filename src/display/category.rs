//! Category display formatting

use crate::models::Category;
use crate::reports::category_usage::truncate;

/// Format categories as a table, income first
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<28} {:<8} {:<9} {}\n",
        "Name", "Kind", "Status", "ID"
    ));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for category in categories {
        output.push_str(&format!(
            "{:<28} {:<8} {:<9} {}\n",
            truncate(&category.name, 28),
            category.kind.to_string(),
            if category.active { "active" } else { "inactive" },
            category.id
        ));
    }

    output
}
