//! Category CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_category_list;
use crate::error::FinpulseResult;
use crate::models::TransactionKind;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// income or expense
        #[arg(short, long, default_value = "expense")]
        kind: TransactionKind,
    },

    /// List categories
    List {
        /// Include inactive categories
        #[arg(short, long)]
        all: bool,
    },

    /// Hide a category from new transactions
    Deactivate {
        /// Category name or ID
        category: String,
    },

    /// Make an inactive category available again
    Activate {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, settings: &Settings, cmd: CategoryCommands) -> FinpulseResult<()> {
    let service = CategoryService::new(storage, settings.user_id);

    match cmd {
        CategoryCommands::Add { name, kind } => {
            let category = service.create(&name, kind)?;
            println!("Created {} category: {}", kind.to_string().to_lowercase(), category.name);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::List { all } => {
            let categories = if all { service.list()? } else { service.list_active()? };
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Deactivate { category } => {
            let category = service.resolve(&category)?;
            service.set_active(category.id, false)?;
            println!("Deactivated category: {}", category.name);
        }

        CategoryCommands::Activate { category } => {
            let category = service.resolve(&category)?;
            service.set_active(category.id, true)?;
            println!("Activated category: {}", category.name);
        }
    }

    Ok(())
}
