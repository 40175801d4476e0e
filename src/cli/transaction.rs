//! Transaction CLI commands

use clap::{Subcommand, ValueEnum};

use super::{parse_amount, parse_optional_date, today};
use crate::config::Settings;
use crate::display::{format_budget_events, format_transaction_details, format_transaction_register};
use crate::error::{FinpulseError, FinpulseResult};
use crate::models::{TransactionId, TransactionKind};
use crate::services::{
    CategoryService, NewTransaction, TargetService, TransactionFilter, TransactionService, TransactionSort,
};
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Newest,
    Oldest,
    Largest,
    Smallest,
}

impl From<SortArg> for TransactionSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Newest => Self::DateDesc,
            SortArg::Oldest => Self::DateAsc,
            SortArg::Largest => Self::AmountDesc,
            SortArg::Smallest => Self::AmountAsc,
        }
    }
}

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction
    Add {
        /// Amount (e.g., "42" or "42.50"), always positive
        amount: String,
        /// Category name or ID; its kind decides income vs expense
        #[arg(short, long)]
        category: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
        /// Tag, may be repeated
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// List transactions
    List {
        #[arg(short, long)]
        kind: Option<TransactionKind>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Required tag, may be repeated
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// Text to look for in notes and tags
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        min: Option<String>,
        #[arg(long)]
        max: Option<String>,
        #[arg(long, value_enum, default_value = "newest")]
        sort: SortArg,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show one transaction
    Show {
        /// Transaction ID or unique ID prefix
        id: String,
    },

    /// Delete one or more transactions
    Delete {
        /// Transaction IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Move transactions to another category
    Recategorize {
        /// Transaction IDs
        #[arg(required = true)]
        ids: Vec<String>,
        /// Destination category name or ID
        #[arg(long)]
        to: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FinpulseResult<()> {
    let owner = settings.user_id;
    let service = TransactionService::new(storage, owner);
    let categories = CategoryService::new(storage, owner);
    let currency = settings.currency_symbol.as_str();
    let date_format = settings.date_format.as_str();

    match cmd {
        TransactionCommands::Add {
            amount,
            category,
            date,
            note,
            tags,
        } => {
            let category = categories.resolve(&category)?;
            if !category.active {
                return Err(FinpulseError::Validation(format!(
                    "Category '{}' is inactive",
                    category.name
                )));
            }
            let today = today();

            let txn = service.create(NewTransaction {
                kind: category.kind,
                category_id: category.id,
                amount: parse_amount(&amount)?,
                date: parse_optional_date(date.as_deref())?.unwrap_or(today),
                note,
                tags,
            })?;

            println!(
                "Recorded {} of {} in {} ({})",
                txn.kind().to_string().to_lowercase(),
                txn.amount.format_with_symbol(currency),
                category.name,
                txn.id
            );

            let events = TargetService::new(storage, owner)
                .with_thresholds(settings.thresholds.clone())
                .newly_exceeded(&txn, today)?;
            print!("{}", format_budget_events(&events));
        }

        TransactionCommands::List {
            kind,
            category,
            from,
            to,
            tags,
            search,
            min,
            max,
            sort,
            limit,
        } => {
            let mut filter = TransactionFilter::new().sort(sort.into()).limit(limit);
            if let Some(kind) = kind {
                filter = filter.kind(kind);
            }
            if let Some(category) = category {
                filter = filter.category(categories.resolve(&category)?.id);
            }
            if let Some(start) = parse_optional_date(from.as_deref())? {
                filter = filter.since(start);
            }
            if let Some(end) = parse_optional_date(to.as_deref())? {
                filter = filter.until(end);
            }
            for tag in tags {
                filter = filter.tag(tag);
            }
            if let Some(text) = search {
                filter = filter.search(text);
            }
            let min = min.as_deref().map(parse_amount).transpose()?;
            let max = max.as_deref().map(parse_amount).transpose()?;
            filter = filter.amount_between(min, max);

            let transactions = service.list(&filter)?;
            print!(
                "{}",
                format_transaction_register(&transactions, &categories.list()?, currency, date_format)
            );
        }

        TransactionCommands::Show { id } => {
            let txn = service.resolve(&id)?;
            print!(
                "{}",
                format_transaction_details(&txn, &categories.list()?, currency, date_format)
            );
        }

        TransactionCommands::Delete { ids } => {
            let ids = resolve_ids(&service, &ids)?;
            let deleted = service.bulk_delete(&ids)?;
            println!("Deleted {} transaction(s)", deleted.len());
        }

        TransactionCommands::Recategorize { ids, to } => {
            let category = categories.resolve(&to)?;
            let ids = resolve_ids(&service, &ids)?;
            let moved = service.bulk_recategorize(&ids, category.id)?;
            println!("Moved {} transaction(s) to {}", moved.len(), category.name);
        }
    }

    Ok(())
}

fn resolve_ids(service: &TransactionService<'_>, identifiers: &[String]) -> FinpulseResult<Vec<TransactionId>> {
    identifiers
        .iter()
        .map(|s| service.resolve(s).map(|t| t.id))
        .collect()
}
