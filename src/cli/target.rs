//! Budget target CLI commands

use clap::Subcommand;

use super::{parse_amount, today};
use crate::config::Settings;
use crate::display::format_target_details;
use crate::error::FinpulseResult;
use crate::models::PeriodKind;
use crate::services::{CategoryService, TargetService};
use crate::storage::Storage;

/// Target subcommands
#[derive(Subcommand)]
pub enum TargetCommands {
    /// Create a spending target for the current period
    Add {
        /// Target name
        name: String,
        /// Spending ceiling (e.g., "500" or "500.00")
        amount: String,
        /// weekly, monthly or yearly
        #[arg(short, long, default_value = "monthly")]
        period: PeriodKind,
        /// Limit the target to one expense category (name or ID)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List targets with their progress
    List,

    /// Show one target
    Show {
        /// Target name or ID
        target: String,
    },

    /// Change a target's ceiling
    Amount {
        /// Target name or ID
        target: String,
        /// New ceiling
        amount: String,
    },

    /// Switch a target between active and completed
    Toggle {
        /// Target name or ID
        target: String,
    },

    /// Move a target whose period has ended to the current period
    Roll {
        /// Target name or ID
        target: String,
    },

    /// Delete a target
    Delete {
        /// Target name or ID
        target: String,
    },
}

/// Handle a target command
pub fn handle_target_command(storage: &Storage, settings: &Settings, cmd: TargetCommands) -> FinpulseResult<()> {
    let service = TargetService::new(storage, settings.user_id).with_thresholds(settings.thresholds.clone());
    let currency = settings.currency_symbol.as_str();
    let date_format = settings.date_format.as_str();
    let today = today();

    match cmd {
        TargetCommands::Add {
            name,
            amount,
            period,
            category,
        } => {
            let category_id = match category {
                Some(c) => Some(CategoryService::new(storage, settings.user_id).resolve(&c)?.id),
                None => None,
            };
            let target = service.create(&name, parse_amount(&amount)?, period, category_id, today)?;
            println!(
                "Created target: {} ({} {} to {})",
                target.name,
                target.amount.format_with_symbol(currency),
                target.period_start.format(date_format),
                target.period_end.format(date_format)
            );
            println!("  ID: {}", target.id);
        }

        TargetCommands::List => {
            let summary = service.list_progress(today)?;
            if summary.lines.is_empty() && summary.skipped == 0 {
                println!("No targets found.");
            } else {
                print!("{}", summary.format_terminal(currency));
            }
        }

        TargetCommands::Show { target } => {
            let target = service.resolve(&target)?;
            let progress = service.progress(target.id, today)?;
            print!("{}", format_target_details(&target, &progress, currency, date_format));
        }

        TargetCommands::Amount { target, amount } => {
            let target = service.resolve(&target)?;
            let updated = service.update_amount(target.id, parse_amount(&amount)?)?;
            println!(
                "Target '{}' now allows {}",
                updated.name,
                updated.amount.format_with_symbol(currency)
            );
        }

        TargetCommands::Toggle { target } => {
            let target = service.resolve(&target)?;
            let updated = service.toggle_active(target.id)?;
            let state = if updated.active { "active" } else { "completed" };
            println!("Target '{}' is now {}", updated.name, state);
        }

        TargetCommands::Roll { target } => {
            let target = service.resolve(&target)?;
            let rolled = service.roll_period(target.id, today)?;
            if rolled.period_start == target.period_start {
                println!("Target '{}' is already in its current period", rolled.name);
            } else {
                println!(
                    "Target '{}' moved to {} to {}",
                    rolled.name,
                    rolled.period_start.format(date_format),
                    rolled.period_end.format(date_format)
                );
            }
        }

        TargetCommands::Delete { target } => {
            let target = service.resolve(&target)?;
            service.delete(target.id)?;
            println!("Deleted target: {}", target.name);
        }
    }

    Ok(())
}
