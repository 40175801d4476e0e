//! Saving goal CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_optional_date, today};
use crate::config::Settings;
use crate::display::{format_fund_outcome, format_goal_details};
use crate::error::FinpulseResult;
use crate::models::Money;
use crate::services::{GoalService, NewGoal};
use crate::storage::Storage;

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a saving goal
    Add {
        /// Goal name
        name: String,
        /// Amount to save
        amount: String,
        /// Deadline (YYYY-MM-DD), must be in the future
        #[arg(short, long)]
        by: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Amount already saved
        #[arg(long)]
        initial: Option<String>,
    },

    /// List goals with their progress
    List,

    /// Show one goal
    Show {
        /// Goal name or ID
        goal: String,
    },

    /// Add money to a goal
    Deposit {
        /// Goal name or ID
        goal: String,
        amount: String,
    },

    /// Take money out of a goal
    Withdraw {
        /// Goal name or ID
        goal: String,
        amount: String,
    },

    /// Mark a goal achieved, or undo that
    Toggle {
        /// Goal name or ID
        goal: String,
    },

    /// Delete a goal
    Delete {
        /// Goal name or ID
        goal: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command(storage: &Storage, settings: &Settings, cmd: GoalCommands) -> FinpulseResult<()> {
    let service = GoalService::new(storage, settings.user_id).with_thresholds(settings.thresholds.clone());
    let currency = settings.currency_symbol.as_str();
    let date_format = settings.date_format.as_str();
    let today = today();

    match cmd {
        GoalCommands::Add {
            name,
            amount,
            by,
            description,
            initial,
        } => {
            let goal = service.create(
                NewGoal {
                    name,
                    target_amount: parse_amount(&amount)?,
                    target_date: parse_optional_date(by.as_deref())?,
                    description,
                    initial_amount: initial
                        .as_deref()
                        .map(parse_amount)
                        .transpose()?
                        .unwrap_or_else(Money::zero),
                },
                today,
            )?;
            println!(
                "Created goal: {} ({})",
                goal.name,
                goal.target_amount.format_with_symbol(currency)
            );
            println!("  ID: {}", goal.id);
        }

        GoalCommands::List => {
            let summary = service.list_progress(today)?;
            if summary.lines.is_empty() && summary.skipped == 0 {
                println!("No goals found.");
            } else {
                print!("{}", summary.format_terminal(currency, date_format));
            }
        }

        GoalCommands::Show { goal } => {
            let goal = service.resolve(&goal)?;
            let progress = service.progress(goal.id, today)?;
            print!("{}", format_goal_details(&goal, &progress, currency, date_format));
        }

        GoalCommands::Deposit { goal, amount } => {
            let goal = service.resolve(&goal)?;
            let outcome = service.deposit(goal.id, parse_amount(&amount)?)?;
            print!("{}", format_fund_outcome(&outcome, currency));
        }

        GoalCommands::Withdraw { goal, amount } => {
            let goal = service.resolve(&goal)?;
            let outcome = service.withdraw(goal.id, parse_amount(&amount)?)?;
            print!("{}", format_fund_outcome(&outcome, currency));
        }

        GoalCommands::Toggle { goal } => {
            let goal = service.resolve(&goal)?;
            let updated = service.toggle_achieved(goal.id)?;
            let state = if updated.achieved { "achieved" } else { "not achieved" };
            println!("Goal '{}' marked {}", updated.name, state);
        }

        GoalCommands::Delete { goal } => {
            let goal = service.resolve(&goal)?;
            service.delete(goal.id)?;
            println!("Deleted goal: {}", goal.name);
        }
    }

    Ok(())
}
