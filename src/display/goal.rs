//! Saving goal display formatting

use crate::models::SavingGoal;
use crate::progress::{FundOutcome, GoalProgress};

pub fn format_goal_details(
    goal: &SavingGoal,
    progress: &GoalProgress,
    currency: &str,
    date_format: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Goal:      {} ({})\n", goal.name, goal.id));
    if let Some(description) = &goal.description {
        output.push_str(&format!("           {}\n", description));
    }
    output.push_str(&format!(
        "Saved:     {} of {} ({:.1}%)\n",
        goal.current_amount.format_with_symbol(currency),
        goal.target_amount.format_with_symbol(currency),
        progress.percentage
    ));
    output.push_str(&format!(
        "Remaining: {}\n",
        progress.remaining_amount.format_with_symbol(currency)
    ));

    match (goal.target_date, progress.days_remaining) {
        (Some(date), Some(days)) if days < 0 => output.push_str(&format!(
            "Deadline:  {} ({} days ago)\n",
            date.format(date_format),
            -days
        )),
        (Some(date), Some(days)) => output.push_str(&format!(
            "Deadline:  {} ({} days left)\n",
            date.format(date_format),
            days
        )),
        _ => output.push_str("Deadline:  none\n"),
    }
    output.push_str(&format!("Status:    {}\n", progress.status));

    output
}

/// Summary of a deposit or withdrawal plus the events it raised
pub fn format_fund_outcome(outcome: &FundOutcome, currency: &str) -> String {
    let mut output = format!(
        "{} of {} on '{}': {} -> {} ({:.1}% -> {:.1}%)\n",
        outcome.operation,
        outcome.amount.format_with_symbol(currency),
        outcome.goal_name,
        outcome.previous_amount.format_with_symbol(currency),
        outcome.new_amount.format_with_symbol(currency),
        outcome.previous_percentage,
        outcome.new_percentage
    );

    for event in outcome.events() {
        output.push_str(&format!("  * {}\n", event.message()));
    }

    output
}
