//! Target display formatting

use crate::models::Target;
use crate::progress::{ProgressEvent, TargetProgress};

pub fn format_target_details(
    target: &Target,
    progress: &TargetProgress,
    currency: &str,
    date_format: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Target:    {} ({})\n", target.name, target.id));
    output.push_str(&format!(
        "Period:    {} {} to {}\n",
        target.period.as_str(),
        target.period_start.format(date_format),
        target.period_end.format(date_format)
    ));
    output.push_str(&format!(
        "Spent:     {} of {} ({:.1}%)\n",
        progress.current_spending.format_with_symbol(currency),
        target.amount.format_with_symbol(currency),
        progress.percentage
    ));
    output.push_str(&format!(
        "Remaining: {}\n",
        progress.remaining_amount.format_with_symbol(currency)
    ));

    if progress.period_elapsed() {
        output.push_str("Period has ended\n");
    } else {
        output.push_str(&format!("Days left: {}\n", progress.days_remaining));
    }
    output.push_str(&format!("Status:    {}\n", progress.status));

    output
}

/// One warning line per budget event
pub fn format_budget_events(events: &[ProgressEvent]) -> String {
    events
        .iter()
        .map(|e| format!("Warning: {}\n", e.message()))
        .collect()
}
