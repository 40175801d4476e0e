//! Report, alert and history commands

use super::{parse_optional_date, today};
use crate::config::Settings;
use crate::display::format_history;
use crate::error::FinpulseResult;
use crate::models::{DateRange, PeriodKind};
use crate::services::ReportService;
use crate::storage::Storage;

/// Print the dashboard; the window defaults to the current month
pub fn handle_report(storage: &Storage, settings: &Settings, from: Option<&str>, to: Option<&str>) -> FinpulseResult<()> {
    let today = today();
    let month = PeriodKind::Monthly.range_containing(today);
    let window = DateRange::new(
        parse_optional_date(from)?.unwrap_or(month.start),
        parse_optional_date(to)?.unwrap_or(month.end),
    )?;

    let report = ReportService::new(storage, settings.user_id)
        .with_thresholds(settings.thresholds.clone())
        .dashboard(window, today)?;
    print!("{}", report.format_terminal(&settings.currency_symbol, &settings.date_format));

    Ok(())
}

pub fn handle_alerts(storage: &Storage, settings: &Settings) -> FinpulseResult<()> {
    let alerts = ReportService::new(storage, settings.user_id)
        .with_thresholds(settings.thresholds.clone())
        .alerts(today())?;

    if alerts.is_empty() {
        println!("No alerts.");
    }
    for alert in alerts {
        println!("[{:<6}] {}", alert.severity, alert.message);
    }

    Ok(())
}

/// Print the most recent audit entries, newest first
pub fn handle_history(storage: &Storage, limit: usize) -> FinpulseResult<()> {
    let entries = storage.audit().read_recent(limit)?;
    print!("{}", format_history(&entries));
    Ok(())
}
