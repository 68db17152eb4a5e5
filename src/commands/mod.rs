pub mod config;
pub mod dates;
pub mod events;
pub mod export;
pub mod menu;
pub mod reset;
pub mod shell;
pub mod show;
pub mod status;
pub mod step;

use anyhow::Result;
use eventplan_core::ScheduleDate;
use eventplan_core::ScheduleStore;
use eventplan_core::storage::KeyValueStorage;

/// The date a command works on: the one given, else the active date.
pub fn resolve_date<S: KeyValueStorage>(
    store: &ScheduleStore<S>,
    date: Option<&str>,
) -> Result<ScheduleDate> {
    match date {
        Some(d) => Ok(ScheduleDate::parse(d)?),
        None => store.active_date().ok_or_else(|| {
            anyhow::anyhow!(
                "No active date.\n\n\
                Pick one with:\n  \
                eventplan dates focus <YYYY-MM-DD>"
            )
        }),
    }
}
