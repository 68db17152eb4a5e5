use anyhow::Result;
use eventplan_core::date::SelectionWindow;
use eventplan_core::storage::KeyValueStorage;
use eventplan_core::{ScheduleDate, ScheduleStore};
use owo_colors::OwoColorize;

use crate::render::render_date_row;

/// Toggle each date. New dates must fall inside the selection window;
/// already-selected dates can always be removed.
pub fn toggle<S: KeyValueStorage>(store: &mut ScheduleStore<S>, dates: &[String]) -> Result<()> {
    let window = SelectionWindow::from_today();

    for raw in dates {
        let date = ScheduleDate::parse(raw)?;
        if !store.schedule().contains(&date)
            && let Err(reason) = window.check(date)
        {
            anyhow::bail!("Cannot select {}: {}", date, reason);
        }

        if store.select_date(date) {
            println!("{}", format!("  + {}", date.long_form()).green());
        } else {
            println!("{}", format!("  - {}", date.long_form()).red());
        }
    }

    Ok(())
}

pub fn focus<S: KeyValueStorage>(store: &mut ScheduleStore<S>, raw: &str) -> Result<()> {
    let date = ScheduleDate::parse(raw)?;
    if !store.schedule().contains(&date) {
        anyhow::bail!(
            "{} is not selected.\n\nSelect it first with:\n  eventplan dates toggle {}",
            date,
            date
        );
    }
    store.set_active_date(Some(date));
    println!("Adding events to {}", date.long_form().bold());
    Ok(())
}

pub fn list<S: KeyValueStorage>(store: &ScheduleStore<S>) -> Result<()> {
    if store.schedule().is_empty() {
        println!("{}", "No dates selected".dimmed());
        return Ok(());
    }

    let active = store.active_date();
    for (date, events) in store.schedule().iter() {
        println!("{}", render_date_row(date, events, active == Some(*date)));
    }
    Ok(())
}
