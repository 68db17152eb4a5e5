use anyhow::Result;
use eventplan_core::storage::KeyValueStorage;
use eventplan_core::{ScheduleStore, WizardStep};
use owo_colors::OwoColorize;

use crate::render::{event_count, render_date_row, render_stepper};

pub fn run<S: KeyValueStorage>(store: &ScheduleStore<S>) -> Result<()> {
    println!("{}", render_stepper(store));
    println!("{}", store.step().description().dimmed());
    println!();

    let schedule = store.schedule();
    if schedule.is_empty() {
        println!("{}", "No dates selected".dimmed());
        println!("\nSelect dates with `eventplan dates toggle <YYYY-MM-DD>`.");
        return Ok(());
    }

    let active = store.active_date();
    for (date, events) in schedule.iter() {
        println!("{}", render_date_row(date, events, active == Some(*date)));
    }
    println!();
    println!(
        "{} across {} {}",
        event_count(schedule.event_count()),
        schedule.len(),
        crate::render::pluralize("date", schedule.len())
    );

    let hint = match store.step() {
        WizardStep::SelectDates => "Run `eventplan step next` to add events.",
        WizardStep::AddEvents if active.is_none() => {
            "Pick a date with `eventplan dates focus <YYYY-MM-DD>` to add events."
        }
        WizardStep::AddEvents => "Add events with `eventplan events add`.",
        WizardStep::Review => "Run `eventplan export` to write the schedule.",
    };
    println!("{}", hint.dimmed());
    Ok(())
}
