use anyhow::Result;
use eventplan_core::storage::KeyValueStorage;
use eventplan_core::menu::Menu;
use eventplan_core::{Event, ScheduleStore};
use owo_colors::OwoColorize;

use crate::render::{EventCard, Render, event_count};

/// The review page: every date in calendar order, events by time.
pub fn run<S: KeyValueStorage>(store: &ScheduleStore<S>) -> Result<()> {
    let schedule = store.schedule();
    if schedule.is_empty() {
        println!("{}", "No dates selected".dimmed());
        return Ok(());
    }

    let menu = Menu::load(store.storage());
    for (date, events) in schedule.iter() {
        println!(
            "{}  {}",
            date.long_form().bold().underline(),
            event_count(events.len()).dimmed()
        );

        let mut sorted = events.to_vec();
        sorted.sort_by(Event::cmp_by_time);
        for event in &sorted {
            let card = EventCard { event, menu: &menu };
            for line in card.render().lines() {
                println!("  {}", line);
            }
        }
        println!();
    }
    Ok(())
}
