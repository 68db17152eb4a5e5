use anyhow::Result;
use dialoguer::Confirm;
use eventplan_core::ScheduleStore;
use owo_colors::OwoColorize;

use crate::session;

/// Clear every saved key. Does not read the saved plan first, so it also
/// works when that plan is what is broken.
pub fn run(yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("  Clear all dates and events?")
            .default(false)
            .interact()?;
        if !confirmed {
            return Ok(());
        }
    }

    let config = session::load_config()?;
    let mut store = ScheduleStore::new(session::storage(&config)?);
    store.reset()?;

    println!("{}", "  Cleared saved plan".green());
    Ok(())
}
