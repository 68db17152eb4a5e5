use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use eventplan_core::ScheduleStore;
use eventplan_core::export::export_schedule;
use eventplan_core::menu::Menu;
use eventplan_core::storage::KeyValueStorage;
use owo_colors::OwoColorize;

use crate::render::pluralize;
use crate::utils::tui::create_progress_bar;

pub fn run<S: KeyValueStorage>(store: &ScheduleStore<S>, output: &Path) -> Result<()> {
    let menu = Menu::load(store.storage());
    let bar = create_progress_bar("Generating schedule");
    let result = export_schedule(
        store.schedule(),
        &menu,
        output,
        Local::now().date_naive(),
        |percent| bar.set_position(u64::from(percent)),
    );

    let document = match result {
        Ok(document) => {
            bar.finish_with_message("Complete!");
            document
        }
        Err(e) => {
            bar.abandon_with_message("Failed");
            return Err(e).context("Failed to export schedule");
        }
    };

    println!(
        "{}",
        format!(
            "  Wrote {} ({} {}, {} {})",
            output.display(),
            document.events,
            pluralize("event", document.events),
            document.page_count(),
            pluralize("page", document.page_count())
        )
        .green()
    );
    Ok(())
}
