//! Opening the saved plan for one command, and saving it afterwards.

use anyhow::{Context, Result};
use eventplan_core::config::PlanConfig;
use eventplan_core::storage::FileStorage;
use eventplan_core::{PersistOutcome, RestoreReport, ScheduleStore};
use owo_colors::OwoColorize;
use tracing::debug;

pub type Store = ScheduleStore<FileStorage>;

pub fn load_config() -> Result<PlanConfig> {
    PlanConfig::load().context("Failed to load config")
}

pub fn storage(config: &PlanConfig) -> Result<FileStorage> {
    let dir = config
        .data_path()
        .context("Failed to resolve data directory")?;
    debug!(dir = %dir.display(), "using data directory");
    Ok(FileStorage::new(dir))
}

/// Restore the saved plan, telling the user about anything that was dropped.
pub fn open_store(config: &PlanConfig) -> Result<Store> {
    let (store, report) = ScheduleStore::open(storage(config)?);
    report_restore(&report);
    Ok(store)
}

/// Run `f` against the saved plan; whatever it changed is saved on the way
/// out, even when it fails part way.
pub fn with_store<F>(f: F) -> Result<()>
where
    F: FnOnce(&mut Store) -> Result<()>,
{
    let config = load_config()?;
    let mut store = open_store(&config)?;
    let result = f(&mut store);
    if store.is_dirty() {
        report_persist(store.persist());
    }
    result
}

pub fn report_restore(report: &RestoreReport) {
    if report.cleared_corrupt {
        eprintln!(
            "{}",
            "Saved plan was unreadable and has been cleared.".yellow()
        );
    } else if report.dates_dropped > 0 {
        eprintln!(
            "{}",
            format!(
                "Skipped {} saved {} with invalid data.",
                report.dates_dropped,
                crate::render::pluralize("date", report.dates_dropped)
            )
            .yellow()
        );
    }
}

pub fn report_persist(outcome: PersistOutcome) {
    match outcome {
        PersistOutcome::Saved => {}
        PersistOutcome::Recovered(pruned) => eprintln!(
            "{}",
            format!(
                "Saved without {} incomplete {} ({} {} dropped).",
                pruned.events,
                crate::render::pluralize("event", pruned.events),
                pruned.dates,
                crate::render::pluralize("date", pruned.dates)
            )
            .yellow()
        ),
        PersistOutcome::Failed => eprintln!(
            "{}",
            "Could not save changes; the previous saved plan is unchanged.".red()
        ),
    }
}
