//! The event schedule store: single owner of the schedule and wizard state.
//!
//! Mutations apply to memory immediately and mark the store dirty. Durable
//! storage is updated by [`ScheduleStore::persist`], which never fails
//! outward: it reports a [`PersistOutcome`] and logs. [`ScheduleStore::restore`]
//! validates what it reads key by key and wipes storage when the schedule
//! payload cannot be parsed at all.

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::constants::{ACTIVE_DATE_KEY, CURRENT_STEP_KEY, SELECTED_DATES_KEY, STORE_KEYS};
use crate::date::ScheduleDate;
use crate::error::{PlanError, PlanResult};
use crate::event::Event;
use crate::schedule::{Pruned, Schedule};
use crate::storage::KeyValueStorage;
use crate::wizard::{WizardState, WizardStep};

/// Result of a persist attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    /// The full snapshot was written.
    Saved,
    /// The full snapshot could not be written; a reduced one holding only
    /// well-formed events was written instead.
    Recovered(Pruned),
    /// Nothing was written. The previous snapshot is still on disk.
    Failed,
}

impl PersistOutcome {
    pub fn is_written(&self) -> bool {
        !matches!(self, PersistOutcome::Failed)
    }
}

/// What [`ScheduleStore::restore`] found in storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub dates_restored: usize,
    /// Entries discarded for a bad date or a malformed event
    pub dates_dropped: usize,
    pub step_restored: bool,
    pub active_date_restored: bool,
    /// The schedule payload did not parse and every key was deleted
    pub cleared_corrupt: bool,
}

pub struct ScheduleStore<S> {
    storage: S,
    schedule: Schedule,
    wizard: WizardState,
    dirty: bool,
}

impl<S: KeyValueStorage> ScheduleStore<S> {
    /// An empty store. Nothing is read from `storage` until [`Self::restore`].
    pub fn new(storage: S) -> Self {
        ScheduleStore {
            storage,
            schedule: Schedule::new(),
            wizard: WizardState::default(),
            dirty: false,
        }
    }

    /// Create a store and immediately restore it from `storage`.
    pub fn open(storage: S) -> (Self, RestoreReport) {
        let mut store = Self::new(storage);
        let report = store.restore();
        (store, report)
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn wizard(&self) -> &WizardState {
        &self.wizard
    }

    pub fn step(&self) -> WizardStep {
        self.wizard.step
    }

    /// The active date, treating a stale pointer as no active date.
    pub fn active_date(&self) -> Option<ScheduleDate> {
        self.wizard.resolved_active_date(&self.schedule)
    }

    /// Events for the active date (empty when there is none).
    pub fn active_events(&self) -> &[Event] {
        self.active_date()
            .and_then(|d| self.schedule.events(&d))
            .unwrap_or(&[])
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Toggle `date` in the schedule. Returns true when it was added.
    ///
    /// Adding focuses the new date. Removing clears the active date only if it
    /// pointed at the removed one.
    pub fn select_date(&mut self, date: ScheduleDate) -> bool {
        let added = self.schedule.toggle(date);
        if added {
            self.wizard.active_date = Some(date);
        } else if self.wizard.active_date == Some(date) {
            self.wizard.active_date = None;
        }
        self.dirty = true;
        added
    }

    pub fn set_active_date(&mut self, date: Option<ScheduleDate>) {
        self.wizard.active_date = date;
        self.dirty = true;
    }

    /// Replace the events for `date` wholesale, creating the date if absent.
    /// No validation happens here.
    pub fn set_events(&mut self, date: ScheduleDate, events: Vec<Event>) {
        self.schedule.set_events(date, events);
        self.dirty = true;
    }

    /// Move the wizard. Fails with [`PlanError::NavigationBlocked`] and leaves
    /// state untouched when the gate does not hold.
    pub fn go_to_step(&mut self, target: WizardStep) -> PlanResult<()> {
        if let Err(e) = self.wizard.go_to_step(target, &self.schedule) {
            debug!(step = %target, "step transition blocked");
            return Err(e);
        }
        self.dirty = true;
        Ok(())
    }

    pub fn can_advance_to(&self, target: WizardStep) -> bool {
        self.wizard.can_advance_to(target, &self.schedule)
    }

    /// Write the current state to storage.
    pub fn persist(&mut self) -> PersistOutcome {
        match Self::write_snapshot(&mut self.storage, &self.schedule, &self.wizard) {
            Ok(()) => {
                self.dirty = false;
                PersistOutcome::Saved
            }
            Err(e) => {
                warn!(error = %e, "saving schedule failed, retrying with well-formed events only");
                let mut reduced = self.schedule.clone();
                let pruned = reduced.retain_well_formed();
                match Self::write_snapshot(&mut self.storage, &reduced, &self.wizard) {
                    Ok(()) => {
                        info!(
                            dropped_events = pruned.events,
                            dropped_dates = pruned.dates,
                            "saved reduced schedule"
                        );
                        PersistOutcome::Recovered(pruned)
                    }
                    Err(e) => {
                        error!(error = %e, "schedule recovery failed, keeping previous snapshot");
                        PersistOutcome::Failed
                    }
                }
            }
        }
    }

    /// Replace in-memory state with what storage holds.
    pub fn restore(&mut self) -> RestoreReport {
        let mut report = RestoreReport::default();
        self.schedule = Schedule::new();
        self.wizard = WizardState::default();
        self.dirty = false;

        if let Some(raw) = self.read_key(SELECTED_DATES_KEY) {
            match decode_schedule(&raw) {
                Ok(decoded) => {
                    report.dates_restored = decoded.schedule.len();
                    report.dates_dropped = decoded.dropped;
                    if decoded.dropped > 0 {
                        warn!(dropped = decoded.dropped, "discarded invalid saved dates");
                    }
                    self.schedule = decoded.schedule;
                }
                Err(e) => {
                    warn!(error = %e, "saved schedule is corrupt, clearing saved state");
                    self.clear_storage();
                    report.cleared_corrupt = true;
                    return report;
                }
            }
        }

        if let Some(raw) = self.read_key(CURRENT_STEP_KEY) {
            match raw.trim().parse::<u8>().ok().and_then(WizardStep::from_index) {
                Some(step) => {
                    self.wizard.step = step;
                    report.step_restored = true;
                }
                None => warn!(value = %raw, "ignoring invalid saved step"),
            }
        }

        if let Some(raw) = self.read_key(ACTIVE_DATE_KEY) {
            match ScheduleDate::parse(&raw) {
                Ok(date) => {
                    self.wizard.active_date = Some(date);
                    report.active_date_restored = true;
                }
                Err(_) => warn!(value = %raw, "ignoring invalid saved active date"),
            }
        }

        info!(
            dates = report.dates_restored,
            step = self.wizard.step.index(),
            "restored saved schedule"
        );
        report
    }

    /// Forget everything, in memory and in storage.
    pub fn reset(&mut self) -> PlanResult<()> {
        self.schedule = Schedule::new();
        self.wizard = WizardState::default();
        self.dirty = false;
        for key in STORE_KEYS {
            self.storage.remove(key)?;
        }
        Ok(())
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "could not read saved state");
                None
            }
        }
    }

    fn clear_storage(&mut self) {
        for key in STORE_KEYS {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "could not remove saved state");
            }
        }
    }

    /// Encode everything before touching storage, then write the three keys
    /// as one group: either all of them change or none do.
    fn write_snapshot(storage: &mut S, schedule: &Schedule, wizard: &WizardState) -> PlanResult<()> {
        let payload = encode_schedule(schedule)?;
        let step = wizard.step.index().to_string();
        let active = wizard.active_date.map(|d| d.to_string());

        storage.write_all(&[
            (SELECTED_DATES_KEY, Some(payload.as_str())),
            (CURRENT_STEP_KEY, Some(step.as_str())),
            (ACTIVE_DATE_KEY, active.as_deref()),
        ])
    }
}

/// Serialize and read the payload back through the restore path; anything
/// restore would not reproduce exactly is rejected here.
fn encode_schedule(schedule: &Schedule) -> PlanResult<String> {
    let payload =
        serde_json::to_string(schedule).map_err(|e| PlanError::Serialization(e.to_string()))?;
    let decoded = decode_schedule(&payload).map_err(|e| PlanError::Serialization(e.to_string()))?;
    if decoded.schedule != *schedule {
        let malformed = schedule
            .iter()
            .flat_map(|(_, events)| events)
            .filter(|e| !e.is_well_formed())
            .count();
        return Err(PlanError::Serialization(format!(
            "schedule does not survive a round trip ({} malformed events)",
            malformed
        )));
    }
    Ok(payload)
}

struct DecodedSchedule {
    schedule: Schedule,
    dropped: usize,
}

/// Parse a saved `selectedDates` payload.
///
/// Only unparseable text is an error. A payload of the wrong shape yields an
/// empty schedule, and individual entries with a bad date or any malformed
/// event are dropped.
fn decode_schedule(raw: &str) -> Result<DecodedSchedule, serde_json::Error> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Array(entries) = value else {
        return Ok(DecodedSchedule {
            schedule: Schedule::new(),
            dropped: 0,
        });
    };

    let total = entries.len();
    let valid: Vec<(ScheduleDate, Vec<Event>)> = entries.into_iter().filter_map(decode_entry).collect();
    let dropped = total - valid.len();

    Ok(DecodedSchedule {
        schedule: valid.into_iter().collect(),
        dropped,
    })
}

fn decode_entry(entry: Value) -> Option<(ScheduleDate, Vec<Event>)> {
    let Value::Array(mut pair) = entry else {
        return None;
    };
    if pair.len() < 2 {
        return None;
    }
    let events = pair.swap_remove(1);
    let date = match &pair[0] {
        Value::String(s) => ScheduleDate::parse(s).ok()?,
        _ => return None,
    };
    let Value::Array(events) = events else {
        return None;
    };
    let events = events
        .into_iter()
        .map(|e| serde_json::from_value::<Event>(e).ok().filter(Event::is_well_formed))
        .collect::<Option<Vec<_>>>()?;
    Some((date, events))
}
