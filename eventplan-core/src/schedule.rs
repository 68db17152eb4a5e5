//! The date → events mapping at the heart of the wizard.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::date::ScheduleDate;
use crate::event::Event;

/// Mapping from calendar date to the ordered events planned on it.
///
/// Serialized as a list of `[date, events]` pairs rather than an object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(ScheduleDate, Vec<Event>)>", into = "Vec<(ScheduleDate, Vec<Event>)>")]
pub struct Schedule {
    dates: BTreeMap<ScheduleDate, Vec<Event>>,
}

/// What the recovery filter threw away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pruned {
    pub events: usize,
    pub dates: usize,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn contains(&self, date: &ScheduleDate) -> bool {
        self.dates.contains_key(date)
    }

    pub fn events(&self, date: &ScheduleDate) -> Option<&[Event]> {
        self.dates.get(date).map(Vec::as_slice)
    }

    /// Dates in calendar order.
    pub fn dates(&self) -> impl Iterator<Item = &ScheduleDate> {
        self.dates.keys()
    }

    /// `(date, events)` pairs in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (&ScheduleDate, &[Event])> {
        self.dates.iter().map(|(d, e)| (d, e.as_slice()))
    }

    pub fn event_count(&self) -> usize {
        self.dates.values().map(Vec::len).sum()
    }

    /// True when at least one date has a non-empty event list.
    pub fn has_events(&self) -> bool {
        self.dates.values().any(|events| !events.is_empty())
    }

    /// Insert `date` with no events if absent, remove it (and its events) if
    /// present. Returns true when the date is now in the schedule.
    pub fn toggle(&mut self, date: ScheduleDate) -> bool {
        if self.dates.remove(&date).is_some() {
            false
        } else {
            self.dates.insert(date, Vec::new());
            true
        }
    }

    /// Replace the events for `date`, creating the key if needed.
    pub fn set_events(&mut self, date: ScheduleDate, events: Vec<Event>) {
        self.dates.insert(date, events);
    }

    pub fn remove(&mut self, date: &ScheduleDate) -> Option<Vec<Event>> {
        self.dates.remove(date)
    }

    pub fn is_well_formed(&self) -> bool {
        self.dates.values().flatten().all(Event::is_well_formed)
    }

    /// Drop every malformed event, then every date left with no events.
    ///
    /// Dates that were already empty are dropped as well, matching the
    /// reduced snapshot written by the recovery pass.
    pub fn retain_well_formed(&mut self) -> Pruned {
        let mut pruned = Pruned::default();
        for events in self.dates.values_mut() {
            let before = events.len();
            events.retain(Event::is_well_formed);
            pruned.events += before - events.len();
        }
        let before = self.dates.len();
        self.dates.retain(|_, events| !events.is_empty());
        pruned.dates = before - self.dates.len();
        pruned
    }
}

impl From<Vec<(ScheduleDate, Vec<Event>)>> for Schedule {
    fn from(pairs: Vec<(ScheduleDate, Vec<Event>)>) -> Self {
        Schedule {
            dates: pairs.into_iter().collect(),
        }
    }
}

impl From<Schedule> for Vec<(ScheduleDate, Vec<Event>)> {
    fn from(schedule: Schedule) -> Self {
        schedule.dates.into_iter().collect()
    }
}

impl FromIterator<(ScheduleDate, Vec<Event>)> for Schedule {
    fn from_iter<I: IntoIterator<Item = (ScheduleDate, Vec<Event>)>>(iter: I) -> Self {
        Schedule {
            dates: iter.into_iter().collect(),
        }
    }
}
