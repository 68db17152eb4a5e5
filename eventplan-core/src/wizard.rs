//! Wizard step cursor and its navigation gates.

use std::fmt;

use crate::date::ScheduleDate;
use crate::error::{BlockReason, PlanError, PlanResult};
use crate::schedule::Schedule;

/// The three wizard pages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WizardStep {
    #[default]
    SelectDates,
    AddEvents,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [
        WizardStep::SelectDates,
        WizardStep::AddEvents,
        WizardStep::Review,
    ];

    pub fn index(self) -> u8 {
        match self {
            WizardStep::SelectDates => 0,
            WizardStep::AddEvents => 1,
            WizardStep::Review => 2,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(WizardStep::SelectDates),
            1 => Some(WizardStep::AddEvents),
            2 => Some(WizardStep::Review),
            _ => None,
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn name(self) -> &'static str {
        match self {
            WizardStep::SelectDates => "Select Dates",
            WizardStep::AddEvents => "Add Events",
            WizardStep::Review => "Review",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WizardStep::SelectDates => "Choose event dates",
            WizardStep::AddEvents => "Add event details and menu",
            WizardStep::Review => "Review and download",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {}: {}", self.index() + 1, self.name())
    }
}

/// Where the user is in the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    pub step: WizardStep,
    /// May name a date no longer in the schedule; readers treat that as unset.
    pub active_date: Option<ScheduleDate>,
}

impl WizardState {
    /// The gate for entering `target`, evaluated against the current schedule.
    pub fn check_step(&self, target: WizardStep, schedule: &Schedule) -> Result<(), BlockReason> {
        if target < self.step {
            return Ok(());
        }
        if target >= WizardStep::AddEvents && schedule.is_empty() {
            return Err(BlockReason::NoDates);
        }
        if target == WizardStep::Review && !schedule.has_events() {
            return Err(BlockReason::NoEvents);
        }
        Ok(())
    }

    pub fn can_advance_to(&self, target: WizardStep, schedule: &Schedule) -> bool {
        self.check_step(target, schedule).is_ok()
    }

    /// Move to `target` if its gate holds; state is untouched otherwise.
    pub fn go_to_step(&mut self, target: WizardStep, schedule: &Schedule) -> PlanResult<()> {
        self.check_step(target, schedule)
            .map_err(|reason| PlanError::NavigationBlocked { target, reason })?;
        self.step = target;
        Ok(())
    }

    /// The active date, only if the schedule still holds it.
    pub fn resolved_active_date(&self, schedule: &Schedule) -> Option<ScheduleDate> {
        self.active_date.filter(|d| schedule.contains(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;

    fn date(s: &str) -> ScheduleDate {
        ScheduleDate::parse(s).unwrap()
    }

    #[test]
    fn test_step_index_roundtrip() {
        for step in WizardStep::ALL {
            assert_eq!(WizardStep::from_index(step.index()), Some(step));
        }
        assert_eq!(WizardStep::from_index(3), None);
        assert_eq!(WizardStep::SelectDates.prev(), None);
        assert_eq!(WizardStep::Review.next(), None);
        assert_eq!(WizardStep::AddEvents.next(), Some(WizardStep::Review));
    }

    #[test]
    fn test_empty_schedule_blocks_step_one() {
        let mut state = WizardState::default();
        let err = state
            .go_to_step(WizardStep::AddEvents, &Schedule::new())
            .unwrap_err();
        assert!(matches!(
            err,
            PlanError::NavigationBlocked {
                reason: BlockReason::NoDates,
                ..
            }
        ));
        assert_eq!(state.step, WizardStep::SelectDates);
    }

    #[test]
    fn test_review_needs_events() {
        let mut schedule = Schedule::new();
        schedule.toggle(date("2025-06-01"));
        let mut state = WizardState::default();

        state.go_to_step(WizardStep::AddEvents, &schedule).unwrap();
        assert_eq!(
            state.check_step(WizardStep::Review, &schedule),
            Err(BlockReason::NoEvents)
        );

        schedule.set_events(date("2025-06-01"), vec![Event::new("Haldi", "10:00")]);
        state.go_to_step(WizardStep::Review, &schedule).unwrap();
        assert_eq!(state.step, WizardStep::Review);
    }

    #[test]
    fn test_backward_is_always_allowed() {
        let mut state = WizardState {
            step: WizardStep::Review,
            active_date: None,
        };
        let empty = Schedule::new();
        state.go_to_step(WizardStep::AddEvents, &empty).unwrap();
        state.go_to_step(WizardStep::SelectDates, &empty).unwrap();
        assert_eq!(state.step, WizardStep::SelectDates);
    }

    #[test]
    fn test_predicate_is_recomputed() {
        let state = WizardState::default();
        let mut schedule = Schedule::new();
        assert!(!state.can_advance_to(WizardStep::Review, &schedule));

        schedule.set_events(date("2025-06-01"), vec![Event::new("A", "10:00")]);
        schedule.set_events(date("2025-06-02"), vec![Event::new("B", "11:00")]);
        assert!(state.can_advance_to(WizardStep::Review, &schedule));

        schedule.set_events(date("2025-06-01"), vec![]);
        assert!(state.can_advance_to(WizardStep::Review, &schedule));

        schedule.set_events(date("2025-06-02"), vec![]);
        assert!(!state.can_advance_to(WizardStep::Review, &schedule));
    }

    #[test]
    fn test_stale_active_date_resolves_to_none() {
        let mut schedule = Schedule::new();
        schedule.toggle(date("2025-06-01"));
        let state = WizardState {
            step: WizardStep::SelectDates,
            active_date: Some(date("2025-06-02")),
        };
        assert_eq!(state.resolved_active_date(&schedule), None);
    }
}
