//! Event form: field validation and list edits for a single date.
//!
//! The store accepts any event list; everything user-entered goes through
//! [`EventDraft::validate`] first.

use crate::error::{PlanError, PlanResult, ValidationError};
use crate::event::{Event, parse_time};
use crate::menu::OccasionTemplate;

/// Raw form input, as typed.
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub name: String,
    pub time: String,
    pub members: String,
    pub venue: String,
    pub notes: String,
    pub menu: Vec<String>,
}

impl EventDraft {
    /// Prefill a draft from an existing event (edit mode).
    pub fn from_event(event: &Event) -> Self {
        EventDraft {
            name: event.name.clone(),
            time: event.time.clone(),
            members: event.members.map(|m| m.to_string()).unwrap_or_default(),
            venue: event.venue.clone().unwrap_or_default(),
            notes: event.notes.clone().unwrap_or_default(),
            menu: event.menu.clone(),
        }
    }

    /// Fill the name and replace the menu selection from an occasion template.
    pub fn apply_template(&mut self, template: &OccasionTemplate) {
        self.name = template.name.to_string();
        self.menu = template.item_ids().map(String::from).collect();
    }

    /// Check every field and build the event, or report all problems at once.
    pub fn validate(&self) -> PlanResult<Event> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::new("name", "Event name is required"));
        }

        let time = self.time.trim();
        if time.is_empty() {
            errors.push(ValidationError::new("time", "Time is required"));
        } else if parse_time(time).is_none() {
            errors.push(ValidationError::new("time", "Time must look like HH:MM"));
        }

        let members = self.members.trim();
        let members = if members.is_empty() {
            None
        } else {
            match members.parse::<i64>() {
                Ok(n) if n > 0 => u32::try_from(n).ok().or_else(|| {
                    errors.push(ValidationError::new("members", "Number of members is too large"));
                    None
                }),
                Ok(_) => {
                    errors.push(ValidationError::new(
                        "members",
                        "Number of members must be positive",
                    ));
                    None
                }
                Err(_) => {
                    errors.push(ValidationError::new("members", "Number of members must be a number"));
                    None
                }
            }
        };

        if self.menu.is_empty() {
            errors.push(ValidationError::new("menu", "Please select at least one menu item"));
        }

        if !errors.is_empty() {
            return Err(PlanError::Validation(errors));
        }

        let mut event = Event::new(name, time).with_menu(self.menu.iter().cloned());
        event.members = members;
        event.venue = non_empty(&self.venue);
        event.notes = non_empty(&self.notes);
        Ok(event)
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Append `event`.
pub fn with_added(events: &[Event], event: Event) -> Vec<Event> {
    let mut updated = events.to_vec();
    updated.push(event);
    updated
}

/// Replace the event at `index`; `None` when the index is out of range.
pub fn with_replaced(events: &[Event], index: usize, event: Event) -> Option<Vec<Event>> {
    let mut updated = events.to_vec();
    *updated.get_mut(index)? = event;
    Some(updated)
}

/// Remove the event at `index`; `None` when the index is out of range.
pub fn without(events: &[Event], index: usize) -> Option<Vec<Event>> {
    if index >= events.len() {
        return None;
    }
    let mut updated = events.to_vec();
    updated.remove(index);
    Some(updated)
}
