//! Terminal rendering for eventplan types.
//!
//! Extension traits that add colored output to eventplan-core types using
//! owo_colors.

use eventplan_core::menu::Menu;
use eventplan_core::storage::KeyValueStorage;
use eventplan_core::{Event, ScheduleDate, ScheduleStore, WizardStep};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

/// An event together with the catalog its menu ids resolve against.
pub struct EventCard<'a> {
    pub event: &'a Event,
    pub menu: &'a Menu,
}

impl Render for EventCard<'_> {
    fn render(&self) -> String {
        let event = self.event;
        let mut lines = vec![format!(
            "{}  {}",
            event.name.bold(),
            event.display_time().dimmed()
        )];
        if let Some(members) = event.members {
            lines.push(format!("   Number of guests: {}", members));
        }
        if let Some(venue) = &event.venue {
            lines.push(format!("   Venue: {}", venue));
        }
        if !event.menu.is_empty() {
            lines.push(format!("   {}", "Menu".dimmed()));
            for item in &event.menu {
                lines.push(format!("     • {}", self.menu.item_name(item)));
            }
        }
        if let Some(notes) = &event.notes {
            lines.push(format!("   {} {}", "Notes:".dimmed(), notes));
        }
        lines.join("\n")
    }
}

/// "1 Event" / "3 Events"
pub fn event_count(count: usize) -> String {
    format!("{} {}", count, if count == 1 { "Event" } else { "Events" })
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// One line per selected date, marking the active one.
pub fn render_date_row(date: &ScheduleDate, events: &[Event], active: bool) -> String {
    let marker = if active { "▸".cyan().to_string() } else { " ".to_string() };
    let label = date.long_form();
    let label = if active {
        label.cyan().bold().to_string()
    } else {
        label
    };
    format!(
        "{} {}  {}",
        marker,
        label,
        event_count(events.len()).dimmed()
    )
}

/// The three-step progress bar, with unavailable steps dimmed.
pub fn render_stepper<S: KeyValueStorage>(store: &ScheduleStore<S>) -> String {
    WizardStep::ALL
        .iter()
        .map(|&step| {
            let label = step.to_string();
            if step == store.step() {
                format!("[{}]", label.bold())
            } else if store.can_advance_to(step) {
                label
            } else {
                format!("{} {}", label.dimmed(), "(not available yet)".dimmed())
            }
        })
        .collect::<Vec<_>>()
        .join("  →  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_count() {
        assert_eq!(event_count(0), "0 Events");
        assert_eq!(event_count(1), "1 Event");
        assert_eq!(event_count(2), "2 Events");
    }

    #[test]
    fn test_event_render_uses_menu_names() {
        let event = Event::new("Haldi", "10:00").with_menu(["samosa", "custom-9-mystery"]);
        let menu = Menu::builtin();
        let text = EventCard { event: &event, menu: &menu }.render();
        assert!(text.contains("Haldi"));
        assert!(text.contains("10:00 AM"));
        assert!(text.contains("• Samosa"));
        assert!(text.contains("• custom-9-mystery"));
    }
}
