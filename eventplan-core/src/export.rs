//! Printable schedule export.
//!
//! Lays the schedule out on fixed-height pages (A4-like units: content may
//! start a new block while `y <= PAGE_BREAK_Y`), then renders each page as
//! plain text with a "Page i of n" footer. Progress is reported from 0 to 100.
//! The per-date ramp from 30 to 90 counts every selected date in the total
//! but only advances on dates that have events.

use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::date::ScheduleDate;
use crate::error::{PlanError, PlanResult};
use crate::event::Event;
use crate::menu::Menu;
use crate::schedule::Schedule;

pub const DOCUMENT_TITLE: &str = "Event Menu Schedule";
pub const DEFAULT_EXPORT_FILE: &str = "event-menu-schedule.txt";

const FIRST_PAGE_START_Y: u32 = 60;
const PAGE_START_Y: u32 = 30;
const PAGE_BREAK_Y: u32 = 250;
const DATE_HEADER_HEIGHT: u32 = 10;
const EVENT_HEADER_HEIGHT: u32 = 32;
const LINE_HEIGHT: u32 = 6;
const NOTE_LINE_HEIGHT: u32 = 5;
const NOTES_PADDING: u32 = 10;
const EVENT_GAP: u32 = 10;

const PAGE_WIDTH: usize = 80;
const NOTES_WRAP_WIDTH: usize = 72;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ScheduleDocument {
    pub generated_on: NaiveDate,
    pub pages: Vec<Page>,
    pub events: usize,
}

impl ScheduleDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Plain-text rendering; pages are separated by form feeds.
    pub fn render(&self) -> String {
        let total = self.pages.len();
        self.pages
            .iter()
            .map(|page| {
                let mut out = String::new();
                let rule = "═".repeat(PAGE_WIDTH);
                out.push_str(&rule);
                out.push('\n');
                for line in &page.lines {
                    out.push_str(line);
                    out.push('\n');
                }
                out.push('\n');
                out.push_str(&center(&format!("Page {} of {}", page.number, total)));
                out.push('\n');
                out.push_str(&rule);
                out.push('\n');
                out
            })
            .collect::<Vec<_>>()
            .join("\u{c}\n")
    }
}

/// Page cursor. Tracks the vertical position on the current page.
struct Paginator {
    pages: Vec<Page>,
    y: u32,
}

impl Paginator {
    fn new() -> Self {
        Paginator {
            pages: vec![Page {
                number: 1,
                lines: Vec::new(),
            }],
            y: FIRST_PAGE_START_Y,
        }
    }

    fn current(&mut self) -> &mut Vec<String> {
        let last = self.pages.len() - 1;
        &mut self.pages[last].lines
    }

    fn push(&mut self, line: impl Into<String>) {
        self.current().push(line.into());
    }

    /// Start a new page if the cursor is past the break line.
    fn break_if_needed(&mut self) {
        if self.y > PAGE_BREAK_Y {
            let number = self.pages.len() + 1;
            self.pages.push(Page {
                number,
                lines: Vec::new(),
            });
            self.y = PAGE_START_Y;
        }
    }

    fn date_header(&mut self, date: &ScheduleDate) {
        self.break_if_needed();
        let text = date.long_form();
        self.push(String::new());
        self.push(text.clone());
        self.push("─".repeat(text.chars().count()));
        self.y += DATE_HEADER_HEIGHT;
    }

    fn event(&mut self, event: &Event, menu: &Menu) {
        self.break_if_needed();

        let mut height = EVENT_HEADER_HEIGHT;
        self.push(format!("  {}", event.name));
        self.push(format!("    Time: {}", event.display_time()));
        if let Some(members) = event.members {
            self.push(format!("    Guests: {}", members));
            height += LINE_HEIGHT;
        }
        if let Some(venue) = &event.venue {
            self.push(format!("    Venue: {}", venue));
            height += LINE_HEIGHT;
        }

        self.push("    Menu Selection");
        for item in &event.menu {
            self.push(format!("      • {}", menu.item_name(item)));
            height += LINE_HEIGHT;
        }

        if let Some(notes) = event.notes.as_deref().filter(|n| !n.is_empty()) {
            self.push("    Notes:");
            let wrapped = wrap(notes, NOTES_WRAP_WIDTH);
            height += wrapped.len() as u32 * NOTE_LINE_HEIGHT + NOTES_PADDING;
            for line in wrapped {
                self.push(format!("      {}", line));
            }
        }
        self.push(String::new());

        self.y += height + EVENT_GAP;
    }
}

/// Lay out `schedule`. Dates without events are skipped; events within a
/// date are ordered by time.
pub fn build_document(
    schedule: &Schedule,
    menu: &Menu,
    generated_on: NaiveDate,
    mut progress: impl FnMut(u8),
) -> ScheduleDocument {
    progress(0);
    let mut pages = Paginator::new();
    progress(10);

    pages.push(center(DOCUMENT_TITLE));
    progress(20);
    pages.push(center(&generated_on.format("%B %-d, %Y").to_string()));
    progress(30);

    let total = schedule.len();
    let mut done = 0;
    let mut event_count = 0;

    for (date, events) in schedule.iter().filter(|(_, events)| !events.is_empty()) {
        let mut sorted = events.to_vec();
        sorted.sort_by(Event::cmp_by_time);

        pages.date_header(date);
        for event in &sorted {
            pages.event(event, menu);
        }
        event_count += sorted.len();

        done += 1;
        let percent = 30 + (60 * done / total);
        progress(percent as u8);
        debug!(date = %date, events = sorted.len(), "laid out date");
    }

    progress(95);
    ScheduleDocument {
        generated_on,
        pages: pages.pages,
        events: event_count,
    }
}

/// Lay out and write the schedule to `path`. An empty schedule is refused.
pub fn export_schedule(
    schedule: &Schedule,
    menu: &Menu,
    path: &Path,
    generated_on: NaiveDate,
    mut progress: impl FnMut(u8),
) -> PlanResult<ScheduleDocument> {
    if schedule.is_empty() {
        return Err(PlanError::Export("No dates selected; nothing to export".into()));
    }

    let document = build_document(schedule, menu, generated_on, &mut progress);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, document.render())
        .map_err(|e| PlanError::Export(format!("Could not write {}: {}", path.display(), e)))?;
    progress(100);

    info!(
        path = %path.display(),
        pages = document.page_count(),
        events = document.events,
        "exported schedule"
    );
    Ok(document)
}

fn center(text: &str) -> String {
    let len = text.chars().count();
    let pad = PAGE_WIDTH.saturating_sub(len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// Greedy word wrap; words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if line.is_empty() {
                word.chars().count()
            } else {
                line.chars().count() + 1 + word.chars().count()
            };
            if needed > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> ScheduleDate {
        ScheduleDate::parse(s).unwrap()
    }

    fn generated() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
    }

    fn event(name: &str, time: &str) -> Event {
        Event::new(name, time).with_menu(["samosa"])
    }

    #[test]
    fn test_single_page_layout() {
        let mut schedule = Schedule::new();
        schedule.set_events(
            date("2025-06-01"),
            vec![event("Sangeet", "19:00"), event("Haldi", "10:00")],
        );
        schedule.set_events(date("2025-06-02"), vec![]);

        let doc = build_document(&schedule, &Menu::builtin(), generated(), |_| {});
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.events, 2);

        let text = doc.render();
        assert!(text.contains(DOCUMENT_TITLE));
        assert!(text.contains("May 1, 2025"));
        assert!(text.contains("Sunday, June 1, 2025"));
        assert!(!text.contains("June 2, 2025"));
        assert!(text.contains("• Samosa"));
        assert!(text.contains("Page 1 of 1"));

        let haldi = text.find("Haldi").unwrap();
        let sangeet = text.find("Sangeet").unwrap();
        assert!(haldi < sangeet, "events are ordered by time");
    }

    #[test]
    fn test_page_break_after_break_line() {
        // Each event is 32 + 6 + 10 = 48 units tall; starting at 70 the fifth
        // event begins past the break line.
        let mut schedule = Schedule::new();
        let events = (0..5).map(|i| event(&format!("Event {i}"), &format!("0{i}:00"))).collect();
        schedule.set_events(date("2025-06-01"), events);

        let doc = build_document(&schedule, &Menu::builtin(), generated(), |_| {});
        assert_eq!(doc.page_count(), 2);
        assert!(doc.pages[0].lines.iter().any(|l| l.contains("Event 3")));
        assert!(doc.pages[1].lines.iter().any(|l| l.contains("Event 4")));

        let text = doc.render();
        assert!(text.contains("Page 1 of 2"));
        assert!(text.contains("Page 2 of 2"));
    }

    #[test]
    fn test_notes_are_wrapped() {
        let mut schedule = Schedule::new();
        let mut e = event("Reception", "20:00");
        e.notes = Some("word ".repeat(40));
        schedule.set_events(date("2025-06-01"), vec![e]);

        let doc = build_document(&schedule, &Menu::builtin(), generated(), |_| {});
        let note_lines: Vec<_> = doc.pages[0]
            .lines
            .iter()
            .filter(|l| l.trim_start().starts_with("word"))
            .collect();
        assert_eq!(note_lines.len(), 3);
        assert!(note_lines.iter().all(|l| l.trim().chars().count() <= NOTES_WRAP_WIDTH));
    }

    #[test]
    fn test_progress_is_monotonic_and_completes() {
        let tmp = tempfile::tempdir().unwrap();
        let mut schedule = Schedule::new();
        schedule.set_events(date("2025-06-01"), vec![event("A", "10:00")]);
        schedule.set_events(date("2025-06-02"), vec![event("B", "11:00")]);

        let mut seen = Vec::new();
        let path = tmp.path().join("out/schedule.txt");
        export_schedule(&schedule, &Menu::builtin(), &path, generated(), |p| seen.push(p)).unwrap();

        assert_eq!(seen, vec![0, 10, 20, 30, 60, 90, 95, 100]);
        assert!(std::fs::read_to_string(&path).unwrap().contains("Monday, June 2, 2025"));
    }

    #[test]
    fn test_progress_counts_dates_without_events() {
        let mut schedule = Schedule::new();
        schedule.set_events(date("2025-06-01"), vec![event("A", "10:00")]);
        schedule.set_events(date("2025-06-02"), vec![]);

        let mut seen = Vec::new();
        build_document(&schedule, &Menu::builtin(), generated(), |p| seen.push(p));
        assert_eq!(seen, vec![0, 10, 20, 30, 60, 95]);
    }

    #[test]
    fn test_custom_menu_names_are_printed() {
        let mut storage = crate::storage::MemoryStorage::new();
        let mut menu = Menu::builtin();
        let item = menu
            .add_custom(&mut storage, "desserts", "Saffron Shrikhand", None, &[], 1)
            .unwrap();
        let mut schedule = Schedule::new();
        schedule.set_events(
            date("2025-06-01"),
            vec![Event::new("Lunch", "12:00").with_menu([item.id])],
        );

        let text = build_document(&schedule, &menu, generated(), |_| {}).render();
        assert!(text.contains("• Saffron Shrikhand"));
    }

    #[test]
    fn test_empty_schedule_is_refused() {
        let tmp = tempfile::tempdir().unwrap();
        let result = export_schedule(
            &Schedule::new(),
            &Menu::builtin(),
            &tmp.path().join("x.txt"),
            generated(),
            |_| {},
        );
        assert!(matches!(result, Err(PlanError::Export(_))));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("a b c", 3), vec!["a b", "c"]);
        assert_eq!(wrap("averyveryverylongword x", 5), vec!["averyveryverylongword", "x"]);
    }
}
