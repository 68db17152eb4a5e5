//! Catering event records attached to a schedule date.
//!
//! The serialized shape is the one persisted under `selectedDates`:
//! `{ name, time, members?, venue?, notes?, menu }`, with `members` stored as
//! text.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A single event on a schedule date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    /// Time of day, `HH:MM` as produced by a time input
    pub time: String,
    /// Expected number of guests
    #[serde(default, skip_serializing_if = "Option::is_none", with = "members_text")]
    pub members: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Selected menu item ids, in selection order
    #[serde(default)]
    pub menu: Vec<String>,
}

impl Event {
    pub fn new(name: impl Into<String>, time: impl Into<String>) -> Self {
        Event {
            name: name.into(),
            time: time.into(),
            members: None,
            venue: None,
            notes: None,
            menu: Vec::new(),
        }
    }

    pub fn with_menu<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        for item in items {
            self.select_menu_item(item);
        }
        self
    }

    /// The one predicate shared by write-side recovery and read-side
    /// validation: both `name` and `time` must be non-empty.
    pub fn is_well_formed(&self) -> bool {
        !self.name.is_empty() && !self.time.is_empty()
    }

    /// Add a menu item. Selecting an item twice is a no-op.
    pub fn select_menu_item(&mut self, item: impl Into<String>) {
        let item = item.into();
        if !self.menu.contains(&item) {
            self.menu.push(item);
        }
    }

    pub fn deselect_menu_item(&mut self, item: &str) {
        self.menu.retain(|m| m != item);
    }

    pub fn toggle_menu_item(&mut self, item: &str) {
        if self.menu.iter().any(|m| m == item) {
            self.deselect_menu_item(item);
        } else {
            self.menu.push(item.to_string());
        }
    }

    pub fn parsed_time(&self) -> Option<NaiveTime> {
        parse_time(&self.time)
    }

    /// 12-hour rendering ("10:00 AM"), or the raw text if it does not parse.
    pub fn display_time(&self) -> String {
        match self.parsed_time() {
            Some(t) => t.format("%-I:%M %p").to_string(),
            None => self.time.clone(),
        }
    }

    /// Order by time of day; unparseable times sort last.
    pub fn cmp_by_time(&self, other: &Event) -> Ordering {
        match (self.parsed_time(), other.parsed_time()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.display_time())
    }
}

pub fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

/// `members` travels as text. Empty or non-numeric text reads back as absent;
/// a bare JSON number is accepted too.
mod members_text {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    pub fn serialize<S: Serializer>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(n) => serializer.collect_str(n),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        let raw = Option::<Raw>::deserialize(deserializer).unwrap_or(None);
        Ok(match raw {
            Some(Raw::Text(s)) => s.trim().parse().ok(),
            Some(Raw::Number(n)) => u32::try_from(n).ok(),
            None => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_well_formed() {
        assert!(Event::new("Haldi", "10:00").is_well_formed());
        assert!(!Event::new("", "10:00").is_well_formed());
        assert!(!Event::new("Haldi", "").is_well_formed());
    }

    #[test]
    fn test_menu_selection_is_idempotent() {
        let mut event = Event::new("Haldi", "10:00").with_menu(["samosa", "samosa", "kheer"]);
        assert_eq!(event.menu, vec!["samosa", "kheer"]);

        event.select_menu_item("samosa");
        assert_eq!(event.menu, vec!["samosa", "kheer"]);

        event.toggle_menu_item("samosa");
        assert_eq!(event.menu, vec!["kheer"]);
        event.toggle_menu_item("samosa");
        assert_eq!(event.menu, vec!["kheer", "samosa"]);
    }

    #[test]
    fn test_serialized_shape() {
        let mut event = Event::new("Haldi", "10:00").with_menu(["samosa"]);
        event.members = Some(80);
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({ "name": "Haldi", "time": "10:00", "members": "80", "menu": ["samosa"] })
        );
    }

    #[test]
    fn test_members_read_leniently() {
        let event: Event =
            serde_json::from_value(json!({ "name": "A", "time": "09:00", "members": "" })).unwrap();
        assert_eq!(event.members, None);
        assert!(event.menu.is_empty());

        let event: Event =
            serde_json::from_value(json!({ "name": "A", "time": "09:00", "members": 12 })).unwrap();
        assert_eq!(event.members, Some(12));

        let event: Event =
            serde_json::from_value(json!({ "name": "A", "time": "09:00", "members": "lots" }))
                .unwrap();
        assert_eq!(event.members, None);
    }

    #[test]
    fn test_missing_time_does_not_deserialize() {
        let result = serde_json::from_value::<Event>(json!({ "name": "A", "menu": [] }));
        assert!(result.is_err());
        let result = serde_json::from_value::<Event>(json!({ "name": 5, "time": "09:00" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_display_time() {
        assert_eq!(Event::new("A", "10:00").display_time(), "10:00 AM");
        assert_eq!(Event::new("A", "18:30").display_time(), "6:30 PM");
        assert_eq!(Event::new("A", "evening").display_time(), "evening");
    }

    #[test]
    fn test_cmp_by_time() {
        let mut events = vec![
            Event::new("late", "19:00"),
            Event::new("unknown", "soon"),
            Event::new("early", "08:15"),
        ];
        events.sort_by(Event::cmp_by_time);
        let names: Vec<_> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["early", "late", "unknown"]);
    }
}
