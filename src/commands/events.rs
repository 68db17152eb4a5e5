use anyhow::Result;
use dialoguer::Confirm;
use eventplan_core::form::{self, EventDraft};
use eventplan_core::storage::KeyValueStorage;
use eventplan_core::menu::{self, Menu};
use eventplan_core::{PlanError, ScheduleStore};
use owo_colors::OwoColorize;

use super::resolve_date;
use crate::EventFields;
use crate::render::{EventCard, Render, event_count};

pub fn list<S: KeyValueStorage>(store: &ScheduleStore<S>, date: Option<&str>) -> Result<()> {
    let date = resolve_date(store, date)?;
    let events = store.schedule().events(&date).unwrap_or(&[]);

    let menu = Menu::load(store.storage());

    println!("{} on {}", event_count(events.len()), date.long_form().bold());
    for (i, event) in events.iter().enumerate() {
        println!();
        println!("{}. {}", i + 1, EventCard { event, menu: &menu }.render());
    }
    Ok(())
}

pub fn add<S: KeyValueStorage>(store: &mut ScheduleStore<S>, fields: EventFields) -> Result<()> {
    let date = resolve_date(store, fields.date.as_deref())?;
    let mut draft = EventDraft::default();
    apply_fields(&mut draft, fields, &Menu::load(store.storage()))?;

    let event = draft.validate().map_err(explain)?;
    let events = store.schedule().events(&date).unwrap_or(&[]);
    let updated = form::with_added(events, event.clone());
    store.set_events(date, updated);

    println!("{}", format!("  Added: {} on {}", event, date).green());
    Ok(())
}

pub fn edit<S: KeyValueStorage>(
    store: &mut ScheduleStore<S>,
    number: usize,
    fields: EventFields,
) -> Result<()> {
    let date = resolve_date(store, fields.date.as_deref())?;
    let events = store.schedule().events(&date).unwrap_or(&[]);
    let index = to_index(number, events.len())?;

    let mut draft = EventDraft::from_event(&events[index]);
    apply_fields(&mut draft, fields, &Menu::load(store.storage()))?;
    let event = draft.validate().map_err(explain)?;

    let updated = form::with_replaced(events, index, event.clone())
        .ok_or_else(|| anyhow::anyhow!("Event {} no longer exists", number))?;
    store.set_events(date, updated);

    println!("{}", format!("  Updated: {}", event).yellow());
    Ok(())
}

pub fn remove<S: KeyValueStorage>(
    store: &mut ScheduleStore<S>,
    number: usize,
    date: Option<&str>,
    yes: bool,
) -> Result<()> {
    let date = resolve_date(store, date)?;
    let events = store.schedule().events(&date).unwrap_or(&[]);
    let index = to_index(number, events.len())?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("  Delete {}?", events[index].name))
            .default(false)
            .interact()?;
        if !confirmed {
            return Ok(());
        }
    }

    let removed = events[index].clone();
    let updated = form::without(events, index)
        .ok_or_else(|| anyhow::anyhow!("Event {} no longer exists", number))?;
    store.set_events(date, updated);

    println!("{}", format!("  Deleted: {}", removed).red());
    Ok(())
}

/// Overlay command-line fields on a draft. A template goes first so explicit
/// flags win over it.
fn apply_fields(draft: &mut EventDraft, fields: EventFields, catalog: &Menu) -> Result<()> {
    if let Some(id) = fields.template.as_deref() {
        let template = menu::template(id).ok_or_else(|| {
            let known: Vec<_> = menu::templates().iter().map(|t| t.id).collect();
            anyhow::anyhow!("Unknown template '{}'. Available: {}", id, known.join(", "))
        })?;
        draft.apply_template(template);
    }

    if let Some(unknown) = fields.menu.iter().find(|id| catalog.find_item(id).is_none()) {
        anyhow::bail!(
            "Unknown menu item '{}'. Browse items with `eventplan menu`",
            unknown
        );
    }

    if let Some(name) = fields.name {
        draft.name = name;
    }
    if let Some(time) = fields.time {
        draft.time = time;
    }
    if let Some(members) = fields.members {
        draft.members = members;
    }
    if let Some(venue) = fields.venue {
        draft.venue = venue;
    }
    if let Some(notes) = fields.notes {
        draft.notes = notes;
    }
    for item in fields.menu {
        if !draft.menu.contains(&item) {
            draft.menu.push(item);
        }
    }
    Ok(())
}

fn to_index(number: usize, len: usize) -> Result<usize> {
    if number == 0 || number > len {
        anyhow::bail!("No event number {} (there are {})", number, event_count(len));
    }
    Ok(number - 1)
}

/// One line per invalid field.
fn explain(err: PlanError) -> anyhow::Error {
    match err {
        PlanError::Validation(errors) => {
            let lines: Vec<_> = errors
                .iter()
                .map(|e| format!("  {}: {}", e.field, e.message))
                .collect();
            anyhow::anyhow!("Event not saved:\n{}", lines.join("\n"))
        }
        other => other.into(),
    }
}
