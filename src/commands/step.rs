use anyhow::Result;
use eventplan_core::storage::KeyValueStorage;
use eventplan_core::{PlanError, ScheduleStore, WizardStep};
use owo_colors::OwoColorize;

use crate::render::render_stepper;

pub fn run<S: KeyValueStorage>(store: &mut ScheduleStore<S>, target: &str) -> Result<()> {
    let target = parse_target(store.step(), target)?;
    go(store, target)?;
    println!("{}", render_stepper(store));
    Ok(())
}

/// Attempt the transition. A blocked gate is reported, not treated as a
/// failure.
pub fn go<S: KeyValueStorage>(store: &mut ScheduleStore<S>, target: WizardStep) -> Result<bool> {
    match store.go_to_step(target) {
        Ok(()) => Ok(true),
        Err(e @ PlanError::NavigationBlocked { .. }) => {
            eprintln!("{}", e.to_string().yellow());
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// "next", "prev"/"back", or a 1-based step number.
pub fn parse_target(current: WizardStep, target: &str) -> Result<WizardStep> {
    let step = match target.trim().to_lowercase().as_str() {
        "next" => current.next(),
        "prev" | "back" => current.prev(),
        n => n
            .parse::<u8>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(WizardStep::from_index),
    };
    step.ok_or_else(|| anyhow::anyhow!("No step '{}' from {}", target, current))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        let current = WizardStep::AddEvents;
        assert_eq!(parse_target(current, "next").unwrap(), WizardStep::Review);
        assert_eq!(parse_target(current, "back").unwrap(), WizardStep::SelectDates);
        assert_eq!(parse_target(current, "1").unwrap(), WizardStep::SelectDates);
        assert_eq!(parse_target(current, "3").unwrap(), WizardStep::Review);
        assert!(parse_target(current, "0").is_err());
        assert!(parse_target(current, "4").is_err());
        assert!(parse_target(WizardStep::Review, "next").is_err());
    }
}
