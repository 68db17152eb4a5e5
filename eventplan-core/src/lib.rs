//! Core types for the eventplan wizard.
//!
//! This crate owns everything below the presentation layer:
//! - `Schedule`, `Event` and `ScheduleDate`, the date → events model
//! - `ScheduleStore`, which persists and restores that model through a
//!   `KeyValueStorage` and repairs corrupt saved state
//! - `AutoSaver` for debounced write-behind saves
//! - the menu catalog, event form validation and schedule export

pub mod autosave;
pub mod config;
pub mod constants;
pub mod date;
pub mod error;
pub mod event;
pub mod export;
pub mod form;
pub mod menu;
pub mod schedule;
pub mod storage;
pub mod store;
pub mod wizard;

pub use date::ScheduleDate;
pub use error::{PlanError, PlanResult};
pub use event::Event;
pub use schedule::Schedule;
pub use store::{PersistOutcome, RestoreReport, ScheduleStore};
pub use wizard::{WizardState, WizardStep};
