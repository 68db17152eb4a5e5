/// Storage key holding the serialized `[date, events]` pairs.
pub const SELECTED_DATES_KEY: &str = "selectedDates";

/// Storage key holding the wizard step index ("0", "1" or "2").
pub const CURRENT_STEP_KEY: &str = "currentStep";

/// Storage key holding the raw active date string.
pub const ACTIVE_DATE_KEY: &str = "activeDate";

/// All keys owned by the schedule store.
pub const STORE_KEYS: [&str; 3] = [SELECTED_DATES_KEY, CURRENT_STEP_KEY, ACTIVE_DATE_KEY];

/// Storage key holding user-added menu items, grouped by category id.
/// Not owned by the schedule store and not cleared by a reset.
pub const CUSTOM_MENU_ITEMS_KEY: &str = "customMenuItems";

/// Default delay between the last mutation and the automatic save.
pub const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 1000;

/// How far into the future a date may be selected.
pub const SELECTION_HORIZON_YEARS: i32 = 10;

/// Shown when a session is about to end with unsaved changes.
pub const UNSAVED_CHANGES_WARNING: &str =
    "You have unsaved changes. Are you sure you want to leave?";
