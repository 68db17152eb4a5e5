use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the real config and data directories.
fn eventplan(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("eventplan").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env("EVENTPLAN_DATA_DIR", data_dir(home))
        .env("NO_COLOR", "1");
    cmd
}

fn data_dir(home: &TempDir) -> std::path::PathBuf {
    home.path().join("state")
}

fn read_key(home: &TempDir, key: &str) -> Option<String> {
    std::fs::read_to_string(data_dir(home).join(key)).ok()
}

fn add_haldi(home: &TempDir) {
    eventplan(home)
        .args(["dates", "toggle", "2030-06-01"])
        .assert()
        .success();
    eventplan(home)
        .args([
            "events", "add", "--name", "Haldi", "--time", "10:00", "--menu", "samosa",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added: Haldi"));
}

#[test]
fn test_toggle_date_then_status() {
    let home = TempDir::new().unwrap();

    eventplan(&home)
        .args(["dates", "toggle", "2030-06-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saturday, June 1, 2030"));

    eventplan(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saturday, June 1, 2030"))
        .stdout(predicate::str::contains("0 Events across 1 date"));

    let saved = read_key(&home, "selectedDates").unwrap();
    assert!(saved.contains("2030-06-01"));
}

#[test]
fn test_blocked_step_is_reported_not_failed() {
    let home = TempDir::new().unwrap();

    eventplan(&home)
        .args(["step", "2"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Please select at least one date before proceeding",
        ));

    assert_eq!(read_key(&home, "currentStep"), None);
}

#[test]
fn test_haldi_flow_reaches_review() {
    let home = TempDir::new().unwrap();
    add_haldi(&home);

    eventplan(&home)
        .args(["step", "3"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Please").not());
    assert_eq!(read_key(&home, "currentStep").as_deref(), Some("2"));

    eventplan(&home)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Haldi"))
        .stdout(predicate::str::contains("Samosa"));
}

#[test]
fn test_add_event_rejects_unknown_menu_item() {
    let home = TempDir::new().unwrap();
    eventplan(&home)
        .args(["dates", "toggle", "2030-06-01"])
        .assert()
        .success();

    eventplan(&home)
        .args([
            "events", "add", "--name", "Lunch", "--time", "12:00", "--menu", "caviar",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown menu item 'caviar'"));
}

#[test]
fn test_corrupt_saved_dates_are_cleared() {
    let home = TempDir::new().unwrap();
    let dir = data_dir(&home);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("selectedDates"), "not json").unwrap();
    std::fs::write(dir.join("currentStep"), "1").unwrap();

    eventplan(&home)
        .arg("status")
        .assert()
        .success()
        .stderr(predicate::str::contains("unreadable"))
        .stdout(predicate::str::contains("No dates selected"));

    assert!(!dir.join("selectedDates").exists());
    assert!(!dir.join("currentStep").exists());
}

#[test]
fn test_export_writes_document() {
    let home = TempDir::new().unwrap();
    add_haldi(&home);
    let output = home.path().join("out").join("schedule.txt");

    eventplan(&home)
        .args(["export", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 event, 1 page"));

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.contains("Event Menu Schedule"));
    assert!(text.contains("Haldi"));
    assert!(text.contains("Page 1 of 1"));
}

#[test]
fn test_export_refuses_empty_plan() {
    let home = TempDir::new().unwrap();
    let output = home.path().join("schedule.txt");

    eventplan(&home)
        .args(["export", "--output"])
        .arg(&output)
        .assert()
        .failure();
    assert!(!Path::new(&output).exists());
}

#[test]
fn test_reset_clears_everything() {
    let home = TempDir::new().unwrap();
    add_haldi(&home);
    assert!(read_key(&home, "selectedDates").is_some());

    eventplan(&home)
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared saved plan"));

    assert_eq!(read_key(&home, "selectedDates"), None);
    assert_eq!(read_key(&home, "currentStep"), None);
    assert_eq!(read_key(&home, "activeDate"), None);
}

#[test]
fn test_menu_lists_templates() {
    let home = TempDir::new().unwrap();
    eventplan(&home)
        .args(["menu", "--templates"])
        .assert()
        .success()
        .stdout(predicate::str::contains("haldi"));
}

#[test]
fn test_shell_flushes_on_quit_and_warns() {
    let home = TempDir::new().unwrap();

    eventplan(&home)
        .arg("shell")
        .write_stdin("toggle 2030-06-01\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saturday, June 1, 2030"))
        .stderr(predicate::str::contains(
            "You have unsaved changes. Are you sure you want to leave?",
        ));

    let saved = read_key(&home, "selectedDates").unwrap();
    assert!(saved.contains("2030-06-01"));
    assert_eq!(read_key(&home, "activeDate").as_deref(), Some("2030-06-01"));
}

#[test]
fn test_shell_flushes_at_end_of_input() {
    let home = TempDir::new().unwrap();

    eventplan(&home)
        .arg("shell")
        .write_stdin("toggle 2030-06-01 2030-06-02\n")
        .assert()
        .success();

    let saved = read_key(&home, "selectedDates").unwrap();
    assert!(saved.contains("2030-06-02"));
}

#[test]
fn test_shell_save_command() {
    let home = TempDir::new().unwrap();

    eventplan(&home)
        .arg("shell")
        .write_stdin("toggle 2030-06-01\nsave\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes saved successfully"))
        .stderr(predicate::str::contains("unsaved changes").not());

    assert!(read_key(&home, "selectedDates").is_some());
}

#[test]
fn test_menu_search_with_diet_filter() {
    let home = TempDir::new().unwrap();

    eventplan(&home)
        .args(["menu", "--search", "kulfi", "--diet", "contains-dairy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kulfi"))
        .stdout(predicate::str::contains("Appetizers").not());

    eventplan(&home)
        .args(["menu", "--diet", "keto"])
        .assert()
        .failure();
}

#[test]
fn test_custom_menu_item_can_be_selected() {
    let home = TempDir::new().unwrap();

    let output = eventplan(&home)
        .args([
            "menu", "add", "--category", "desserts", "--name", "Saffron Shrikhand", "--diet",
            "vegetarian",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    let start = stdout.find("custom-").unwrap();
    let end = start + stdout[start..].find(')').unwrap();
    let id = &stdout[start..end];
    assert!(id.ends_with("-saffron-shrikhand"));
    assert!(read_key(&home, "customMenuItems").unwrap().contains(id));

    eventplan(&home)
        .args(["dates", "toggle", "2030-06-01"])
        .assert()
        .success();
    eventplan(&home)
        .args(["events", "add", "--name", "Lunch", "--time", "12:30", "--menu", id])
        .assert()
        .success();

    eventplan(&home)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saffron Shrikhand"));

    eventplan(&home)
        .args(["menu", "--search", "shrikhand"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(custom)"));
}
