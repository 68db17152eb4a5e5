//! Interactive session. Changes are saved automatically after a quiet period
//! and flushed when the session ends.

use std::io::Write;

use anyhow::Result;
use eventplan_core::autosave::AutoSaver;
use eventplan_core::constants::UNSAVED_CHANGES_WARNING;
use eventplan_core::storage::FileStorage;
use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::EventFields;
use crate::commands;
use crate::session;

const HELP: &str = "\
Commands:
  status                      wizard progress and dates
  toggle <date>...            select or deselect dates (YYYY-MM-DD)
  focus <date>                add events to this date
  events                      list events on the active date
  add <HH:MM> <menu,ids> <name...>
  remove <n>                  delete event n on the active date
  next | prev | step <n>      move through the wizard
  show                        review the whole schedule
  export [path]               write the schedule document
  save                        save now
  quit                        save and leave";

pub async fn run() -> Result<()> {
    let config = session::load_config()?;
    let store = session::open_store(&config)?;
    let mut saver = AutoSaver::new(store, config.autosave_delay()?);

    println!("{}", "eventplan shell. Type `help` for commands.".dimmed());
    prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            words => {
                debug!(command = words[0], "shell command");
                if let Err(e) = dispatch(&mut saver, &config, words).await {
                    eprintln!("{}", format!("{:#}", e).red());
                }
            }
        }
        prompt();
    }

    if saver.has_unsaved_changes().await {
        eprintln!("{}", UNSAVED_CHANGES_WARNING.yellow());
    }
    let (outcome, _) = saver.shutdown().await;
    if let Some(outcome) = outcome {
        session::report_persist(outcome);
        if outcome.is_written() {
            println!("{}", "Changes saved".green());
        }
    }
    Ok(())
}

async fn dispatch(
    saver: &mut AutoSaver<FileStorage>,
    config: &eventplan_core::config::PlanConfig,
    words: &[&str],
) -> Result<()> {
    match words {
        ["help"] => println!("{}", HELP),
        ["status"] => saver.read(|s| commands::status::run(s)).await?,
        ["dates"] => saver.read(|s| commands::dates::list(s)).await?,
        ["toggle", dates @ ..] if !dates.is_empty() => {
            let dates: Vec<String> = dates.iter().map(|d| d.to_string()).collect();
            saver
                .update(|s| commands::dates::toggle(s, &dates))
                .await?
        }
        ["focus", date] => saver.update(|s| commands::dates::focus(s, date)).await?,
        ["events"] => saver.read(|s| commands::events::list(s, None)).await?,
        ["add", time, menu, name @ ..] if !name.is_empty() => {
            let fields = EventFields {
                name: Some(name.join(" ")),
                time: Some(time.to_string()),
                menu: menu.split(',').map(String::from).collect(),
                ..EventFields::default()
            };
            saver.update(|s| commands::events::add(s, fields)).await?
        }
        ["remove", n] => {
            let number: usize = n.parse()?;
            saver
                .update(|s| commands::events::remove(s, number, None, true))
                .await?
        }
        ["next"] | ["prev"] | ["back"] => {
            let target = words[0];
            saver.update(|s| commands::step::run(s, target)).await?
        }
        ["step", n] => saver.update(|s| commands::step::run(s, n)).await?,
        ["show"] => saver.read(|s| commands::show::run(s)).await?,
        ["export"] => {
            let output = config.export_path();
            saver.read(|s| commands::export::run(s, &output)).await?
        }
        ["export", path] => {
            let output = std::path::PathBuf::from(path);
            saver.read(|s| commands::export::run(s, &output)).await?
        }
        ["save"] => {
            let outcome = saver.save_now().await;
            session::report_persist(outcome);
            if outcome.is_written() {
                println!("{}", "Changes saved successfully".green());
            }
        }
        _ => anyhow::bail!("Unknown command '{}'. Type `help` for commands.", words.join(" ")),
    }
    Ok(())
}

fn prompt() {
    print!("{} ", "eventplan>".cyan());
    let _ = std::io::stdout().flush();
}
