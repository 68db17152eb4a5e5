use anyhow::Result;
use eventplan_core::config::PlanConfig;
use owo_colors::OwoColorize;

use crate::session;

pub fn run(init: bool) -> Result<()> {
    let config_path = PlanConfig::config_path()?;

    if init {
        if config_path.exists() {
            println!("Config already exists at {}", config_path.display());
        } else {
            PlanConfig::create_default_config(&config_path)?;
            println!("{}", format!("  Created {}", config_path.display()).green());
        }
    }

    let config = session::load_config()?;
    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", config.data_path()?.display());
    println!("  Export:  {}", config.export_path().display());
    println!("{}", "Settings".bold());
    println!("  Autosave delay:  {}", config.autosave_delay);

    Ok(())
}
