mod commands;
mod render;
mod session;
mod utils;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use eventplan_core::menu::Dietary;
use owo_colors::OwoColorize;

#[derive(Parser)]
#[command(name = "eventplan")]
#[command(about = "Plan catered events: pick dates, add events with menus, export the schedule")]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show wizard progress and the selected dates
    Status,
    /// Select, deselect and focus dates
    Dates {
        #[command(subcommand)]
        command: DatesCommand,
    },
    /// Manage the events on a date
    Events {
        #[command(subcommand)]
        command: EventsCommand,
    },
    /// Move the wizard: "next", "prev" or a step number (1-3)
    Step { target: String },
    /// Review the full schedule
    Show,
    /// Write the schedule document
    Export {
        /// Output file (defaults to export_path from the config)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
    /// Browse, search and extend the menu catalog
    Menu {
        #[command(subcommand)]
        command: Option<MenuCommand>,

        /// Only list this category
        #[arg(short, long)]
        category: Option<String>,

        /// List occasion templates instead of items
        #[arg(long)]
        templates: bool,

        /// Match item names and descriptions
        #[arg(short, long)]
        search: Option<String>,

        /// Only items carrying every listed tag (e.g. "vegetarian,gluten-free")
        #[arg(long, value_delimiter = ',')]
        diet: Vec<Dietary>,
    },
    /// Interactive session with automatic saving
    Shell,
    /// Clear all saved state and start over
    Reset {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show or initialize configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[derive(Subcommand)]
pub enum DatesCommand {
    /// Add a date, or remove it (and its events) if already selected
    Toggle {
        /// Dates as YYYY-MM-DD
        #[arg(required = true)]
        dates: Vec<String>,
    },
    /// Make a date the one events are added to
    Focus { date: String },
    /// List selected dates
    List,
}

#[derive(Subcommand)]
pub enum MenuCommand {
    /// Save a custom menu item
    Add {
        /// Category id (see `eventplan menu`)
        #[arg(short, long)]
        category: String,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        description: Option<String>,

        /// Dietary tags, comma-separated
        #[arg(long, value_delimiter = ',')]
        diet: Vec<Dietary>,
    },
}

#[derive(Subcommand)]
pub enum EventsCommand {
    /// List events on the active (or given) date
    List {
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Add an event
    Add {
        #[command(flatten)]
        fields: EventFields,
    },
    /// Change fields of an event, by number
    Edit {
        number: usize,

        #[command(flatten)]
        fields: EventFields,
    },
    /// Delete an event, by number
    Remove {
        number: usize,

        #[arg(short, long)]
        date: Option<String>,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct EventFields {
    /// Date to edit (defaults to the active date)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Occasion name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Time of day (HH:MM)
    #[arg(short, long)]
    pub time: Option<String>,

    /// Number of guests
    #[arg(short, long)]
    pub members: Option<String>,

    #[arg(long)]
    pub venue: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Menu item ids (repeatable or comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub menu: Vec<String>,

    /// Start from an occasion template (e.g. "haldi")
    #[arg(long)]
    pub template: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    utils::logging::init(cli.verbose);

    if let Err(e) = run(cli.command).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        eprintln!(
            "{}",
            "If the saved plan looks broken, `eventplan reset` clears it.".dimmed()
        );
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Status => session::with_store(|store| commands::status::run(store)),
        Commands::Dates { command } => session::with_store(|store| match command {
            DatesCommand::Toggle { dates } => commands::dates::toggle(store, &dates),
            DatesCommand::Focus { date } => commands::dates::focus(store, &date),
            DatesCommand::List => commands::dates::list(store),
        }),
        Commands::Events { command } => session::with_store(|store| match command {
            EventsCommand::List { date } => commands::events::list(store, date.as_deref()),
            EventsCommand::Add { fields } => commands::events::add(store, fields),
            EventsCommand::Edit { number, fields } => commands::events::edit(store, number, fields),
            EventsCommand::Remove { number, date, yes } => {
                commands::events::remove(store, number, date.as_deref(), yes)
            }
        }),
        Commands::Step { target } => session::with_store(|store| commands::step::run(store, &target)),
        Commands::Show => session::with_store(|store| commands::show::run(store)),
        Commands::Export { output } => {
            let config = session::load_config()?;
            let output = output.unwrap_or_else(|| config.export_path());
            session::with_store(|store| commands::export::run(store, &output))
        }
        Commands::Menu {
            command: Some(MenuCommand::Add {
                category,
                name,
                description,
                diet,
            }),
            ..
        } => commands::menu::add(&category, &name, description.as_deref(), &diet),
        Commands::Menu {
            command: None,
            category,
            templates,
            search,
            diet,
        } => commands::menu::run(category.as_deref(), templates, search.as_deref(), &diet),
        Commands::Shell => commands::shell::run().await,
        Commands::Reset { yes } => commands::reset::run(yes),
        Commands::Config { init } => commands::config::run(init),
    }
}
