use anyhow::{Context, Result};
use chrono::Utc;
use eventplan_core::menu::{self, Dietary, Menu, MenuCategory, MenuItem};
use owo_colors::OwoColorize;

use crate::session;

pub fn run(
    category: Option<&str>,
    templates: bool,
    search: Option<&str>,
    diet: &[Dietary],
) -> Result<()> {
    if templates {
        for template in menu::templates() {
            println!("{} {}", template.id.bold(), template.name);
            println!("  {}", template.description.dimmed());
            println!("  {}", template.item_ids().collect::<Vec<_>>().join(", "));
        }
        return Ok(());
    }

    let config = session::load_config()?;
    let catalog = Menu::load(&session::storage(&config)?);

    if search.is_some() || !diet.is_empty() {
        let query = search.unwrap_or_default();
        let mut results = catalog.search(query, diet);
        if let Some(id) = category {
            let wanted = lookup_category(id)?;
            results.retain(|(c, _)| c.id == wanted.id);
        }
        if results.is_empty() {
            println!("{}", "No menu items match".dimmed());
            return Ok(());
        }
        for (category, items) in results {
            print_category(category, items.len());
            print_items(&items);
        }
        return Ok(());
    }

    match category {
        Some(id) => {
            let category = lookup_category(id)?;
            let items = catalog.items(category);
            print_category(category, items.len());
            print_items(&items);
        }
        None => {
            for category in menu::categories() {
                print_category(category, catalog.items(category).len());
            }
        }
    }
    Ok(())
}

/// Save a custom item so it can be picked with `--menu <id>`.
pub fn add(category: &str, name: &str, description: Option<&str>, diet: &[Dietary]) -> Result<()> {
    let config = session::load_config()?;
    let mut storage = session::storage(&config)?;
    let mut catalog = Menu::load(&storage);

    let item = catalog
        .add_custom(
            &mut storage,
            category,
            name,
            description,
            diet,
            Utc::now().timestamp_millis(),
        )
        .context("Failed to add menu item")?;

    println!(
        "{}",
        format!("  Added {} to {} ({})", item.name, item.category, item.id).green()
    );
    Ok(())
}

fn lookup_category(id: &str) -> Result<&'static MenuCategory> {
    menu::category(id).ok_or_else(|| {
        let known: Vec<_> = menu::categories().iter().map(|c| c.id).collect();
        anyhow::anyhow!("Unknown category '{}'. Available: {}", id, known.join(", "))
    })
}

fn print_category(category: &MenuCategory, count: usize) {
    println!(
        "{} {} {}  {}",
        category.icon,
        category.name.bold(),
        format!("[{}]", category.id).dimmed(),
        format!("{} items", count).dimmed()
    );
    println!("   {}", category.description.dimmed());
}

fn print_items(items: &[MenuItem]) {
    for item in items {
        let tags: Vec<_> = item.dietary.iter().map(|d| d.icon()).collect();
        let custom = if item.custom { " (custom)" } else { "" };
        println!(
            "   {} {}{} {}",
            tags.join(""),
            item.name,
            custom.dimmed(),
            format!("({})", item.id).dimmed()
        );
        if let Some(description) = &item.description {
            println!("      {}", description.dimmed());
        }
    }
}
