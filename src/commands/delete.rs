use anyhow::Result;
use dialoguer::Confirm;
use eventbook_core::EventId;
use eventbook_core::config::EventbookConfig;
use owo_colors::OwoColorize;

use super::{not_found, open_store, report};

pub fn run(config: &EventbookConfig, id: &EventId, yes: bool) -> Result<()> {
    let mut store = open_store(config);
    let title = store.get(id).ok_or_else(|| not_found(id))?.title.clone();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "  Are you sure you want to delete this event? ({title})"
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "  Nothing deleted".dimmed());
            return Ok(());
        }
    }

    let removed = store.delete(id).map_err(report)?;

    println!("{}", format!("  Deleted: {}", removed.title).red());
    Ok(())
}
