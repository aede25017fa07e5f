use anyhow::Result;
use eventbook_core::config::EventbookConfig;
use eventbook_core::{Clock, EventDraft, EventId};
use owo_colors::OwoColorize;

use super::{EventArgs, not_found, open_store, report};
use crate::prompt;

pub fn run(config: &EventbookConfig, id: &EventId, fields: EventArgs) -> Result<()> {
    let mut store = open_store(config);
    let current = EventDraft::from(store.get(id).ok_or_else(|| not_found(id))?);

    // No flags: walk through every field with the current values pre-filled.
    let draft = if fields.is_empty() {
        let draft = prompt::revise(current, store.clock().today())?;
        println!();
        draft
    } else {
        fields.apply_to(current)
    };

    let event = store.update(id, &draft).map_err(report)?;

    println!("{}", format!("  Updated: {}", event.title).green());
    Ok(())
}
