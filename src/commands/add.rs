use anyhow::Result;
use eventbook_core::config::EventbookConfig;
use eventbook_core::{Clock, EventDraft};
use owo_colors::OwoColorize;

use super::{EventArgs, open_store, report};
use crate::prompt;

pub fn run(config: &EventbookConfig, fields: EventArgs) -> Result<()> {
    let mut store = open_store(config);

    let interactive = fields.title.is_none()
        || fields.description.is_none()
        || fields.venue.is_none()
        || fields.date.is_none();

    let draft = if interactive {
        let today = store.clock().today();
        let given = fields.clone();
        let draft = prompt::complete_new(fields.apply_to(EventDraft::default()), &given, today)?;
        println!();
        draft
    } else {
        fields.apply_to(EventDraft::default())
    };

    let event = store.add(&draft).map_err(report)?;

    println!("{}", format!("  Created: {}", event.title).green());
    println!("{}", format!("  id: {}", event.id).dimmed());
    Ok(())
}
