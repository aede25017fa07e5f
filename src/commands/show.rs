use anyhow::Result;
use eventbook_core::EventId;
use eventbook_core::config::EventbookConfig;

use super::{not_found, open_store};
use crate::render;

pub fn run(config: &EventbookConfig, id: &EventId) -> Result<()> {
    let store = open_store(config);
    let event = store.get(id).ok_or_else(|| not_found(id))?;

    for line in render::details(event) {
        println!("{line}");
    }

    Ok(())
}
