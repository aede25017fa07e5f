use anyhow::Result;
use eventbook_core::Event;
use eventbook_core::config::EventbookConfig;
use owo_colors::OwoColorize;

use super::open_store;
use crate::render::Render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    All,
    Upcoming,
    Past,
}

impl ListFilter {
    fn matches(self, event: &Event) -> bool {
        match self {
            ListFilter::All => true,
            ListFilter::Upcoming => !event.is_past,
            ListFilter::Past => event.is_past,
        }
    }
}

pub fn run(config: &EventbookConfig, filter: ListFilter) -> Result<()> {
    let store = open_store(config);

    if store.is_empty() {
        println!("{}", "No events found".dimmed());
        println!("{}", "Start by adding your first event: eventbook add".dimmed());
        return Ok(());
    }

    let shown: Vec<&Event> = store.list().iter().filter(|e| filter.matches(e)).collect();

    if shown.is_empty() {
        let label = match filter {
            ListFilter::Upcoming => "No upcoming events",
            _ => "No past events",
        };
        println!("{}", label.dimmed());
        return Ok(());
    }

    for event in shown {
        println!("{}", event.render());
    }

    Ok(())
}
