//! Terminal rendering for event book types.

use eventbook_core::Event;
use eventbook_core::validation::ValidationErrors;
use owo_colors::OwoColorize;

/// Extension trait for colored terminal output.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    /// One listing line: date, time, title, venue, id.
    fn render(&self) -> String {
        let when = format!(
            "{} {:>5}",
            self.date.format("%Y-%m-%d"),
            self.time.as_deref().unwrap_or("")
        );
        let venue = format!("@ {}", self.venue);
        let id = format!("[{}]", self.id);

        if self.is_past {
            format!(
                "  {} {} {} {} {}",
                when.dimmed(),
                self.title.dimmed(),
                venue.dimmed(),
                "(past)".yellow(),
                id.dimmed()
            )
        } else {
            format!("  {} {} {} {}", when, self.title.bold(), venue.cyan(), id.dimmed())
        }
    }
}

/// Every field of an event, one per line.
pub fn details(event: &Event) -> Vec<String> {
    let mut lines = vec![
        format!("  {}", event.title.bold()),
        format!("  {} {}", "id:".dimmed(), event.id),
        format!("  {} {}", "date:".dimmed(), event.date.format("%A, %B %-d, %Y")),
    ];
    if let Some(time) = &event.time {
        lines.push(format!("  {} {}", "time:".dimmed(), time));
    }
    lines.push(format!("  {} {}", "venue:".dimmed(), event.venue));
    if let Some(organizer) = &event.organizer {
        lines.push(format!("  {} {}", "organizer:".dimmed(), organizer));
    }
    if let Some(capacity) = event.capacity {
        lines.push(format!("  {} {}", "capacity:".dimmed(), capacity));
    }
    lines.push(String::new());
    lines.push(format!("  {}", event.description));
    if event.is_past {
        lines.push(String::new());
        lines.push(format!("  {}", "This event is in the past".yellow()));
    }
    lines
}

pub fn field_errors(errors: &ValidationErrors) -> Vec<String> {
    errors
        .iter()
        .map(|e| format!("  {} {}", format!("{}:", e.field).red(), e.message.red()))
        .collect()
}
