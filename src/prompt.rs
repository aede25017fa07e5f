//! Interactive field entry for `add` and `edit`.

use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::Input;
use eventbook_core::EventDraft;
use eventbook_core::validation::{self, Field};

use crate::commands::EventArgs;

/// First message the field rules give for `field` in `draft`, if any.
pub fn field_error(draft: &EventDraft, field: Field, today: NaiveDate) -> Option<String> {
    let errors = validation::validate_fields(draft, today).err()?;
    let message = errors.for_field(field).first().map(|m| m.to_string());
    message
}

fn set_field(draft: &mut EventDraft, field: Field, value: String) {
    match field {
        Field::Title => draft.title = value,
        Field::Description => draft.description = value,
        Field::Venue => draft.venue = value,
        Field::Date => draft.date = value,
        Field::Time => draft.time = Some(value),
        Field::Organizer => draft.organizer = Some(value),
        Field::Capacity => draft.capacity = parse_capacity(&value).ok().flatten(),
    }
}

/// Marker a user types to clear an optional field while editing.
const CLEAR: &str = "-";

/// An optional answer: blank or [`CLEAR`] means "none".
fn optional_answer(answer: &str) -> Option<String> {
    let answer = answer.trim();
    (!answer.is_empty() && answer != CLEAR).then(|| answer.to_string())
}

fn parse_capacity(input: &str) -> Result<Option<u32>, String> {
    let input = input.trim();
    if input.is_empty() || input == CLEAR {
        return Ok(None);
    }
    input
        .parse::<u32>()
        .map(Some)
        .map_err(|_| "Capacity must be a whole number".to_string())
}

/// Prompt text for an optional field. With a current value the default is
/// shown and [`CLEAR`] removes it; without one a blank answer skips.
fn optional_prompt(label: &str, has_current: bool) -> String {
    if has_current {
        format!("  {label} ({CLEAR} to clear)")
    } else {
        format!("  {label} (skip)")
    }
}

/// Ask for a required field, re-prompting until its own rules pass.
fn ask_required(
    draft: &EventDraft,
    field: Field,
    prompt: &str,
    initial: Option<String>,
    today: NaiveDate,
) -> Result<String> {
    let base = draft.clone();
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(initial) = initial {
        input = input.default(initial);
    }

    let answer = input
        .validate_with(move |value: &String| -> Result<(), String> {
            let mut candidate = base.clone();
            set_field(&mut candidate, field, value.clone());
            match field_error(&candidate, field, today) {
                Some(message) => Err(message),
                None => Ok(()),
            }
        })
        .interact_text()?;

    Ok(answer)
}

/// Ask for an optional text field.
fn ask_optional(label: &str, current: Option<String>) -> Result<Option<String>> {
    let mut input = Input::<String>::new()
        .with_prompt(optional_prompt(label, current.is_some()))
        .allow_empty(true);
    if let Some(current) = current {
        input = input.default(current);
    }

    Ok(optional_answer(&input.interact_text()?))
}

fn ask_capacity(current: Option<u32>) -> Result<Option<u32>> {
    let mut input = Input::<String>::new()
        .with_prompt(optional_prompt("Capacity", current.is_some()))
        .allow_empty(true)
        .validate_with(|value: &String| parse_capacity(value).map(|_| ()));
    if let Some(current) = current {
        input = input.default(current.to_string());
    }

    parse_capacity(&input.interact_text()?).map_err(|e| anyhow::anyhow!(e))
}

/// Prompt for everything `add` still needs. Fields already given on the
/// command line are not asked again.
pub fn complete_new(mut draft: EventDraft, given: &EventArgs, today: NaiveDate) -> Result<EventDraft> {
    if given.title.is_none() {
        draft.title = ask_required(&draft, Field::Title, "  Title", None, today)?;
    }
    if given.description.is_none() {
        draft.description = ask_required(&draft, Field::Description, "  Description", None, today)?;
    }
    if given.venue.is_none() {
        draft.venue = ask_required(&draft, Field::Venue, "  Venue", None, today)?;
    }
    if given.date.is_none() {
        draft.date = ask_required(&draft, Field::Date, "  Date (YYYY-MM-DD)", None, today)?;
    }
    if given.time.is_none() {
        draft.time = ask_optional("Time", None)?;
    }
    if given.organizer.is_none() {
        draft.organizer = ask_optional("Organizer", None)?;
    }
    if given.capacity.is_none() {
        draft.capacity = ask_capacity(None)?;
    }
    Ok(draft)
}

/// Walk through every field with the current value as the default.
pub fn revise(draft: EventDraft, today: NaiveDate) -> Result<EventDraft> {
    let mut next = draft.clone();
    next.title = ask_required(&next, Field::Title, "  Title", Some(draft.title), today)?;
    next.description = ask_required(
        &next,
        Field::Description,
        "  Description",
        Some(draft.description),
        today,
    )?;
    next.venue = ask_required(&next, Field::Venue, "  Venue", Some(draft.venue), today)?;
    next.date = ask_required(&next, Field::Date, "  Date (YYYY-MM-DD)", Some(draft.date), today)?;
    next.time = ask_optional("Time", draft.time)?;
    next.organizer = ask_optional("Organizer", draft.organizer)?;
    next.capacity = ask_capacity(draft.capacity)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn field_error_only_reports_the_asked_field() {
        let draft = EventDraft {
            title: "Launch".to_string(),
            ..Default::default()
        };
        assert_eq!(field_error(&draft, Field::Title, today()), None);
        assert_eq!(
            field_error(&draft, Field::Venue, today()).as_deref(),
            Some("Venue is required")
        );
    }

    #[test]
    fn field_error_checks_past_dates() {
        let draft = EventDraft {
            date: "2026-10-01".to_string(),
            ..Default::default()
        };
        assert_eq!(
            field_error(&draft, Field::Date, today()).as_deref(),
            Some(validation::PAST_DATE_MESSAGE)
        );
    }

    #[test]
    fn parse_capacity_accepts_blank_and_numbers() {
        assert_eq!(parse_capacity(""), Ok(None));
        assert_eq!(parse_capacity(" 120 "), Ok(Some(120)));
        assert!(parse_capacity("-3").is_err());
        assert!(parse_capacity("lots").is_err());
    }

    #[test]
    fn clear_marker_empties_optional_answers() {
        assert_eq!(optional_answer(CLEAR), None);
        assert_eq!(optional_answer("  "), None);
        assert_eq!(optional_answer(" Ops "), Some("Ops".to_string()));
        assert_eq!(parse_capacity(CLEAR), Ok(None));
    }

    #[test]
    fn optional_prompt_offers_clearing_only_when_editing() {
        assert_eq!(optional_prompt("Organizer", true), "  Organizer (- to clear)");
        assert_eq!(optional_prompt("Organizer", false), "  Organizer (skip)");
    }

    #[test]
    fn set_field_targets_one_field() {
        let mut draft = EventDraft::default();
        set_field(&mut draft, Field::Venue, "Main Hall".to_string());
        set_field(&mut draft, Field::Capacity, "25".to_string());
        assert_eq!(draft.venue, "Main Hall");
        assert_eq!(draft.capacity, Some(25));
        assert!(draft.title.is_empty());
    }
}
