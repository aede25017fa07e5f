//! Field rules and the venue/date collision check.
//!
//! Every rule reports a [`FieldError`] scoped to the field it concerns, so a
//! front end can show messages next to the offending input. A collision is a
//! cross-field rule and is reported on both `venue` and `date`.

use std::fmt;

use chrono::NaiveDate;

use crate::event::{Event, EventDraft, EventFields, EventId};

pub const COLLISION_MESSAGE: &str = "An event already exists at this venue on the selected date";
pub const PAST_DATE_MESSAGE: &str = "Event date cannot be in the past";
pub const DATE_REQUIRED_MESSAGE: &str = "Date is required";
pub const INVALID_DATE_MESSAGE: &str = "Date must be a valid calendar date (YYYY-MM-DD)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    Venue,
    Date,
    Time,
    Organizer,
    Capacity,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Venue => "venue",
            Field::Date => "date",
            Field::Time => "time",
            Field::Organizer => "organizer",
            Field::Capacity => "capacity",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// All rule violations found for one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Messages reported against a single field, in rule order.
    pub fn for_field(&self, field: Field) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    pub fn has(&self, field: Field) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Length bounds for a required text field, counted in characters after trimming.
struct TextRule {
    field: Field,
    label: &'static str,
    min: usize,
    max: usize,
}

const TITLE: TextRule = TextRule {
    field: Field::Title,
    label: "Title",
    min: 3,
    max: 100,
};

const DESCRIPTION: TextRule = TextRule {
    field: Field::Description,
    label: "Description",
    min: 10,
    max: 500,
};

const VENUE: TextRule = TextRule {
    field: Field::Venue,
    label: "Venue",
    min: 3,
    max: 100,
};

fn check_text(input: &str, rule: &TextRule, errors: &mut ValidationErrors) -> Option<String> {
    let value = input.trim();
    let len = value.chars().count();

    let message = if len == 0 {
        format!("{} is required", rule.label)
    } else if len < rule.min {
        format!("{} must be at least {} characters", rule.label, rule.min)
    } else if len > rule.max {
        format!("{} must be less than {} characters", rule.label, rule.max)
    } else {
        return Some(value.to_string());
    };

    errors.push(rule.field, message);
    None
}

fn check_date(input: &str, today: NaiveDate, errors: &mut ValidationErrors) -> Option<NaiveDate> {
    let value = input.trim();
    if value.is_empty() {
        errors.push(Field::Date, DATE_REQUIRED_MESSAGE);
        return None;
    }

    let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") else {
        errors.push(Field::Date, INVALID_DATE_MESSAGE);
        return None;
    };

    if date < today {
        errors.push(Field::Date, PAST_DATE_MESSAGE);
        return None;
    }

    Some(date)
}

/// Trimmed optional text; blank input counts as absent.
fn optional_text(input: Option<&str>) -> Option<String> {
    input
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// True iff another event already occupies `venue` on `date`.
///
/// `exclude` is the id of the event being edited, so an event never collides
/// with its own slot.
pub fn has_collision<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    venue: &str,
    date: NaiveDate,
    exclude: Option<&EventId>,
) -> bool {
    let venue = venue.trim();
    events
        .into_iter()
        .any(|e| e.venue == venue && e.date == date && Some(&e.id) != exclude)
}

/// Check field rules only.
pub fn validate_fields(draft: &EventDraft, today: NaiveDate) -> Result<EventFields, ValidationErrors> {
    validate(draft, today, &[], None)
}

/// Check field rules, then the collision rule against `existing`.
///
/// The collision rule only runs once venue and date each pass their own rules.
/// Nothing is returned unless every rule passes.
pub fn validate(
    draft: &EventDraft,
    today: NaiveDate,
    existing: &[Event],
    exclude: Option<&EventId>,
) -> Result<EventFields, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let title = check_text(&draft.title, &TITLE, &mut errors);
    let description = check_text(&draft.description, &DESCRIPTION, &mut errors);
    let venue = check_text(&draft.venue, &VENUE, &mut errors);
    let date = check_date(&draft.date, today, &mut errors);

    if let (Some(venue), Some(date)) = (venue.as_deref(), date) {
        if has_collision(existing, venue, date, exclude) {
            errors.push(Field::Venue, COLLISION_MESSAGE);
            errors.push(Field::Date, COLLISION_MESSAGE);
        }
    }

    match (title, description, venue, date) {
        (Some(title), Some(description), Some(venue), Some(date)) if errors.is_empty() => {
            Ok(EventFields {
                title,
                description,
                venue,
                date,
                time: optional_text(draft.time.as_deref()),
                organizer: optional_text(draft.organizer.as_deref()),
                capacity: draft.capacity,
            })
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn now() -> NaiveDateTime {
        today().and_hms_opt(12, 0, 0).unwrap()
    }

    fn draft() -> EventDraft {
        EventDraft {
            title: "Launch".to_string(),
            description: "Product launch event".to_string(),
            venue: "Main Hall".to_string(),
            date: "2099-01-01".to_string(),
            ..Default::default()
        }
    }

    fn stored(id: &str, venue: &str, date: &str) -> Event {
        let mut d = draft();
        d.venue = venue.to_string();
        d.date = date.to_string();
        Event::new(EventId::new(id), validate_fields(&d, today()).unwrap(), now())
    }

    #[test]
    fn test_valid_draft_is_normalised() {
        let mut d = draft();
        d.title = "  Launch  ".to_string();
        d.time = Some("  ".to_string());
        d.organizer = Some(" Ops team ".to_string());
        d.capacity = Some(0);

        let fields = validate_fields(&d, today()).unwrap();
        assert_eq!(fields.title, "Launch");
        assert_eq!(fields.time, None);
        assert_eq!(fields.organizer.as_deref(), Some("Ops team"));
        assert_eq!(fields.capacity, Some(0));
    }

    #[test]
    fn test_required_fields() {
        let errors = validate_fields(&EventDraft::default(), today()).unwrap_err();
        assert_eq!(errors.for_field(Field::Title), vec!["Title is required"]);
        assert_eq!(errors.for_field(Field::Description), vec!["Description is required"]);
        assert_eq!(errors.for_field(Field::Venue), vec!["Venue is required"]);
        assert_eq!(errors.for_field(Field::Date), vec![DATE_REQUIRED_MESSAGE]);
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_length_bounds_after_trimming() {
        let mut d = draft();
        d.title = "  ab  ".to_string();
        d.description = "too short".to_string();
        d.venue = "v".repeat(101);

        let errors = validate_fields(&d, today()).unwrap_err();
        assert_eq!(
            errors.for_field(Field::Title),
            vec!["Title must be at least 3 characters"]
        );
        assert_eq!(
            errors.for_field(Field::Description),
            vec!["Description must be at least 10 characters"]
        );
        assert_eq!(
            errors.for_field(Field::Venue),
            vec!["Venue must be less than 100 characters"]
        );
    }

    #[test]
    fn test_length_bounds_are_inclusive() {
        let mut d = draft();
        d.title = "abc".to_string();
        d.description = "d".repeat(500);
        d.venue = "v".repeat(100);
        assert!(validate_fields(&d, today()).is_ok());
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        let mut d = draft();
        d.title = "été".to_string();
        assert!(validate_fields(&d, today()).is_ok());
    }

    #[test]
    fn test_date_rules() {
        let mut d = draft();

        d.date = "2026-10-18".to_string();
        let errors = validate_fields(&d, today()).unwrap_err();
        assert_eq!(errors.for_field(Field::Date), vec![PAST_DATE_MESSAGE]);

        d.date = "2026-10-19".to_string();
        assert!(validate_fields(&d, today()).is_ok());

        d.date = "2026-02-30".to_string();
        let errors = validate_fields(&d, today()).unwrap_err();
        assert_eq!(errors.for_field(Field::Date), vec![INVALID_DATE_MESSAGE]);

        d.date = "next friday".to_string();
        assert!(validate_fields(&d, today()).unwrap_err().has(Field::Date));
    }

    #[test]
    fn test_has_collision() {
        let events = vec![stored("a", "Main Hall", "2099-01-01")];
        let date = NaiveDate::from_ymd_opt(2099, 1, 1).unwrap();
        let other_date = NaiveDate::from_ymd_opt(2099, 1, 2).unwrap();

        assert!(has_collision(&events, "Main Hall", date, None));
        assert!(has_collision(&events, " Main Hall ", date, None));
        assert!(!has_collision(&events, "Main Hall", other_date, None));
        assert!(!has_collision(&events, "Side Room", date, None));
        assert!(!has_collision(&events, "main hall", date, None));
        assert!(!has_collision(&events, "Main Hall", date, Some(&EventId::new("a"))));
        assert!(has_collision(&events, "Main Hall", date, Some(&EventId::new("b"))));
    }

    #[test]
    fn test_collision_reported_on_venue_and_date() {
        let events = vec![stored("a", "Main Hall", "2099-01-01")];
        let errors = validate(&draft(), today(), &events, None).unwrap_err();

        assert_eq!(errors.for_field(Field::Venue), vec![COLLISION_MESSAGE]);
        assert_eq!(errors.for_field(Field::Date), vec![COLLISION_MESSAGE]);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_self_collision_exempt() {
        let events = vec![stored("a", "Main Hall", "2099-01-01")];
        assert!(validate(&draft(), today(), &events, Some(&EventId::new("a"))).is_ok());
    }

    #[test]
    fn test_collision_skipped_when_date_invalid() {
        let events = vec![stored("a", "Main Hall", "2099-01-01")];
        let mut d = draft();
        d.date = "not a date".to_string();

        let errors = validate(&d, today(), &events, None).unwrap_err();
        assert!(!errors.has(Field::Venue));
        assert_eq!(errors.for_field(Field::Date), vec![INVALID_DATE_MESSAGE]);
    }

    #[test]
    fn test_field_and_collision_errors_reported_together() {
        let events = vec![stored("a", "Main Hall", "2099-01-01")];
        let mut d = draft();
        d.title = "x".to_string();

        let errors = validate(&d, today(), &events, None).unwrap_err();
        assert!(errors.has(Field::Title));
        assert!(errors.has(Field::Venue));
        assert!(errors.has(Field::Date));
    }

    #[test]
    fn test_display_lists_fields() {
        let mut errors = ValidationErrors::default();
        errors.push(Field::Venue, COLLISION_MESSAGE);
        errors.push(Field::Date, COLLISION_MESSAGE);
        assert_eq!(
            errors.to_string(),
            format!("venue: {COLLISION_MESSAGE}; date: {COLLISION_MESSAGE}")
        );
    }
}
