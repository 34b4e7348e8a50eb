use crate::models::itinerary::{Itinerary, DAY_LIST_FIELD};
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[A-Za-z0-9_+-]*[ \t]*\r?\n?").expect("valid fence pattern"));
static CLOSING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n?[ \t]*```$").expect("valid fence pattern"));

#[derive(Debug)]
pub enum ParseFailure {
    InvalidJson(serde_json::Error),
    NotAnObject,
    MissingDayList,
    DayListNotSequence,
    InvalidShape(serde_json::Error),
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::InvalidJson(err) => write!(f, "Response is not valid JSON: {}", err),
            ParseFailure::NotAnObject => write!(f, "Response is not a JSON object"),
            ParseFailure::MissingDayList => {
                write!(f, "Response has no \"{}\" field", DAY_LIST_FIELD)
            }
            ParseFailure::DayListNotSequence => {
                write!(f, "Response \"{}\" field is not an array", DAY_LIST_FIELD)
            }
            ParseFailure::InvalidShape(err) => write!(f, "Response has invalid shape: {}", err),
        }
    }
}

impl std::error::Error for ParseFailure {}

/// Strip one optional leading fence (with or without a language tag) and one
/// optional trailing fence, then trim.
pub fn normalize_response(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_opening = OPENING_FENCE.replace(trimmed, "");
    let without_closing = CLOSING_FENCE.replace(&without_opening, "");
    without_closing.trim().to_string()
}

/// Parse normalized text, checking the day list before reading the typed shape.
pub fn parse_itinerary(text: &str) -> Result<Itinerary, ParseFailure> {
    let value: Value = serde_json::from_str(text).map_err(ParseFailure::InvalidJson)?;

    let object = value.as_object().ok_or(ParseFailure::NotAnObject)?;
    match object.get(DAY_LIST_FIELD) {
        Some(Value::Array(_)) => {}
        Some(_) => return Err(ParseFailure::DayListNotSequence),
        None => return Err(ParseFailure::MissingDayList),
    }

    serde_json::from_value(value).map_err(ParseFailure::InvalidShape)
}

pub fn parse_model_response(raw: &str) -> Result<Itinerary, ParseFailure> {
    parse_itinerary(&normalize_response(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{"destination": "Asturias", "startingPoint": "Madrid", "itinerary": [{"day": 1, "location": "Oviedo"}]}"#;

    #[test]
    fn test_normalize_plain_text_is_trimmed() {
        assert_eq!(normalize_response("  \n{\"a\": 1}\n  "), "{\"a\": 1}");
    }

    #[test]
    fn test_normalize_json_fence() {
        let fenced = format!("```json\n{}\n```", BODY);
        assert_eq!(normalize_response(&fenced), BODY);
    }

    #[test]
    fn test_normalize_bare_fence() {
        let fenced = format!("\n```\n{}\n```\n", BODY);
        assert_eq!(normalize_response(&fenced), BODY);
    }

    #[test]
    fn test_normalize_single_line_fence() {
        let fenced = format!("```json {}```", BODY);
        assert_eq!(normalize_response(&fenced), BODY);
    }

    #[test]
    fn test_normalize_only_opening_fence() {
        let fenced = format!("```json\n{}", BODY);
        assert_eq!(normalize_response(&fenced), BODY);
    }

    #[test]
    fn test_fenced_and_plain_parse_the_same() {
        let plain = parse_model_response(BODY).unwrap();
        let fenced = parse_model_response(&format!("```json\n{}\n```", BODY)).unwrap();

        assert_eq!(plain.destination, fenced.destination);
        assert_eq!(plain.starting_point, fenced.starting_point);
        assert_eq!(plain.day_plans.len(), fenced.day_plans.len());
        assert_eq!(plain.day_plans[0].location, fenced.day_plans[0].location);
    }

    #[test]
    fn test_missing_day_list_is_rejected() {
        let result = parse_itinerary(r#"{"destination": "Asturias"}"#);
        assert!(matches!(result, Err(ParseFailure::MissingDayList)));
    }

    #[test]
    fn test_day_list_must_be_array() {
        let result = parse_itinerary(r#"{"itinerary": "day one: Oviedo"}"#);
        assert!(matches!(result, Err(ParseFailure::DayListNotSequence)));

        let result = parse_itinerary(r#"{"itinerary": null}"#);
        assert!(matches!(result, Err(ParseFailure::DayListNotSequence)));
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let result = parse_model_response("Here is your trip: {\"itinerary\": [");
        assert!(matches!(result, Err(ParseFailure::InvalidJson(_))));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let result = parse_itinerary("[1, 2, 3]");
        assert!(matches!(result, Err(ParseFailure::NotAnObject)));
    }

    #[test]
    fn test_day_entries_must_be_objects() {
        let result = parse_itinerary(r#"{"itinerary": ["Oviedo", "Gijon"]}"#);
        assert!(matches!(result, Err(ParseFailure::InvalidShape(_))));
    }
}
