use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Name of the day list field the language model is asked to fill.
pub const DAY_LIST_FIELD: &str = "itinerary";

/// A value the model may send either as a string or as a bare number
/// (`"day": 1` and `"day": "1"` both show up in practice).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum TextOrNumber {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for TextOrNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextOrNumber::Number(n) => write!(f, "{}", n),
            TextOrNumber::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Itinerary as parsed from the model response, before enrichment.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub starting_point: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text_or_number")]
    pub group: Option<TextOrNumber>,
    #[serde(default, deserialize_with = "deserialize_text_or_number")]
    pub days: Option<TextOrNumber>,
    #[serde(default, deserialize_with = "deserialize_text_or_number")]
    pub cost: Option<TextOrNumber>,
    #[serde(rename = "itinerary")]
    pub day_plans: Vec<DayPlan>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One day as the model described it. Every field may be missing.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DayPlan {
    #[serde(default, deserialize_with = "deserialize_text_or_number")]
    pub day: Option<TextOrNumber>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub location: Option<String>,
    #[serde(
        rename = "accommodation",
        default,
        deserialize_with = "deserialize_accommodation_name"
    )]
    pub accommodation_name: Option<String>,
    #[serde(rename = "route", default, deserialize_with = "deserialize_route_details")]
    pub route_details: Option<String>,
    #[serde(default, deserialize_with = "deserialize_activity_names")]
    pub activities: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The itinerary returned to the caller: every day fully populated and the
/// destination image attached.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedItinerary {
    pub destination: Option<String>,
    pub starting_point: Option<String>,
    pub group: Option<TextOrNumber>,
    pub days: Option<TextOrNumber>,
    pub cost: Option<TextOrNumber>,
    #[serde(rename = "itinerary")]
    pub day_plans: Vec<EnrichedDay>,
    pub image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EnrichedDay {
    pub day: Option<TextOrNumber>,
    pub location: String,
    pub accommodation: Accommodation,
    pub route: Route,
    pub activities: Vec<Activity>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Accommodation {
    pub name: String,
    pub link: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Route {
    pub details: String,
    pub link: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Activity {
    pub name: String,
    pub suggestion: String,
}

// Scalars are accepted as text, anything else reads as absent.
fn value_as_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// Objects like {"name": "..."} or a bare string both carry the text we want.
fn nested_text(value: Value, key: &str) -> Option<String> {
    match value {
        Value::Object(mut map) => map.remove(key).and_then(value_as_text),
        other => value_as_text(other),
    }
}

// Structured values (e.g. a cost breakdown object) are kept as their JSON text.
fn deserialize_text_or_number<'de, D>(deserializer: D) -> Result<Option<TextOrNumber>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => Some(TextOrNumber::Number(n)),
        Some(Value::String(s)) => Some(TextOrNumber::Text(s)),
        Some(other) => Some(TextOrNumber::Text(other.to_string())),
    })
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.and_then(value_as_text))
}

fn deserialize_accommodation_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|v| nested_text(v, "name")))
}

fn deserialize_route_details<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|v| nested_text(v, "details")))
}

// Entries without a usable name are dropped; a non-array reads as absent.
fn deserialize_activity_names<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    match value {
        Some(Value::Array(items)) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| nested_text(item, "name"))
                .collect(),
        )),
        _ => Ok(None),
    }
}
