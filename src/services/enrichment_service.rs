//! Rule-based post-processing of a parsed itinerary.
//!
//! Every day is default-filled, given a driving directions link toward the
//! day's location, a hotel search link for the night's accommodation, and a
//! practical suggestion per activity. Activities that are not travel related
//! (currently only "checklist moving back") are dropped.

use crate::models::itinerary::{Accommodation, Activity, DayPlan, EnrichedDay, Route};

pub const HOME: &str = "home";
pub const DEFAULT_LOCATION: &str = "Unknown Location";
pub const DEFAULT_ACCOMMODATION: &str = "Not Specified";
pub const DEFAULT_ROUTE: &str = "No route specified";
pub const NOT_APPLICABLE: &str = "N/A";

const EXCLUDED_ACTIVITY: &str = "checklist moving back";
const DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/";
const HOTEL_SEARCH_URL: &str = "https://www.booking.com/searchresults.html";

pub struct SuggestionRule {
    pub keywords: &'static [&'static str],
    pub suggestion: &'static str,
}

/// Checked in order, the first rule with a keyword in the activity name wins.
pub const SUGGESTION_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        keywords: &["museum", "exhibition"],
        suggestion: "Spend a couple of hours exploring; check for guided tours or audio guides for a deeper experience.",
    },
    SuggestionRule {
        keywords: &["hiking", "hike"],
        suggestion: "Wear sturdy shoes and bring water; check the weather forecast before heading out.",
    },
    SuggestionRule {
        keywords: &["beach", "coast"],
        suggestion: "Pack sunscreen and a hat; arrive early to enjoy a peaceful morning by the water.",
    },
    SuggestionRule {
        keywords: &["tour", "safari", "cruise"],
        suggestion: "Book in advance to secure your spot; bring a camera for memorable photos.",
    },
    SuggestionRule {
        keywords: &["market", "bazaar"],
        suggestion: "Bring cash for small purchases; try local street food for an authentic experience.",
    },
    SuggestionRule {
        keywords: &["park", "garden"],
        suggestion: "Bring a picnic and enjoy a relaxing afternoon; check for seasonal flower displays.",
    },
    SuggestionRule {
        keywords: &["cultural", "festival"],
        suggestion: "Engage with locals to learn more; look for traditional performances or crafts.",
    },
    SuggestionRule {
        keywords: &["city center", "downtown"],
        suggestion: "Explore on foot to discover hidden gems; stop at a local café for a break.",
    },
    SuggestionRule {
        keywords: &["shopping", "outlet"],
        suggestion: "Arrive early to avoid crowds; look for local souvenirs to bring home.",
    },
    SuggestionRule {
        keywords: &["wildlife", "zoo"],
        suggestion: "Bring binoculars for a closer look; check feeding times for an interactive experience.",
    },
];

pub const GENERIC_SUGGESTION: &str =
    "Enjoy this activity at your own pace; ask locals for tips to enhance your experience.";

pub fn suggestion_for(activity_name: &str) -> &'static str {
    let name = activity_name.to_lowercase();
    SUGGESTION_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|keyword| name.contains(keyword)))
        .map(|rule| rule.suggestion)
        .unwrap_or(GENERIC_SUGGESTION)
}

pub fn is_home(place: &str) -> bool {
    place.trim().eq_ignore_ascii_case(HOME)
}

pub fn is_excluded_activity(activity_name: &str) -> bool {
    activity_name.to_lowercase().contains(EXCLUDED_ACTIVITY)
}

/// Keep ASCII letters, digits, whitespace, hyphens, commas and periods, then
/// trim and collapse whitespace runs to a single space.
pub fn clean_place(place: &str) -> String {
    let kept: String = place
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, '-' | ',' | '.'))
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase, keep ASCII letters, digits, whitespace and hyphens, and join the
/// remaining words with hyphens.
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("-")
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Clone, Default)]
pub struct EnrichmentService {
    maps_api_key: Option<String>,
}

impl EnrichmentService {
    pub fn new(maps_api_key: Option<String>) -> Self {
        Self { maps_api_key }
    }

    /// Enrich days in order. The origin of each day's route is the previous
    /// day's location, or `starting_point` for the first day.
    pub fn enrich_days(&self, day_plans: Vec<DayPlan>, starting_point: &str) -> Vec<EnrichedDay> {
        let mut enriched: Vec<EnrichedDay> = Vec::with_capacity(day_plans.len());

        for (index, day) in day_plans.into_iter().enumerate() {
            let origin = match enriched.last() {
                Some(previous) => previous.location.clone(),
                None => starting_point.to_string(),
            };
            enriched.push(self.enrich_day(index, day, &origin, starting_point));
        }

        enriched
    }

    fn enrich_day(
        &self,
        index: usize,
        day: DayPlan,
        origin: &str,
        starting_point: &str,
    ) -> EnrichedDay {
        let location = non_empty(day.location).unwrap_or_else(|| DEFAULT_LOCATION.to_string());
        let accommodation_name =
            non_empty(day.accommodation_name).unwrap_or_else(|| DEFAULT_ACCOMMODATION.to_string());
        let route_details =
            non_empty(day.route_details).unwrap_or_else(|| DEFAULT_ROUTE.to_string());

        let route = Route {
            details: route_details,
            link: self.route_link(origin, &location),
        };

        let at_starting_point =
            index == 0 && location.trim().to_lowercase() == starting_point.trim().to_lowercase();
        let accommodation = if is_home(&location) || at_starting_point {
            Accommodation {
                name: NOT_APPLICABLE.to_string(),
                link: None,
            }
        } else {
            Accommodation {
                link: Some(hotel_search_link(&accommodation_name, &location)),
                name: accommodation_name,
            }
        };

        let activities = day
            .activities
            .unwrap_or_default()
            .into_iter()
            .filter(|name| !is_excluded_activity(name))
            .map(|name| Activity {
                suggestion: suggestion_for(&name).to_string(),
                name,
            })
            .collect();

        EnrichedDay {
            day: day.day,
            location,
            accommodation,
            route,
            activities,
            extra: day.extra,
        }
    }

    /// Driving directions between two places, or `None` when either end is
    /// "home" or cleans down to nothing.
    pub fn route_link(&self, origin: &str, destination: &str) -> Option<String> {
        if is_home(origin) || is_home(destination) {
            return None;
        }

        let origin = clean_place(origin);
        let destination = clean_place(destination);
        if origin.is_empty() || destination.is_empty() {
            return None;
        }

        let mut link = format!(
            "{}?api=1&origin={}&destination={}&travelmode=driving",
            DIRECTIONS_URL,
            urlencoding::encode(&origin),
            urlencoding::encode(&destination)
        );
        if let Some(key) = &self.maps_api_key {
            link.push_str(&format!("&key={}", urlencoding::encode(key)));
        }
        Some(link)
    }
}

pub fn hotel_search_link(accommodation_name: &str, location: &str) -> String {
    let query = format!("{} {}", accommodation_name.to_lowercase(), slugify(location));
    format!("{}?ss={}", HOTEL_SEARCH_URL, urlencoding::encode(&query))
}
