use serde::Serialize;

/// A hand-picked destination shown on the landing page.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TravelIdea {
    pub destination: &'static str,
    pub image_url: &'static str,
    pub source_link: &'static str,
}

const TRAVEL_IDEAS: &[TravelIdea] = &[TravelIdea {
    destination: "Asturias",
    image_url: "/images/Asturias.png",
    source_link: "https://x.com/TravelbitAi/status/1914676760664248391",
}];

pub fn curated_travel_ideas() -> &'static [TravelIdea] {
    TRAVEL_IDEAS
}
