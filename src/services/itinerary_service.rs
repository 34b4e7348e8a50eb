use crate::config::AppConfig;
use crate::models::itinerary::EnrichedItinerary;
use crate::models::request::DreamRequest;
use crate::services::enrichment_service::EnrichmentService;
use crate::services::image_service::{ImageError, ImageService};
use crate::services::llm_service::{LlmError, LlmService};
use crate::services::prompt_service::{build_itinerary_prompt, FALLBACK_DESTINATION, SYSTEM_PROMPT};
use crate::services::response_parser::{parse_model_response, ParseFailure};
use log::{error, info};
use std::fmt;

#[derive(Debug)]
pub enum ItineraryError {
    /// Missing or empty input field; no provider was called.
    InvalidInput(&'static str),
    /// The language model could not be reached or answered with an error.
    Provider(LlmError),
    /// The language model answered with something that is not an itinerary.
    Parse(ParseFailure),
}

impl fmt::Display for ItineraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItineraryError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ItineraryError::Provider(err) => write!(f, "Language model error: {}", err),
            ItineraryError::Parse(err) => write!(f, "Parse error: {}", err),
        }
    }
}

impl std::error::Error for ItineraryError {}

impl From<LlmError> for ItineraryError {
    fn from(err: LlmError) -> Self {
        ItineraryError::Provider(err)
    }
}

impl From<ParseFailure> for ItineraryError {
    fn from(err: ParseFailure) -> Self {
        ItineraryError::Parse(err)
    }
}

#[derive(Debug)]
pub enum ServiceInitError {
    Llm(LlmError),
    Image(ImageError),
}

impl fmt::Display for ServiceInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceInitError::Llm(err) => write!(f, "Failed to set up language model client: {}", err),
            ServiceInitError::Image(err) => write!(f, "Failed to set up image client: {}", err),
        }
    }
}

impl std::error::Error for ServiceInitError {}

/// Runs one itinerary request end to end:
/// prompt -> model -> normalize -> parse -> image -> enrich.
///
/// Model and parse failures abort the request. Image failures degrade to the
/// placeholder image. Nothing is retried.
#[derive(Clone)]
pub struct ItineraryService {
    llm: LlmService,
    images: ImageService,
    enrichment: EnrichmentService,
}

impl ItineraryService {
    pub fn new(config: &AppConfig) -> Result<Self, ServiceInitError> {
        Ok(Self {
            llm: LlmService::new(config).map_err(ServiceInitError::Llm)?,
            images: ImageService::new(config).map_err(ServiceInitError::Image)?,
            enrichment: EnrichmentService::new(config.google_maps_api_key.clone()),
        })
    }

    pub async fn generate(&self, request: &DreamRequest) -> Result<EnrichedItinerary, ItineraryError> {
        let dream = request
            .dream
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .ok_or(ItineraryError::InvalidInput(
                "Dream description is required and must be a string",
            ))?;

        let prompt = build_itinerary_prompt(dream, request.feedback.as_deref());
        info!(
            "Generating itinerary (feedback: {})",
            request.feedback.as_deref().map_or(false, |f| !f.trim().is_empty())
        );

        let raw = self.llm.complete(SYSTEM_PROMPT, &prompt).await?;

        let itinerary = parse_model_response(&raw).map_err(|e| {
            error!("Failed to parse itinerary: {}. Raw content: {}", e, raw);
            e
        })?;

        let destination =
            required_text(itinerary.destination.as_deref()).unwrap_or(FALLBACK_DESTINATION);
        let image = self.images.image_or_placeholder(destination).await;

        let starting_point = itinerary.starting_point.clone().unwrap_or_default();
        let day_plans = self
            .enrichment
            .enrich_days(itinerary.day_plans, &starting_point);

        info!(
            "Generated {} day itinerary for {}",
            day_plans.len(),
            destination
        );

        // The attached image is always ours, never one the model made up.
        let mut extra = itinerary.extra;
        extra.remove("image");

        Ok(EnrichedItinerary {
            destination: itinerary.destination,
            starting_point: itinerary.starting_point,
            group: itinerary.group,
            days: itinerary.days,
            cost: itinerary.cost,
            day_plans,
            image,
            extra,
        })
    }

    /// Picture for a destination on its own. Provider failures degrade to the
    /// placeholder, only a missing destination is an error.
    pub async fn destination_image(&self, destination: Option<&str>) -> Result<String, ItineraryError> {
        let destination = required_text(destination).ok_or(ItineraryError::InvalidInput(
            "Destination is required and must be a string",
        ))?;
        Ok(self.images.image_or_placeholder(destination).await)
    }
}

fn required_text(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
