/// System role message sent with every itinerary request.
pub const SYSTEM_PROMPT: &str =
    "You are a travel planning expert specializing in personalized trips.";

/// Used in the image prompt when the model did not name a destination.
pub const FALLBACK_DESTINATION: &str = "a beautiful destination";

const CONTENT_REQUIREMENTS: &str = "Include:
- A day-by-day plan with specific locations
- For each day: a recommended accommodation (just the name)
- For each day: a driving route description (if applicable) or travel details
- For each day: recommended travel-related activities (e.g., sightseeing, tours, cultural experiences; exclude unrelated activities like \"checklist moving back\")
- Estimated total cost
- Starting point and final destination must be specific locations (e.g., a city or airport); do not use \"home\" as a starting or ending point; infer a logical starting point like an airport or major city if not specified";

const OUTPUT_SHAPE: &str = "Return the response in pure JSON format (no Markdown, no ```json, just the raw JSON object) with this structure:
{
    \"destination\": \"\",
    \"startingPoint\": \"\",
    \"group\": \"\",
    \"days\": \"\",
    \"cost\": \"\",
    \"itinerary\": [
        {
            \"day\": \"\",
            \"location\": \"\",
            \"accommodation\": {\"name\": \"\"},
            \"route\": {\"details\": \"\"},
            \"activities\": [{\"name\": \"\"}]
        }
    ]
}";

/// Build the user message asking for an itinerary. Feedback that is empty
/// after trimming is treated as absent.
pub fn build_itinerary_prompt(dream: &str, feedback: Option<&str>) -> String {
    let mut prompt = format!(
        "Create a detailed travel itinerary based on this dream holiday description: \"{}\"\n",
        dream
    );

    if let Some(feedback) = feedback.filter(|f| !f.trim().is_empty()) {
        prompt.push_str(&format!(
            "Adjust the itinerary based on this feedback: \"{}\"\n",
            feedback
        ));
    }

    prompt.push_str(CONTENT_REQUIREMENTS);
    prompt.push('\n');
    prompt.push_str(OUTPUT_SHAPE);
    prompt
}

pub fn build_image_prompt(destination: &str) -> String {
    format!(
        "A stunning photorealistic image of {}, showcasing its iconic landmarks and vibrant culture, suitable for a travel itinerary.",
        destination
    )
}
