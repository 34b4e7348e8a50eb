pub mod enrichment_service;
pub mod image_service;
pub mod itinerary_service;
pub mod llm_service;
pub mod prompt_service;
pub mod response_parser;
