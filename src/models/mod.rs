pub mod itinerary;
pub mod request;
pub mod travel_idea;
