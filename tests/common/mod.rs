#![allow(dead_code)]

use actix_web::{web, App};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dream_itinerary_api::config::{AppConfig, ImageFormat};
use dream_itinerary_api::routes;
use dream_itinerary_api::services::itinerary_service::ItineraryService;

pub const CHAT_PATH: &str = "/v1/chat/completions";
pub const IMAGE_PATH: &str = "/v1/images/generations";
pub const DOWNLOAD_PATH: &str = "/generated/aurora-1.png";
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

pub struct TestApp {
    pub server: MockServer,
    pub config: AppConfig,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_image_format(ImageFormat::Url).await
    }

    pub async fn with_image_format(image_format: ImageFormat) -> Self {
        let server = MockServer::start().await;
        let images_dir = std::env::temp_dir().join(format!("dream-itinerary-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&images_dir).expect("create test images dir");

        let config = AppConfig {
            xai_api_key: Some("test-key".to_string()),
            google_maps_api_key: Some("maps-key".to_string()),
            chat_url: format!("{}{}", server.uri(), CHAT_PATH),
            image_url: format!("{}{}", server.uri(), IMAGE_PATH),
            image_format,
            images_dir,
            llm_timeout: Duration::from_secs(5),
            image_timeout: Duration::from_secs(5),
            ..AppConfig::default()
        };

        Self { server, config }
    }

    pub fn images_dir(&self) -> &PathBuf {
        &self.config.images_dir
    }

    pub fn create_app(&self) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let service = ItineraryService::new(&self.config).expect("build itinerary service");

        App::new()
            .app_data(web::Data::new(self.config.clone()))
            .app_data(web::Data::new(service))
            .configure(routes::configure)
    }

    /// Language model answers every chat request with `content`.
    pub async fn mock_chat(&self, content: &str) {
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(content)))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_chat_failure(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({"error": "upstream"})))
            .mount(&self.server)
            .await;
    }

    /// Image provider hands back a temporary URL served by the same mock server.
    pub async fn mock_image_url(&self) {
        let download_url = format!("{}{}", self.server.uri(), DOWNLOAD_PATH);
        Mock::given(method("POST"))
            .and(path(IMAGE_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": [{"url": download_url}]})),
            )
            .mount(&self.server)
            .await;

        Mock::given(method("GET"))
            .and(path(DOWNLOAD_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(PNG_BYTES))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_image_b64(&self, payload: &str) {
        Mock::given(method("POST"))
            .and(path(IMAGE_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": [{"b64_json": payload}]})),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mock_image_failure(&self) {
        Mock::given(method("POST"))
            .and(path(IMAGE_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&self.server)
            .await;
    }

    /// Fails the test on drop if the image provider is called at all.
    pub async fn expect_no_image_request(&self) {
        Mock::given(method("POST"))
            .and(path(IMAGE_PATH))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    pub async fn expect_no_chat_request(&self) {
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    /// Bodies of every chat request the mock server received.
    pub async fn chat_request_bodies(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.url.path() == CHAT_PATH)
            .map(|request| String::from_utf8_lossy(&request.body).to_string())
            .collect()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.config.images_dir);
    }
}

pub fn chat_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}}
        ]
    })
}

/// A four day trip as the model would describe it: starts where the first
/// day is spent, ends at home, and includes a chore that must be dropped.
pub fn sample_itinerary() -> Value {
    json!({
        "destination": "Asturias",
        "startingPoint": "Oviedo",
        "group": "2 adults",
        "days": "4",
        "cost": "1500 EUR",
        "itinerary": [
            {
                "day": 1,
                "location": "Oviedo",
                "accommodation": {"name": "Hotel de la Reconquista"},
                "route": {"details": "Arrive at Asturias airport and transfer to Oviedo"},
                "activities": [
                    {"name": "Cathedral and old town walking tour"},
                    {"name": "Cider tasting"}
                ]
            },
            {
                "day": 2,
                "location": "Picos de Europa",
                "accommodation": {"name": "Parador de Cangas de Onis"},
                "route": {"details": "Drive east on the A-64"},
                "activities": [
                    {"name": "Hike to the Lakes of Covadonga"},
                    {"name": "Checklist moving back"}
                ]
            },
            {
                "day": 3,
                "location": "Gijón",
                "route": {"details": "Coastal drive"},
                "activities": [{"name": "San Lorenzo beach"}]
            },
            {
                "day": 4,
                "location": "Home",
                "accommodation": {"name": "Own bed"},
                "route": {"details": "Fly home"},
                "activities": []
            }
        ]
    })
}
