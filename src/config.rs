use log::warn;
use std::{env, path::PathBuf, str::FromStr, time::Duration};

const XAI_API_URL: &str = "https://api.x.ai/v1/chat/completions";
const XAI_IMAGE_API_URL: &str = "https://api.x.ai/v1/images/generations";
const DEFAULT_CHAT_MODEL: &str = "grok-3";
const DEFAULT_IMAGE_MODEL: &str = "aurora";
const DEFAULT_IMAGE_SIZE: &str = "1024x768"; // 4:3
const DEFAULT_MAX_TOKENS: u32 = 2000;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_IMAGES_DIR: &str = "public/images";
const DEFAULT_PLACEHOLDER_IMAGE: &str = "/images/placeholder.png";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// How the image provider should hand back generated pictures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// A temporary URL that is downloaded and persisted under the images directory.
    Url,
    /// An inline base64 payload returned to the caller as a data URI.
    Base64,
}

impl ImageFormat {
    pub fn as_str(&self) -> &str {
        match self {
            ImageFormat::Url => "url",
            ImageFormat::Base64 => "b64_json",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "url" => Ok(ImageFormat::Url),
            "b64_json" | "base64" => Ok(ImageFormat::Base64),
            other => Err(format!("Unsupported image format: {}", other)),
        }
    }
}

/// Process-wide settings, read once at startup and shared read-only.
#[derive(Clone)]
pub struct AppConfig {
    pub xai_api_key: Option<String>,
    pub google_maps_api_key: Option<String>,
    pub chat_url: String,
    pub image_url: String,
    pub chat_model: String,
    pub image_model: String,
    pub image_size: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub image_format: ImageFormat,
    pub images_dir: PathBuf,
    pub placeholder_image: String,
    pub llm_timeout: Duration,
    pub image_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            xai_api_key: None,
            google_maps_api_key: None,
            chat_url: XAI_API_URL.to_string(),
            image_url: XAI_IMAGE_API_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            image_size: DEFAULT_IMAGE_SIZE.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            image_format: ImageFormat::Url,
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            llm_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            image_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let xai_api_key = non_empty_var("XAI_API_KEY");
        if xai_api_key.is_none() {
            warn!("XAI_API_KEY not set, itinerary and image generation will fail");
        }

        let google_maps_api_key = non_empty_var("GOOGLE_MAPS_API_KEY");
        if google_maps_api_key.is_none() {
            warn!("GOOGLE_MAPS_API_KEY not set, route links will be built without a key");
        }

        Self {
            xai_api_key,
            google_maps_api_key,
            chat_url: non_empty_var("XAI_API_URL").unwrap_or(defaults.chat_url),
            image_url: non_empty_var("XAI_IMAGE_API_URL").unwrap_or(defaults.image_url),
            chat_model: non_empty_var("XAI_MODEL").unwrap_or(defaults.chat_model),
            image_model: non_empty_var("XAI_IMAGE_MODEL").unwrap_or(defaults.image_model),
            image_size: non_empty_var("IMAGE_SIZE").unwrap_or(defaults.image_size),
            max_tokens: parsed_var("LLM_MAX_TOKENS", defaults.max_tokens),
            temperature: parsed_var("LLM_TEMPERATURE", defaults.temperature),
            image_format: parsed_var("IMAGE_FORMAT", defaults.image_format),
            images_dir: non_empty_var("IMAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.images_dir),
            placeholder_image: non_empty_var("PLACEHOLDER_IMAGE")
                .unwrap_or(defaults.placeholder_image),
            llm_timeout: Duration::from_secs(parsed_var("LLM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
            image_timeout: Duration::from_secs(parsed_var(
                "IMAGE_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

// Unparseable values fall back to the default instead of aborting startup.
fn parsed_var<T: FromStr>(key: &str, default: T) -> T {
    match non_empty_var(key) {
        Some(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring invalid value for {}: {}", key, raw);
                default
            }
        },
        None => default,
    }
}
