use crate::config::{AppConfig, ImageFormat};
use crate::services::enrichment_service::slugify;
use crate::services::prompt_service::build_image_prompt;
use base64::{engine::general_purpose, Engine as _};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;
use uuid::Uuid;

/// URL prefix under which persisted images are served.
pub const IMAGES_ROUTE: &str = "/images";

/// Largest generated image we are willing to download.
pub const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    response_format: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    url: Option<String>,
    b64_json: Option<String>,
}

#[derive(Debug)]
pub enum ImageError {
    MissingApiKey,
    HttpError(reqwest::Error),
    StatusError(u16),
    InvalidResponse(String),
    Base64DecodeError(String),
    StorageError(std::io::Error),
    TooLarge(usize),
}

impl std::fmt::Display for ImageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageError::MissingApiKey => write!(f, "Image API key not configured"),
            ImageError::HttpError(err) => write!(f, "HTTP error: {}", err),
            ImageError::StatusError(status) => write!(f, "Image provider returned {}", status),
            ImageError::InvalidResponse(err) => write!(f, "Invalid image response: {}", err),
            ImageError::Base64DecodeError(err) => write!(f, "Base64 decode error: {}", err),
            ImageError::StorageError(err) => write!(f, "Failed to store image: {}", err),
            ImageError::TooLarge(limit) => write!(f, "Image exceeds {} bytes", limit),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<reqwest::Error> for ImageError {
    fn from(err: reqwest::Error) -> Self {
        ImageError::HttpError(err)
    }
}

impl From<std::io::Error> for ImageError {
    fn from(err: std::io::Error) -> Self {
        ImageError::StorageError(err)
    }
}

#[derive(Clone)]
pub struct ImageService {
    http_client: reqwest::Client,
    api_key: Option<String>,
    url: String,
    model: String,
    size: String,
    format: ImageFormat,
    images_dir: PathBuf,
    placeholder: String,
    max_image_bytes: usize,
}

impl ImageService {
    pub fn new(config: &AppConfig) -> Result<Self, ImageError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.image_timeout)
            .build()?;

        Ok(Self {
            http_client,
            api_key: config.xai_api_key.clone(),
            url: config.image_url.clone(),
            model: config.image_model.clone(),
            size: config.image_size.clone(),
            format: config.image_format,
            images_dir: config.images_dir.clone(),
            placeholder: config.placeholder_image.clone(),
            max_image_bytes: MAX_IMAGE_BYTES,
        })
    }

    /// Generate a picture of `destination`, falling back to the placeholder
    /// image on any failure. Image problems never fail the caller.
    pub async fn image_or_placeholder(&self, destination: &str) -> String {
        match self.generate_destination_image(destination).await {
            Ok(image) => image,
            Err(e) => {
                error!("Error generating or saving image for {}: {}", destination, e);
                self.placeholder.clone()
            }
        }
    }

    /// Returns either a local `/images/...` path or a `data:` URI.
    pub async fn generate_destination_image(&self, destination: &str) -> Result<String, ImageError> {
        let api_key = self.api_key.as_deref().ok_or(ImageError::MissingApiKey)?;
        let prompt = build_image_prompt(destination);

        let request = ImageRequest {
            model: &self.model,
            prompt: &prompt,
            n: 1,
            size: &self.size,
            response_format: self.format.as_str(),
        };

        debug!("Requesting {} image for {}", self.format.as_str(), destination);

        let response = self
            .http_client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            debug!("Image provider error body: {}", body);
            return Err(ImageError::StatusError(status));
        }

        let generated: ImageResponse = response
            .json()
            .await
            .map_err(|e| ImageError::InvalidResponse(e.to_string()))?;
        let image = generated
            .data
            .into_iter()
            .next()
            .ok_or_else(|| ImageError::InvalidResponse("no image returned".to_string()))?;

        match (self.format, image.url, image.b64_json) {
            (ImageFormat::Base64, _, Some(b64)) => to_data_uri(&b64),
            (_, Some(url), _) => self.download_and_store(&url, destination).await,
            (_, None, Some(b64)) => to_data_uri(&b64),
            (_, None, None) => Err(ImageError::InvalidResponse(
                "image has neither url nor b64_json".to_string(),
            )),
        }
    }

    async fn download_and_store(&self, temp_url: &str, destination: &str) -> Result<String, ImageError> {
        let url = Url::parse(temp_url).map_err(|e| ImageError::InvalidResponse(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ImageError::InvalidResponse(format!(
                "unsupported image url scheme: {}",
                url.scheme()
            )));
        }

        let mut response = self.http_client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ImageError::StatusError(response.status().as_u16()));
        }
        if response
            .content_length()
            .is_some_and(|len| len > self.max_image_bytes as u64)
        {
            return Err(ImageError::TooLarge(self.max_image_bytes));
        }

        // Content-Length can be absent; the cap also applies while reading.
        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if bytes.len() + chunk.len() > self.max_image_bytes {
                return Err(ImageError::TooLarge(self.max_image_bytes));
            }
            bytes.extend_from_slice(&chunk);
        }

        let file_name = image_file_name(destination);
        let image_path = self.images_dir.join(&file_name);
        // Written under a unique name first so readers never see a partial file.
        // Concurrent requests for the same destination: last rename wins.
        let temp_path = self
            .images_dir
            .join(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));
        tokio::fs::write(&temp_path, &bytes).await?;
        if let Err(e) = tokio::fs::rename(&temp_path, &image_path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        info!("Saved destination image to {}", image_path.display());
        Ok(format!("{}/{}", IMAGES_ROUTE, file_name))
    }
}

pub fn image_file_name(destination: &str) -> String {
    let slug = slugify(destination);
    if slug.is_empty() {
        "destination-itinerary.png".to_string()
    } else {
        format!("{}-itinerary.png", slug)
    }
}

fn to_data_uri(b64: &str) -> Result<String, ImageError> {
    let payload = b64.trim();
    general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| ImageError::Base64DecodeError(e.to_string()))?;
    Ok(format!("data:image/png;base64,{}", payload))
}

/// Content type for a served image, or `None` for unsupported files.
pub fn content_type_for(file_name: &str) -> Option<&'static str> {
    let extension = file_name.rsplit_once('.')?.1.to_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
