use crate::config::AppConfig;
use actix_web::{web, HttpResponse, Responder};
use log::warn;
use serde::Serialize;
use std::collections::HashMap;
use std::env;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

/*
    /health
*/
pub async fn health_check(config: web::Data<AppConfig>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let llm_result = check_language_model(&config);
    health
        .services
        .insert("language_model".to_string(), llm_result.clone());

    let maps_result = check_maps_key(&config);
    health
        .services
        .insert("maps".to_string(), maps_result.clone());

    let storage_result = check_image_storage(&config).await;
    health
        .services
        .insert("image_storage".to_string(), storage_result.clone());

    // Maps links still work without a key, so only the other two degrade the service
    if llm_result.status != "ok" || storage_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}***{}", head, tail)
    } else {
        "***".to_string()
    }
}

fn check_language_model(config: &AppConfig) -> ServiceStatus {
    match &config.xai_api_key {
        Some(key) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!(
                "{} via {} ({})",
                config.chat_model,
                config.chat_url,
                mask_key(key)
            )),
        },
        None => ServiceStatus {
            status: "error".to_string(),
            details: Some("XAI_API_KEY not configured".to_string()),
        },
    }
}

fn check_maps_key(config: &AppConfig) -> ServiceStatus {
    match &config.google_maps_api_key {
        Some(key) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("Google Maps key configured ({})", mask_key(key))),
        },
        None => ServiceStatus {
            status: "warning".to_string(),
            details: Some("GOOGLE_MAPS_API_KEY not configured, links are keyless".to_string()),
        },
    }
}

async fn check_image_storage(config: &AppConfig) -> ServiceStatus {
    match tokio::fs::metadata(&config.images_dir).await {
        Ok(meta) if meta.is_dir() => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("Images stored in {}", config.images_dir.display())),
        },
        Ok(_) => ServiceStatus {
            status: "error".to_string(),
            details: Some(format!("{} is not a directory", config.images_dir.display())),
        },
        Err(e) => {
            warn!("Image storage health check failed: {}", e);
            ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("{} is not accessible", config.images_dir.display())),
            }
        }
    }
}
