use std::sync::Arc;
use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::json;

use crate::AppState;
use crate::utils::chat_provider::FALLBACK_REPLY;

/// Upper bound for files attached in the chat widget.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const MAX_CHAT_MESSAGE_CHARS: usize = 2000;

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Message is required"}))
        ));
    }
    if message.chars().count() > MAX_CHAT_MESSAGE_CHARS {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Message is too long"}))
        ));
    }

    let reply = match state.chat.complete(message.to_string()).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!("Chat completion failed, sending fallback reply: {}", e);
            FALLBACK_REPLY.to_string()
        }
    };

    Ok(Json(json!({"reply": reply})))
}

pub(crate) fn acknowledgement(file_name: &str, size: usize) -> String {
    format!(
        "Thanks, I've received {} ({} bytes). Someone from the team will take a look and follow up if you leave your details on the contact page.",
        file_name, size
    )
}

pub async fn upload(
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    while let Some(field) = multipart.next_field().await.map_err(|e| (
        e.status(),
        Json(json!({"error": format!("Failed to process form data: {}", e)}))
    ))? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(|n| n.to_string())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "your file".to_string());

        let data = field.bytes().await.map_err(|e| (
            e.status(),
            Json(json!({"error": format!("Failed to read file data: {}", e)}))
        ))?;

        if data.len() > MAX_UPLOAD_BYTES {
            return Err((
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(json!({"error": "File is too large"}))
            ));
        }

        tracing::info!("Chat upload acknowledged: {} ({} bytes)", file_name, data.len());
        return Ok(Json(json!({"reply": acknowledgement(&file_name, data.len())})));
    }

    Err((
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "No file provided"}))
    ))
}
