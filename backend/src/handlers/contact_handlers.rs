use std::sync::Arc;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use lettre::Address;
use serde::Deserialize;
use serde_json::json;

use crate::AppState;
use crate::utils::mailer::ContactEnquiry;

pub const MAX_MESSAGE_CHARS: usize = 5000;

#[derive(Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

pub(crate) fn validate_contact(request: &ContactRequest) -> Result<ContactEnquiry, &'static str> {
    let name = request.name.trim();
    let email = request.email.trim();
    let message = request.message.trim();

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err("Name, email and message are all required");
    }
    // Same parser the mailer uses for the reply-to header.
    if email.parse::<Address>().is_err() {
        return Err("Please enter a valid email address");
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err("Message is too long");
    }

    Ok(ContactEnquiry {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let enquiry = validate_contact(&request).map_err(|msg| (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": msg}))
    ))?;

    tracing::info!("Contact enquiry received from {}", enquiry.email);

    state.mailer.send_enquiry(enquiry).await.map_err(|e| {
        tracing::error!("Failed to send contact enquiry: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to send message"}))
        )
    })?;

    Ok(Json(json!({"success": true})))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, message: &str) -> ContactRequest {
        ContactRequest {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn trims_valid_submission() {
        let enquiry = validate_contact(&request("  Sam ", " sam@example.com", "Hello\n")).unwrap();
        assert_eq!(enquiry.name, "Sam");
        assert_eq!(enquiry.email, "sam@example.com");
        assert_eq!(enquiry.message, "Hello");
    }

    #[test]
    fn rejects_blank_fields() {
        assert!(validate_contact(&request("", "sam@example.com", "Hi")).is_err());
        assert!(validate_contact(&request("Sam", "sam@example.com", "   ")).is_err());
    }

    #[test]
    fn rejects_malformed_email() {
        for email in ["sam", "@example.com", "sam@", "a@b@c", "sam smith@example.com", "priya,x@example.com"] {
            assert!(validate_contact(&request("Sam", email, "Hi")).is_err(), "{email}");
        }
    }

    #[test]
    fn rejects_overlong_message() {
        let long = "x".repeat(MAX_MESSAGE_CHARS + 1);
        assert_eq!(
            validate_contact(&request("Sam", "sam@example.com", &long)),
            Err("Message is too long")
        );
    }
}
