use std::sync::Arc;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod config;
pub mod handlers {
    pub mod chat_handlers;
    pub mod contact_handlers;
}
pub mod utils {
    pub mod chat_provider;
    pub mod mailer;
}

use config::Config;
use handlers::{chat_handlers, contact_handlers};
use utils::chat_provider::{ChatProvider, DisabledProvider, OpenRouterProvider};
use utils::mailer::{LogMailer, MailError, Mailer, SmtpMailer};

pub struct AppState {
    pub config: Config,
    pub mailer: Arc<dyn Mailer>,
    pub chat: Arc<dyn ChatProvider>,
}

impl AppState {
    /// Builds the state with the real SMTP and chat clients, or their
    /// development stand-ins when the configuration leaves them out.
    pub fn from_config(config: Config) -> Result<Self, MailError> {
        let mailer: Arc<dyn Mailer> = match &config.smtp {
            Some(smtp) => Arc::new(SmtpMailer::new(smtp)?),
            None => {
                tracing::warn!("SMTP_SERVER not set, contact enquiries will only be logged");
                Arc::new(LogMailer)
            }
        };
        let chat: Arc<dyn ChatProvider> = match &config.chat {
            Some(chat) => Arc::new(OpenRouterProvider::new(chat.clone())),
            None => {
                tracing::warn!("OPENROUTER_API_KEY not set, chat will answer with the fallback reply");
                Arc::new(DisabledProvider)
            }
        };
        Ok(Self { config, mailer, chat })
    }
}

async fn health_check() -> &'static str {
    "OK"
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let index = state.config.frontend_dist.join("index.html");
    let static_files = ServeDir::new(&state.config.frontend_dist)
        .fallback(ServeFile::new(index));

    let api_routes = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/contact", post(contact_handlers::submit_contact))
        .route("/api/chat", post(chat_handlers::chat))
        .route(
            "/api/chat/upload",
            post(chat_handlers::upload)
                .layer(DefaultBodyLimit::max(chat_handlers::MAX_UPLOAD_BYTES + 64 * 1024)),
        );

    let frontend_url: axum::http::HeaderValue = state
        .config
        .frontend_url
        .parse()
        .unwrap_or_else(|_| {
            tracing::warn!("Invalid FRONTEND_URL {}, allowing localhost only", state.config.frontend_url);
            axum::http::HeaderValue::from_static("http://localhost:8080")
        });

    Router::new()
        .merge(api_routes)
        .fallback_service(static_files)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .layer(
            CorsLayer::new()
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST, axum::http::Method::OPTIONS])
                .allow_origin(AllowOrigin::exact(frontend_url))
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                    axum::http::header::ORIGIN,
                ])
        )
        .with_state(state)
}
