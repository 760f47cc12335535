/// Base URL of the backend API. Empty means same origin.
pub fn get_backend_url() -> &'static str {
    option_env!("BACKEND_URL").unwrap_or("")
}

/// Analytics measurement id (e.g. `G-XXXXXXX`), baked in at build time.
/// Without one the analytics tag is never loaded.
pub fn analytics_measurement_id() -> Option<&'static str> {
    option_env!("GA_MEASUREMENT_ID")
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

/// Third-party booking page linked from the contact page.
pub fn booking_url() -> Option<&'static str> {
    option_env!("BOOKING_URL").filter(|url| !url.is_empty())
}
