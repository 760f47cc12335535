use gloo_net::http::{Request, Response};
use gloo_net::Error as GlooError;
use serde::Serialize;
use web_sys::FormData;
use crate::config;

/// Thin wrapper over gloo-net that prefixes the backend URL.
pub struct Api;

pub struct RequestWrapper {
    request: Request,
}

impl RequestWrapper {
    fn new(path: &str, method: &str) -> Self {
        let full_url = format!("{}{}", config::get_backend_url(), path);
        let request = match method {
            "POST" => Request::post(&full_url),
            _ => Request::get(&full_url),
        };
        Self { request }
    }

    /// Set the request body as JSON
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self, serde_json::Error> {
        let body_string = serde_json::to_string(data)?;
        self.request = self.request.header("Content-Type", "application/json");
        self.request = self.request.body(body_string);
        Ok(self)
    }

    /// Multipart body; the browser sets the boundary header itself.
    pub fn form_data(mut self, form: FormData) -> Self {
        self.request = self.request.body(form);
        self
    }

    pub async fn send(self) -> Result<Response, GlooError> {
        self.request.send().await
    }
}

impl Api {
    pub fn post(path: &str) -> RequestWrapper {
        RequestWrapper::new(path, "POST")
    }
}
