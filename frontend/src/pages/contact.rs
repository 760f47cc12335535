use serde::{Deserialize, Serialize};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::config;
use crate::utils::api::Api;

#[derive(Serialize)]
struct ContactRequest {
    name: String,
    email: String,
    message: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Clone, PartialEq)]
enum Status {
    Idle,
    Sending,
    Sent,
    Failed(String),
}

const GENERIC_FAILURE: &str = "Sorry, your message couldn't be sent. Please try again or email us directly.";

#[function_component(Contact)]
pub fn contact() -> Html {
    let name = use_state(String::new);
    let email = use_state(String::new);
    let message = use_state(String::new);
    let status = use_state(|| Status::Idle);

    let onsubmit = {
        let name = name.clone();
        let email = email.clone();
        let message = message.clone();
        let status = status.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *status == Status::Sending {
                return;
            }
            let request = ContactRequest {
                name: (*name).clone(),
                email: (*email).clone(),
                message: (*message).clone(),
            };
            let status = status.clone();
            let message = message.clone();
            status.set(Status::Sending);
            spawn_local(async move {
                let result = match Api::post("/api/contact").json(&request) {
                    Ok(req) => req.send().await,
                    Err(e) => Err(gloo_net::Error::GlooError(e.to_string())),
                };
                match result {
                    Ok(response) if response.ok() => {
                        message.set(String::new());
                        status.set(Status::Sent);
                    }
                    Ok(response) if response.status() == 400 => {
                        let reason = response
                            .json::<ErrorResponse>()
                            .await
                            .map(|body| body.error)
                            .unwrap_or_else(|_| GENERIC_FAILURE.to_string());
                        status.set(Status::Failed(reason));
                    }
                    Ok(response) => {
                        log::warn!("Contact form failed with status {}", response.status());
                        status.set(Status::Failed(GENERIC_FAILURE.to_string()));
                    }
                    Err(e) => {
                        log::warn!("Contact form request failed: {}", e);
                        status.set(Status::Failed(GENERIC_FAILURE.to_string()));
                    }
                }
            });
        })
    };

    let on_name = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
        })
    };
    let on_email = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };
    let on_message = {
        let message = message.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            message.set(input.value());
        })
    };

    let sending = *status == Status::Sending;

    html! {
        <div class="contact-page">
            <h1>{"Get in touch"}</h1>
            <p>{"Tell us a little about your data and what you'd like to achieve. We reply within one working day."}</p>
            <form class="contact-form" {onsubmit}>
                <label for="contact-name">{"Name"}</label>
                <input id="contact-name" type="text" required=true value={(*name).clone()} oninput={on_name} />
                <label for="contact-email">{"Email"}</label>
                <input id="contact-email" type="email" required=true value={(*email).clone()} oninput={on_email} />
                <label for="contact-message">{"Message"}</label>
                <textarea id="contact-message" rows="6" required=true value={(*message).clone()} oninput={on_message} />
                <button type="submit" class="btn btn-primary" disabled={sending}>
                    { if sending { "Sending…" } else { "Send message" } }
                </button>
            </form>
            {
                match &*status {
                    Status::Sent => html! { <p class="form-success">{"Thanks, we'll be in touch shortly."}</p> },
                    Status::Failed(reason) => html! { <p class="form-error">{reason}</p> },
                    _ => html! {},
                }
            }
            if let Some(url) = config::booking_url() {
                <p class="booking-link">
                    {"Prefer to talk? "}
                    <a href={url} target="_blank" rel="noopener noreferrer">{"Book a call"}</a>
                </p>
            }
        </div>
    }
}
