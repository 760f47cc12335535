use serde::Deserialize;
use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use web_sys::{FormData, HtmlInputElement};
use yew::prelude::*;

use crate::utils::api::Api;

const FALLBACK_REPLY: &str = "Sorry, something went wrong. Please try again or use the contact page.";
const GREETING: &str = "Hi! Ask me anything about our analytics services.";

#[derive(Clone, PartialEq)]
enum Author {
    Visitor,
    Assistant,
}

#[derive(Clone, PartialEq)]
struct ChatMessage {
    author: Author,
    text: String,
}

#[derive(Deserialize)]
struct ChatReply {
    reply: String,
}

async fn read_reply(result: Result<gloo_net::http::Response, gloo_net::Error>) -> String {
    match result {
        Ok(response) if response.ok() => match response.json::<ChatReply>().await {
            Ok(body) => body.reply,
            Err(e) => {
                log::warn!("Unexpected chat response: {}", e);
                FALLBACK_REPLY.to_string()
            }
        },
        Ok(response) => {
            log::warn!("Chat request failed with status {}", response.status());
            FALLBACK_REPLY.to_string()
        }
        Err(e) => {
            log::warn!("Chat request failed: {}", e);
            FALLBACK_REPLY.to_string()
        }
    }
}

#[function_component(ChatWidget)]
pub fn chat_widget() -> Html {
    let is_open = use_state(|| false);
    let messages = use_state(|| vec![ChatMessage { author: Author::Assistant, text: GREETING.to_string() }]);
    let input = use_state(String::new);
    let sending = use_state(|| false);

    let push_reply = {
        let messages = messages.clone();
        let sending = sending.clone();
        move |history: Vec<ChatMessage>, reply: String| {
            let mut history = history;
            history.push(ChatMessage { author: Author::Assistant, text: reply });
            messages.set(history);
            sending.set(false);
        }
    };

    let toggle = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| is_open.set(!*is_open))
    };

    let on_input = {
        let input = input.clone();
        Callback::from(move |e: InputEvent| {
            let el: HtmlInputElement = e.target_unchecked_into();
            input.set(el.value());
        })
    };

    let on_submit = {
        let messages = messages.clone();
        let input = input.clone();
        let sending = sending.clone();
        let push_reply = push_reply.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let text = input.trim().to_string();
            if text.is_empty() || *sending {
                return;
            }
            let mut history = (*messages).clone();
            history.push(ChatMessage { author: Author::Visitor, text: text.clone() });
            messages.set(history.clone());
            input.set(String::new());
            sending.set(true);

            let push_reply = push_reply.clone();
            spawn_local(async move {
                let result = match Api::post("/api/chat").json(&json!({ "message": text })) {
                    Ok(request) => request.send().await,
                    Err(e) => Err(gloo_net::Error::GlooError(e.to_string())),
                };
                push_reply(history, read_reply(result).await);
            });
        })
    };

    let on_file = {
        let messages = messages.clone();
        let sending = sending.clone();
        Callback::from(move |e: Event| {
            let el: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = el.files().and_then(|files| files.get(0)) else {
                return;
            };
            el.set_value("");
            let form = match FormData::new() {
                Ok(form) => form,
                Err(_) => return,
            };
            if form.append_with_blob_and_filename("file", &file, &file.name()).is_err() {
                return;
            }
            let mut history = (*messages).clone();
            history.push(ChatMessage { author: Author::Visitor, text: format!("📎 {}", file.name()) });
            messages.set(history.clone());
            sending.set(true);

            let push_reply = push_reply.clone();
            spawn_local(async move {
                let result = Api::post("/api/chat/upload").form_data(form).send().await;
                push_reply(history, read_reply(result).await);
            });
        })
    };

    html! {
        <div class="chat-widget">
            if *is_open {
                <div class="chat-panel">
                    <div class="chat-header">
                        <span>{"Ask us a question"}</span>
                        <button class="chat-close" onclick={toggle.clone()} aria-label="Close chat">{"×"}</button>
                    </div>
                    <div class="chat-messages">
                        { for messages.iter().map(|m| {
                            let class = match m.author {
                                Author::Visitor => "chat-message visitor",
                                Author::Assistant => "chat-message assistant",
                            };
                            html! { <div class={class}>{ &m.text }</div> }
                        }) }
                        if *sending {
                            <div class="chat-message assistant typing">{"…"}</div>
                        }
                    </div>
                    <form class="chat-input" onsubmit={on_submit}>
                        <label class="chat-attach" title="Attach a file">
                            {"📎"}
                            <input type="file" onchange={on_file} disabled={*sending} />
                        </label>
                        <input
                            type="text"
                            placeholder="Type your message…"
                            value={(*input).clone()}
                            oninput={on_input}
                            disabled={*sending}
                        />
                        <button type="submit" disabled={*sending}>{"Send"}</button>
                    </form>
                </div>
            } else {
                <button class="chat-launcher" onclick={toggle} aria-label="Open chat">{"💬"}</button>
            }
        </div>
    }
}
