use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys;
use web_sys::HtmlScriptElement;

use super::loader::{ConsentCommand, ConsentModeUpdate, LoadCallback, ScriptHost, ScriptLoadError};

// `window.gtag` is the dataLayer shim defined in index.html.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = window, js_name = gtag)]
    fn gtag_consent(command: &str, mode: &str, params: &JsValue) -> Result<(), JsValue>;
    #[wasm_bindgen(catch, js_namespace = window, js_name = gtag)]
    fn gtag_js(command: &str, date: &js_sys::Date) -> Result<(), JsValue>;
    #[wasm_bindgen(catch, js_namespace = window, js_name = gtag)]
    fn gtag_config(command: &str, target: &str) -> Result<(), JsValue>;
}

/// Injects the Google tag into `<head>` and talks to it through `gtag`.
pub struct GtagHost;

impl ScriptHost for GtagHost {
    fn inject(&self, src: &str, on_complete: LoadCallback) {
        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(document) => document,
            None => return on_complete(Err(ScriptLoadError::NoDocument)),
        };
        let script: HtmlScriptElement = match document
            .create_element("script")
            .map_err(|e| format!("{:?}", e))
            .and_then(|el| el.dyn_into::<HtmlScriptElement>().map_err(|_| "not a script element".to_string()))
        {
            Ok(script) => script,
            Err(e) => return on_complete(Err(ScriptLoadError::Dom(e))),
        };
        script.set_async(true);
        script.set_src(src);

        // Only one of onload/onerror fires; whichever does takes the callback.
        let callback = Rc::new(RefCell::new(Some(on_complete)));
        let onload = {
            let callback = callback.clone();
            Closure::<dyn FnMut()>::new(move || {
                if let Some(cb) = callback.borrow_mut().take() {
                    cb(Ok(()));
                }
            })
        };
        let onerror = {
            let callback = callback.clone();
            let script = script.clone();
            Closure::<dyn FnMut()>::new(move || {
                // A fresh element is injected on retry.
                script.remove();
                if let Some(cb) = callback.borrow_mut().take() {
                    cb(Err(ScriptLoadError::Network));
                }
            })
        };
        script.set_onload(Some(onload.as_ref().unchecked_ref()));
        script.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onload.forget();
        onerror.forget();

        let appended = match document.head() {
            Some(head) => head.append_child(&script).map(|_| ()).map_err(|e| format!("{:?}", e)),
            None => Err("document has no head".to_string()),
        };
        if let Err(e) = appended {
            if let Some(cb) = callback.borrow_mut().take() {
                cb(Err(ScriptLoadError::Dom(e)));
            }
        }
    }

    fn consent(&self, command: ConsentCommand, update: &ConsentModeUpdate) {
        let params = js_sys::Object::new();
        for (field, value) in update.fields() {
            let _ = js_sys::Reflect::set(&params, &JsValue::from_str(field), &JsValue::from_str(value.as_str()));
        }
        if let Err(e) = gtag_consent("consent", command.as_str(), &params) {
            log::warn!("gtag consent call failed: {:?}", e);
        }
    }

    fn page_view(&self, measurement_id: &str) {
        let result = gtag_js("js", &js_sys::Date::new_0())
            .and_then(|_| gtag_config("config", measurement_id));
        if let Err(e) = result {
            log::warn!("gtag page view failed: {:?}", e);
        }
    }
}
