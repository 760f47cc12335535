use yew::prelude::*;
use yew_router::components::Link;

use crate::consent::{use_consent, ConsentAction};
use crate::Route;

/// Bottom-of-page cookie banner. Stays hidden until the stored decision has
/// been read, and for good once the visitor has chosen.
#[function_component(ConsentBanner)]
pub fn consent_banner() -> Html {
    let consent = use_consent();
    let Some(consent) = consent else {
        return html! {};
    };
    if !consent.state().banner_visible() {
        return html! {};
    }

    let on_reject = {
        let consent = consent.clone();
        Callback::from(move |_: MouseEvent| consent.dispatch(ConsentAction::RejectAll))
    };
    let on_manage = {
        let consent = consent.clone();
        Callback::from(move |_: MouseEvent| consent.dispatch(ConsentAction::OpenPreferences))
    };
    let on_accept = Callback::from(move |_: MouseEvent| consent.dispatch(ConsentAction::AcceptAll));

    html! {
        <div class="consent-banner" role="dialog" aria-live="polite" aria-label="Cookie consent">
            <p class="consent-text">
                {"We use essential cookies to run this site and, with your permission, analytics cookies to understand how it's used. "}
                <Link<Route> to={Route::Cookies} classes="consent-link">{"Cookie policy"}</Link<Route>>
            </p>
            <div class="consent-actions">
                <button class="btn btn-secondary" onclick={on_reject}>{"Reject"}</button>
                <button class="btn btn-secondary" onclick={on_manage}>{"Manage"}</button>
                <button class="btn btn-primary" onclick={on_accept}>{"Accept"}</button>
            </div>
        </div>
    }
}
