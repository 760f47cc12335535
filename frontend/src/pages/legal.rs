use yew::prelude::*;

use crate::consent::{use_consent, ConsentAction};

#[function_component(Privacy)]
pub fn privacy() -> Html {
    html! {
        <div class="legal-page">
            <h1>{"Privacy policy"}</h1>
            <h2>{"What we collect"}</h2>
            <p>
                {"When you use the contact form we receive your name, email address and message. \
                  We use these only to reply to your enquiry and keep them for no longer than two years."}
            </p>
            <p>
                {"Messages sent through the chat assistant are processed by a third-party language model \
                  provider to generate a reply. Files you attach are acknowledged but not stored."}
            </p>
            <h2>{"Analytics"}</h2>
            <p>
                {"With your permission we use Google Analytics to understand which pages are useful. \
                  Nothing is loaded until you agree, and you can change your mind at any time from the cookie settings."}
            </p>
            <h2>{"Your rights"}</h2>
            <p>
                {"You can ask to see, correct or delete the personal data we hold about you by getting in touch \
                  through the contact page."}
            </p>
        </div>
    }
}

#[function_component(Cookies)]
pub fn cookies() -> Html {
    let consent = use_consent();

    let current = consent.as_ref().and_then(|consent| {
        let state = consent.state();
        state.decided().then(|| state.decision().analytics())
    });

    let open_settings = {
        let consent = consent.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(consent) = consent.as_ref() {
                consent.dispatch(ConsentAction::OpenPreferences);
            }
        })
    };
    let forget = Callback::from(move |_: MouseEvent| {
        if let Some(consent) = consent.as_ref() {
            consent.dispatch(ConsentAction::ResetConsent);
        }
    });

    html! {
        <div class="legal-page">
            <h1>{"Cookie policy"}</h1>
            <p>
                {"We use a small number of cookies and similar browser storage. Essential storage keeps \
                  the site working and remembers your cookie choice. Analytics cookies are only set after you opt in."}
            </p>
            <table class="cookie-table">
                <thead>
                    <tr><th>{"Name"}</th><th>{"Purpose"}</th><th>{"Category"}</th></tr>
                </thead>
                <tbody>
                    <tr><td>{"analytics_consent_v1"}</td><td>{"Remembers your cookie choice"}</td><td>{"Essential"}</td></tr>
                    <tr><td>{"_ga, _ga_*"}</td><td>{"Distinguishes visitors for Google Analytics"}</td><td>{"Analytics"}</td></tr>
                </tbody>
            </table>
            <p class="consent-status">
                {
                    match current {
                        Some(true) => "You have allowed analytics cookies.",
                        Some(false) => "You have declined analytics cookies.",
                        None => "You haven't made a choice yet.",
                    }
                }
            </p>
            <div class="consent-actions">
                <button class="btn btn-primary" onclick={open_settings}>{"Cookie settings"}</button>
                <button class="btn btn-secondary" onclick={forget}>{"Forget my choice"}</button>
            </div>
        </div>
    }
}
