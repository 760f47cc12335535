use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::consent::{use_consent, ConsentAction};

/// Preferences editor. The analytics toggle is a draft held in the consent
/// store, reset to the current decision each time the editor opens.
#[function_component(ConsentPreferences)]
pub fn consent_preferences() -> Html {
    let consent = use_consent();
    let Some(consent) = consent else {
        return html! {};
    };
    let Some(analytics_draft) = consent.state().preferences_draft() else {
        return html! {};
    };

    let on_toggle = {
        let consent = consent.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            consent.dispatch(ConsentAction::SetAnalyticsDraft(input.checked()));
        })
    };
    let on_save = {
        let consent = consent.clone();
        Callback::from(move |_: MouseEvent| consent.dispatch(ConsentAction::SavePartial(analytics_draft)))
    };
    let on_cancel = Callback::from(move |_: MouseEvent| consent.dispatch(ConsentAction::ClosePreferences));

    html! {
        <div class="consent-overlay">
            <div class="consent-preferences" role="dialog" aria-modal="true" aria-labelledby="consent-preferences-title">
                <h2 id="consent-preferences-title">{"Cookie preferences"}</h2>
                <div class="consent-category">
                    <div class="consent-category-header">
                        <span>{"Essential"}</span>
                        <label class="switch">
                            <input type="checkbox" checked={true} disabled={true} />
                            <span class="slider round"></span>
                        </label>
                    </div>
                    <p>{"Needed for the site to work, for example remembering this choice. Always on."}</p>
                </div>
                <div class="consent-category">
                    <div class="consent-category-header">
                        <span>{"Analytics"}</span>
                        <label class="switch">
                            <input
                                type="checkbox"
                                checked={analytics_draft}
                                onchange={on_toggle}
                            />
                            <span class="slider round"></span>
                        </label>
                    </div>
                    <p>{"Helps us see which pages are useful through anonymised Google Analytics statistics."}</p>
                </div>
                <div class="consent-actions">
                    <button class="btn btn-secondary" onclick={on_cancel}>{"Cancel"}</button>
                    <button class="btn btn-primary" onclick={on_save}>{"Save"}</button>
                </div>
            </div>
        </div>
    }
}
