use yew::prelude::*;
use yew_router::components::Link;

use crate::consent::{use_consent, ConsentAction};
use crate::Route;

#[function_component(Nav)]
pub fn nav() -> Html {
    html! {
        <nav class="top-nav">
            <Link<Route> to={Route::Home} classes="nav-logo">{"Northgate Analytics"}</Link<Route>>
            <div class="nav-links">
                <Link<Route> to={Route::Home} classes="nav-link">{"Services"}</Link<Route>>
                <Link<Route> to={Route::Contact} classes="nav-link nav-cta">{"Get in touch"}</Link<Route>>
            </div>
        </nav>
    }
}

#[function_component(Footer)]
pub fn footer() -> Html {
    let consent = use_consent();
    let open_settings = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        if let Some(consent) = consent.as_ref() {
            consent.dispatch(ConsentAction::OpenPreferences);
        }
    });

    html! {
        <footer class="site-footer">
            <p>{"© Northgate Analytics Ltd. Registered in England and Wales."}</p>
            <div class="footer-links">
                <Link<Route> to={Route::Privacy}>{"Privacy policy"}</Link<Route>>
                <Link<Route> to={Route::Cookies}>{"Cookie policy"}</Link<Route>>
                <a href="#" onclick={open_settings}>{"Cookie settings"}</a>
            </div>
        </footer>
    }
}
