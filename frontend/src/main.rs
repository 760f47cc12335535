use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod consent;
mod utils {
    pub mod api;
}
mod components {
    pub mod chat_widget;
    pub mod consent_banner;
    pub mod consent_preferences;
    pub mod layout;
}
mod pages {
    pub mod contact;
    pub mod home;
    pub mod legal;
}

use components::chat_widget::ChatWidget;
use components::consent_banner::ConsentBanner;
use components::consent_preferences::ConsentPreferences;
use components::layout::{Footer, Nav};
use consent::ConsentProvider;
use pages::contact::Contact;
use pages::home::Home;
use pages::legal::{Cookies, Privacy};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/contact")]
    Contact,
    #[at("/privacy")]
    Privacy,
    #[at("/cookies")]
    Cookies,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Home /> },
        Route::Contact => html! { <Contact /> },
        Route::Privacy => html! { <Privacy /> },
        Route::Cookies => html! { <Cookies /> },
        Route::NotFound => html! {
            <div class="not-found">
                <h1>{"Page not found"}</h1>
                <Link<Route> to={Route::Home}>{"Back to the home page"}</Link<Route>>
            </div>
        },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <ConsentProvider>
                <Nav />
                <main class="content">
                    <Switch<Route> render={switch} />
                </main>
                <Footer />
                <ConsentBanner />
                <ConsentPreferences />
                <ChatWidget />
            </ConsentProvider>
        </BrowserRouter>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Starting site frontend");
    yew::Renderer::<App>::new().render();
}
