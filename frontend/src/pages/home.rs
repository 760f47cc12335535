use yew::prelude::*;
use yew_router::components::Link;
use crate::Route;

#[derive(Clone, PartialEq)]
struct Service {
    title: &'static str,
    description: &'static str,
}

const SERVICES: [Service; 4] = [
    Service {
        title: "Data strategy",
        description: "Work out which questions matter, what data answers them and what to build first.",
    },
    Service {
        title: "Dashboards & reporting",
        description: "Power BI and Looker Studio reporting your team will actually open on a Monday morning.",
    },
    Service {
        title: "Data engineering",
        description: "Reliable pipelines and warehouses so numbers agree across every report.",
    },
    Service {
        title: "Applied machine learning",
        description: "Forecasting and segmentation models, shipped and explained rather than left in a notebook.",
    },
];

#[function_component(Home)]
pub fn home() -> Html {
    // Scroll to top only on initial mount
    use_effect_with_deps(
        move |_| {
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
            || ()
        },
        (),
    );

    html! {
        <div class="home-page">
            <header class="hero">
                <h1 class="hero-title">{"Make your data earn its keep"}</h1>
                <p class="hero-subtitle">
                    {"Independent analytics consultancy helping UK organisations turn scattered spreadsheets into decisions."}
                </p>
                <div class="hero-cta-group">
                    <Link<Route> to={Route::Contact} classes="btn btn-primary">{"Book a free consultation"}</Link<Route>>
                </div>
            </header>
            <section class="services">
                <h2>{"What we do"}</h2>
                <div class="service-grid">
                    { for SERVICES.iter().map(|service| html! {
                        <div class="service-card">
                            <h3>{service.title}</h3>
                            <p>{service.description}</p>
                        </div>
                    }) }
                </div>
            </section>
        </div>
    }
}
