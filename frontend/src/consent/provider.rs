use std::rc::Rc;

use yew::prelude::*;

use crate::config;
use super::gtag::GtagHost;
use super::loader::ConditionalScriptLoader;
use super::persistence::{ConsentPersistence, LocalStorage};
use super::store::{ConsentAction, ConsentStore};

impl Reducible for ConsentStore {
    type Action = ConsentAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

pub type ConsentContext = UseReducerHandle<ConsentStore>;

#[hook]
pub fn use_consent() -> Option<ConsentContext> {
    use_context::<ConsentContext>()
}

#[derive(Properties, PartialEq)]
pub struct ConsentProviderProps {
    #[prop_or_default]
    pub children: Children,
}

/// Owns the page's consent store and the analytics loader that follows it.
#[function_component(ConsentProvider)]
pub fn consent_provider(props: &ConsentProviderProps) -> Html {
    let store = use_reducer(|| ConsentStore::new(ConsentPersistence::new(Rc::new(LocalStorage))));

    // Storage is only read once the app has mounted.
    {
        let store = store.clone();
        use_effect_with_deps(
            move |_| {
                store.dispatch(ConsentAction::Hydrate);
                || ()
            },
            (),
        );
    }

    html! {
        <ContextProvider<ConsentContext> context={store}>
            { for props.children.iter() }
            <AnalyticsLoader />
        </ContextProvider<ConsentContext>>
    }
}

#[function_component(AnalyticsLoader)]
fn analytics_loader() -> Html {
    let consent = use_consent();
    let loader = use_state(|| {
        ConditionalScriptLoader::new(config::analytics_measurement_id(), Rc::new(GtagHost))
    });

    let deps = consent
        .as_ref()
        .map(|c| {
            let state = c.state();
            (state.hydrated(), state.decision().analytics(), state.revision())
        })
        .unwrap_or((false, false, 0));

    {
        let loader = (*loader).clone();
        use_effect_with_deps(
            move |&(hydrated, analytics, _revision): &(bool, bool, u32)| {
                loader.sync(hydrated, analytics);
                || ()
            },
            deps,
        );
    }

    html! {}
}
