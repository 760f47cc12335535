//! Loads the analytics tag once the visitor has agreed to it, and keeps the
//! tag's consent-mode flags in line with later changes of mind.
//!
//! The loader owns the only reference to the tag's runtime. It never removes a
//! loaded script: once it has run, only its consent flags can be changed.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

pub const GTAG_SCRIPT_URL: &str = "https://www.googletagmanager.com/gtag/js";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptLoadError {
    #[error("no document to inject the script into")]
    NoDocument,
    #[error("script element could not be created: {0}")]
    Dom(String),
    #[error("script failed to load")]
    Network,
}

pub type LoadCallback = Box<dyn FnOnce(Result<(), ScriptLoadError>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentValue {
    Granted,
    Denied,
}

impl ConsentValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentValue::Granted => "granted",
            ConsentValue::Denied => "denied",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentCommand {
    Default,
    Update,
}

impl ConsentCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentCommand::Default => "default",
            ConsentCommand::Update => "update",
        }
    }
}

/// Consent-mode fields sent with `gtag('consent', ...)`. Advertising storage
/// is never offered on this site, so only `analytics_storage` varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsentModeUpdate {
    pub ad_storage: ConsentValue,
    pub ad_user_data: ConsentValue,
    pub ad_personalization: ConsentValue,
    pub analytics_storage: ConsentValue,
}

impl ConsentModeUpdate {
    pub fn all_denied() -> Self {
        Self::analytics(ConsentValue::Denied)
    }

    pub fn analytics(analytics_storage: ConsentValue) -> Self {
        Self {
            ad_storage: ConsentValue::Denied,
            ad_user_data: ConsentValue::Denied,
            ad_personalization: ConsentValue::Denied,
            analytics_storage,
        }
    }

    pub fn fields(&self) -> [(&'static str, ConsentValue); 4] {
        [
            ("ad_storage", self.ad_storage),
            ("ad_user_data", self.ad_user_data),
            ("ad_personalization", self.ad_personalization),
            ("analytics_storage", self.analytics_storage),
        ]
    }
}

/// What the loader needs from the page: a way to add the tag and the tag's
/// command surface.
pub trait ScriptHost {
    /// Adds the script and calls `on_complete` once, when it loads or fails.
    fn inject(&self, src: &str, on_complete: LoadCallback);
    fn consent(&self, command: ConsentCommand, update: &ConsentModeUpdate);
    fn page_view(&self, measurement_id: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotStarted,
    Loading,
    Loaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentSignal {
    Unset,
    Denied,
    Granted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderStatus {
    pub load_state: LoadState,
    pub script_present: bool,
    pub consent_signaled: ConsentSignal,
}

struct LoaderInner {
    status: LoaderStatus,
    // Latest analytics wish seen while the script was still loading.
    pending_analytics: Option<bool>,
    page_view_sent: bool,
}

#[derive(Clone)]
pub struct ConditionalScriptLoader {
    measurement_id: Option<String>,
    host: Rc<dyn ScriptHost>,
    inner: Rc<RefCell<LoaderInner>>,
}

impl ConditionalScriptLoader {
    pub fn new(measurement_id: Option<&str>, host: Rc<dyn ScriptHost>) -> Self {
        let measurement_id = measurement_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        if measurement_id.is_none() {
            log::info!("No analytics measurement id configured, analytics stays off");
        }
        Self {
            measurement_id,
            host,
            inner: Rc::new(RefCell::new(LoaderInner {
                status: LoaderStatus {
                    load_state: LoadState::NotStarted,
                    script_present: false,
                    consent_signaled: ConsentSignal::Unset,
                },
                pending_analytics: None,
                page_view_sent: false,
            })),
        }
    }

    pub fn status(&self) -> LoaderStatus {
        self.inner.borrow().status
    }

    pub fn script_src(measurement_id: &str) -> String {
        format!("{}?id={}", GTAG_SCRIPT_URL, measurement_id)
    }

    /// Brings the tag in line with the current consent state. Safe to call on
    /// every render; it only acts on differences.
    pub fn sync(&self, hydrated: bool, analytics: bool) {
        let Some(measurement_id) = self.measurement_id.clone() else {
            return;
        };
        if !hydrated {
            return;
        }

        let load_state = self.inner.borrow().status.load_state;
        match load_state {
            LoadState::NotStarted => {
                if analytics {
                    self.start_load(&measurement_id);
                }
            }
            LoadState::Loading => {
                self.inner.borrow_mut().pending_analytics = Some(analytics);
            }
            LoadState::Loaded => {
                if analytics {
                    self.signal_granted(&measurement_id);
                } else {
                    self.signal_denied();
                }
            }
        }
    }

    fn start_load(&self, measurement_id: &str) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.status.load_state = LoadState::Loading;
            inner.status.script_present = true;
            inner.pending_analytics = Some(true);
        }
        log::info!("Analytics consent granted, loading tag {}", measurement_id);

        let loader = self.clone();
        let id = measurement_id.to_string();
        self.host.inject(
            &Self::script_src(measurement_id),
            Box::new(move |result| loader.finish_load(&id, result)),
        );
    }

    fn finish_load(&self, measurement_id: &str, result: Result<(), ScriptLoadError>) {
        let wants_analytics = {
            let mut inner = self.inner.borrow_mut();
            if let Err(e) = result {
                log::warn!("Analytics tag did not load: {}", e);
                inner.status.load_state = LoadState::NotStarted;
                inner.status.script_present = false;
                inner.pending_analytics = None;
                return;
            }
            inner.status.load_state = LoadState::Loaded;
            inner.status.consent_signaled = ConsentSignal::Denied;
            inner.pending_analytics.take().unwrap_or(false)
        };

        self.host.consent(ConsentCommand::Default, &ConsentModeUpdate::all_denied());
        if wants_analytics {
            self.signal_granted(measurement_id);
        }
    }

    fn signal_granted(&self, measurement_id: &str) {
        let send_page_view = {
            let mut inner = self.inner.borrow_mut();
            if inner.status.consent_signaled == ConsentSignal::Granted {
                return;
            }
            inner.status.consent_signaled = ConsentSignal::Granted;
            !std::mem::replace(&mut inner.page_view_sent, true)
        };
        self.host.consent(
            ConsentCommand::Update,
            &ConsentModeUpdate::analytics(ConsentValue::Granted),
        );
        if send_page_view {
            self.host.page_view(measurement_id);
        }
    }

    fn signal_denied(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.status.consent_signaled == ConsentSignal::Denied {
                return;
            }
            inner.status.consent_signaled = ConsentSignal::Denied;
        }
        log::info!("Analytics consent withdrawn, updating tag consent mode");
        self.host.consent(
            ConsentCommand::Update,
            &ConsentModeUpdate::analytics(ConsentValue::Denied),
        );
    }
}
