use super::persistence::ConsentPersistence;

/// The visitor's choice about optional storage. Essential storage is always
/// allowed, so there is deliberately no way to build a decision without it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsentDecision {
    essential: bool,
    analytics: bool,
}

impl ConsentDecision {
    pub const fn new(analytics: bool) -> Self {
        Self {
            essential: true,
            analytics,
        }
    }

    pub const fn granted() -> Self {
        Self::new(true)
    }

    pub const fn denied() -> Self {
        Self::new(false)
    }

    pub fn essential(&self) -> bool {
        self.essential
    }

    pub fn analytics(&self) -> bool {
        self.analytics
    }
}

impl Default for ConsentDecision {
    fn default() -> Self {
        Self::denied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentPhase {
    Unhydrated,
    Undecided,
    Decided,
}

/// In-memory consent state for the lifetime of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConsentState {
    decision: ConsentDecision,
    decided: bool,
    hydrated: bool,
    // Draft analytics toggle while the preferences editor is open.
    preferences: Option<bool>,
    // Bumped by every explicit visitor action, even one that leaves the
    // decision unchanged, so observers can react to repeated grants.
    revision: u32,
}

impl ConsentState {
    pub fn decision(&self) -> ConsentDecision {
        self.decision
    }

    pub fn decided(&self) -> bool {
        self.decided
    }

    pub fn hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn phase(&self) -> ConsentPhase {
        match (self.hydrated, self.decided) {
            (false, _) => ConsentPhase::Unhydrated,
            (true, false) => ConsentPhase::Undecided,
            (true, true) => ConsentPhase::Decided,
        }
    }

    pub fn banner_visible(&self) -> bool {
        self.phase() == ConsentPhase::Undecided
    }

    /// `Some(toggle)` while the preferences editor is open.
    pub fn preferences_draft(&self) -> Option<bool> {
        if self.hydrated {
            self.preferences
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentAction {
    Hydrate,
    AcceptAll,
    RejectAll,
    SavePartial(bool),
    ResetConsent,
    OpenPreferences,
    SetAnalyticsDraft(bool),
    ClosePreferences,
}

/// Single source of truth for consent during a page session. Built once at
/// the application root and handed to the gate and the script loader.
#[derive(Clone)]
pub struct ConsentStore {
    state: ConsentState,
    persistence: ConsentPersistence,
}

impl PartialEq for ConsentStore {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl ConsentStore {
    pub fn new(persistence: ConsentPersistence) -> Self {
        Self {
            state: ConsentState::default(),
            persistence,
        }
    }

    pub fn state(&self) -> &ConsentState {
        &self.state
    }

    pub fn apply(&mut self, action: ConsentAction) {
        match action {
            ConsentAction::Hydrate => self.hydrate(),
            ConsentAction::AcceptAll => self.accept_all(),
            ConsentAction::RejectAll => self.reject_all(),
            ConsentAction::SavePartial(analytics) => self.save_partial(analytics),
            ConsentAction::ResetConsent => self.reset_consent(),
            ConsentAction::OpenPreferences => self.open_preferences(),
            ConsentAction::SetAnalyticsDraft(analytics) => self.set_analytics_draft(analytics),
            ConsentAction::ClosePreferences => self.close_preferences(),
        }
    }

    /// Reads persisted consent once; later calls are no-ops.
    pub fn hydrate(&mut self) {
        if self.state.hydrated {
            return;
        }
        if let Some(record) = self.persistence.load() {
            log::info!("Restored consent decision (analytics: {})", record.decision.analytics());
            self.state.decision = record.decision;
            self.state.decided = true;
        }
        self.state.hydrated = true;
    }

    pub fn accept_all(&mut self) {
        self.decide(ConsentDecision::granted());
    }

    pub fn reject_all(&mut self) {
        self.decide(ConsentDecision::denied());
    }

    pub fn save_partial(&mut self, analytics: bool) {
        self.decide(ConsentDecision::new(analytics));
    }

    /// Forgets the stored decision so the banner shows again.
    pub fn reset_consent(&mut self) {
        if !self.state.hydrated {
            return;
        }
        self.persistence.clear();
        self.state = ConsentState {
            hydrated: true,
            revision: self.state.revision.wrapping_add(1),
            ..ConsentState::default()
        };
    }

    pub fn open_preferences(&mut self) {
        if !self.state.hydrated {
            return;
        }
        self.state.preferences = Some(self.state.decision.analytics());
    }

    pub fn set_analytics_draft(&mut self, analytics: bool) {
        if let Some(draft) = self.state.preferences.as_mut() {
            *draft = analytics;
        }
    }

    pub fn close_preferences(&mut self) {
        self.state.preferences = None;
    }

    // Decisions only count once the stored one has been read.
    fn decide(&mut self, decision: ConsentDecision) {
        if !self.state.hydrated {
            return;
        }
        // State changes first; persistence can fail without undoing them.
        self.state.decision = decision;
        self.state.decided = true;
        self.state.preferences = None;
        self.state.revision = self.state.revision.wrapping_add(1);
        self.persistence.save(&decision);
    }
}
