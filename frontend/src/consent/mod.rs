//! Cookie consent: what the visitor decided, where it is remembered, and the
//! analytics tag that only runs once they have said yes.

pub mod gtag;
pub mod loader;
pub mod persistence;
pub mod provider;
pub mod store;
#[cfg(test)]
mod testing;

pub use provider::{use_consent, ConsentContext, ConsentProvider};
pub use store::{ConsentAction, ConsentDecision};
