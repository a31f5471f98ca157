use chrono::{DateTime, Utc};
use funding_kitchen::workflows::intake::{IntakeWizard, OrgProfile, WizardStep};
use funding_kitchen::workflows::matching::MatchClient;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) sessions: Arc<SessionStore>,
    pub(crate) matcher: Arc<MatchClient>,
}

/// One wizard per user session; nothing is shared between sessions.
pub(crate) struct SessionEntry {
    pub(crate) wizard: IntakeWizard,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Default)]
pub(crate) struct SessionStore {
    entries: Mutex<HashMap<String, SessionEntry>>,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> String {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("session-{id:06}")
}

impl SessionStore {
    /// Create a fresh wizard session. Demo sessions start fully
    /// populated and jump straight to the Review step.
    pub(crate) fn create(&self, demo: bool) -> String {
        let mut wizard = if demo {
            IntakeWizard::with_profile(OrgProfile::demo())
        } else {
            IntakeWizard::new()
        };
        if demo {
            wizard.jump_to(WizardStep::Review.index());
        }

        let id = next_session_id();
        let entry = SessionEntry {
            wizard,
            created_at: Utc::now(),
        };
        let mut guard = self.entries.lock().expect("session mutex poisoned");
        guard.insert(id.clone(), entry);
        id
    }

    /// Drop a session outright. `false` when the id was unknown.
    pub(crate) fn remove(&self, id: &str) -> bool {
        let mut guard = self.entries.lock().expect("session mutex poisoned");
        guard.remove(id).is_some()
    }

    /// Run a closure against a session under the store lock. `None`
    /// when the session id is unknown. The lock is never held across
    /// an await point; the match endpoint splits its work around it.
    pub(crate) fn with_entry<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut SessionEntry) -> T,
    ) -> Option<T> {
        let mut guard = self.entries.lock().expect("session mutex poisoned");
        guard.get_mut(id).map(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_unique_and_sequenced() {
        let store = SessionStore::default();
        let first = store.create(false);
        let second = store.create(false);
        assert_ne!(first, second);
        assert!(first.starts_with("session-"));
    }

    #[test]
    fn demo_sessions_open_on_review_with_a_complete_profile() {
        let store = SessionStore::default();
        let id = store.create(true);
        let (step, name) = store
            .with_entry(&id, |entry| {
                (
                    entry.wizard.current_step(),
                    entry.wizard.profile().organization.name.clone(),
                )
            })
            .expect("session exists");
        assert_eq!(step, WizardStep::Review);
        assert_eq!(name, "Taranaki Youth Rugby Trust");
    }

    #[test]
    fn removed_sessions_are_gone() {
        let store = SessionStore::default();
        let id = store.create(false);
        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert!(store.with_entry(&id, |_| ()).is_none());
    }

    #[test]
    fn unknown_session_yields_none() {
        let store = SessionStore::default();
        assert!(store.with_entry("session-999999", |_| ()).is_none());
    }
}
