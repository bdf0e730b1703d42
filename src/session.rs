// 🧭 Session - Explicit owned state for one registration desk
// Replaces process-wide globals; handlers receive this, tests build their own

use crate::admin::{self, AuthError, Authenticator, EventStats, HardcodedAuth};
use crate::export::{self, ExportError};
use crate::pricing::{EventType, PricingError};
use crate::registration::{build, RawRegistration, Registration, ValidationError};
use crate::selection::Selection;
use crate::storage::KeyValueStore;
use crate::store::{self, RegistrationStore, StoreError};
use std::time::Duration;

// ============================================================================
// DELAY POLICY
// ============================================================================

/// Simulated network latency before acknowledging submissions and logins.
/// Purely cosmetic; injectable so tests run instantly.
pub trait DelayPolicy {
    fn pause(&self, duration: Duration);
}

/// No-op policy for tests and batch tooling.
#[derive(Debug, Default)]
pub struct NoDelay;

impl DelayPolicy for NoDelay {
    fn pause(&self, _duration: Duration) {}
}

/// Blocking policy matching the original user experience. The core is
/// single-threaded and synchronous, so a plain sleep is enough.
#[derive(Debug, Default)]
pub struct BlockingDelay;

impl DelayPolicy for BlockingDelay {
    fn pause(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

pub const SUBMIT_DELAY: Duration = Duration::from_millis(2000);
pub const LOGIN_DELAY: Duration = Duration::from_millis(1500);
pub const LOGOUT_DELAY: Duration = Duration::from_millis(1000);

// ============================================================================
// SUBMIT ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    Validation(ValidationError),
    Store(StoreError),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::Validation(err) => write!(f, "{}", err),
            SubmitError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SubmitError {}

// ============================================================================
// SESSION
// ============================================================================

/// One registration desk: current selection, the owned store, admin login
/// state, and the pluggable auth/delay collaborators.
pub struct Session {
    selection: Selection,
    store: RegistrationStore,
    authenticator: Box<dyn Authenticator + Send>,
    delay: Box<dyn DelayPolicy + Send>,
    admin_logged_in: bool,
}

impl Session {
    /// Production wiring: hardcoded credentials, real delays, empty store.
    pub fn new() -> Self {
        Self::with_parts(
            RegistrationStore::new(),
            Box::new(HardcodedAuth),
            Box::new(BlockingDelay),
        )
    }

    pub fn with_parts(
        store: RegistrationStore,
        authenticator: Box<dyn Authenticator + Send>,
        delay: Box<dyn DelayPolicy + Send>,
    ) -> Self {
        Session {
            selection: Selection::new(),
            store,
            authenticator,
            delay,
            admin_logged_in: false,
        }
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn select_event_type(&mut self, event_type: EventType) {
        self.selection.set_event_type(event_type);
    }

    pub fn select_team_size(&mut self, team_size: u8) -> Result<(), PricingError> {
        self.selection.set_team_size(team_size)
    }

    pub fn current_price(&self) -> u32 {
        self.selection.current_price()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Validate, commit, and persist one submission.
    ///
    /// A persistence failure is logged but does not roll back the
    /// in-memory commit; the record is durable on the next save. On
    /// success the selection resets to the defaults, as the form does.
    pub fn submit_registration(
        &mut self,
        raw: &RawRegistration,
        kv: &mut dyn KeyValueStore,
    ) -> Result<Registration, SubmitError> {
        let registration = build(raw, &self.selection).map_err(SubmitError::Validation)?;

        self.delay.pause(SUBMIT_DELAY);

        self.store
            .append(registration.clone())
            .map_err(SubmitError::Store)?;

        if let Err(err) = store::save(&self.store, kv) {
            tracing::warn!("failed to persist registrations: {err:#}");
        }

        self.selection.reset();
        Ok(registration)
    }

    // ------------------------------------------------------------------
    // Admin
    // ------------------------------------------------------------------

    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        self.delay.pause(LOGIN_DELAY);

        if self.authenticator.authenticate(username, password) {
            self.admin_logged_in = true;
            Ok(())
        } else {
            Err(AuthError)
        }
    }

    pub fn logout(&mut self) {
        self.delay.pause(LOGOUT_DELAY);
        self.admin_logged_in = false;
    }

    pub fn is_admin_logged_in(&self) -> bool {
        self.admin_logged_in
    }

    pub fn stats(&self) -> EventStats {
        admin::stats(self.store.all())
    }

    pub fn filtered_registrations(&self, filter: Option<EventType>) -> Vec<Registration> {
        admin::filtered_sorted(self.store.all(), filter)
    }

    // ------------------------------------------------------------------
    // Store access / export
    // ------------------------------------------------------------------

    pub fn registrations(&self) -> &[Registration] {
        self.store.all()
    }

    /// Export the full store in submission order.
    pub fn export_csv(&self) -> Result<String, ExportError> {
        export::to_csv(self.store.all())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValue;
    use crate::store::{load_or_empty, STORAGE_KEY};
    use anyhow::anyhow;

    fn create_test_session() -> Session {
        Session::with_parts(
            RegistrationStore::new(),
            Box::new(HardcodedAuth),
            Box::new(NoDelay),
        )
    }

    fn create_test_input() -> RawRegistration {
        RawRegistration {
            team_name: "Code Crusaders".to_string(),
            members: vec!["Asha Rao".to_string(), "Vikram Shetty".to_string()],
            mobile: "9876543210".to_string(),
            transaction_id: "TXN12345".to_string(),
        }
    }

    /// Collaborator whose writes always fail, for the degraded-save path.
    struct BrokenKeyValue;

    impl KeyValueStore for BrokenKeyValue {
        fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
            Err(anyhow!("disk full"))
        }
    }

    #[test]
    fn test_submit_commits_persists_and_resets() {
        let mut session = create_test_session();
        let mut kv = MemoryKeyValue::new();

        session.select_event_type(EventType::Hackathon);
        session.select_team_size(2).unwrap();
        assert_eq!(session.current_price(), 299);

        let registration = session
            .submit_registration(&create_test_input(), &mut kv)
            .unwrap();
        assert_eq!(registration.registration_fee, 299);
        assert_eq!(session.registrations().len(), 1);

        // Persisted under the shared storage key
        assert!(kv.get(STORAGE_KEY).unwrap().is_some());
        let reloaded = load_or_empty(&kv);
        assert_eq!(reloaded.all(), session.registrations());

        // Selection back to combo/2 after a successful submission
        assert_eq!(session.current_price(), 479);
        assert_eq!(session.selection().team_size(), 2);
    }

    #[test]
    fn test_submit_validation_failure_leaves_everything_alone() {
        let mut session = create_test_session();
        let mut kv = MemoryKeyValue::new();

        session.select_event_type(EventType::Hackathon);
        let mut raw = create_test_input();
        raw.mobile = "12345".to_string();

        let err = session.submit_registration(&raw, &mut kv).unwrap_err();
        assert_eq!(err, SubmitError::Validation(ValidationError::InvalidMobile));

        assert!(session.registrations().is_empty());
        assert!(kv.get(STORAGE_KEY).unwrap().is_none());
        // Form state preserved for correction
        assert_eq!(session.selection().event_type(), EventType::Hackathon);
    }

    #[test]
    fn test_submit_survives_broken_persistence() {
        let mut session = create_test_session();
        let mut kv = BrokenKeyValue;

        let result = session.submit_registration(&create_test_input(), &mut kv);
        assert!(result.is_ok());
        assert_eq!(session.registrations().len(), 1);
    }

    #[test]
    fn test_login_logout_flow() {
        let mut session = create_test_session();
        assert!(!session.is_admin_logged_in());

        assert_eq!(session.login("admin", "nope"), Err(AuthError));
        assert!(!session.is_admin_logged_in());

        session.login("admin", "admin123").unwrap();
        assert!(session.is_admin_logged_in());

        session.logout();
        assert!(!session.is_admin_logged_in());
    }

    #[test]
    fn test_projections_and_export() {
        let mut session = create_test_session();
        let mut kv = MemoryKeyValue::new();

        session.select_event_type(EventType::Coding);
        session
            .submit_registration(&create_test_input(), &mut kv)
            .unwrap();

        // Submission reset the selection, so pick again for the second one
        session.select_event_type(EventType::Hackathon);
        let mut second = create_test_input();
        second.team_name = "Bug Hunters".to_string();
        session.submit_registration(&second, &mut kv).unwrap();

        let stats = session.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.coding, 1);
        assert_eq!(stats.hackathon, 1);

        let coding_only = session.filtered_registrations(Some(EventType::Coding));
        assert_eq!(coding_only.len(), 1);
        assert_eq!(coding_only[0].team_name, "Code Crusaders");

        let csv = session.export_csv().unwrap();
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn test_export_empty_store_is_rejected() {
        let session = create_test_session();
        assert_eq!(session.export_csv().unwrap_err(), ExportError::Empty);
    }
}
