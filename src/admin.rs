// 📊 Admin View - Read-only aggregates and table projection
// Pure functions of the store contents; nothing here mutates records

use crate::pricing::EventType;
use crate::registration::Registration;
use serde::Serialize;

// ============================================================================
// STATS
// ============================================================================

/// Dashboard counters: total plus one bucket per known event type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventStats {
    pub total: usize,
    pub hackathon: usize,
    pub coding: usize,
    pub combo: usize,
}

/// Count registrations overall and per event type.
pub fn stats(records: &[Registration]) -> EventStats {
    let mut stats = EventStats {
        total: records.len(),
        ..EventStats::default()
    };

    for registration in records {
        match registration.event_type {
            EventType::Hackathon => stats.hackathon += 1,
            EventType::Coding => stats.coding += 1,
            EventType::Combo => stats.combo += 1,
        }
    }

    stats
}

// ============================================================================
// TABLE PROJECTION
// ============================================================================

/// Optionally filter by event type, then sort most recent first.
///
/// The sort is stable, so records sharing a timestamp keep their
/// submission order.
pub fn filtered_sorted(records: &[Registration], filter: Option<EventType>) -> Vec<Registration> {
    let mut view: Vec<Registration> = records
        .iter()
        .filter(|r| filter.map_or(true, |wanted| r.event_type == wanted))
        .cloned()
        .collect();

    view.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    view
}

// ============================================================================
// AUTHENTICATION
// ============================================================================

/// Generic login failure. Deliberately does not distinguish unknown user
/// from wrong password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthError;

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid username or password")
    }
}

impl std::error::Error for AuthError {}

/// Pluggable credential check. Deployments swap the implementation
/// without touching the core.
pub trait Authenticator {
    fn authenticate(&self, username: &str, password: &str) -> bool;
}

/// Placeholder credential pair carried over from the original deployment.
/// Not a real security model.
#[derive(Debug, Default)]
pub struct HardcodedAuth;

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "admin123";

impl Authenticator for HardcodedAuth {
    fn authenticate(&self, username: &str, password: &str) -> bool {
        username == ADMIN_USERNAME && password == ADMIN_PASSWORD
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::{build, RawRegistration};
    use crate::selection::Selection;
    use chrono::{Duration, Utc};

    fn create_test_registration(team_name: &str, event_type: EventType) -> Registration {
        let mut selection = Selection::new();
        selection.set_event_type(event_type);
        let raw = RawRegistration {
            team_name: team_name.to_string(),
            members: vec!["Asha Rao".to_string(), "Vikram Shetty".to_string()],
            mobile: "9876543210".to_string(),
            transaction_id: "TXN12345".to_string(),
        };
        build(&raw, &selection).unwrap()
    }

    #[test]
    fn test_stats_counts_per_event_type() {
        let records = vec![
            create_test_registration("A", EventType::Hackathon),
            create_test_registration("B", EventType::Combo),
            create_test_registration("C", EventType::Hackathon),
            create_test_registration("D", EventType::Coding),
        ];

        let stats = stats(&records);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.hackathon, 2);
        assert_eq!(stats.coding, 1);
        assert_eq!(stats.combo, 1);
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(stats(&[]), EventStats::default());
    }

    #[test]
    fn test_filtered_sorted_most_recent_first() {
        let now = Utc::now();
        let mut t1 = create_test_registration("T1", EventType::Combo);
        let mut t2 = create_test_registration("T2", EventType::Combo);
        let mut t3 = create_test_registration("T3", EventType::Combo);
        t1.created_at = now - Duration::minutes(30);
        t2.created_at = now - Duration::minutes(20);
        t3.created_at = now - Duration::minutes(10);

        let view = filtered_sorted(&[t1, t2, t3], None);
        let names: Vec<_> = view.iter().map(|r| r.team_name.as_str()).collect();
        assert_eq!(names, vec!["T3", "T2", "T1"]);
    }

    #[test]
    fn test_filter_keeps_matching_in_same_relative_order() {
        let now = Utc::now();
        let mut h1 = create_test_registration("H1", EventType::Hackathon);
        let mut c1 = create_test_registration("C1", EventType::Coding);
        let mut h2 = create_test_registration("H2", EventType::Hackathon);
        h1.created_at = now - Duration::minutes(30);
        c1.created_at = now - Duration::minutes(20);
        h2.created_at = now - Duration::minutes(10);

        let view = filtered_sorted(&[h1, c1, h2], Some(EventType::Hackathon));
        let names: Vec<_> = view.iter().map(|r| r.team_name.as_str()).collect();
        assert_eq!(names, vec!["H2", "H1"]);
    }

    #[test]
    fn test_equal_timestamps_keep_insertion_order() {
        let shared = Utc::now();
        let mut a = create_test_registration("A", EventType::Combo);
        let mut b = create_test_registration("B", EventType::Combo);
        let mut c = create_test_registration("C", EventType::Combo);
        a.created_at = shared;
        b.created_at = shared;
        c.created_at = shared;

        let view = filtered_sorted(&[a, b, c], None);
        let names: Vec<_> = view.iter().map(|r| r.team_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_hardcoded_auth() {
        let auth = HardcodedAuth;
        assert!(auth.authenticate("admin", "admin123"));
        assert!(!auth.authenticate("admin", "wrong"));
        assert!(!auth.authenticate("root", "admin123"));
        assert!(!auth.authenticate("", ""));
    }
}
