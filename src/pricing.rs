// 💰 Pricing Table - Static event/team-size price lookup
// Single source of truth for registration fees (rupees, whole units)

use serde::{Deserialize, Serialize};

// ============================================================================
// EVENT TYPE
// ============================================================================

/// The three offerings: two standalone events plus the combo pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Hackathon,
    Coding,
    Combo,
}

/// All supported event types, in display order.
pub const EVENT_TYPES: [EventType; 3] = [EventType::Hackathon, EventType::Coding, EventType::Combo];

/// Supported team sizes.
pub const TEAM_SIZES: [u8; 4] = [1, 2, 3, 4];

impl EventType {
    /// Wire/storage name (matches the persisted payload).
    pub fn name(&self) -> &'static str {
        match self {
            EventType::Hackathon => "hackathon",
            EventType::Coding => "coding",
            EventType::Combo => "combo",
        }
    }

    /// Human-facing label for tables and dashboards.
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Hackathon => "Hackathon",
            EventType::Coding => "Coding",
            EventType::Combo => "Combo",
        }
    }
}

impl std::str::FromStr for EventType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hackathon" => Ok(EventType::Hackathon),
            "coding" => Ok(EventType::Coding),
            "combo" => Ok(EventType::Combo),
            other => Err(PricingError::UnknownEventType(other.to_string())),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// PRICING ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Team size outside the supported 1..=4 domain.
    UnsupportedTeamSize(u8),
    /// Event type string not in the supported set (parse path only).
    UnknownEventType(String),
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingError::UnsupportedTeamSize(n) => {
                write!(f, "unsupported team size: {} (supported: 1-4)", n)
            }
            PricingError::UnknownEventType(s) => {
                write!(f, "unknown event type: {}", s)
            }
        }
    }
}

impl std::error::Error for PricingError {}

// ============================================================================
// PRICE LOOKUP
// ============================================================================

/// Registration fee for an event type and team size.
///
/// Pure lookup, no state. Every supported (event, size) pair has exactly
/// one positive price.
pub fn price(event_type: EventType, team_size: u8) -> Result<u32, PricingError> {
    if !TEAM_SIZES.contains(&team_size) {
        return Err(PricingError::UnsupportedTeamSize(team_size));
    }

    let fee = match (event_type, team_size) {
        (EventType::Hackathon, 1) => 159,
        (EventType::Hackathon, 2) => 299,
        (EventType::Hackathon, 3) => 399,
        (EventType::Hackathon, 4) => 499,
        // Coding is priced per team, flat across sizes
        (EventType::Coding, _) => 139,
        (EventType::Combo, 1) => 249,
        (EventType::Combo, 2) => 479,
        (EventType::Combo, 3) => 649,
        (EventType::Combo, 4) => 879,
        _ => unreachable!("team size already range-checked"),
    };

    Ok(fee)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_table_exact_values() {
        assert_eq!(price(EventType::Combo, 2).unwrap(), 479);
        assert_eq!(price(EventType::Hackathon, 4).unwrap(), 499);
        assert_eq!(price(EventType::Coding, 1).unwrap(), 139);
    }

    #[test]
    fn test_every_supported_pair_has_positive_price() {
        for event_type in EVENT_TYPES {
            for size in TEAM_SIZES {
                let fee = price(event_type, size).unwrap();
                assert!(fee > 0, "{}/{} must have a positive price", event_type, size);
            }
        }
    }

    #[test]
    fn test_coding_is_flat_priced() {
        for size in TEAM_SIZES {
            assert_eq!(price(EventType::Coding, size).unwrap(), 139);
        }
    }

    #[test]
    fn test_out_of_domain_team_size_fails() {
        assert_eq!(
            price(EventType::Hackathon, 0).unwrap_err(),
            PricingError::UnsupportedTeamSize(0)
        );
        assert_eq!(
            price(EventType::Combo, 5).unwrap_err(),
            PricingError::UnsupportedTeamSize(5)
        );
    }

    #[test]
    fn test_event_type_parse_roundtrip() {
        for event_type in EVENT_TYPES {
            let parsed: EventType = event_type.name().parse().unwrap();
            assert_eq!(parsed, event_type);
        }
        assert!("workshop".parse::<EventType>().is_err());
    }

    #[test]
    fn test_event_type_serde_wire_names() {
        let json = serde_json::to_string(&EventType::Hackathon).unwrap();
        assert_eq!(json, "\"hackathon\"");
        let back: EventType = serde_json::from_str("\"combo\"").unwrap();
        assert_eq!(back, EventType::Combo);
    }
}
