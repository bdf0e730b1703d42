// 🎯 Selection State - Currently chosen event type and team size
// Price is recomputed synchronously on every change, never cached stale

use crate::pricing::{price, EventType, PricingError};

// ============================================================================
// SELECTION
// ============================================================================

/// Default event type when a form opens or resets.
pub const DEFAULT_EVENT_TYPE: EventType = EventType::Combo;

/// Default team size when a form opens or resets.
pub const DEFAULT_TEAM_SIZE: u8 = 2;

/// Transient (event type, team size, derived price) tuple backing the
/// registration form. Both setters re-derive the price before returning,
/// so readers never observe a stale combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    event_type: EventType,
    team_size: u8,
    price: u32,
}

impl Selection {
    pub fn new() -> Self {
        let mut selection = Selection {
            event_type: DEFAULT_EVENT_TYPE,
            team_size: DEFAULT_TEAM_SIZE,
            price: 0,
        };
        selection.recompute();
        selection
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn team_size(&self) -> u8 {
        self.team_size
    }

    /// Current derived price. Always equals `price(event_type, team_size)`.
    pub fn current_price(&self) -> u32 {
        self.price
    }

    pub fn set_event_type(&mut self, event_type: EventType) {
        self.event_type = event_type;
        self.recompute();
    }

    pub fn set_team_size(&mut self, team_size: u8) -> Result<(), PricingError> {
        // Validate against the pricing domain before committing
        let fee = price(self.event_type, team_size)?;
        self.team_size = team_size;
        self.price = fee;
        Ok(())
    }

    /// Restore the defaults (combo, 2).
    pub fn reset(&mut self) {
        *self = Selection::new();
    }

    fn recompute(&mut self) {
        // Both fields are already in-domain here; the table is total over them
        self.price = price(self.event_type, self.team_size)
            .unwrap_or_else(|_| unreachable!("selection holds an in-domain pair"));
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// MEMBER FIELD DESCRIPTORS
// ============================================================================

/// One member-name input the presentation layer should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberField {
    /// 1-based slot number.
    pub slot: u8,
    pub label: String,
    pub placeholder: String,
    /// Slot 1 doubles as the team lead.
    pub is_lead: bool,
}

/// Field descriptors for a team of the given size, in slot order.
///
/// Pure function of the team size; rendering them is the presentation
/// layer's job.
pub fn member_fields(team_size: u8) -> Vec<MemberField> {
    (1..=team_size)
        .map(|slot| {
            let is_lead = slot == 1;
            let label = if is_lead {
                "Team Lead (Member 1)".to_string()
            } else {
                format!("Member {}", slot)
            };
            let placeholder = if is_lead {
                "Full name of team lead".to_string()
            } else {
                format!("Full name of member {}", slot)
            };
            MemberField {
                slot,
                label,
                placeholder,
                is_lead,
            }
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let selection = Selection::new();
        assert_eq!(selection.event_type(), EventType::Combo);
        assert_eq!(selection.team_size(), 2);
        assert_eq!(selection.current_price(), 479);
    }

    #[test]
    fn test_price_follows_event_type_change() {
        let mut selection = Selection::new();
        selection.set_event_type(EventType::Hackathon);
        assert_eq!(selection.current_price(), 299);
        selection.set_event_type(EventType::Coding);
        assert_eq!(selection.current_price(), 139);
    }

    #[test]
    fn test_price_follows_team_size_change() {
        let mut selection = Selection::new();
        selection.set_team_size(4).unwrap();
        assert_eq!(selection.current_price(), 879);
        selection.set_event_type(EventType::Hackathon);
        assert_eq!(selection.current_price(), 499);
    }

    #[test]
    fn test_rejected_team_size_leaves_state_unchanged() {
        let mut selection = Selection::new();
        assert!(selection.set_team_size(7).is_err());
        assert_eq!(selection.team_size(), 2);
        assert_eq!(selection.current_price(), 479);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut selection = Selection::new();
        selection.set_event_type(EventType::Hackathon);
        selection.set_team_size(4).unwrap();
        selection.reset();
        assert_eq!(selection, Selection::new());
        assert_eq!(selection.current_price(), 479);
    }

    #[test]
    fn test_member_fields_for_three() {
        let fields = member_fields(3);
        assert_eq!(fields.len(), 3);
        assert!(fields[0].is_lead);
        assert_eq!(fields[0].label, "Team Lead (Member 1)");
        assert_eq!(fields[2].slot, 3);
        assert_eq!(fields[2].label, "Member 3");
        assert!(!fields[2].is_lead);
    }

    #[test]
    fn test_member_fields_solo() {
        let fields = member_fields(1);
        assert_eq!(fields.len(), 1);
        assert!(fields[0].is_lead);
    }
}
