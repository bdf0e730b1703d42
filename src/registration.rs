// 📝 Registration Validator/Builder - Raw form input → committed record
// First failing rule wins; the UI surfaces one error at a time

use crate::pricing::EventType;
use crate::selection::Selection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// RAW INPUT
// ============================================================================

/// Untrusted form input as the presentation layer hands it over.
/// Member slots are in form order; slot 1 is the team lead.
#[derive(Debug, Clone, Default)]
pub struct RawRegistration {
    pub team_name: String,
    pub members: Vec<String>,
    pub mobile: String,
    pub transaction_id: String,
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Fewer non-blank member names than the selected team size.
    IncompleteTeam { required: u8, provided: u8 },
    /// Mobile number is not exactly 10 ASCII digits.
    InvalidMobile,
    /// Transaction ID shorter than 5 characters after trimming.
    InvalidTransactionId,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::IncompleteTeam { required, provided } => write!(
                f,
                "please provide names for all {} team members (got {})",
                required, provided
            ),
            ValidationError::InvalidMobile => {
                write!(f, "mobile number must be exactly 10 digits")
            }
            ValidationError::InvalidTransactionId => {
                write!(f, "please enter a valid transaction ID")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// REGISTRATION RECORD
// ============================================================================

/// A committed submission. Immutable after creation; removed only when the
/// whole store is replaced on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: String,
    pub team_name: String,
    pub event_type: EventType,
    pub team_size: u8,
    pub team_lead: String,
    pub team_members: Vec<String>,
    pub mobile: String,
    pub transaction_id: String,
    /// Fee snapshot taken at build time; never recomputed afterwards.
    pub registration_fee: u32,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    /// Display form of the creation date (en-IN, date only).
    pub fn display_date(&self) -> String {
        self.created_at.format("%d/%m/%Y").to_string()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Validate raw input against the current selection and build a record.
///
/// Rules run in order and the first failure wins:
/// 1. every member slot filled (non-blank after trimming)
/// 2. mobile is exactly 10 ASCII digits
/// 3. transaction ID at least 5 chars after trimming
///
/// Appending the result to a store is the caller's separate step.
pub fn build(raw: &RawRegistration, selection: &Selection) -> Result<Registration, ValidationError> {
    let team_size = selection.team_size();

    // Slots beyond the selected size are ignored, matching the form
    let members: Vec<String> = raw
        .members
        .iter()
        .take(team_size as usize)
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
        .collect();

    if members.len() != team_size as usize {
        return Err(ValidationError::IncompleteTeam {
            required: team_size,
            provided: members.len() as u8,
        });
    }

    let mobile = raw.mobile.trim();
    if mobile.len() != 10 || !mobile.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidMobile);
    }

    let transaction_id = raw.transaction_id.trim();
    if transaction_id.len() < 5 {
        return Err(ValidationError::InvalidTransactionId);
    }

    Ok(Registration {
        id: uuid::Uuid::new_v4().to_string(),
        team_name: raw.team_name.trim().to_string(),
        event_type: selection.event_type(),
        team_size,
        team_lead: members[0].clone(),
        team_members: members,
        mobile: mobile.to_string(),
        transaction_id: transaction_id.to_string(),
        registration_fee: selection.current_price(),
        created_at: Utc::now(),
    })
}

// ============================================================================
// TESTS
// ============================================================================
