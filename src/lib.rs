// TechMania 2025 Registration Core - Library
// Exposes all modules for use in the CLI, API server, and tests

pub mod pricing;      // Static event/team-size price table
pub mod selection;    // Current event type + team size, price derivation
pub mod registration; // Form validation and record building
pub mod store;        // Ordered registration collection + persistence mapping
pub mod storage;      // Key-value collaborators (SQLite, in-memory)
pub mod admin;        // Stats, table projection, authentication
pub mod export;       // CSV serialization
pub mod session;      // Owned per-desk state replacing globals

// Re-export commonly used types
pub use pricing::{price, EventType, PricingError, EVENT_TYPES, TEAM_SIZES};
pub use selection::{member_fields, MemberField, Selection};
pub use registration::{build, RawRegistration, Registration, ValidationError};
pub use store::{load_or_empty, save, RegistrationStore, StoreError, STORAGE_KEY};
pub use storage::{KeyValueStore, MemoryKeyValue, SqliteKeyValue};
pub use admin::{filtered_sorted, stats, AuthError, Authenticator, EventStats, HardcodedAuth};
pub use export::{suggested_filename, to_csv, ExportError, CSV_HEADERS};
pub use session::{
    BlockingDelay, DelayPolicy, NoDelay, Session, SubmitError, LOGIN_DELAY, LOGOUT_DELAY,
    SUBMIT_DELAY,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
