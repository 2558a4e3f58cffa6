// ── Domain model ──
//
// Canonical, normalized types consumed by front ends. Built from wire
// records in `convert`, never deserialized from the API directly.

pub mod call;
pub mod customer;
pub mod dashboard;
pub mod entity_id;
pub mod interaction;
pub mod loan;

pub use call::{CallerLookup, CallerProfile, OutcomeAck};
pub use customer::{Customer, CustomerDraft};
pub use dashboard::DashboardStats;
pub use entity_id::EntityId;
pub use interaction::{Interaction, InteractionDraft};
pub use loan::{Loan, LoanDraft, LoanStatus, LoanSummary};
