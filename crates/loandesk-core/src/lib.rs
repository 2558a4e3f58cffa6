//! Request coordination layer between `loandesk-api` and front ends.
//!
//! - **[`Coordinator`]**: the single choke point every data operation
//!   passes through. It tracks a shared [`RequestState`] (in-flight count,
//!   last error, last error per operation kind) in a `tokio::sync::watch`
//!   channel so any number of views can observe it.
//!
//! - **[`OperationKind`]**: the fixed operation catalog (method, path
//!   template, body shapes) that names every call the coordinator makes.
//!
//! - **[`RequestHandle`]**: request-scoped handle for operations spawned
//!   as tasks, with its own status and cancellation.
//!
//! - **Domain model** ([`model`]): normalized `Customer`, `Loan`,
//!   `DashboardStats`, `Interaction`, and `CallerProfile` types. Wire
//!   schema drift is absorbed once in [`convert`].
//!
//! - **[`CallSession`]**: pre-call lookup followed by outcome submission.

pub mod call;
pub mod config;
pub mod convert;
pub mod coordinator;
pub mod error;
pub mod handle;
pub mod model;
pub mod operation;
pub mod state;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use call::{CallSession, OutcomeForm};
pub use config::ClientConfig;
pub use coordinator::Coordinator;
pub use error::CoreError;
pub use handle::{RequestHandle, RequestStatus};
pub use operation::{BodyShape, HttpMethod, OperationKind, OperationSpec, Resource};
pub use state::RequestState;

pub use model::{
    CallerLookup, CallerProfile, Customer, CustomerDraft, DashboardStats, EntityId, Interaction,
    InteractionDraft, Loan, LoanDraft, LoanStatus, LoanSummary, OutcomeAck,
};
