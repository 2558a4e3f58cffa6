// loandesk-api: Async Rust client for the loan-servicing REST API

pub mod calls;
pub mod client;
pub mod customers;
pub mod dashboard;
mod de;
pub mod error;
pub mod loans;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::Error;
pub use transport::TransportConfig;
pub use types::RawId;
