use serde::Serialize;

/// Portfolio counters shown on the landing view. Missing values are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_customers: i64,
    pub total_loans: i64,
    pub active_loans: i64,
    pub past_due_loans: i64,
    pub total_portfolio: f64,
}
