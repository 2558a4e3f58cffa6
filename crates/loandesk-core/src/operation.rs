// ── Operation catalog ──
//
// Every request the coordinator can issue, described once: verb, path
// template, and the shapes of the bodies exchanged. The catalog is
// static; path parameters are substituted by `render_path`.

use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::model::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// The record family an operation works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Customer,
    Loan,
    Dashboard,
    CallCenter,
    Interaction,
}

/// Payload shape on either side of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BodyShape {
    None,
    CustomerFields,
    CustomerRecord,
    CustomerList,
    LoanFields,
    LoanRecord,
    LoanList,
    DashboardStats,
    PreCallLookup,
    CallOutcome,
    Acknowledgement,
    InteractionFields,
    InteractionRecord,
    InteractionList,
}

/// Named operations, one per endpoint.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Display,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    ListCustomers,
    GetCustomer,
    CreateCustomer,
    UpdateCustomer,
    DeleteCustomer,
    ListLoans,
    GetLoan,
    CreateLoan,
    UpdateLoan,
    DeleteLoan,
    DashboardStats,
    LookupProfile,
    SubmitOutcome,
    ListInteractions,
    CreateInteraction,
}

/// Static description of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperationSpec {
    pub kind: OperationKind,
    pub resource: Resource,
    pub method: HttpMethod,
    /// Path relative to the API base; `{id}` marks the record id.
    pub path: &'static str,
    /// Query parameter carried by the operation, if any.
    pub query: Option<&'static str>,
    pub request: BodyShape,
    pub response: BodyShape,
}

impl OperationKind {
    #[allow(clippy::too_many_lines)]
    pub const fn spec(self) -> OperationSpec {
        use BodyShape as B;
        use HttpMethod as M;
        use Resource as R;

        let (resource, method, path, query, request, response) = match self {
            Self::ListCustomers => (R::Customer, M::Get, "customers", None, B::None, B::CustomerList),
            Self::GetCustomer => (R::Customer, M::Get, "customers/{id}", None, B::None, B::CustomerRecord),
            Self::CreateCustomer => (
                R::Customer,
                M::Post,
                "customers",
                None,
                B::CustomerFields,
                B::CustomerRecord,
            ),
            Self::UpdateCustomer => (
                R::Customer,
                M::Put,
                "customers/{id}",
                None,
                B::CustomerFields,
                B::CustomerRecord,
            ),
            Self::DeleteCustomer => (R::Customer, M::Delete, "customers/{id}", None, B::None, B::None),
            Self::ListLoans => (R::Loan, M::Get, "loans", None, B::None, B::LoanList),
            Self::GetLoan => (R::Loan, M::Get, "loans/{id}", None, B::None, B::LoanRecord),
            Self::CreateLoan => (R::Loan, M::Post, "loans", None, B::LoanFields, B::LoanRecord),
            Self::UpdateLoan => (R::Loan, M::Put, "loans/{id}", None, B::LoanFields, B::LoanRecord),
            Self::DeleteLoan => (R::Loan, M::Delete, "loans/{id}", None, B::None, B::None),
            Self::DashboardStats => (
                R::Dashboard,
                M::Get,
                "dashboard-stats",
                None,
                B::None,
                B::DashboardStats,
            ),
            Self::LookupProfile => (
                R::CallCenter,
                M::Get,
                "fetch_user_profile_pre_call/",
                Some("caller_number"),
                B::None,
                B::PreCallLookup,
            ),
            Self::SubmitOutcome => (
                R::CallCenter,
                M::Post,
                "post_call_outcomes/",
                None,
                B::CallOutcome,
                B::Acknowledgement,
            ),
            Self::ListInteractions => (
                R::Interaction,
                M::Get,
                "customers/{id}/interactions",
                None,
                B::None,
                B::InteractionList,
            ),
            Self::CreateInteraction => (
                R::Interaction,
                M::Post,
                "customers/{id}/interactions",
                None,
                B::InteractionFields,
                B::InteractionRecord,
            ),
        };

        OperationSpec {
            kind: self,
            resource,
            method,
            path,
            query,
            request,
            response,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl OperationSpec {
    /// Path with `{id}` substituted. Paths without a placeholder are
    /// returned unchanged.
    pub fn render_path(&self, id: Option<&EntityId>) -> String {
        match id {
            Some(id) => self.path.replace("{id}", &id.to_string()),
            None => self.path.to_owned(),
        }
    }

    pub fn takes_id(&self) -> bool {
        self.path.contains("{id}")
    }
}

/// The full catalog, in declaration order.
pub fn catalog() -> Vec<OperationSpec> {
    OperationKind::iter().map(OperationKind::spec).collect()
}
