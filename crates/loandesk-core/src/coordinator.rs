// ── Request-state coordinator ──
//
// Every data operation runs through `Coordinator::execute`, which marks
// the operation in flight, clears the last error, awaits the transport
// call, and records a derived message on failure. Named operations are
// thin bindings of `execute` to one `ApiClient` call plus normalization.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use loandesk_api::types::CallOutcomePayload;
use loandesk_api::{ApiClient, RawId, TransportConfig};

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::handle::{RequestHandle, RequestStatus};
use crate::model::{
    CallerLookup, Customer, CustomerDraft, DashboardStats, EntityId, Interaction,
    InteractionDraft, Loan, LoanDraft, OutcomeAck,
};
use crate::operation::OperationKind;
use crate::state::RequestState;

// ── In-flight guard ──────────────────────────────────────────────────

/// Holds one unit of the in-flight count. Dropping it (including when the
/// awaiting future is dropped) releases the unit.
struct InFlight<'a> {
    state: &'a watch::Sender<RequestState>,
    settled: bool,
}

impl<'a> InFlight<'a> {
    fn begin(state: &'a watch::Sender<RequestState>, kind: OperationKind) -> Self {
        state.send_modify(|s| s.begin(kind));
        Self {
            state,
            settled: false,
        }
    }

    /// Record the failure and release in one state transition.
    fn fail(mut self, kind: OperationKind, message: String) {
        self.state.send_modify(|s| {
            s.record_failure(kind, message);
            s.finish();
        });
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.state.send_modify(RequestState::finish);
        }
    }
}

// ── Coordinator ──────────────────────────────────────────────────────

/// Shared entry point for all data operations.
///
/// Cheaply cloneable; clones share one [`RequestState`]. A view that owns
/// its own lifetime takes a [`scoped`](Self::scoped) coordinator and
/// cancels it when it goes away.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<CoordinatorInner>,
    cancel: CancellationToken,
}

struct CoordinatorInner {
    client: ApiClient,
    state: watch::Sender<RequestState>,
}

impl Coordinator {
    /// Build a coordinator and its HTTP client from resolved configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
            ..TransportConfig::default()
        };
        let client = ApiClient::new(config.base_url.as_str(), &transport)?;
        Ok(Self::with_client(client))
    }

    /// Wrap an already-built API client.
    pub fn with_client(client: ApiClient) -> Self {
        let (state, _) = watch::channel(RequestState::default());
        Self {
            inner: Arc::new(CoordinatorInner { client, state }),
            cancel: CancellationToken::new(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    // ── State observation ────────────────────────────────────────────

    /// Current state snapshot.
    pub fn state(&self) -> RequestState {
        self.inner.state.borrow().clone()
    }

    pub fn loading(&self) -> bool {
        self.inner.state.borrow().loading()
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner.state.borrow().last_error().map(str::to_owned)
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.inner.state.subscribe()
    }

    /// Dismiss the captured error(s).
    pub fn clear_error(&self) {
        self.inner.state.send_modify(RequestState::clear_errors);
    }

    // ── Scopes ───────────────────────────────────────────────────────

    /// A coordinator sharing this one's state, bound to a child
    /// cancellation token.
    pub fn scoped(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            cancel: self.cancel.child_token(),
        }
    }

    /// Cancel every in-flight operation of this scope and its children.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    // ── Execution ────────────────────────────────────────────────────

    /// Run `op` under request-state tracking.
    ///
    /// Failures are recorded as `last_error` (and under `kind`) and then
    /// returned. Cancellation of this scope ends the wait with
    /// [`CoreError::Cancelled`] and records nothing.
    pub async fn execute<T, F>(&self, kind: OperationKind, op: F) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, CoreError>>,
    {
        if self.cancel.is_cancelled() {
            return Err(CoreError::Cancelled);
        }

        let guard = InFlight::begin(&self.inner.state, kind);
        let spec = kind.spec();
        debug!(operation = %kind, method = %spec.method, path = spec.path, "request started");

        let result = tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(CoreError::Cancelled),
            result = op => result,
        };

        match result {
            Ok(value) => {
                drop(guard);
                debug!(operation = %kind, "request succeeded");
                Ok(value)
            }
            Err(CoreError::Cancelled) => {
                drop(guard);
                debug!(operation = %kind, "request cancelled");
                Err(CoreError::Cancelled)
            }
            Err(err) => {
                let message = err.request_message();
                warn!(operation = %kind, error = %message, "request failed");
                guard.fail(kind, message);
                Err(err)
            }
        }
    }

    /// Run an operation as a task with its own cancellable scope.
    ///
    /// The closure receives the task's scoped coordinator; use it for every
    /// call the task makes so `RequestHandle::cancel` reaches them.
    pub fn spawn<T, F, Fut>(&self, f: F) -> RequestHandle<T>
    where
        F: FnOnce(Coordinator) -> Fut,
        Fut: Future<Output = Result<T, CoreError>> + Send + 'static,
        T: Send + 'static,
    {
        let scope = self.scoped();
        let cancel = scope.cancel.clone();
        let (status_tx, status_rx) = watch::channel(RequestStatus::Pending);
        let fut = f(scope);

        let task = tokio::spawn(async move {
            let result = fut.await;
            status_tx.send_replace(RequestStatus::from_result(&result));
            result
        });

        RequestHandle::new(task, status_rx, cancel)
    }

    // ── Customers ────────────────────────────────────────────────────

    pub async fn list_customers(&self) -> Result<Vec<Customer>, CoreError> {
        let client = &self.inner.client;
        self.execute(OperationKind::ListCustomers, async {
            let records = client.list_customers().await?;
            Ok::<_, CoreError>(records.into_iter().map(Customer::from).collect())
        })
        .await
    }

    pub async fn get_customer(&self, id: &EntityId) -> Result<Customer, CoreError> {
        let client = &self.inner.client;
        let raw = RawId::from(id);
        self.execute(OperationKind::GetCustomer, async {
            Ok::<_, CoreError>(Customer::from(client.get_customer(&raw).await?))
        })
        .await
    }

    /// Validate and create. A rejected draft never reaches the network.
    pub async fn create_customer(&self, draft: &CustomerDraft) -> Result<Customer, CoreError> {
        let fields = draft.validate()?;
        let client = &self.inner.client;
        self.execute(OperationKind::CreateCustomer, async {
            Ok::<_, CoreError>(Customer::from(client.create_customer(&fields).await?))
        })
        .await
    }

    pub async fn update_customer(
        &self,
        id: &EntityId,
        draft: &CustomerDraft,
    ) -> Result<Customer, CoreError> {
        let fields = draft.validate()?;
        let client = &self.inner.client;
        let raw = RawId::from(id);
        self.execute(OperationKind::UpdateCustomer, async {
            Ok::<_, CoreError>(Customer::from(client.update_customer(&raw, &fields).await?))
        })
        .await
    }

    pub async fn delete_customer(&self, id: &EntityId) -> Result<(), CoreError> {
        let client = &self.inner.client;
        let raw = RawId::from(id);
        self.execute(OperationKind::DeleteCustomer, async {
            Ok::<_, CoreError>(client.delete_customer(&raw).await?)
        })
        .await
    }

    // ── Loans ────────────────────────────────────────────────────────

    pub async fn list_loans(&self) -> Result<Vec<Loan>, CoreError> {
        let client = &self.inner.client;
        self.execute(OperationKind::ListLoans, async {
            let records = client.list_loans().await?;
            Ok::<_, CoreError>(records.into_iter().map(Loan::from).collect())
        })
        .await
    }

    pub async fn get_loan(&self, id: &EntityId) -> Result<Loan, CoreError> {
        let client = &self.inner.client;
        let raw = RawId::from(id);
        self.execute(OperationKind::GetLoan, async {
            Ok::<_, CoreError>(Loan::from(client.get_loan(&raw).await?))
        })
        .await
    }

    pub async fn create_loan(&self, draft: &LoanDraft) -> Result<Loan, CoreError> {
        let fields = draft.validate()?;
        let client = &self.inner.client;
        self.execute(OperationKind::CreateLoan, async {
            Ok::<_, CoreError>(Loan::from(client.create_loan(&fields).await?))
        })
        .await
    }

    pub async fn update_loan(&self, id: &EntityId, draft: &LoanDraft) -> Result<Loan, CoreError> {
        let fields = draft.validate()?;
        let client = &self.inner.client;
        let raw = RawId::from(id);
        self.execute(OperationKind::UpdateLoan, async {
            Ok::<_, CoreError>(Loan::from(client.update_loan(&raw, &fields).await?))
        })
        .await
    }

    pub async fn delete_loan(&self, id: &EntityId) -> Result<(), CoreError> {
        let client = &self.inner.client;
        let raw = RawId::from(id);
        self.execute(OperationKind::DeleteLoan, async {
            Ok::<_, CoreError>(client.delete_loan(&raw).await?)
        })
        .await
    }

    // ── Dashboard ────────────────────────────────────────────────────

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, CoreError> {
        let client = &self.inner.client;
        self.execute(OperationKind::DashboardStats, async {
            Ok::<_, CoreError>(DashboardStats::from(client.dashboard_stats().await?))
        })
        .await
    }

    // ── Call center ──────────────────────────────────────────────────

    /// Pre-call lookup by the caller's phone number.
    pub async fn lookup_profile(&self, phone_number: &str) -> Result<CallerLookup, CoreError> {
        let client = &self.inner.client;
        self.execute(OperationKind::LookupProfile, async {
            Ok::<_, CoreError>(CallerLookup::from(
                client.fetch_user_profile_pre_call(phone_number).await?,
            ))
        })
        .await
    }

    pub async fn submit_outcome(
        &self,
        payload: &CallOutcomePayload,
    ) -> Result<OutcomeAck, CoreError> {
        let client = &self.inner.client;
        self.execute(OperationKind::SubmitOutcome, async {
            Ok::<_, CoreError>(OutcomeAck::from(client.post_call_outcomes(payload).await?))
        })
        .await
    }

    // ── Interactions ─────────────────────────────────────────────────

    pub async fn list_interactions(
        &self,
        customer_id: &EntityId,
    ) -> Result<Vec<Interaction>, CoreError> {
        let client = &self.inner.client;
        let raw = RawId::from(customer_id);
        self.execute(OperationKind::ListInteractions, async {
            let records = client.list_interactions(&raw).await?;
            Ok::<_, CoreError>(records.into_iter().map(Interaction::from).collect())
        })
        .await
    }

    pub async fn create_interaction(
        &self,
        customer_id: &EntityId,
        draft: &InteractionDraft,
    ) -> Result<Interaction, CoreError> {
        let fields = draft.validate()?;
        let client = &self.inner.client;
        let raw = RawId::from(customer_id);
        self.execute(OperationKind::CreateInteraction, async {
            Ok::<_, CoreError>(Interaction::from(
                client.create_interaction(&raw, &fields).await?,
            ))
        })
        .await
    }

    // ── Composite reads ──────────────────────────────────────────────

    /// A customer with their contact history. A failed history fetch is
    /// still recorded as `last_error` but yields an empty history.
    pub async fn customer_overview(
        &self,
        id: &EntityId,
    ) -> Result<(Customer, Vec<Interaction>), CoreError> {
        let customer = self.get_customer(id).await?;
        let interactions = match self.list_interactions(id).await {
            Ok(list) => list,
            Err(CoreError::Cancelled) => return Err(CoreError::Cancelled),
            Err(err) => {
                warn!(customer = %id, error = %err, "interaction history unavailable");
                Vec::new()
            }
        };
        Ok((customer, interactions))
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("base_url", &self.inner.client.base_url().as_str())
            .field("state", &*self.inner.state.borrow())
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinator() -> Coordinator {
        let client = ApiClient::new("http://127.0.0.1:9/api", &TransportConfig::default())
            .expect("client");
        Coordinator::with_client(client)
    }

    #[tokio::test]
    async fn success_releases_loading() {
        let coord = coordinator();
        let value = coord
            .execute(OperationKind::ListLoans, async { Ok::<_, CoreError>(5) })
            .await
            .expect("ok");
        assert_eq!(value, 5);
        assert!(!coord.loading());
        assert_eq!(coord.last_error(), None);
    }

    #[tokio::test]
    async fn failure_records_message_and_rethrows() {
        let coord = coordinator();
        let err = coord
            .execute(OperationKind::GetLoan, async {
                Err::<(), _>(CoreError::Api {
                    status: 409,
                    message: "Request failed with status code 409".into(),
                    server_message: Some("Duplicate account".into()),
                })
            })
            .await
            .expect_err("should fail");

        assert_eq!(err.status(), Some(409));
        assert!(!coord.loading());
        assert_eq!(coord.last_error().as_deref(), Some("Duplicate account"));
        assert_eq!(
            coord.state().error_for(OperationKind::GetLoan),
            Some("Duplicate account")
        );
    }

    #[tokio::test]
    async fn next_call_clears_last_error() {
        let coord = coordinator();
        let _ = coord
            .execute(OperationKind::ListLoans, async {
                Err::<(), _>(CoreError::Internal("boom".into()))
            })
            .await;
        assert!(coord.last_error().is_some());

        coord
            .execute(OperationKind::ListCustomers, async { Ok::<_, CoreError>(()) })
            .await
            .expect("ok");
        assert_eq!(coord.last_error(), None);
        assert_eq!(
            coord.state().error_for(OperationKind::ListLoans),
            Some("Internal error: boom")
        );
    }

    #[tokio::test]
    async fn loading_is_true_while_awaiting() {
        let coord = coordinator();
        let observer = coord.clone();
        coord
            .execute(OperationKind::DashboardStats, async move {
                assert!(observer.loading());
                assert_eq!(observer.state().in_flight(), 1);
                Ok::<_, CoreError>(())
            })
            .await
            .expect("ok");
        assert!(!coord.loading());
    }

    #[tokio::test]
    async fn validation_failure_never_touches_state() {
        let coord = coordinator();
        let rx = coord.subscribe();

        let err = coord
            .create_customer(&CustomerDraft::default())
            .await
            .expect_err("empty draft");
        assert!(matches!(err, CoreError::Validation { .. }));
        assert!(!rx.has_changed().expect("sender alive"));
        assert_eq!(coord.last_error(), None);
    }

    #[tokio::test]
    async fn cancelled_scope_short_circuits() {
        let coord = coordinator();
        let scope = coord.scoped();
        scope.cancel();

        let err = scope
            .execute(OperationKind::ListLoans, async { Ok::<_, CoreError>(()) })
            .await
            .expect_err("cancelled");
        assert!(matches!(err, CoreError::Cancelled));
        assert!(!coord.is_cancelled());
        assert_eq!(coord.last_error(), None);
    }

    #[tokio::test]
    async fn clear_error_dismisses() {
        let coord = coordinator();
        let _ = coord
            .execute(OperationKind::ListLoans, async {
                Err::<(), _>(CoreError::Network {
                    message: String::new(),
                })
            })
            .await;
        assert_eq!(coord.last_error().as_deref(), Some("An error occurred"));

        coord.clear_error();
        assert_eq!(coord.last_error(), None);
        assert!(coord.state().errors().is_empty());
    }
}
